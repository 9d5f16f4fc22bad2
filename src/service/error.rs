use thiserror::Error;

use crate::models::EntityKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },
}

impl ServiceError {
    pub fn not_found(entity: EntityKind, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
