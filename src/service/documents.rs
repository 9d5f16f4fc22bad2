use std::ops::Range;

use rand::Rng;

use crate::clock::Clock;
use crate::models::{Document, DocumentPatch, EntityKind, NewDocument};
use crate::store::Keyed;

use super::{EntityService, Record};

pub type DocumentService = EntityService<Document>;

/// Placeholder size range, in kilobytes, for uploads that do not report one.
const PLACEHOLDER_SIZE_KB: Range<u64> = 100..5100;

impl Keyed for Document {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Document {
    const KIND: EntityKind = EntityKind::Document;

    type New = NewDocument;
    type Patch = DocumentPatch;

    fn create(id: String, fields: NewDocument, clock: &dyn Clock) -> Self {
        let size = fields
            .size
            .unwrap_or_else(|| rand::thread_rng().gen_range(PLACEHOLDER_SIZE_KB));
        Document {
            id,
            name: fields.name,
            category: fields.category,
            tags: fields.tags,
            file_url: fields.file_url,
            upload_date: clock.today(),
            size,
        }
    }

    fn apply(&mut self, patch: DocumentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(file_url) = patch.file_url {
            self.file_url = file_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentCategory;
    use crate::service::testing::{services, today};

    fn permit(size: Option<u64>) -> NewDocument {
        NewDocument {
            name: "Excavation Permit".to_string(),
            category: DocumentCategory::Permits,
            tags: vec!["Legal".to_string()],
            file_url: "https://files.buildco.com/permits/excavation.pdf".to_string(),
            size,
        }
    }

    #[tokio::test]
    async fn create_stamps_the_upload_date() {
        let (services, _) = services();
        let created = services.documents.create(permit(Some(512))).await;
        assert_eq!(created.upload_date, today());
        assert_eq!(created.size, 512);
    }

    #[tokio::test]
    async fn missing_size_gets_a_placeholder() {
        let (services, _) = services();
        let created = services.documents.create(permit(None)).await;
        assert!(PLACEHOLDER_SIZE_KB.contains(&created.size));
    }

    #[tokio::test]
    async fn update_keeps_upload_metadata() {
        let (services, _) = services();
        let before = services.documents.get_by_id("3").await.unwrap();
        let patch = DocumentPatch {
            tags: Some(vec!["Safety".to_string()]),
            ..Default::default()
        };
        let updated = services.documents.update("3", patch).await.unwrap();
        assert_eq!(updated.tags, ["Safety"]);
        assert_eq!(updated.upload_date, before.upload_date);
        assert_eq!(updated.size, before.size);
    }
}
