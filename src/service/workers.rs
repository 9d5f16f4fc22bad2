use crate::clock::Clock;
use crate::models::{EntityKind, NewWorker, Worker, WorkerPatch};
use crate::store::Keyed;

use super::{EntityService, Record};

pub type WorkerService = EntityService<Worker>;

impl Keyed for Worker {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Worker {
    const KIND: EntityKind = EntityKind::Worker;

    type New = NewWorker;
    type Patch = WorkerPatch;

    fn create(id: String, fields: NewWorker, _clock: &dyn Clock) -> Self {
        Worker {
            id,
            name: fields.name,
            role: fields.role,
            phone: fields.phone,
            email: fields.email,
            daily_rate: fields.daily_rate,
            project_ids: fields.project_ids.unwrap_or_default(),
            skills: fields.skills,
        }
    }

    fn apply(&mut self, patch: WorkerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(daily_rate) = patch.daily_rate {
            self.daily_rate = daily_rate;
        }
        if let Some(project_ids) = patch.project_ids {
            self.project_ids = project_ids;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::services;

    fn plumber(project_ids: Option<Vec<String>>) -> NewWorker {
        NewWorker {
            name: "Rosa Diaz".to_string(),
            role: "Plumber".to_string(),
            daily_rate: 380.0,
            project_ids,
            skills: vec!["Plumbing".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_defaults_to_no_assignments() {
        let (services, _) = services();
        let created = services.workers.create(plumber(None)).await;
        assert!(created.project_ids.is_empty());
        assert!(created.is_available());
    }

    #[tokio::test]
    async fn create_keeps_supplied_assignments() {
        let (services, _) = services();
        let created = services.workers.create(plumber(Some(vec!["1".to_string()]))).await;
        assert_eq!(created.project_ids, ["1"]);
    }

    #[tokio::test]
    async fn deleting_a_project_leaves_worker_assignments() {
        let (services, _) = services();
        services.projects.delete("2").await.unwrap();
        let foreman = services.workers.get_by_id("4").await.unwrap();
        assert_eq!(foreman.project_ids, ["2"]);
    }

    #[tokio::test]
    async fn update_changes_rate_only() {
        let (services, _) = services();
        let before = services.workers.get_by_id("2").await.unwrap();
        let patch = WorkerPatch {
            daily_rate: Some(365.0),
            ..Default::default()
        };
        let updated = services.workers.update("2", patch).await.unwrap();
        assert_eq!(
            updated,
            Worker {
                daily_rate: 365.0,
                ..before
            }
        );
    }
}
