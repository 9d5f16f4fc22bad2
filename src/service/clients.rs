use crate::clock::Clock;
use crate::models::{Client, ClientPatch, EntityKind, NewClient};
use crate::store::Keyed;

use super::{EntityService, Record};

pub type ClientService = EntityService<Client>;

impl Keyed for Client {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Client {
    const KIND: EntityKind = EntityKind::Client;

    type New = NewClient;
    type Patch = ClientPatch;

    fn create(id: String, fields: NewClient, _clock: &dyn Clock) -> Self {
        Client {
            id,
            company_name: fields.company_name,
            contact_person: fields.contact_person,
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
            notes: fields.notes,
            project_ids: Vec::new(),
        }
    }

    fn apply(&mut self, patch: ClientPatch) {
        if let Some(company_name) = patch.company_name {
            self.company_name = company_name;
        }
        if let Some(contact_person) = patch.contact_person {
            self.contact_person = contact_person;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(project_ids) = patch.project_ids {
            self.project_ids = project_ids;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::services;

    #[tokio::test]
    async fn create_starts_without_projects() {
        let (services, _) = services();
        let created = services
            .clients
            .create(NewClient {
                company_name: "Acme".to_string(),
                contact_person: "Road Runner".to_string(),
                ..Default::default()
            })
            .await;

        assert!(created.project_ids.is_empty());
        assert_eq!(created.company_name, "Acme");
        assert_eq!(services.clients.get_all().await.len(), 4);
    }

    #[tokio::test]
    async fn deleting_a_client_leaves_its_projects_dangling() {
        let (services, _) = services();
        let owned: Vec<_> = services
            .projects
            .get_all()
            .await
            .into_iter()
            .filter(|p| p.client_id == "1")
            .collect();
        assert_eq!(owned.len(), 2);

        services.clients.delete("1").await.unwrap();

        assert_eq!(services.clients.get_by_id("1").await, None);
        for project in owned {
            let stored = services.projects.get_by_id(&project.id).await.unwrap();
            assert_eq!(stored.client_id, "1");
        }
    }

    #[tokio::test]
    async fn update_can_reassign_projects() {
        let (services, _) = services();
        let patch = ClientPatch {
            project_ids: Some(vec!["2".to_string(), "3".to_string()]),
            ..Default::default()
        };
        let updated = services.clients.update("3", patch).await.unwrap();
        assert_eq!(updated.project_ids, ["2", "3"]);
        assert_eq!(updated.company_name, "Summit Retail Group");
    }
}
