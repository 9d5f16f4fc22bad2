mod error;
mod projects;
mod clients;
mod expenses;
mod workers;
mod documents;

use std::sync::Arc;

use uuid::Uuid;

use crate::clock::{Clock, Operation};
use crate::models::EntityKind;
use crate::reports::Snapshot;
use crate::seed::SeedData;
use crate::store::{Keyed, Store};

pub use error::ServiceError;
pub use projects::ProjectService;
pub use clients::ClientService;
pub use expenses::ExpenseService;
pub use workers::WorkerService;
pub use documents::DocumentService;

/// A record type served by an [`EntityService`].
///
/// `New` carries the caller-supplied fields of a create, `Patch` the named
/// optional fields of an update. `create` fills in the entity's defaults.
pub trait Record: Keyed + 'static {
    const KIND: EntityKind;

    type New: Send;
    type Patch: Send;

    fn create(id: String, fields: Self::New, clock: &dyn Clock) -> Self;

    /// Overwrites every field the patch sets and leaves the rest alone.
    fn apply(&mut self, patch: Self::Patch);
}

/// CRUD over one entity store. Every call pauses on the clock first.
pub struct EntityService<T> {
    store: Arc<Store<T>>,
    clock: Arc<dyn Clock>,
}

impl<T: Record> EntityService<T> {
    pub fn new(store: Arc<Store<T>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[cfg(test)]
    pub fn store(&self) -> &Arc<Store<T>> {
        &self.store
    }

    pub async fn get_all(&self) -> Vec<T> {
        self.clock.pause(Operation::GetAll).await;
        let records = self.store.snapshot().await;
        tracing::debug!(entity = %T::KIND, count = records.len(), "listed records");
        records
    }

    pub async fn get_by_id(&self, id: &str) -> Option<T> {
        self.clock.pause(Operation::GetById).await;
        let record = self.store.find(id).await;
        tracing::debug!(entity = %T::KIND, id, found = record.is_some(), "looked up record");
        record
    }

    pub async fn create(&self, fields: T::New) -> T {
        self.clock.pause(Operation::Create).await;
        let record = T::create(Uuid::new_v4().to_string(), fields, self.clock.as_ref());
        self.store.push(record.clone()).await;
        tracing::info!(entity = %T::KIND, id = record.id(), "created record");
        record
    }

    pub async fn update(&self, id: &str, patch: T::Patch) -> Result<T, ServiceError> {
        self.clock.pause(Operation::Update).await;
        match self.store.modify(id, |record| record.apply(patch)).await {
            Some(record) => {
                tracing::info!(entity = %T::KIND, id, "updated record");
                Ok(record)
            }
            None => {
                tracing::warn!(entity = %T::KIND, id, "update of unknown record");
                Err(ServiceError::not_found(T::KIND, id))
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<T, ServiceError> {
        self.clock.pause(Operation::Delete).await;
        match self.store.remove(id).await {
            Some(record) => {
                tracing::info!(entity = %T::KIND, id, "deleted record");
                Ok(record)
            }
            None => {
                tracing::warn!(entity = %T::KIND, id, "delete of unknown record");
                Err(ServiceError::not_found(T::KIND, id))
            }
        }
    }
}

/// One service per entity type, all sharing the same clock.
///
/// Built once at startup and passed by reference to the views. Deletes do not
/// cascade: references to a removed record are left dangling.
pub struct Services {
    pub projects: ProjectService,
    pub clients: ClientService,
    pub expenses: ExpenseService,
    pub workers: WorkerService,
    pub documents: DocumentService,
}

impl Services {
    pub fn new(seed: SeedData, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects: EntityService::new(Arc::new(Store::hydrate(seed.projects)), clock.clone()),
            clients: EntityService::new(Arc::new(Store::hydrate(seed.clients)), clock.clone()),
            expenses: EntityService::new(Arc::new(Store::hydrate(seed.expenses)), clock.clone()),
            workers: EntityService::new(Arc::new(Store::hydrate(seed.workers)), clock.clone()),
            documents: EntityService::new(Arc::new(Store::hydrate(seed.documents)), clock),
        }
    }

    /// Loads every collection concurrently.
    pub async fn snapshot(&self) -> Snapshot {
        let (projects, clients, expenses, workers, documents) = tokio::join!(
            self.projects.get_all(),
            self.clients.get_all(),
            self.expenses.get_all(),
            self.workers.get_all(),
            self.documents.get_all(),
        );
        Snapshot {
            projects,
            clients,
            expenses,
            workers,
            documents,
        }
    }

    /// Deletes a record of any kind, discarding the removed copy.
    pub async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ServiceError> {
        match kind {
            EntityKind::Project => self.projects.delete(id).await.map(drop),
            EntityKind::Client => self.clients.delete(id).await.map(drop),
            EntityKind::Expense => self.expenses.delete(id).await.map(drop),
            EntityKind::Worker => self.workers.delete(id).await.map(drop),
            EntityKind::Document => self.documents.delete(id).await.map(drop),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::Services;
    use crate::clock::testing::ManualClock;
    use crate::seed::SeedData;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    pub fn services() -> (Services, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(today()));
        let services = Services::new(SeedData::bundled().unwrap(), clock.clone());
        (services, clock)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::testing::services;
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::models::{ClientPatch, NewClient};

    fn acme() -> NewClient {
        NewClient {
            company_name: "Acme".to_string(),
            contact_person: "Wile E.".to_string(),
            email: "wile@acme.test".to_string(),
            phone: "(555) 000-0000".to_string(),
            address: "1 Desert Rd".to_string(),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn every_operation_pauses_first() {
        let (services, clock) = services();
        let created = services.clients.create(acme()).await;
        services.clients.get_all().await;
        services.clients.get_by_id(&created.id).await;
        services.clients.update(&created.id, ClientPatch::default()).await.unwrap();
        services.clients.delete(&created.id).await.unwrap();
        services.clients.delete(&created.id).await.unwrap_err();

        assert_eq!(
            clock.pauses(),
            [
                Operation::Create,
                Operation::GetAll,
                Operation::GetById,
                Operation::Update,
                Operation::Delete,
                Operation::Delete,
            ]
        );
    }

    #[tokio::test]
    async fn services_over_one_store_share_records() {
        let (services, _) = services();
        let clock = Arc::new(ManualClock::new(testing::today()));
        let second = EntityService::new(services.clients.store().clone(), clock);

        let created = services.clients.create(acme()).await;
        assert_eq!(second.get_by_id(&created.id).await, Some(created));
    }

    #[tokio::test]
    async fn rapid_creates_get_distinct_ids() {
        let (services, _) = services();
        let mut ids = HashSet::new();
        for _ in 0..50 {
            ids.insert(services.clients.create(acme()).await.id);
        }
        assert_eq!(ids.len(), 50);
    }

    #[tokio::test]
    async fn concurrent_updates_are_last_write_wins() {
        let (services, _) = services();
        let first = ClientPatch {
            notes: Some("first".to_string()),
            ..Default::default()
        };
        let second = ClientPatch {
            notes: Some("second".to_string()),
            ..Default::default()
        };
        let (a, b) = tokio::join!(
            services.clients.update("1", first),
            services.clients.update("1", second),
        );
        assert!(a.is_ok() && b.is_ok());
        let stored = services.clients.get_by_id("1").await.unwrap();
        assert_eq!(stored.notes, "second");
    }

    #[tokio::test]
    async fn snapshot_loads_every_collection() {
        let (services, _) = services();
        let snapshot = services.snapshot().await;
        assert_eq!(snapshot.projects.len(), 4);
        assert_eq!(snapshot.clients.len(), 3);
        assert_eq!(snapshot.expenses.len(), 6);
        assert_eq!(snapshot.workers.len(), 5);
        assert_eq!(snapshot.documents.len(), 4);
    }

    #[tokio::test]
    async fn delete_by_kind_reports_missing_ids() {
        let (services, _) = services();
        services.delete(EntityKind::Worker, "5").await.unwrap();
        assert_eq!(
            services.delete(EntityKind::Worker, "5").await,
            Err(ServiceError::not_found(EntityKind::Worker, "5"))
        );
        assert_eq!(services.workers.store().len().await, 4);
    }
}
