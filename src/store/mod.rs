use tokio::sync::RwLock;

/// Anything that lives in a [`Store`]: a record with a string id.
pub trait Keyed: Clone + Send + Sync {
    fn id(&self) -> &str;
}

/// The in-memory collection for one entity type.
///
/// A store is hydrated exactly once, when it is built from its seed, and is
/// shared by reference afterwards. Records are kept in insertion order. Every
/// accessor hands out clones, so callers can never alias the stored values.
pub struct Store<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Keyed> Store<T> {
    pub fn hydrate(seed: Vec<T>) -> Self {
        Self {
            records: RwLock::new(seed),
        }
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn find(&self, id: &str) -> Option<T> {
        self.records.read().await.iter().find(|r| r.id() == id).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn push(&self, record: T) {
        self.records.write().await.push(record);
    }

    /// Applies `change` to the first record with `id` and returns a copy of the result.
    pub async fn modify<F>(&self, id: &str, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.id() == id)?;
        change(record);
        Some(record.clone())
    }

    pub async fn remove(&self, id: &str) -> Option<T> {
        let mut records = self.records.write().await;
        let index = records.iter().position(|r| r.id() == id)?;
        Some(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        body: String,
    }

    impl Keyed for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let store = Store::hydrate(vec![note("b", "first"), note("a", "second")]);
        store.push(note("c", "third")).await;
        let ids: Vec<_> = store.snapshot().await.into_iter().map(|n| n.id).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn modify_and_remove_target_the_first_match() {
        let store = Store::hydrate(vec![note("1", "x"), note("2", "y")]);

        let changed = store.modify("2", |n| n.body.push('!')).await;
        assert_eq!(changed, Some(note("2", "y!")));
        assert_eq!(store.modify("9", |n| n.body.clear()).await, None);

        assert_eq!(store.remove("1").await, Some(note("1", "x")));
        assert_eq!(store.remove("1").await, None);
        assert_eq!(store.len().await, 1);
    }
}
