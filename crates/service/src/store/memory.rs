use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use bson::{Bson, Document};

use models::{id, Kind};

use super::{EntityStore, StoreError};

/// In-memory store with the same contract as the MongoDB one. Backs unit and
/// end-to-end tests without a running database.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Kind, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection.
    pub fn count(&self, kind: Kind) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(&kind)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert(&self, kind: Kind, mut doc: Document) -> Result<String, StoreError> {
        let id = id::generate();
        doc.insert("_id", id.clone());
        self.collections
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .insert(id.clone(), doc);
        Ok(id)
    }

    async fn find_all(&self, kind: Kind) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(&kind)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, kind: Kind, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(&kind)
            .and_then(|records| records.get(id).cloned()))
    }

    async fn find_by_ids(&self, kind: Kind, ids: &[String]) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let Some(records) = collections.get(&kind) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }

    async fn find_by_field(
        &self,
        kind: Kind,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collections.lock().unwrap().get(&kind).and_then(|records| {
            records
                .values()
                .find(|doc| doc.get(field) == Some(&Bson::String(value.to_string())))
                .cloned()
        }))
    }

    async fn exists(&self, kind: Kind, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(&kind)
            .map(|records| records.contains_key(id))
            .unwrap_or(false))
    }

    async fn update(&self, kind: Kind, id: &str, changes: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap();
        if let Some(doc) = collections.get_mut(&kind).and_then(|records| records.get_mut(id)) {
            for (key, value) in changes {
                doc.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<(), StoreError> {
        if let Some(records) = self.collections.lock().unwrap().get_mut(&kind) {
            records.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[tokio::test]
    async fn insert_find_update_delete_roundtrip() {
        let store = MemoryStore::new();
        let id = store
            .insert(Kind::Category, doc! { "type": "festa" })
            .await
            .unwrap();

        let found = store.find_by_id(Kind::Category, &id).await.unwrap().unwrap();
        assert_eq!(found.get_str("type").unwrap(), "festa");
        assert!(store.exists(Kind::Category, &id).await.unwrap());

        store
            .update(Kind::Category, &id, doc! { "type": "show" })
            .await
            .unwrap();
        let found = store.find_by_id(Kind::Category, &id).await.unwrap().unwrap();
        assert_eq!(found.get_str("type").unwrap(), "show");

        store.delete(Kind::Category, &id).await.unwrap();
        assert!(store.find_by_id(Kind::Category, &id).await.unwrap().is_none());
        assert_eq!(store.count(Kind::Category), 0);
    }

    #[tokio::test]
    async fn find_by_field_matches_string_values() {
        let store = MemoryStore::new();
        store
            .insert(Kind::User, doc! { "name": "Ana", "email": "ana@x.com" })
            .await
            .unwrap();
        assert!(store
            .find_by_field(Kind::User, "email", "ana@x.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_field(Kind::User, "email", "bia@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_by_ids_skips_missing() {
        let store = MemoryStore::new();
        let id = store.insert(Kind::Venue, doc! { "city": "Natal" }).await.unwrap();
        let ids = vec![id, id::generate()];
        let found = store.find_by_ids(Kind::Venue, &ids).await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
