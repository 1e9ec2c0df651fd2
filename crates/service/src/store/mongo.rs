use async_trait::async_trait;
use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::{Client, Collection, Database};
use tracing::{error, info};

use models::{id, Kind};

use super::{EntityStore, StoreError};

/// Document store backed by a single long-lived MongoDB handle.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect once for the process. The database name comes from the URL
    /// path when present, otherwise from `default_name`.
    pub async fn connect(url: &str, default_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await.map_err(db_err)?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(default_name));
        match db.run_command(doc! { "ping": 1 }, None).await {
            Ok(_) => info!("MongoDB connected"),
            Err(e) => error!(error = %e, "MongoDB connection error"),
        }
        Ok(Self { db })
    }

    fn collection(&self, kind: Kind) -> Collection<Document> {
        self.db.collection::<Document>(kind.collection())
    }
}

fn db_err(e: mongodb::error::Error) -> StoreError {
    StoreError::Db(e.to_string())
}

#[async_trait]
impl EntityStore for MongoStore {
    async fn insert(&self, kind: Kind, mut doc: Document) -> Result<String, StoreError> {
        let id = id::generate();
        doc.insert("_id", id.clone());
        self.collection(kind).insert_one(doc, None).await.map_err(db_err)?;
        Ok(id)
    }

    async fn find_all(&self, kind: Kind) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(kind).find(None, None).await.map_err(db_err)?;
        cursor.try_collect().await.map_err(db_err)
    }

    async fn find_by_id(&self, kind: Kind, id: &str) -> Result<Option<Document>, StoreError> {
        self.collection(kind)
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(db_err)
    }

    async fn find_by_ids(&self, kind: Kind, ids: &[String]) -> Result<Vec<Document>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        let cursor = self.collection(kind).find(filter, None).await.map_err(db_err)?;
        cursor.try_collect().await.map_err(db_err)
    }

    async fn find_by_field(
        &self,
        kind: Kind,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let mut filter = Document::new();
        filter.insert(field, value);
        self.collection(kind).find_one(filter, None).await.map_err(db_err)
    }

    async fn exists(&self, kind: Kind, id: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_id(kind, id).await?.is_some())
    }

    async fn update(&self, kind: Kind, id: &str, changes: Document) -> Result<(), StoreError> {
        // Mongo rejects an empty $set
        if changes.is_empty() {
            return Ok(());
        }
        self.collection(kind)
            .update_one(doc! { "_id": id }, doc! { "$set": changes }, None)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<(), StoreError> {
        self.collection(kind)
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
