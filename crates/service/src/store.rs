//! Entity store abstraction: one logical collection per resource kind,
//! documents addressed by their string identifier. The handle is constructed
//! once at startup and passed down, so the pipeline can run against a fake
//! store in tests.

use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

use models::Kind;

pub mod memory;
pub mod mongo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(String),
    #[error("codec error: {0}")]
    Codec(String),
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert `doc`, generating the identifier. Returns the new id.
    async fn insert(&self, kind: Kind, doc: Document) -> Result<String, StoreError>;
    async fn find_all(&self, kind: Kind) -> Result<Vec<Document>, StoreError>;
    async fn find_by_id(&self, kind: Kind, id: &str) -> Result<Option<Document>, StoreError>;
    /// Batch point lookup; missing ids are simply absent from the result.
    async fn find_by_ids(&self, kind: Kind, ids: &[String]) -> Result<Vec<Document>, StoreError>;
    async fn find_by_field(
        &self,
        kind: Kind,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError>;
    async fn exists(&self, kind: Kind, id: &str) -> Result<bool, StoreError>;
    /// Overwrite the supplied fields of the record, leaving the rest alone.
    async fn update(&self, kind: Kind, id: &str, changes: Document) -> Result<(), StoreError>;
    async fn delete(&self, kind: Kind, id: &str) -> Result<(), StoreError>;
}
