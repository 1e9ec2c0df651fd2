//! Service layer: the request pipeline for each resource kind on top of an
//! injected store handle.
//! - Validates payloads with the `models` parsers.
//! - Resolves identifiers and foreign references before any write.
//! - Maps every outcome onto a `ServiceError` variant the HTTP layer can
//!   render without inspecting internals.

pub mod errors;
pub mod resolver;
pub mod store;

pub mod category;
pub mod client;
pub mod venue;
pub mod user;
pub mod event;
pub mod participant;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ServiceError;
use crate::store::StoreError;

pub(crate) fn to_doc<T: Serialize>(value: &T) -> Result<bson::Document, ServiceError> {
    bson::to_document(value).map_err(|e| ServiceError::Store(StoreError::Codec(e.to_string())))
}

pub(crate) fn from_doc<T: DeserializeOwned>(doc: bson::Document) -> Result<T, ServiceError> {
    bson::from_document(doc).map_err(|e| ServiceError::Store(StoreError::Codec(e.to_string())))
}
