use serde_json::Value;
use tracing::info;

use models::venue::{NewVenue, Venue, VenuePatch};
use models::Kind;

use crate::errors::ServiceError;
use crate::resolver;
use crate::store::EntityStore;

const NOT_FOUND: &str = "Local não encontrado.";

pub async fn create(store: &dyn EntityStore, body: &Value) -> Result<String, ServiceError> {
    let new = NewVenue::parse(body).map_err(ServiceError::Validation)?;
    let id = store.insert(Kind::Venue, crate::to_doc(&new)?).await?;
    info!(%id, "venue created");
    Ok(id)
}

pub async fn list(store: &dyn EntityStore) -> Result<Vec<Venue>, ServiceError> {
    store
        .find_all(Kind::Venue)
        .await?
        .into_iter()
        .map(crate::from_doc)
        .collect()
}

pub async fn get(store: &dyn EntityStore, raw_id: &str) -> Result<Venue, ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    let doc = store
        .find_by_id(Kind::Venue, &id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
    crate::from_doc(doc)
}

pub async fn update(
    store: &dyn EntityStore,
    raw_id: &str,
    body: &Value,
) -> Result<(), ServiceError> {
    let patch = VenuePatch::parse(body).map_err(ServiceError::Validation)?;
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Venue, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.update(Kind::Venue, &id, crate::to_doc(&patch)?).await?;
    Ok(())
}

pub async fn delete(store: &dyn EntityStore, raw_id: &str) -> Result<(), ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Venue, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.delete(Kind::Venue, &id).await?;
    info!(%id, "venue deleted");
    Ok(())
}
