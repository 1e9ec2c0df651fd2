use serde_json::Value;
use tracing::info;

use models::category::{Category, CategoryPatch, NewCategory};
use models::Kind;

use crate::errors::ServiceError;
use crate::resolver;
use crate::store::EntityStore;

const NOT_FOUND: &str = "Categoria não encontrada.";

pub async fn create(store: &dyn EntityStore, body: &Value) -> Result<String, ServiceError> {
    let new = NewCategory::parse(body).map_err(ServiceError::Validation)?;
    let id = store.insert(Kind::Category, crate::to_doc(&new)?).await?;
    info!(%id, "category created");
    Ok(id)
}

pub async fn list(store: &dyn EntityStore) -> Result<Vec<Category>, ServiceError> {
    store
        .find_all(Kind::Category)
        .await?
        .into_iter()
        .map(crate::from_doc)
        .collect()
}

pub async fn get(store: &dyn EntityStore, raw_id: &str) -> Result<Category, ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    let doc = store
        .find_by_id(Kind::Category, &id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
    crate::from_doc(doc)
}

pub async fn update(
    store: &dyn EntityStore,
    raw_id: &str,
    body: &Value,
) -> Result<(), ServiceError> {
    let patch = CategoryPatch::parse(body).map_err(ServiceError::Validation)?;
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Category, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.update(Kind::Category, &id, crate::to_doc(&patch)?).await?;
    Ok(())
}

pub async fn delete(store: &dyn EntityStore, raw_id: &str) -> Result<(), ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Category, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.delete(Kind::Category, &id).await?;
    info!(%id, "category deleted");
    Ok(())
}
