use serde_json::Value;
use tracing::info;

use models::client::{Client, ClientPatch, NewClient};
use models::Kind;

use crate::errors::ServiceError;
use crate::resolver;
use crate::store::EntityStore;

const NOT_FOUND: &str = "Cliente não encontrado.";

pub async fn create(store: &dyn EntityStore, body: &Value) -> Result<String, ServiceError> {
    let new = NewClient::parse(body).map_err(ServiceError::Validation)?;
    let id = store.insert(Kind::Client, crate::to_doc(&new)?).await?;
    info!(%id, "client created");
    Ok(id)
}

pub async fn list(store: &dyn EntityStore) -> Result<Vec<Client>, ServiceError> {
    store
        .find_all(Kind::Client)
        .await?
        .into_iter()
        .map(crate::from_doc)
        .collect()
}

pub async fn get(store: &dyn EntityStore, raw_id: &str) -> Result<Client, ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    let doc = store
        .find_by_id(Kind::Client, &id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
    crate::from_doc(doc)
}

pub async fn update(
    store: &dyn EntityStore,
    raw_id: &str,
    body: &Value,
) -> Result<(), ServiceError> {
    let patch = ClientPatch::parse(body).map_err(ServiceError::Validation)?;
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Client, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.update(Kind::Client, &id, crate::to_doc(&patch)?).await?;
    Ok(())
}

pub async fn delete(store: &dyn EntityStore, raw_id: &str) -> Result<(), ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::Client, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.delete(Kind::Client, &id).await?;
    info!(%id, "client deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn partial_update_preserves_omitted_fields() {
        let store = MemoryStore::new();
        let id = create(
            &store,
            &json!({ "name": "Bia", "email": "bia@x.com", "phone": "11 99999-0000" }),
        )
        .await
        .unwrap();

        update(&store, &id, &json!({ "phone": "11 98888-1111" })).await.unwrap();

        let found = get(&store, &id).await.unwrap();
        assert_eq!(found.name, "Bia");
        assert_eq!(found.email, "bia@x.com");
        assert_eq!(found.phone, "11 98888-1111");
    }

    #[tokio::test]
    async fn duplicate_emails_are_allowed() {
        // client email carries no uniqueness rule, unlike users
        let store = MemoryStore::new();
        let body = json!({ "name": "Bia", "email": "bia@x.com", "phone": "1" });
        create(&store, &body).await.unwrap();
        create(&store, &body).await.unwrap();
        assert_eq!(list(&store).await.unwrap().len(), 2);
    }
}
