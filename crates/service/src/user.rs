use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde_json::Value;
use tracing::{debug, info, instrument};

use models::user::{NewUser, User, UserPatch};
use models::Kind;

use crate::errors::ServiceError;
use crate::resolver;
use crate::store::EntityStore;

const NOT_FOUND: &str = "Usuário não encontrado.";
const EMAIL_TAKEN: &str = "Email já cadastrado.";

/// True when any stored user already carries `email`. The scan covers every
/// record, including the one under update.
pub async fn email_taken(store: &dyn EntityStore, email: &str) -> Result<bool, ServiceError> {
    Ok(store.find_by_field(Kind::User, "email", email).await?.is_some())
}

#[instrument(skip(store, body))]
pub async fn create(store: &dyn EntityStore, body: &Value) -> Result<String, ServiceError> {
    let new = NewUser::parse(body).map_err(ServiceError::Validation)?;
    if email_taken(store, &new.email).await? {
        debug!(email = %new.email, "email already registered");
        return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
    }
    let password = hash_password(&new.password)?;
    let record = NewUser { password, ..new };
    let id = store.insert(Kind::User, crate::to_doc(&record)?).await?;
    info!(%id, email = %record.email, "user created");
    Ok(id)
}

pub async fn list(store: &dyn EntityStore) -> Result<Vec<User>, ServiceError> {
    store
        .find_all(Kind::User)
        .await?
        .into_iter()
        .map(crate::from_doc)
        .collect()
}

pub async fn get(store: &dyn EntityStore, raw_id: &str) -> Result<User, ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    let doc = store
        .find_by_id(Kind::User, &id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
    crate::from_doc(doc)
}

pub async fn update(
    store: &dyn EntityStore,
    raw_id: &str,
    body: &Value,
) -> Result<(), ServiceError> {
    let patch = UserPatch::parse(body).map_err(ServiceError::Validation)?;
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::User, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    if let Some(email) = &patch.email {
        if email_taken(store, email).await? {
            return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
        }
    }
    store.update(Kind::User, &id, crate::to_doc(&patch)?).await?;
    Ok(())
}

pub async fn delete(store: &dyn EntityStore, raw_id: &str) -> Result<(), ServiceError> {
    let id = resolver::parse_path_id(raw_id)?;
    if store.find_by_id(Kind::User, &id).await?.is_none() {
        return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
    }
    store.delete(Kind::User, &id).await?;
    info!(%id, "user deleted");
    Ok(())
}

fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    fn ana() -> Value {
        json!({ "name": "Ana", "email": "ana@x.com", "password": "secret" })
    }

    #[tokio::test]
    async fn create_stores_hash_not_plaintext() {
        let store = MemoryStore::new();
        let id = create(&store, &ana()).await.unwrap();
        let user = get(&store, &id).await.unwrap();
        assert_eq!(user.email, "ana@x.com");
        assert_ne!(user.password, "secret");
        assert!(user.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_email_rejected_without_write() {
        let store = MemoryStore::new();
        create(&store, &ana()).await.unwrap();
        let err = create(&store, &json!({ "name": "Outra", "email": "ana@x.com", "password": "x" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(store.count(Kind::User), 1);
    }

    #[tokio::test]
    async fn update_scan_does_not_exempt_own_email() {
        // resubmitting the record's own email is rejected: the duplicate scan
        // covers the record itself
        let store = MemoryStore::new();
        let id = create(&store, &ana()).await.unwrap();
        let err = update(&store, &id, &json!({ "email": "ana@x.com" })).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_ignores_password_and_keeps_omitted_fields() {
        let store = MemoryStore::new();
        let id = create(&store, &ana()).await.unwrap();
        let before = get(&store, &id).await.unwrap();

        update(&store, &id, &json!({ "name": "Ana Clara", "password": "nova" }))
            .await
            .unwrap();

        let after = get(&store, &id).await.unwrap();
        assert_eq!(after.name, "Ana Clara");
        assert_eq!(after.email, "ana@x.com");
        assert_eq!(after.password, before.password);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryStore::new();
        let id = create(&store, &ana()).await.unwrap();
        delete(&store, &id).await.unwrap();
        assert!(matches!(get(&store, &id).await, Err(ServiceError::NotFound(_))));
    }
}
