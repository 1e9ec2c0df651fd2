//! Identifier resolution: syntactic checks for path parameters and
//! existence checks for foreign references. References are weak — a lookup
//! miss is reported, never cascaded.

use serde::de::DeserializeOwned;
use std::collections::HashMap;

use models::validate::{self, FieldErrors};
use models::{id, Kind};

use crate::errors::ServiceError;
use crate::store::EntityStore;

/// Parse a path-parameter identifier. Malformed values are rejected before
/// any store access.
pub fn parse_path_id(raw: &str) -> Result<String, ServiceError> {
    id::parse(raw).ok_or_else(|| ServiceError::Input("ID inválido.".to_string()))
}

/// Point-lookup existence check for a foreign reference. A miss is recorded
/// against `field` — distinct from the 404 used for primary lookups.
pub async fn check_reference(
    store: &dyn EntityStore,
    kind: Kind,
    ref_id: &str,
    field: &str,
    missing_message: &str,
    errors: &mut FieldErrors,
) -> Result<(), ServiceError> {
    if !store.exists(kind, ref_id).await? {
        validate::add(errors, field, missing_message);
    }
    Ok(())
}

/// Resolve a single referenced record, `None` when the target is gone.
pub async fn resolve_one<T: DeserializeOwned>(
    store: &dyn EntityStore,
    kind: Kind,
    ref_id: &str,
) -> Result<Option<T>, ServiceError> {
    match store.find_by_id(kind, ref_id).await? {
        Some(doc) => Ok(Some(crate::from_doc(doc)?)),
        None => Ok(None),
    }
}

/// Batch-resolve referenced records into an id-keyed map. Dangling ids are
/// simply absent.
pub async fn resolve_map<T: DeserializeOwned>(
    store: &dyn EntityStore,
    kind: Kind,
    ids: &[String],
) -> Result<HashMap<String, T>, ServiceError> {
    let mut map = HashMap::new();
    if ids.is_empty() {
        return Ok(map);
    }
    for doc in store.find_by_ids(kind, ids).await? {
        let id = doc
            .get_str("_id")
            .map(str::to_string)
            .map_err(|e| ServiceError::Store(crate::store::StoreError::Codec(e.to_string())))?;
        map.insert(id, crate::from_doc(doc)?);
    }
    Ok(map)
}

/// Distinct ids for a batch lookup, preserving first-seen order.
pub fn distinct_ids<'a, I: IntoIterator<Item = &'a String>>(ids: I) -> Vec<String> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(id) {
            seen.push(id.clone());
        }
    }
    seen
}
