use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{self, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewCategory {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let kind = validate::required_string(body, "type", "Tipo é obrigatório.", &mut errors);
        match kind {
            Some(kind) if errors.is_empty() => Ok(Self { kind }),
            _ => Err(errors),
        }
    }
}

/// Update payload. `type` stays required: the update schema is the create
/// schema for this resource.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPatch {
    #[serde(rename = "type")]
    pub kind: String,
}

impl CategoryPatch {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        NewCategory::parse(body).map(|new| Self { kind: new.kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_type() {
        let err = NewCategory::parse(&json!({})).unwrap_err();
        assert_eq!(err["type"], vec!["Tipo é obrigatório."]);
        let err = NewCategory::parse(&json!({ "type": "" })).unwrap_err();
        assert_eq!(err["type"], vec!["Tipo é obrigatório."]);
    }

    #[test]
    fn update_requires_type_too() {
        assert!(CategoryPatch::parse(&json!({})).is_err());
        let patch = CategoryPatch::parse(&json!({ "type": "show" })).unwrap();
        assert_eq!(patch.kind, "show");
    }
}
