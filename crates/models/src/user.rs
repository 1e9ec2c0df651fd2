use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{self, FieldErrors};

/// Stored user. `password` carries the one-way hash, never the submitted
/// plaintext; reads return it as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = validate::required_string(body, "name", "Nome é obrigatório.", &mut errors);
        let email = validate::required_email(body, "email", "Email inválido.", &mut errors);
        let password =
            validate::required_string(body, "password", "Senha é obrigatória.", &mut errors);
        match (name, email, password) {
            (Some(name), Some(email), Some(password)) if errors.is_empty() => {
                Ok(Self { name, email, password })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    // accepted in the payload but never written back; only name and email
    // persist through updates
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl UserPatch {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = validate::optional_string(body, "name", &mut errors);
        let email = validate::optional_email(body, "email", "Email inválido.", &mut errors);
        let password = validate::optional_string(body, "password", &mut errors);
        if errors.is_empty() {
            Ok(Self { name, email, password })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_name_email_password() {
        let err = NewUser::parse(&json!({ "email": "ana@x.com" })).unwrap_err();
        assert_eq!(err["name"], vec!["Nome é obrigatório."]);
        assert_eq!(err["password"], vec!["Senha é obrigatória."]);
        assert!(!err.contains_key("email"));
    }

    #[test]
    fn create_rejects_bad_email() {
        let err = NewUser::parse(&json!({
            "name": "Ana", "email": "ana", "password": "secret"
        }))
        .unwrap_err();
        assert_eq!(err["email"], vec!["Email inválido."]);
    }

    #[test]
    fn patch_never_serializes_password() {
        let patch = UserPatch::parse(&json!({ "name": "Ana", "password": "nova" })).unwrap();
        assert_eq!(patch.password.as_deref(), Some("nova"));
        let doc = bson::to_document(&patch).unwrap();
        assert!(doc.get("password").is_none());
        assert_eq!(doc.get_str("name").unwrap(), "Ana");
    }
}
