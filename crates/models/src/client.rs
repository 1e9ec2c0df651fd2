use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{self, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewClient {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = validate::required_string(body, "name", "Nome é obrigatório.", &mut errors);
        let email = validate::required_email(body, "email", "Email inválido.", &mut errors);
        let phone = validate::required_string(body, "phone", "Telefone é obrigatório.", &mut errors);
        match (name, email, phone) {
            (Some(name), Some(email), Some(phone)) if errors.is_empty() => {
                Ok(Self { name, email, phone })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ClientPatch {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = validate::optional_string(body, "name", &mut errors);
        let email = validate::optional_email(body, "email", "E-mail inválido.", &mut errors);
        let phone = validate::optional_string(body, "phone", &mut errors);
        if errors.is_empty() {
            Ok(Self { name, email, phone })
        } else {
            Err(errors)
        }
    }
}
