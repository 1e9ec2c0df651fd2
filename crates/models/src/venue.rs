use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{self, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    #[serde(rename = "_id")]
    pub id: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewVenue {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl NewVenue {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let city = validate::required_string(body, "city", "Cidade é obrigatório.", &mut errors);
        let state = validate::required_string(body, "state", "Estado é obrigatório.", &mut errors);
        let country = validate::required_string(body, "country", "País é obrigatório.", &mut errors);
        match (city, state, country) {
            (Some(city), Some(state), Some(country)) if errors.is_empty() => {
                Ok(Self { city, state, country })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VenuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl VenuePatch {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let city = validate::optional_string(body, "city", &mut errors);
        let state = validate::optional_string(body, "state", &mut errors);
        let country = validate::optional_string(body, "country", &mut errors);
        if errors.is_empty() {
            Ok(Self { city, state, country })
        } else {
            Err(errors)
        }
    }
}
