use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::event::Event;
use crate::validate::{self, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_id: String,
    pub client_id: String,
}

/// Read representation with the weak references resolved in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantWithRefs {
    #[serde(rename = "_id")]
    pub id: String,
    pub event: Option<Event>,
    pub client: Option<Client>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    pub event_id: String,
    pub client_id: String,
}

impl NewParticipant {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let event_id = validate::required_object_id(body, "eventId", &mut errors);
        let client_id = validate::required_object_id(body, "clientId", &mut errors);
        match (event_id, client_id) {
            (Some(event_id), Some(client_id)) if errors.is_empty() => {
                Ok(Self { event_id, client_id })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl ParticipantPatch {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let event_id = validate::optional_object_id(body, "eventId", &mut errors);
        let client_id = validate::optional_object_id(body, "clientId", &mut errors);
        if errors.is_empty() {
            Ok(Self { event_id, client_id })
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
    fn create_requires_both_references() {
        let err = NewParticipant::parse(&json!({})).unwrap_err();
        assert_eq!(err["eventId"], vec!["eventId deve ser um ObjectId válido"]);
        assert_eq!(err["clientId"], vec!["clientId deve ser um ObjectId válido"]);
    }

    #[test]
    fn update_accepts_subset() {
        let patch =
            ParticipantPatch::parse(&json!({ "clientId": "507f1f77bcf86cd799439011" })).unwrap();
        assert!(patch.event_id.is_none());
        assert_eq!(patch.client_id.as_deref(), Some("507f1f77bcf86cd799439011"));
    }
}
