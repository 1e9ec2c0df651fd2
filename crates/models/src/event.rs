use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::Category;
use crate::user::User;
use crate::validate::{self, FieldErrors};
use crate::venue::Venue;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub venue_id: String,
    pub category_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub address: String,
}

/// Read representation with the weak references resolved in. A reference
/// whose target has been deleted renders as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithRefs {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub address: String,
    pub venue: Option<Venue>,
    pub category: Option<Category>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub venue_id: String,
    pub category_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub address: String,
}

impl NewEvent {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let venue_id = validate::required_object_id(body, "venueId", &mut errors);
        let category_id = validate::required_object_id(body, "categoryId", &mut errors);
        let user_id = validate::required_object_id(body, "userId", &mut errors);
        let name = validate::required_string(body, "name", "Nome é obrigatório", &mut errors);
        let description =
            validate::required_string(body, "description", "Descrição é obrigatória", &mut errors);
        let start = future_date(body, "start", "Data de início deve ser futura", &mut errors);
        let end = future_date(body, "end", "Data de fim deve ser futura", &mut errors);
        let address =
            validate::required_string(body, "address", "Endereço é obrigatório", &mut errors);
        match (venue_id, category_id, user_id, name, description, start, end, address) {
            (
                Some(venue_id),
                Some(category_id),
                Some(user_id),
                Some(name),
                Some(description),
                Some(start),
                Some(end),
                Some(address),
            ) if errors.is_empty() => Ok(Self {
                venue_id,
                category_id,
                user_id,
                name,
                description,
                start,
                end,
                address,
            }),
            _ => Err(errors),
        }
    }
}

/// Update payload. The owner (`userId`) is not part of the update schema and
/// cannot be reassigned.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl EventPatch {
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let venue_id = validate::optional_object_id(body, "venueId", &mut errors);
        let category_id = validate::optional_object_id(body, "categoryId", &mut errors);
        let name = validate::optional_string(body, "name", &mut errors);
        let description = validate::optional_string(body, "description", &mut errors);
        let start = optional_future_date(body, "start", "Data de início deve ser futura", &mut errors);
        let end = optional_future_date(body, "end", "Data de fim deve ser futura", &mut errors);
        let address = validate::optional_string(body, "address", &mut errors);
        if errors.is_empty() {
            Ok(Self { venue_id, category_id, name, description, start, end, address })
        } else {
            Err(errors)
        }
    }
}

/// Required timestamp field that must lie strictly in the future at
/// submission time. `start` and `end` are checked independently; no ordering
/// between them is enforced.
fn future_date(
    body: &Value,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match body.get(field) {
        Some(value) => check_future(value, field, message, errors),
        None => {
            validate::add(errors, field, "Data inválida");
            None
        }
    }
}

fn optional_future_date(
    body: &Value,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => check_future(value, field, message, errors),
    }
}

fn check_future(
    value: &Value,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match validate::coerce_datetime(value) {
        Some(date) if date > Utc::now() => Some(date),
        Some(_) => {
            validate::add(errors, field, message);
            None
        }
        None => {
            validate::add(errors, field, "Data inválida");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn future() -> String {
        (Utc::now() + Duration::days(30)).to_rfc3339()
    }

    fn valid_body() -> Value {
        json!({
            "venueId": "507f1f77bcf86cd799439011",
            "categoryId": "507f1f77bcf86cd799439012",
            "userId": "507f1f77bcf86cd799439013",
            "name": "Festival",
            "description": "Festival de música",
            "start": future(),
            "end": future(),
            "address": "Av. Principal, 100",
        })
    }

    #[test]
    fn create_accepts_complete_payload() {
        let event = NewEvent::parse(&valid_body()).unwrap();
        assert_eq!(event.name, "Festival");
        assert!(event.start > Utc::now());
    }

    #[test]
    fn create_rejects_malformed_reference() {
        let mut body = valid_body();
        body["venueId"] = json!("nope");
        let err = NewEvent::parse(&body).unwrap_err();
        assert_eq!(err["venueId"], vec!["venueId deve ser um ObjectId válido"]);
    }

    #[test]
    fn create_rejects_past_start() {
        let mut body = valid_body();
        body["start"] = json!("2001-01-01T00:00:00Z");
        let err = NewEvent::parse(&body).unwrap_err();
        assert_eq!(err["start"], vec!["Data de início deve ser futura"]);
    }

    #[test]
    fn create_rejects_uncoercible_date() {
        let mut body = valid_body();
        body["end"] = json!("amanhã");
        let err = NewEvent::parse(&body).unwrap_err();
        assert_eq!(err["end"], vec!["Data inválida"]);
    }

    #[test]
    fn end_before_start_is_accepted() {
        let mut body = valid_body();
        body["start"] = json!((Utc::now() + Duration::days(10)).to_rfc3339());
        body["end"] = json!((Utc::now() + Duration::days(5)).to_rfc3339());
        assert!(NewEvent::parse(&body).is_ok());
    }

    #[test]
    fn update_has_no_user_field() {
        let patch = EventPatch::parse(&json!({ "userId": "507f1f77bcf86cd799439013" })).unwrap();
        let doc = bson::to_document(&patch).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn update_checks_supplied_dates_only() {
        assert!(EventPatch::parse(&json!({})).is_ok());
        let err = EventPatch::parse(&json!({ "start": "2001-01-01T00:00:00Z" })).unwrap_err();
        assert_eq!(err["start"], vec!["Data de início deve ser futura"]);
    }
}
