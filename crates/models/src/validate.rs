//! Field-level payload validation. Errors are collected per offending field,
//! never folded into a single opaque message.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::id;

/// Mapping from field name to one or more human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub fn add(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

/// Required non-empty string field. Pushes `message` when the field is
/// missing, null, empty, or not a string.
pub fn required_string(
    body: &Value,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => {
            add(errors, field, message);
            None
        }
    }
}

/// Optional string field: `None` when absent or null, an error when supplied
/// with a non-string value.
pub fn optional_string(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            add(errors, field, format!("{field} deve ser uma string"));
            None
        }
    }
}

/// Required email field, format-checked.
pub fn required_email(
    body: &Value,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) if is_valid_email(s) => Some(s.clone()),
        _ => {
            add(errors, field, message);
            None
        }
    }
}

/// Optional email field: absent is fine, a supplied value must be well-formed.
pub fn optional_email(
    body: &Value,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if is_valid_email(s) => Some(s.clone()),
        _ => {
            add(errors, field, message);
            None
        }
    }
}

/// Required reference field in identifier format.
pub fn required_object_id(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(field).and_then(Value::as_str).and_then(id::parse) {
        Some(hex) => Some(hex),
        None => {
            add(errors, field, format!("{field} deve ser um ObjectId válido"));
            None
        }
    }
}

/// Optional reference field: absent is fine, a supplied value must be in
/// identifier format.
pub fn optional_object_id(body: &Value, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_str().and_then(id::parse) {
            Some(hex) => Some(hex),
            None => {
                add(errors, field, format!("{field} deve ser um ObjectId válido"));
                None
            }
        },
    }
}

/// Coerce an input value to a UTC timestamp. Accepts RFC 3339 strings and
/// epoch-millisecond numbers.
pub fn coerce_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Minimal email shape check: one `@`, non-empty local part, dotted domain.
///
/// # Examples
/// ```
/// assert!(models::validate::is_valid_email("ana@x.com"));
/// assert!(!models::validate::is_valid_email("ana@"));
/// assert!(!models::validate::is_valid_email("ana x@x.com"));
/// ```
pub fn is_valid_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}
