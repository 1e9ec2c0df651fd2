//! Identifier format: 24-hex-character ObjectId strings, accepted and stored
//! as plain strings.

use bson::oid::ObjectId;

/// Returns the canonical hex form when `raw` is a well-formed identifier.
pub fn parse(raw: &str) -> Option<String> {
    ObjectId::parse_str(raw).ok().map(|oid| oid.to_hex())
}

pub fn is_valid(raw: &str) -> bool {
    parse(raw).is_some()
}

/// Fresh identifier for an insert.
pub fn generate() -> String {
    ObjectId::new().to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_24_hex() {
        assert!(is_valid("507f1f77bcf86cd799439011"));
    }

    #[test]
    fn rejects_malformed() {
        assert!(!is_valid("abc"));
        assert!(!is_valid("507f1f77bcf86cd79943901z"));
        assert!(!is_valid(""));
    }

    #[test]
    fn generated_ids_are_valid() {
        let id = generate();
        assert_eq!(id.len(), 24);
        assert!(is_valid(&id));
    }
}
