//! ObjectId utilities
//!
//! Document identifiers stay typed as [`ObjectId`] end to end. The hex
//! rendering is a plain string in BSON and never compares equal to the
//! identifier it came from, so conversions go through these helpers.

use crate::{Error, Result};
use bson::oid::ObjectId;
use bson::Bson;

/// Parse an ObjectId from its 24-character hex rendering
pub fn parse(s: &str) -> Result<ObjectId> {
    ObjectId::parse_str(s)
        .map_err(|e| Error::InvalidInput(format!("invalid ObjectId {:?}: {}", s, e)))
}

/// Extract the ObjectId from an inserted-id value returned by the driver
///
/// Returns `None` when the server (or caller) used a non-ObjectId `_id`.
pub fn from_bson(value: &Bson) -> Option<ObjectId> {
    value.as_object_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        let id = ObjectId::new();
        let hex = id.to_hex();
        assert_eq!(hex.len(), 24);
        assert_eq!(parse(&hex).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = parse("not-an-object-id");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_string_rendering_is_a_different_bson_type() {
        let id = ObjectId::new();
        let typed = Bson::ObjectId(id);
        let rendered = Bson::String(id.to_hex());
        assert_ne!(typed, rendered);
    }

    #[test]
    fn test_from_bson() {
        let id = ObjectId::new();
        assert_eq!(from_bson(&Bson::ObjectId(id)), Some(id));
        assert_eq!(from_bson(&Bson::String(id.to_hex())), None);
        assert_eq!(from_bson(&Bson::Int32(7)), None);
    }
}
