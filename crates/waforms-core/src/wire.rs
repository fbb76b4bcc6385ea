//! Wire format for field lists.
//!
//! A JSON array of field objects is both the persisted shape and the
//! builder-transport shape; the two paths share this module so they can
//! never diverge.

use tracing::warn;

use crate::domain::field::Field;
use crate::{FormsError, Result};

/// Serialize an ordered field list to its JSON wire form.
///
/// Order-preserving; all attributes are emitted with `required` as a
/// JSON boolean.
pub fn to_wire(fields: &[Field]) -> Result<String> {
    serde_json::to_string(fields).map_err(|e| FormsError::Serialization(e.to_string()))
}

/// Decode a wire payload into an ordered field list.
///
/// Lenient by contract: a payload that is not a JSON array yields an
/// empty list, and each malformed element falls back to field defaults,
/// so a damaged builder payload degrades instead of failing the save.
pub fn from_wire(json: &str) -> Vec<Field> {
    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            if !json.trim().is_empty() {
                warn!("discarding unparseable field payload: {}", e);
            }
            return Vec::new();
        }
    };

    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => {
            warn!("field payload is not an array, treating as empty");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::FieldKind;

    fn sample_fields() -> Vec<Field> {
        vec![
            Field {
                label: "Your Name".into(),
                kind: FieldKind::Text,
                name: "your-name".into(),
                placeholder: "Jane Doe".into(),
                required: true,
                width: "100%".into(),
                border: "1px solid #ccc".into(),
                ..Field::default()
            },
            Field {
                label: "Color".into(),
                kind: FieldKind::Select,
                name: "color".into(),
                options: "Red|Blue|Green".into(),
                ..Field::default()
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let fields = sample_fields();
        let json = to_wire(&fields).unwrap();
        assert_eq!(from_wire(&json), fields);
    }

    #[test]
    fn test_order_preserved() {
        let fields = sample_fields();
        let json = to_wire(&fields).unwrap();
        let back = from_wire(&json);
        assert_eq!(back[0].name, "your-name");
        assert_eq!(back[1].name, "color");
    }

    #[test]
    fn test_unknown_kind_coerces_to_text() {
        let back = from_wire(r#"[{"label": "f", "type": "file"}]"#);
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].kind, FieldKind::Text);
    }

    #[test]
    fn test_non_array_payload_is_empty() {
        assert!(from_wire(r#"{"label": "x"}"#).is_empty());
        assert!(from_wire("not json at all").is_empty());
        assert!(from_wire("").is_empty());
        assert!(from_wire("42").is_empty());
    }

    #[test]
    fn test_malformed_element_defaults() {
        let back = from_wire(r#"[17, {"label": "ok"}]"#);
        assert_eq!(back.len(), 2);
        assert_eq!(back[0], Field::default());
        assert_eq!(back[1].label, "ok");
    }

    #[test]
    fn test_missing_attributes_default() {
        let back = from_wire(r#"[{"label": "Email", "type": "email"}]"#);
        assert_eq!(back[0].kind, FieldKind::Email);
        assert!(!back[0].required);
        assert!(back[0].name.is_empty());
        assert!(back[0].options.is_empty());
    }

    #[test]
    fn test_legacy_numeric_required() {
        let back = from_wire(r#"[{"label": "x", "required": 1}]"#);
        assert!(back[0].required);
    }
}
