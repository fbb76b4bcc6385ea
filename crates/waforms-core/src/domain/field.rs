//! Field schema: the typed shape of one form element.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed set of allowed field kinds.
///
/// Anything outside this set coming off the wire is coerced to `Text`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldKind {
    /// All allowed kinds, in the order the builder palette shows them.
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Number,
        FieldKind::Textarea,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::Date,
    ];

    /// Wire/markup name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
        }
    }

    /// Parse a wire kind, coercing anything unknown to `Text`.
    pub fn parse(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "email" => Self::Email,
            "number" => Self::Number,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "date" => Self::Date,
            _ => Self::Text,
        }
    }

    /// Whether the kind draws its inputs from the raw option list.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Lenient on purpose: non-string kinds degrade to text instead of
        // rejecting the surrounding field.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::parse).unwrap_or_default())
    }
}

/// One form element within a form definition.
///
/// Wire decoding is permissive: missing attributes take their defaults,
/// an unknown kind coerces to text, and `required` accepts either a JSON
/// boolean or the 0/1 the builder historically transmitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Submission key; unique per form by convention only. Duplicates are
    /// kept as-is and the last value under a repeated name wins when the
    /// submission is grouped.
    pub name: String,
    pub placeholder: String,
    #[serde(deserialize_with = "de_required")]
    pub required: bool,
    /// Optional hint shown under the label.
    pub description: String,
    /// Inline CSS width value, free text.
    pub width: String,
    /// Inline CSS border value, free text.
    pub border: String,
    /// Raw pipe-separated option list; only meaningful for
    /// select/radio/checkbox.
    pub options: String,
}

fn de_required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        serde_json::Value::String(s) => s == "1" || s == "true",
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_coerces_to_text() {
        assert_eq!(FieldKind::parse("file"), FieldKind::Text);
        assert_eq!(FieldKind::parse(""), FieldKind::Text);
        assert_eq!(FieldKind::parse("SELECT"), FieldKind::Text);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_has_options() {
        assert!(FieldKind::Select.has_options());
        assert!(FieldKind::Radio.has_options());
        assert!(FieldKind::Checkbox.has_options());
        assert!(!FieldKind::Email.has_options());
    }

    #[test]
    fn test_field_decode_defaults() {
        let field: Field = serde_json::from_str("{}").unwrap();
        assert_eq!(field, Field::default());
        assert_eq!(field.kind, FieldKind::Text);
        assert!(!field.required);
    }

    #[test]
    fn test_required_accepts_bool_and_int() {
        let field: Field = serde_json::from_str(r#"{"required": 1}"#).unwrap();
        assert!(field.required);
        let field: Field = serde_json::from_str(r#"{"required": true}"#).unwrap();
        assert!(field.required);
        let field: Field = serde_json::from_str(r#"{"required": 0}"#).unwrap();
        assert!(!field.required);
    }

    #[test]
    fn test_kind_tolerates_non_string() {
        let field: Field = serde_json::from_str(r#"{"type": 7, "label": "x"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.label, "x");
    }
}
