//! Form definitions and routing-tag derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::slug::normalize;

/// Prefix of the public routing key under which a form is rendered.
pub const ROUTING_TAG_PREFIX: &str = "wp_whatsapp_quote_form_";

/// Reference to the form a save targets.
///
/// Explicit variant instead of a `"new_form"` string sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormRef {
    New,
    Existing(String),
}

/// One saved form: the named, ordered field set plus the WhatsApp
/// destination number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Stable once assigned; generated on first save.
    pub id: String,
    pub name: String,
    /// Destination address for the deep link, stored raw as entered.
    pub phone: String,
    /// Display order.
    pub fields: Vec<Field>,
    /// Set on every save.
    pub updated_at: DateTime<Utc>,
}

impl FormDefinition {
    /// Public routing tag. Recomputed on every call so it can never
    /// drift from the stored name.
    pub fn routing_tag(&self) -> String {
        routing_tag(&self.id, &self.name)
    }

    /// Tag suffix without the prefix, used for markup element ids.
    pub fn routing_suffix(&self) -> String {
        routing_suffix(&self.id, &self.name)
    }
}

/// Routing tag for a name, falling back to the form id when the
/// normalized name is empty.
pub fn routing_tag(id: &str, name: &str) -> String {
    format!("{}{}", ROUTING_TAG_PREFIX, routing_suffix(id, name))
}

fn routing_suffix(id: &str, name: &str) -> String {
    let slug = normalize(name);
    if slug.is_empty() {
        id.to_string()
    } else {
        slug
    }
}
