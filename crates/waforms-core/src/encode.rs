//! Message encoder: submitted values to a WhatsApp deep link.
//!
//! Deterministic and synchronous; the only failure is a missing
//! destination number, which is a hard stop before any link is built.

use serde::{Deserialize, Serialize};

use crate::{FormsError, Result};

/// Base URL of the WhatsApp click-to-chat scheme.
const DEEP_LINK_BASE: &str = "https://wa.me";

/// Hidden input that carries the form name through submission.
const FORM_NAME_KEY: &str = "form_name";

/// Keys with this prefix are internal and never forwarded.
const INTERNAL_PREFIX: &str = "_";

/// Percent-encoded newline understood by the wa.me text parameter.
const ENCODED_NEWLINE: &str = "%0A";

/// A submitted value: a single input, or the value list collected from a
/// checkbox/multi-select group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
}

impl FieldValue {
    fn joined(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::Many(values) => values.join(", "),
        }
    }
}

/// Encode submitted entries into the pre-formatted message body.
///
/// Entries are emitted in submission order. The reserved form-name
/// carrier and internal keys are dropped. Only the values are
/// percent-encoded; the bold markers, labels, and colons stay literal,
/// which is what the wa.me text parameter expects.
pub fn encode_message(form_name: &str, entries: &[(String, FieldValue)]) -> String {
    let mut message = format!(
        "*{} Request*:{}{}",
        form_name, ENCODED_NEWLINE, ENCODED_NEWLINE
    );

    for (key, value) in entries {
        if key == FORM_NAME_KEY || key.starts_with(INTERNAL_PREFIX) {
            continue;
        }
        let label = key.replace('_', " ").trim().to_string();
        message.push_str(&format!(
            "*{}:* {}{}",
            label,
            urlencoding::encode(&value.joined()),
            ENCODED_NEWLINE
        ));
    }

    message
}

/// Strip a destination number down to digits and a leading plus.
pub fn normalize_phone(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '+' && out.is_empty() {
            out.push(c);
        }
    }
    out
}

/// Build the final deep link for a submission.
///
/// A destination without any digits is a configuration error: the caller
/// surfaces it to the submitter instead of opening a broken link.
pub fn build_deep_link(
    phone: &str,
    form_name: &str,
    entries: &[(String, FieldValue)],
) -> Result<String> {
    let destination = normalize_phone(phone);
    if !destination.chars().any(|c| c.is_ascii_digit()) {
        return Err(FormsError::Configuration(
            "form has no WhatsApp destination number".to_string(),
        ));
    }
    let message = encode_message(form_name, entries);
    Ok(format!("{}/{}?text={}", DEEP_LINK_BASE, destination, message))
}
