//! WAForms - WhatsApp Quote Form Platform
//!
//! Custom quote-request forms defined through a drag-and-drop builder,
//! rendered publicly, and delivered as pre-filled WhatsApp deep links
//! instead of a server-side mail pipeline.
//!
//! ## Features
//! - Typed field schema with a closed set of field kinds
//! - Order-preserving JSON wire format shared by builder and storage
//! - Deterministic HTML renderer with per-kind dispatch
//! - wa.me deep-link message encoder
//! - Pluggable form store with an in-memory adapter

use thiserror::Error;

pub mod builder;
pub mod domain;
pub mod encode;
pub mod render;
pub mod service;
pub mod store;
pub mod wire;

pub use builder::BuilderSession;
pub use domain::field::{Field, FieldKind};
pub use domain::form::{routing_tag, FormDefinition, FormRef, ROUTING_TAG_PREFIX};
pub use domain::slug::normalize;
pub use encode::{build_deep_link, normalize_phone, FieldValue};
pub use service::{Actor, FormService, SaveForm, TokenIssuer};
pub use store::{FormStore, InMemoryFormStore, StoreError};

/// Crate error type.
#[derive(Error, Debug)]
pub enum FormsError {
    /// Empty required top-level field; the save is aborted and the prior
    /// definition is untouched.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup or delete of an unknown form id.
    #[error("Form not found: {0}")]
    NotFound(String),

    /// Missing capability or stale operation token; aborted before the
    /// store is touched.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Render or encode attempted on a form with no usable destination.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Store read/write failure, propagated without retry.
    #[error("Storage error: {0}")]
    Store(String),

    /// Wire serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, FormsError>;
