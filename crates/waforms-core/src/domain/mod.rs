//! Domain model: field schema, form definitions, slug normalization.

pub mod field;
pub mod form;
pub mod slug;
