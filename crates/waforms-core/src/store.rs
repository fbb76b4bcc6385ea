//! Form store port and the in-memory adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::form::FormDefinition;

/// Key-value persistence for form definitions.
///
/// Durability and atomicity are the backing store's responsibility. The
/// core performs single awaited calls with no retry; a failed write
/// propagates to the caller. There is no concurrent-writer protection:
/// two saves of the same id race and the last write wins.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Fetch a definition by form id.
    async fn get(&self, id: &str) -> Result<Option<FormDefinition>, StoreError>;

    /// All stored definitions, in no particular order.
    async fn list(&self) -> Result<Vec<FormDefinition>, StoreError>;

    /// Insert or fully replace the definition under `id`.
    async fn put(&self, id: &str, def: FormDefinition) -> Result<(), StoreError>;

    /// Remove the definition under `id` if present.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Store error type
#[derive(Debug, Clone)]
pub enum StoreError {
    Backend(String),
    Serialization(String),
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(e) => write!(f, "Backend error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

/// In-memory form store
#[derive(Default)]
pub struct InMemoryFormStore {
    forms: RwLock<HashMap<String, FormDefinition>>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn get(&self, id: &str) -> Result<Option<FormDefinition>, StoreError> {
        let forms = self.forms.read().unwrap();
        Ok(forms.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<FormDefinition>, StoreError> {
        let forms = self.forms.read().unwrap();
        Ok(forms.values().cloned().collect())
    }

    async fn put(&self, id: &str, def: FormDefinition) -> Result<(), StoreError> {
        let mut forms = self.forms.write().unwrap();
        forms.insert(id.to_string(), def);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut forms = self.forms.write().unwrap();
        forms.remove(id);
        Ok(())
    }
}
