//! Route handlers

pub mod forms;
pub mod tokens;

/// Liveness probe
pub async fn health() -> &'static str {
    "OK"
}
