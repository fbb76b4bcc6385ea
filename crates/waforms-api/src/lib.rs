//! WAForms HTTP API
//!
//! Axum surface over the form platform: admin CRUD plus the public
//! render and submit endpoints.

pub mod auth;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use waforms_core::{FormService, InMemoryFormStore, TokenIssuer};

/// Shared API state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FormService>,
    pub manage_secret: String,
}

impl AppState {
    pub fn new(manage_secret: impl Into<String>, token_secret: impl Into<String>) -> Self {
        let store = Arc::new(InMemoryFormStore::new());
        Self {
            service: Arc::new(FormService::new(store, TokenIssuer::new(token_secret))),
            manage_secret: manage_secret.into(),
        }
    }
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .nest("/api/forms", routes::forms::router())
        .route("/api/tokens/:action/:scope", get(routes::tokens::issue_token))
        .route("/render/:tag", get(routes::forms::render_form))
        .route("/submit/:tag", post(routes::forms::submit_form))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
