//! WAForms API server binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use waforms_api::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let manage_secret =
        std::env::var("WAFORMS_MANAGE_TOKEN").unwrap_or_else(|_| "dev-manage-token".into());
    let token_secret =
        std::env::var("WAFORMS_TOKEN_SECRET").unwrap_or_else(|_| "dev-token-secret".into());
    let state = AppState::new(manage_secret, token_secret);

    let app = build_router(state);

    let addr = "0.0.0.0:8080";
    tracing::info!("WAForms API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
