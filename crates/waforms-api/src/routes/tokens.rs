//! Operation token issuance.
//!
//! Admin-page nonce pattern: a manager fetches the token alongside the
//! edit view and sends it back with the mutating request.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use waforms_core::FormsError;

use crate::auth;
use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub action: String,
    pub scope: String,
    pub token: String,
}

/// Issue a freshness token for one (action, scope) pair. Manager only.
pub async fn issue_token(
    State(state): State<AppState>,
    Path((action, scope)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let actor = auth::actor_from_headers(&headers, &state.manage_secret);
    if !actor.can_manage_forms {
        return Err(FormsError::Authorization(
            "manage-forms capability required".to_string(),
        )
        .into());
    }
    let token = state.service.tokens().issue(&action, &scope);
    Ok(Json(ApiResponse::success(TokenResponse {
        action,
        scope,
        token,
    })))
}
