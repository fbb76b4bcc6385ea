//! Error mapping from the core to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use waforms_core::FormsError;

use crate::models::ApiResponse;

/// Wrapper so core errors can flow out of handlers with `?`.
pub struct ApiError(pub FormsError);

impl From<FormsError> for ApiError {
    fn from(err: FormsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            FormsError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            FormsError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            FormsError::Authorization(_) => (StatusCode::FORBIDDEN, "authorization_error"),
            FormsError::Configuration(_) => (StatusCode::CONFLICT, "configuration_error"),
            FormsError::Store(_) | FormsError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
        };
        let body = Json(ApiResponse::<()>::error(code, &self.0.to_string()));
        (status, body).into_response()
    }
}
