//! Capability extraction from request headers.
//!
//! The host environment is trusted to have authenticated the bearer; the
//! API checks only the manage capability token it forwards plus the
//! per-operation freshness token.

use axum::http::HeaderMap;
use waforms_core::Actor;

/// Header carrying the manage-forms capability token.
pub const MANAGE_HEADER: &str = "x-manage-token";

/// Header carrying the per-operation freshness token.
pub const OP_TOKEN_HEADER: &str = "x-op-token";

/// Resolve the acting user from the manage header.
pub fn actor_from_headers(headers: &HeaderMap, manage_secret: &str) -> Actor {
    let presented = headers.get(MANAGE_HEADER).and_then(|v| v.to_str().ok());
    if presented == Some(manage_secret) {
        Actor::manager()
    } else {
        Actor::anonymous()
    }
}

/// The presented freshness token, empty when absent (which the service
/// rejects).
pub fn op_token(headers: &HeaderMap) -> String {
    headers
        .get(OP_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_actor_requires_matching_secret() {
        let mut headers = HeaderMap::new();
        assert!(!actor_from_headers(&headers, "secret").can_manage_forms);

        headers.insert(MANAGE_HEADER, HeaderValue::from_static("wrong"));
        assert!(!actor_from_headers(&headers, "secret").can_manage_forms);

        headers.insert(MANAGE_HEADER, HeaderValue::from_static("secret"));
        assert!(actor_from_headers(&headers, "secret").can_manage_forms);
    }

    #[test]
    fn test_missing_op_token_is_empty() {
        let headers = HeaderMap::new();
        assert_eq!(op_token(&headers), "");
    }
}
