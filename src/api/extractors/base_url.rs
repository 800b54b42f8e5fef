use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use crate::state::AppState;
use std::sync::Arc;

/// `scheme://host` the client used to reach us, for building image links.
pub struct BaseUrl(pub String);

impl FromRequestParts<Arc<AppState>> for BaseUrl {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let host = parts.headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .filter(|h| !h.is_empty());

        let Some(host) = host else {
            return Ok(BaseUrl(state.config.fallback_base_url()));
        };

        let scheme = parts.headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("http");

        Ok(BaseUrl(format!("{}://{}", scheme, host)))
    }
}
