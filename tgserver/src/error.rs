//! HTTP error responses for the gateway
//!
//! Catalog endpoints answer failures with a structured JSON body
//! (`{"error": ...}` plus `"details"` for upstream failures). Streaming
//! endpoints can only fail with a body before headers are committed; after
//! that the relay signals failure by closing the stream.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tgcatalog::Error as CatalogError;

/// Failure of one gateway request, mapped to a status and body
#[derive(Debug)]
pub enum ApiError {
    /// A required request parameter is absent; resolved locally, never
    /// forwarded upstream
    MissingParam(&'static str),
    /// A provider credential is not configured
    MissingCredential(&'static str),
    /// The upstream provider call failed (network, non-2xx, bad payload)
    Provider {
        context: &'static str,
        details: String,
    },
    /// The extraction process could not be started
    Spawn,
}

impl ApiError {
    /// Map a catalog failure onto the wire shape, attaching the upstream
    /// message as `details` for genuine provider errors.
    pub fn from_catalog(context: &'static str, err: CatalogError) -> Self {
        match err {
            CatalogError::MissingCredential(provider) => Self::MissingCredential(provider),
            other => Self::Provider {
                context,
                details: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingParam(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response(),
            Self::MissingCredential(provider) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": format!("Missing {} API key", provider) })),
            )
                .into_response(),
            Self::Provider { context, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": context, "details": details })),
            )
                .into_response(),
            // A binary response was promised; send the plain-text marker
            // the way the original gateway did.
            Self::Spawn => (StatusCode::INTERNAL_SERVER_ERROR, "yt-dlp error").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_param_is_400() {
        let response = ApiError::MissingParam("Missing query").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_error_is_500() {
        let response = ApiError::Provider {
            context: "YouTube API error",
            details: "boom".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_catalog_keeps_credential_kind() {
        let err = ApiError::from_catalog("Last.fm API error", CatalogError::MissingCredential("Last.fm"));
        assert!(matches!(err, ApiError::MissingCredential("Last.fm")));
    }
}
