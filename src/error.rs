use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Closed set of failures the API can report.
///
/// Validation problems map to 400; everything the service cannot fix on
/// its own maps to 5xx with a generic detail so internal messages never
/// leak to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    /// The generative model replied with something that is not a JSON
    /// list of suggestions. Usually transient formatting drift, so the
    /// message tells the caller to retry.
    #[error("Error parsing Gemini response. Try again.")]
    InsightParse,

    #[error("{service} call failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::InsightParse => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Upstream { service, message } => {
                tracing::error!(service, %message, "upstream call failed");
                (StatusCode::BAD_GATEWAY, format!("{service} call failed"))
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
