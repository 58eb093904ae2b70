//! HTTP error responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients as `{"detail": ...}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("File provided is not an image.")]
    NotAnImage,

    #[error("Field required: file")]
    MissingFile,

    #[error("Invalid upload: {0}")]
    BadUpload(String),

    #[error("File exceeds the {0} byte upload limit")]
    TooLarge(usize),

    #[error("API call failed: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotAnImage | ApiError::BadUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sf_core::Error> for ApiError {
    fn from(err: sf_core::Error) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotAnImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingFile.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::TooLarge(10).status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            ApiError::Upstream("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_message() {
        let err: ApiError = sf_core::Error::Network("connection reset".to_string()).into();
        assert_eq!(
            err.to_string(),
            "API call failed: Network error: connection reset"
        );
    }
}
