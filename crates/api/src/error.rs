//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use climate_storage::StorageError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// Query failure, pool timeout or unreadable stored data
    #[error("Database error: {0}")]
    Storage(#[from] StorageError),
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client; details stay in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Storage(_) => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(error = %self, status = status.as_u16(), "Request failed");
        (
            status,
            Json(ErrorBody {
                error: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_error_is_server_error() {
        let err = ApiError::from(StorageError::InvalidDate("2017-13-45".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Database error: Stored date '2017-13-45' is not a YYYY-MM-DD date"
        );

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"error":"internal server error"}"#);
    }
}
