/// Error types for Forum Service
///
/// Every failure that can leave the core is one of these variants. The
/// boundary layer turns them into HTTP responses through `ResponseError`.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use identity_client::IdentityError;
use std::time::Duration;

/// Result type for forum-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Entity id absent from the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed create/update payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Child created against a parent post that does not exist
    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    /// Identity lookup did not complete in time
    #[error("Identity lookup timed out after {0:?}")]
    EnrichmentTimeout(Duration),

    /// Identity lookup failed in transport or decoding
    #[error("Identity lookup failed: {0}")]
    EnrichmentFailure(String),

    /// Underlying query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for both enrichment variants
    pub fn is_enrichment(&self) -> bool {
        matches!(
            self,
            AppError::EnrichmentTimeout(_) | AppError::EnrichmentFailure(_)
        )
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::ParentNotFound(_) => StatusCode::BAD_REQUEST,
            AppError::EnrichmentTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::EnrichmentFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Store errors carry SQL details; keep them in logs only
        let error_msg = match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Query failed");
                "Query failed".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Timeout(after) => AppError::EnrichmentTimeout(after),
            other => AppError::EnrichmentFailure(other.to_string()),
        }
    }
}
