//! Error types and handling for the name matching service

use crate::matching::SearchError;
use crate::records::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;

/// Application error types
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    StoreError(String),
    ConfigError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::StoreError(msg) => write!(f, "Store error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::StoreError(_) => "store_error",
            AppError::ConfigError(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreError(_) | AppError::ConfigError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Process exit code in CLI mode
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::NotFound(_) => 3,
            AppError::Unauthorized(_) | AppError::Forbidden(_) => 4,
            _ => 5,
        }
    }

    /// Message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            AppError::InvalidInput(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::StoreError(msg)
            | AppError::ConfigError(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let body = ErrorBody {
            success: false,
            message: self.message(),
            code: self.error_code(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Record {} not found", id)),
            StoreError::Invalid(msg) => AppError::InvalidInput(msg),
            other => AppError::StoreError(other.to_string()),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Validation functions
pub fn validate_query(query: &str) -> Result<&str, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("Search query is required".to_string()));
    }

    if query.chars().count() > 500 {
        return Err(AppError::InvalidInput(
            "Query too long, maximum 500 characters".to_string(),
        ));
    }

    Ok(query)
}

pub fn validate_name<'a>(name: &'a str, field: &str) -> Result<&'a str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_status() {
        let err = AppError::InvalidInput("bad".to_string());
        assert_eq!(err.error_code(), "invalid_input");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.exit_code(), 1);

        let err = AppError::Forbidden("admin only".to_string());
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.exit_code(), 4);

        let err = AppError::StoreError("disk".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_display_and_message() {
        let err = AppError::NotFound("Record 4 not found".to_string());
        assert_eq!(err.to_string(), "Not found: Record 4 not found");
        assert_eq!(err.message(), "Record 4 not found");
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            AppError::from(StoreError::NotFound(4)),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Invalid("x".to_string())),
            AppError::InvalidInput(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Lock("records.lock".to_string())),
            AppError::StoreError(_)
        ));
    }

    #[test]
    fn test_search_error_conversion() {
        let err = AppError::from(SearchError::EmptyQuery);
        assert_eq!(err.message(), "Search query is required");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("  Suresh ").unwrap(), "Suresh");
        assert!(validate_query("   ").is_err());
        assert!(validate_query(&"a".repeat(501)).is_err());
        assert!(validate_query(&"a".repeat(500)).is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name(" Anjali ", "Name").unwrap(), "Anjali");
        let err = validate_name("", "Name").unwrap_err();
        assert_eq!(err.message(), "Name is required");
    }
}
