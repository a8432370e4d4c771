// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use stockwatch::StockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Inventory Error: {source}")]
  Domain {
    #[from]
    source: StockError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Domain { source } => match source {
        StockError::ItemNotFound { .. } | StockError::AlertNotFound { .. } => {
          HttpResponse::NotFound().json(json!({"error": source.to_string()}))
        }
        StockError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
        StockError::Conflict(m) => HttpResponse::Conflict().json(json!({"error": m})),
        StockError::InvalidTransition { .. } => HttpResponse::Conflict().json(json!({"error": source.to_string()})),
        StockError::Store { .. } => {
          tracing::error!(store_error = ?source, "Store failure details");
          HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"}))
        }
        StockError::Internal(m) => {
          HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
        }
      },
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
