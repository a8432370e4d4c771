// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::{AlertId, AlertStatus, ItemId};

#[derive(Debug, Error)]
pub enum StockError {
  #[error("Inventory item not found: {item_id}")]
  ItemNotFound { item_id: ItemId },

  #[error("Alert not found: {alert_id}")]
  AlertNotFound { alert_id: AlertId },

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  /// Raised when something tries to move an alert out of a terminal state.
  #[error("Alert {alert_id} is {status} and cannot transition further")]
  InvalidTransition { alert_id: AlertId, status: AlertStatus },

  #[error("Store operation failed. Source: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal stockwatch error: {0}")]
  Internal(String),
}

impl StockError {
  /// Wraps a backend error (sqlx, io, ...) as a store failure.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    StockError::Store {
      source: AnyhowError::new(err),
    }
  }
}

impl From<AnyhowError> for StockError {
  fn from(err: AnyhowError) -> Self {
    StockError::Store { source: err }
  }
}

pub type StockResult<T, E = StockError> = std::result::Result<T, E>;
