// core/src/model/alert.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::item::ItemId;
use crate::error::{StockError, StockResult};

pub type AlertId = i64;

/// Lifecycle of one alert row. `Resolved` is terminal: a new low-stock
/// episode always gets a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
  Active,
  Resolved,
}

impl AlertStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      AlertStatus::Active => "ACTIVE",
      AlertStatus::Resolved => "RESOLVED",
    }
  }
}

impl fmt::Display for AlertStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AlertStatus {
  type Err = StockError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "ACTIVE" => Ok(AlertStatus::Active),
      "RESOLVED" => Ok(AlertStatus::Resolved),
      other => Err(StockError::Validation(format!("Unknown alert status '{}'", other))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
  pub id: AlertId,
  pub inventory_id: ItemId,
  pub status: AlertStatus,
  pub triggered_at: DateTime<Utc>,
  pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
  pub fn is_active(&self) -> bool {
    self.status == AlertStatus::Active
  }

  /// `ACTIVE -> RESOLVED`, the only transition an alert has.
  pub fn resolve(mut self, at: DateTime<Utc>) -> StockResult<Alert> {
    if !self.is_active() {
      return Err(StockError::InvalidTransition {
        alert_id: self.id,
        status: self.status,
      });
    }
    self.status = AlertStatus::Resolved;
    self.resolved_at = Some(at);
    Ok(self)
  }
}

/// An alert about to be inserted. New alerts are always `ACTIVE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAlert {
  pub inventory_id: ItemId,
  pub triggered_at: DateTime<Utc>,
}
