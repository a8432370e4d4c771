// server/src/models/alert_row.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use stockwatch::{Alert, AlertStatus, StockError};

/// `status` is stored as TEXT (`ACTIVE` / `RESOLVED`).
#[derive(Debug, Clone, FromRow)]
pub struct AlertRow {
  pub id: i64,
  pub inventory_id: i64,
  pub status: String,
  pub triggered_at: DateTime<Utc>,
  pub resolved_at: Option<DateTime<Utc>>,
}

impl TryFrom<AlertRow> for Alert {
  type Error = StockError;

  fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
    let status = row
      .status
      .parse::<AlertStatus>()
      .map_err(|_| StockError::Internal(format!("Alert {} has unknown status '{}'", row.id, row.status)))?;
    Ok(Alert {
      id: row.id,
      inventory_id: row.inventory_id,
      status,
      triggered_at: row.triggered_at,
      resolved_at: row.resolved_at,
    })
  }
}
