// server/src/db/pg_store.rs

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use stockwatch::{
  Alert, AlertStatus, AlertStore, InventoryItem, ItemId, ItemStore, NewAlert, NewItem, NewUser, StockError,
  StockResult, User, UserStore,
};
use tracing::{debug, error};

use crate::models::{AlertRow, ItemRow, UserRow};

const ITEM_COLUMNS: &str = "id, name, quantity, unit, min_quantity, updated_at, updated_by";
const ALERT_COLUMNS: &str = "id, inventory_id, status, triggered_at, resolved_at";
const USER_COLUMNS: &str = "id, username, password_hash, role, created_at";

/// sqlx-backed store. Each call is its own statement; nothing here opens a
/// transaction, so an item write and the alert write that follows it are
/// committed separately.
#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    PgStore { pool }
  }
}

fn db_failure(context: &'static str) -> impl FnOnce(sqlx::Error) -> StockError {
  move |e| {
    error!(error = %e, "Database error while {}.", context);
    StockError::store(e)
  }
}

fn alerts_from_rows(rows: Vec<AlertRow>) -> StockResult<Vec<Alert>> {
  rows.into_iter().map(Alert::try_from).collect()
}

#[async_trait]
impl ItemStore for PgStore {
  async fn insert_item(&self, item: NewItem, updated_at: DateTime<Utc>) -> StockResult<InventoryItem> {
    let row: ItemRow = sqlx::query_as(&format!(
      "INSERT INTO inventory (name, quantity, unit, min_quantity, updated_at, updated_by) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
      ITEM_COLUMNS
    ))
    .bind(&item.name)
    .bind(item.quantity)
    .bind(&item.unit)
    .bind(item.min_quantity)
    .bind(updated_at)
    .bind(item.updated_by)
    .fetch_one(&self.pool)
    .await
    .map_err(db_failure("inserting an inventory item"))?;
    Ok(row.into())
  }

  async fn get_item(&self, item_id: ItemId) -> StockResult<Option<InventoryItem>> {
    let row: Option<ItemRow> = sqlx::query_as(&format!("SELECT {} FROM inventory WHERE id = $1", ITEM_COLUMNS))
      .bind(item_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_failure("fetching an inventory item"))?;
    Ok(row.map(Into::into))
  }

  async fn update_item(&self, item: &InventoryItem) -> StockResult<()> {
    let result = sqlx::query(
      "UPDATE inventory SET name = $2, quantity = $3, unit = $4, min_quantity = $5, updated_at = $6, updated_by = $7 \
       WHERE id = $1",
    )
    .bind(item.id)
    .bind(&item.name)
    .bind(item.quantity)
    .bind(&item.unit)
    .bind(item.min_quantity)
    .bind(item.updated_at)
    .bind(item.updated_by)
    .execute(&self.pool)
    .await
    .map_err(db_failure("updating an inventory item"))?;

    if result.rows_affected() == 0 {
      return Err(StockError::ItemNotFound { item_id: item.id });
    }
    Ok(())
  }

  async fn delete_item(&self, item_id: ItemId) -> StockResult<bool> {
    // alerts.inventory_id is ON DELETE CASCADE.
    let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
      .bind(item_id)
      .execute(&self.pool)
      .await
      .map_err(db_failure("deleting an inventory item"))?;
    Ok(result.rows_affected() > 0)
  }

  async fn list_items(&self) -> StockResult<Vec<InventoryItem>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!("SELECT {} FROM inventory ORDER BY id ASC", ITEM_COLUMNS))
      .fetch_all(&self.pool)
      .await
      .map_err(db_failure("listing inventory items"))?;
    Ok(rows.into_iter().map(Into::into).collect())
  }
}

#[async_trait]
impl AlertStore for PgStore {
  async fn find_alert(&self, item_id: ItemId, status: AlertStatus) -> StockResult<Option<Alert>> {
    let row: Option<AlertRow> = sqlx::query_as(&format!(
      "SELECT {} FROM alerts WHERE inventory_id = $1 AND status = $2 \
       ORDER BY triggered_at DESC, id DESC LIMIT 1",
      ALERT_COLUMNS
    ))
    .bind(item_id)
    .bind(status.as_str())
    .fetch_optional(&self.pool)
    .await
    .map_err(db_failure("looking up an alert"))?;
    row.map(Alert::try_from).transpose()
  }

  async fn insert_alert(&self, alert: NewAlert) -> StockResult<Alert> {
    let row: AlertRow = sqlx::query_as(&format!(
      "INSERT INTO alerts (inventory_id, status, triggered_at, resolved_at) \
       VALUES ($1, $2, $3, NULL) RETURNING {}",
      ALERT_COLUMNS
    ))
    .bind(alert.inventory_id)
    .bind(AlertStatus::Active.as_str())
    .bind(alert.triggered_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| match &e {
      sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => StockError::ItemNotFound {
        item_id: alert.inventory_id,
      },
      _ => db_failure("inserting an alert")(e),
    })?;
    Alert::try_from(row)
  }

  async fn update_alert(&self, alert: &Alert) -> StockResult<()> {
    let result = sqlx::query("UPDATE alerts SET status = $2, resolved_at = $3 WHERE id = $1 AND status = 'ACTIVE'")
      .bind(alert.id)
      .bind(alert.status.as_str())
      .bind(alert.resolved_at)
      .execute(&self.pool)
      .await
      .map_err(db_failure("updating an alert"))?;
    if result.rows_affected() > 0 {
      return Ok(());
    }

    // Nothing matched: either the row is gone or it is already terminal.
    let current: Option<String> = sqlx::query_scalar("SELECT status FROM alerts WHERE id = $1")
      .bind(alert.id)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_failure("re-reading an alert"))?;
    match current {
      None => Err(StockError::AlertNotFound { alert_id: alert.id }),
      Some(status) => {
        debug!(alert_id = alert.id, %status, "Refused update of a non-active alert.");
        Err(StockError::InvalidTransition {
          alert_id: alert.id,
          status: status.parse()?,
        })
      }
    }
  }

  async fn list_alerts(&self, status: Option<AlertStatus>) -> StockResult<Vec<Alert>> {
    let rows: Vec<AlertRow> = match status {
      Some(status) => {
        sqlx::query_as(&format!(
          "SELECT {} FROM alerts WHERE status = $1 ORDER BY triggered_at DESC, id DESC",
          ALERT_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
      }
      None => {
        sqlx::query_as(&format!(
          "SELECT {} FROM alerts ORDER BY triggered_at DESC, id DESC",
          ALERT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
      }
    }
    .map_err(db_failure("listing alerts"))?;
    alerts_from_rows(rows)
  }

  async fn alerts_for_item(&self, item_id: ItemId) -> StockResult<Vec<Alert>> {
    let rows: Vec<AlertRow> = sqlx::query_as(&format!(
      "SELECT {} FROM alerts WHERE inventory_id = $1 ORDER BY triggered_at DESC, id DESC",
      ALERT_COLUMNS
    ))
    .bind(item_id)
    .fetch_all(&self.pool)
    .await
    .map_err(db_failure("listing alerts for an item"))?;
    alerts_from_rows(rows)
  }

  async fn active_item_ids(&self) -> StockResult<BTreeSet<ItemId>> {
    let ids: Vec<i64> = sqlx::query_scalar("SELECT DISTINCT inventory_id FROM alerts WHERE status = 'ACTIVE'")
      .fetch_all(&self.pool)
      .await
      .map_err(db_failure("collecting alerting items"))?;
    Ok(ids.into_iter().collect())
  }
}

#[async_trait]
impl UserStore for PgStore {
  async fn find_user_by_username(&self, username: &str) -> StockResult<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS))
      .bind(username)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_failure("fetching a user"))?;
    Ok(row.map(Into::into))
  }

  async fn insert_user(&self, user: NewUser) -> StockResult<User> {
    let row: UserRow = sqlx::query_as(&format!(
      "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, $3) RETURNING {}",
      USER_COLUMNS
    ))
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.role)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| match &e {
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
        StockError::Conflict(format!("Username '{}' is already taken", user.username))
      }
      _ => db_failure("inserting a user")(e),
    })?;
    Ok(row.into())
  }
}
