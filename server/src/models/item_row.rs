// server/src/models/item_row.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use stockwatch::InventoryItem;

#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
  pub id: i64,
  pub name: String,
  pub quantity: i32,
  pub unit: String,
  pub min_quantity: i32,
  pub updated_at: DateTime<Utc>,
  pub updated_by: Option<i64>,
}

impl From<ItemRow> for InventoryItem {
  fn from(row: ItemRow) -> Self {
    InventoryItem {
      id: row.id,
      name: row.name,
      quantity: row.quantity,
      unit: row.unit,
      min_quantity: row.min_quantity,
      updated_at: row.updated_at,
      updated_by: row.updated_by,
    }
  }
}
