// core/src/model/item.rs

use chrono::{DateTime, Utc};

use super::user::UserId;

pub type ItemId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
  pub id: ItemId,
  pub name: String,
  pub quantity: i32,
  pub unit: String,
  pub min_quantity: i32,
  pub updated_at: DateTime<Utc>,
  pub updated_by: Option<UserId>,
}

impl InventoryItem {
  /// The low-stock condition. Every alert decision goes through this.
  pub fn is_low_stock(&self) -> bool {
    self.quantity < self.min_quantity
  }
}

/// Fields supplied when an item is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
  pub name: String,
  pub quantity: i32,
  pub unit: String,
  pub min_quantity: i32,
  pub updated_by: Option<UserId>,
}

/// A partial edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
  pub name: Option<String>,
  pub quantity: Option<i32>,
  pub unit: Option<String>,
  pub min_quantity: Option<i32>,
}

impl ItemChanges {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.quantity.is_none() && self.unit.is_none() && self.min_quantity.is_none()
  }

  /// True when the edit sets quantity or min_quantity, i.e. when the alert
  /// state has to be re-evaluated afterwards.
  pub fn touches_stock_levels(&self) -> bool {
    self.quantity.is_some() || self.min_quantity.is_some()
  }

  pub fn apply_to(&self, item: &mut InventoryItem) {
    if let Some(name) = &self.name {
      item.name = name.clone();
    }
    if let Some(quantity) = self.quantity {
      item.quantity = quantity;
    }
    if let Some(unit) = &self.unit {
      item.unit = unit.clone();
    }
    if let Some(min_quantity) = self.min_quantity {
      item.min_quantity = min_quantity;
    }
  }
}
