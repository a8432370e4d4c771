// core/src/store/mod.rs

//! The persistence contract consumed by the evaluator and the inventory
//! service.
//!
//! Implementations must delete an item's alerts together with the item, and
//! must refuse to update an alert row that is no longer `ACTIVE`. Nothing in
//! these traits spans more than one call: the find-then-insert pair used by
//! the evaluator is not atomic.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StockResult;
use crate::model::{Alert, AlertStatus, InventoryItem, ItemId, NewAlert, NewItem, NewUser, User};

pub mod memory;

pub use memory::MemoryStore;

#[async_trait]
pub trait ItemStore: Send + Sync {
  async fn insert_item(&self, item: NewItem, updated_at: DateTime<Utc>) -> StockResult<InventoryItem>;

  async fn get_item(&self, item_id: ItemId) -> StockResult<Option<InventoryItem>>;

  /// Overwrites the stored row. Fails with `ItemNotFound` if it is gone.
  async fn update_item(&self, item: &InventoryItem) -> StockResult<()>;

  /// Deletes the item and every alert that references it. Returns `false`
  /// when there was no such item.
  async fn delete_item(&self, item_id: ItemId) -> StockResult<bool>;

  /// All items in id order.
  async fn list_items(&self) -> StockResult<Vec<InventoryItem>>;
}

#[async_trait]
pub trait AlertStore: Send + Sync {
  /// The item's alert in `status`, if any. With more than one match (only
  /// possible for `RESOLVED`) the most recently triggered one is returned.
  async fn find_alert(&self, item_id: ItemId, status: AlertStatus) -> StockResult<Option<Alert>>;

  async fn insert_alert(&self, alert: NewAlert) -> StockResult<Alert>;

  /// Persists a status change. The stored row must still be `ACTIVE`,
  /// otherwise `InvalidTransition` is returned and nothing is written.
  async fn update_alert(&self, alert: &Alert) -> StockResult<()>;

  /// Newest first, optionally filtered by status.
  async fn list_alerts(&self, status: Option<AlertStatus>) -> StockResult<Vec<Alert>>;

  async fn alerts_for_item(&self, item_id: ItemId) -> StockResult<Vec<Alert>>;

  /// Ids of every item that currently has an `ACTIVE` alert.
  async fn active_item_ids(&self) -> StockResult<BTreeSet<ItemId>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
  async fn find_user_by_username(&self, username: &str) -> StockResult<Option<User>>;

  /// Fails with `Conflict` if the username is taken.
  async fn insert_user(&self, user: NewUser) -> StockResult<User>;
}

/// Everything the application needs from one backend.
pub trait Store: ItemStore + AlertStore + UserStore {}

impl<T: ItemStore + AlertStore + UserStore + ?Sized> Store for T {}
