// core/src/store/memory.rs

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use super::{AlertStore, ItemStore, UserStore};
use crate::error::{StockError, StockResult};
use crate::model::{
  Alert, AlertId, AlertStatus, InventoryItem, ItemId, NewAlert, NewItem, NewUser, User, UserId,
};

#[derive(Debug, Default)]
struct Tables {
  items: BTreeMap<ItemId, InventoryItem>,
  alerts: BTreeMap<AlertId, Alert>,
  users: BTreeMap<UserId, User>,
  last_item_id: ItemId,
  last_alert_id: AlertId,
  last_user_id: UserId,
}

/// In-process store with sequential ids starting at 1.
///
/// Clones share the same tables. Locks are taken and released inside each
/// call and are never held across an `.await`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn alert_count(&self) -> usize {
    self.tables.read().alerts.len()
  }
}

fn newest_first(alerts: &mut [Alert]) {
  alerts.sort_by(|a, b| b.triggered_at.cmp(&a.triggered_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl ItemStore for MemoryStore {
  async fn insert_item(&self, item: NewItem, updated_at: DateTime<Utc>) -> StockResult<InventoryItem> {
    let mut tables = self.tables.write();
    tables.last_item_id += 1;
    let stored = InventoryItem {
      id: tables.last_item_id,
      name: item.name,
      quantity: item.quantity,
      unit: item.unit,
      min_quantity: item.min_quantity,
      updated_at,
      updated_by: item.updated_by,
    };
    tables.items.insert(stored.id, stored.clone());
    debug!(item_id = stored.id, "memory store: item inserted");
    Ok(stored)
  }

  async fn get_item(&self, item_id: ItemId) -> StockResult<Option<InventoryItem>> {
    Ok(self.tables.read().items.get(&item_id).cloned())
  }

  async fn update_item(&self, item: &InventoryItem) -> StockResult<()> {
    let mut tables = self.tables.write();
    match tables.items.get_mut(&item.id) {
      Some(row) => {
        *row = item.clone();
        Ok(())
      }
      None => Err(StockError::ItemNotFound { item_id: item.id }),
    }
  }

  async fn delete_item(&self, item_id: ItemId) -> StockResult<bool> {
    let mut tables = self.tables.write();
    if tables.items.remove(&item_id).is_none() {
      return Ok(false);
    }
    let before = tables.alerts.len();
    tables.alerts.retain(|_, alert| alert.inventory_id != item_id);
    debug!(item_id, removed_alerts = before - tables.alerts.len(), "memory store: item deleted");
    Ok(true)
  }

  async fn list_items(&self) -> StockResult<Vec<InventoryItem>> {
    Ok(self.tables.read().items.values().cloned().collect())
  }
}

#[async_trait]
impl AlertStore for MemoryStore {
  async fn find_alert(&self, item_id: ItemId, status: AlertStatus) -> StockResult<Option<Alert>> {
    let tables = self.tables.read();
    let mut matches: Vec<Alert> = tables
      .alerts
      .values()
      .filter(|alert| alert.inventory_id == item_id && alert.status == status)
      .cloned()
      .collect();
    newest_first(&mut matches);
    Ok(matches.into_iter().next())
  }

  async fn insert_alert(&self, alert: NewAlert) -> StockResult<Alert> {
    let mut tables = self.tables.write();
    if !tables.items.contains_key(&alert.inventory_id) {
      // Mirrors the foreign key on alerts.inventory_id.
      return Err(StockError::ItemNotFound {
        item_id: alert.inventory_id,
      });
    }
    tables.last_alert_id += 1;
    let stored = Alert {
      id: tables.last_alert_id,
      inventory_id: alert.inventory_id,
      status: AlertStatus::Active,
      triggered_at: alert.triggered_at,
      resolved_at: None,
    };
    tables.alerts.insert(stored.id, stored.clone());
    Ok(stored)
  }

  async fn update_alert(&self, alert: &Alert) -> StockResult<()> {
    let mut tables = self.tables.write();
    let row = tables
      .alerts
      .get_mut(&alert.id)
      .ok_or(StockError::AlertNotFound { alert_id: alert.id })?;
    if !row.is_active() {
      return Err(StockError::InvalidTransition {
        alert_id: row.id,
        status: row.status,
      });
    }
    *row = alert.clone();
    Ok(())
  }

  async fn list_alerts(&self, status: Option<AlertStatus>) -> StockResult<Vec<Alert>> {
    let tables = self.tables.read();
    let mut alerts: Vec<Alert> = tables
      .alerts
      .values()
      .filter(|alert| status.map_or(true, |wanted| alert.status == wanted))
      .cloned()
      .collect();
    newest_first(&mut alerts);
    Ok(alerts)
  }

  async fn alerts_for_item(&self, item_id: ItemId) -> StockResult<Vec<Alert>> {
    let tables = self.tables.read();
    let mut alerts: Vec<Alert> = tables
      .alerts
      .values()
      .filter(|alert| alert.inventory_id == item_id)
      .cloned()
      .collect();
    newest_first(&mut alerts);
    Ok(alerts)
  }

  async fn active_item_ids(&self) -> StockResult<BTreeSet<ItemId>> {
    let tables = self.tables.read();
    Ok(
      tables
        .alerts
        .values()
        .filter(|alert| alert.is_active())
        .map(|alert| alert.inventory_id)
        .collect(),
    )
  }
}

#[async_trait]
impl UserStore for MemoryStore {
  async fn find_user_by_username(&self, username: &str) -> StockResult<Option<User>> {
    let tables = self.tables.read();
    Ok(tables.users.values().find(|user| user.username == username).cloned())
  }

  async fn insert_user(&self, user: NewUser) -> StockResult<User> {
    let mut tables = self.tables.write();
    if tables.users.values().any(|existing| existing.username == user.username) {
      return Err(StockError::Conflict(format!("Username '{}' is already taken", user.username)));
    }
    tables.last_user_id += 1;
    let stored = User {
      id: tables.last_user_id,
      username: user.username,
      password_hash: user.password_hash,
      role: user.role,
      created_at: Utc::now(),
    };
    tables.users.insert(stored.id, stored.clone());
    Ok(stored)
  }
}
