// core/src/inventory.rs

//! Item operations as the request handlers see them. Writes that set a
//! stock level are followed by an alert evaluation; reads never evaluate.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{StockError, StockResult};
use crate::evaluator::{AlertEvaluator, AlertOutcome, AlertPolicy};
use crate::model::{Alert, AlertStatus, InventoryItem, ItemChanges, ItemId, NewItem, UserId};
use crate::store::Store;
use crate::time::Clock;

/// Result of a create or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemWrite {
  pub item: InventoryItem,
  /// `None` when the edit did not set quantity or min_quantity.
  pub alert: Option<AlertOutcome>,
}

/// One row of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListing {
  pub item: InventoryItem,
  /// True when a persisted `ACTIVE` alert exists for the item.
  pub alerting: bool,
}

#[derive(Clone)]
pub struct InventoryService {
  store: Arc<dyn Store>,
  clock: Arc<dyn Clock>,
  evaluator: AlertEvaluator,
}

impl InventoryService {
  pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, policy: AlertPolicy) -> Self {
    let evaluator = AlertEvaluator::new(clock.clone(), policy);
    InventoryService {
      store,
      clock,
      evaluator,
    }
  }

  pub fn store(&self) -> &Arc<dyn Store> {
    &self.store
  }

  #[instrument(name = "inventory::create_item", skip(self, new_item), fields(name = %new_item.name), err(Display))]
  pub async fn create_item(&self, new_item: NewItem) -> StockResult<ItemWrite> {
    let item = self.store.insert_item(new_item, self.clock.now()).await?;
    info!(item_id = item.id, "Inventory item created.");
    let outcome = self.evaluator.evaluate(self.store.as_ref(), &item).await?;
    Ok(ItemWrite {
      item,
      alert: Some(outcome),
    })
  }

  #[instrument(name = "inventory::update_item", skip(self, changes), err(Display))]
  pub async fn update_item(
    &self,
    item_id: ItemId,
    changes: ItemChanges,
    editor: Option<UserId>,
  ) -> StockResult<ItemWrite> {
    let mut item = self.get_item(item_id).await?;
    if changes.is_empty() {
      return Err(StockError::Validation("No fields to update.".to_string()));
    }

    changes.apply_to(&mut item);
    item.updated_at = self.clock.now();
    item.updated_by = editor.or(item.updated_by);
    self.store.update_item(&item).await?;
    info!(item_id, quantity = item.quantity, min_quantity = item.min_quantity, "Inventory item updated.");

    let alert = if changes.touches_stock_levels() {
      Some(self.evaluator.evaluate(self.store.as_ref(), &item).await?)
    } else {
      None
    };
    Ok(ItemWrite { item, alert })
  }

  pub async fn get_item(&self, item_id: ItemId) -> StockResult<InventoryItem> {
    self.store.get_item(item_id).await?.ok_or_else(|| {
      warn!(item_id, "Inventory item not found.");
      StockError::ItemNotFound { item_id }
    })
  }

  #[instrument(name = "inventory::delete_item", skip(self), err(Display))]
  pub async fn delete_item(&self, item_id: ItemId) -> StockResult<()> {
    if self.store.delete_item(item_id).await? {
      info!(item_id, "Inventory item deleted with its alerts.");
      Ok(())
    } else {
      Err(StockError::ItemNotFound { item_id })
    }
  }

  /// The `alerting` flag is read from the alert table, not recomputed from
  /// quantities.
  pub async fn list_items(&self) -> StockResult<Vec<ItemListing>> {
    let items = self.store.list_items().await?;
    let alerting = self.store.active_item_ids().await?;
    Ok(
      items
        .into_iter()
        .map(|item| ItemListing {
          alerting: alerting.contains(&item.id),
          item,
        })
        .collect(),
    )
  }

  pub async fn list_alerts(&self, status: Option<AlertStatus>) -> StockResult<Vec<Alert>> {
    self.store.list_alerts(status).await
  }

  pub async fn alerts_for_item(&self, item_id: ItemId) -> StockResult<Vec<Alert>> {
    self.get_item(item_id).await?;
    self.store.alerts_for_item(item_id).await
  }
}
