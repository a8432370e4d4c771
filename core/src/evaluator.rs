// core/src/evaluator.rs

//! Reconciles an item's alert rows with its current stock level.
//!
//! | low stock | active alert | result                                 |
//! |-----------|--------------|----------------------------------------|
//! | yes       | none         | insert a new `ACTIVE` alert (`Raised`) |
//! | yes       | present      | untouched (`StillActive`)              |
//! | no        | present      | mark `RESOLVED` (`Resolved`)           |
//! | no        | none         | nothing (`NoAlert`)                    |
//!
//! At most one row is inserted or updated per call. The evaluator owns no
//! state beyond its clock and policy; the store is passed in per call.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::StockResult;
use crate::model::{Alert, AlertStatus, InventoryItem, NewAlert};
use crate::store::AlertStore;
use crate::time::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
  /// Resolve the active alert once stock is back at or above the minimum.
  /// When off, recovered items keep their alert (`Retained`).
  pub auto_resolve: bool,
}

impl Default for AlertPolicy {
  fn default() -> Self {
    AlertPolicy { auto_resolve: true }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
  Raised(Alert),
  StillActive(Alert),
  Resolved(Alert),
  /// Stock recovered but the policy keeps the alert active.
  Retained(Alert),
  NoAlert,
}

impl AlertOutcome {
  pub fn alert(&self) -> Option<&Alert> {
    match self {
      AlertOutcome::Raised(a) | AlertOutcome::StillActive(a) | AlertOutcome::Resolved(a) | AlertOutcome::Retained(a) => {
        Some(a)
      }
      AlertOutcome::NoAlert => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      AlertOutcome::Raised(_) => "raised",
      AlertOutcome::StillActive(_) => "still_active",
      AlertOutcome::Resolved(_) => "resolved",
      AlertOutcome::Retained(_) => "retained",
      AlertOutcome::NoAlert => "no_alert",
    }
  }

  /// Whether this evaluation wrote an alert row.
  pub fn wrote(&self) -> bool {
    matches!(self, AlertOutcome::Raised(_) | AlertOutcome::Resolved(_))
  }
}

#[derive(Debug, Clone)]
pub struct AlertEvaluator {
  clock: Arc<dyn Clock>,
  policy: AlertPolicy,
}

impl AlertEvaluator {
  pub fn new(clock: Arc<dyn Clock>, policy: AlertPolicy) -> Self {
    AlertEvaluator { clock, policy }
  }

  /// Must run after every successful create, and after every update that
  /// sets quantity or min_quantity. `item` must already be persisted.
  #[instrument(
    name = "alert_evaluator::evaluate",
    skip(self, store, item),
    fields(item_id = item.id, quantity = item.quantity, min_quantity = item.min_quantity),
    err(Display)
  )]
  pub async fn evaluate<S>(&self, store: &S, item: &InventoryItem) -> StockResult<AlertOutcome>
  where
    S: AlertStore + ?Sized,
  {
    let active = store.find_alert(item.id, AlertStatus::Active).await?;

    let outcome = match (item.is_low_stock(), active) {
      (true, None) => {
        let alert = store
          .insert_alert(NewAlert {
            inventory_id: item.id,
            triggered_at: self.clock.now(),
          })
          .await?;
        info!(alert_id = alert.id, "Low stock: alert raised.");
        AlertOutcome::Raised(alert)
      }
      (true, Some(alert)) => {
        debug!(alert_id = alert.id, "Low stock: alert already active.");
        AlertOutcome::StillActive(alert)
      }
      (false, Some(alert)) if self.policy.auto_resolve => {
        let resolved = alert.resolve(self.clock.now())?;
        store.update_alert(&resolved).await?;
        info!(alert_id = resolved.id, "Stock recovered: alert resolved.");
        AlertOutcome::Resolved(resolved)
      }
      (false, Some(alert)) => {
        debug!(alert_id = alert.id, "Stock recovered: auto-resolve disabled, alert retained.");
        AlertOutcome::Retained(alert)
      }
      (false, None) => AlertOutcome::NoAlert,
    };
    Ok(outcome)
  }
}
