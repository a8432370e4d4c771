// server/src/web/views.rs

//! JSON response shapes. Timestamps are stored in UTC and converted to the
//! configured display offset here, nowhere else.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use stockwatch::{Alert, AlertId, AlertOutcome, AlertStatus, DisplayOffset, InventoryItem, ItemId, ItemListing, UserId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
  pub id: ItemId,
  pub name: String,
  pub quantity: i32,
  pub unit: String,
  pub min_quantity: i32,
  pub low_stock: bool,
  pub updated_at: DateTime<FixedOffset>,
  pub updated_by: Option<UserId>,
}

impl ItemView {
  pub fn new(item: &InventoryItem, display: &DisplayOffset) -> Self {
    ItemView {
      id: item.id,
      name: item.name.clone(),
      quantity: item.quantity,
      unit: item.unit.clone(),
      min_quantity: item.min_quantity,
      low_stock: item.is_low_stock(),
      updated_at: display.to_display(item.updated_at),
      updated_by: item.updated_by,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
  #[serde(flatten)]
  pub item: ItemView,
  pub alerting: bool,
}

impl ListingView {
  pub fn new(listing: &ItemListing, display: &DisplayOffset) -> Self {
    ListingView {
      item: ItemView::new(&listing.item, display),
      alerting: listing.alerting,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertView {
  pub id: AlertId,
  pub inventory_id: ItemId,
  pub status: AlertStatus,
  pub triggered_at: DateTime<FixedOffset>,
  pub resolved_at: Option<DateTime<FixedOffset>>,
}

impl AlertView {
  pub fn new(alert: &Alert, display: &DisplayOffset) -> Self {
    AlertView {
      id: alert.id,
      inventory_id: alert.inventory_id,
      status: alert.status,
      triggered_at: display.to_display(alert.triggered_at),
      resolved_at: alert.resolved_at.map(|at| display.to_display(at)),
    }
  }

  pub fn many(alerts: &[Alert], display: &DisplayOffset) -> Vec<Self> {
    alerts.iter().map(|alert| AlertView::new(alert, display)).collect()
  }
}

/// What the evaluator did after a create or edit.
#[derive(Debug, Serialize)]
pub struct OutcomeView {
  pub outcome: &'static str,
  pub alert: Option<AlertView>,
}

impl OutcomeView {
  pub fn new(outcome: &AlertOutcome, display: &DisplayOffset) -> Self {
    OutcomeView {
      outcome: outcome.label(),
      alert: outcome.alert().map(|alert| AlertView::new(alert, display)),
    }
  }
}
