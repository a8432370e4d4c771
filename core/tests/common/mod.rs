// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use stockwatch::{AlertPolicy, FixedClock, InventoryService, MemoryStore, NewItem};
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn t0() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 11, 28, 11, 37, 35).unwrap()
}

/// A service over a fresh memory store, plus handles to both for assertions.
pub struct Harness {
  pub store: MemoryStore,
  pub clock: Arc<FixedClock>,
  pub service: InventoryService,
}

impl Harness {
  pub fn new() -> Self {
    Self::with_policy(AlertPolicy::default())
  }

  pub fn with_policy(policy: AlertPolicy) -> Self {
    setup_tracing();
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(t0()));
    let service = InventoryService::new(Arc::new(store.clone()), clock.clone(), policy);
    Harness { store, clock, service }
  }

  pub fn tick(&self, minutes: i64) {
    self.clock.advance(Duration::minutes(minutes));
  }
}

pub fn new_item(name: &str, quantity: i32, min_quantity: i32) -> NewItem {
  NewItem {
    name: name.to_string(),
    quantity,
    unit: "pcs".to_string(),
    min_quantity,
    updated_by: None,
  }
}
