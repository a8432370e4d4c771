// server/src/state.rs

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::SessionStore;
use chrono::Duration;
use std::sync::Arc;
use stockwatch::{AlertPolicy, Clock, DisplayOffset, InventoryService, Store, SystemClock};

#[derive(Clone)]
pub struct AppState {
  pub inventory: InventoryService,
  pub sessions: SessionStore,
  pub display: DisplayOffset,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Result<Self> {
    Self::with_clock(store, Arc::new(SystemClock), config)
  }

  pub fn with_clock(store: Arc<dyn Store>, clock: Arc<dyn Clock>, config: AppConfig) -> Result<Self> {
    let display = DisplayOffset::from_hours(config.display_offset_hours)?;
    let policy = AlertPolicy {
      auto_resolve: config.alert_auto_resolve,
    };
    Ok(AppState {
      sessions: SessionStore::new(clock.clone(), Duration::minutes(config.session_ttl_minutes)),
      inventory: InventoryService::new(store, clock, policy),
      display,
      config: Arc::new(config),
    })
  }

  pub fn store(&self) -> &Arc<dyn Store> {
    self.inventory.store()
  }
}
