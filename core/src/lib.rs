// core/src/lib.rs

//! stockwatch: inventory items and their low-stock alert lifecycle.
//!
//! An item is *low on stock* while `quantity < min_quantity`. Each time an
//! item is created, or edited so that its quantity or minimum changes, the
//! [`AlertEvaluator`] reconciles the item's alert rows:
//!  - low stock and no active alert: a new `ACTIVE` alert is inserted;
//!  - low stock with an active alert: nothing changes;
//!  - stock recovered with an active alert: it becomes `RESOLVED`;
//!  - otherwise nothing happens.
//!
//! A resolved alert is never reactivated. Storage goes through the traits in
//! [`store`]; [`MemoryStore`] is the in-process implementation, the
//! PostgreSQL one lives in the server crate.

pub mod bootstrap;
pub mod error;
pub mod evaluator;
pub mod inventory;
pub mod model;
pub mod store;
pub mod time;

// --- Re-exports for the Public API ---

pub use crate::error::{StockError, StockResult};
pub use crate::evaluator::{AlertEvaluator, AlertOutcome, AlertPolicy};
pub use crate::inventory::{InventoryService, ItemListing, ItemWrite};
pub use crate::model::{
  Alert, AlertId, AlertStatus, InventoryItem, ItemChanges, ItemId, NewAlert, NewItem, NewUser, User, UserId,
};
pub use crate::store::{AlertStore, ItemStore, MemoryStore, Store, UserStore};
pub use crate::time::{Clock, DisplayOffset, FixedClock, SystemClock};
