// core/src/model/mod.rs

//! Records persisted by the stores: inventory items, their alerts and the
//! users allowed to edit them.

pub mod alert;
pub mod item;
pub mod user;

pub use alert::{Alert, AlertId, AlertStatus, NewAlert};
pub use item::{InventoryItem, ItemChanges, ItemId, NewItem};
pub use user::{NewUser, User, UserId, DEFAULT_ROLE};
