// server/src/models/mod.rs

//! Database row shapes. Each row converts into the matching `stockwatch`
//! model; the domain types stay free of sqlx.

pub mod alert_row;
pub mod item_row;
pub mod user_row;

pub use alert_row::AlertRow;
pub use item_row::ItemRow;
pub use user_row::UserRow;
