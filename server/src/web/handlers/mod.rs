// server/src/web/handlers/mod.rs

pub mod alert_handlers;
pub mod auth_handlers;
pub mod inventory_handlers;
