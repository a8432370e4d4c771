// server/src/services/mod.rs

pub mod auth_service;
pub mod session;

pub use session::{Session, SessionStore};
