// core/src/model/user.rs

use chrono::{DateTime, Utc};

pub type UserId = i64;

pub const DEFAULT_ROLE: &str = "staff";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub id: UserId,
  pub username: String,
  pub password_hash: String,
  pub role: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
  pub username: String,
  pub password_hash: String,
  pub role: String,
}
