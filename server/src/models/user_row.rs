// server/src/models/user_row.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use stockwatch::User;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
  pub id: i64,
  pub username: String,
  pub password_hash: String,
  pub role: String,
  pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      username: row.username,
      password_hash: row.password_hash,
      role: row.role,
      created_at: row.created_at,
    }
  }
}
