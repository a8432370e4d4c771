// core/src/bootstrap.rs

//! One-time initialization run by a deployment or test harness before any
//! request is served. Request handling never creates users.

use tracing::{info, instrument};

use crate::error::StockResult;
use crate::model::{NewUser, User, DEFAULT_ROLE};
use crate::store::UserStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
  Created(User),
  AlreadyPresent(User),
}

impl BootstrapOutcome {
  pub fn user(&self) -> &User {
    match self {
      BootstrapOutcome::Created(user) | BootstrapOutcome::AlreadyPresent(user) => user,
    }
  }
}

/// Makes sure `username` exists. `hash_password` is only invoked when the
/// user has to be created; an existing user's hash is left alone.
#[instrument(name = "bootstrap::ensure_user", skip(store, hash_password), err(Display))]
pub async fn ensure_user<S, F>(store: &S, username: &str, hash_password: F) -> StockResult<BootstrapOutcome>
where
  S: UserStore + ?Sized,
  F: FnOnce() -> StockResult<String>,
{
  if let Some(existing) = store.find_user_by_username(username).await? {
    info!(user_id = existing.id, "Bootstrap user already present.");
    return Ok(BootstrapOutcome::AlreadyPresent(existing));
  }

  let user = store
    .insert_user(NewUser {
      username: username.to_string(),
      password_hash: hash_password()?,
      role: DEFAULT_ROLE.to_string(),
    })
    .await?;
  info!(user_id = user.id, "Bootstrap user created.");
  Ok(BootstrapOutcome::Created(user))
}
