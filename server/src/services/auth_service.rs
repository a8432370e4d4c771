// server/src/services/auth_service.rs

//! Password hashing and credential checks.

use crate::errors::AppError;
use argon2::{
  password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use rand_core::OsRng;
use stockwatch::{User, UserStore};
use tracing::{debug, error, info, instrument, warn};

/// Hashes a plain-text password with Argon2 and a random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Checks `provided_password` against a stored Argon2 hash. A mismatch is
/// `Ok(false)`; a malformed stored hash is an internal error.
#[instrument(
  name = "auth_service::verify_password",
  skip(hashed_password_str, provided_password),
  err(Display),
  fields(hash_len = hashed_password_str.len())
)]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: Passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Looks the user up and verifies the password off the async executor.
/// Unknown users and wrong passwords produce the same `Auth` error.
#[instrument(name = "auth_service::authenticate", skip(store, password), err(Display))]
pub async fn authenticate<S>(store: &S, username: &str, password: &str) -> Result<User, AppError>
where
  S: UserStore + ?Sized,
{
  let rejected = || AppError::Auth("Invalid username or password.".to_string());

  let user = match store.find_user_by_username(username).await? {
    Some(user) => user,
    None => {
      warn!("Login attempt for unknown user.");
      return Err(rejected());
    }
  };

  let stored_hash = user.password_hash.clone();
  let provided = password.to_string();
  let matches = tokio::task::spawn_blocking(move || verify_password(&stored_hash, &provided))
    .await
    .map_err(|join_err| AppError::Internal(format!("Password verification task failed: {}", join_err)))??;

  if !matches {
    warn!(user_id = user.id, "Login attempt with wrong password.");
    return Err(rejected());
  }
  info!(user_id = user.id, "User authenticated.");
  Ok(user)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("testpassword").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "testpassword").unwrap());
    assert!(!verify_password(&hash, "wrong").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
  }

  #[test]
  fn empty_password_cannot_be_hashed() {
    assert!(matches!(hash_password(""), Err(AppError::Validation(_))));
  }

  #[test]
  fn garbage_hash_is_internal_error() {
    assert!(matches!(verify_password("not-a-hash", "pw"), Err(AppError::Internal(_))));
  }
}
