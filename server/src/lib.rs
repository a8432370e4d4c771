// server/src/lib.rs

//! HTTP front end for `stockwatch`: PostgreSQL persistence, cookie
//! sessions and the `/api/v1` routes.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

use crate::config::{AppConfig, BootstrapUser, LogFormat};
use crate::errors::Result;
use crate::services::auth_service;
use stockwatch::bootstrap::{self, BootstrapOutcome};
use stockwatch::{StockError, UserStore};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVES: &str = "info";

/// `RUST_LOG` when it is set and valid, `info` otherwise.
pub fn log_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Installs the global subscriber. A second call leaves the first one in
/// place.
pub fn init_tracing(format: LogFormat) {
  let builder = tracing_subscriber::fmt()
    .with_env_filter(log_filter())
    .with_span_events(FmtSpan::CLOSE);
  let _ = match format {
    LogFormat::Pretty => builder.try_init(),
    LogFormat::Json => builder.json().try_init(),
  };
}

/// Reads the configuration and installs tracing in the configured format.
/// When the configuration itself is invalid, a pretty subscriber is
/// installed first so the failure is logged before it propagates.
pub fn load_config() -> Result<AppConfig> {
  match AppConfig::from_env() {
    Ok(config) => {
      init_tracing(config.log_format);
      Ok(config)
    }
    Err(e) => {
      init_tracing(LogFormat::Pretty);
      tracing::error!(error = %e, "Failed to load application configuration.");
      Err(e)
    }
  }
}

/// Creates the configured login if it does not exist yet. Run once at
/// startup, before the server accepts requests.
pub async fn ensure_bootstrap_user<S>(store: &S, user: &BootstrapUser) -> Result<BootstrapOutcome>
where
  S: UserStore + ?Sized,
{
  let outcome = bootstrap::ensure_user(store, &user.username, || {
    auth_service::hash_password(&user.password).map_err(|e| StockError::Internal(e.to_string()))
  })
  .await?;
  Ok(outcome)
}
