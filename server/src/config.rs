// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use stockwatch::time::DEFAULT_DISPLAY_OFFSET_HOURS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

/// Credentials for the one-time bootstrap user.
#[derive(Clone, PartialEq, Eq)]
pub struct BootstrapUser {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for BootstrapUser {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BootstrapUser")
      .field("username", &self.username)
      .field("password", &"[REDACTED]")
      .finish()
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,
  pub run_migrations: bool,
  pub display_offset_hours: i32,
  pub alert_auto_resolve: bool,
  pub session_cookie_name: String,
  pub session_ttl_minutes: i64,
  pub bootstrap_user: Option<BootstrapUser>,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. `from_env` passes the
  /// process environment; tests pass a map.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = lookup("DATABASE_URL")
      .ok_or_else(|| AppError::Config("Missing environment variable 'DATABASE_URL'".to_string()))?;
    let database_max_connections = get_or("DATABASE_MAX_CONNECTIONS", "5")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;
    let run_migrations = parse_bool("RUN_MIGRATIONS", &get_or("RUN_MIGRATIONS", "true"))?;

    let display_offset_hours = get_or("DISPLAY_UTC_OFFSET_HOURS", &DEFAULT_DISPLAY_OFFSET_HOURS.to_string())
      .parse::<i32>()
      .map_err(|e| AppError::Config(format!("Invalid DISPLAY_UTC_OFFSET_HOURS: {}", e)))?;
    if !(-23..=23).contains(&display_offset_hours) {
      return Err(AppError::Config(format!(
        "DISPLAY_UTC_OFFSET_HOURS must be within -23..=23, got {}",
        display_offset_hours
      )));
    }

    let alert_auto_resolve = parse_bool("ALERT_AUTO_RESOLVE", &get_or("ALERT_AUTO_RESOLVE", "true"))?;
    let session_cookie_name = get_or("SESSION_COOKIE_NAME", "stockwatch_session");
    let session_ttl_minutes = get_or("SESSION_TTL_MINUTES", "480")
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_MINUTES: {}", e)))?;
    if session_ttl_minutes <= 0 {
      return Err(AppError::Config(format!(
        "SESSION_TTL_MINUTES must be positive, got {}",
        session_ttl_minutes
      )));
    }

    let bootstrap_user = match (lookup("BOOTSTRAP_USERNAME"), lookup("BOOTSTRAP_PASSWORD")) {
      (Some(username), Some(password)) => Some(BootstrapUser { username, password }),
      (None, None) => None,
      _ => {
        return Err(AppError::Config(
          "BOOTSTRAP_USERNAME and BOOTSTRAP_PASSWORD must be set together".to_string(),
        ))
      }
    };

    let log_format = match get_or("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
      "pretty" => LogFormat::Pretty,
      "json" => LogFormat::Json,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT '{}'", other))),
    };

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      run_migrations,
      display_offset_hours,
      alert_auto_resolve,
      session_cookie_name,
      session_ttl_minutes,
      bootstrap_user,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
  raw
    .trim()
    .parse::<bool>()
    .map_err(|e| AppError::Config(format!("Invalid {} value: {}", name, e)))
}
