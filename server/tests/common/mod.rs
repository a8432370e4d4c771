// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use stockwatch::{FixedClock, MemoryStore, NewUser, UserStore};
use stockwatch_app::config::AppConfig;
use stockwatch_app::services::auth_service;
use stockwatch_app::state::AppState;
use tracing::Level;

pub const TEST_USERNAME: &str = "test";
pub const TEST_PASSWORD: &str = "testpassword";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

// Argon2 is slow in debug builds; hash once per test binary.
static TEST_PASSWORD_HASH: Lazy<String> =
  Lazy::new(|| auth_service::hash_password(TEST_PASSWORD).expect("hashing the test password"));

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn t0() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 11, 28, 11, 37, 35).unwrap()
}

pub fn test_config(overrides: &[(&str, &str)]) -> AppConfig {
  let mut vars: HashMap<String, String> = HashMap::new();
  vars.insert("DATABASE_URL".to_string(), "postgres://unused/stockwatch_test".to_string());
  for (k, v) in overrides {
    vars.insert(k.to_string(), v.to_string());
  }
  AppConfig::from_lookup(|name| vars.get(name).cloned()).expect("test config")
}

pub struct TestApp {
  pub store: MemoryStore,
  pub clock: Arc<FixedClock>,
  pub state: AppState,
  pub user_id: i64,
}

impl TestApp {
  pub async fn new() -> Self {
    Self::with_config(test_config(&[])).await
  }

  /// Memory store with the test user already bootstrapped.
  pub async fn with_config(config: AppConfig) -> Self {
    setup_tracing();
    let store = MemoryStore::new();
    let user = store
      .insert_user(NewUser {
        username: TEST_USERNAME.to_string(),
        password_hash: TEST_PASSWORD_HASH.clone(),
        role: "staff".to_string(),
      })
      .await
      .unwrap();
    let clock = Arc::new(FixedClock::new(t0()));
    let state = AppState::with_clock(Arc::new(store.clone()), clock.clone(), config).unwrap();
    TestApp {
      store,
      clock,
      state,
      user_id: user.id,
    }
  }
}

/// Builds the actix test service over `$test_app.state`.
macro_rules! init_app {
  ($test_app:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($test_app.state.clone()))
        .configure(stockwatch_app::web::configure_app_routes),
    )
    .await
  };
}

/// Logs in as the bootstrapped user and evaluates to the session cookie.
macro_rules! login {
  ($app:expr) => {{
    let req = actix_web::test::TestRequest::post()
      .uri("/api/v1/auth/login")
      .set_form([("username", common::TEST_USERNAME), ("password", common::TEST_PASSWORD)])
      .to_request();
    let resp = actix_web::test::call_service(&$app, req).await;
    assert!(resp.status().is_success(), "login failed: {}", resp.status());
    common::session_cookie(&resp).expect("session cookie")
  }};
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
  resp
    .response()
    .cookies()
    .find(|c| c.name() == "stockwatch_session")
    .map(|c| c.into_owned())
}
