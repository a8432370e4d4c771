// server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use stockwatch_app::db::{self, PgStore};
use stockwatch_app::state::AppState;
use stockwatch_app::web::configure_app_routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = stockwatch_app::load_config()?;
  tracing::info!("Starting stockwatch server...");

  let db_pool = db::connect_pool(&app_config).await?;
  tracing::info!("Successfully connected to the database.");
  if app_config.run_migrations {
    db::run_migrations(&db_pool).await?;
  }

  let store = Arc::new(PgStore::new(db_pool));
  if let Some(bootstrap_user) = &app_config.bootstrap_user {
    stockwatch_app::ensure_bootstrap_user(store.as_ref(), bootstrap_user).await?;
  }

  let server_address = app_config.bind_address();
  let app_state = AppState::new(store, app_config)?;

  tracing::info!("Attempting to bind server to {}...", server_address);
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await?;
  Ok(())
}
