// server/src/web/handlers/alert_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use stockwatch::AlertStatus;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::LoggedInUser;
use crate::web::forms::AlertQuery;
use crate::web::views::AlertView;

#[instrument(
    name = "handler::list_alerts",
    skip(app_state, user, query),
    fields(user_id = user.user_id, status = ?query.status)
)]
pub async fn list_alerts_handler(
  app_state: web::Data<AppState>,
  user: LoggedInUser,
  query: web::Query<AlertQuery>,
) -> Result<HttpResponse, AppError> {
  let status = match query.into_inner().status.filter(|s| !s.trim().is_empty()) {
    Some(raw) => Some(raw.parse::<AlertStatus>()?),
    None => None,
  };

  let alerts = app_state.inventory.list_alerts(status).await?;
  info!("Listed {} alerts.", alerts.len());
  Ok(HttpResponse::Ok().json(json!({
      "message": "Alerts fetched successfully.",
      "alerts": AlertView::many(&alerts, &app_state.display),
  })))
}
