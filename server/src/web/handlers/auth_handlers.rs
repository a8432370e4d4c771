// server/src/web/handlers/auth_handlers.rs

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use stockwatch::Store;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::forms::LoginForm;

#[instrument(
    name = "handler::login",
    skip(app_state, form),
    fields(username = %form.username)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
  let form = form.into_inner();
  let store: &dyn Store = app_state.store().as_ref();
  let user = auth_service::authenticate(store, &form.username, &form.password).await?;

  let token = app_state.sessions.create(user.id);
  let cookie = Cookie::build(app_state.config.session_cookie_name.clone(), token.to_string())
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .finish();

  info!(user_id = user.id, "Login successful.");
  Ok(HttpResponse::Ok().cookie(cookie).json(json!({
      "message": "Logged in.",
      "userId": user.id,
      "username": user.username,
  })))
}

/// Always succeeds; an absent or stale cookie just means there is nothing
/// to drop.
#[instrument(name = "handler::logout", skip(app_state, req))]
pub async fn logout_handler(app_state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
  let cookie_name = app_state.config.session_cookie_name.clone();
  if let Some(cookie) = req.cookie(&cookie_name) {
    if app_state.sessions.remove(cookie.value()) {
      info!("Session dropped.");
    }
  }

  let mut removal = Cookie::build(cookie_name, "").path("/").http_only(true).finish();
  removal.make_removal();
  Ok(HttpResponse::Ok().cookie(removal).json(json!({ "message": "Logged out." })))
}
