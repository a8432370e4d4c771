// server/src/web/extractors.rs

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use stockwatch::UserId;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// The user behind the session cookie. Any handler taking this argument is
/// protected; a missing or unknown session short-circuits with 401.
#[derive(Debug, Clone)]
pub struct LoggedInUser {
  pub user_id: UserId,
}

impl FromRequest for LoggedInUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(resolve_session(req))
  }
}

fn resolve_session(req: &HttpRequest) -> Result<LoggedInUser, AppError> {
  let app_state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;

  let cookie = req.cookie(&app_state.config.session_cookie_name).ok_or_else(|| {
    warn!(path = %req.path(), "Request without a session cookie.");
    AppError::Auth("Login required.".to_string())
  })?;

  let session = app_state.sessions.get(cookie.value()).ok_or_else(|| {
    warn!(path = %req.path(), "Request with an unknown or expired session.");
    AppError::Auth("Session is invalid or has expired.".to_string())
  })?;

  Ok(LoggedInUser {
    user_id: session.user_id,
  })
}
