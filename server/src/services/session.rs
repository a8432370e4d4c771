// server/src/services/session.rs

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use stockwatch::{Clock, UserId};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub user_id: UserId,
  pub created_at: DateTime<Utc>,
}

/// Process-local session table keyed by the random token carried in the
/// session cookie. Sessions do not survive a restart and expire `ttl` after
/// login. Expired rows are evicted on lookup and pruned on every login.
#[derive(Debug, Clone)]
pub struct SessionStore {
  sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
  clock: Arc<dyn Clock>,
  ttl: Duration,
}

impl SessionStore {
  pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
    SessionStore {
      sessions: Arc::default(),
      clock,
      ttl,
    }
  }

  fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
    now - session.created_at >= self.ttl
  }

  pub fn create(&self, user_id: UserId) -> Uuid {
    let now = self.clock.now();
    let token = Uuid::new_v4();
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, session| !self.is_expired(session, now));
    if sessions.len() < before {
      debug!(pruned = before - sessions.len(), "Expired sessions pruned.");
    }
    sessions.insert(token, Session { user_id, created_at: now });
    debug!(user_id, "Session created.");
    token
  }

  /// Accepts the raw cookie value; anything that is not a UUID is simply
  /// an unknown session.
  pub fn get(&self, token: &str) -> Option<Session> {
    let token = Uuid::parse_str(token).ok()?;
    let now = self.clock.now();
    let session = self.sessions.read().get(&token).cloned()?;
    if self.is_expired(&session, now) {
      self.sessions.write().remove(&token);
      debug!(user_id = session.user_id, "Expired session evicted.");
      return None;
    }
    Some(session)
  }

  pub fn remove(&self, token: &str) -> bool {
    match Uuid::parse_str(token) {
      Ok(token) => self.sessions.write().remove(&token).is_some(),
      Err(_) => false,
    }
  }

  pub fn len(&self) -> usize {
    self.sessions.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use stockwatch::FixedClock;

  fn store_at_t0() -> (Arc<FixedClock>, SessionStore) {
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 11, 28, 11, 37, 35).unwrap()));
    let sessions = SessionStore::new(clock.clone(), Duration::minutes(30));
    (clock, sessions)
  }

  #[test]
  fn create_get_remove() {
    let (_, sessions) = store_at_t0();
    let token = sessions.create(7).to_string();

    assert_eq!(sessions.get(&token).unwrap().user_id, 7);

    assert!(sessions.remove(&token));
    assert!(sessions.get(&token).is_none());
    assert!(!sessions.remove(&token));
    assert!(sessions.is_empty());
  }

  #[test]
  fn malformed_token_is_unknown() {
    let (_, sessions) = store_at_t0();
    assert!(sessions.get("not-a-uuid").is_none());
    assert!(!sessions.remove("not-a-uuid"));
  }

  #[test]
  fn sessions_expire_after_ttl_and_are_evicted() {
    let (clock, sessions) = store_at_t0();
    let token = sessions.create(7).to_string();

    clock.advance(Duration::minutes(29));
    assert!(sessions.get(&token).is_some());

    clock.advance(Duration::minutes(1));
    assert!(sessions.get(&token).is_none());
    assert!(sessions.is_empty());
  }

  #[test]
  fn login_prunes_expired_sessions() {
    let (clock, sessions) = store_at_t0();
    for user_id in 0..1000 {
      sessions.create(user_id);
    }
    assert_eq!(sessions.len(), 1000);

    clock.advance(Duration::hours(1));
    sessions.create(1);
    assert_eq!(sessions.len(), 1);
  }
}
