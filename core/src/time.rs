// core/src/time.rs

//! Time sources and the presentation offset.
//!
//! Every timestamp the stores persist is UTC. The fixed display offset
//! (UTC+9 unless configured otherwise) is applied only when a timestamp is
//! rendered for a client, via [`DisplayOffset::to_display`].

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use parking_lot::Mutex;

use crate::error::{StockError, StockResult};

pub const DEFAULT_DISPLAY_OFFSET_HOURS: i32 = 9;

pub trait Clock: Send + Sync + std::fmt::Debug {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
  pub fn new(at: DateTime<Utc>) -> Self {
    FixedClock(Mutex::new(at))
  }

  pub fn set(&self, at: DateTime<Utc>) {
    *self.0.lock() = at;
  }

  pub fn advance(&self, by: Duration) {
    let mut guard = self.0.lock();
    *guard += by;
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    *self.0.lock()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOffset(FixedOffset);

impl DisplayOffset {
  pub fn from_hours(hours: i32) -> StockResult<Self> {
    if !(-23..=23).contains(&hours) {
      return Err(StockError::Validation(format!(
        "Display offset must be within -23..=23 hours, got {}",
        hours
      )));
    }
    FixedOffset::east_opt(hours * 3600)
      .map(DisplayOffset)
      .ok_or_else(|| StockError::Internal(format!("Offset of {} hours rejected by chrono", hours)))
  }

  pub fn offset(&self) -> FixedOffset {
    self.0
  }

  pub fn to_display(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
    at.with_timezone(&self.0)
  }
}

impl Default for DisplayOffset {
  fn default() -> Self {
    DisplayOffset::from_hours(DEFAULT_DISPLAY_OFFSET_HOURS).unwrap_or(DisplayOffset(Utc.fix()))
  }
}
