//! Day-granularity unlock arithmetic.
//!
//! # Responsibility
//! - Decide whether an unlock date has been reached and whether it is today.
//! - Provide the wall-clock seam used by shells to obtain `now`.
//!
//! # Invariants
//! - Time-of-day is dropped from `now` before any comparison; unlock dates
//!   carry none. A day unlocks at local midnight and stays unlocked.
//! - Both predicates are total and side-effect free.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Returns whether `now`'s calendar date is on or after `unlock_date`.
pub fn is_unlocked(unlock_date: NaiveDate, now: NaiveDateTime) -> bool {
    now.date() >= unlock_date
}

/// Returns whether `now`'s calendar date equals `unlock_date`.
pub fn is_today(unlock_date: NaiveDate, now: NaiveDateTime) -> bool {
    now.date() == unlock_date
}

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant. Used to preview a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
