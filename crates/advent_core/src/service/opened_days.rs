//! Opened-day tracking service.
//!
//! # Responsibility
//! - Remember which day numbers the user has viewed, across sessions.
//! - Persist the set as a JSON integer array under a fixed storage key.
//!
//! # Invariants
//! - The set only grows; there is no way to un-open a day.
//! - `mark_opened` merges into the latest persisted value, never a stale
//!   snapshot, so opens recorded by another owner are kept.
//! - Persisted arrays are sorted ascending and free of duplicates.
//! - Missing or corrupt persisted values read as the empty set; reads never
//!   fail the caller. Entries that are not positive `u32` day numbers are
//!   dropped while the rest of the array is kept.

use crate::repo::kv_repo::{KeyValueStore, KvError};
use log::{error, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the opened-day array.
pub const OPENED_DAYS_STORAGE_KEY: &str = "nostr:advent:opened-days";

/// Failure to read the persisted opened-day set.
///
/// Recovered locally as the empty set and logged; never surfaced to users.
#[derive(Debug)]
pub enum PersistenceReadError {
    Storage(KvError),
    Corrupt(serde_json::Error),
}

impl Display for PersistenceReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to read opened days: {err}"),
            Self::Corrupt(err) => write!(f, "persisted opened days are corrupt: {err}"),
        }
    }
}

impl Error for PersistenceReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Corrupt(err) => Some(err),
        }
    }
}

/// Read-only membership view over opened days.
pub trait OpenedDayLookup {
    fn is_opened(&self, day: u32) -> bool;
}

impl OpenedDayLookup for BTreeSet<u32> {
    fn is_opened(&self, day: u32) -> bool {
        self.contains(&day)
    }
}

/// Single owner of the opened-day set.
///
/// Writes go through `&mut self`, so one store instance serializes every
/// read-modify-write cycle of its session.
pub struct OpenedDayStore<S: KeyValueStore> {
    store: S,
    opened: BTreeSet<u32>,
}

impl<S: KeyValueStore> OpenedDayStore<S> {
    /// Loads the persisted set, treating missing or corrupt data as empty.
    pub fn new(store: S) -> Self {
        let opened = read_or_empty(&store);
        Self { store, opened }
    }

    pub fn is_opened(&self, day: u32) -> bool {
        self.opened.contains(&day)
    }

    /// Records `day` as opened and writes the merged set through.
    ///
    /// Returns `true` when the day was not opened before. Calling it again for
    /// the same day leaves the persisted value unchanged. A failed write is
    /// logged and the day stays opened for this session.
    pub fn mark_opened(&mut self, day: u32) -> bool {
        let newly_opened = !self.opened.contains(&day);

        let persisted = read_or_empty(&self.store);
        let mut merged = persisted.clone();
        merged.extend(self.opened.iter().copied());
        merged.insert(day);
        self.opened = merged;

        if self.opened != persisted {
            self.write_through();
        }
        if newly_opened {
            info!("event=day_opened module=opened_days status=ok day={day}");
        }
        newly_opened
    }

    /// Opened days in ascending order.
    pub fn opened_days(&self) -> Vec<u32> {
        self.opened.iter().copied().collect()
    }

    /// Re-reads the persisted value, keeping days opened in this session.
    pub fn reload(&mut self) {
        let persisted = read_or_empty(&self.store);
        self.opened.extend(persisted);
    }

    fn write_through(&self) {
        let encoded = match serde_json::to_string(&self.opened) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=opened_days_write module=opened_days status=error error_code=encode_failed error={err}"
                );
                return;
            }
        };
        if let Err(err) = self.store.set(OPENED_DAYS_STORAGE_KEY, &encoded) {
            error!(
                "event=opened_days_write module=opened_days status=error error_code=store_failed count={} error={err}",
                self.opened.len()
            );
        }
    }
}

impl<S: KeyValueStore> OpenedDayLookup for OpenedDayStore<S> {
    fn is_opened(&self, day: u32) -> bool {
        self.opened.contains(&day)
    }
}

/// Reads the persisted set without recovery.
pub fn load_opened_days<S: KeyValueStore>(
    store: &S,
) -> Result<BTreeSet<u32>, PersistenceReadError> {
    let Some(raw) = store
        .get(OPENED_DAYS_STORAGE_KEY)
        .map_err(PersistenceReadError::Storage)?
    else {
        return Ok(BTreeSet::new());
    };
    let days: Vec<i64> = serde_json::from_str(&raw).map_err(PersistenceReadError::Corrupt)?;
    let (valid, skipped): (Vec<_>, Vec<_>) = days
        .into_iter()
        .map(|day| u32::try_from(day).ok().filter(|day| *day >= 1))
        .partition(Option::is_some);
    if !skipped.is_empty() {
        warn!(
            "event=opened_days_read module=opened_days status=recovered skipped_entries={}",
            skipped.len()
        );
    }
    Ok(valid.into_iter().flatten().collect())
}

fn read_or_empty<S: KeyValueStore>(store: &S) -> BTreeSet<u32> {
    load_opened_days(store).unwrap_or_else(|err| {
        warn!("event=opened_days_read module=opened_days status=recovered error={err}");
        BTreeSet::new()
    })
}
