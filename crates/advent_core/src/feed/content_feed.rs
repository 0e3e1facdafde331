//! Validated, ordered day definitions for one session.

use crate::feed::source::FeedSource;
use crate::feed::FeedLoadError;
use crate::model::day::DayContent;
use log::{error, info};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct FeedDocument {
    days: Vec<DayContent>,
}

/// Loaded calendar content, ordered by ascending day number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFeed {
    days: Vec<DayContent>,
}

impl ContentFeed {
    /// Fetches and validates the feed from `source`.
    ///
    /// # Errors
    /// - Transport, status and I/O failures from the source.
    /// - `Parse` when the document is not `{ "days": [...] }`.
    /// - `InvalidShape` when day numbers are zero or duplicated.
    pub async fn load<S: FeedSource + ?Sized>(source: &S) -> Result<Self, FeedLoadError> {
        let started_at = Instant::now();
        let origin = source.describe();
        info!("event=feed_load module=feed status=start source={origin}");

        let result = match source.fetch().await {
            Ok(body) => Self::from_json(&body),
            Err(err) => Err(err),
        };

        match &result {
            Ok(feed) => info!(
                "event=feed_load module=feed status=ok source={origin} duration_ms={} days={}",
                started_at.elapsed().as_millis(),
                feed.len()
            ),
            Err(err) => error!(
                "event=feed_load module=feed status=error source={origin} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Parses and validates a feed document.
    pub fn from_json(body: &str) -> Result<Self, FeedLoadError> {
        let document: FeedDocument = serde_json::from_str(body)?;
        Self::from_days(document.days)
    }

    /// Validates day records and orders them by day number.
    pub fn from_days(mut days: Vec<DayContent>) -> Result<Self, FeedLoadError> {
        let mut seen = BTreeSet::new();
        for day in &days {
            if day.day == 0 {
                return Err(FeedLoadError::InvalidShape(
                    "day numbers start at 1".to_string(),
                ));
            }
            if !seen.insert(day.day) {
                return Err(FeedLoadError::InvalidShape(format!(
                    "day {} appears more than once",
                    day.day
                )));
            }
        }
        days.sort_by_key(|day| day.day);
        Ok(Self { days })
    }

    pub fn days(&self) -> &[DayContent] {
        &self.days
    }

    pub fn day(&self, day: u32) -> Option<&DayContent> {
        self.days
            .binary_search_by_key(&day, |content| content.day)
            .ok()
            .map(|index| &self.days[index])
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Identifies one feed load, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Holds the displayed feed with last-issued-wins replacement.
///
/// A load that completes after a newer load has been applied is dropped, so a
/// stale in-flight response cannot overwrite fresher content.
#[derive(Debug, Default)]
pub struct FeedSlot {
    current: Option<ContentFeed>,
    issued: u64,
    applied: u64,
}

impl FeedSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Installs `feed` unless a newer load was already applied.
    pub fn complete(&mut self, ticket: LoadTicket, feed: ContentFeed) -> bool {
        if ticket.0 < self.applied {
            info!(
                "event=feed_apply module=feed status=skipped ticket={} applied={}",
                ticket.0, self.applied
            );
            return false;
        }
        self.applied = ticket.0;
        self.current = Some(feed);
        true
    }

    pub fn current(&self) -> Option<&ContentFeed> {
        self.current.as_ref()
    }
}
