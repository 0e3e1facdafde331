//! Reveal engine: the composition root for calendar use-cases.
//!
//! # Responsibility
//! - Answer "what should the user see" for every day.
//! - Record that a day was opened and hand its content to presentation.
//! - Count unlocked days for progress display.
//!
//! # Invariants
//! - Tile states are recomputed on every call; nothing derived is cached.
//! - Opening a day that is not in the loaded feed leaves the opened set
//!   unchanged.

use crate::clock::is_unlocked;
use crate::config::TOTAL_DAYS;
use crate::feed::content_feed::{ContentFeed, FeedSlot, LoadTicket};
use crate::feed::source::FeedSource;
use crate::feed::FeedLoadError;
use crate::identity::person::PersonCard;
use crate::model::day::DayContent;
use crate::model::tile::TileState;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::opened_days::OpenedDayStore;
use crate::service::tile_state::TileStateResolver;
use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Engine use-case error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealError {
    /// No feed has been loaded yet.
    NotLoaded,
    /// Day number is not part of the loaded feed.
    UnknownDay(u32),
}

impl Display for RevealError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "calendar content is not loaded"),
            Self::UnknownDay(day) => write!(f, "day {day} is not in the calendar"),
        }
    }
}

impl Error for RevealError {}

/// One grid entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub day: u32,
    pub state: TileState,
}

/// Calendar facade over the feed slot and the opened-day store.
pub struct RevealEngine<S: KeyValueStore> {
    feed: FeedSlot,
    opened: OpenedDayStore<S>,
}

impl<S: KeyValueStore> RevealEngine<S> {
    /// Creates an engine with no content loaded.
    pub fn new(opened: OpenedDayStore<S>) -> Self {
        Self {
            feed: FeedSlot::new(),
            opened,
        }
    }

    /// Creates an engine with already loaded content.
    pub fn with_feed(feed: ContentFeed, opened: OpenedDayStore<S>) -> Self {
        let mut engine = Self::new(opened);
        let ticket = engine.begin_load();
        engine.complete_load(ticket, feed);
        engine
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.feed.begin_load()
    }

    /// Installs a finished load; returns `false` if a newer one already won.
    pub fn complete_load(&mut self, ticket: LoadTicket, feed: ContentFeed) -> bool {
        self.feed.complete(ticket, feed)
    }

    /// Loads content from `source` and installs it.
    ///
    /// On failure the previously displayed content (if any) is kept.
    pub async fn load_from<F: FeedSource + ?Sized>(
        &mut self,
        source: &F,
    ) -> Result<bool, FeedLoadError> {
        let ticket = self.begin_load();
        let feed = ContentFeed::load(source).await?;
        Ok(self.complete_load(ticket, feed))
    }

    pub fn is_loaded(&self) -> bool {
        self.feed.current().is_some()
    }

    /// Loaded days in ascending order; empty before the first load.
    pub fn days(&self) -> &[DayContent] {
        self.feed
            .current()
            .map(ContentFeed::days)
            .unwrap_or_default()
    }

    pub fn tile_state_for(&self, day: u32, now: NaiveDateTime) -> Result<TileState, RevealError> {
        let content = self.lookup(day)?;
        Ok(TileStateResolver::new(&self.opened).resolve(content, now))
    }

    /// Tile states for every loaded day.
    pub fn tiles(&self, now: NaiveDateTime) -> Vec<Tile> {
        let resolver = TileStateResolver::new(&self.opened);
        self.days()
            .iter()
            .map(|content| Tile {
                day: content.day,
                state: resolver.resolve(content, now),
            })
            .collect()
    }

    /// Marks `day` opened and returns its content for presentation.
    pub fn on_day_opened(&mut self, day: u32) -> Result<&DayContent, RevealError> {
        let content = self
            .feed
            .current()
            .ok_or(RevealError::NotLoaded)?
            .day(day)
            .ok_or(RevealError::UnknownDay(day))?;
        self.opened.mark_opened(day);
        Ok(content)
    }

    /// Number of loaded days whose unlock date has been reached.
    pub fn unlocked_count(&self, now: NaiveDateTime) -> usize {
        self.days()
            .iter()
            .filter(|content| is_unlocked(content.unlock_date, now))
            .count()
    }

    /// Progress line against the fixed display total.
    pub fn progress_label(&self, now: NaiveDateTime) -> String {
        format!(
            "{} of {TOTAL_DAYS} days unlocked",
            self.unlocked_count(now)
        )
    }

    /// Presentation view of the day's featured person, if any.
    pub fn person_card(&self, day: u32) -> Result<Option<PersonCard>, RevealError> {
        Ok(self.lookup(day)?.person.as_ref().map(PersonCard::new))
    }

    pub fn opened_days(&self) -> Vec<u32> {
        self.opened.opened_days()
    }

    fn lookup(&self, day: u32) -> Result<&DayContent, RevealError> {
        self.feed
            .current()
            .ok_or(RevealError::NotLoaded)?
            .day(day)
            .ok_or(RevealError::UnknownDay(day))
    }
}
