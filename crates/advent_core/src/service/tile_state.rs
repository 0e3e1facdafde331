//! Tile state resolution.
//!
//! # Invariants
//! - Priority order: not unlocked -> `Locked`; opened -> `Opened`;
//!   otherwise `Today`. Past days never opened resolve to `Today` so they stay
//!   actionable.
//! - Resolution never mutates the opened-day set.

use crate::clock::is_unlocked;
use crate::model::day::DayContent;
use crate::model::tile::TileState;
use crate::service::opened_days::OpenedDayLookup;
use chrono::{NaiveDate, NaiveDateTime};

/// Resolves tile states against an opened-day view.
pub struct TileStateResolver<'a, L: OpenedDayLookup + ?Sized> {
    opened: &'a L,
}

impl<'a, L: OpenedDayLookup + ?Sized> TileStateResolver<'a, L> {
    pub fn new(opened: &'a L) -> Self {
        Self { opened }
    }

    pub fn resolve(&self, day: &DayContent, now: NaiveDateTime) -> TileState {
        resolve_tile_state(
            day.unlock_date,
            now,
            self.opened.is_opened(day.day),
        )
    }
}

/// Pure tile-state function over explicit inputs.
pub fn resolve_tile_state(unlock_date: NaiveDate, now: NaiveDateTime, opened: bool) -> TileState {
    if !is_unlocked(unlock_date, now) {
        TileState::Locked
    } else if opened {
        TileState::Opened
    } else {
        TileState::Today
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_tile_state, TileStateResolver};
    use crate::model::day::DayContent;
    use crate::model::tile::TileState;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::BTreeSet;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        date(day).and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn future_day_is_locked_even_if_marked_opened() {
        assert_eq!(resolve_tile_state(date(5), at(3, 12), false), TileState::Locked);
        assert_eq!(resolve_tile_state(date(5), at(3, 12), true), TileState::Locked);
    }

    #[test]
    fn past_unopened_day_collapses_to_today() {
        assert_eq!(resolve_tile_state(date(1), at(10, 8), false), TileState::Today);
    }

    #[test]
    fn resolver_reads_membership_from_lookup() {
        let opened: BTreeSet<u32> = [2].into_iter().collect();
        let resolver = TileStateResolver::new(&opened);
        let day = DayContent {
            day: 2,
            unlock_date: date(2),
            title: "Keys".to_string(),
            learn: "Your key is your identity.".to_string(),
            app: None,
            person: None,
        };
        assert_eq!(resolver.resolve(&day, at(2, 9)), TileState::Opened);
    }
}
