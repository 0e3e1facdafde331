use advent_core::{
    is_today, is_unlocked, DayContent, MemoryKeyValueStore, OpenedDayStore, TileState,
    TileStateResolver,
};
use chrono::{NaiveDate, NaiveDateTime};

fn day(number: u32, unlock: &str) -> DayContent {
    DayContent {
        day: number,
        unlock_date: NaiveDate::parse_from_str(unlock, "%Y-%m-%d").unwrap(),
        title: format!("Day {number}"),
        learn: "learn".to_string(),
        app: None,
        person: None,
    }
}

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
}

#[test]
fn future_days_are_locked() {
    let kv = MemoryKeyValueStore::new();
    let store = OpenedDayStore::new(&kv);
    let resolver = TileStateResolver::new(&store);

    assert_eq!(
        resolver.resolve(&day(5, "2024-12-05"), at("2024-12-03T10:00")),
        TileState::Locked
    );
    assert_eq!(
        resolver.resolve(&day(5, "2024-12-05"), at("2024-12-04T23:59")),
        TileState::Locked
    );
}

#[test]
fn unlock_boundary_goes_straight_from_locked_to_today() {
    let kv = MemoryKeyValueStore::new();
    let store = OpenedDayStore::new(&kv);
    let resolver = TileStateResolver::new(&store);
    let target = day(7, "2024-12-07");

    assert_eq!(resolver.resolve(&target, at("2024-12-06T23:59")), TileState::Locked);
    for time in ["2024-12-07T00:00", "2024-12-07T12:30", "2024-12-07T23:59"] {
        assert_eq!(resolver.resolve(&target, at(time)), TileState::Today);
    }
}

#[test]
fn past_unopened_days_stay_actionable() {
    let kv = MemoryKeyValueStore::new();
    let store = OpenedDayStore::new(&kv);
    let resolver = TileStateResolver::new(&store);
    let past = day(1, "2024-12-01");
    let now = at("2024-12-10T08:00");

    assert!(!is_today(past.unlock_date, now));
    assert!(is_unlocked(past.unlock_date, now));
    assert_eq!(resolver.resolve(&past, now), TileState::Today);
}

#[test]
fn opened_days_stay_opened_for_every_later_date() {
    let kv = MemoryKeyValueStore::new();
    let mut store = OpenedDayStore::new(&kv);
    let target = day(3, "2024-12-03");
    store.mark_opened(3);

    let resolver = TileStateResolver::new(&store);
    for time in ["2024-12-03T00:00", "2024-12-04T09:00", "2024-12-24T23:59", "2025-06-01T12:00"] {
        assert_eq!(resolver.resolve(&target, at(time)), TileState::Opened);
    }
}

#[test]
fn resolving_does_not_open_the_day() {
    let kv = MemoryKeyValueStore::new();
    let store = OpenedDayStore::new(&kv);
    let resolver = TileStateResolver::new(&store);

    resolver.resolve(&day(2, "2024-12-02"), at("2024-12-02T09:00"));
    assert!(store.opened_days().is_empty());
}
