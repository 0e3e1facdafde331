use advent_core::db::{open_db, open_db_in_memory};
use advent_core::{
    KeyValueStore, KvError, KvResult, MemoryKeyValueStore, OpenedDayStore, SqliteKeyValueStore,
    OPENED_DAYS_STORAGE_KEY,
};

#[test]
fn missing_value_starts_empty() {
    let kv = MemoryKeyValueStore::new();
    let store = OpenedDayStore::new(&kv);

    assert!(store.opened_days().is_empty());
    assert!(!store.is_opened(1));
}

#[test]
fn corrupt_value_starts_empty_without_error() {
    let kv = MemoryKeyValueStore::with_entry(OPENED_DAYS_STORAGE_KEY, "not json");
    let store = OpenedDayStore::new(&kv);

    assert!(store.opened_days().is_empty());
}

#[test]
fn corrupt_value_is_replaced_on_next_open() {
    let kv = MemoryKeyValueStore::with_entry(OPENED_DAYS_STORAGE_KEY, "not json");
    let mut store = OpenedDayStore::new(&kv);

    store.mark_opened(2);

    assert_eq!(kv.get(OPENED_DAYS_STORAGE_KEY).unwrap().as_deref(), Some("[2]"));
}

#[test]
fn persisted_value_is_sorted_ascending() {
    let kv = MemoryKeyValueStore::new();
    let mut store = OpenedDayStore::new(&kv);

    store.mark_opened(12);
    store.mark_opened(3);
    store.mark_opened(7);

    assert_eq!(
        kv.get(OPENED_DAYS_STORAGE_KEY).unwrap().as_deref(),
        Some("[3,7,12]")
    );
    assert_eq!(store.opened_days(), vec![3, 7, 12]);
}

#[test]
fn mark_opened_is_idempotent() {
    let once = MemoryKeyValueStore::new();
    OpenedDayStore::new(&once).mark_opened(5);

    let twice = MemoryKeyValueStore::new();
    {
        let mut store = OpenedDayStore::new(&twice);
        store.mark_opened(5);
        store.mark_opened(5);
    }

    assert_eq!(
        once.get(OPENED_DAYS_STORAGE_KEY).unwrap(),
        twice.get(OPENED_DAYS_STORAGE_KEY).unwrap()
    );
}

#[test]
fn opens_from_two_owners_are_both_kept() {
    let kv = MemoryKeyValueStore::new();
    let mut first = OpenedDayStore::new(&kv);
    let mut second = OpenedDayStore::new(&kv);

    first.mark_opened(1);
    second.mark_opened(2);

    assert_eq!(
        kv.get(OPENED_DAYS_STORAGE_KEY).unwrap().as_deref(),
        Some("[1,2]")
    );
}

#[test]
fn opened_days_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("advent.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut store = OpenedDayStore::new(SqliteKeyValueStore::new(&conn));
        store.mark_opened(1);
        store.mark_opened(4);
    }

    let conn = open_db(&path).unwrap();
    let store = OpenedDayStore::new(SqliteKeyValueStore::new(&conn));
    assert_eq!(store.opened_days(), vec![1, 4]);
    assert!(store.is_opened(4));
}

#[test]
fn sqlite_backed_store_writes_json_array() {
    let conn = open_db_in_memory().unwrap();
    let mut store = OpenedDayStore::new(SqliteKeyValueStore::new(&conn));
    store.mark_opened(9);

    let raw: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1;",
            [OPENED_DAYS_STORAGE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw, "[9]");
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Err(KvError::Unavailable("offline".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::Unavailable("offline".to_string()))
    }
}

#[test]
fn failing_storage_never_fails_the_caller() {
    let mut store = OpenedDayStore::new(FailingStore);

    assert!(store.mark_opened(3));
    assert!(store.is_opened(3));
    assert_eq!(store.opened_days(), vec![3]);
}
