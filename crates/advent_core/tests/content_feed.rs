use advent_core::{ContentFeed, FeedLoadError, FileFeedSource, StaticFeedSource};
use chrono::NaiveDate;
use std::io::Write;

const FEED: &str = r#"{
    "days": [
        {
            "day": 2,
            "unlockDate": "2024-12-02",
            "title": "Relays",
            "learn": "Relays store and forward signed events.",
            "person": { "pubkey": "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6" }
        },
        {
            "day": 1,
            "unlockDate": "2024-12-01",
            "title": "Keys",
            "learn": "Your key pair is your identity.",
            "app": { "url": "https://nostr.how", "name": "Nostr How" }
        }
    ]
}"#;

#[tokio::test]
async fn load_returns_days_in_ascending_order() {
    let feed = ContentFeed::load(&StaticFeedSource::new(FEED)).await.unwrap();

    let numbers: Vec<u32> = feed.days().iter().map(|day| day.day).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(
        feed.day(1).unwrap().unlock_date,
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    );
    assert!(feed.day(2).unwrap().person.is_some());
}

#[tokio::test]
async fn load_does_not_assume_twenty_four_days() {
    let feed = ContentFeed::load(&StaticFeedSource::new(r#"{ "days": [] }"#))
        .await
        .unwrap();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn malformed_json_fails_with_parse_error() {
    let err = ContentFeed::load(&StaticFeedSource::new("<html>oops</html>"))
        .await
        .unwrap_err();
    assert!(matches!(err, FeedLoadError::Parse(_)));
}

#[tokio::test]
async fn missing_days_field_fails_with_parse_error() {
    let err = ContentFeed::load(&StaticFeedSource::new(r#"{ "entries": [] }"#))
        .await
        .unwrap_err();
    assert!(matches!(err, FeedLoadError::Parse(_)));
}

#[tokio::test]
async fn duplicate_day_numbers_are_rejected() {
    let body = r#"{ "days": [
        { "day": 3, "unlockDate": "2024-12-03", "title": "a", "learn": "a" },
        { "day": 3, "unlockDate": "2024-12-03", "title": "b", "learn": "b" }
    ] }"#;
    let err = ContentFeed::load(&StaticFeedSource::new(body))
        .await
        .unwrap_err();
    assert!(matches!(err, FeedLoadError::InvalidShape(_)));
}

#[tokio::test]
async fn day_zero_is_rejected() {
    let body = r#"{ "days": [
        { "day": 0, "unlockDate": "2024-11-30", "title": "a", "learn": "a" }
    ] }"#;
    let err = ContentFeed::load(&StaticFeedSource::new(body))
        .await
        .unwrap_err();
    assert!(matches!(err, FeedLoadError::InvalidShape(_)));
}

#[tokio::test]
async fn file_source_reads_local_document() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FEED.as_bytes()).unwrap();

    let feed = ContentFeed::load(&FileFeedSource::new(file.path()))
        .await
        .unwrap();
    assert_eq!(feed.len(), 2);
}

#[tokio::test]
async fn missing_file_fails_with_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFeed::load(&FileFeedSource::new(dir.path().join("absent.json")))
        .await
        .unwrap_err();
    assert!(matches!(err, FeedLoadError::Io(_)));
}
