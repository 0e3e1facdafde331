//! Core logic for the advent calendar.
//! This crate owns every unlock, reveal and identity invariant; shells only
//! render what it computes.

pub mod clock;
pub mod config;
pub mod db;
pub mod feed;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{is_today, is_unlocked, Clock, FixedClock, SystemClock};
pub use config::{AdventConfig, ConfigOverrides, FeedLocation, TOTAL_DAYS};
pub use feed::content_feed::{ContentFeed, FeedSlot, LoadTicket};
pub use feed::source::{FeedSource, FileFeedSource, HttpFeedSource, StaticFeedSource};
pub use feed::FeedLoadError;
pub use identity::codec::{
    canonical_or_raw, decode_profile_pointer, display_or_raw, encode_profile_pointer,
    to_canonical, to_display_form, DecodingError, EncodingError, IdentityReference,
    ProfilePointer,
};
pub use identity::person::{
    Clipboard, ClipboardError, MemoryClipboard, NoteSummary, PersonCard, ProfileMetadata,
    SocialDataSource,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::day::{AppOfTheDay, DayContent, PersonToFollow};
pub use model::tile::TileState;
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use service::opened_days::{
    OpenedDayLookup, OpenedDayStore, PersistenceReadError, OPENED_DAYS_STORAGE_KEY,
};
pub use service::reveal_engine::{RevealEngine, RevealError, Tile};
pub use service::tile_state::{resolve_tile_state, TileStateResolver};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
