//! Calendar domain model.
//!
//! # Responsibility
//! - Define the day records delivered by the content feed.
//! - Define the derived tile state rendered by presentation layers.
//!
//! # Invariants
//! - `DayContent` is immutable once loaded.
//! - `TileState` is never persisted; it is recomputed on demand.

pub mod day;
pub mod tile;
