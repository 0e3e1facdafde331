//! Calendar use-case services.
//!
//! # Responsibility
//! - Track opened days over an injected key-value store.
//! - Resolve tile states from explicit inputs.
//! - Compose feed, resolver and store into the reveal engine.
//!
//! # Invariants
//! - Services never read the wall clock; `now` is always passed in.

pub mod opened_days;
pub mod reveal_engine;
pub mod tile_state;
