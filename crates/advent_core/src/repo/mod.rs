//! Key-value persistence collaborators.
//!
//! # Responsibility
//! - Define the minimal `get`/`set` text store contract used by services.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - A missing key is `Ok(None)`, never an error.
//! - `set` replaces the whole value for a key.

pub mod kv_repo;
