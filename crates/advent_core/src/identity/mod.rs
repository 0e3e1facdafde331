//! Decentralized identity references.
//!
//! # Responsibility
//! - Convert between canonical hex public keys and bech32 `npub`/`nprofile`
//!   strings in one place.
//! - Build the presentation view of a featured person.
//!
//! # Invariants
//! - Prefix detection, decoding and error recovery live only in `codec`.
//! - Identity display is best-effort; callers fall back to the raw input.

pub mod codec;
pub mod person;
