//! Calendar content loading.
//!
//! # Responsibility
//! - Fetch the day-definition document from an external source.
//! - Validate its shape before anything is shown.
//!
//! # Invariants
//! - A load either yields a complete, validated feed or a `FeedLoadError`;
//!   partial feeds are never exposed.
//! - One load is one round trip; retries are the caller's decision.

pub mod content_feed;
pub mod source;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure to load or validate the content feed.
#[derive(Debug)]
pub enum FeedLoadError {
    InvalidUrl(url::ParseError),
    Transport(reqwest::Error),
    /// Non-success HTTP status.
    Status(u16),
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Document parsed but violates feed invariants.
    InvalidShape(String),
}

impl Display for FeedLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl(err) => write!(f, "invalid feed url: {err}"),
            Self::Transport(err) => write!(f, "feed request failed: {err}"),
            Self::Status(code) => write!(f, "feed request returned HTTP {code}"),
            Self::Io(err) => write!(f, "failed to read feed: {err}"),
            Self::Parse(err) => write!(f, "feed is not valid calendar JSON: {err}"),
            Self::InvalidShape(message) => write!(f, "invalid feed: {message}"),
        }
    }
}

impl Error for FeedLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUrl(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Status(_) | Self::InvalidShape(_) => None,
        }
    }
}

impl From<reqwest::Error> for FeedLoadError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<std::io::Error> for FeedLoadError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FeedLoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<url::ParseError> for FeedLoadError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUrl(value)
    }
}
