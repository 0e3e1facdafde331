//! Presentation view of a featured person.
//!
//! # Responsibility
//! - Derive the key forms a UI needs from one identity reference.
//! - Merge optional profile metadata and recent notes from an external
//!   social data source.
//! - Copy the display key through a clipboard collaborator.
//!
//! # Invariants
//! - Building a card never fails; undecodable references are shown raw.
//! - Profile and notes load independently; either may stay `None`.

use crate::identity::codec::{canonical_or_raw, display_or_raw, NOSTR_URI_SCHEME};
use crate::model::day::PersonToFollow;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of recent notes requested for a person.
pub const RECENT_NOTES_LIMIT: usize = 3;
/// Characters of the display key shown before truncation.
pub const SHORT_KEY_CHARS: usize = 16;
/// Name shown when profile metadata has none.
pub const FALLBACK_DISPLAY_NAME: &str = "Nostr User";

/// Profile metadata published by a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub name: Option<String>,
    pub display_name: Option<String>,
    /// Avatar URL.
    pub picture: Option<String>,
}

/// One recent post by a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: String,
    pub content: String,
    /// Unix seconds.
    pub created_at: i64,
}

impl NoteSummary {
    /// Formats `created_at` as e.g. `Dec 3, 4:05 PM` in `tz`.
    pub fn formatted_timestamp<Tz>(&self, tz: &Tz) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let utc = Utc.timestamp_opt(self.created_at, 0).single()?;
        Some(utc.with_timezone(tz).format("%b %-d, %-I:%M %p").to_string())
    }
}

/// External source of profile metadata and posts, keyed by canonical hex key.
#[async_trait]
pub trait SocialDataSource: Send + Sync {
    async fn profile(&self, pubkey_hex: &str) -> Option<ProfileMetadata>;
    async fn recent_notes(&self, pubkey_hex: &str, limit: usize) -> Vec<NoteSummary>;
}

/// Best-effort clipboard write failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError {
    message: String,
}

impl ClipboardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to copy to clipboard: {}", self.message)
    }
}

impl Error for ClipboardError {}

/// Clipboard collaborator.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Everything a UI needs to render a featured person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonCard {
    /// Reference exactly as written in the feed.
    pub reference: String,
    /// Key for social data lookups (raw reference if undecodable).
    pub pubkey_hex: String,
    /// `npub` form (raw reference if unresolvable).
    pub display_key: String,
    pub profile: Option<ProfileMetadata>,
    pub notes: Option<Vec<NoteSummary>>,
}

impl PersonCard {
    pub fn new(person: &PersonToFollow) -> Self {
        Self {
            reference: person.pubkey.clone(),
            pubkey_hex: canonical_or_raw(&person.pubkey),
            display_key: display_or_raw(&person.pubkey),
            profile: None,
            notes: None,
        }
    }

    /// Loads profile and recent notes concurrently from `source`.
    pub async fn load<D: SocialDataSource + ?Sized>(person: &PersonToFollow, source: &D) -> Self {
        let mut card = Self::new(person);
        let (profile, notes) = tokio::join!(
            source.profile(&card.pubkey_hex),
            source.recent_notes(&card.pubkey_hex, RECENT_NOTES_LIMIT),
        );
        card.profile = profile;
        card.notes = Some(notes.into_iter().take(RECENT_NOTES_LIMIT).collect());
        card
    }

    /// `name`, then `display_name`, then a generic fallback.
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|profile| {
                [profile.name.as_deref(), profile.display_name.as_deref()]
                    .into_iter()
                    .flatten()
                    .find(|value| !value.trim().is_empty())
            })
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }

    pub fn picture(&self) -> Option<&str> {
        self.profile.as_ref()?.picture.as_deref()
    }

    /// First characters of the display key followed by `...`.
    pub fn short_display_key(&self) -> String {
        let prefix: String = self.display_key.chars().take(SHORT_KEY_CHARS).collect();
        format!("{prefix}...")
    }

    /// `nostr:` URI handed to an external client for following.
    pub fn follow_uri(&self) -> String {
        format!("{NOSTR_URI_SCHEME}{}", self.display_key)
    }

    pub fn copy_display_key<C: Clipboard + ?Sized>(
        &self,
        clipboard: &mut C,
    ) -> Result<(), ClipboardError> {
        clipboard.write_text(&self.display_key)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteSummary, PersonCard, ProfileMetadata, FALLBACK_DISPLAY_NAME};
    use crate::model::day::PersonToFollow;
    use chrono::Utc;

    fn card_with(profile: Option<ProfileMetadata>) -> PersonCard {
        let mut card = PersonCard::new(&PersonToFollow {
            pubkey: "not-a-key".to_string(),
        });
        card.profile = profile;
        card
    }

    #[test]
    fn display_name_prefers_name_then_display_name() {
        let both = ProfileMetadata {
            name: Some("fiatjaf".to_string()),
            display_name: Some("Fiat Jaf".to_string()),
            picture: None,
        };
        assert_eq!(card_with(Some(both)).display_name(), "fiatjaf");

        let display_only = ProfileMetadata {
            name: Some(" ".to_string()),
            display_name: Some("Fiat Jaf".to_string()),
            picture: None,
        };
        assert_eq!(card_with(Some(display_only)).display_name(), "Fiat Jaf");
        assert_eq!(card_with(None).display_name(), FALLBACK_DISPLAY_NAME);
    }

    #[test]
    fn unresolvable_reference_is_shown_raw() {
        let card = card_with(None);
        assert_eq!(card.pubkey_hex, "not-a-key");
        assert_eq!(card.display_key, "not-a-key");
        assert_eq!(card.follow_uri(), "nostr:not-a-key");
    }

    #[test]
    fn note_timestamp_uses_short_month_and_12_hour_clock() {
        let note = NoteSummary {
            id: "n1".to_string(),
            content: "gm".to_string(),
            // 2024-12-03T16:05:00Z
            created_at: 1_733_241_900,
        };
        assert_eq!(
            note.formatted_timestamp(&Utc).as_deref(),
            Some("Dec 3, 4:05 PM")
        );
    }
}
