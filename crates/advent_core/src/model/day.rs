//! Day content model.
//!
//! # Responsibility
//! - Define the canonical record for one calendar day as delivered by the
//!   content feed.
//! - Parse the feed's unlock date into a calendar date.
//!
//! # Invariants
//! - `day` is unique within one feed and feeds are ordered by `day`.
//! - `unlock_date` carries no time-of-day; timestamps in the feed are reduced
//!   to their local calendar date at parse time.
//!
//! # See also
//! - `crate::feed::content_feed` for shape validation.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;

/// One day of calendar content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayContent {
    /// Day number, starting at 1.
    pub day: u32,
    /// Local calendar date on which the day unlocks.
    #[serde(with = "unlock_date_format")]
    pub unlock_date: NaiveDate,
    pub title: String,
    /// Short micro-teaching text.
    pub learn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<AppOfTheDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonToFollow>,
}

impl DayContent {
    /// Formats the unlock date for detail headers, e.g. `December 1, 2024`.
    pub fn formatted_unlock_date(&self) -> String {
        self.unlock_date.format("%B %-d, %Y").to_string()
    }
}

/// App featured on a day.
///
/// `name` and `summary` are fallbacks used when fetched metadata is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOfTheDay {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AppOfTheDay {
    /// Resolves the label shown for the app.
    ///
    /// Order: fetched title, feed `name`, URL host, raw URL.
    pub fn display_name(&self, fetched_title: Option<&str>) -> String {
        if let Some(title) = non_blank(fetched_title) {
            return title.to_string();
        }
        if let Some(name) = non_blank(self.name.as_deref()) {
            return name.to_string();
        }
        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.url.clone())
    }

    /// Resolves the description shown for the app, empty when none is known.
    pub fn display_summary(&self, fetched_description: Option<&str>) -> String {
        non_blank(fetched_description)
            .or_else(|| non_blank(self.summary.as_deref()))
            .unwrap_or_default()
            .to_string()
    }
}

/// Person featured on a day.
///
/// `pubkey` is an identity reference: raw hex key, `npub1...`,
/// `nprofile1...` or any of these behind a `nostr:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonToFollow {
    pub pubkey: String,
}

/// Parses an unlock date string into a local calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM[:SS]` timestamps. Returns `None` for anything else.
pub fn parse_unlock_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|timestamp| timestamp.date())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

mod unlock_date_format {
    use super::parse_unlock_date;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_unlock_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid unlockDate `{raw}`")))
    }
}
