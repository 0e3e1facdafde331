//! Feed sources: HTTP, local file and in-memory text.

use crate::feed::FeedLoadError;
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use url::Url;

/// Query parameter carrying the cache-busting timestamp.
pub const CACHE_BUST_PARAM: &str = "t";

/// Raw feed document provider.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Short description used in log events.
    fn describe(&self) -> String;

    /// Fetches the raw JSON document in a single round trip.
    async fn fetch(&self) -> Result<String, FeedLoadError>;
}

/// Fetches the feed over HTTP.
///
/// Every request carries a fresh `t=<unix millis>` parameter so repeated loads
/// in one session see content updated mid-session.
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpFeedSource {
    pub fn new(url: &str) -> Result<Self, FeedLoadError> {
        Ok(Self {
            client: reqwest::Client::new(),
            url: Url::parse(url)?,
        })
    }

    /// Builds the request URL for one load.
    pub fn request_url(&self, unix_millis: i64) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair(CACHE_BUST_PARAM, &unix_millis.to_string());
        url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }

    async fn fetch(&self) -> Result<String, FeedLoadError> {
        let url = self.request_url(Utc::now().timestamp_millis());
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedLoadError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Reads the feed from a local JSON file.
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<String, FeedLoadError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// Serves a fixed document from memory.
pub struct StaticFeedSource {
    body: String,
}

impl StaticFeedSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch(&self) -> Result<String, FeedLoadError> {
        Ok(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpFeedSource, CACHE_BUST_PARAM};
    use crate::feed::FeedLoadError;

    #[test]
    fn request_url_appends_cache_bust_parameter() {
        let source = HttpFeedSource::new("https://advent.example/advent-data.json").unwrap();
        let url = source.request_url(1_733_011_200_000);
        assert_eq!(
            url.as_str(),
            "https://advent.example/advent-data.json?t=1733011200000"
        );
        assert_eq!(
            url.query_pairs().find(|(key, _)| key == CACHE_BUST_PARAM).map(|(_, v)| v.into_owned()),
            Some("1733011200000".to_string())
        );
    }

    #[test]
    fn request_url_keeps_existing_query() {
        let source = HttpFeedSource::new("https://advent.example/data.json?lang=en").unwrap();
        assert_eq!(
            source.request_url(5).as_str(),
            "https://advent.example/data.json?lang=en&t=5"
        );
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = HttpFeedSource::new("/advent-data.json").err().unwrap();
        assert!(matches!(err, FeedLoadError::InvalidUrl(_)));
    }
}
