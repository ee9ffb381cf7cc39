//! Feed client: builds the favorites feed URL and retrieves its bytes.
//!
//! Retrieval sits behind the `FeedSource` trait so the rest of the
//! pipeline never depends on `reqwest` directly. Tests substitute an
//! in-memory source.

use reqwest::blocking::Client;
use url::form_urlencoded;

use crate::error::{FeedError, FetchError};
use crate::feed::{self, Feed};

/// Service root used when `--base-url` is not given.
pub const DEFAULT_BASE_URL: &str = "http://b.hatena.ne.jp";

/// Builds the favorites feed URL for `username` under `base_url`.
///
/// The username is query-escaped (space becomes `+`, `/` becomes `%2F`)
/// so it always stays a single path segment.
pub fn feed_url(base_url: &str, username: &str) -> String {
    let user: String = form_urlencoded::byte_serialize(username.as_bytes()).collect();
    format!("{}/{}/favorite.rss", base_url.trim_end_matches('/'), user)
}

/// Something that can return the raw bytes behind a feed URL.
pub trait FeedSource {
    /// Performs exactly one retrieval of `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP source. One GET per call, no retries, transport defaults
/// for timeouts and redirects.
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("hbfav/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        tracing::debug!(url, "fetching feed");
        // The connection is released when `response` drops, including on
        // the early returns below.
        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(transport)?;
        tracing::debug!(url, bytes = body.len(), "feed retrieved");
        Ok(body.to_vec())
    }
}

/// Fetches and decodes the feed at `url`.
///
/// The error variant records which stage failed.
pub fn load_feed<S: FeedSource + ?Sized>(source: &S, url: &str) -> Result<Feed, FeedError> {
    let bytes = source.fetch(url)?;
    Ok(feed::decode(&bytes)?)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
