//! Error types for the fetch → decode pipeline.
//!
//! - `FetchError`: the feed could not be retrieved
//! - `DecodeError`: the retrieved bytes are not a well-formed XML document
//! - `FeedError`: either of the above, as returned by `client::load_feed`
//!
//! A missing username is not an error; `main` prints usage and exits cleanly.

use thiserror::Error;

/// Errors raised while retrieving the raw feed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed (TLS backend, etc.).
    #[error("could not initialise HTTP client")]
    Client(#[source] reqwest::Error),

    /// Connection, TLS, or body-read failure.
    #[error("request to {url} failed")]
    Transport {
        /// URL that was requested
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{url} responded with HTTP {status}")]
    Status {
        /// URL that was requested
        url: String,
        /// Numeric HTTP status code
        status: u16,
    },
}

/// Errors raised while decoding the feed document.
///
/// Decoding is all-or-nothing: any of these means no records were produced.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The XML reader rejected the input.
    #[error("malformed XML at byte {position}")]
    Syntax {
        /// Byte offset the reader had reached
        position: u64,
        /// Reader error
        #[source]
        source: quick_xml::Error,
    },

    /// Input ended while elements were still open.
    #[error("document ended inside <{0}>")]
    Truncated(String),

    /// Input contained no root element (including empty input).
    #[error("document has no root element")]
    NoRoot,
}

/// Outcome of `load_feed` when it does not produce a feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Retrieval failed.
    #[error("could not fetch feed")]
    Fetch(#[from] FetchError),

    /// Retrieval succeeded but the payload is not a valid feed document.
    #[error("could not decode feed")]
    Decode(#[from] DecodeError),
}
