//! Feed decoder: converts the favorites RSS document into `Bookmark` records.
//!
//! This module is the first stage after retrieval. It consumes the raw
//! response bytes and produces a `Feed`, the ordered record list consumed
//! by the table renderer.
//!
//! This module never touches the network or the terminal; `decode` is a
//! pure function of its input bytes.

use quick_xml::Reader;
use quick_xml::encoding::EncodingError;
use quick_xml::events::{BytesStart, Event};

use crate::error::DecodeError;

/// One favorited link.
///
/// Every field is always present: missing text decodes to `""` and a
/// missing or unreadable count decodes to `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmark {
    /// Page title as listed in the feed.
    pub title: String,
    /// Bookmarked URL (`<link>`).
    pub url: String,
    /// Account that added the bookmark (`<dc:creator>`).
    pub user: String,
    /// Number of users who bookmarked this URL (`<hatena:bookmarkcount>`).
    pub bookmark_count: u64,
}

/// Decoded feed in document order (most recent favorite first).
///
/// Immutable once decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    bookmarks: Vec<Bookmark>,
}

impl Feed {
    /// Wraps an already-ordered record list.
    pub fn new(bookmarks: Vec<Bookmark>) -> Self {
        Self { bookmarks }
    }

    /// All records in document order.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

/// Item child elements we extract, matched by local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Creator,
    BookmarkCount,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"creator" => Some(Field::Creator),
            b"bookmarkcount" => Some(Field::BookmarkCount),
            _ => None,
        }
    }
}

/// Element depth of each interesting level: root, item, field.
const ROOT_DEPTH: usize = 1;
const ITEM_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

/// Decoder state carried across reader events.
///
/// `open` mirrors the element stack by local name; its length is the
/// current depth. An item is only collected when it is a direct child of
/// the root, and a field only when it is a direct child of such an item.
#[derive(Default)]
struct FeedDecoder {
    open: Vec<Vec<u8>>,
    seen_root: bool,
    root_closed: bool,
    item: Option<Bookmark>,
    field: Option<Field>,
    text: String,
    bookmarks: Vec<Bookmark>,
}

impl FeedDecoder {
    fn start(&mut self, name: &[u8]) {
        match self.open.len() {
            0 => self.seen_root = true,
            ROOT_DEPTH if name == b"item" => self.item = Some(Bookmark::default()),
            ITEM_DEPTH if self.item.is_some() => {
                self.field = Field::from_local_name(name);
                self.text.clear();
            }
            _ => {}
        }
        self.open.push(name.to_vec());
    }

    fn end(&mut self) {
        let depth = self.open.len();
        self.open.pop();
        match depth {
            ROOT_DEPTH => self.root_closed = true,
            ITEM_DEPTH => {
                if let Some(item) = self.item.take() {
                    self.bookmarks.push(item);
                }
            }
            FIELD_DEPTH => {
                if let (Some(field), Some(item)) = (self.field.take(), self.item.as_mut()) {
                    apply_field(item, field, &self.text);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, content: &str) {
        if self.field.is_some() && self.open.len() == FIELD_DEPTH {
            self.text.push_str(content);
        }
    }

    fn finish(self) -> Result<Feed, DecodeError> {
        if let Some(name) = self.open.last() {
            return Err(DecodeError::Truncated(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }
        if !self.seen_root {
            return Err(DecodeError::NoRoot);
        }
        Ok(Feed::new(self.bookmarks))
    }
}

/// Stores collected field text on the record. A repeated field overwrites
/// the earlier value.
fn apply_field(item: &mut Bookmark, field: Field, text: &str) {
    match field {
        Field::Title => item.title = text.to_string(),
        Field::Link => item.url = text.to_string(),
        Field::Creator => item.user = text.to_string(),
        Field::BookmarkCount => item.bookmark_count = parse_count(text),
    }
}

/// Parses a bookmark count, treating anything unreadable as zero.
fn parse_count(text: &str) -> u64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        tracing::debug!(count = trimmed, "unparseable bookmark count, using 0");
        0
    })
}

fn syntax_error(reader: &Reader<&[u8]>, source: quick_xml::Error) -> DecodeError {
    DecodeError::Syntax {
        position: reader.buffer_position() as u64,
        source,
    }
}

/// Walks every attribute of a start tag so malformed ones (unquoted
/// values, duplicates, stray tokens) fail the document.
fn check_attributes(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<(), DecodeError> {
    for attr in start.attributes().with_checks(true) {
        attr.map_err(|err| syntax_error(reader, err.into()))?;
    }
    Ok(())
}

/// Decodes a favorites feed document into a `Feed`.
///
/// Items are the `item` children of the root element (RSS 1.0 layout).
/// Namespace prefixes are ignored, so `dc:creator` matches `creator`.
/// Unknown elements at any depth are skipped. The document must be
/// well-formed; any structural error yields a `DecodeError` and no records.
pub fn decode(bytes: &[u8]) -> Result<Feed, DecodeError> {
    let mut reader = Reader::from_reader(bytes);
    let mut decoder = FeedDecoder::default();
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| syntax_error(&reader, e))?;

        match event {
            Event::Start(e) => {
                check_attributes(&reader, &e)?;
                decoder.start(e.local_name().as_ref());
            }
            Event::Empty(e) => {
                check_attributes(&reader, &e)?;
                decoder.start(e.local_name().as_ref());
                decoder.end();
            }
            Event::End(_) => decoder.end(),
            Event::Text(e) => {
                let content = e.unescape().map_err(|err| syntax_error(&reader, err))?;
                decoder.text(&content);
            }
            Event::CData(e) => {
                let content = std::str::from_utf8(&e).map_err(|err| {
                    syntax_error(&reader, quick_xml::Error::Encoding(EncodingError::Utf8(err)))
                })?;
                decoder.text(content);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }

        if decoder.root_closed {
            break;
        }
        buf.clear();
    }

    let feed = decoder.finish()?;
    tracing::debug!(records = feed.len(), "decoded feed");
    Ok(feed)
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
