//! Table renderer: lays bookmark records out as aligned, styled rows.
//!
//! Column widths are measured in terminal cells with `unicode-width`, not
//! in chars, so titles mixing ASCII and East-Asian wide glyphs still line
//! up. The renderer builds ratatui `Line`s; `output` decides whether their
//! styles become ANSI escapes or are dropped.
//!
//! Layout, for widths `t`, `u`, `s`, `c`:
//!
//! ```text
//!  Title | URL | User | Bookmark |
//! ---------------------------------   (t + u + s + c + RULE_PADDING dashes)
//!  title | url | user | count
//! ```

use std::io::{self, Write};

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::feed::{Bookmark, Feed};
use crate::output;

/// Column labels, in display order.
pub const HEADERS: [&str; 4] = ["Title", "URL", "User", "Bookmark"];

const DELIMITER: &str = " | ";

/// Dashes added to the summed column widths when drawing the rule under
/// the header. Accounts for the delimiters and edge padding.
pub const RULE_PADDING: usize = 18;

/// How many leading records to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowLimit {
    /// Show every record.
    #[default]
    All,
    /// Show at most this many leading records.
    First(usize),
}

impl RowLimit {
    /// Maps the `--number` option onto a limit.
    ///
    /// Absent and `-1` mean "all"; other negative values show nothing.
    pub fn from_arg(number: Option<i64>) -> Self {
        match number {
            None | Some(-1) => RowLimit::All,
            Some(n) => RowLimit::First(usize::try_from(n).unwrap_or(0)),
        }
    }

    /// Number of rows to show out of `available`, clamped to `[0, available]`.
    pub fn resolve(self, available: usize) -> usize {
        match self {
            RowLimit::All => available,
            RowLimit::First(n) => n.min(available),
        }
    }
}

/// Display width of each column, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnWidths {
    pub title: usize,
    pub url: usize,
    pub user: usize,
    pub bookmark_count: usize,
}

impl ColumnWidths {
    /// Measures the widest cell of each column across `rows`.
    ///
    /// Header labels do not take part; an empty slice measures all zeros.
    pub fn measure(rows: &[Bookmark]) -> Self {
        rows.iter().fold(Self::default(), |acc, b| Self {
            title: acc.title.max(b.title.width()),
            url: acc.url.max(b.url.width()),
            user: acc.user.max(b.user.width()),
            bookmark_count: acc.bookmark_count.max(count_text(b).width()),
        })
    }

    /// Length of the separator rule.
    pub fn rule_len(&self) -> usize {
        self.title + self.url + self.user + self.bookmark_count + RULE_PADDING
    }
}

/// Highlight styles applied to table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title_header: Style,
    pub url_header: Style,
    pub title: Style,
    pub bookmark_count: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            title_header: Style::default().fg(Color::Blue),
            url_header: Style::default().fg(Color::Cyan),
            title: Style::default().fg(Color::Green),
            bookmark_count: Style::default().fg(Color::Cyan),
        }
    }
}

/// The shown prefix of a feed together with its measured column widths.
pub struct Table<'a> {
    rows: &'a [Bookmark],
    widths: ColumnWidths,
}

impl<'a> Table<'a> {
    /// Selects the leading records allowed by `limit` and measures them.
    pub fn new(feed: &'a Feed, limit: RowLimit) -> Self {
        let shown = limit.resolve(feed.len());
        let rows = &feed.bookmarks()[..shown];
        Self {
            rows,
            widths: ColumnWidths::measure(rows),
        }
    }

    /// Records that will be rendered, in feed order.
    pub fn rows(&self) -> &'a [Bookmark] {
        self.rows
    }

    pub fn widths(&self) -> ColumnWidths {
        self.widths
    }

    /// Header, rule, then one line per shown record.
    pub fn lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.header(palette));
        lines.push(Line::from("-".repeat(self.widths.rule_len())));
        lines.extend(self.rows.iter().map(|b| self.row(b, palette)));
        lines
    }

    fn header(&self, palette: &Palette) -> Line<'static> {
        let w = &self.widths;
        Line::from(vec![
            Span::raw(" "),
            Span::styled(fill_right(HEADERS[0], w.title), palette.title_header),
            Span::raw(DELIMITER),
            Span::styled(fill_right(HEADERS[1], w.url), palette.url_header),
            Span::raw(DELIMITER),
            Span::raw(fill_right(HEADERS[2], w.user)),
            Span::raw(DELIMITER),
            Span::raw(fill_right(HEADERS[3], w.bookmark_count)),
            Span::raw(DELIMITER),
        ])
    }

    fn row(&self, bookmark: &Bookmark, palette: &Palette) -> Line<'static> {
        let w = &self.widths;
        Line::from(vec![
            Span::raw(" "),
            Span::styled(fill_right(&bookmark.title, w.title), palette.title),
            Span::raw(DELIMITER),
            Span::raw(fill_right(&bookmark.url, w.url)),
            Span::raw(DELIMITER),
            Span::raw(fill_right(&bookmark.user, w.user)),
            Span::raw(DELIMITER),
            Span::styled(
                fill_left(&count_text(bookmark), w.bookmark_count),
                palette.bookmark_count,
            ),
            Span::raw(" "),
        ])
    }
}

fn count_text(bookmark: &Bookmark) -> String {
    bookmark.bookmark_count.to_string()
}

/// Pads `text` with trailing spaces up to `width` cells. Wider text is
/// returned unchanged.
pub fn fill_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

/// Pads `text` with leading spaces up to `width` cells.
pub fn fill_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{text}", " ".repeat(pad))
}

/// Renders `feed` as text lines, with ANSI highlighting when `color` is set.
///
/// Spacing is identical with and without color.
pub fn render(feed: &Feed, limit: RowLimit, color: bool) -> Vec<String> {
    let table = Table::new(feed, limit);
    tracing::debug!(
        shown = table.rows().len(),
        total = feed.len(),
        widths = ?table.widths(),
        "rendering table"
    );
    table
        .lines(&Palette::default())
        .iter()
        .map(|line| output::line_to_string(line, color))
        .collect()
}

/// Writes the rendered table to `out`, one line per record plus header
/// and rule.
pub fn print_table<W: Write>(
    out: &mut W,
    feed: &Feed,
    limit: RowLimit,
    color: bool,
) -> io::Result<()> {
    for line in render(feed, limit, color) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
