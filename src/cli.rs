//! CLI argument definition for hbfav.
//!
//! Only argument shapes live here; turning the parsed values into a row
//! limit or a color decision happens in `table` and `output`.

use std::io::{self, Write};

use clap::{Parser, ValueEnum};

/// Usage line printed when no username is given.
pub const USAGE: &str = "hbfav username";

/// Writes the usage line, propagating write errors such as a closed pipe.
pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{USAGE}")
}

/// Hatena Bookmark favorites viewer.
#[derive(Parser, Debug)]
#[command(name = "hbfav", version, about = "Show a Hatena Bookmark user's favorites")]
pub struct Cli {
    /// Hatena ID whose favorites feed to show.
    pub username: Option<String>,

    /// The number of bookmarks to show (-1 shows all).
    #[arg(short, long, allow_negative_numbers = true)]
    pub number: Option<i64>,

    /// When to highlight columns with ANSI colors.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Service root the feed URL is built under.
    #[arg(long, env = "HBFAV_BASE_URL", default_value = crate::client::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log level for diagnostics on stderr (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// The requested username, treating an empty argument as absent.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }
}

/// `--color` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    Auto,
    Always,
    Never,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
