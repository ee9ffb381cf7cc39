//! Entry point: wires CLI → feed client → decoder → table renderer.
//!
//! Reads the username and options, fetches one favorites feed, and prints
//! its table to stdout. Fetch and decode failures come back as typed
//! errors and are reported once here; nothing below prints on its own.

mod cli;
mod client;
mod error;
mod feed;
mod output;
mod table;

use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::client::HttpFeedSource;
use crate::table::RowLimit;

fn main() -> color_eyre::Result<()> {
    // Install color_eyre error/panic hooks for pretty backtraces.
    color_eyre::install()?;

    // Parse CLI arguments.
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never interleave with the table.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // A missing username is not a failure: show usage and exit 0.
    let Some(username) = cli.username() else {
        crate::cli::write_usage(&mut out)?;
        return Ok(());
    };

    let url = client::feed_url(&cli.base_url, username);
    let source = HttpFeedSource::new()?;
    let feed = client::load_feed(&source, &url)?;
    if feed.is_empty() {
        tracing::info!(url = %url, "feed has no items");
    }

    let color = output::color_enabled(cli.color);
    let limit = RowLimit::from_arg(cli.number);

    writeln!(out, "Feed URL: {url}\n")?;
    table::print_table(&mut out, &feed, limit, color)?;
    out.flush()?;

    Ok(())
}
