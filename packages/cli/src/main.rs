#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the daily police blotter scraper.
//!
//! Fetches the campus police department's daily report page, extracts every
//! incident, exports the batch to CSV, and posts a narrative per incident to
//! Slack. `--dry-run` prints the messages instead of delivering them.

mod config;

use std::path::PathBuf;
use std::time::Instant;

use blotter_export::CsvExporter;
use blotter_extract::pipeline::{self, BatchOptions, NotificationSink, Sinks};
use blotter_fetch::{PostbackSource, ReportSource};
use blotter_notify::console::ConsoleSink;
use blotter_notify::slack::SlackSink;
use blotter_notify::status::StatusSink;
use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "blotter", about = "Daily police blotter scraper")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "blotter.toml")]
    config: PathBuf,

    /// Day to scrape, as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Extract and render, but print messages instead of posting them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    let source = PostbackSource::new(&config.source.url)?;
    let page = source.fetch_day(date).await?;

    let mut exporter = CsvExporter::create(&config.export.path)?;

    let console = ConsoleSink;
    let slack;
    let notifications: &dyn NotificationSink = if cli.dry_run {
        &console
    } else {
        slack = SlackSink::new(&config.notify.resolve_token()?)?;
        &slack
    };

    let status;
    let broadcast: Option<&dyn NotificationSink> = match (&config.broadcast, cli.dry_run) {
        (Some(feed), false) => {
            status = StatusSink::new(&feed.url, &feed.token)?;
            Some(&status)
        }
        (Some(_), true) => Some(&console),
        (None, _) => None,
    };

    let options = BatchOptions {
        channel: config.notify.channel,
        broadcast_destination: config.broadcast.map(|feed| feed.destination),
        on_error: config.pipeline.on_error,
    };

    let mut sinks = Sinks {
        rows: &mut exporter,
        notifications,
        broadcast,
    };

    let start = Instant::now();
    let processed = pipeline::run(&page, &mut sinks, &options).await?;
    log::info!(
        "{} incident(s) for {date} exported to {} in {:.1}s",
        processed.len(),
        config.export.path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
