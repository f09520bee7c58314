//! # mangarss
//!
//! Generates RSS 2.0 chapter feeds for manga sites that publish no feed of
//! their own. Each configured source is fetched on its scheduled weekday,
//! its newest chapter entries are extracted with CSS selectors, and a feed
//! file is written to `feeds/{name}.xml` for readers to subscribe to.
//!
//! ## Pipeline
//!
//! For every source due today, strictly in sequence:
//! 1. **Fetch**: one GET with a bounded timeout
//! 2. **Extract**: select list entries, apply skip/cap window, pull
//!    title + link per entry
//! 3. **Build**: assemble the RSS 2.0 channel (skipped when no chapters
//!    were found, leaving any previous feed file in place)
//! 4. **Write**: replace the source's feed file
//!
//! A source failing at any step never stops the remaining sources. There is
//! no state between runs: every run rebuilds its feeds from whatever the
//! pages show at that moment.
//!
//! ## Usage
//!
//! ```sh
//! mangarss                          # scheduled run, built-in registry
//! mangarss --all -o /srv/feeds      # every source, custom output dir
//! ```

use chrono::{Datelike, Local, Weekday};
use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod extract;
mod feed;
mod fetch;
mod models;
mod sources;
mod utils;

use cli::Cli;
use models::SourceConfig;
use utils::{ensure_writable_dir, truncate_for_log};

/// Select the sources scheduled for `today`.
///
/// Pure function of its inputs: the same registry and day always select the
/// same sources, in registry order.
fn due_today<'a>(registry: &'a [SourceConfig], today: Weekday) -> Vec<&'a SourceConfig> {
    registry.iter().filter(|cfg| cfg.schedule == today).collect()
}

/// Run the fetch → extract → build → write pipeline for one source.
///
/// Every failure is terminal for this source only: fetch and selector
/// errors degrade to zero chapters, zero chapters skips the file write, and
/// a write error is logged. Nothing here aborts the run.
async fn process_source(
    client: &Client,
    cfg: &SourceConfig,
    output_dir: &Path,
    max_chapters: usize,
) {
    let chapters = match fetch::fetch_page(client, &cfg.url).await {
        Ok(html) => {
            debug!(source = %cfg.name, preview = %truncate_for_log(&html, 200), "Listing page body");
            match extract::extract_chapters(&html, cfg, max_chapters) {
                Ok(extraction) => {
                    if extraction.missing_title + extraction.missing_link > 0 {
                        debug!(
                            source = %cfg.name,
                            missing_title = extraction.missing_title,
                            missing_link = extraction.missing_link,
                            "Dropped entries with missing elements"
                        );
                    }
                    extraction.chapters
                }
                Err(e) => {
                    error!(source = %cfg.name, error = %e, "Bad selector in source config");
                    Vec::new()
                }
            }
        }
        Err(e) => {
            error!(source = %cfg.name, error = %e, "Failed to fetch source page");
            Vec::new()
        }
    };

    match feed::build_channel(&chapters, &cfg.title, &cfg.url) {
        Some(channel) => match feed::write_feed(&channel, output_dir, &cfg.name).await {
            Ok(path) => {
                info!(
                    source = %cfg.name,
                    path = %path.display(),
                    chapters = chapters.len(),
                    "Updated feed"
                );
            }
            Err(e) => {
                error!(source = %cfg.name, error = %e, "Failed to write feed file");
            }
        },
        None => {
            warn!(source = %cfg.name, title = %cfg.title, "No chapters found");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("mangarss starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let registry = match &args.sources {
        Some(path) => sources::load_registry(path)?,
        None => sources::builtin_registry(),
    };

    // Early check: fail before any fetch if feeds can't be written.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Feed output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = fetch::build_client(Duration::from_secs(args.timeout))?;

    let today = Local::now().weekday();
    let due = if args.all {
        registry.iter().collect::<Vec<_>>()
    } else {
        due_today(&registry, today)
    };
    info!(
        %today,
        due = due.len(),
        total = registry.len(),
        all = args.all,
        "Selected sources for this run"
    );

    let output_dir = Path::new(&args.output_dir);
    for cfg in due {
        process_source(&client, cfg, output_dir, args.max_chapters).await;
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");

    Ok(())
}
