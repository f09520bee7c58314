//! Data models for scrape sources and extracted chapters.
//!
//! This module defines the two core structures of the pipeline:
//! - [`SourceConfig`]: one configured manga-listing page, including its
//!   weekly schedule and the CSS selectors used to pick chapters out of it
//! - [`Chapter`]: one extracted chapter entry, produced per run and never
//!   persisted
//!
//! `SourceConfig` derives serde traits so a registry can be loaded from a
//! YAML file instead of the built-in list (see [`crate::sources`]).

use chrono::{DateTime, Local, Weekday};
use serde::{Deserialize, Serialize};

/// Configuration for a single manga-listing page.
///
/// Constructed once at startup, either from the built-in registry or from a
/// YAML registry file, and never mutated afterwards. The driver passes the
/// registry explicitly; there is no mutable global.
///
/// # Scheduling
///
/// Each source runs on exactly one weekday. The day is held as a
/// [`chrono::Weekday`] and compared against `Local::now().weekday()`, so the
/// convention is chrono's Monday-first week.
///
/// # Selectors
///
/// `list_selector` locates each chapter-list entry in the page.
/// `title_selector` is applied *within* one entry's subtree to find the
/// chapter title. The chapter link is always the first `<a>` descendant of
/// the entry, independent of any selector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Unique identifier; used as the output filename stem (`feeds/{name}.xml`).
    pub name: String,
    /// Human-readable feed title.
    pub title: String,
    /// The listing page to fetch.
    pub url: String,
    /// Weekday on which this source is processed.
    pub schedule: Weekday,
    /// CSS selector matching each chapter-list entry.
    pub list_selector: String,
    /// CSS selector for the title element, relative to one entry.
    pub title_selector: String,
    /// Drop the first matched entry. Some sites pin a "featured" chapter
    /// above the chronological list.
    #[serde(default)]
    pub skip_first: bool,
}

/// One extracted chapter entry.
///
/// Transient: built during a run, serialized into the feed, and discarded.
/// There is no memory of prior runs, so a chapter that drops off the source
/// page also drops out of the next feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Chapter title, trimmed of surrounding whitespace.
    pub title: String,
    /// The chapter hyperlink as found on the page. May be relative or
    /// absolute; it is neither validated nor resolved. Empty when the
    /// anchor carried no `href` attribute.
    pub link: String,
    /// When this run observed the chapter. The source pages expose no
    /// publish date in the extracted fields, so this is scrape time, not
    /// release time.
    pub observed_at: DateTime<Local>,
}
