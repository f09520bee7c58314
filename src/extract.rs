//! Chapter extraction from a fetched listing page.
//!
//! This is the one piece of the pipeline with real decision logic. Given a
//! page and a source's selector configuration it produces the ordered list
//! of chapters that will become feed items:
//!
//! 1. Parse the HTML leniently; malformed markup degrades the match set but
//!    never fails the extraction.
//! 2. Select every element matching `list_selector`, in document order.
//! 3. Apply the skip/cap window: optionally drop the first entry
//!    (`skip_first`), then take at most `max_chapters` of what remains.
//! 4. Within the window, resolve each entry's title (`title_selector` in
//!    the entry subtree) and link (first `<a>` descendant). An entry
//!    missing either is dropped silently and counted in
//!    [`Extraction::missing_title`] / [`Extraction::missing_link`].
//!
//! The window in step 3 is computed BEFORE the per-entry filtering in
//! step 4. A page with broken entries near the top of its list therefore
//! yields fewer chapters rather than pulling usable entries in from beyond
//! the window. Changing that would change observable feed contents, so it
//! stays.

use crate::models::{Chapter, SourceConfig};
use chrono::Local;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::debug;

// The link lookup is selector-independent: always the first anchor in the
// entry subtree.
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// A selector string in the source configuration failed to parse.
///
/// Malformed HTML is never an error; this only fires for a bad
/// `list_selector` or `title_selector`, which is a configuration bug.
#[derive(Debug, Error)]
#[error("invalid selector `{selector}`: {message}")]
pub struct ExtractError {
    pub selector: String,
    pub message: String,
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// The result of one extraction call.
///
/// The drop counters exist so callers and tests can observe how many
/// windowed entries were discarded, and why, without affecting the output
/// sequence itself.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Extracted chapters, in document order.
    pub chapters: Vec<Chapter>,
    /// Windowed entries dropped because `title_selector` matched nothing.
    pub missing_title: usize,
    /// Windowed entries dropped because they contained no anchor at all.
    pub missing_link: usize,
}

/// Extract up to `max_chapters` chapters from a listing page.
///
/// Returns chapters in document order, after `skip_first` slicing and the
/// `max_chapters` cap. Each chapter records the trimmed title text, the
/// first anchor's `href` (empty string when the attribute is absent), and
/// the current wall-clock time as its observation timestamp.
pub fn extract_chapters(
    html: &str,
    cfg: &SourceConfig,
    max_chapters: usize,
) -> Result<Extraction, ExtractError> {
    let document = Html::parse_document(html);
    let list_selector = parse_selector(&cfg.list_selector)?;
    let title_selector = parse_selector(&cfg.title_selector)?;

    let bias = cfg.skip_first as usize;
    let mut extraction = Extraction::default();

    for entry in document.select(&list_selector).skip(bias).take(max_chapters) {
        let Some(title_el) = entry.select(&title_selector).next() else {
            extraction.missing_title += 1;
            continue;
        };
        let Some(link_el) = entry.select(&ANCHOR_SELECTOR).next() else {
            extraction.missing_link += 1;
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        let link = link_el.value().attr("href").unwrap_or_default().to_string();
        extraction.chapters.push(Chapter {
            title,
            link,
            observed_at: Local::now(),
        });
    }

    debug!(
        source = %cfg.name,
        chapters = extraction.chapters.len(),
        missing_title = extraction.missing_title,
        missing_link = extraction.missing_link,
        "Extracted chapters"
    );
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn item_source(skip_first: bool) -> SourceConfig {
        SourceConfig {
            name: "test".to_string(),
            title: "Test Manga".to_string(),
            url: "https://example.com/".to_string(),
            schedule: Weekday::Wed,
            list_selector: ".item".to_string(),
            title_selector: "span".to_string(),
            skip_first,
        }
    }

    fn entry(title: &str, href: Option<&str>) -> String {
        match href {
            Some(href) => format!(
                r#"<div class="item"><span>{title}</span><a href="{href}">read</a></div>"#
            ),
            None => format!(r#"<div class="item"><span>{title}</span><a>read</a></div>"#),
        }
    }

    fn page(entries: &[String]) -> String {
        format!("<html><body>{}</body></html>", entries.join("\n"))
    }

    #[test]
    fn test_extracts_in_document_order() {
        let html = page(&[
            entry("Chapter 3", Some("/ch/3")),
            entry("Chapter 2", Some("/ch/2")),
            entry("Chapter 1", Some("/ch/1")),
        ]);

        let extraction = extract_chapters(&html, &item_source(false), 10).unwrap();
        let titles: Vec<&str> = extraction
            .chapters
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, ["Chapter 3", "Chapter 2", "Chapter 1"]);
        assert_eq!(extraction.chapters[0].link, "/ch/3");
    }

    #[test]
    fn test_caps_at_max_chapters() {
        let entries: Vec<String> = (1..=8)
            .map(|n| entry(&format!("Chapter {n}"), Some(&format!("/ch/{n}"))))
            .collect();
        let html = page(&entries);

        let extraction = extract_chapters(&html, &item_source(false), 3).unwrap();
        assert_eq!(extraction.chapters.len(), 3);
        assert_eq!(extraction.chapters[2].title, "Chapter 3");
    }

    #[test]
    fn test_skip_first_drops_pinned_entry() {
        let html = page(&[
            entry("Featured", Some("/featured")),
            entry("Chapter 2", Some("/ch/2")),
            entry("Chapter 1", Some("/ch/1")),
        ]);

        let extraction = extract_chapters(&html, &item_source(true), 10).unwrap();
        let titles: Vec<&str> = extraction
            .chapters
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, ["Chapter 2", "Chapter 1"]);
    }

    #[test]
    fn test_skip_first_with_nothing_left_returns_empty() {
        let html = page(&[entry("Featured", Some("/featured"))]);
        let extraction = extract_chapters(&html, &item_source(true), 10).unwrap();
        assert!(extraction.chapters.is_empty());
    }

    #[test]
    fn test_missing_title_skips_entry_but_not_later_ones() {
        let html = page(&[
            entry("Chapter 3", Some("/ch/3")),
            r#"<div class="item"><a href="/ch/2">no title here</a></div>"#.to_string(),
            entry("Chapter 1", Some("/ch/1")),
        ]);

        let extraction = extract_chapters(&html, &item_source(false), 10).unwrap();
        let titles: Vec<&str> = extraction
            .chapters
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, ["Chapter 3", "Chapter 1"]);
        assert_eq!(extraction.missing_title, 1);
        assert_eq!(extraction.missing_link, 0);
    }

    #[test]
    fn test_missing_anchor_skips_entry() {
        let html = page(&[
            r#"<div class="item"><span>Chapter 2</span></div>"#.to_string(),
            entry("Chapter 1", Some("/ch/1")),
        ]);

        let extraction = extract_chapters(&html, &item_source(false), 10).unwrap();
        assert_eq!(extraction.chapters.len(), 1);
        assert_eq!(extraction.chapters[0].title, "Chapter 1");
        assert_eq!(extraction.missing_link, 1);
    }

    #[test]
    fn test_window_is_cut_before_filtering() {
        // Two broken entries inside a window of 3: the yield shrinks to 1,
        // usable entries beyond the window are NOT pulled in.
        let html = page(&[
            r#"<div class="item"><a href="/ch/5">broken</a></div>"#.to_string(),
            r#"<div class="item"><a href="/ch/4">broken</a></div>"#.to_string(),
            entry("Chapter 3", Some("/ch/3")),
            entry("Chapter 2", Some("/ch/2")),
            entry("Chapter 1", Some("/ch/1")),
        ]);

        let extraction = extract_chapters(&html, &item_source(false), 3).unwrap();
        assert_eq!(extraction.chapters.len(), 1);
        assert_eq!(extraction.chapters[0].title, "Chapter 3");
        assert_eq!(extraction.missing_title, 2);
    }

    #[test]
    fn test_href_absent_yields_empty_link() {
        let html = page(&[entry("Chapter 1", None)]);
        let extraction = extract_chapters(&html, &item_source(false), 10).unwrap();
        assert_eq!(extraction.chapters.len(), 1);
        assert_eq!(extraction.chapters[0].link, "");
    }

    #[test]
    fn test_title_text_is_trimmed() {
        let html = page(&[
            r#"<div class="item"><span>  Chapter 9  </span><a href="/ch/9">go</a></div>"#
                .to_string(),
        ]);
        let extraction = extract_chapters(&html, &item_source(false), 10).unwrap();
        assert_eq!(extraction.chapters[0].title, "Chapter 9");
    }

    #[test]
    fn test_malformed_html_degrades_instead_of_failing() {
        let html = r#"<div class="item"><span>Chapter 1<a href="/ch/1">go"#;
        let extraction = extract_chapters(html, &item_source(false), 10).unwrap();
        // Lenient parsing still finds the entry.
        assert_eq!(extraction.chapters.len(), 1);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let mut cfg = item_source(false);
        cfg.list_selector = ":::".to_string();
        let err = extract_chapters("<html></html>", &cfg, 10).unwrap_err();
        assert!(err.to_string().contains(":::"));
    }

    // The full scenario: five entries, skip_first on, the first entry's
    // anchor has no href. Entry one falls to skip_first before its missing
    // href could matter, so all four survivors carry real links.
    #[test]
    fn test_skip_first_consumes_entry_before_href_check() {
        let html = page(&[
            entry("Pinned", None),
            entry("Chapter 4", Some("/ch/4")),
            entry("Chapter 3", Some("/ch/3")),
            entry("Chapter 2", Some("/ch/2")),
            entry("Chapter 1", Some("/ch/1")),
        ]);

        let extraction = extract_chapters(&html, &item_source(true), 10).unwrap();
        assert_eq!(extraction.chapters.len(), 4);
        assert!(extraction.chapters.iter().all(|c| !c.link.is_empty()));
        assert_eq!(extraction.missing_link, 0);
    }
}
