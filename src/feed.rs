//! RSS 2.0 feed assembly and output.
//!
//! Chapters become `<item>`s in a channel whose description follows the
//! fixed `"Feed de {title}"` template existing subscribers expect. An empty
//! chapter list produces no channel at all, so a previously written feed
//! file is left untouched when a run comes up empty.

use crate::models::Chapter;
use rss::{Channel, ChannelBuilder, Item, ItemBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build an RSS 2.0 channel from extracted chapters.
///
/// Returns `None` when `chapters` is empty; the driver logs that outcome
/// and skips the file write. Each item carries the chapter title, its link
/// (possibly empty or relative, as found on the page), the observation time
/// as an RFC 2822 `pubDate`, and an empty description.
pub fn build_channel(chapters: &[Chapter], title: &str, link: &str) -> Option<Channel> {
    if chapters.is_empty() {
        return None;
    }

    let items: Vec<Item> = chapters
        .iter()
        .map(|chapter| {
            ItemBuilder::default()
                .title(chapter.title.clone())
                .link(chapter.link.clone())
                .pub_date(chapter.observed_at.to_rfc2822())
                .description(String::new())
                .build()
        })
        .collect();

    Some(
        ChannelBuilder::default()
            .title(title.to_string())
            .link(link.to_string())
            .description(format!("Feed de {title}"))
            .items(items)
            .build(),
    )
}

/// Serialize a channel and replace `{output_dir}/{name}.xml` with it.
///
/// The whole file is rewritten on every call; there is no incremental
/// append.
pub async fn write_feed(channel: &Channel, output_dir: &Path, name: &str) -> std::io::Result<PathBuf> {
    let path = output_dir.join(format!("{name}.xml"));
    let xml = to_xml(channel);
    tokio::fs::write(&path, xml).await?;
    debug!(path = %path.display(), "Wrote feed file");
    Ok(path)
}

fn to_xml(channel: &Channel) -> String {
    let body = channel.to_string();
    if body.starts_with("<?xml") {
        body
    } else {
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{body}")
    }
}
