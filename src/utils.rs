//! Small helpers: output-directory validation and log-friendly truncation.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes with an ellipsis and byte
/// count appended, so a full page body never lands in the log stream. The
/// cut backs up to the nearest char boundary, so multi-byte text (most of
/// the configured sources) never splits a character.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the feed output directory exists and is writable.
///
/// Creates the directory if needed, then probes it with a throwaway file.
/// Runs before any fetch so a bad output path fails the process up front
/// instead of after scraping.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // create_dir_all succeeds on an existing read-only dir; only an actual
    // write catches that.
    let probe = Path::new(path).join(".write-probe");
    match stdfs::File::create(&probe) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
