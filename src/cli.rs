//! Command-line interface definitions.
//!
//! The defaults reproduce the reference behavior: feeds land in `feeds/`,
//! each feed carries at most 10 chapters, and page fetches time out after
//! 10 seconds.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the feed generator.
///
/// # Examples
///
/// ```sh
/// # Scheduled run with the built-in registry
/// mangarss
///
/// # Custom registry and output location, all sources at once
/// mangarss --sources sources.yaml -o /srv/feeds --all
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the generated feed files
    #[arg(short, long, default_value = "feeds")]
    pub output_dir: String,

    /// Maximum number of chapters per feed
    #[arg(short = 'n', long, default_value_t = 10)]
    pub max_chapters: usize,

    /// Optional path to a YAML source registry, replacing the built-in one
    #[arg(short, long)]
    pub sources: Option<PathBuf>,

    /// Page fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Process every source regardless of its scheduled weekday
    #[arg(long)]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["mangarss"]);
        assert_eq!(cli.output_dir, "feeds");
        assert_eq!(cli.max_chapters, 10);
        assert_eq!(cli.timeout, 10);
        assert!(cli.sources.is_none());
        assert!(!cli.all);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["mangarss", "-o", "/tmp/feeds", "-n", "5"]);
        assert_eq!(cli.output_dir, "/tmp/feeds");
        assert_eq!(cli.max_chapters, 5);
    }

    #[test]
    fn test_cli_sources_and_all() {
        let cli = Cli::parse_from(["mangarss", "--sources", "sources.yaml", "--all"]);
        assert_eq!(cli.sources, Some(PathBuf::from("sources.yaml")));
        assert!(cli.all);
    }
}
