//! Waterflow feed viewer - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Waterflow - browse a blog feed as a masonry grid in the terminal
#[derive(Parser, Debug)]
#[command(name = "waterflow")]
#[command(version)]
#[command(about = "Browse a JSON blog feed as a waterfall card grid")]
pub struct Args {
    /// Path to the JSON feed document
    pub file: PathBuf,

    /// Number of columns (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: Option<u32>,

    /// Cards revealed per page (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR so every style lookup sees the flag
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = waterflow::config::resolve(
        args.config.clone(),
        args.columns.map(|c| c as usize),
        args.page_size.map(|p| p as usize),
    )?;

    if let Err(err) = waterflow::logging::init(&config.log_file_path) {
        eprintln!("warning: logging disabled: {err}");
    }

    info!(config = ?config, "Configuration loaded and resolved");

    waterflow::view::run(&config, args.file)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_does_not_error() {
        let err = Args::try_parse_from(["waterflow", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn feed_file_is_required() {
        let err = Args::try_parse_from(["waterflow"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn defaults_leave_overrides_unset() {
        let args = Args::parse_from(["waterflow", "feed.json"]);
        assert_eq!(args.file, PathBuf::from("feed.json"));
        assert_eq!(args.columns, None);
        assert_eq!(args.page_size, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn column_and_page_size_flags() {
        let args = Args::parse_from(["waterflow", "-c", "3", "--page-size", "10", "feed.json"]);
        assert_eq!(args.columns, Some(3));
        assert_eq!(args.page_size, Some(10));
    }

    #[test]
    fn zero_columns_is_rejected() {
        let err = Args::try_parse_from(["waterflow", "--columns", "0", "feed.json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn config_flag_takes_path() {
        let args = Args::parse_from(["waterflow", "--config", "/tmp/wf.toml", "feed.json"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/wf.toml")));
    }
}
