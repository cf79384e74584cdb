//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{Dimension, Mode};
use clap::Parser;
use std::path::PathBuf;

/// beans-dashboard - Beans & Pods sales dashboard
///
/// Loads the sales dataset, aggregates it by product, channel, and region,
/// and renders one dashboard page with bar charts and recommendations.
///
/// Examples:
///   beans-dashboard
///   beans-dashboard --mode peek
///   beans-dashboard --mode visualisation --dimensions region
///   beans-dashboard --data sales.csv --format markdown -o report.md
///   beans-dashboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Sales CSV file to load
    ///
    /// Defaults to the config file setting, else data/BeansDataset.csv.
    #[arg(short, long, value_name = "FILE", env = "BEANS_DATA")]
    pub data: Option<PathBuf>,

    /// Dashboard page to render
    ///
    /// Values: home, analysis, peek, visualisation
    /// (or accueil, analyse-des-ventes, peek-at-the-data).
    #[arg(short, long, value_name = "MODE", ignore_case = true)]
    pub mode: Option<Mode>,

    /// Grouping dimensions (comma-separated)
    ///
    /// Example: --dimensions channel,region
    #[arg(
        long,
        value_name = "DIMS",
        value_delimiter = ',',
        ignore_case = true,
        conflicts_with = "no_dimensions"
    )]
    pub dimensions: Option<Vec<Dimension>>,

    /// Aggregate by product only
    #[arg(long)]
    pub no_dimensions: bool,

    /// Output format (terminal, markdown, json)
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the page to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Length of the longest chart bar, in characters
    #[arg(long, value_name = "COLS")]
    pub chart_width: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .beans-dashboard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .beans-dashboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with bar charts (default)
    #[default]
    Terminal,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.chart_width == Some(0) {
            return Err("Chart width must be at least 1".to_string());
        }

        if let Some(ref data) = self.data {
            if data.is_dir() {
                return Err(format!("Data path is a directory: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: Some(PathBuf::from("data/BeansDataset.csv")),
            mode: None,
            dimensions: None,
            no_dimensions: false,
            format: OutputFormat::Terminal,
            output: None,
            chart_width: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_mode_and_dimension_aliases() {
        let args = Args::parse_from([
            "beans-dashboard",
            "--mode",
            "accueil",
            "--dimensions",
            "canal,région",
        ]);
        assert_eq!(args.mode, Some(Mode::Home));
        assert_eq!(
            args.dimensions,
            Some(vec![Dimension::Channel, Dimension::Region])
        );

        let args = Args::parse_from(["beans-dashboard", "-m", "analyse-des-ventes"]);
        assert_eq!(args.mode, Some(Mode::Analysis));
    }

    #[test]
    fn test_parse_labels_ignore_case() {
        let args = Args::parse_from([
            "beans-dashboard",
            "--mode",
            "Accueil",
            "--dimensions",
            "Canal,REGION",
        ]);
        assert_eq!(args.mode, Some(Mode::Home));
        assert_eq!(
            args.dimensions,
            Some(vec![Dimension::Channel, Dimension::Region])
        );

        let args = Args::parse_from(["beans-dashboard", "-m", "Visualisation"]);
        assert_eq!(args.mode, Some(Mode::Visualisation));
    }

    #[test]
    fn test_dimensions_conflict_with_no_dimensions() {
        let result = Args::try_parse_from([
            "beans-dashboard",
            "--dimensions",
            "channel",
            "--no-dimensions",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_chart_width() {
        let mut args = make_args();
        args.chart_width = Some(0);
        assert!(args.validate().is_err());

        args.chart_width = Some(1);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = make_args();
        args.data = Some(dir.path().to_path_buf());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
