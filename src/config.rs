//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.beans-dashboard.toml` files.

use crate::dashboard::RenderOptions;
use crate::models::{Dimension, Mode};
use crate::report::ChartStyle;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".beans-dashboard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Page settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Chart settings.
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Input data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the sales CSV file.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/BeansDataset.csv")
}

/// Page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Page rendered when no --mode is given.
    #[serde(default)]
    pub mode: Mode,

    /// Grouping dimensions used when no --dimensions is given.
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<Dimension>,

    /// Rows shown by the peek page.
    #[serde(default = "default_peek_rows")]
    pub peek_rows: usize,

    /// Rows shown by the analysis page.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            dimensions: default_dimensions(),
            peek_rows: default_peek_rows(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_dimensions() -> Vec<Dimension> {
    vec![Dimension::Channel, Dimension::Region]
}

fn default_peek_rows() -> usize {
    10
}

fn default_preview_rows() -> usize {
    5
}

/// Chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Length of the longest bar, in characters.
    #[serde(default = "default_chart_width")]
    pub width: usize,

    /// Character bars are drawn with.
    #[serde(default = "default_bar")]
    pub bar: char,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            bar: default_bar(),
        }
    }
}

fn default_chart_width() -> usize {
    40
}

fn default_bar() -> char {
    '█'
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.beans-dashboard.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref path) = args.data {
            self.data.path = path.clone();
        }

        if let Some(mode) = args.mode {
            self.dashboard.mode = mode;
        }

        if args.no_dimensions {
            self.dashboard.dimensions.clear();
        } else if let Some(ref dimensions) = args.dimensions {
            self.dashboard.dimensions = dimensions.clone();
        }

        if let Some(width) = args.chart_width {
            self.chart.width = width;
        }
    }

    /// Check the merged settings before rendering.
    pub fn validate(&self) -> Result<()> {
        if self.chart.width == 0 {
            bail!("[chart] width must be at least 1");
        }
        Ok(())
    }

    /// Row limits for the renderer.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            peek_rows: self.dashboard.peek_rows,
            preview_rows: self.dashboard.preview_rows,
        }
    }

    /// Bar style for the text charts.
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            width: self.chart.width,
            bar: self.chart.bar,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
