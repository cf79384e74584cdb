//! beans-dashboard - Beans & Pods sales dashboard
//!
//! A CLI tool that loads the Beans & Pods sales dataset, aggregates it by
//! product, channel, and region, and renders one dashboard page with bar
//! charts and recommendations.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (missing or malformed data, bad config, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod dashboard;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use dashboard::{Report, ReportMetadata};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("beans-dashboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_dashboard(args) {
        error!("Render failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .beans-dashboard.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize the data path, default page, and charts.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the rendered page on stdout stays clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load, aggregate, and render one page.
fn run_dashboard(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let table = loader::load_table(&config.data.path)?;

    let dashboard = dashboard::render(
        config.dashboard.mode,
        &config.dashboard.dimensions,
        &table,
        &config.render_options(),
    )?;

    let report = Report {
        metadata: ReportMetadata {
            data_path: config.data.path.display().to_string(),
            generated_at: Utc::now(),
            record_count: table.len(),
        },
        dashboard,
    };

    let style = config.chart_style();
    let output = match args.format {
        OutputFormat::Terminal => report::generate_terminal_report(&report, &style),
        OutputFormat::Markdown => report::generate_markdown_report(&report, &style),
        OutputFormat::Json => report::generate_json_report(&report)?,
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write page to {}", path.display()))?;
            info!("Page saved to: {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
