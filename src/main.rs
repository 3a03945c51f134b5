//! Product Poster main entry point
//!
//! This is the command-line interface for the product poster generator.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use product_poster::config::{load_config_with_hash, Config, ImageFitMode};
use product_poster::output::{format_report, write_poster};
use product_poster::{GenerateRequest, PosterGenerator, RecordOverrides};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Product Poster: turns a product page into a promotional poster
///
/// Fetches the page, extracts the product's name, price, photo, highlights
/// and usage, and renders them onto a fixed-size PNG with a QR code linking
/// back to the page.
#[derive(Parser, Debug)]
#[command(name = "product-poster")]
#[command(version = "1.0.0")]
#[command(about = "Generates a promotional poster from a product page", long_about = None)]
struct Cli {
    /// Product page URL (HTTPS)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory the poster is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Replace the extracted product name
    #[arg(long)]
    title: Option<String>,

    /// Replace the extracted subtitle
    #[arg(long)]
    subtitle: Option<String>,

    /// Replace the extracted highlights (repeatable)
    #[arg(long = "highlight", value_name = "TEXT")]
    highlights: Vec<String>,

    /// Replace the extracted usage lines (repeatable)
    #[arg(long = "usage", value_name = "TEXT")]
    usage: Vec<String>,

    /// Poster layout, overriding the configured image fit
    #[arg(long, value_enum)]
    layout: Option<Layout>,

    /// Print the extracted product as JSON and exit without rendering
    #[arg(long)]
    extract_only: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    /// Whole photo visible on a plain background
    Simple,
    /// Photo cropped to fill a rounded card
    Card,
}

impl From<Layout> for ImageFitMode {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Simple => ImageFitMode::Contain,
            Layout::Card => ImageFitMode::Cover,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration given, using defaults");
            Config::default()
        }
    };

    if cli.extract_only {
        handle_extract(config, &cli.url).await
    } else {
        handle_generate(config, cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_poster=info,warn"),
            1 => EnvFilter::new("product_poster=debug,info"),
            2 => EnvFilter::new("product_poster=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles --extract-only: prints the extracted record as JSON
async fn handle_extract(config: Config, url: &str) -> anyhow::Result<()> {
    let generator = PosterGenerator::new(config)?;
    let record = generator.extract(url).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Handles the main generation path
async fn handle_generate(config: Config, cli: Cli) -> anyhow::Result<()> {
    if config.fonts.regular.is_none() {
        bail!("Rendering needs a font: set [fonts] regular in the configuration");
    }

    let generator = PosterGenerator::new(config)?;
    let request = GenerateRequest {
        url: cli.url,
        overrides: RecordOverrides {
            title: cli.title,
            subtitle: cli.subtitle,
            highlights: cli.highlights,
            usage: cli.usage,
        },
        image_fit: cli.layout.map(ImageFitMode::from),
    };

    let poster = match generator.generate(request).await {
        Ok(poster) => poster,
        Err(e) => {
            tracing::error!("Poster generation failed: {}", e);
            return Err(e.into());
        }
    };

    let path = write_poster(&cli.output, &poster)?;
    if !cli.quiet {
        print!("{}", format_report(&poster, &path));
    }

    Ok(())
}
