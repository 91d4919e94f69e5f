//! Route-Sounder main entry point
//!
//! This is the command-line interface for the Route-Sounder endpoint mapper.

use anyhow::Context;
use clap::Parser;
use route_sounder::config::{load_config_or_default, validate, validate_seed, Config};
use route_sounder::output::{format_summary, output_for};
use route_sounder::{parse_base_url, Coordinator, TracingSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Route-Sounder: maps the endpoints of a web application
///
/// Reads the site's sitemap when it has one. Otherwise crawls its links and
/// scans its pages and scripts for route-shaped strings.
#[derive(Parser, Debug)]
#[command(name = "route-sounder")]
#[command(version)]
#[command(about = "Discover the endpoints of a web application", long_about = None)]
struct Cli {
    /// Base URL of the application (https:// is assumed when omitted)
    #[arg(value_name = "URL")]
    url: String,

    /// Write endpoints to this file instead of the console
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum link depth for crawling
    #[arg(short, long)]
    depth: Option<u32>,

    /// Disable TLS certificate verification
    #[arg(long)]
    no_verify: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Extra seed endpoint to scan (repeatable)
    #[arg(long = "seed", value_name = "PATH")]
    seeds: Vec<String>,

    /// Do not crawl paths disallowed by robots.txt
    #[arg(long)]
    respect_robots: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Layers command-line flags over file settings
    fn apply_to(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(depth) = self.depth {
            config.discovery.max_depth = depth;
        }
        if self.no_verify {
            config.discovery.verify_tls = false;
        }
        if self.respect_robots {
            config.discovery.respect_robots = true;
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.display().to_string());
        }
        for seed in &self.seeds {
            validate_seed(seed).with_context(|| format!("Invalid --seed {:?}", seed))?;
            if !config.discovery.seeds.contains(seed) {
                config.discovery.seeds.push(seed.clone());
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config =
        load_config_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config)?;
    validate(&config).context("Invalid settings")?;

    let base_url =
        parse_base_url(&cli.url).with_context(|| format!("Invalid target URL {:?}", cli.url))?;

    let output_path = config.output.path.clone();
    let mut coordinator = Coordinator::new(config, Arc::new(TracingSink))?;
    let report = coordinator.run(&base_url).await?;

    let mut output = output_for(output_path.as_deref().map(Path::new));
    output
        .write_endpoints(&report.endpoints)
        .with_context(|| format!("Failed to write endpoints to {}", output.describe()))?;

    if !cli.quiet {
        println!("\n{}", format_summary(&report));
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("route_sounder=info,warn"),
            1 => EnvFilter::new("route_sounder=debug,info"),
            2 => EnvFilter::new("route_sounder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
