//! Page-Sift main entry point
//!
//! This is the command-line interface for the Page-Sift crawler.

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use page_sift::config::{load_config_with_hash, validate, Config};
use page_sift::crawler::{crawl, SearchCriterion};
use page_sift::output::{generate_markdown_summary, print_report, ReportFormat};
use page_sift::url::{ensure_scheme, CrawlScope, ScopeMode};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Page-Sift: find every page on a site that carries a class or a phrase
///
/// Page-Sift crawls all pages reachable from URL without leaving its scope,
/// and reports which of them match the search criterion.
#[derive(Parser, Debug)]
#[command(name = "page-sift")]
#[command(version)]
#[command(about = "A scope-bounded site crawler", long_about = None)]
#[command(group(ArgGroup::new("criterion").required(true).args(["class", "text"])))]
struct Cli {
    /// Starting URL; https:// is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: String,

    /// Match pages containing an element with this CSS class
    #[arg(long, value_name = "NAME")]
    class: Option<String>,

    /// Match pages whose visible text contains this exact phrase
    #[arg(long, value_name = "TERM")]
    text: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Pages fetched concurrently (overrides config)
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Scope comparison: host-prefix or prefix (overrides config)
    #[arg(long, value_name = "MODE")]
    scope_mode: Option<ScopeMode>,

    /// Report format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: ReportFormat,

    /// Also write a markdown summary to this path (overrides config)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;
    let criterion = criterion_from_cli(&cli)?;

    let start_url = ensure_scheme(&cli.url).context("Invalid starting URL")?;
    let scope = CrawlScope::new(&start_url, config.scope.mode).context("Invalid starting URL")?;
    let prefix = scope.prefix().to_string();

    tracing::info!(
        "Crawling {} for {} with concurrency {}",
        prefix,
        criterion,
        config.crawler.concurrency
    );

    let result = crawl(&config, scope, criterion.clone())
        .await
        .context("Crawl failed")?;

    print_report(cli.format, &prefix, &criterion, &result)?;

    if let Some(path) = &config.output.summary_path {
        generate_markdown_summary(&prefix, &criterion, &result, Path::new(path))
            .with_context(|| format!("Failed to write summary to {}", path))?;
        tracing::info!("Summary written to: {}", path);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_sift=info,warn"),
            1 => EnvFilter::new("page_sift=debug,info"),
            2 => EnvFilter::new("page_sift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file if one was given, then applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(mode) = cli.scope_mode {
        config.scope.mode = mode;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Builds the search criterion from `--class` or `--text`
fn criterion_from_cli(cli: &Cli) -> anyhow::Result<SearchCriterion> {
    match (&cli.class, &cli.text) {
        (Some(class), None) => {
            let class = class.trim();
            if class.is_empty() || class.contains(char::is_whitespace) {
                bail!("--class must be a single non-empty class name");
            }
            Ok(SearchCriterion::ByClass(class.to_string()))
        }
        (None, Some(text)) => {
            if text.is_empty() {
                bail!("--text cannot be empty");
            }
            Ok(SearchCriterion::ByString(text.clone()))
        }
        _ => bail!("exactly one of --class or --text is required"),
    }
}
