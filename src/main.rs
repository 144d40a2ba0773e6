use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use url_meta_scraper::app::crawl_use_case::{CrawlOptions, CrawlSummary, CrawlUseCase};
use url_meta_scraper::config::CrawlerConfig;
use url_meta_scraper::infra::http_client::ReqwestFetcher;
use url_meta_scraper::input::load_url_list;
use url_meta_scraper::logging;
use url_meta_scraper::output::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "url_meta_scraper")]
#[command(about = "Crawl URLs from a text file and extract title, author and date metadata")]
#[command(version = "0.1.0")]
struct Cli {
    /// Text file with one URL per line; lines starting with '#' are ignored
    input_file: PathBuf,

    /// Output file (CSV or JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, ignore_case = true, default_value = "csv")]
    format: OutputFormat,

    /// Maximum number of documents fetched at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to a TOML config file (defaults to $CRAWLER_CONFIG, then ./crawler.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<CrawlerConfig> {
    let mut config =
        CrawlerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if cli.no_progress {
        config.show_progress = false;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    if !cli.input_file.is_file() {
        bail!("Input file '{}' does not exist", cli.input_file.display());
    }

    let config = resolve_config(&cli)?;
    let urls = load_url_list(&cli.input_file)
        .with_context(|| format!("Failed to read {}", cli.input_file.display()))?;
    info!(count = urls.len(), input = %cli.input_file.display(), "Loaded URL list");

    let fetcher = ReqwestFetcher::from_config(&config).context("Failed to build HTTP client")?;
    let use_case = CrawlUseCase::new(Arc::new(fetcher), CrawlOptions::from(&config));
    let records = use_case.run(&urls).await;

    let summary = CrawlSummary::from_records(&records);
    println!(
        "\nProcessed {} URLs ({} successful)",
        summary.total, summary.successful
    );

    if let Some(path) = &cli.output {
        if let Err(e) = output::save(&records, path, cli.format) {
            error!(path = %path.display(), error = %e, "Saving output failed");
            return Err(e).context("Error saving output");
        }
        println!("Results saved to {} ({})", path.display(), cli.format);
    }

    Ok(())
}
