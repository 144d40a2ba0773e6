use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::app::ports::DocumentFetcherPort;
use crate::config::CrawlerConfig;
use crate::extractor::extract_html;
use crate::types::MetadataRecord;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Upper bound on documents fetched at once.
    pub concurrency: usize,
    pub show_progress: bool,
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            show_progress: config.show_progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub total: usize,
    pub successful: usize,
}

impl CrawlSummary {
    pub fn from_records(records: &[MetadataRecord]) -> Self {
        Self {
            total: records.len(),
            successful: records.iter().filter(|r| r.is_success()).count(),
        }
    }
}

/// Fetches each URL and extracts one metadata record per URL.
pub struct CrawlUseCase {
    fetcher: Arc<dyn DocumentFetcherPort>,
    options: CrawlOptions,
}

impl CrawlUseCase {
    pub fn new(fetcher: Arc<dyn DocumentFetcherPort>, options: CrawlOptions) -> Self {
        Self { fetcher, options }
    }

    /// Fetch failures become error records; extraction itself cannot fail.
    pub async fn crawl_one(&self, url: &str) -> MetadataRecord {
        match self.fetcher.fetch(url).await {
            Ok(body) => {
                let record = extract_html(&body, url);
                debug!(
                    url,
                    title = ?record.title(),
                    author = ?record.author(),
                    date = ?record.date().map(|d| d.to_string()),
                    "Extracted metadata"
                );
                record
            }
            Err(e) => {
                warn!(url, error = %e, "Failed to fetch document");
                MetadataRecord::failed(url, e.to_string())
            }
        }
    }

    /// Crawl every URL. Records come back in input order regardless of
    /// which fetch finishes first.
    pub async fn run(&self, urls: &[String]) -> Vec<MetadataRecord> {
        info!(count = urls.len(), concurrency = self.options.concurrency, "Starting crawl");
        let progress = self.progress_bar(urls.len() as u64);

        let records: Vec<MetadataRecord> = stream::iter(urls.iter().map(|url| {
            let progress = &progress;
            async move {
                let record = self.crawl_one(url).await;
                progress.inc(1);
                record
            }
        }))
        .buffered(self.options.concurrency.max(1))
        .collect()
        .await;

        progress.finish();
        let summary = CrawlSummary::from_records(&records);
        info!(total = summary.total, successful = summary.successful, "Crawl finished");
        records
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})") {
            bar.set_style(style);
        }
        bar.set_message("Crawling URLs");
        bar
    }
}
