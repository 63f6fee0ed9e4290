//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator walks every listing page of the configured crawl space
//! one at a time, spawns one extraction task per hymn link it finds, and
//! collects the resulting records through a channel. The collection is
//! written out once, when every task has finished or when the run is
//! cancelled.

use crate::config::Config;
use crate::crawler::extractor::{extract_hymn, HymnOutcome};
use crate::crawler::parser::{extract_hymn_links, HymnalMarkup};
use crate::crawler::{build_http_client, fetch_url};
use crate::hymn::HymnRecord;
use crate::output::{write_hymns_json, CrawlStats};
use crate::url::page_addresses;
use crate::HymnalError;
use reqwest::Client;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Records and statistics produced by one crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Every hymn collected before the run ended, in arrival order
    pub records: Vec<HymnRecord>,

    /// Counters describing the run
    pub stats: CrawlStats,
}

type ExtractionFuture = Pin<Box<dyn Future<Output = HymnOutcome> + Send>>;

/// Extraction step each hymn task runs
type Extractor = Arc<dyn Fn(Client, String) -> ExtractionFuture + Send + Sync>;

fn default_extractor() -> Extractor {
    Arc::new(|client: Client, url: String| -> ExtractionFuture {
        Box::pin(async move { extract_hymn(&client, &url).await })
    })
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    cancel: CancellationToken,
    limiter: Option<Arc<Semaphore>>,
    extractor: Extractor,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `cancel` - Token that stops the run and triggers a partial save
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HymnalError)` - The HTTP client could not be built
    pub fn new(config: Config, cancel: CancellationToken) -> Result<Self, HymnalError> {
        let client = build_http_client()?;

        let limiter = match config.crawler.max_concurrent_extractions {
            0 => None,
            limit => Some(Arc::new(Semaphore::new(limit))),
        };

        Ok(Self {
            config: Arc::new(config),
            client,
            cancel,
            limiter,
            extractor: default_extractor(),
        })
    }

    #[cfg(test)]
    fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Runs the crawl and writes the collected hymns to the output file
    ///
    /// The file is written on normal completion and on cancellation alike.
    pub async fn run(&self) -> Result<CrawlOutcome, HymnalError> {
        let outcome = self.collect().await;

        let output_path = Path::new(&self.config.output.hymns_path);
        write_hymns_json(&outcome.records, output_path)?;

        tracing::info!(
            "Wrote {} hymns to {}",
            outcome.records.len(),
            output_path.display()
        );

        Ok(outcome)
    }

    /// Crawls every listing page and gathers the extracted hymns
    ///
    /// Listing pages are fetched sequentially in category-then-page order.
    /// Extraction tasks run concurrently, unbounded unless
    /// `max-concurrent-extractions` is set. Cancellation is observed between
    /// listing pages, during a listing fetch, and while waiting for tasks;
    /// records already delivered at that moment are kept.
    pub async fn collect(&self) -> CrawlOutcome {
        let mut stats = CrawlStats::new();
        let mut records = Vec::new();
        let mut cancelled = false;

        let (tx, mut rx) = mpsc::unbounded_channel::<HymnOutcome>();
        let mut tasks = JoinSet::new();

        tracing::info!(
            "Starting crawl of {} categories, pages {}..={}",
            self.config.crawler.categories.len(),
            self.config.crawler.first_page,
            self.config.crawler.last_page
        );

        for address in page_addresses(&self.config.crawler) {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let page_url = address.to_url(&self.config.crawler.base_url);
            tracing::debug!(
                "Visiting category {} page {}",
                address.category,
                address.page
            );

            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                result = fetch_url(&self.client, &page_url) => result,
            };
            stats.pages_visited += 1;

            let Some(body) = fetched.into_body() else {
                stats.pages_failed += 1;
                continue;
            };

            let links = match Url::parse(&page_url) {
                Ok(base_url) => extract_hymn_links(HymnalMarkup::shared(), &body, &base_url),
                Err(e) => {
                    tracing::warn!("Cannot resolve links on {}: {}", page_url, e);
                    stats.pages_failed += 1;
                    continue;
                }
            };

            tracing::debug!("Found {} hymn links on {}", links.len(), page_url);
            stats.links_discovered += links.len() as u64;

            for link in links {
                self.spawn_extraction(&mut tasks, tx.clone(), link);
            }
        }

        // Only the tasks hold senders now, so the channel closes once they all finish
        drop(tx);

        if !cancelled {
            cancelled = loop {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => break true,
                    outcome = rx.recv() => match outcome {
                        Some(outcome) => stats.record(outcome, &mut records),
                        None => break false,
                    },
                }
            };
        }

        if cancelled {
            tracing::warn!("Process interrupted. Saving progress...");
            tasks.shutdown().await;
        } else {
            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    if e.is_panic() {
                        tracing::error!("Hymn extraction task panicked: {}", e);
                        stats.hymns_failed += 1;
                    }
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            stats.record(outcome, &mut records);
        }

        stats.finish(cancelled);
        stats.log_summary();

        CrawlOutcome { records, stats }
    }

    /// Spawns one extraction task for a hymn link
    fn spawn_extraction(
        &self,
        tasks: &mut JoinSet<()>,
        tx: mpsc::UnboundedSender<HymnOutcome>,
        url: String,
    ) {
        let extraction = (self.extractor)(self.client.clone(), url);
        let limiter = self.limiter.clone();

        tasks.spawn(async move {
            let _permit = match limiter {
                Some(limiter) => limiter.acquire_owned().await.ok(),
                None => None,
            };

            let outcome = extraction.await;

            // The receiver is gone only once the run has stopped collecting
            let _ = tx.send(outcome);
        });
    }
}

/// Runs a complete crawl and writes the output file
///
/// # Example
///
/// ```no_run
/// use hymnal_crawler::config::Config;
/// use hymnal_crawler::crawler::run_crawl;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(Config::default(), CancellationToken::new()).await?;
/// println!("Collected {} hymns", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    cancel: CancellationToken,
) -> Result<CrawlOutcome, HymnalError> {
    let coordinator = Coordinator::new(config, cancel)?;
    coordinator.run().await
}
