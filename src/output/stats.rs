//! Crawl statistics and collection summaries
//!
//! `CrawlStats` is filled in while a crawl runs. `HymnalSummary` is computed
//! from a finished collection, e.g. one loaded back from the output file.

use crate::crawler::HymnOutcome;
use crate::hymn::HymnRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Counters describing one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run stopped collecting
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing pages requested
    pub pages_visited: u64,

    /// Listing pages that returned no content
    pub pages_failed: u64,

    /// Hymn links found on listing pages
    pub links_discovered: u64,

    /// Hymns extracted and collected
    pub hymns_extracted: u64,

    /// Hymns whose detail page could not be fetched
    pub hymns_skipped: u64,

    /// Hymns whose detail page had an unexpected shape, or whose task panicked
    pub hymns_failed: u64,

    /// Whether the run was cancelled before all tasks finished
    pub cancelled: bool,
}

impl CrawlStats {
    /// Creates empty statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            pages_failed: 0,
            links_discovered: 0,
            hymns_extracted: 0,
            hymns_skipped: 0,
            hymns_failed: 0,
            cancelled: false,
        }
    }

    /// Tallies one extraction outcome, collecting the record if there is one
    pub fn record(&mut self, outcome: HymnOutcome, records: &mut Vec<HymnRecord>) {
        match outcome {
            HymnOutcome::Extracted(record) => {
                self.hymns_extracted += 1;
                records.push(record);
            }
            HymnOutcome::Skipped => self.hymns_skipped += 1,
            HymnOutcome::Failed(_) => self.hymns_failed += 1,
        }
    }

    /// Marks the run as finished
    pub fn finish(&mut self, cancelled: bool) {
        self.finished_at = Some(Utc::now());
        self.cancelled = cancelled;
    }

    /// Wall-clock duration of the run, if it has finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Hymn links that never produced an outcome (cancelled in flight)
    pub fn hymns_unfinished(&self) -> u64 {
        self.links_discovered
            .saturating_sub(self.hymns_extracted + self.hymns_skipped + self.hymns_failed)
    }

    /// Logs the counters at info level
    pub fn log_summary(&self) {
        tracing::info!(
            "Crawl {}: {} pages visited ({} failed), {} hymn links, {} extracted, {} skipped, {} failed, {} unfinished{}",
            if self.cancelled { "interrupted" } else { "completed" },
            self.pages_visited,
            self.pages_failed,
            self.links_discovered,
            self.hymns_extracted,
            self.hymns_skipped,
            self.hymns_failed,
            self.hymns_unfinished(),
            self.duration_seconds()
                .map(|secs| format!(" in {}s", secs))
                .unwrap_or_default()
        );
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a hymn collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HymnalSummary {
    /// Number of hymns in the collection
    pub total_hymns: usize,

    /// Hymn count per category label
    pub by_category: BTreeMap<String, usize>,

    /// Hymns that carry a refrain
    pub with_refrain: usize,

    /// Verses across all hymns
    pub total_verses: usize,
}

/// Computes a summary of a hymn collection
pub fn summarize(records: &[HymnRecord]) -> HymnalSummary {
    let mut summary = HymnalSummary {
        total_hymns: records.len(),
        ..HymnalSummary::default()
    };

    for record in records {
        *summary
            .by_category
            .entry(record.category.clone())
            .or_insert(0) += 1;
        if record.has_refrain() {
            summary.with_refrain += 1;
        }
        summary.total_verses += record.verses.len();
    }

    summary
}

/// Prints a collection summary to stdout
pub fn print_summary(summary: &HymnalSummary) {
    println!("=== Hymnal Statistics ===\n");

    println!("Overview:");
    println!("  Total hymns: {}", summary.total_hymns);
    println!("  Hymns with refrain: {}", summary.with_refrain);
    println!("  Total verses: {}", summary.total_verses);
    println!();

    if !summary.by_category.is_empty() {
        println!("Hymns by Category:");
        for (category, count) in &summary.by_category {
            let percentage = (*count as f64 / summary.total_hymns as f64) * 100.0;
            println!("  {}: {} ({:.1}%)", category, count, percentage);
        }
    }
}
