// src/pipeline/scrape.rs

//! Scraping pipeline.
//!
//! Drives listing targets in input order: fetch the listing, parse its
//! items synchronously, then enrich each item from its detail page. Detail
//! fetches run through an order-preserving bounded stream, so the catalog
//! keeps item document order per listing page. An unreachable listing is
//! skipped; an unreachable detail page degrades a single record.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use url::Url;

use crate::error::Result;
use crate::models::{Config, ProductRecord};
use crate::services::{PageFetcher, ProductExtractor, Selectors, parse_listing};
use crate::utils::percent;

/// Summary of a scraping run.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// All assembled records, in listing order then item document order
    pub records: Vec<ProductRecord>,
    pub listing_total: usize,
    pub listing_failures: usize,
    pub item_total: usize,
    pub dropped_items: usize,
    pub malformed_attributes: usize,
    pub detail_failures: usize,
}

impl ScrapeOutcome {
    /// Log the aggregate counters of the run.
    pub fn log_summary(&self) {
        log::info!(
            "Assembled {} records from {} listings ({} listing failures, \
             {} dropped items, {} malformed attributes, {} detail failures)",
            self.records.len(),
            self.listing_total,
            self.listing_failures,
            self.dropped_items,
            self.malformed_attributes,
            self.detail_failures,
        );
    }
}

/// Run the scraper over all configured targets.
///
/// Only startup problems (bad selector config, client build) return an
/// error; every per-page and per-item failure is absorbed into the outcome
/// counters.
pub async fn run_scraper(config: &Config) -> Result<ScrapeOutcome> {
    let selectors = Selectors::from_config(&config.selectors)?;
    let fetcher = PageFetcher::new(&config.fetch)?;
    let extractor = ProductExtractor::new(&fetcher, &selectors);

    let delay = Duration::from_millis(config.fetch.request_delay_ms);
    let concurrency = config.fetch.max_concurrent.max(1);
    let deadline = (config.fetch.run_timeout_secs > 0)
        .then(|| Instant::now() + Duration::from_secs(config.fetch.run_timeout_secs));
    let expired = || deadline.is_some_and(|d| Instant::now() >= d);

    let mut outcome = ScrapeOutcome {
        listing_total: config.targets.len(),
        ..ScrapeOutcome::default()
    };

    for (index, target) in config.targets.iter().enumerate() {
        if expired() {
            log::warn!("Run deadline reached, finalizing with {} records", outcome.records.len());
            break;
        }

        let base = match Url::parse(target) {
            Ok(base) => base,
            Err(e) => {
                log::warn!("Skipping listing {target}: {e}");
                outcome.listing_failures += 1;
                continue;
            }
        };
        let document = match fetcher.fetch(target).await {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Skipping listing {target}: {e}");
                outcome.listing_failures += 1;
                continue;
            }
        };

        let parsed = parse_listing(&document, &base, &selectors);
        drop(document);

        outcome.item_total += parsed.item_total;
        outcome.dropped_items += parsed.dropped_items;
        outcome.malformed_attributes += parsed.malformed_attributes;

        let total_items = parsed.items.len();
        let mut details = stream::iter(parsed.items)
            .map(|item| extractor.assemble(item))
            .buffered(concurrency);

        let mut completed = 0usize;
        while let Some((record, detail_failed)) = details.next().await {
            completed += 1;
            if detail_failed {
                outcome.detail_failures += 1;
            }
            outcome.records.push(record);
            log::info!(
                "  item {completed}/{total_items} ({:.2}%)",
                percent(completed, total_items)
            );

            if expired() {
                log::warn!(
                    "Run deadline reached, finalizing with {} records",
                    outcome.records.len()
                );
                return Ok(outcome);
            }
            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        log::info!(
            "Listing {}/{} ({:.2}%): {target}",
            index + 1,
            outcome.listing_total,
            percent(index + 1, outcome.listing_total)
        );
    }

    Ok(outcome)
}
