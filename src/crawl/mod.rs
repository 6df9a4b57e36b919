//! The page-by-page crawl loop and its merge/stop rule.
//!
//! Pages are ordered newest-first, so the first already-known record proves
//! that everything beyond it was harvested by an earlier run. The loop
//! finishes merging the page it is on, then halts without requesting
//! another page.

use tracing::{debug, info};

use crate::core::CapError;
use crate::extract::PageSource;
use crate::record::{Dataset, TradeRecord, parse_row};

/// Why the crawl halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page contained a record that was already in the dataset.
    Overlap,
    /// The pagination control reported no further pages.
    EndOfPages,
}

/// What a completed crawl did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages read.
    pub pages: u32,
    /// Records appended to the dataset.
    pub added: usize,
    /// Why the crawl halted.
    pub reason: StopReason,
}

/// Run the crawl against `source`, merging new records into `dataset`.
///
/// Each page is parsed in full before any of its rows are merged, so a
/// malformed row aborts the run without leaving a partially merged page
/// behind; rows merged from earlier pages stay in `dataset` and the caller
/// decides whether to persist them.
///
/// # Errors
/// Propagates extractor failures and row-parse failures; both are fatal to
/// the run.
pub async fn run<S: PageSource + ?Sized>(
    source: &mut S,
    dataset: &mut Dataset,
) -> Result<CrawlSummary, CapError> {
    let mut pages = 0u32;
    let mut added = 0usize;

    loop {
        let rows = source.read_rows().await?;
        pages += 1;

        let records: Vec<TradeRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, cells)| parse_row(i, cells))
            .collect::<Result<_, _>>()?;

        let mut overlap = false;
        let mut page_added = 0usize;
        for record in records {
            let file_ref = record.file_ref.clone();
            if dataset.insert(record) {
                page_added += 1;
            } else {
                debug!(%file_ref, "already harvested, stopping after this page");
                overlap = true;
            }
        }
        added += page_added;
        info!(page = pages, new = page_added, total = dataset.len(), "page merged");

        if overlap {
            return Ok(CrawlSummary {
                pages,
                added,
                reason: StopReason::Overlap,
            });
        }
        if !source.advance().await? {
            return Ok(CrawlSummary {
                pages,
                added,
                reason: StopReason::EndOfPages,
            });
        }
    }
}
