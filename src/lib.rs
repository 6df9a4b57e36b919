//! captrades: incremental harvester for congressional trade disclosures.
//!
//! The crate walks the paginated CapitolTrades `/trades` table newest-first,
//! decodes each row into a [`TradeRecord`], and merges the result into a
//! persistent JSON dataset keyed by the disclosure filing link. The crawl
//! halts as soon as it reaches a record it has already stored.

pub mod core;
pub mod crawl;
pub mod extract;
pub mod record;
pub mod store;

pub use core::{CapClient, CapClientBuilder, CapError};
pub use crawl::{CrawlSummary, StopReason};
pub use extract::{PageSource, TableExtractor};
pub use record::{CellToken, Dataset, RawRow, TradeRecord};
