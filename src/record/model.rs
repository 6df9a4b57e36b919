use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::CellToken;

/// One table row as read from the page: one token per `<td>`, shape not yet
/// validated.
pub type RawCells = Vec<CellToken>;

/// A table row after the fixed ten-column contract has been checked, with
/// each cell bound to its positional meaning.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// Column 0: politician identity + role.
    pub politician: CellToken,
    /// Column 1: issuer identity + ticker.
    pub issuer: CellToken,
    /// Column 2: filing publication date.
    pub published: CellToken,
    /// Column 3: trade date.
    pub traded: CellToken,
    /// Column 4: interval between trade and filing.
    pub filed_after: CellToken,
    /// Column 5: ownership type.
    pub owner: CellToken,
    /// Column 6: trade action (buy/sell/...).
    pub action: CellToken,
    /// Column 7: trade size bracket.
    pub size: CellToken,
    /// Column 8: price.
    pub price: CellToken,
    /// Column 9: link to the disclosure filing.
    pub filing: CellToken,
}

/// Number of columns the source table contracts to expose.
pub const COLUMN_COUNT: usize = 10;

impl RawRow {
    /// Bind raw cells to their columns, rejecting any row that does not have
    /// exactly ten cells.
    pub fn from_cells(cells: &[CellToken]) -> Result<Self, String> {
        let [politician, issuer, published, traded, filed_after, owner, action, size, price, filing] =
            cells
        else {
            return Err(format!(
                "expected {COLUMN_COUNT} columns, found {}",
                cells.len()
            ));
        };
        Ok(Self {
            politician: politician.clone(),
            issuer: issuer.clone(),
            published: published.clone(),
            traded: traded.clone(),
            filed_after: filed_after.clone(),
            owner: owner.clone(),
            action: action.clone(),
            size: size.clone(),
            price: price.clone(),
            filing: filing.clone(),
        })
    }
}

/// One harvested trade disclosure. Created the first time its filing link is
/// seen and never mutated afterwards.
///
/// Serialized field names stay camelCase for compatibility with datasets
/// produced by earlier versions of the harvester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// The politician's display name.
    pub entity_name: String,
    /// Link to the politician's detail page.
    pub entity_url: String,
    /// Party affiliation (e.g. "Democrat").
    pub entity_party: String,
    /// Chamber, either "Senate" or "House".
    pub entity_chamber: String,
    /// Two-letter state code.
    pub entity_state: String,
    /// The traded issuer's display name.
    pub issuer_name: String,
    /// Link to the issuer's detail page.
    pub issuer_url: String,
    /// Ticker symbol; absent for unlisted issuers.
    pub issuer_ticker: Option<String>,
    /// Date the disclosure was published.
    pub file_date: NaiveDate,
    /// Date the trade took place.
    pub trade_date: NaiveDate,
    /// Display label for the gap between trade and filing (e.g. "35 days").
    pub filed_after: String,
    /// Ownership type display string.
    pub owner: String,
    /// Trade action display string.
    pub action: String,
    /// Size bracket display string.
    pub size: String,
    /// Price display string.
    pub price: String,
    /// Link to the disclosure filing. Unique within a dataset; the sole
    /// deduplication key.
    pub file_ref: String,
}

/// The accumulated record collection, ordered by first-seen.
///
/// Owned exclusively by the crawl loop during a run; the store reads and
/// writes it wholesale.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<TradeRecord>,
    refs: HashSet<String>,
}

impl Dataset {
    /// Build a dataset from already-persisted records, preserving their
    /// order.
    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        let refs = records.iter().map(|r| r.file_ref.clone()).collect();
        Self { records, refs }
    }

    /// Whether a record with this filing link is already present.
    pub fn contains(&self, file_ref: &str) -> bool {
        self.refs.contains(file_ref)
    }

    /// Append a record unless its filing link is already present.
    /// Returns `true` if the record was new.
    pub fn insert(&mut self, record: TradeRecord) -> bool {
        if !self.refs.insert(record.file_ref.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// The records in first-seen order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
