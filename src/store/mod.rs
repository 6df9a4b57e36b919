//! Load and persist the dataset document.
//!
//! The dataset is a single JSON array of records. Writes are atomic: the
//! full serialized output goes to a sibling temp file which then replaces
//! the target in one rename, so the document is never left half-written.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::core::CapError;
use crate::record::{Dataset, TradeRecord};

/// Load the dataset from `path`. A missing file yields an empty dataset.
///
/// # Errors
/// Returns [`CapError::StoreCorrupt`] if the file exists but does not parse;
/// the caller must halt rather than overwrite it.
pub fn load(path: &Path) -> Result<Dataset, CapError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no dataset yet, starting empty");
            return Ok(Dataset::default());
        }
        Err(e) => return Err(e.into()),
    };
    let records: Vec<TradeRecord> =
        serde_json::from_str(&text).map_err(|source| CapError::StoreCorrupt {
            path: path.display().to_string(),
            source,
        })?;
    debug!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(Dataset::from_records(records))
}

/// Persist the full dataset to `path`, replacing any previous document.
pub fn save(path: &Path, dataset: &Dataset) -> Result<(), CapError> {
    let json = serde_json::to_vec_pretty(dataset.records())?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), records = dataset.len(), "dataset saved");
    Ok(())
}
