use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum CapError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// An error occurred while reading or writing the dataset file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A date cell matched none of the recognized shapes
    /// (`Today`, `Yesterday`, or `<day> <month-name> <year>`).
    #[error("malformed date: {0:?}")]
    MalformedDate(String),

    /// A table row violated the fixed ten-column contract, or one of its
    /// cells had an unrecognized sub-shape. Fatal to the crawl: a malformed
    /// row means the source table's layout changed.
    #[error("row {row} failed to parse: {reason}")]
    RowParse {
        /// Zero-based index of the offending row on its page.
        row: usize,
        /// What went wrong, including the offending cell text.
        reason: String,
    },

    /// The page never produced the expected table rows within the wait
    /// budget. Fatal: whatever was merged from earlier pages is still
    /// persisted by the caller.
    #[error("timed out waiting for {what} after {waited:?}")]
    ExtractorTimeout {
        /// What was being waited for.
        what: String,
        /// How long the extractor waited before giving up.
        waited: std::time::Duration,
    },

    /// The dataset file exists but does not hold valid serialized records.
    /// Fatal at startup: proceeding with an empty dataset would silently
    /// re-harvest everything, which signals operator error.
    #[error("dataset at {path} is corrupt: {source}")]
    StoreCorrupt {
        /// Path of the offending file.
        path: String,
        /// The underlying deserialization failure.
        source: serde_json::Error,
    },
}
