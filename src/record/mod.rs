//! The trade-disclosure data model and the pure decoding pipeline:
//! cell codec → date normalizer → row parser.

/// The cell codec (`CellToken`).
pub mod cell;
/// Free-text date normalization.
pub mod date;
/// Row and record shapes (`RawRow`, `TradeRecord`, `Dataset`).
pub mod model;
/// Row → record parsing.
pub mod parse;

pub use cell::CellToken;
pub use model::{Dataset, RawCells, RawRow, TradeRecord};
pub use parse::parse_row;
