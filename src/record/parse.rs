use crate::core::CapError;
use crate::record::{CellToken, RawRow, TradeRecord, date};

/// Parse one table row into a [`TradeRecord`].
///
/// Pure: no I/O, no clock beyond date normalization. `index` is the row's
/// position on its page and only feeds the error message.
///
/// # Errors
/// Returns [`CapError::RowParse`] when the row violates the ten-column
/// contract or any cell has an unrecognized sub-shape.
pub fn parse_row(index: usize, cells: &[CellToken]) -> Result<TradeRecord, CapError> {
    parse_cells(cells).map_err(|reason| CapError::RowParse { row: index, reason })
}

fn parse_cells(cells: &[CellToken]) -> Result<TradeRecord, String> {
    let row = RawRow::from_cells(cells)?;

    let entity_url = row
        .politician
        .url()
        .ok_or("politician cell: missing detail link")?
        .to_string();
    let mut lines = row.politician.text().lines();
    let entity_name = lines
        .next()
        .ok_or("politician cell: missing name line")?
        .to_string();
    let role = lines.next().ok_or("politician cell: missing role line")?;
    let (entity_party, entity_chamber, entity_state) = split_role(role)?;

    let issuer_url = row
        .issuer
        .url()
        .ok_or("issuer cell: missing detail link")?
        .to_string();
    let mut lines = row.issuer.text().lines();
    let issuer_name = lines
        .next()
        .ok_or("issuer cell: missing name line")?
        .to_string();
    let issuer_ticker = lines
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let file_date = date::normalize(&unfold(row.published.text()))
        .map_err(|e| format!("publish date: {e}"))?;
    let trade_date = date::normalize(&unfold(row.traded.text()))
        .map_err(|e| format!("trade date: {e}"))?;

    let file_ref = row
        .filing
        .url()
        .ok_or("filing cell: missing disclosure link")?
        .to_string();

    Ok(TradeRecord {
        entity_name,
        entity_url,
        entity_party,
        entity_chamber,
        entity_state,
        issuer_name,
        issuer_url,
        issuer_ticker,
        file_date,
        trade_date,
        filed_after: unfold(row.filed_after.text()),
        owner: row.owner.text().to_string(),
        action: row.action.text().to_string(),
        size: row.size.text().to_string(),
        price: row.price.text().to_string(),
        file_ref,
    })
}

/// The role line runs party, chamber, and state together without reliable
/// spacing ("RepublicanHouseTX"). Space out the chamber keywords so the line
/// splits into exactly three fields.
fn split_role(role: &str) -> Result<(String, String, String), String> {
    let spaced = role.replace("Senate", " Senate ").replace("House", " House ");
    let mut fields = spaced.split_whitespace();
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(party), Some(chamber), Some(state), None) => Ok((
            party.to_string(),
            chamber.to_string(),
            state.to_string(),
        )),
        _ => Err(format!("unrecognized role text {role:?}")),
    }
}

/// Join a cell's lines with single spaces.
fn unfold(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
