//! Harvest CapitolTrades disclosures into `data.json`.
//!
//! Single invocation, no arguments: load the existing dataset, crawl pages
//! newest-first until overlap or the last page, persist, report. The dataset
//! is flushed even when the crawl fails partway, so everything merged from
//! earlier pages survives a fatal error.

use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use captrades::{CapClient, CapError, TableExtractor, crawl, store};

const DATA_PATH: &str = "data.json";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match harvest().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("harvest failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn harvest() -> Result<(), CapError> {
    let path = Path::new(DATA_PATH);
    let mut dataset = store::load(path)?;
    info!(records = dataset.len(), "dataset loaded");

    let client = CapClient::builder().build()?;
    let mut source = TableExtractor::open(client).await?;

    let outcome = crawl::run(&mut source, &mut dataset).await;

    // Flush before surfacing any crawl error: prior pages' merges are good.
    store::save(path, &dataset)?;

    let summary = outcome?;
    info!(
        pages = summary.pages,
        added = summary.added,
        reason = ?summary.reason,
        total = dataset.len(),
        "harvest complete"
    );
    Ok(())
}
