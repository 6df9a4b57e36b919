//! The page-extractor boundary.
//!
//! The crawl loop only ever talks to the [`PageSource`] trait, which hides
//! how the trades table is actually rendered and paginated. The shipped
//! implementation, [`TableExtractor`], fetches the server-rendered table
//! over HTTP and reads it with `scraper`; tests substitute scripted sources.

use std::future::Future;
use std::pin::Pin;
use std::sync::LazyLock;
use std::time::Instant;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;
use url::Url;

use crate::core::{CapClient, CapError, net};
use crate::record::{CellToken, RawCells};

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table tbody tr").expect("static selector"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));
static NEXT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[aria-label="Go to next page"]"#).expect("static selector")
});

/// An opaque capability to read the current table page and move to the next
/// one. Methods return boxed futures so scripted implementations stay plain
/// structs.
pub trait PageSource: Send {
    /// The current page's table rows, one [`RawCells`] per row. Header and
    /// separator rows (a single cell) are excluded; shape validation beyond
    /// that is the parser's job.
    fn read_rows(&mut self)
    -> Pin<Box<dyn Future<Output = Result<Vec<RawCells>, CapError>> + Send + '_>>;

    /// Move to the next page. Returns `false`, without changing state, when
    /// the next-page control is absent or disabled; otherwise navigates,
    /// waits for the new page to settle, and returns `true`.
    fn advance(&mut self) -> Pin<Box<dyn Future<Output = Result<bool, CapError>> + Send + '_>>;
}

/// State of the pagination control on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextControl {
    Missing,
    Disabled,
    Ready,
}

/// Everything the crawl needs from one fetched page, extracted in a single
/// parse: the encoded multi-cell rows and the pagination state.
#[derive(Debug)]
struct PageSnapshot {
    rows: Vec<RawCells>,
    next: NextControl,
}

/// Live [`PageSource`] over the HTTP-rendered trades table.
///
/// Holds a parsed snapshot of the page it last navigated to; the DOM is
/// read exactly once per navigation.
#[derive(Debug)]
pub struct TableExtractor {
    client: CapClient,
    page: u32,
    snapshot: PageSnapshot,
}

impl TableExtractor {
    /// Navigate to page 1 and wait for its table.
    ///
    /// # Errors
    /// Fails with [`CapError::ExtractorTimeout`] if no table rows appear
    /// within the client's wait budget.
    pub async fn open(client: CapClient) -> Result<Self, CapError> {
        let snapshot = Self::load(&client, 1).await?;
        Ok(Self {
            client,
            page: 1,
            snapshot,
        })
    }

    /// The page number the extractor is currently on.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Fetch one page, polling until its table has rows or the wait budget
    /// runs out, then let the page settle.
    async fn load(client: &CapClient, page: u32) -> Result<PageSnapshot, CapError> {
        let url = client.page_url(page);
        let started = Instant::now();
        let snapshot = loop {
            let body = net::fetch_text(client, url.clone()).await?;
            if let Some(snapshot) = snapshot(&body, &url) {
                break snapshot;
            }
            if started.elapsed() >= client.wait_budget() {
                return Err(CapError::ExtractorTimeout {
                    what: format!("table rows on page {page}"),
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(client.poll_interval()).await;
        };
        debug!(page, rows = snapshot.rows.len(), "page loaded, settling");
        tokio::time::sleep(client.settle_delay()).await;
        Ok(snapshot)
    }
}

impl PageSource for TableExtractor {
    fn read_rows(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawCells>, CapError>> + Send + '_>> {
        Box::pin(async move { Ok(self.snapshot.rows.clone()) })
    }

    fn advance(&mut self) -> Pin<Box<dyn Future<Output = Result<bool, CapError>> + Send + '_>> {
        Box::pin(async move {
            match self.snapshot.next {
                NextControl::Missing | NextControl::Disabled => Ok(false),
                NextControl::Ready => {
                    let snapshot = Self::load(&self.client, self.page + 1).await?;
                    self.page += 1;
                    self.snapshot = snapshot;
                    Ok(true)
                }
            }
        })
    }
}

/// Extract rows and pagination state from a page body in one parse.
/// `None` means the table has no rows at all yet and the caller should keep
/// polling.
fn snapshot(body: &str, base: &Url) -> Option<PageSnapshot> {
    let doc = Html::parse_document(body);

    let mut saw_row = false;
    let mut rows = Vec::new();
    for tr in doc.select(&ROW_SELECTOR) {
        saw_row = true;
        let cells: Vec<CellToken> = tr
            .select(&CELL_SELECTOR)
            .map(|td| encode_cell(td, base))
            .collect();
        if cells.len() > 1 {
            rows.push(cells);
        }
    }
    if !saw_row {
        return None;
    }

    Some(PageSnapshot {
        rows,
        next: next_control(&doc),
    })
}

fn next_control(doc: &Html) -> NextControl {
    let Some(next) = doc.select(&NEXT_SELECTOR).next() else {
        return NextControl::Missing;
    };
    if element_disabled(next) {
        return NextControl::Disabled;
    }
    // The site wraps the anchor in a list item that carries the disabled
    // state on the last page.
    let parent_disabled = next
        .parent()
        .and_then(ElementRef::wrap)
        .is_some_and(element_disabled);
    if parent_disabled {
        NextControl::Disabled
    } else {
        NextControl::Ready
    }
}

/// Encode one `<td>` as link href (absolute, when present) plus trimmed
/// visible text, block children separated by newlines.
fn encode_cell(td: ElementRef<'_>, base: &Url) -> CellToken {
    let href = td
        .select(&ANCHOR_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|raw| absolutize(base, raw));
    CellToken::new(&cell_text(td), href.as_deref())
}

/// Resolve a possibly-relative href against the page URL. An unresolvable
/// href is kept verbatim; decoding is purely syntactic either way.
fn absolutize(base: &Url, href: &str) -> String {
    match base.join(href) {
        Ok(u) => u.to_string(),
        Err(_) => href.to_string(),
    }
}

/// A cell's visible text: each child element (or bare text node) becomes one
/// trimmed line, in document order.
fn cell_text(td: ElementRef<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();
    for child in td.children() {
        match child.value() {
            Node::Text(t) => push_line(&mut lines, t),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    push_line(&mut lines, &el.text().collect::<String>());
                }
            }
            _ => {}
        }
    }
    lines.join("\n")
}

fn push_line(lines: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
}

/// Does an element carry a disabled marker in any of the forms the site's
/// pagination uses?
fn element_disabled(el: ElementRef<'_>) -> bool {
    let v = el.value();
    v.attr("aria-disabled") == Some("true")
        || v.attr("disabled").is_some()
        || v.classes().any(|c| c.contains("disabled"))
}
