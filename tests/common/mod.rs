#![allow(dead_code)]

use std::time::Duration;

use chrono::NaiveDate;
use httpmock::{Method::GET, Mock, MockServer};
use url::Url;

use captrades::record::RawCells;
use captrades::{CapClient, CellToken, TradeRecord};

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// Client pointed at the mock server, with waits tightened so failure tests
/// stay fast.
pub fn test_client(server: &MockServer) -> CapClient {
    CapClient::builder()
        .base_trades(Url::parse(&format!("{}/trades", server.base_url())).unwrap())
        .page_size(3)
        .wait_budget(Duration::from_millis(200))
        .poll_interval(Duration::from_millis(20))
        .settle_delay(Duration::ZERO)
        .build()
        .unwrap()
}

/// Pagination state rendered into a fixture page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Enabled,
    Disabled,
    Absent,
}

/// A full trades-page document around the given `<tr>` fragments.
pub fn page_html(rows: &[String], next: Next) -> String {
    let pagination = match next {
        Next::Enabled => {
            r#"<li><a aria-label="Go to next page" href="?page=2">Next</a></li>"#
        }
        Next::Disabled => {
            r#"<li class="disabled"><a aria-label="Go to next page" aria-disabled="true">Next</a></li>"#
        }
        Next::Absent => "",
    };
    // The single-cell tbody row mimics the ad/separator rows the live table
    // interleaves; extractors must skip it.
    format!(
        "<html><body><table><thead><tr><th>Politician</th></tr></thead>\
         <tbody>{}<tr><td colspan=\"10\">Sponsored</td></tr></tbody></table>\
         <nav><ul>{pagination}</ul></nav></body></html>",
        rows.join("")
    )
}

/// One well-formed trade row. `file_ref` doubles as the dedup key; the rest
/// of the columns carry plausible fixed content.
pub fn trade_row(politician: &str, file_ref: &str) -> String {
    format!(
        r#"<tr>
            <td><div><a href="/politicians/{slug}">{politician}</a></div><div>DemocratHouseCA</div></td>
            <td><div><a href="/issuers/427402">NVIDIA Corp</a></div><div>NVDA:US</div></td>
            <td><div>8 Jan</div><div>2025</div></td>
            <td><div>24 Dec</div><div>2024</div></td>
            <td><div>15</div><div>days</div></td>
            <td>Spouse</td>
            <td>buy</td>
            <td>1M&ndash;5M</td>
            <td>$140.00</td>
            <td><a href="{file_ref}">View</a></td>
        </tr>"#,
        slug = politician.to_ascii_lowercase().replace(' ', "-"),
    )
}

/// A row missing its last column, for layout-change tests.
pub fn nine_column_row() -> String {
    r#"<tr>
        <td><div><a href="/politicians/x">Jane Doe</a></div><div>RepublicanSenateTX</div></td>
        <td><div><a href="/issuers/1">Acme Corp</a></div><div>ACME:US</div></td>
        <td><div>8 Jan</div><div>2025</div></td>
        <td><div>24 Dec</div><div>2024</div></td>
        <td><div>15</div><div>days</div></td>
        <td>Self</td>
        <td>sell</td>
        <td>1K&ndash;15K</td>
        <td>$12.00</td>
    </tr>"#
        .to_string()
}

/// Serve `body` for the given trades page number.
pub fn mock_page<'a>(server: &'a MockServer, page: u32, body: String) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/trades")
            .query_param("page", page.to_string());
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(body);
    })
}

/// Raw cells for one already-encoded row, as a scripted page source would
/// hand them to the crawl loop.
pub fn raw_cells(file_ref: &str) -> RawCells {
    vec![
        CellToken::new(
            "Jane Doe\nDemocratSenateNC",
            Some("https://example.com/politicians/jane-doe"),
        ),
        CellToken::new("Acme Corp\nACME:US", Some("https://example.com/issuers/1")),
        CellToken::new("8 Jan 2025", None),
        CellToken::new("24 Dec 2024", None),
        CellToken::new("15 days", None),
        CellToken::new("Spouse", None),
        CellToken::new("buy", None),
        CellToken::new("1K\u{2013}15K", None),
        CellToken::new("$140.00", None),
        CellToken::new("View", Some(file_ref)),
    ]
}

/// A fully populated record for store tests.
pub fn record(file_ref: &str) -> TradeRecord {
    TradeRecord {
        entity_name: "Jane Doe".into(),
        entity_url: "https://example.com/politicians/jane-doe".into(),
        entity_party: "Democrat".into(),
        entity_chamber: "Senate".into(),
        entity_state: "NC".into(),
        issuer_name: "Acme Corp".into(),
        issuer_url: "https://example.com/issuers/1".into(),
        issuer_ticker: Some("ACME:US".into()),
        file_date: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
        trade_date: NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
        filed_after: "15 days".into(),
        owner: "Spouse".into(),
        action: "buy".into(),
        size: "1K\u{2013}15K".into(),
        price: "$140.00".into(),
        file_ref: file_ref.into(),
    }
}
