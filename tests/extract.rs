mod common;

use captrades::{CapError, PageSource, TableExtractor};

use common::Next;

#[tokio::test]
async fn reads_rows_and_encodes_cells() {
    let server = common::setup_server();
    let body = common::page_html(
        &[common::trade_row("Nancy Pelosi", "https://efts.example.gov/filing/1")],
        Next::Disabled,
    );
    let mock = common::mock_page(&server, 1, body);

    let mut source = TableExtractor::open(common::test_client(&server)).await.unwrap();
    let rows = source.read_rows().await.unwrap();

    // Re-reading serves the held snapshot; the page is fetched exactly once.
    assert_eq!(source.read_rows().await.unwrap(), rows);
    mock.assert();

    // The single-cell header row is excluded.
    assert_eq!(rows.len(), 1);
    let cells = &rows[0];
    assert_eq!(cells.len(), 10);

    // Politician cell: absolute detail link, name and role on separate lines.
    assert_eq!(
        cells[0].url(),
        Some(format!("{}/politicians/nancy-pelosi", server.base_url()).as_str())
    );
    assert_eq!(cells[0].text(), "Nancy Pelosi\nDemocratHouseCA");

    // Linkless cells are pure text.
    assert_eq!(cells[5].url(), None);
    assert_eq!(cells[5].text(), "Spouse");

    // Date cells keep their two display lines.
    assert_eq!(cells[2].text(), "8 Jan\n2025");

    // Filing cell: the link is the payload, the label is discarded later.
    assert_eq!(cells[9].url(), Some("https://efts.example.gov/filing/1"));
    assert_eq!(cells[9].text(), "View");
}

#[tokio::test]
async fn advance_moves_to_the_next_page() {
    let server = common::setup_server();
    let page1 = common::page_html(
        &[common::trade_row("Jo Smith", "https://efts.example.gov/filing/1")],
        Next::Enabled,
    );
    let page2 = common::page_html(
        &[common::trade_row("Ann Lee", "https://efts.example.gov/filing/2")],
        Next::Disabled,
    );
    common::mock_page(&server, 1, page1);
    let mock2 = common::mock_page(&server, 2, page2);

    let mut source = TableExtractor::open(common::test_client(&server)).await.unwrap();
    assert_eq!(source.page(), 1);
    assert!(format!("{source:?}").contains("TableExtractor"));

    assert!(source.advance().await.unwrap());
    mock2.assert();
    assert_eq!(source.page(), 2);

    let rows = source.read_rows().await.unwrap();
    assert_eq!(rows[0][9].url(), Some("https://efts.example.gov/filing/2"));

    // Page 2 reports no further pages.
    assert!(!source.advance().await.unwrap());
    assert_eq!(source.page(), 2);
}

#[tokio::test]
async fn advance_is_false_when_the_control_is_disabled_or_absent() {
    for next in [Next::Disabled, Next::Absent] {
        let server = common::setup_server();
        let body = common::page_html(
            &[common::trade_row("Jo Smith", "https://efts.example.gov/filing/1")],
            next,
        );
        common::mock_page(&server, 1, body);

        let mut source = TableExtractor::open(common::test_client(&server)).await.unwrap();
        assert!(!source.advance().await.unwrap(), "{next:?}");
        assert_eq!(source.page(), 1);
    }
}

#[tokio::test]
async fn missing_table_times_out_after_polling() {
    let server = common::setup_server();
    let mock = common::mock_page(
        &server,
        1,
        "<html><body><div>loading…</div></body></html>".to_string(),
    );

    let err = TableExtractor::open(common::test_client(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, CapError::ExtractorTimeout { .. }), "{err:?}");
    assert!(mock.calls() >= 2, "the extractor should poll, not one-shot");
}

#[tokio::test]
async fn server_error_surfaces_as_status() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/trades");
        then.status(503);
    });

    let err = TableExtractor::open(common::test_client(&server))
        .await
        .unwrap_err();

    assert!(
        matches!(err, CapError::Status { status: 503, .. }),
        "{err:?}"
    );
}
