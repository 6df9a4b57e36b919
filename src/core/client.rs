//! Public client surface + builder.
//!
//! The client owns the HTTP connection pool and every knob the extractor
//! needs: the trades URL template, page size, and the wait/settle timings
//! used to decide when a freshly loaded page is readable.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::core::CapError;

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// The paginated trades table (`pageSize` and `page` are query parameters).
pub(crate) const DEFAULT_BASE_TRADES: &str = "https://www.capitoltrades.com/trades";

/// Rows requested per page.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 96;

/// How long to keep polling for table rows before giving up.
pub(crate) const DEFAULT_WAIT_BUDGET: Duration = Duration::from_secs(30);

/// Delay between polls while waiting for table rows.
pub(crate) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Grace period after a page navigation before its table is read.
pub(crate) const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(4);

/// HTTP client + crawl configuration.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct CapClient {
    http: Client,
    base_trades: Url,
    page_size: u32,
    wait_budget: Duration,
    poll_interval: Duration,
    settle_delay: Duration,
}

impl CapClient {
    /// Create a new builder.
    pub fn builder() -> CapClientBuilder {
        CapClientBuilder::default()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// The URL of one page of the trades table.
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_trades.clone();
        url.query_pairs_mut()
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("page", &page.to_string());
        url
    }

    pub(crate) fn wait_budget(&self) -> Duration {
        self.wait_budget
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub(crate) fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

/* ----------------------- Builder ----------------------- */

/// Builder for [`CapClient`].
#[derive(Debug, Default)]
pub struct CapClientBuilder {
    user_agent: Option<String>,
    base_trades: Option<Url>,
    page_size: Option<u32>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    wait_budget: Option<Duration>,
    poll_interval: Option<Duration>,
    settle_delay: Option<Duration>,
}

impl CapClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the trades table base URL (tests point this at a mock server).
    #[must_use]
    pub fn base_trades(mut self, url: Url) -> Self {
        self.base_trades = Some(url);
        self
    }

    /// Rows requested per page (default 96).
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Total request timeout.
    #[must_use]
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = Some(d);
        self
    }

    /// Connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, d: Duration) -> Self {
        self.connect_timeout = Some(d);
        self
    }

    /// How long the extractor waits for table rows before erroring out.
    #[must_use]
    pub fn wait_budget(mut self, d: Duration) -> Self {
        self.wait_budget = Some(d);
        self
    }

    /// Delay between polls while waiting for table rows.
    #[must_use]
    pub fn poll_interval(mut self, d: Duration) -> Self {
        self.poll_interval = Some(d);
        self
    }

    /// Grace period applied after each page navigation.
    #[must_use]
    pub fn settle_delay(mut self, d: Duration) -> Self {
        self.settle_delay = Some(d);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<CapClient, CapError> {
        let mut b = Client::builder()
            .user_agent(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()));
        if let Some(t) = self.timeout {
            b = b.timeout(t);
        }
        if let Some(t) = self.connect_timeout {
            b = b.connect_timeout(t);
        }
        let http = b.build()?;

        let base_trades = match self.base_trades {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_TRADES)?,
        };

        Ok(CapClient {
            http,
            base_trades,
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            wait_budget: self.wait_budget.unwrap_or(DEFAULT_WAIT_BUDGET),
            poll_interval: self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
            settle_delay: self.settle_delay.unwrap_or(DEFAULT_SETTLE_DELAY),
        })
    }
}
