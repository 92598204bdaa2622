//! Market-data REST client with tagged offline fallbacks.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the transport reports itself unavailable and every call
//! resolves to fallback data.
//!
//! ERROR HANDLING
//! ==============
//! Transport, status, and decode failures never reach callers as errors. Each
//! is logged and answered with a fixed sample payload tagged
//! `DataSource::Fallback`, so pages can flag stale data instead of showing it
//! as live.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "market_test.rs"]
mod market_test;

use serde::de::DeserializeOwned;

use super::types::{MarketQuote, NewsItem, Portfolio, StockDetail};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    #[error("market API is not available outside the browser")]
    Unavailable,
    #[error("market request failed: {0}")]
    Request(String),
    #[error("market API returned status {status}")]
    Status { status: u16 },
    #[error("market response parse failed: {0}")]
    Decode(String),
}

/// Where a payload came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback { reason: String },
}

/// A payload tagged with its provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self { data, source: DataSource::Live }
    }

    pub fn fallback(data: T, reason: impl Into<String>) -> Self {
        Self { data, source: DataSource::Fallback { reason: reason.into() } }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DataSource::Fallback { .. })
    }
}

/// GET transport returning the raw response body.
#[allow(async_fn_in_trait)]
pub trait MarketTransport {
    /// Fetch `path` relative to the API root.
    ///
    /// # Errors
    ///
    /// Returns an error for network failures and non-2xx statuses.
    async fn get(&self, path: &str) -> Result<String, MarketError>;
}

/// Browser `fetch` transport rooted at `base_url`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl MarketTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<String, MarketError> {
        let url = self.url(path);
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&url)
                .send()
                .await
                .map_err(|e| MarketError::Request(e.to_string()))?;
            if !resp.ok() {
                return Err(MarketError::Status { status: resp.status() });
            }
            resp.text()
                .await
                .map_err(|e| MarketError::Request(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(MarketError::Unavailable)
        }
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

const MARKET_DATA_PATH: &str = "/market/data";
const NEWS_PATH: &str = "/news";

/// Drop characters that would change the meaning of a path segment.
fn path_segment(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '?' | '#' | '%') && !c.is_whitespace())
        .collect()
}

fn stock_path(symbol: &str) -> String {
    format!("/stocks/{}", path_segment(symbol).to_ascii_uppercase())
}

fn portfolio_path(user_id: &str) -> String {
    format!("/users/{}/portfolio", path_segment(user_id))
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct MarketClient<T> {
    transport: T,
}

impl<T: MarketTransport> MarketClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Index overview from `GET /market/data`.
    pub async fn market_data(&self) -> Sourced<Vec<MarketQuote>> {
        self.fetch(MARKET_DATA_PATH, fallback_market_data).await
    }

    /// Instrument detail from `GET /stocks/{symbol}`.
    pub async fn stock(&self, symbol: &str) -> Sourced<StockDetail> {
        let symbol_upper = path_segment(symbol).to_ascii_uppercase();
        self.fetch(&stock_path(symbol), || fallback_stock(&symbol_upper))
            .await
    }

    /// Holdings from `GET /users/{userId}/portfolio`.
    pub async fn portfolio(&self, user_id: &str) -> Sourced<Portfolio> {
        self.fetch(&portfolio_path(user_id), || fallback_portfolio(user_id))
            .await
    }

    /// Headlines from `GET /news`.
    pub async fn news(&self) -> Sourced<Vec<NewsItem>> {
        self.fetch(NEWS_PATH, fallback_news).await
    }

    async fn fetch<D, F>(&self, path: &str, fallback: F) -> Sourced<D>
    where
        D: DeserializeOwned,
        F: FnOnce() -> D,
    {
        match self.get_json(path).await {
            Ok(data) => Sourced::live(data),
            Err(e) => {
                leptos::logging::warn!("serving fallback for {path}: {e}");
                Sourced::fallback(fallback(), e.to_string())
            }
        }
    }

    async fn get_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, MarketError> {
        let body = self.transport.get(path).await?;
        serde_json::from_str(&body).map_err(|e| MarketError::Decode(e.to_string()))
    }
}

// =============================================================================
// FALLBACK DATA
// =============================================================================

/// The two index funds shown when `/market/data` is unreachable.
pub fn fallback_market_data() -> Vec<MarketQuote> {
    vec![
        MarketQuote {
            symbol: "SPY".to_owned(),
            name: "SPDR S&P 500 ETF Trust".to_owned(),
            price: 445.20,
            change: 2.15,
            change_percent: 0.48,
            volume: 45_000_000,
        },
        MarketQuote {
            symbol: "QQQ".to_owned(),
            name: "Invesco QQQ Trust".to_owned(),
            price: 375.80,
            change: -1.20,
            change_percent: -0.32,
            volume: 32_000_000,
        },
    ]
}

pub fn fallback_stock(symbol: &str) -> StockDetail {
    StockDetail {
        symbol: symbol.to_owned(),
        name: format!("{symbol} (sample)"),
        price: 150.00,
        change: 1.25,
        change_percent: 0.84,
        volume: 1_000_000,
        market_cap: None,
    }
}

pub fn fallback_portfolio(user_id: &str) -> Portfolio {
    Portfolio { user_id: user_id.to_owned(), total_value: 0.0, holdings: Vec::new() }
}

pub fn fallback_news() -> Vec<NewsItem> {
    vec![NewsItem {
        id: "sample-1".to_owned(),
        title: "Markets steady as investors await economic data".to_owned(),
        summary: "Live headlines are unavailable; this is sample content.".to_owned(),
        source: "FinAssist".to_owned(),
        url: None,
        published_at: "2024-01-01T00:00:00Z".to_owned(),
    }]
}
