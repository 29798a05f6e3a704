//! Datafeed module for querying the daily price service.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use super::error::DatafeedError;
use super::object::{DailyBar, DailyPriceRequest};
use super::setting::SETTINGS;

/// Abstract datafeed trait, the seam between the dashboard and the service.
#[async_trait]
pub trait Datafeed: Send + Sync {
    /// Initialize the datafeed connection
    async fn init(&self) -> Result<bool, DatafeedError> {
        Ok(false)
    }

    /// Query daily OHLC history for one symbol and date window,
    /// ascending by date
    async fn query_daily_history(
        &self,
        req: DailyPriceRequest,
    ) -> Result<Vec<DailyBar>, DatafeedError>;
}

/// REST client for the local daily price service.
///
/// Endpoint shape: `GET {base}/daily_price/{symbol}?start_date=...&end_date=...`
/// with compact `YYYYMMDD` dates, answering a JSON array of OHLC objects.
pub struct DailyPriceClient {
    /// HTTP client
    client: Client,
    /// Service base URL, without trailing slash
    base_url: String,
}

impl DailyPriceClient {
    /// Create a new client for the given service base URL
    pub fn new(base_url: &str) -> Result<Self, DatafeedError> {
        // Validate the base URL once up front
        Url::parse(base_url)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the global `datafeed.url` setting
    pub fn from_settings() -> Result<Self, DatafeedError> {
        let base_url = SETTINGS
            .get_string("datafeed.url")
            .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
        Self::new(&base_url)
    }

    /// Build the request URL for one query
    fn build_url(&self, req: &DailyPriceRequest) -> String {
        format!(
            "{}/daily_price/{}?start_date={}&end_date={}",
            self.base_url,
            req.symbol,
            req.compact_start(),
            req.compact_end()
        )
    }
}

#[async_trait]
impl Datafeed for DailyPriceClient {
    async fn init(&self) -> Result<bool, DatafeedError> {
        debug!("daily price service at {}", self.base_url);
        Ok(true)
    }

    async fn query_daily_history(
        &self,
        req: DailyPriceRequest,
    ) -> Result<Vec<DailyBar>, DatafeedError> {
        let url = self.build_url(&req);
        debug!("daily price request: GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("daily price service error {} for {}: {}", status, req.symbol, text);
            return Err(DatafeedError::Status { status, body: text });
        }

        let bars: Vec<DailyBar> = serde_json::from_str(&text)?;
        debug!("received {} bars for {}", bars.len(), req.symbol);
        Ok(bars)
    }
}
