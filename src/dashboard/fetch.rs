//! Fetch coordination between the UI thread and the datafeed.
//!
//! One fetch is issued per selected symbol whenever the symbol set or date
//! range changes. Responses come back over a channel drained on the UI
//! thread. Because in-flight requests are never aborted, a slow early fetch
//! could otherwise overwrite a later one for the same symbol; every request
//! therefore carries a sequence number, and any response that is no longer
//! the latest issued for its symbol is discarded on arrival.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::market::datafeed::Datafeed;
use crate::market::error::DatafeedError;
use crate::market::object::{DailyBar, DailyPriceRequest};

/// A resolved fetch, fresh or stale
pub struct FetchResponse {
    pub symbol: String,
    pub seq: u64,
    pub result: Result<Vec<DailyBar>, DatafeedError>,
}

/// Issues sequence-tagged fetches and hands back only fresh responses
pub struct FetchCoordinator {
    /// Datafeed to query
    datafeed: Arc<dyn Datafeed>,
    /// Runtime the queries run on
    runtime: tokio::runtime::Handle,
    /// Response channel back to the UI thread
    tx: Sender<FetchResponse>,
    rx: Receiver<FetchResponse>,
    /// Latest issued sequence per symbol
    latest: HashMap<String, u64>,
    /// Monotonic sequence counter
    next_seq: u64,
    /// Requests issued whose responses have not arrived yet
    in_flight: usize,
}

impl FetchCoordinator {
    /// Create a coordinator spawning its queries on the given runtime
    pub fn new(datafeed: Arc<dyn Datafeed>, runtime: tokio::runtime::Handle) -> Self {
        let (tx, rx) = channel();
        Self {
            datafeed,
            runtime,
            tx,
            rx,
            latest: HashMap::new(),
            next_seq: 0,
            in_flight: 0,
        }
    }

    /// Issue a fetch for one symbol and date window.
    ///
    /// The returned sequence number supersedes every earlier request for the
    /// same symbol; their responses will be discarded by [`Self::poll`].
    pub fn request(&mut self, req: DailyPriceRequest) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest.insert(req.symbol.clone(), seq);
        self.in_flight += 1;

        debug!("issuing daily price fetch #{} for {}", seq, req.symbol);

        let datafeed = self.datafeed.clone();
        let tx = self.tx.clone();
        let symbol = req.symbol.clone();

        self.runtime.spawn(async move {
            let result = datafeed.query_daily_history(req).await;
            let _ = tx.send(FetchResponse { symbol, seq, result });
        });

        seq
    }

    /// Whether a sequence number is still the latest issued for a symbol
    pub fn is_current(&self, symbol: &str, seq: u64) -> bool {
        self.latest.get(symbol).copied() == Some(seq)
    }

    /// Whether any issued response is still outstanding, stale ones included
    pub fn has_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    /// Drain resolved fetches, dropping every stale response
    pub fn poll(&mut self) -> Vec<FetchResponse> {
        let mut fresh = Vec::new();

        while let Ok(response) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);

            if self.is_current(&response.symbol, response.seq) {
                fresh.push(response);
            } else {
                warn!(
                    "discarding stale daily price response #{} for {}",
                    response.seq, response.symbol
                );
            }
        }

        fresh
    }

    /// Forget a symbol, so any response still in flight is discarded
    pub fn forget(&mut self, symbol: &str) {
        self.latest.remove(symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::time::Duration;

    struct StaticDatafeed {
        bars: Vec<DailyBar>,
    }

    #[async_trait]
    impl Datafeed for StaticDatafeed {
        async fn query_daily_history(
            &self,
            _req: DailyPriceRequest,
        ) -> Result<Vec<DailyBar>, DatafeedError> {
            Ok(self.bars.clone())
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_bars() -> Vec<DailyBar> {
        vec![DailyBar {
            date: ymd(2020, 1, 2),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: Some(1000.0),
        }]
    }

    fn request(symbol: &str) -> DailyPriceRequest {
        DailyPriceRequest::new(symbol, ymd(2020, 1, 1), ymd(2020, 1, 31))
    }

    async fn drain(coordinator: &mut FetchCoordinator, rounds: usize) -> Vec<FetchResponse> {
        let mut responses = Vec::new();
        for _ in 0..rounds {
            tokio::time::sleep(Duration::from_millis(10)).await;
            responses.extend(coordinator.poll());
        }
        responses
    }

    #[tokio::test]
    async fn test_fresh_response_is_delivered() {
        let datafeed = Arc::new(StaticDatafeed { bars: sample_bars() });
        let mut coordinator = FetchCoordinator::new(datafeed, tokio::runtime::Handle::current());

        coordinator.request(request("msft"));
        let responses = drain(&mut coordinator, 20).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].symbol, "msft");
        assert_eq!(responses[0].result.as_ref().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_request_is_discarded() {
        let datafeed = Arc::new(StaticDatafeed { bars: sample_bars() });
        let mut coordinator = FetchCoordinator::new(datafeed, tokio::runtime::Handle::current());

        let first = coordinator.request(request("msft"));
        let second = coordinator.request(request("msft"));

        assert!(!coordinator.is_current("msft", first));
        assert!(coordinator.is_current("msft", second));
        assert!(coordinator.has_in_flight());

        // Both resolve; only the latest survives the poll
        let responses = drain(&mut coordinator, 20).await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].seq, second);
        assert!(!coordinator.has_in_flight());
    }

    #[tokio::test]
    async fn test_symbols_sequence_independently() {
        let datafeed = Arc::new(StaticDatafeed { bars: sample_bars() });
        let mut coordinator = FetchCoordinator::new(datafeed, tokio::runtime::Handle::current());

        let msft = coordinator.request(request("msft"));
        let bili = coordinator.request(request("bili"));

        assert!(coordinator.is_current("msft", msft));
        assert!(coordinator.is_current("bili", bili));

        let responses = drain(&mut coordinator, 20).await;
        assert_eq!(responses.len(), 2);
    }

    #[tokio::test]
    async fn test_forgotten_symbol_is_discarded() {
        let datafeed = Arc::new(StaticDatafeed { bars: sample_bars() });
        let mut coordinator = FetchCoordinator::new(datafeed, tokio::runtime::Handle::current());

        coordinator.request(request("msft"));
        coordinator.forget("msft");

        let responses = drain(&mut coordinator, 20).await;
        assert!(responses.is_empty());
    }
}
