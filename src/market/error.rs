//! Error types for data fetching and series validation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from the daily price datafeed.
#[derive(Debug, Error)]
pub enum DatafeedError {
    /// The configured service base URL does not parse.
    #[error("invalid datafeed url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or the response body not read.
    #[error("daily price request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("daily price service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not a valid OHLC array.
    #[error("failed to decode daily price payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Invariant violations that reject a whole OHLC series.
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("non-positive price on {date}: open={open} high={high} low={low} close={close}")]
    NonPositivePrice {
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    },

    #[error("price ordering violated on {date}: expected low <= min(open, close) <= max(open, close) <= high")]
    PriceOrdering { date: NaiveDate },

    #[error("negative volume on {date}: {volume}")]
    NegativeVolume { date: NaiveDate, volume: f64 },

    #[error("dates not strictly increasing: {prev} followed by {next}")]
    DateOrdering { prev: NaiveDate, next: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_series_error_messages() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let err = SeriesError::NegativeVolume { date, volume: -5.0 };
        assert_eq!(err.to_string(), "negative volume on 2020-01-02: -5");
    }
}
