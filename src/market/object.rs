//! Basic data structures used throughout the dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::constant::Trend;
use super::utility::format_compact_date;

/// One daily OHLC observation as returned by the daily price service.
///
/// The wire format is a JSON object with `date`, the four prices and an
/// optional `volume`. Dates arrive either in canonical `YYYY-MM-DD` form or
/// compact `YYYYMMDD` form; both are accepted on input, canonical form is
/// written on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    #[serde(with = "trade_date")]
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// Serde adapter for the two date forms the service emits.
mod trade_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::market::utility::parse_trade_date;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_trade_date(&text).map_err(de::Error::custom)
    }
}

/// Candle extents in the order the candle renderer consumes them.
///
/// Open and close come before high and low: the first pair bounds the candle
/// body, the second pair bounds the wick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleRange {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

impl CandleRange {
    pub fn new(open: f64, close: f64, high: f64, low: f64) -> Self {
        Self { open, close, high, low }
    }

    /// The range as an `(open, close, high, low)` tuple.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.open, self.close, self.high, self.low)
    }

    /// Upper bound of the candle body.
    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }

    /// Lower bound of the candle body.
    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }
}

/// One transformed trading period, produced by the series transformer and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    pub date: NaiveDate,
    pub volume: Option<f64>,
    pub trend: Trend,
    pub range: CandleRange,
}

impl AnnotatedBar {
    /// Derive the annotation for a single OHLC record.
    pub fn from_bar(bar: &DailyBar) -> Self {
        Self {
            date: bar.date,
            volume: bar.volume,
            trend: Trend::of(bar.open, bar.close),
            range: CandleRange::new(bar.open, bar.close, bar.high, bar.low),
        }
    }
}

/// An annotated series for exactly one ticker symbol over one queried range.
///
/// A series is created fresh from every successful fetch response; the prior
/// series for the symbol is discarded wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub symbol: String,
    pub bars: Vec<AnnotatedBar>,
}

impl DailySeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<AnnotatedBar>) -> Self {
        Self { symbol: symbol.into(), bars }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}

/// Request sent to the daily price service for one symbol and date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPriceRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DailyPriceRequest {
    /// Create a new DailyPriceRequest
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self { symbol: symbol.into(), start, end }
    }

    /// Start date in the compact `YYYYMMDD` form the service expects.
    pub fn compact_start(&self) -> String {
        format_compact_date(self.start)
    }

    /// End date in the compact `YYYYMMDD` form the service expects.
    pub fn compact_end(&self) -> String {
        format_compact_date(self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::constant::Trend;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_bar_wire_canonical_date() {
        let bar: DailyBar = serde_json::from_str(
            r#"{"date":"2020-01-02","open":10.0,"high":12.0,"low":9.0,"close":11.0,"volume":1000}"#,
        )
        .unwrap();
        assert_eq!(bar.date, ymd(2020, 1, 2));
        assert_eq!(bar.volume, Some(1000.0));
    }

    #[test]
    fn test_daily_bar_wire_compact_date_and_missing_volume() {
        let bar: DailyBar = serde_json::from_str(
            r#"{"date":"20200102","open":10.0,"high":12.0,"low":9.0,"close":11.0}"#,
        )
        .unwrap();
        assert_eq!(bar.date, ymd(2020, 1, 2));
        assert_eq!(bar.volume, None);
    }

    #[test]
    fn test_annotated_bar_from_bar() {
        let bar = DailyBar {
            date: ymd(2020, 1, 2),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: Some(1000.0),
        };
        let annotated = AnnotatedBar::from_bar(&bar);
        assert_eq!(annotated.trend, Trend::Up);
        assert_eq!(annotated.range.as_tuple(), (10.0, 11.0, 12.0, 9.0));
    }

    #[test]
    fn test_candle_range_body_extents() {
        let range = CandleRange::new(11.0, 10.0, 12.0, 9.0);
        assert_eq!(range.body_high(), 11.0);
        assert_eq!(range.body_low(), 10.0);
    }

    #[test]
    fn test_request_compact_dates() {
        let req = DailyPriceRequest::new("msft", ymd(2020, 1, 2), ymd(2020, 3, 15));
        assert_eq!(req.compact_start(), "20200102");
        assert_eq!(req.compact_end(), "20200315");
    }
}
