//! Series transformation for chart rendering.
//!
//! [`annotate_series`] derives, per OHLC record, the trend classification and
//! the candle range used by the renderer. It is a pure mapping: output length
//! and order always match the input, and no validation happens here.
//! [`validate_series`] is the separate gate the dashboard runs before
//! transforming, so inconsistent candles are rejected rather than drawn.

use super::error::SeriesError;
use super::object::{AnnotatedBar, DailyBar};

/// Annotate an ordered OHLC sequence for rendering.
///
/// Each record maps to exactly one [`AnnotatedBar`]: `trend` is `Up` when
/// `open <= close` and `Down` otherwise, `range` is the `(open, close, high,
/// low)` extents. Records are neither reordered, filtered nor deduplicated,
/// and malformed records pass through untouched.
pub fn annotate_series(bars: &[DailyBar]) -> Vec<AnnotatedBar> {
    bars.iter().map(AnnotatedBar::from_bar).collect()
}

/// Check an ordered OHLC sequence against the series invariants.
///
/// The whole series is rejected on the first violation: non-positive prices,
/// broken `low <= min(open, close) <= max(open, close) <= high` ordering,
/// negative volume, or dates that are not strictly increasing.
pub fn validate_series(bars: &[DailyBar]) -> Result<(), SeriesError> {
    for bar in bars {
        if bar.open <= 0.0 || bar.high <= 0.0 || bar.low <= 0.0 || bar.close <= 0.0 {
            return Err(SeriesError::NonPositivePrice {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
            });
        }

        let body_low = bar.open.min(bar.close);
        let body_high = bar.open.max(bar.close);
        if bar.low > body_low || body_high > bar.high {
            return Err(SeriesError::PriceOrdering { date: bar.date });
        }

        if let Some(volume) = bar.volume {
            if volume < 0.0 {
                return Err(SeriesError::NegativeVolume { date: bar.date, volume });
            }
        }
    }

    for pair in bars.windows(2) {
        if pair[0].date >= pair[1].date {
            return Err(SeriesError::DateOrdering {
                prev: pair[0].date,
                next: pair[1].date,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::constant::Trend;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: Option<f64>) -> DailyBar {
        DailyBar { date, open, high, low, close, volume }
    }

    #[test]
    fn test_annotate_single_up_bar() {
        let bars = vec![bar(ymd(2020, 1, 2), 10.0, 12.0, 9.0, 11.0, Some(1000.0))];
        let annotated = annotate_series(&bars);

        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].trend, Trend::Up);
        assert_eq!(annotated[0].range.as_tuple(), (10.0, 11.0, 12.0, 9.0));
        assert_eq!(annotated[0].volume, Some(1000.0));
    }

    #[test]
    fn test_annotate_trend_classification() {
        let bars = vec![
            bar(ymd(2020, 1, 2), 10.0, 12.0, 9.0, 11.0, None),
            bar(ymd(2020, 1, 3), 11.0, 11.5, 9.5, 10.0, None),
            bar(ymd(2020, 1, 6), 10.0, 10.5, 9.5, 10.0, None),
        ];
        let annotated = annotate_series(&bars);

        assert_eq!(annotated[0].trend, Trend::Up);
        assert_eq!(annotated[1].trend, Trend::Down);
        // open == close ties go to Up
        assert_eq!(annotated[2].trend, Trend::Up);
    }

    #[test]
    fn test_annotate_preserves_length_and_order() {
        let bars: Vec<_> = (1..=20)
            .map(|d| bar(ymd(2020, 1, d), 10.0, 12.0, 9.0, 11.0, Some(d as f64)))
            .collect();
        let annotated = annotate_series(&bars);

        assert_eq!(annotated.len(), bars.len());
        for (raw, cooked) in bars.iter().zip(&annotated) {
            assert_eq!(raw.date, cooked.date);
        }
    }

    #[test]
    fn test_annotate_empty_series() {
        assert!(annotate_series(&[]).is_empty());
    }

    #[test]
    fn test_annotate_passes_malformed_through() {
        // high < low violates the invariants; the transformer does not care.
        let bars = vec![bar(ymd(2020, 1, 2), 10.0, 8.0, 12.0, 11.0, None)];
        let annotated = annotate_series(&bars);
        assert_eq!(annotated[0].range.as_tuple(), (10.0, 11.0, 8.0, 12.0));
    }

    #[test]
    fn test_validate_accepts_well_formed_series() {
        let bars = vec![
            bar(ymd(2020, 1, 2), 10.0, 12.0, 9.0, 11.0, Some(1000.0)),
            bar(ymd(2020, 1, 3), 11.0, 11.5, 9.5, 10.0, None),
        ];
        assert!(validate_series(&bars).is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_extremes() {
        let bars = vec![bar(ymd(2020, 1, 2), 10.0, 8.0, 12.0, 11.0, None)];
        assert_eq!(
            validate_series(&bars),
            Err(SeriesError::PriceOrdering { date: ymd(2020, 1, 2) })
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let bars = vec![bar(ymd(2020, 1, 2), 0.0, 12.0, 9.0, 11.0, None)];
        assert!(matches!(
            validate_series(&bars),
            Err(SeriesError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_volume() {
        let bars = vec![bar(ymd(2020, 1, 2), 10.0, 12.0, 9.0, 11.0, Some(-1.0))];
        assert_eq!(
            validate_series(&bars),
            Err(SeriesError::NegativeVolume { date: ymd(2020, 1, 2), volume: -1.0 })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_dates() {
        let bars = vec![
            bar(ymd(2020, 1, 2), 10.0, 12.0, 9.0, 11.0, None),
            bar(ymd(2020, 1, 2), 11.0, 12.0, 9.0, 11.5, None),
        ];
        assert_eq!(
            validate_series(&bars),
            Err(SeriesError::DateOrdering { prev: ymd(2020, 1, 2), next: ymd(2020, 1, 2) })
        );
    }

    #[test]
    fn test_validate_empty_series() {
        assert!(validate_series(&[]).is_ok());
    }
}
