//! Stock Dashboard - A stock price dashboard written in Rust
//!
//! This crate provides a daily-price dashboard built around one pipeline:
//!
//! - Fetching daily OHLC history from a local price service
//! - Transforming the raw series into trend/range annotated records
//! - Rendering a dual-pane candlestick + volume chart (with `gui` feature)
//! - Coordinating per-symbol fetches with stale-response discard
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stock_dashboard::{annotate_series, DailyBar, Trend};
//!
//! let bars = vec![DailyBar {
//!     date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
//!     open: 10.0,
//!     high: 12.0,
//!     low: 9.0,
//!     close: 11.0,
//!     volume: Some(1000.0),
//! }];
//!
//! let annotated = annotate_series(&bars);
//! assert_eq!(annotated[0].trend, Trend::Up);
//! assert_eq!(annotated[0].range.as_tuple(), (10.0, 11.0, 12.0, 9.0));
//! ```

pub mod dashboard;
pub mod market;

#[cfg(feature = "gui")]
pub mod chart;

// Re-export commonly used types
pub use dashboard::{FetchCoordinator, FetchResponse};
pub use market::{
    // Constants
    Locale, MissingVolumePolicy, Trend,
    // Data objects
    AnnotatedBar, CandleRange, DailyBar, DailyPriceRequest, DailySeries,
    // Series pipeline
    annotate_series, validate_series,
    // Datafeed
    DailyPriceClient, Datafeed,
    // Errors
    DatafeedError, SeriesError,
    // Settings
    SettingValue, Settings, SETTINGS,
};

#[cfg(feature = "gui")]
pub use chart::{CandleItem, ChartWidget, SeriesManager, VolumeItem};

#[cfg(feature = "gui")]
pub use dashboard::DashboardApp;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
