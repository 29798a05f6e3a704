//! Market module - data model and service access for the dashboard.
//!
//! - **constant**: Closed enums for trend, locale and volume policy
//! - **object**: Data structures for OHLC records, annotated bars and requests
//! - **series**: The series transformer and the validation gate
//! - **datafeed**: Daily price service client
//! - **error**: Datafeed and series error types
//! - **setting**: Global settings management
//! - **logger**: Logging setup
//! - **utility**: Utility functions and path helpers

pub mod constant;
pub mod datafeed;
pub mod error;
pub mod logger;
pub mod object;
pub mod series;
pub mod setting;
pub mod utility;

// Re-exports for convenience
pub use constant::{Locale, MissingVolumePolicy, Trend};
pub use datafeed::{DailyPriceClient, Datafeed};
pub use error::{DatafeedError, SeriesError};
pub use logger::init_logger;
pub use object::{AnnotatedBar, CandleRange, DailyBar, DailyPriceRequest, DailySeries};
pub use series::{annotate_series, validate_series};
pub use setting::{SettingValue, Settings, SETTINGS};
pub use utility::{
    format_compact_date, get_file_path, get_folder_path, load_json, parse_trade_date, save_json,
    DASHBOARD_DIR, DATA_DIR,
};
