//! General constant enums used in the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price trend of a single trading period, derived from open and close.
///
/// A period where the close is at or above the open counts as `Up`;
/// the tie `open == close` deliberately goes to `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Price up (上涨)
    Up,
    /// Price down (下跌)
    Down,
}

impl Trend {
    /// Classify a period from its open and close prices.
    pub fn of(open: f64, close: f64) -> Self {
        if open <= close {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "上涨"),
            Trend::Down => write!(f, "下跌"),
        }
    }
}

/// Display locale for chart labels and tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Simplified Chinese (简体中文)
    #[default]
    ZhCn,
    /// English (US)
    EnUs,
}

impl Locale {
    /// Parse a locale from a language tag such as `zh_CN` or `en_US`.
    ///
    /// Unknown tags fall back to Chinese, matching the default settings.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "en_US" | "en" => Locale::EnUs,
            _ => Locale::ZhCn,
        }
    }

    pub fn date_label(&self) -> &'static str {
        match self {
            Locale::ZhCn => "日期",
            Locale::EnUs => "Date",
        }
    }

    pub fn open_label(&self) -> &'static str {
        match self {
            Locale::ZhCn => "开盘价",
            Locale::EnUs => "Open",
        }
    }

    pub fn close_label(&self) -> &'static str {
        match self {
            Locale::ZhCn => "收盘价",
            Locale::EnUs => "Close",
        }
    }

    pub fn high_label(&self) -> &'static str {
        match self {
            Locale::ZhCn => "最高价",
            Locale::EnUs => "High",
        }
    }

    pub fn low_label(&self) -> &'static str {
        match self {
            Locale::ZhCn => "最低价",
            Locale::EnUs => "Low",
        }
    }

    pub fn volume_label(&self) -> &'static str {
        match self {
            Locale::ZhCn => "成交量",
            Locale::EnUs => "Volume",
        }
    }

    pub fn no_data_label(&self) -> &'static str {
        match self {
            Locale::ZhCn => "暂无数据",
            Locale::EnUs => "No data",
        }
    }
}

/// Policy for records without a volume value when the volume pane is drawn.
///
/// The daily price service does not always include volume, and the two
/// reasonable renderings differ visibly, so the choice is configuration
/// (`chart.missing_volume`) rather than a hardcoded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MissingVolumePolicy {
    /// Draw a zero-height bar for the period.
    #[default]
    Zero,
    /// Draw no bar at all for the period.
    Omit,
}

impl MissingVolumePolicy {
    /// Parse a policy from its settings name (`zero` or `omit`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "omit" => MissingVolumePolicy::Omit,
            _ => MissingVolumePolicy::Zero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_of() {
        assert_eq!(Trend::of(10.0, 11.0), Trend::Up);
        assert_eq!(Trend::of(11.0, 10.0), Trend::Down);
    }

    #[test]
    fn test_trend_tie_goes_up() {
        assert_eq!(Trend::of(10.0, 10.0), Trend::Up);
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("zh_CN"), Locale::ZhCn);
        assert_eq!(Locale::from_tag("en_US"), Locale::EnUs);
        assert_eq!(Locale::from_tag("fr_FR"), Locale::ZhCn);
    }

    #[test]
    fn test_missing_volume_policy_from_name() {
        assert_eq!(MissingVolumePolicy::from_name("zero"), MissingVolumePolicy::Zero);
        assert_eq!(MissingVolumePolicy::from_name("omit"), MissingVolumePolicy::Omit);
        assert_eq!(MissingVolumePolicy::from_name("???"), MissingVolumePolicy::Zero);
    }
}
