//! Chart items for rendering candlesticks and volume bars.

use egui::{Pos2, Rect, Stroke, Ui};

use crate::market::constant::Locale;

use super::base::{format_price, trend_color, BAR_WIDTH};
use super::manager::SeriesManager;

/// Convert a category index to the bar's center X coordinate.
///
/// Bars are evenly spaced by index regardless of calendar gaps between
/// dates; this is what makes the date axis categorical.
pub fn index_to_x(ix: usize, rect: Rect, count: usize) -> f32 {
    let bar_width = rect.width() / count as f32;
    rect.left() + ix as f32 * bar_width + bar_width * 0.5
}

/// Convert a value to a screen Y coordinate within a pane
pub fn value_to_y(value: f64, rect: Rect, y_min: f64, y_max: f64) -> f32 {
    let y_range = y_max - y_min;
    if y_range == 0.0 {
        return rect.center().y;
    }
    let normalized = (value - y_min) / y_range;
    rect.bottom() - (normalized as f32 * rect.height())
}

/// Trait for chart items that can be drawn into a pane
pub trait ChartItem {
    /// Get the Y-axis extent for the held series
    fn y_range(&self, manager: &SeriesManager) -> (f64, f64);

    /// Get the info box text for a category index
    fn info_text(&self, manager: &SeriesManager, ix: usize, locale: Locale, decimals: usize) -> String;

    /// Draw the item into the pane rectangle
    fn draw(&self, ui: &mut Ui, manager: &SeriesManager, rect: Rect, y_min: f64, y_max: f64);
}

/// Candlestick chart item
#[derive(Default)]
pub struct CandleItem;

impl CandleItem {
    pub fn new() -> Self {
        Self
    }
}

impl ChartItem for CandleItem {
    fn y_range(&self, manager: &SeriesManager) -> (f64, f64) {
        manager.price_range()
    }

    fn info_text(&self, manager: &SeriesManager, ix: usize, locale: Locale, decimals: usize) -> String {
        if let Some(bar) = manager.bar(ix) {
            format!(
                "{}\n{}\n\n{}\n{}\n\n{}\n{}\n\n{}\n{}\n\n{}\n{}",
                locale.date_label(),
                bar.date.format("%Y-%m-%d"),
                locale.open_label(),
                format_price(bar.range.open, decimals),
                locale.close_label(),
                format_price(bar.range.close, decimals),
                locale.high_label(),
                format_price(bar.range.high, decimals),
                locale.low_label(),
                format_price(bar.range.low, decimals),
            )
        } else {
            String::new()
        }
    }

    fn draw(&self, ui: &mut Ui, manager: &SeriesManager, rect: Rect, y_min: f64, y_max: f64) {
        let painter = ui.painter();
        let count = manager.count();
        if count == 0 {
            return;
        }

        let bar_pixel_width = rect.width() / count as f32;
        let candle_width = (bar_pixel_width * BAR_WIDTH * 2.0).max(1.0);

        for (ix, bar) in manager.bars().iter().enumerate() {
            let x = index_to_x(ix, rect, count);
            let color = trend_color(bar.trend);
            let stroke = Stroke::new(1.0, color);

            // Wick between high and low
            let high_y = value_to_y(bar.range.high, rect, y_min, y_max);
            let low_y = value_to_y(bar.range.low, rect, y_min, y_max);
            painter.line_segment([Pos2::new(x, high_y), Pos2::new(x, low_y)], stroke);

            // Body between open and close
            let open_y = value_to_y(bar.range.open, rect, y_min, y_max);
            let close_y = value_to_y(bar.range.close, rect, y_min, y_max);

            if (open_y - close_y).abs() < 1.0 {
                // Horizontal line for doji
                painter.line_segment(
                    [
                        Pos2::new(x - candle_width * 0.5, open_y),
                        Pos2::new(x + candle_width * 0.5, open_y),
                    ],
                    stroke,
                );
            } else {
                let body_rect = Rect::from_min_max(
                    Pos2::new(x - candle_width * 0.5, open_y.min(close_y)),
                    Pos2::new(x + candle_width * 0.5, open_y.max(close_y)),
                );
                painter.rect_filled(body_rect, 0.0, color);
            }
        }
    }
}

/// Volume bar chart item
#[derive(Default)]
pub struct VolumeItem;

impl VolumeItem {
    pub fn new() -> Self {
        Self
    }
}

impl ChartItem for VolumeItem {
    fn y_range(&self, manager: &SeriesManager) -> (f64, f64) {
        manager.volume_range()
    }

    fn info_text(&self, manager: &SeriesManager, ix: usize, locale: Locale, _decimals: usize) -> String {
        match manager.bar_volume(ix) {
            Some(volume) => format!("{}\n{:.0}", locale.volume_label(), volume),
            None => String::new(),
        }
    }

    fn draw(&self, ui: &mut Ui, manager: &SeriesManager, rect: Rect, _y_min: f64, y_max: f64) {
        let painter = ui.painter();
        let count = manager.count();
        if count == 0 || y_max == 0.0 {
            return;
        }

        let bar_pixel_width = rect.width() / count as f32;
        let volume_bar_width = (bar_pixel_width * BAR_WIDTH * 2.0).max(1.0);

        for (ix, bar) in manager.bars().iter().enumerate() {
            // Omitted volumes draw no bar at all
            let Some(volume) = manager.bar_volume(ix) else {
                continue;
            };

            let x = index_to_x(ix, rect, count);
            let color = trend_color(bar.trend);

            let top_y = value_to_y(volume, rect, 0.0, y_max);
            let bottom_y = rect.bottom();

            let bar_rect = Rect::from_min_max(
                Pos2::new(x - volume_bar_width * 0.5, top_y),
                Pos2::new(x + volume_bar_width * 0.5, bottom_y),
            );

            painter.rect_filled(bar_rect, 0.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::constant::MissingVolumePolicy;
    use crate::market::object::{DailyBar, DailySeries};
    use crate::market::series::annotate_series;
    use chrono::NaiveDate;

    fn manager_with_one_bar() -> SeriesManager {
        let bars = vec![DailyBar {
            date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: Some(1000.0),
        }];
        let mut manager = SeriesManager::new(MissingVolumePolicy::Zero);
        manager.replace(DailySeries::new("msft", annotate_series(&bars)));
        manager
    }

    #[test]
    fn test_index_to_x_even_spacing() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0));
        assert_eq!(index_to_x(0, rect, 4), 12.5);
        assert_eq!(index_to_x(3, rect, 4), 87.5);
    }

    #[test]
    fn test_value_to_y_maps_extents() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0));
        assert_eq!(value_to_y(0.0, rect, 0.0, 10.0), 100.0);
        assert_eq!(value_to_y(10.0, rect, 0.0, 10.0), 0.0);
        // degenerate range falls to the pane center
        assert_eq!(value_to_y(5.0, rect, 5.0, 5.0), 50.0);
    }

    #[test]
    fn test_candle_info_text_locales() {
        let manager = manager_with_one_bar();
        let item = CandleItem::new();

        let zh = item.info_text(&manager, 0, Locale::ZhCn, 2);
        assert!(zh.contains("开盘价"));
        assert!(zh.contains("10.00"));
        assert!(zh.contains("2020-01-02"));

        let en = item.info_text(&manager, 0, Locale::EnUs, 2);
        assert!(en.contains("Open"));
        assert!(en.contains("12.00"));
    }

    #[test]
    fn test_info_text_out_of_range() {
        let manager = manager_with_one_bar();
        assert!(CandleItem::new().info_text(&manager, 5, Locale::ZhCn, 2).is_empty());
    }

    #[test]
    fn test_volume_info_text() {
        let manager = manager_with_one_bar();
        let text = VolumeItem::new().info_text(&manager, 0, Locale::EnUs, 2);
        assert_eq!(text, "Volume\n1000");
    }
}
