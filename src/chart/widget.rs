//! Chart widget drawing the candlestick and volume panes.

use egui::{Color32, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui, Vec2};

use crate::market::constant::{Locale, MissingVolumePolicy};
use crate::market::object::DailySeries;
use crate::market::setting::SETTINGS;

use super::base::{
    calculate_axis_ticks, format_price, format_volume_k, AXIS_X_HEIGHT, AXIS_Y_WIDTH,
    CURSOR_COLOR, GREY_COLOR, INFO_BOX_HEIGHT, INFO_BOX_WIDTH, MARGIN, WHITE_COLOR,
};
use super::item::{index_to_x, value_to_y, CandleItem, ChartItem, VolumeItem};
use super::manager::SeriesManager;

/// Main chart widget.
///
/// The widget is an explicit handle owned by its caller: installing data
/// happens through [`ChartWidget::set_series`], drawing through
/// [`ChartWidget::show`]. When to re-render is entirely the caller's
/// decision; the widget itself never fetches or schedules anything.
pub struct ChartWidget {
    /// Series state
    manager: SeriesManager,
    /// Candlestick item
    candle_item: CandleItem,
    /// Volume item
    volume_item: VolumeItem,
    /// Cursor state
    cursor: ChartCursor,
    /// Label locale
    locale: Locale,
    /// Show volume pane
    show_volume: bool,
    /// Volume pane height ratio (0.0 - 1.0)
    volume_height_ratio: f32,
    /// Price decimal places
    price_decimals: usize,
}

impl Default for ChartWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartWidget {
    /// Create a new chart widget configured from the global settings
    pub fn new() -> Self {
        let locale = Locale::from_tag(
            SETTINGS
                .get_string("language")
                .unwrap_or_else(|| "zh_CN".to_string())
                .as_str(),
        );
        let missing_volume = MissingVolumePolicy::from_name(
            SETTINGS
                .get_string("chart.missing_volume")
                .unwrap_or_else(|| "zero".to_string())
                .as_str(),
        );
        let volume_height_ratio = SETTINGS
            .get_float("chart.volume_height_ratio")
            .unwrap_or(0.3) as f32;

        Self {
            manager: SeriesManager::new(missing_volume),
            candle_item: CandleItem::new(),
            volume_item: VolumeItem::new(),
            cursor: ChartCursor::new(),
            locale,
            show_volume: true,
            volume_height_ratio: volume_height_ratio.clamp(0.1, 0.5),
            price_decimals: 2,
        }
    }

    /// Set the label locale
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Set the price decimal places
    pub fn set_price_decimals(&mut self, decimals: usize) {
        self.price_decimals = decimals;
    }

    /// Set whether to show the volume pane
    pub fn set_show_volume(&mut self, show: bool) {
        self.show_volume = show;
    }

    /// Set the volume pane height ratio
    pub fn set_volume_height_ratio(&mut self, ratio: f32) {
        self.volume_height_ratio = ratio.clamp(0.1, 0.5);
    }

    /// Install a series, unconditionally tearing down the previous one.
    ///
    /// Re-rendering the same series is idempotent: the panes always show
    /// exactly one candle and one bar per date.
    pub fn set_series(&mut self, series: DailySeries) {
        self.manager.replace(series);
        self.cursor.clear();
    }

    /// Clear all chart state
    pub fn clear(&mut self) {
        self.manager.clear_all();
        self.cursor.clear();
    }

    /// Symbol of the displayed series
    pub fn symbol(&self) -> &str {
        self.manager.symbol()
    }

    /// Number of displayed bars
    pub fn count(&self) -> usize {
        self.manager.count()
    }

    /// Show the chart widget
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::hover());

        let rect = response.rect;

        // Layout: chart area minus margins and axis strips
        let chart_area = Rect::from_min_max(
            Pos2::new(rect.left() + MARGIN, rect.top() + MARGIN),
            Pos2::new(
                rect.right() - MARGIN - AXIS_Y_WIDTH,
                rect.bottom() - MARGIN - AXIS_X_HEIGHT,
            ),
        );

        // Price pane on top, volume pane below
        let (candle_rect, volume_rect) = if self.show_volume {
            let volume_height = chart_area.height() * self.volume_height_ratio;
            let candle_height = chart_area.height() - volume_height;

            let candle_rect = Rect::from_min_max(
                chart_area.min,
                Pos2::new(chart_area.max.x, chart_area.min.y + candle_height),
            );
            let volume_rect = Rect::from_min_max(
                Pos2::new(chart_area.min.x, chart_area.min.y + candle_height),
                chart_area.max,
            );
            (candle_rect, Some(volume_rect))
        } else {
            (chart_area, None)
        };

        if self.manager.is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.locale.no_data_label(),
                egui::FontId::proportional(20.0),
                GREY_COLOR,
            );
            return response;
        }

        // Price extent with a little headroom above and below
        let (price_min, price_max) = self.candle_item.y_range(&self.manager);
        let price_padding = (price_max - price_min) * 0.05;
        let price_min = price_min - price_padding;
        let price_max = price_max + price_padding;

        // Draw candle pane
        self.candle_item
            .draw(ui, &self.manager, candle_rect, price_min, price_max);
        painter.rect_stroke(candle_rect, 0.0, Stroke::new(1.0, GREY_COLOR), StrokeKind::Inside);
        self.draw_y_axis(ui, candle_rect, price_min, price_max, true);

        // Draw volume pane
        if let Some(vol_rect) = volume_rect {
            let (vol_min, vol_max) = self.volume_item.y_range(&self.manager);
            let vol_max = vol_max * 1.1;

            self.volume_item.draw(ui, &self.manager, vol_rect, vol_min, vol_max);
            painter.rect_stroke(vol_rect, 0.0, Stroke::new(1.0, GREY_COLOR), StrokeKind::Inside);
            self.draw_y_axis(ui, vol_rect, vol_min, vol_max, false);
        }

        // Draw the shared date axis
        self.draw_x_axis(ui, chart_area);

        // Crosshair and info box
        if let Some(hover_pos) = response.hover_pos() {
            self.cursor.update_position(
                hover_pos,
                &self.manager,
                candle_rect,
                volume_rect,
                price_min,
                price_max,
            );
            self.cursor.draw(
                ui,
                &self.manager,
                &self.candle_item,
                &self.volume_item,
                candle_rect,
                volume_rect,
                self.locale,
                self.price_decimals,
            );
        }

        response
    }

    /// Draw a Y-axis with tick labels next to a pane
    fn draw_y_axis(&self, ui: &mut Ui, pane_rect: Rect, min_val: f64, max_val: f64, is_price: bool) {
        let painter = ui.painter();
        let ticks = calculate_axis_ticks(min_val, max_val, 5);

        for tick in ticks {
            let y = value_to_y(tick, pane_rect, min_val, max_val);

            painter.line_segment(
                [
                    Pos2::new(pane_rect.right(), y),
                    Pos2::new(pane_rect.right() + 4.0, y),
                ],
                Stroke::new(1.0, GREY_COLOR),
            );

            let label = if is_price {
                format_price(tick, self.price_decimals)
            } else {
                format_volume_k(tick)
            };

            painter.text(
                Pos2::new(pane_rect.right() + 6.0, y),
                egui::Align2::LEFT_CENTER,
                label,
                egui::FontId::proportional(11.0),
                WHITE_COLOR,
            );
        }
    }

    /// Draw the categorical date axis below the panes
    fn draw_x_axis(&self, ui: &mut Ui, chart_area: Rect) {
        let painter = ui.painter();
        let count = self.manager.count();

        let num_ticks = ((chart_area.width() / 120.0) as usize).clamp(2, count.max(2));
        let tick_step = (count / num_ticks).max(1);

        let mut ix = 0;
        while ix < count {
            if let Some(date) = self.manager.date(ix) {
                let x = index_to_x(ix, chart_area, count);
                let y = chart_area.bottom();

                painter.line_segment(
                    [Pos2::new(x, y), Pos2::new(x, y + 4.0)],
                    Stroke::new(1.0, GREY_COLOR),
                );

                painter.text(
                    Pos2::new(x, y + 6.0),
                    egui::Align2::CENTER_TOP,
                    date.format("%Y-%m-%d").to_string(),
                    egui::FontId::proportional(10.0),
                    WHITE_COLOR,
                );
            }
            ix += tick_step;
        }
    }
}

/// Chart cursor for the crosshair and the info box
pub struct ChartCursor {
    /// Current category index
    x: usize,
    /// Current price under the cursor
    y: f64,
    /// Current screen position
    screen_pos: Pos2,
    /// Whether cursor is in the candle pane
    in_candle_area: bool,
    /// Whether cursor is in the volume pane
    in_volume_area: bool,
    /// Whether cursor is visible
    visible: bool,
}

impl Default for ChartCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartCursor {
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0.0,
            screen_pos: Pos2::ZERO,
            in_candle_area: false,
            in_volume_area: false,
            visible: false,
        }
    }

    pub fn clear(&mut self) {
        self.x = 0;
        self.y = 0.0;
        self.visible = false;
    }

    /// Invert the pointer position to a category index and price.
    ///
    /// Both panes share the category axis, so the inversion uses the candle
    /// pane's horizontal extent regardless of which pane the pointer is in.
    pub fn update_position(
        &mut self,
        pos: Pos2,
        manager: &SeriesManager,
        candle_rect: Rect,
        volume_rect: Option<Rect>,
        price_min: f64,
        price_max: f64,
    ) {
        self.screen_pos = pos;
        self.in_candle_area = candle_rect.contains(pos);
        self.in_volume_area = volume_rect.is_some_and(|r| r.contains(pos));
        self.visible = self.in_candle_area || self.in_volume_area;

        if !self.visible || manager.is_empty() {
            return;
        }

        let count = manager.count();
        let bar_pixel_width = candle_rect.width() / count as f32;
        let relative_x = pos.x - candle_rect.left();
        let bar_offset = (relative_x / bar_pixel_width) as usize;
        self.x = bar_offset.min(count - 1);

        if self.in_candle_area {
            let normalized = 1.0 - (pos.y - candle_rect.top()) / candle_rect.height();
            self.y = price_min + (normalized as f64) * (price_max - price_min);
        }

        tracing::trace!(
            "pointer ({:.1}, {:.1}) inverted to category {} ({:?})",
            pos.x,
            pos.y,
            self.x,
            manager.date(self.x),
        );
    }

    /// Draw the crosshair, axis labels and info box
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        ui: &mut Ui,
        manager: &SeriesManager,
        candle_item: &CandleItem,
        volume_item: &VolumeItem,
        candle_rect: Rect,
        volume_rect: Option<Rect>,
        locale: Locale,
        price_decimals: usize,
    ) {
        if !self.visible || manager.is_empty() {
            return;
        }

        let painter = ui.painter();
        let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 128));

        let count = manager.count();
        let bar_x = index_to_x(self.x, candle_rect, count);

        // Vertical line spanning both panes
        let top = candle_rect.top();
        let bottom = volume_rect.map_or(candle_rect.bottom(), |r| r.bottom());
        painter.line_segment([Pos2::new(bar_x, top), Pos2::new(bar_x, bottom)], stroke);

        // Horizontal line and price label in the candle pane
        if self.in_candle_area {
            painter.line_segment(
                [
                    Pos2::new(candle_rect.left(), self.screen_pos.y),
                    Pos2::new(candle_rect.right(), self.screen_pos.y),
                ],
                stroke,
            );

            let label = format_price(self.y, price_decimals);
            let label_pos = Pos2::new(candle_rect.right() + 4.0, self.screen_pos.y);

            let text_size = ui.fonts_mut(|f| f.glyph_width(&egui::FontId::proportional(11.0), ' '))
                * label.len() as f32;
            let label_rect = Rect::from_min_size(
                Pos2::new(label_pos.x, label_pos.y - 8.0),
                Vec2::new(text_size + 8.0, 16.0),
            );
            painter.rect_filled(label_rect, 2.0, CURSOR_COLOR);
            painter.text(
                label_pos,
                egui::Align2::LEFT_CENTER,
                label,
                egui::FontId::proportional(11.0),
                Color32::BLACK,
            );
        }

        // Date label below the panes
        if let Some(date) = manager.date(self.x) {
            let label = date.format("%Y-%m-%d").to_string();
            let label_pos = Pos2::new(bar_x, bottom + 4.0);

            let text_size = ui.fonts_mut(|f| f.glyph_width(&egui::FontId::proportional(11.0), ' '))
                * label.len() as f32;
            let label_rect = Rect::from_min_size(
                Pos2::new(bar_x - text_size * 0.5, label_pos.y),
                Vec2::new(text_size, 16.0),
            );
            painter.rect_filled(label_rect, 2.0, CURSOR_COLOR);
            painter.text(
                Pos2::new(bar_x, label_pos.y + 8.0),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(10.0),
                Color32::BLACK,
            );
        }

        // Info box with the hovered period's prices and volume
        let price_info = candle_item.info_text(manager, self.x, locale, price_decimals);
        let volume_info = volume_item.info_text(manager, self.x, locale, price_decimals);
        let full_info = if volume_info.is_empty() {
            price_info
        } else {
            format!("{}\n\n{}", price_info, volume_info)
        };

        if !full_info.is_empty() {
            // Keep the info box on the opposite side of the cursor
            let info_x = if self.screen_pos.x < candle_rect.center().x {
                candle_rect.right() - INFO_BOX_WIDTH - 4.0
            } else {
                candle_rect.left() + 4.0
            };

            let info_rect = Rect::from_min_size(
                Pos2::new(info_x, candle_rect.top() + 4.0),
                Vec2::new(INFO_BOX_WIDTH, INFO_BOX_HEIGHT),
            );

            painter.rect_filled(info_rect, 4.0, Color32::from_rgba_unmultiplied(0, 0, 0, 200));
            painter.rect_stroke(info_rect, 4.0, Stroke::new(1.0, GREY_COLOR), StrokeKind::Inside);

            painter.text(
                Pos2::new(info_rect.left() + 8.0, info_rect.top() + 8.0),
                egui::Align2::LEFT_TOP,
                full_info,
                egui::FontId::proportional(11.0),
                WHITE_COLOR,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::object::DailyBar;
    use crate::market::series::annotate_series;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(symbol: &str, days: &[u32]) -> DailySeries {
        let bars: Vec<_> = days
            .iter()
            .map(|d| DailyBar {
                date: ymd(2020, 1, *d),
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
                volume: Some(1000.0),
            })
            .collect();
        DailySeries::new(symbol, annotate_series(&bars))
    }

    #[test]
    fn test_set_series_replaces_state() {
        let mut widget = ChartWidget::new();
        widget.set_series(series("msft", &[2, 3, 6]));
        assert_eq!(widget.count(), 3);
        assert_eq!(widget.symbol(), "msft");

        widget.set_series(series("msft", &[2, 3, 6]));
        // re-render of the same series does not accumulate
        assert_eq!(widget.count(), 3);

        widget.set_series(series("bili", &[2]));
        assert_eq!(widget.count(), 1);
        assert_eq!(widget.symbol(), "bili");
    }

    #[test]
    fn test_clear() {
        let mut widget = ChartWidget::new();
        widget.set_series(series("msft", &[2, 3]));
        widget.clear();
        assert_eq!(widget.count(), 0);
    }

    #[test]
    fn test_cursor_inversion() {
        let mut cursor = ChartCursor::new();
        let mut manager = SeriesManager::new(crate::market::constant::MissingVolumePolicy::Zero);
        manager.replace(series("msft", &[2, 3, 6, 7]));

        let candle_rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 70.0));
        let volume_rect = Rect::from_min_max(Pos2::new(0.0, 70.0), Pos2::new(100.0, 100.0));

        // Pointer in the third category's horizontal band
        cursor.update_position(
            Pos2::new(60.0, 35.0),
            &manager,
            candle_rect,
            Some(volume_rect),
            9.0,
            13.0,
        );
        assert!(cursor.visible);
        assert_eq!(cursor.x, 2);

        // The volume pane shares the same category mapping
        cursor.update_position(
            Pos2::new(60.0, 85.0),
            &manager,
            candle_rect,
            Some(volume_rect),
            9.0,
            13.0,
        );
        assert!(cursor.in_volume_area);
        assert_eq!(cursor.x, 2);

        // Outside both panes the cursor hides
        cursor.update_position(
            Pos2::new(60.0, 150.0),
            &manager,
            candle_rect,
            Some(volume_rect),
            9.0,
            13.0,
        );
        assert!(!cursor.visible);
    }
}
