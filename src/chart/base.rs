//! Base constants and utility functions for the chart module.

use egui::Color32;

use crate::market::constant::Trend;

// Chart colors
pub const WHITE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const GREY_COLOR: Color32 = Color32::from_rgb(100, 100, 100);

// Trend colors
pub const RISE_COLOR: Color32 = Color32::from_rgb(0xf0, 0x48, 0x64);
pub const FALL_COLOR: Color32 = Color32::from_rgb(0x2f, 0xc2, 0x5b);

// Cursor color
pub const CURSOR_COLOR: Color32 = Color32::from_rgb(255, 245, 162);

// Chart dimensions
pub const BAR_WIDTH: f32 = 0.3;

// Layout constants
pub const MARGIN: f32 = 10.0;
pub const AXIS_X_HEIGHT: f32 = 32.0;
pub const AXIS_Y_WIDTH: f32 = 80.0;
pub const INFO_BOX_WIDTH: f32 = 110.0;
pub const INFO_BOX_HEIGHT: f32 = 230.0;

/// Fill color for a candle or volume bar.
///
/// The match is exhaustive over the closed trend set; there is no
/// fallthrough color.
pub fn trend_color(trend: Trend) -> Color32 {
    match trend {
        Trend::Up => RISE_COLOR,
        Trend::Down => FALL_COLOR,
    }
}

/// Format price with appropriate precision
pub fn format_price(price: f64, decimals: usize) -> String {
    format!("{:.prec$}", price, prec = decimals)
}

/// Format a volume axis label in thousands, e.g. `1500` becomes `1.5k`
pub fn format_volume_k(volume: f64) -> String {
    let thousands = format!("{:.2}", volume / 1000.0);
    let thousands = thousands.trim_end_matches('0').trim_end_matches('.');
    format!("{}k", thousands)
}

/// Calculate nice axis tick values
pub fn calculate_axis_ticks(min_val: f64, max_val: f64, max_ticks: usize) -> Vec<f64> {
    if min_val >= max_val {
        return vec![min_val];
    }

    let range = max_val - min_val;
    let rough_step = range / max_ticks as f64;

    // Find the magnitude of the step
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    // Choose a nice step value
    let nice_step = if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    // Generate tick values
    let mut ticks = Vec::new();
    let start = (min_val / nice_step).ceil() * nice_step;
    let mut value = start;

    while value <= max_val {
        ticks.push(value);
        value += nice_step;
    }

    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_color() {
        assert_eq!(trend_color(Trend::Up), RISE_COLOR);
        assert_eq!(trend_color(Trend::Down), FALL_COLOR);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(10.5, 2), "10.50");
        assert_eq!(format_price(10.456, 2), "10.46");
    }

    #[test]
    fn test_format_volume_k() {
        assert_eq!(format_volume_k(1000.0), "1k");
        assert_eq!(format_volume_k(1500.0), "1.5k");
        assert_eq!(format_volume_k(500.0), "0.5k");
        assert_eq!(format_volume_k(0.0), "0k");
        assert_eq!(format_volume_k(12340.0), "12.34k");
    }

    #[test]
    fn test_calculate_axis_ticks() {
        let ticks = calculate_axis_ticks(0.0, 100.0, 5);
        assert!(!ticks.is_empty());
        for tick in &ticks {
            assert!(*tick >= 0.0 && *tick <= 100.0);
        }
    }

    #[test]
    fn test_calculate_axis_ticks_degenerate_range() {
        assert_eq!(calculate_axis_ticks(5.0, 5.0, 4), vec![5.0]);
    }
}
