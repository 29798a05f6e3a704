//! Chart demo showing the candlestick and volume panes with synthetic data.
//!
//! Run with: cargo run --example chart_demo

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use eframe::egui;
use rand::Rng;

use stock_dashboard::chart::ChartWidget;
use stock_dashboard::dashboard::style::apply_dark_theme;
use stock_dashboard::market::object::{DailyBar, DailySeries};
use stock_dashboard::market::series::annotate_series;
use stock_dashboard::market::Locale;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Stock Dashboard - Chart Demo"),
        ..Default::default()
    };

    eframe::run_native(
        "Chart Demo",
        options,
        Box::new(|cc| {
            apply_dark_theme(&cc.egui_ctx);
            Ok(Box::new(ChartDemoApp::new()))
        }),
    )
}

struct ChartDemoApp {
    chart: ChartWidget,
    english_labels: bool,
}

impl ChartDemoApp {
    fn new() -> Self {
        let mut chart = ChartWidget::new();
        chart.set_price_decimals(2);
        chart.set_series(sample_series(120));

        Self {
            chart,
            english_labels: false,
        }
    }
}

impl eframe::App for ChartDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("K线图表演示");
                ui.separator();

                if ui.button("重新加载").clicked() {
                    self.chart.set_series(sample_series(120));
                }

                if ui.button("清空数据").clicked() {
                    self.chart.clear();
                }

                if ui.checkbox(&mut self.english_labels, "English labels").changed() {
                    let locale = if self.english_labels {
                        Locale::EnUs
                    } else {
                        Locale::ZhCn
                    };
                    self.chart.set_locale(locale);
                }

                ui.separator();

                ui.label(format!("数据条数: {}", self.chart.count()));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart.show(ui);
        });
    }
}

/// Generate a random-walk daily series over trading days only, so the
/// category axis visibly collapses the weekend gaps
fn sample_series(count: usize) -> DailySeries {
    let mut rng = rand::rng();
    let mut bars = Vec::with_capacity(count);
    let mut price = 100.0_f64;
    let mut date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();

    while bars.len() < count {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let change = rng.random_range(-1.0..1.0);
            let open = price;
            let close = price + change;
            let high = open.max(close) + rng.random_range(0.0..0.5);
            let low = (open.min(close) - rng.random_range(0.0..0.5)).max(0.01);
            let volume = 1000.0 + rng.random_range(0.0..500.0) + change.abs() * 200.0;

            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                volume: Some(volume),
            });

            price = close;
        }
        date = date + Duration::days(1);
    }

    DailySeries::new("demo", annotate_series(&bars))
}
