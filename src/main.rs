//! Stock Dashboard - Main Application Entry Point

use eframe::egui;
use tracing::info;

use stock_dashboard::dashboard::DashboardApp;
use stock_dashboard::market::logger::init_logger;

fn main() -> eframe::Result<()> {
    init_logger();

    // Async runtime for the daily price fetches; entered so the app can grab
    // a handle during construction
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");
    let _enter = runtime.enter();

    info!("行情面板启动 v{}", stock_dashboard::VERSION);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Stock Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Stock Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
