//! The dashboard application: ticker selection, date range and chart panes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use eframe::egui;
use tracing::{error, info};

use crate::chart::ChartWidget;
use crate::market::datafeed::DailyPriceClient;
use crate::market::object::{DailyPriceRequest, DailySeries};
use crate::market::series::{annotate_series, validate_series};

use super::fetch::FetchCoordinator;
use super::style::{apply_dark_theme, COLOR_ERROR};

/// Fixed catalog of selectable ticker symbols
pub const TICKER_CATALOG: &[&str] = &["MSFT", "BILI"];

/// Default queried window, counted back from today
const DEFAULT_RANGE_DAYS: i64 = 90;

/// Height of one symbol's chart pane
const PANE_HEIGHT: f32 = 420.0;

/// Display state of one symbol's pane
enum PaneState {
    /// Waiting for the first response
    Loading,
    /// Chart handle holding the resolved series
    Ready(Box<ChartWidget>),
    /// Fetch or validation failure, shown inline
    Failed(String),
}

/// Main dashboard application
pub struct DashboardApp {
    /// Fetch coordinator
    coordinator: FetchCoordinator,
    /// Selected symbols, stored lowercase as the service expects
    selected: BTreeSet<String>,
    /// Queried window start
    start_date: NaiveDate,
    /// Queried window end
    end_date: NaiveDate,
    /// One pane per selected symbol
    panes: BTreeMap<String, PaneState>,
    /// Selection and range of the last issued round of fetches
    last_query: Option<(BTreeSet<String>, NaiveDate, NaiveDate)>,
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        apply_dark_theme(&cc.egui_ctx);

        let datafeed = Arc::new(
            DailyPriceClient::from_settings().expect("Invalid datafeed.url setting"),
        );
        let runtime = tokio::runtime::Handle::current();
        let coordinator = FetchCoordinator::new(datafeed, runtime);

        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(DEFAULT_RANGE_DAYS);

        info!("行情面板已创建");

        Self {
            coordinator,
            selected: BTreeSet::new(),
            start_date,
            end_date,
            panes: BTreeMap::new(),
            last_query: None,
        }
    }

    /// Issue fetches when the selection or the date range changed
    fn sync_fetches(&mut self) {
        if self.start_date > self.end_date {
            return;
        }

        let query = (self.selected.clone(), self.start_date, self.end_date);
        if self.last_query.as_ref() == Some(&query) {
            return;
        }

        // Drop panes and in-flight fetches for deselected symbols
        let deselected: Vec<String> = self
            .panes
            .keys()
            .filter(|symbol| !self.selected.contains(*symbol))
            .cloned()
            .collect();
        for symbol in deselected {
            self.coordinator.forget(&symbol);
            self.panes.remove(&symbol);
        }

        for symbol in &self.selected {
            let req = DailyPriceRequest::new(symbol.clone(), self.start_date, self.end_date);
            self.coordinator.request(req);
            self.panes.entry(symbol.clone()).or_insert(PaneState::Loading);
        }

        self.last_query = Some(query);
    }

    /// Apply resolved fetches to the panes.
    ///
    /// A failed fetch or a series failing validation becomes an inline error
    /// for that symbol only; a valid series replaces the pane's chart state
    /// wholesale.
    fn apply_responses(&mut self) {
        for response in self.coordinator.poll() {
            if !self.selected.contains(&response.symbol) {
                continue;
            }

            let state = match response.result {
                Err(err) => {
                    error!("daily price fetch failed for {}: {}", response.symbol, err);
                    PaneState::Failed(err.to_string())
                }
                Ok(bars) => match validate_series(&bars) {
                    Err(err) => {
                        error!("rejecting series for {}: {}", response.symbol, err);
                        PaneState::Failed(err.to_string())
                    }
                    Ok(()) => {
                        let series =
                            DailySeries::new(response.symbol.clone(), annotate_series(&bars));

                        // Reuse the existing chart handle where one exists so
                        // its configuration survives the data replacement
                        let mut widget = match self.panes.remove(&response.symbol) {
                            Some(PaneState::Ready(widget)) => widget,
                            _ => Box::new(ChartWidget::new()),
                        };
                        widget.set_series(series);
                        PaneState::Ready(widget)
                    }
                },
            };

            self.panes.insert(response.symbol, state);
        }
    }

    /// Draw the selection form
    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("tickers");
            for symbol in TICKER_CATALOG {
                let key = symbol.to_lowercase();
                let mut on = self.selected.contains(&key);
                if ui.toggle_value(&mut on, *symbol).changed() {
                    if on {
                        self.selected.insert(key);
                    } else {
                        self.selected.remove(&key);
                    }
                }
            }

            ui.separator();

            ui.label("date range");
            ui.add(egui_extras::DatePickerButton::new(&mut self.start_date).id_salt("start_date"));
            ui.label("~");
            ui.add(egui_extras::DatePickerButton::new(&mut self.end_date).id_salt("end_date"));

            if self.start_date > self.end_date {
                ui.colored_label(COLOR_ERROR, "起始日期晚于结束日期");
            }
        });
    }

    /// Draw one pane per selected symbol
    fn show_panes(&mut self, ui: &mut egui::Ui) {
        if self.selected.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("请选择股票代码");
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for symbol in self.selected.clone() {
                ui.heading(symbol.to_uppercase());

                match self.panes.get_mut(&symbol) {
                    Some(PaneState::Loading) | None => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("加载中...");
                        });
                    }
                    Some(PaneState::Failed(message)) => {
                        ui.colored_label(COLOR_ERROR, message.as_str());
                    }
                    Some(PaneState::Ready(widget)) => {
                        ui.allocate_ui(
                            egui::Vec2::new(ui.available_width(), PANE_HEIGHT),
                            |ui| {
                                widget.show(ui);
                            },
                        );
                    }
                }

                ui.separator();
            }
        });
    }

    /// Whether any pane still waits for its first response
    fn has_loading_panes(&self) -> bool {
        self.panes
            .values()
            .any(|state| matches!(state, PaneState::Loading))
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_responses();

        egui::TopBottomPanel::top("dashboard_form").show(ctx, |ui| {
            self.show_form(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_panes(ui);
        });

        self.sync_fetches();

        // Keep polling while responses are outstanding
        if self.has_loading_panes() || self.coordinator.has_in_flight() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
