//! Dashboard module - fetch coordination and the application UI.
//!
//! - **fetch**: Sequence-tagged fetch coordination with stale-response discard
//! - **app**: The egui dashboard application (requires "gui" feature)
//! - **style**: Font and theme setup (requires "gui" feature)

pub mod fetch;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod style;

pub use fetch::{FetchCoordinator, FetchResponse};

#[cfg(feature = "gui")]
pub use app::{DashboardApp, TICKER_CATALOG};
