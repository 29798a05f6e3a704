//! General utility functions.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Resolve the dashboard data directory.
///
/// If a `.stock_dashboard` folder exists in the current working directory it
/// is used, which keeps per-project setups self-contained; otherwise the
/// folder lives under the user's home directory and is created on demand.
fn get_dashboard_dir(temp_name: &str) -> (PathBuf, PathBuf) {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let temp_path = cwd.join(temp_name);

    if temp_path.exists() {
        return (cwd, temp_path);
    }

    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let temp_path = home_path.join(temp_name);

    if !temp_path.exists() {
        let _ = fs::create_dir_all(&temp_path);
    }

    (home_path, temp_path)
}

/// Dashboard base directory
pub static DASHBOARD_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    let (dashboard_dir, _) = get_dashboard_dir(".stock_dashboard");
    dashboard_dir
});

/// Dashboard data directory
pub static DATA_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    let (_, data_dir) = get_dashboard_dir(".stock_dashboard");
    data_dir
});

/// Get path for a data file with filename
pub fn get_file_path(filename: &str) -> PathBuf {
    DATA_DIR.join(filename)
}

/// Get path for a data folder with folder name
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = DATA_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}

/// Load data from a JSON file in the data directory
pub fn load_json(filename: &str) -> HashMap<String, serde_json::Value> {
    load_json_from(&get_file_path(filename))
}

/// Save data into a JSON file in the data directory
pub fn save_json(filename: &str, data: &HashMap<String, serde_json::Value>) {
    save_json_to(&get_file_path(filename), data);
}

fn load_json_from(filepath: &Path) -> HashMap<String, serde_json::Value> {
    if filepath.exists() {
        if let Ok(content) = fs::read_to_string(filepath) {
            if let Ok(data) = serde_json::from_str(&content) {
                return data;
            }
        }
    }

    save_json_to(filepath, &HashMap::new());
    HashMap::new()
}

fn save_json_to(filepath: &Path, data: &HashMap<String, serde_json::Value>) {
    if let Ok(json) = serde_json::to_string_pretty(data) {
        let _ = fs::write(filepath, json);
    }
}

/// Parse a trading date in canonical `YYYY-MM-DD` or compact `YYYYMMDD` form.
pub fn parse_trade_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y%m%d"))
}

/// Format a date in the compact `YYYYMMDD` form used in service queries.
pub fn format_compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
