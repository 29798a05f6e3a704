//! Series state for the chart widget.
//!
//! Holds exactly one annotated series and answers the category-axis queries
//! the renderer needs: index to date, date to index, price and volume
//! extents. Installing a series is wholesale replacement; no merging with
//! previously held data ever happens.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::market::constant::MissingVolumePolicy;
use crate::market::object::{AnnotatedBar, DailySeries};

/// Manages the annotated series currently on display
pub struct SeriesManager {
    /// Symbol of the held series
    symbol: String,
    /// Annotated bars in category order
    bars: Vec<AnnotatedBar>,
    /// Map from date to category index
    date_index_map: HashMap<NaiveDate, usize>,
    /// Policy for records without volume
    missing_volume: MissingVolumePolicy,
}

impl SeriesManager {
    /// Create an empty manager with the given volume policy
    pub fn new(missing_volume: MissingVolumePolicy) -> Self {
        Self {
            symbol: String::new(),
            bars: Vec::new(),
            date_index_map: HashMap::new(),
            missing_volume,
        }
    }

    /// Replace the held series wholesale.
    ///
    /// All prior state is torn down first, so installing the same series
    /// twice leaves exactly one bar per date.
    pub fn replace(&mut self, series: DailySeries) {
        self.clear_all();

        self.symbol = series.symbol;
        self.bars = series.bars;

        for (ix, bar) in self.bars.iter().enumerate() {
            self.date_index_map.insert(bar.date, ix);
        }
    }

    /// Clear all data
    pub fn clear_all(&mut self) {
        self.symbol.clear();
        self.bars.clear();
        self.date_index_map.clear();
    }

    /// Symbol of the held series
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Total number of bars
    pub fn count(&self) -> usize {
        self.bars.len()
    }

    /// Whether the manager holds no bars
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get the bar at a category index
    pub fn bar(&self, ix: usize) -> Option<&AnnotatedBar> {
        self.bars.get(ix)
    }

    /// All held bars in category order
    pub fn bars(&self) -> &[AnnotatedBar] {
        &self.bars
    }

    /// Get the date at a category index
    pub fn date(&self, ix: usize) -> Option<NaiveDate> {
        self.bars.get(ix).map(|bar| bar.date)
    }

    /// Get the category index for a date
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.date_index_map.get(&date).copied()
    }

    /// Bar height for the volume pane at a category index.
    ///
    /// `None` means no bar is drawn, which under the `Zero` policy only
    /// happens past the end of the series.
    pub fn bar_volume(&self, ix: usize) -> Option<f64> {
        let bar = self.bars.get(ix)?;
        match bar.volume {
            Some(volume) => Some(volume),
            None => match self.missing_volume {
                MissingVolumePolicy::Zero => Some(0.0),
                MissingVolumePolicy::Omit => None,
            },
        }
    }

    /// Price extent across the whole series, from the candle ranges
    pub fn price_range(&self) -> (f64, f64) {
        if self.bars.is_empty() {
            return (0.0, 1.0);
        }

        let mut min_price = f64::INFINITY;
        let mut max_price = f64::NEG_INFINITY;

        for bar in &self.bars {
            min_price = min_price.min(bar.range.low);
            max_price = max_price.max(bar.range.high);
        }

        (min_price, max_price)
    }

    /// Volume extent across the whole series, honoring the volume policy
    pub fn volume_range(&self) -> (f64, f64) {
        if self.bars.is_empty() {
            return (0.0, 1.0);
        }

        let mut max_volume: f64 = 0.0;
        for ix in 0..self.bars.len() {
            if let Some(volume) = self.bar_volume(ix) {
                max_volume = max_volume.max(volume);
            }
        }

        (0.0, max_volume)
    }
}
