use std::collections::HashMap;

use crate::models::series::{Series, SeriesSlice};
use crate::models::timeframe::Timeframe;

/// The visible slice of `series` under `timeframe`.
///
/// `ALL` is the whole series. Bounded timeframes keep the last
/// `lookback_days` bars, or the whole series when it is shorter. Never errors,
/// never pads; an empty series gives an empty slice.
pub fn window(series: &Series, timeframe: Timeframe) -> SeriesSlice {
    match timeframe.lookback_days() {
        None => series.full_slice(),
        Some(n) => series.suffix(series.len().saturating_sub(n)),
    }
}

/// Memoizes `window` per `(series version, timeframe)`.
///
/// Only one series version is cached at a time: seeing a new version drops
/// every cached slice of the old one.
#[derive(Debug, Default)]
pub struct WindowSelector {
    version: Option<u64>,
    cache: HashMap<Timeframe, SeriesSlice>,
}

impl WindowSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, series: &Series, timeframe: Timeframe) -> SeriesSlice {
        if self.version != Some(series.version()) {
            self.cache.clear();
            self.version = Some(series.version());
        }
        self.cache
            .entry(timeframe)
            .or_insert_with(|| window(series, timeframe))
            .clone()
    }

    /// Number of memoized slices for the current version.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.version = None;
        self.cache.clear();
    }
}
