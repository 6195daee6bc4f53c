use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::ChartError;
use crate::models::series::Series;

use super::traits::{AsyncSeriesProvider, SeriesProvider};

/// Serves series that were handed to it up front.
///
/// Instrument ids are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: HashMap<String, Series>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, instrument_id: &str, series: Series) -> Self {
        self.insert(instrument_id, series);
        self
    }

    pub fn insert(&mut self, instrument_id: &str, series: Series) {
        self.series.insert(instrument_id.to_uppercase(), series);
    }

    pub fn instruments(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.series.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn lookup(&self, instrument_id: &str) -> Result<Series, ChartError> {
        self.series
            .get(&instrument_id.to_uppercase())
            .cloned()
            .ok_or_else(|| ChartError::SeriesNotFound(instrument_id.to_string()))
    }
}

impl SeriesProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn get_series(&self, instrument_id: &str) -> Result<Series, ChartError> {
        self.lookup(instrument_id)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AsyncSeriesProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn get_series(&self, instrument_id: &str) -> Result<Series, ChartError> {
        self.lookup(instrument_id)
    }
}
