use crate::errors::ChartError;
use crate::models::series::Series;

use super::traits::SeriesProvider;

/// Ordered list of series providers with fallback.
///
/// `get_series` asks each provider in registration order and returns the
/// first success. If all fail, the last error is returned.
pub struct SeriesProviderRegistry {
    providers: Vec<Box<dyn SeriesProvider>>,
}

impl SeriesProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn register(&mut self, provider: Box<dyn SeriesProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}

impl Default for SeriesProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesProvider for SeriesProviderRegistry {
    fn name(&self) -> &str {
        "registry"
    }

    fn get_series(&self, instrument_id: &str) -> Result<Series, ChartError> {
        let mut last_error = None;
        for provider in &self.providers {
            match provider.get_series(instrument_id) {
                Ok(series) => return Ok(series),
                Err(e) => {
                    log::warn!(
                        "provider {} failed for {instrument_id}: {e}",
                        provider.name()
                    );
                    last_error = Some(e);
                    // Try next provider
                }
            }
        }
        Err(last_error.unwrap_or_else(|| ChartError::SeriesNotFound(instrument_id.to_string())))
    }
}
