use async_trait::async_trait;

use crate::errors::ChartError;
use crate::models::series::Series;

/// Source of price history, keyed by instrument id (e.g. "AAPL").
///
/// The chart only ever asks for a whole series; windowing happens on our side.
pub trait SeriesProvider {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    fn get_series(&self, instrument_id: &str) -> Result<Series, ChartError>;
}

/// Asynchronous variant of `SeriesProvider`.
///
/// Responses may arrive after the user has moved on; the engine tags every
/// request and drops responses for superseded ones.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AsyncSeriesProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn get_series(&self, instrument_id: &str) -> Result<Series, ChartError>;
}
