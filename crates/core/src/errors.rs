use thiserror::Error;

/// Unified error type for the entire price-chart-core library.
/// Every fallible public function returns `Result<T, ChartError>`.
///
/// None of these are fatal: each one is reported at the selection boundary
/// and leaves the engine in its previous state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    // ── Selection ───────────────────────────────────────────────────
    #[error("Invalid view mode: {0}")]
    InvalidViewMode(String),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    // ── Series data ─────────────────────────────────────────────────
    #[error("Invalid bar on {date}: {reason}")]
    InvalidBar { date: String, reason: String },

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    // ── Providers ───────────────────────────────────────────────────
    #[error("No series found for instrument: {0}")]
    SeriesNotFound(String),

    /// Raised by host-written `SeriesProvider` implementations (network,
    /// file or database backends) for failures other than a missing series.
    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        ChartError::Deserialization(e.to_string())
    }
}
