use crate::models::series::Series;

/// Holds the price history of the instrument currently on the chart.
///
/// A loaded series is never modified; loading another one replaces it and
/// stamps it with a fresh version, which invalidates memoized windows.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    instrument: Option<String>,
    series: Series,
    last_version: u64,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `series` for `instrument`. Returns the version assigned to it.
    pub fn load(&mut self, instrument: impl Into<String>, series: Series) -> u64 {
        self.last_version += 1;
        let instrument = instrument.into();
        log::info!(
            "loaded {} bars for {instrument} (series v{})",
            series.len(),
            self.last_version
        );
        self.series = series.with_version(self.last_version);
        self.instrument = Some(instrument);
        self.last_version
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn instrument(&self) -> Option<&str> {
        self.instrument.as_deref()
    }

    /// Version of the installed series; `0` before anything was loaded.
    pub fn version(&self) -> u64 {
        self.series.version()
    }
}
