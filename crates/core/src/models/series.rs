use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

use super::bar::Bar;

/// The immutable price history of one instrument.
///
/// Bars are strictly increasing by date with no duplicates. Storage is shared
/// (`Arc<[Bar]>`), so cloning a series or slicing it never copies bars.
///
/// `version` identifies one loaded history. It is stamped by the
/// `TimeSeriesStore` when the series is installed and is what memoized
/// windows are keyed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct Series {
    bars: Arc<[Bar]>,
    version: u64,
}

impl Series {
    /// Build a series, validating every bar and the date ordering.
    pub fn new(bars: Vec<Bar>) -> Result<Self, ChartError> {
        for bar in &bars {
            bar.validate()?;
        }
        if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(ChartError::InvalidSeries(format!(
                "dates must be strictly increasing, found {} after {}",
                pair[1].date, pair[0].date
            )));
        }
        Ok(Self {
            bars: bars.into(),
            version: 0,
        })
    }

    pub fn empty() -> Self {
        Self {
            bars: Arc::from(Vec::<Bar>::new()),
            version: 0,
        }
    }

    /// Parse a JSON array of bars and validate it.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let bars: Vec<Bar> = serde_json::from_str(json)?;
        Self::new(bars)
    }

    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First and last trading day, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.bars.first()?.date, self.bars.last()?.date))
    }

    /// A view over `bars[start..len]`. `start` is clamped to the length.
    pub fn suffix(&self, start: usize) -> SeriesSlice {
        let end = self.bars.len();
        SeriesSlice {
            bars: Arc::clone(&self.bars),
            start: start.min(end),
            end,
            version: self.version,
        }
    }

    /// A view over the whole series.
    pub fn full_slice(&self) -> SeriesSlice {
        self.suffix(0)
    }
}

impl Default for Series {
    fn default() -> Self {
        Self::empty()
    }
}

/// Two series are equal when they hold the same bars, whatever their version.
impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.bars() == other.bars()
    }
}

impl TryFrom<Vec<Bar>> for Series {
    type Error = ChartError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<Series> for Vec<Bar> {
    fn from(series: Series) -> Self {
        series.bars.to_vec()
    }
}

/// A contiguous view into a `Series`. Shares the series storage.
#[derive(Debug, Clone)]
pub struct SeriesSlice {
    bars: Arc<[Bar]>,
    start: usize,
    end: usize,
    version: u64,
}

impl SeriesSlice {
    pub fn bars(&self) -> &[Bar] {
        &self.bars[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars().iter()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars().first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars().last()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.first()?.date, self.last()?.date))
    }

    /// Version of the series this view was taken from.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Index range into the source series.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// True when both views cover the same range of the same series version.
    /// Cheaper and stricter than `==`, which compares bar values.
    pub fn same_window(&self, other: &SeriesSlice) -> bool {
        self.version == other.version && self.start == other.start && self.end == other.end
    }

    /// Copy the visible bars out (e.g. to hand them across an FFI boundary).
    pub fn to_vec(&self) -> Vec<Bar> {
        self.bars().to_vec()
    }
}

impl PartialEq for SeriesSlice {
    fn eq(&self, other: &Self) -> bool {
        self.bars() == other.bars()
    }
}

impl PartialEq<Series> for SeriesSlice {
    fn eq(&self, other: &Series) -> bool {
        self.bars() == other.bars()
    }
}

impl<'a> IntoIterator for &'a SeriesSlice {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for SeriesSlice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bars().serialize(serializer)
    }
}
