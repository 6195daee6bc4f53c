use serde::Serialize;

use super::bar::PriceField;
use super::series::SeriesSlice;
use super::timeframe::Timeframe;
use super::transition::TransitionPhase;
use super::view_mode::{Placeholder, ViewMode};

/// What the rendering surface paints for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartContent {
    /// A data-driven mode over a non-empty slice
    Series { mode: ViewMode, slice: SeriesSlice },
    /// A data-driven mode with nothing to show: empty-state indicator
    Empty { mode: ViewMode },
    /// A placeholder mode; carries its static notice
    Placeholder { mode: ViewMode, notice: Placeholder },
}

impl ChartContent {
    /// Content for `mode` over `slice`.
    pub fn for_mode(mode: ViewMode, slice: &SeriesSlice) -> Self {
        if let Some(notice) = mode.placeholder() {
            ChartContent::Placeholder { mode, notice }
        } else if slice.is_empty() {
            ChartContent::Empty { mode }
        } else {
            ChartContent::Series {
                mode,
                slice: slice.clone(),
            }
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            ChartContent::Series { mode, .. }
            | ChartContent::Empty { mode }
            | ChartContent::Placeholder { mode, .. } => *mode,
        }
    }

    pub fn slice(&self) -> Option<&SeriesSlice> {
        match self {
            ChartContent::Series { slice, .. } => Some(slice),
            _ => None,
        }
    }

    /// Whether swapping `self` for `other` changes what is on screen.
    /// Slices are compared by window, not by value.
    pub fn same_as(&self, other: &ChartContent) -> bool {
        match (self, other) {
            (
                ChartContent::Series { mode: a, slice: sa },
                ChartContent::Series { mode: b, slice: sb },
            ) => a == b && sa.same_window(sb),
            (ChartContent::Empty { mode: a }, ChartContent::Empty { mode: b }) => a == b,
            (
                ChartContent::Placeholder { mode: a, .. },
                ChartContent::Placeholder { mode: b, .. },
            ) => a == b,
            _ => false,
        }
    }

    /// Value-axis bounds over the plotted channels, widened by `padding`
    /// on both sides. `None` when nothing numeric is plotted.
    pub fn value_domain(&self, padding: f64) -> Option<ValueDomain> {
        let ChartContent::Series { mode, slice } = self else {
            return None;
        };
        ValueDomain::of(slice, mode.channels(), padding)
    }
}

/// Inclusive `[min, max]` range of the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub fn of(slice: &SeriesSlice, channels: &[PriceField], padding: f64) -> Option<Self> {
        let mut values = slice
            .iter()
            .flat_map(|bar| channels.iter().map(move |&field| bar.value(field)));
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self {
            min: min - padding,
            max: max + padding,
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// The full observable state of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub timeframe: Timeframe,
    pub view_mode: ViewMode,
    /// Slice for the current selection, independent of the animation
    pub visible_slice: SeriesSlice,
    pub transition_phase: TransitionPhase,
    /// What is on screen right now: the outgoing content while exiting
    pub displayed: Option<ChartContent>,
}
