use serde::{Deserialize, Serialize};

use super::timeframe::Timeframe;
use super::view_mode::ViewMode;

/// The user's current choice of timeframe and chart type.
///
/// Owned by `ChartEngine` and mutated only through its setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub timeframe: Timeframe,
    pub view_mode: ViewMode,
}

impl Selection {
    pub fn new(timeframe: Timeframe, view_mode: ViewMode) -> Self {
        Self {
            timeframe,
            view_mode,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.timeframe, self.view_mode)
    }
}
