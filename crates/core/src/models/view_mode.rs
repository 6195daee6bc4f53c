use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

use super::bar::PriceField;

/// The chart representation currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Close price as a single line
    #[default]
    Line,
    /// Full OHLC per bar
    Candlestick,
    /// 3D volatility surface; placeholder, not driven by the slice
    Surface,
    /// Correlation heatmap; placeholder, not driven by the slice
    Heatmap,
}

/// Static notice shown instead of a chart for placeholder modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub title: &'static str,
    pub message: &'static str,
}

impl ViewMode {
    /// Toolbar order.
    pub const ALL_VALUES: [ViewMode; 4] = [
        ViewMode::Line,
        ViewMode::Candlestick,
        ViewMode::Surface,
        ViewMode::Heatmap,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Line => "line",
            ViewMode::Candlestick => "candlestick",
            ViewMode::Surface => "surface",
            ViewMode::Heatmap => "heatmap",
        }
    }

    pub fn aria_label(&self) -> &'static str {
        match self {
            ViewMode::Line => "Line chart",
            ViewMode::Candlestick => "Candlestick chart",
            ViewMode::Surface => "3D Surface plot",
            ViewMode::Heatmap => "Heatmap",
        }
    }

    /// Whether this mode renders the visible slice.
    pub fn is_data_driven(&self) -> bool {
        matches!(self, ViewMode::Line | ViewMode::Candlestick)
    }

    /// Price fields plotted by this mode. Empty for placeholders.
    pub fn channels(&self) -> &'static [PriceField] {
        match self {
            ViewMode::Line => &[PriceField::Close],
            ViewMode::Candlestick => &[
                PriceField::Open,
                PriceField::High,
                PriceField::Low,
                PriceField::Close,
            ],
            ViewMode::Surface | ViewMode::Heatmap => &[],
        }
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            ViewMode::Surface => Some(Placeholder {
                title: "Volatility Surface",
                message: "3D visualization is in development.",
            }),
            ViewMode::Heatmap => Some(Placeholder {
                title: "Correlation Heatmap",
                message: "Heatmap visualization is in development.",
            }),
            ViewMode::Line | ViewMode::Candlestick => None,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ViewMode::ALL_VALUES
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ChartError::InvalidViewMode(s.to_string()))
    }
}
