use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// How far back the chart looks. Each bounded timeframe maps to a fixed
/// lookback in calendar days; the stored data holds one bar per day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

impl Timeframe {
    /// Toolbar order.
    pub const ALL_VALUES: [Timeframe; 4] = [
        Timeframe::OneMonth,
        Timeframe::SixMonths,
        Timeframe::OneYear,
        Timeframe::All,
    ];

    /// Number of trailing bars shown, `None` for the whole history.
    pub fn lookback_days(&self) -> Option<usize> {
        match self {
            Timeframe::OneMonth => Some(30),
            Timeframe::SixMonths => Some(180),
            Timeframe::OneYear => Some(365),
            Timeframe::All => None,
        }
    }

    /// Short label used on the toggle buttons and in JSON.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneMonth => "1M",
            Timeframe::SixMonths => "6M",
            Timeframe::OneYear => "1Y",
            Timeframe::All => "ALL",
        }
    }

    pub fn aria_label(&self) -> &'static str {
        match self {
            Timeframe::OneMonth => "1 Month",
            Timeframe::SixMonths => "6 Months",
            Timeframe::OneYear => "1 Year",
            Timeframe::All => "All time",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Timeframe {
    type Err = ChartError;

    /// Labels are matched case-insensitively (`"1y"` == `"1Y"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Timeframe::ALL_VALUES
            .into_iter()
            .find(|tf| tf.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ChartError::InvalidTimeframe(s.to_string()))
    }
}
