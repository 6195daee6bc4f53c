use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// One OHLC price record for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading day (daily granularity, no time component)
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single numeric field of a bar, as plotted by a view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceField::Open => write!(f, "Open"),
            PriceField::High => write!(f, "High"),
            PriceField::Low => write!(f, "Low"),
            PriceField::Close => write!(f, "Close"),
        }
    }
}

impl PriceField {
    /// Legend caption shown next to the plotted line.
    pub fn legend_label(&self) -> &'static str {
        match self {
            PriceField::Open => "Open",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Close => "Close Price",
        }
    }
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Read one price field.
    pub fn value(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }

    /// Check the OHLC invariant: all prices finite,
    /// `low <= min(open, close)` and `high >= max(open, close)`.
    pub fn validate(&self) -> Result<(), ChartError> {
        let invalid = |reason: String| ChartError::InvalidBar {
            date: self.date.to_string(),
            reason,
        };

        for field in [PriceField::Open, PriceField::High, PriceField::Low, PriceField::Close] {
            let v = self.value(field);
            if !v.is_finite() {
                return Err(invalid(format!("{field} is not a finite number ({v})")));
            }
        }

        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if self.low > body_low {
            return Err(invalid(format!(
                "low {} is above min(open, close) {body_low}",
                self.low
            )));
        }
        if self.high < body_high {
            return Err(invalid(format!(
                "high {} is below max(open, close) {body_high}",
                self.high
            )));
        }
        Ok(())
    }
}
