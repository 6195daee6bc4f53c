use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

use super::timeframe::Timeframe;
use super::transition::Easing;
use super::view_mode::ViewMode;

/// Recognized chart options. Missing JSON keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// Timeframe selected when the chart is created
    pub default_timeframe: Timeframe,

    /// Chart type selected when the chart is created
    pub default_view_mode: ViewMode,

    /// Enter animation length in seconds
    pub transition_in_duration: f64,

    /// Exit animation length in seconds
    pub transition_out_duration: f64,

    /// Easing for data-driven content (line, candlestick)
    pub series_easing: Easing,

    /// Easing for placeholder notices (surface, heatmap)
    pub placeholder_easing: Easing,

    /// Vertical slide distance of enter/exit animations, in pixels
    pub slide_offset: f64,

    /// Added below the minimum and above the maximum of the value axis
    pub value_padding: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_timeframe: Timeframe::OneYear,
            default_view_mode: ViewMode::Line,
            transition_in_duration: 0.5,
            transition_out_duration: 0.3,
            series_easing: Easing::EaseOut,
            placeholder_easing: Easing::Linear,
            slide_offset: 20.0,
            value_padding: 10.0,
        }
    }
}

impl ChartConfig {
    /// Defaults with both durations set to zero: every transition completes
    /// synchronously.
    pub fn instant() -> Self {
        Self {
            transition_in_duration: 0.0,
            transition_out_duration: 0.0,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Durations and padding must be finite and non-negative, durations must
    /// fit in a `Duration`, and the slide offset must be finite.
    pub fn validate(&self) -> Result<(), ChartError> {
        let non_negative = [
            ("transitionInDuration", self.transition_in_duration),
            ("transitionOutDuration", self.transition_out_duration),
            ("valuePadding", self.value_padding),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        let durations = [
            ("transitionInDuration", self.transition_in_duration),
            ("transitionOutDuration", self.transition_out_duration),
        ];
        for (name, value) in durations {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} is too large to represent as a duration (got {value})"
                )));
            }
        }
        if !self.slide_offset.is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "slideOffset must be finite (got {})",
                self.slide_offset
            )));
        }
        Ok(())
    }

    /// Enter phase length. Only meaningful on a validated config; values
    /// `validate` rejects map to zero.
    pub fn enter_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.transition_in_duration).unwrap_or(Duration::ZERO)
    }

    pub fn exit_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.transition_out_duration).unwrap_or(Duration::ZERO)
    }

    /// Easing for content of the given mode.
    pub fn easing_for(&self, mode: ViewMode) -> Easing {
        if mode.is_data_driven() {
            self.series_easing
        } else {
            self.placeholder_easing
        }
    }
}
