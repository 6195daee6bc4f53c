use crate::errors::ChartError;
use crate::models::view_mode::ViewMode;

/// Outcome of a view-mode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Requested mode is already active (or the request was a deselection)
    Unchanged,
    Changed { from: ViewMode, to: ViewMode },
}

impl ModeTransition {
    pub fn is_change(&self) -> bool {
        matches!(self, ModeTransition::Changed { .. })
    }
}

/// Validates view-mode transitions.
///
/// The modes form a flat selector: every mode is reachable from every other.
/// Stateless. The active mode lives in the engine's `Selection`.
pub struct ViewModeController;

impl ViewModeController {
    pub fn new() -> Self {
        Self
    }

    pub fn reduce(&self, current: ViewMode, requested: ViewMode) -> ModeTransition {
        if current == requested {
            ModeTransition::Unchanged
        } else {
            ModeTransition::Changed {
                from: current,
                to: requested,
            }
        }
    }

    /// Like `reduce`, for a label coming from a toggle control.
    ///
    /// An empty label is a toggle deselection and keeps the current mode.
    /// Unknown labels fail with `InvalidViewMode`.
    pub fn reduce_label(&self, current: ViewMode, label: &str) -> Result<ModeTransition, ChartError> {
        if label.trim().is_empty() {
            return Ok(ModeTransition::Unchanged);
        }
        let requested: ViewMode = label.parse()?;
        Ok(self.reduce(current, requested))
    }
}

impl Default for ViewModeController {
    fn default() -> Self {
        Self::new()
    }
}
