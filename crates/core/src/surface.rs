use serde::Serialize;

use crate::models::selection::Selection;
use crate::models::transition::{Motion, TransitionPhase, TransitionToken};
use crate::models::view::{ChartContent, ValueDomain};

/// One paint request handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    /// Selection at the time of the frame
    pub selection: Selection,
    /// Content on screen: outgoing while exiting, incoming otherwise
    pub content: ChartContent,
    pub phase: TransitionPhase,
    pub token: TransitionToken,
    /// Animation to play for this phase; `None` once settled
    pub motion: Option<Motion>,
    /// Padded value-axis bounds for data-driven content
    pub value_domain: Option<ValueDomain>,
}

/// The external collaborator that turns frames into pixels.
///
/// Called once per phase change. Implementations must not feed anything back
/// into the selection.
pub trait RenderSurface {
    fn render(&mut self, frame: &RenderFrame);
}

/// Discards every frame. For headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn render(&mut self, _frame: &RenderFrame) {}
}
