pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod surface;

use std::time::Duration;

use models::{
    config::ChartConfig,
    selection::Selection,
    series::{Series, SeriesSlice},
    timeframe::Timeframe,
    transition::{TransitionPhase, TransitionToken},
    view::{ChartContent, ChartView, ValueDomain},
    view_mode::ViewMode,
};
use providers::traits::{AsyncSeriesProvider, SeriesProvider};
use services::{
    series_store::TimeSeriesStore,
    timer_queue::TimerQueue,
    transition_coordinator::TransitionCoordinator,
    view_mode_controller::{ModeTransition, ViewModeController},
    window_selector::WindowSelector,
};
use surface::{NullSurface, RenderFrame, RenderSurface};

use errors::ChartError;

/// Identifies one series request. Only the most recent request may complete;
/// responses to older ones are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Main entry point for the price-chart core library.
///
/// Owns the `Selection` and the loaded series, recomputes the visible slice
/// whenever either changes, and drives the transition coordinator, handing
/// every resulting frame to the rendering surface.
///
/// Everything runs on the caller's thread. Time only passes through
/// `advance` (built-in timer queue) or `on_timer` (host-managed timers).
#[must_use]
pub struct ChartEngine<R: RenderSurface = NullSurface> {
    config: ChartConfig,
    selection: Selection,
    store: TimeSeriesStore,
    selector: WindowSelector,
    modes: ViewModeController,
    coordinator: TransitionCoordinator,
    timers: TimerQueue,
    visible: SeriesSlice,
    surface: R,
    last_request: u64,
    pending_request: Option<(RequestToken, String)>,
}

impl<R: RenderSurface> std::fmt::Debug for ChartEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("selection", &self.selection)
            .field("instrument", &self.store.instrument())
            .field("bars", &self.store.series().len())
            .field("visible", &self.visible.len())
            .field("transition", &self.coordinator.state())
            .finish()
    }
}

impl ChartEngine<NullSurface> {
    /// Headless engine with the default configuration.
    pub fn headless() -> Self {
        Self::new(NullSurface)
    }
}

impl<R: RenderSurface> ChartEngine<R> {
    /// Create an engine with the default configuration. The initial (empty)
    /// content is entered immediately, like a freshly mounted chart.
    pub fn new(surface: R) -> Self {
        Self::build(ChartConfig::default(), surface)
    }

    /// Create an engine with a custom configuration (validated first).
    pub fn with_config(config: ChartConfig, surface: R) -> Result<Self, ChartError> {
        config.validate()?;
        Ok(Self::build(config, surface))
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Switch the timeframe. No-op when `timeframe` is already selected.
    ///
    /// Returns the token of the transition cycle this started, if any. A new
    /// timeframe that leaves the visible window unchanged (a series shorter
    /// than both lookbacks) updates the selection without animating.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Option<TransitionToken> {
        if self.selection.timeframe == timeframe {
            return None;
        }
        log::debug!("timeframe {} -> {timeframe}", self.selection.timeframe);
        self.selection.timeframe = timeframe;
        self.recompute_slice();
        self.refresh()
    }

    /// Switch the timeframe by toolbar label (`"1M"`, `"6M"`, `"1Y"`, `"ALL"`).
    ///
    /// An empty label (toggle deselection) keeps the current timeframe.
    /// Unknown labels fail with `InvalidTimeframe` and change nothing.
    pub fn set_timeframe_label(&mut self, label: &str) -> Result<Option<TransitionToken>, ChartError> {
        if label.trim().is_empty() {
            return Ok(None);
        }
        let timeframe = label.parse::<Timeframe>().inspect_err(|e| log::warn!("{e}"))?;
        Ok(self.set_timeframe(timeframe))
    }

    /// Switch the chart type. No-op when `mode` is already active; any other
    /// mode starts exactly one transition cycle.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Option<TransitionToken> {
        let transition = self.modes.reduce(self.selection.view_mode, mode);
        self.apply_mode(transition)
    }

    /// Switch the chart type by label (`"line"`, `"candlestick"`, ...).
    ///
    /// Unknown labels fail with `InvalidViewMode`; the selection is unchanged.
    pub fn set_view_mode_label(&mut self, label: &str) -> Result<Option<TransitionToken>, ChartError> {
        let transition = self
            .modes
            .reduce_label(self.selection.view_mode, label)
            .inspect_err(|e| log::warn!("{e}"))?;
        Ok(self.apply_mode(transition))
    }

    /// The full observable state for rendering.
    pub fn current_view(&self) -> ChartView {
        ChartView {
            timeframe: self.selection.timeframe,
            view_mode: self.selection.view_mode,
            visible_slice: self.visible.clone(),
            transition_phase: self.coordinator.phase(),
            displayed: self.coordinator.displayed().cloned(),
        }
    }

    /// The active timeframe and view mode.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The window of the loaded series selected by the current timeframe.
    pub fn visible_slice(&self) -> &SeriesSlice {
        &self.visible
    }

    /// Padded value-axis bounds of the content on screen.
    pub fn value_domain(&self) -> Option<ValueDomain> {
        self.coordinator
            .displayed()?
            .value_domain(self.config.value_padding)
    }

    // ── Series loading ──────────────────────────────────────────────

    /// Install a new series for `instrument` and show it under the current
    /// selection. Cancels any outstanding request.
    pub fn load_series(&mut self, instrument: &str, series: Series) -> Option<TransitionToken> {
        self.pending_request = None;
        self.install(instrument, series)
    }

    /// Fetch `instrument` from a synchronous provider and install it.
    /// On error the current series and selection are kept.
    pub fn load_from(
        &mut self,
        provider: &dyn SeriesProvider,
        instrument: &str,
    ) -> Result<Option<TransitionToken>, ChartError> {
        let series = provider.get_series(instrument)?;
        Ok(self.load_series(instrument, series))
    }

    /// Register a request for `instrument`. Supersedes any earlier request.
    pub fn begin_request(&mut self, instrument: &str) -> RequestToken {
        self.last_request += 1;
        let token = RequestToken(self.last_request);
        self.pending_request = Some((token, instrument.to_string()));
        token
    }

    /// Deliver the response to a request.
    ///
    /// Responses to superseded requests are dropped silently (`Ok(false)`).
    /// For the current request, a provider error is returned and nothing
    /// changes; a series is installed (`Ok(true)`).
    pub fn complete_request(
        &mut self,
        token: RequestToken,
        response: Result<Series, ChartError>,
    ) -> Result<bool, ChartError> {
        let instrument = match self.pending_request.take() {
            Some((pending, instrument)) if pending == token => instrument,
            other => {
                self.pending_request = other;
                log::debug!("dropping stale series response {token:?}");
                return Ok(false);
            }
        };
        let series = response?;
        self.install(&instrument, series);
        Ok(true)
    }

    /// Fetch `instrument` from an asynchronous provider and install it.
    pub async fn load_from_async(
        &mut self,
        provider: &dyn AsyncSeriesProvider,
        instrument: &str,
    ) -> Result<bool, ChartError> {
        let token = self.begin_request(instrument);
        let response = provider.get_series(instrument).await;
        self.complete_request(token, response)
    }

    /// The full loaded series (empty until the first load).
    pub fn series(&self) -> &Series {
        self.store.series()
    }

    /// Instrument id of the loaded series.
    pub fn instrument(&self) -> Option<&str> {
        self.store.instrument()
    }

    // ── Time ────────────────────────────────────────────────────────

    /// Let `dt` of animation time pass on the built-in timer queue,
    /// delivering every callback that comes due (including ones scheduled
    /// by earlier callbacks within the same span).
    pub fn advance(&mut self, dt: Duration) {
        let until = self.timers.now().saturating_add(dt);
        while let Some(token) = self.timers.pop_due(until) {
            self.on_timer(token);
        }
        self.timers.advance_to(until);
    }

    /// Deliver a transition callback. Returns `false` for stale tokens,
    /// which have no effect.
    pub fn on_timer(&mut self, token: TransitionToken) -> bool {
        let honored = self.coordinator.on_timer(token, &mut self.timers);
        if honored {
            self.render();
        }
        honored
    }

    /// Phase of the current transition cycle.
    pub fn transition_phase(&self) -> TransitionPhase {
        self.coordinator.phase()
    }

    /// The transition coordinator, for inspecting tokens and cycle counts.
    pub fn coordinator(&self) -> &TransitionCoordinator {
        &self.coordinator
    }

    /// The built-in timer queue driven by `advance`.
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    // ── Surface / config ────────────────────────────────────────────

    /// The rendering surface frames are handed to.
    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// Mutable access to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    /// The validated configuration this engine was built with.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(config: ChartConfig, surface: R) -> Self {
        let selection = Selection::new(config.default_timeframe, config.default_view_mode);
        let coordinator = TransitionCoordinator::new(&config);
        let store = TimeSeriesStore::new();
        let visible = store.series().full_slice();

        let mut engine = Self {
            config,
            selection,
            store,
            selector: WindowSelector::new(),
            modes: ViewModeController::new(),
            coordinator,
            timers: TimerQueue::new(),
            visible,
            surface,
            last_request: 0,
            pending_request: None,
        };
        engine.recompute_slice();
        engine.refresh();
        engine
    }

    fn install(&mut self, instrument: &str, series: Series) -> Option<TransitionToken> {
        self.store.load(instrument, series);
        self.recompute_slice();
        self.refresh()
    }

    fn apply_mode(&mut self, transition: ModeTransition) -> Option<TransitionToken> {
        match transition {
            ModeTransition::Unchanged => None,
            ModeTransition::Changed { from, to } => {
                log::debug!("view mode {from} -> {to}");
                self.selection.view_mode = to;
                self.refresh()
            }
        }
    }

    fn recompute_slice(&mut self) {
        self.visible = self
            .selector
            .select(self.store.series(), self.selection.timeframe);
    }

    /// Start a cycle if the content for the current selection differs from
    /// what the active cycle is heading to.
    fn refresh(&mut self) -> Option<TransitionToken> {
        let content = ChartContent::for_mode(self.selection.view_mode, &self.visible);
        if self
            .coordinator
            .target()
            .is_some_and(|target| target.same_as(&content))
        {
            return None;
        }
        let token = self.coordinator.begin(content, &mut self.timers);
        self.render();
        Some(token)
    }

    fn render(&mut self) {
        let Some(content) = self.coordinator.displayed() else {
            return;
        };
        let frame = RenderFrame {
            selection: self.selection,
            content: content.clone(),
            phase: self.coordinator.phase(),
            token: self.coordinator.token(),
            motion: self.coordinator.motion(),
            value_domain: content.value_domain(self.config.value_padding),
        };
        self.surface.render(&frame);
    }
}

impl Default for ChartEngine<NullSurface> {
    fn default() -> Self {
        Self::headless()
    }
}
