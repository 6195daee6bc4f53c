use std::time::Duration;

use crate::models::config::ChartConfig;
use crate::models::transition::{Motion, TransitionPhase, TransitionState, TransitionToken};
use crate::models::view::ChartContent;

use super::timer_queue::Scheduler;

/// Sequences the animated swap of chart content.
///
/// A cycle started from `Idle` with content on screen plays
/// `Exiting` (old content, exit duration) → `Entering` (new content, enter
/// duration) → `Idle`. With nothing on screen, or a zero exit duration, the
/// cycle starts at `Entering`. Zero durations complete synchronously.
///
/// At most one cycle is active. Starting a cycle while another is in flight
/// cancels the pending callback, skips the exit and enters the new content
/// directly. Every cycle gets a fresh token; a callback whose token is not
/// the current one is ignored.
#[derive(Debug)]
pub struct TransitionCoordinator {
    enter_duration: Duration,
    exit_duration: Duration,
    config: ChartConfig,

    state: TransitionState,
    /// On screen now (the outgoing content while exiting)
    displayed: Option<ChartContent>,
    /// Waiting for the exit to finish
    incoming: Option<ChartContent>,

    cycles_started: u64,
    cycles_cancelled: u64,
}

impl TransitionCoordinator {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            enter_duration: config.enter_duration(),
            exit_duration: config.exit_duration(),
            config: config.clone(),
            state: TransitionState::default(),
            displayed: None,
            incoming: None,
            cycles_started: 0,
            cycles_cancelled: 0,
        }
    }

    /// Start a cycle that ends with `content` on screen.
    pub fn begin<S: Scheduler>(&mut self, content: ChartContent, scheduler: &mut S) -> TransitionToken {
        let in_flight = self.state.phase != TransitionPhase::Idle;
        if in_flight {
            scheduler.cancel(self.state.token);
            self.cycles_cancelled += 1;
            log::debug!(
                "transition {} cancelled while {}",
                self.state.token,
                self.state.phase
            );
        }

        let token = self.state.token.next();
        self.state.token = token;
        self.cycles_started += 1;

        if !in_flight && self.displayed.is_some() && !self.exit_duration.is_zero() {
            self.state.phase = TransitionPhase::Exiting;
            self.incoming = Some(content);
            scheduler.schedule(token, self.exit_duration);
        } else {
            self.incoming = None;
            self.enter(content, scheduler);
        }
        log::debug!("transition {token} started ({})", self.state.phase);
        token
    }

    /// Deliver a timer callback. Returns `false` (and changes nothing) when
    /// `token` belongs to a superseded or finished cycle.
    pub fn on_timer<S: Scheduler>(&mut self, token: TransitionToken, scheduler: &mut S) -> bool {
        if token != self.state.token || self.state.phase == TransitionPhase::Idle {
            log::debug!("ignoring stale transition callback {token}");
            return false;
        }
        // The host may deliver callbacks itself; drop any queued copy.
        scheduler.cancel(token);
        match self.state.phase {
            TransitionPhase::Exiting => match self.incoming.take() {
                Some(content) => self.enter(content, scheduler),
                None => self.state.phase = TransitionPhase::Idle,
            },
            TransitionPhase::Entering => self.state.phase = TransitionPhase::Idle,
            TransitionPhase::Idle => {}
        }
        true
    }

    fn enter<S: Scheduler>(&mut self, content: ChartContent, scheduler: &mut S) {
        self.displayed = Some(content);
        if self.enter_duration.is_zero() {
            self.state.phase = TransitionPhase::Idle;
        } else {
            self.state.phase = TransitionPhase::Entering;
            scheduler.schedule(self.state.token, self.enter_duration);
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn phase(&self) -> TransitionPhase {
        self.state.phase
    }

    pub fn token(&self) -> TransitionToken {
        self.state.token
    }

    pub fn displayed(&self) -> Option<&ChartContent> {
        self.displayed.as_ref()
    }

    /// The content the current cycle ends with.
    pub fn target(&self) -> Option<&ChartContent> {
        self.incoming.as_ref().or(self.displayed.as_ref())
    }

    /// Animation parameters for the current phase; `None` when idle.
    pub fn motion(&self) -> Option<Motion> {
        let mode = self.displayed.as_ref()?.mode();
        let easing = self.config.easing_for(mode);
        let offset = self.config.slide_offset;
        match self.state.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::Entering => Some(Motion::enter(self.enter_duration, easing, offset)),
            TransitionPhase::Exiting => Some(Motion::exit(self.exit_duration, easing, offset)),
        }
    }

    pub fn cycles_started(&self) -> u64 {
        self.cycles_started
    }

    pub fn cycles_cancelled(&self) -> u64 {
        self.cycles_cancelled
    }
}
