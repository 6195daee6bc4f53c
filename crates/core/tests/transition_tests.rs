// ═══════════════════════════════════════════════════════════════════
// Transition Tests — TimerQueue, TransitionCoordinator, ViewModeController
// ═══════════════════════════════════════════════════════════════════

use std::time::Duration;

use chrono::NaiveDate;
use price_chart_core::errors::ChartError;
use price_chart_core::models::bar::Bar;
use price_chart_core::models::config::ChartConfig;
use price_chart_core::models::series::Series;
use price_chart_core::models::transition::{Easing, TransitionPhase, TransitionToken};
use price_chart_core::models::view::ChartContent;
use price_chart_core::models::view_mode::ViewMode;
use price_chart_core::services::timer_queue::{Scheduler, TimerQueue};
use price_chart_core::services::transition_coordinator::TransitionCoordinator;
use price_chart_core::services::view_mode_controller::{ModeTransition, ViewModeController};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn series(n: usize) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = (0..n)
        .map(|i| {
            let p = 50.0 + i as f64;
            Bar::new(start + chrono::Days::new(i as u64), p, p + 1.0, p - 1.0, p + 0.5)
        })
        .collect();
    Series::new(bars).unwrap()
}

fn content(mode: ViewMode) -> ChartContent {
    ChartContent::for_mode(mode, &series(10).full_slice())
}

/// Deliver every callback due within `dt`, the way a host loop would.
fn run(coord: &mut TransitionCoordinator, timers: &mut TimerQueue, dt: Duration) -> usize {
    let mut honored = 0;
    for token in timers.advance(dt) {
        if coord.on_timer(token, &mut *timers) {
            honored += 1;
        }
    }
    honored
}

// ═══════════════════════════════════════════════════════════════════
//  TimerQueue
// ═══════════════════════════════════════════════════════════════════

mod timer_queue {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(TransitionToken(1), ms(300));
        q.schedule(TransitionToken(2), ms(100));
        q.schedule(TransitionToken(3), ms(200));
        assert_eq!(q.pending(), 3);
        assert_eq!(q.next_due(), Some(ms(100)));

        let fired = q.advance(ms(1000));
        assert_eq!(fired, vec![TransitionToken(2), TransitionToken(3), TransitionToken(1)]);
        assert_eq!(q.pending(), 0);
        assert_eq!(q.now(), ms(1000));
    }

    #[test]
    fn same_due_time_is_fifo() {
        let mut q = TimerQueue::new();
        q.schedule(TransitionToken(5), ms(100));
        q.schedule(TransitionToken(4), ms(100));
        assert_eq!(q.advance(ms(100)), vec![TransitionToken(5), TransitionToken(4)]);
    }

    #[test]
    fn does_not_fire_early() {
        let mut q = TimerQueue::new();
        q.schedule(TransitionToken(1), ms(500));
        assert!(q.advance(ms(499)).is_empty());
        assert!(q.is_scheduled(TransitionToken(1)));
        assert_eq!(q.advance(ms(1)), vec![TransitionToken(1)]);
    }

    #[test]
    fn delay_is_relative_to_now() {
        let mut q = TimerQueue::new();
        q.advance(ms(1000));
        q.schedule(TransitionToken(1), ms(100));
        assert_eq!(q.next_due(), Some(ms(1100)));
    }

    #[test]
    fn cancel_removes_only_that_token() {
        let mut q = TimerQueue::new();
        q.schedule(TransitionToken(1), ms(100));
        q.schedule(TransitionToken(2), ms(100));
        q.cancel(TransitionToken(1));
        q.cancel(TransitionToken(99));
        assert_eq!(q.pending(), 1);
        assert_eq!(q.advance(ms(100)), vec![TransitionToken(2)]);
    }

    #[test]
    fn pop_due_moves_clock_to_due_time() {
        let mut q = TimerQueue::new();
        q.schedule(TransitionToken(1), ms(200));
        assert_eq!(q.pop_due(ms(100)), None);
        assert_eq!(q.pop_due(ms(500)), Some(TransitionToken(1)));
        assert_eq!(q.now(), ms(200));
        q.advance_to(ms(500));
        assert_eq!(q.now(), ms(500));
        q.advance_to(ms(10));
        assert_eq!(q.now(), ms(500));
    }

    #[test]
    fn huge_advance_saturates_the_clock() {
        let mut q = TimerQueue::new();
        q.advance(ms(1000));
        q.schedule(TransitionToken(1), ms(100));
        assert_eq!(q.advance(Duration::MAX), vec![TransitionToken(1)]);
        assert_eq!(q.now(), Duration::MAX);

        // Scheduling at the end of time still fires on the next advance
        q.schedule(TransitionToken(2), ms(1));
        assert_eq!(q.next_due(), Some(Duration::MAX));
        assert_eq!(q.advance(ms(1)), vec![TransitionToken(2)]);
        assert_eq!(q.pending(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TransitionCoordinator
// ═══════════════════════════════════════════════════════════════════

mod coordinator {
    use super::*;

    #[test]
    fn starts_idle_with_nothing_displayed() {
        let coord = TransitionCoordinator::new(&ChartConfig::default());
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        assert_eq!(coord.token(), TransitionToken(0));
        assert!(coord.displayed().is_none());
        assert!(coord.motion().is_none());
    }

    #[test]
    fn first_cycle_enters_directly() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());

        let token = coord.begin(content(ViewMode::Line), &mut timers);
        assert_eq!(token, TransitionToken(1));
        assert_eq!(coord.phase(), TransitionPhase::Entering);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Line));
        assert_eq!(timers.pending(), 1);

        assert_eq!(run(&mut coord, &mut timers, ms(500)), 1);
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn settled_content_exits_before_new_content_enters() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());
        coord.begin(content(ViewMode::Line), &mut timers);
        run(&mut coord, &mut timers, ms(500));

        coord.begin(content(ViewMode::Candlestick), &mut timers);
        assert_eq!(coord.phase(), TransitionPhase::Exiting);
        // Old content stays on screen while it animates out
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Line));
        assert_eq!(coord.target().map(|c| c.mode()), Some(ViewMode::Candlestick));

        run(&mut coord, &mut timers, ms(300));
        assert_eq!(coord.phase(), TransitionPhase::Entering);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Candlestick));

        run(&mut coord, &mut timers, ms(500));
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        assert_eq!(coord.cycles_started(), 2);
        assert_eq!(coord.cycles_cancelled(), 0);
    }

    #[test]
    fn change_while_entering_cancels_and_enters_directly() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());
        let stale = coord.begin(content(ViewMode::Line), &mut timers);
        run(&mut coord, &mut timers, ms(200));
        assert_eq!(coord.phase(), TransitionPhase::Entering);

        let current = coord.begin(content(ViewMode::Candlestick), &mut timers);
        assert!(current > stale);
        assert_eq!(coord.phase(), TransitionPhase::Entering);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Candlestick));
        assert_eq!(timers.pending(), 1);
        assert!(!timers.is_scheduled(stale));
        assert_eq!(coord.cycles_cancelled(), 1);

        // A late callback from the superseded cycle changes nothing
        assert!(!coord.on_timer(stale, &mut timers));
        assert_eq!(coord.phase(), TransitionPhase::Entering);
        assert_eq!(coord.token(), current);

        assert_eq!(run(&mut coord, &mut timers, ms(500)), 1);
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Candlestick));
    }

    #[test]
    fn change_while_exiting_skips_the_exit() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());
        coord.begin(content(ViewMode::Line), &mut timers);
        run(&mut coord, &mut timers, ms(500));

        coord.begin(content(ViewMode::Candlestick), &mut timers);
        assert_eq!(coord.phase(), TransitionPhase::Exiting);

        coord.begin(content(ViewMode::Heatmap), &mut timers);
        assert_eq!(coord.phase(), TransitionPhase::Entering);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Heatmap));
        assert_eq!(timers.pending(), 1);

        run(&mut coord, &mut timers, ms(500));
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Heatmap));
    }

    #[test]
    fn rapid_changes_leave_at_most_one_pending_callback() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());
        for i in 0..50 {
            let mode = ViewMode::ALL_VALUES[i % 4];
            coord.begin(content(mode), &mut timers);
            assert!(timers.pending() <= 1);
            run(&mut coord, &mut timers, ms(10));
        }
        assert_eq!(coord.token(), TransitionToken(50));
        run(&mut coord, &mut timers, ms(1000));
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn zero_durations_complete_synchronously() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::instant());
        coord.begin(content(ViewMode::Line), &mut timers);
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        coord.begin(content(ViewMode::Surface), &mut timers);
        assert_eq!(coord.phase(), TransitionPhase::Idle);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Surface));
        assert_eq!(timers.pending(), 0);
        assert_eq!(coord.cycles_started(), 2);
    }

    #[test]
    fn zero_exit_duration_enters_directly() {
        let config = ChartConfig {
            transition_out_duration: 0.0,
            ..ChartConfig::default()
        };
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&config);
        coord.begin(content(ViewMode::Line), &mut timers);
        run(&mut coord, &mut timers, ms(500));

        coord.begin(content(ViewMode::Candlestick), &mut timers);
        assert_eq!(coord.phase(), TransitionPhase::Entering);
        assert_eq!(coord.displayed().map(|c| c.mode()), Some(ViewMode::Candlestick));
    }

    #[test]
    fn callbacks_after_idle_are_ignored() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());
        let token = coord.begin(content(ViewMode::Line), &mut timers);
        run(&mut coord, &mut timers, ms(500));
        assert!(!coord.on_timer(token, &mut timers));
        assert_eq!(coord.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn motion_follows_phase_and_content_kind() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());

        coord.begin(content(ViewMode::Line), &mut timers);
        let enter = coord.motion().unwrap();
        assert_eq!(enter.duration, ms(500));
        assert_eq!(enter.easing, Easing::EaseOut);
        assert_eq!((enter.opacity_from, enter.opacity_to), (0.0, 1.0));
        assert_eq!((enter.offset_from, enter.offset_to), (20.0, 0.0));

        run(&mut coord, &mut timers, ms(500));
        assert!(coord.motion().is_none());

        coord.begin(content(ViewMode::Surface), &mut timers);
        let exit = coord.motion().unwrap();
        // Outgoing line content keeps its own easing
        assert_eq!(exit.easing, Easing::EaseOut);
        assert_eq!((exit.opacity_from, exit.opacity_to), (1.0, 0.0));
        assert_eq!((exit.offset_from, exit.offset_to), (0.0, -20.0));

        run(&mut coord, &mut timers, ms(300));
        assert_eq!(coord.motion().unwrap().easing, Easing::Linear);
    }

    #[test]
    fn state_pairs_phase_and_token() {
        let mut timers = TimerQueue::new();
        let mut coord = TransitionCoordinator::new(&ChartConfig::default());
        let token = coord.begin(content(ViewMode::Line), &mut timers);
        let state = coord.state();
        assert_eq!(state.phase, TransitionPhase::Entering);
        assert_eq!(state.token, token);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ViewModeController
// ═══════════════════════════════════════════════════════════════════

mod view_mode_controller {
    use super::*;

    #[test]
    fn same_mode_is_unchanged() {
        let c = ViewModeController::new();
        for mode in ViewMode::ALL_VALUES {
            assert_eq!(c.reduce(mode, mode), ModeTransition::Unchanged);
        }
    }

    #[test]
    fn every_mode_reaches_every_other() {
        let c = ViewModeController::new();
        for from in ViewMode::ALL_VALUES {
            for to in ViewMode::ALL_VALUES {
                let t = c.reduce(from, to);
                if from == to {
                    assert!(!t.is_change());
                } else {
                    assert_eq!(t, ModeTransition::Changed { from, to });
                }
            }
        }
    }

    #[test]
    fn labels_are_parsed() {
        let c = ViewModeController::new();
        assert_eq!(
            c.reduce_label(ViewMode::Line, "heatmap").unwrap(),
            ModeTransition::Changed {
                from: ViewMode::Line,
                to: ViewMode::Heatmap
            }
        );
        assert_eq!(c.reduce_label(ViewMode::Line, "line").unwrap(), ModeTransition::Unchanged);
    }

    #[test]
    fn empty_label_is_a_deselection() {
        let c = ViewModeController::new();
        assert_eq!(c.reduce_label(ViewMode::Candlestick, "").unwrap(), ModeTransition::Unchanged);
        assert_eq!(c.reduce_label(ViewMode::Candlestick, "  ").unwrap(), ModeTransition::Unchanged);
    }

    #[test]
    fn unknown_label_is_invalid_view_mode() {
        let c = ViewModeController::default();
        assert_eq!(
            c.reduce_label(ViewMode::Line, "invalid-mode"),
            Err(ChartError::InvalidViewMode("invalid-mode".into()))
        );
    }
}
