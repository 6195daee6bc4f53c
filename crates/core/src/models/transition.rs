use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the content swap currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// Nothing animating; the displayed content is settled
    #[default]
    Idle,
    /// New content is fading/sliding in
    Entering,
    /// Old content is fading/sliding out
    Exiting,
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionPhase::Idle => write!(f, "idle"),
            TransitionPhase::Entering => write!(f, "entering"),
            TransitionPhase::Exiting => write!(f, "exiting"),
        }
    }
}

/// Identifies one transition cycle. Strictly increasing; a timer callback
/// is honored only while its token is the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TransitionToken(pub u64);

impl TransitionToken {
    pub fn next(self) -> Self {
        TransitionToken(self.0 + 1)
    }
}

impl std::fmt::Display for TransitionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Phase plus the token of the cycle that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransitionState {
    pub phase: TransitionPhase,
    pub token: TransitionToken,
}

/// Easing curve applied to animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` (clamped to `[0, 1]`) onto the curve.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Everything a surface needs to animate one phase without knowing policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    pub duration: Duration,
    pub easing: Easing,
    pub opacity_from: f64,
    pub opacity_to: f64,
    pub offset_from: f64,
    pub offset_to: f64,
}

impl Motion {
    /// Fade in while sliding up from `offset` to rest.
    pub fn enter(duration: Duration, easing: Easing, offset: f64) -> Self {
        Self {
            duration,
            easing,
            opacity_from: 0.0,
            opacity_to: 1.0,
            offset_from: offset,
            offset_to: 0.0,
        }
    }

    /// Fade out while sliding up from rest to `-offset`.
    pub fn exit(duration: Duration, easing: Easing, offset: f64) -> Self {
        Self {
            duration,
            easing,
            opacity_from: 1.0,
            opacity_to: 0.0,
            offset_from: 0.0,
            offset_to: -offset,
        }
    }

    /// `(opacity, vertical offset)` after `elapsed`.
    pub fn sample(&self, elapsed: Duration) -> (f64, f64) {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        let k = self.easing.apply(t);
        (
            self.opacity_from + (self.opacity_to - self.opacity_from) * k,
            self.offset_from + (self.offset_to - self.offset_from) * k,
        )
    }
}
