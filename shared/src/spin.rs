//! Spin planning
//!
//! A spin is always a whole number of turns. The wheel image is arranged so
//! the winner already sits in the pointer slot, so stopping after full turns
//! lands it under the pointer without any fractional alignment.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::wheel::{is_spinnable, WheelError};

/// Shortest allowed spin
pub const MIN_DURATION_SECS: f64 = 2.0;
/// Longest allowed spin
pub const MAX_DURATION_SECS: f64 = 8.0;
/// Slider step for the duration control
pub const DURATION_STEP_SECS: f64 = 0.5;
pub const DEFAULT_DURATION_SECS: f64 = 3.5;
/// Inclusive range of full turns per spin
pub const FULL_TURNS: RangeInclusive<u32> = 6..=10;

/// Timing curve for the spin animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    /// Unit cubic Bézier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Fast start, long deceleration to a stop
    pub const EASE_OUT: Easing = Easing::CubicBezier {
        x1: 0.2,
        y1: 0.9,
        x2: 0.2,
        y2: 1.0,
    };

    /// Eased progress for linear time progress `t` in `[0, 1]`
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = solve_bezier_param(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }
}

/// One coordinate of a unit cubic Bézier at parameter `s`
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate is `x`
fn solve_bezier_param(x: f64, x1: f64, x2: f64) -> f64 {
    // Newton first, bisection if the slope flattens out
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < 1e-7 {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

/// Animation descriptor for one spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winner_index: usize,
    pub full_turns: u32,
    /// Total clockwise rotation, always a positive multiple of 360
    pub rotation_degrees: f64,
    pub duration_seconds: f64,
    pub easing: Easing,
}

impl SpinPlan {
    /// Linear time progress in `[0, 1]`
    pub fn progress_at(&self, elapsed_secs: f64) -> f64 {
        if self.duration_seconds <= 0.0 {
            return 1.0;
        }
        (elapsed_secs / self.duration_seconds).clamp(0.0, 1.0)
    }

    /// Rotation to render `elapsed_secs` into the spin
    pub fn rotation_at(&self, elapsed_secs: f64) -> f64 {
        self.rotation_degrees * self.easing.apply(self.progress_at(elapsed_secs))
    }

    pub fn is_finished(&self, elapsed_secs: f64) -> bool {
        elapsed_secs >= self.duration_seconds
    }
}

/// Tunables for spin planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinSettings {
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub min_turns: u32,
    pub max_turns: u32,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            min_duration_secs: MIN_DURATION_SECS,
            max_duration_secs: MAX_DURATION_SECS,
            min_turns: *FULL_TURNS.start(),
            max_turns: *FULL_TURNS.end(),
        }
    }
}

/// Turns winner selections into spin plans
#[derive(Debug, Clone, Default)]
pub struct SpinAnimator {
    settings: SpinSettings,
}

impl SpinAnimator {
    pub fn new(settings: SpinSettings) -> Self {
        let mut settings = settings;
        if settings.max_duration_secs < settings.min_duration_secs {
            std::mem::swap(&mut settings.min_duration_secs, &mut settings.max_duration_secs);
        }
        // Zero turns would not be a positive rotation
        settings.min_turns = settings.min_turns.max(1);
        settings.max_turns = settings.max_turns.max(settings.min_turns);
        Self { settings }
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    /// Clamp a requested duration into the configured bounds
    ///
    /// Non-finite requests fall back to the default duration.
    pub fn clamp_duration(&self, requested_secs: f64) -> f64 {
        let requested = if requested_secs.is_finite() {
            requested_secs
        } else {
            DEFAULT_DURATION_SECS
        };
        requested.clamp(self.settings.min_duration_secs, self.settings.max_duration_secs)
    }

    /// Plan a spin landing `winner_index` under the pointer
    pub fn plan_spin(
        &self,
        winner_index: usize,
        total_count: usize,
        requested_duration_secs: f64,
    ) -> Result<SpinPlan, WheelError> {
        self.plan_spin_with(
            &mut rand::rng(),
            winner_index,
            total_count,
            requested_duration_secs,
        )
    }

    /// Plan a spin drawing the number of turns from `rng`
    pub fn plan_spin_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        winner_index: usize,
        total_count: usize,
        requested_duration_secs: f64,
    ) -> Result<SpinPlan, WheelError> {
        if !is_spinnable(total_count) {
            return Err(WheelError::InsufficientEntries { count: total_count });
        }
        if winner_index >= total_count {
            return Err(WheelError::WinnerOutOfRange {
                index: winner_index,
                count: total_count,
            });
        }

        let full_turns = rng.random_range(self.settings.min_turns..=self.settings.max_turns);
        Ok(SpinPlan {
            winner_index,
            full_turns,
            rotation_degrees: full_turns as f64 * 360.0,
            duration_seconds: self.clamp_duration(requested_duration_secs),
            easing: Easing::EASE_OUT,
        })
    }
}
