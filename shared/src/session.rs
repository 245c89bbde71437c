//! Spin lifecycle for one user session
//!
//! `Idle -> Spinning -> Settled`. Settling is driven by [`WheelSession::tick`]
//! from the front end's frame loop, never by a blocking wait. A spin cannot
//! be cancelled; it always lasts its planned duration.

use std::time::Instant;

use rand::Rng;

use crate::spin::{SpinAnimator, SpinPlan, DEFAULT_DURATION_SECS};
use crate::wheel::{Entry, EntryId, WheelError, WheelState};

/// Where the wheel is in its spin lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SpinPhase {
    /// At rest, highlighting the last winner if there is one
    Idle,
    /// Animating towards a winner chosen up front
    Spinning {
        plan: SpinPlan,
        winner_id: EntryId,
        started: Instant,
    },
    /// At rest after a spin; behaves like `Idle` for new spins
    Settled { winner_id: EntryId, at: Instant },
}

impl SpinPhase {
    pub fn is_spinning(&self) -> bool {
        matches!(self, SpinPhase::Spinning { .. })
    }

    /// Winner of the spin in flight, if any
    pub fn pending_winner(&self) -> Option<EntryId> {
        match self {
            SpinPhase::Spinning { winner_id, .. } => Some(*winner_id),
            _ => None,
        }
    }

    /// Rotation to render at `now`; zero at rest
    pub fn rotation_at(&self, now: Instant) -> f64 {
        match self {
            SpinPhase::Spinning { plan, started, .. } => {
                plan.rotation_at(now.saturating_duration_since(*started).as_secs_f64())
            }
            _ => 0.0,
        }
    }

    /// Seconds since the last spin settled
    pub fn settled_for(&self, now: Instant) -> Option<f64> {
        match self {
            SpinPhase::Settled { at, .. } => Some(now.saturating_duration_since(*at).as_secs_f64()),
            _ => None,
        }
    }
}

/// Wheel state, spin planner and lifecycle, owned by one session
///
/// Every operation takes `&mut self`, so one session can never run two
/// spins at once. Sharing a session across threads means wrapping it in a
/// lock so winner selection and planning happen together.
#[derive(Debug, Clone)]
pub struct WheelSession {
    state: WheelState,
    animator: SpinAnimator,
    phase: SpinPhase,
    spin_duration_secs: f64,
}

impl Default for WheelSession {
    fn default() -> Self {
        Self::new(SpinAnimator::default())
    }
}

impl WheelSession {
    pub fn new(animator: SpinAnimator) -> Self {
        let spin_duration_secs = animator.clamp_duration(DEFAULT_DURATION_SECS);
        Self {
            state: WheelState::new(),
            animator,
            phase: SpinPhase::Idle,
            spin_duration_secs,
        }
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    /// Mutable access for add, rename and remove
    pub fn state_mut(&mut self) -> &mut WheelState {
        &mut self.state
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    pub fn animator(&self) -> &SpinAnimator {
        &self.animator
    }

    pub fn spin_duration_secs(&self) -> f64 {
        self.spin_duration_secs
    }

    /// Set the duration for future spins, clamped to the allowed range
    pub fn set_spin_duration_secs(&mut self, secs: f64) {
        self.spin_duration_secs = self.animator.clamp_duration(secs);
    }

    /// Whether a spin may start now
    pub fn is_spinnable(&self) -> bool {
        !self.phase.is_spinning() && self.state.is_spinnable()
    }

    /// Pick a winner and start spinning towards it
    pub fn start_spin(&mut self, now: Instant) -> Result<SpinPlan, WheelError> {
        self.start_spin_with(&mut rand::rng(), now)
    }

    pub fn start_spin_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: Instant,
    ) -> Result<SpinPlan, WheelError> {
        if self.phase.is_spinning() {
            return Err(WheelError::SpinInProgress);
        }

        let index = self.state.pick_winner_with(rng)?;
        let plan = self
            .animator
            .plan_spin_with(rng, index, self.state.len(), self.spin_duration_secs)?;
        let winner_id = self.state.entries()[index].id;

        log::info!(
            "Spinning {} turns over {:.1}s towards {:?}",
            plan.full_turns,
            plan.duration_seconds,
            self.state.entries()[index].title
        );

        self.phase = SpinPhase::Spinning {
            plan,
            winner_id,
            started: now,
        };
        Ok(plan)
    }

    /// Advance the lifecycle; returns the winner once, when the spin settles
    ///
    /// If the winner was removed while the wheel was turning, the spin still
    /// settles but nothing is returned and no winner is recorded.
    pub fn tick(&mut self, now: Instant) -> Option<Entry> {
        let (plan, winner_id, started) = match &self.phase {
            SpinPhase::Spinning {
                plan,
                winner_id,
                started,
            } => (*plan, *winner_id, *started),
            _ => return None,
        };

        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        if !plan.is_finished(elapsed) {
            return None;
        }

        self.phase = SpinPhase::Settled { winner_id, at: now };
        if self.state.set_last_winner(winner_id) {
            let winner = self.state.get(winner_id).cloned();
            if let Some(entry) = &winner {
                log::info!("Settled on {:?}", entry.title);
            }
            winner
        } else {
            log::warn!("Winner {} was removed before the spin settled", winner_id);
            None
        }
    }
}
