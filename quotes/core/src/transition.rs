//! Fade Transition - Deferred Two-Phase Mutation
//!
//! A quote request runs in two steps: hide immediately, then pick after a
//! fixed delay. The delay is not a blocking wait. It is an in-flight
//! [`PendingPick`] handle that the owner advances with frame deltas via
//! [`Transition::advance`]; the handle fires exactly once unless cancelled.
//!
//! # Re-entrancy
//!
//! At most one pick is ever in flight. What a second request does while one
//! is pending is decided by [`RequestPolicy`].
//!
//! ```text
//!  request ──→ Hidden ──(delay)──→ pick ──→ Visible
//!                │
//!                └─ request again: Ignore (dropped) | Restart (timer reset)
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between hiding the quote and picking its replacement
pub const DEFAULT_FADE_DELAY: Duration = Duration::from_millis(500);

/// Visual fade state gating text opacity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// Text is shown (or fading in)
    #[default]
    Visible,
    /// Text is fading out while a pick is pending
    Hidden,
}

/// What a request does while another pick is still pending
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestPolicy {
    /// Drop the new request; the pending pick fires as scheduled
    #[default]
    Ignore,
    /// Cancel the pending pick and schedule a fresh one with the full delay
    Restart,
}

impl FromStr for RequestPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "restart" => Ok(Self::Restart),
            other => Err(format!(
                "unknown request policy '{other}' (expected 'ignore' or 'restart')"
            )),
        }
    }
}

impl fmt::Display for RequestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Restart => write!(f, "restart"),
        }
    }
}

/// Identifies one scheduled pick
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(u64);

impl TransitionId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A scheduled pick that has not fired yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPick {
    /// Handle of this pick
    pub id: TransitionId,
    /// Time accumulated since the hide step
    pub elapsed: Duration,
    /// Delay after which the pick fires
    pub delay: Duration,
}

impl PendingPick {
    /// Time left before the pick fires
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.delay.saturating_sub(self.elapsed)
    }

    /// Whether the pick is due
    #[must_use]
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.delay
    }
}

/// Result of a request to start a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A new pick was scheduled
    Scheduled(TransitionId),
    /// Dropped because this pick is already pending
    Ignored(TransitionId),
    /// The pending pick was cancelled and replaced
    Restarted {
        cancelled: TransitionId,
        scheduled: TransitionId,
    },
}

impl RequestOutcome {
    /// Handle of the pick that will fire
    #[must_use]
    pub fn pending_id(self) -> TransitionId {
        match self {
            Self::Scheduled(id) | Self::Ignored(id) => id,
            Self::Restarted { scheduled, .. } => scheduled,
        }
    }
}

/// Phase tracking plus the optional in-flight pick
#[derive(Clone, Debug)]
pub struct Transition {
    phase: TransitionPhase,
    /// Time since the last phase change; starts saturated so a freshly
    /// mounted quote is fully opaque
    phase_elapsed: Duration,
    pending: Option<PendingPick>,
    next_id: u64,
    delay: Duration,
    policy: RequestPolicy,
}

impl Transition {
    #[must_use]
    pub fn new(delay: Duration, policy: RequestPolicy) -> Self {
        Self {
            phase: TransitionPhase::Visible,
            phase_elapsed: Duration::MAX,
            pending: None,
            next_id: 0,
            delay,
            policy,
        }
    }

    /// Hide step: enter [`TransitionPhase::Hidden`] and schedule a pick
    pub fn begin(&mut self) -> RequestOutcome {
        match (self.pending, self.policy) {
            (Some(pending), RequestPolicy::Ignore) => {
                tracing::debug!(id = pending.id.0, "Quote request ignored, pick pending");
                RequestOutcome::Ignored(pending.id)
            }
            (Some(pending), RequestPolicy::Restart) => {
                let scheduled = self.schedule();
                tracing::debug!(
                    cancelled = pending.id.0,
                    scheduled = scheduled.0,
                    "Pending pick restarted"
                );
                RequestOutcome::Restarted {
                    cancelled: pending.id,
                    scheduled,
                }
            }
            (None, _) => {
                let id = self.schedule();
                self.set_phase(TransitionPhase::Hidden);
                RequestOutcome::Scheduled(id)
            }
        }
    }

    fn schedule(&mut self) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.pending = Some(PendingPick {
            id,
            elapsed: Duration::ZERO,
            delay: self.delay,
        });
        id
    }

    /// Advance time; returns the pick that became due, if any
    ///
    /// The returned pick is no longer pending. The caller performs the pick
    /// and then calls [`Transition::complete`].
    pub fn advance(&mut self, delta: Duration) -> Option<TransitionId> {
        self.phase_elapsed = self.phase_elapsed.saturating_add(delta);

        let pending = self.pending.as_mut()?;
        pending.elapsed = pending.elapsed.saturating_add(delta);
        if pending.is_due() {
            let id = pending.id;
            self.pending = None;
            Some(id)
        } else {
            None
        }
    }

    /// Show step: back to [`TransitionPhase::Visible`]
    pub fn complete(&mut self) {
        self.set_phase(TransitionPhase::Visible);
    }

    /// Drop the in-flight pick (if any) and show the quote again
    pub fn cancel(&mut self) -> Option<TransitionId> {
        let cancelled = self.pending.take().map(|p| p.id);
        if cancelled.is_some() {
            self.set_phase(TransitionPhase::Visible);
        }
        cancelled
    }

    fn set_phase(&mut self, phase: TransitionPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.phase_elapsed = Duration::ZERO;
        }
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[must_use]
    pub fn phase_elapsed(&self) -> Duration {
        self.phase_elapsed
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingPick> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn policy(&self) -> RequestPolicy {
        self.policy
    }
}

/// Easing curves for the opacity fade
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start, fast end
    EaseIn,
    /// Fast start, slow end
    EaseOut,
    /// Slow start and end
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the curve to a progress value (0.0 to 1.0)
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Text opacity for a phase, `elapsed` into a fade lasting `duration`
#[must_use]
pub fn opacity(phase: TransitionPhase, elapsed: Duration, duration: Duration, easing: Easing) -> f32 {
    let progress = if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0) as f32
    };
    let eased = easing.apply(progress);
    match phase {
        TransitionPhase::Visible => eased,
        TransitionPhase::Hidden => 1.0 - eased,
    }
}
