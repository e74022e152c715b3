//! One-shot startup sequence: Blue and locked for a fixed delay, then unlocked and Purple.
//!
//! The delay is a deadline value advanced by the host's frame time rather than a
//! suspended task. Cancelling is just dropping back to `Inactive`.

use std::time::Duration;

use crate::presentation::Tint;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartupSequence {
    /// Not started, or abandoned by a deactivation.
    #[default]
    Inactive,
    /// Counting down; movement stays locked.
    Waiting { remaining: Duration },
    /// Unlock already happened for this activation.
    Finished,
}

impl StartupSequence {
    /// Start (or restart) the sequence. Any in-flight countdown is discarded.
    ///
    /// Returns the tint to apply immediately.
    pub fn begin(duration: Duration) -> (Self, Tint) {
        (
            Self::Waiting {
                remaining: duration,
            },
            Tint::Blue,
        )
    }

    /// Advance the countdown by `dt`.
    ///
    /// Returns the unlock tint exactly once, on the sample where the accumulated time
    /// reaches the configured duration. The caller unlocks movement at that point.
    pub fn advance(self, dt: Duration) -> (Self, Option<Tint>) {
        match self {
            Self::Waiting { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    (Self::Finished, Some(Tint::Purple))
                } else {
                    (Self::Waiting { remaining }, None)
                }
            }
            other => (other, None),
        }
    }

    /// Abandon any pending countdown.
    pub fn cancel(self) -> Self {
        Self::Inactive
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::Waiting { .. })
    }
}
