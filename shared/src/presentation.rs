//! Presentation state machine: walk/idle/sit animation triggers and the state tint.
//!
//! The machine is edge-triggered. A trigger fires only when the character starts or
//! stops walking, never continuously while input is held. Once walking, switching
//! directions without passing through exactly-zero input does not fire anything.

use crate::host::{AnimationDriver, TintTarget};
use crate::input::MovementInput;

/// Named animation triggers understood by the animation driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimTrigger {
    Walk,
    WalkBack,
    Idle,
    Sit,
}

impl AnimTrigger {
    pub const ALL: [AnimTrigger; 4] = [Self::Walk, Self::WalkBack, Self::Idle, Self::Sit];

    /// Trigger name as registered in the animation graph.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::WalkBack => "walkback",
            Self::Idle => "idle",
            Self::Sit => "sit",
        }
    }
}

/// Flat state-indicator color applied to the character's surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    /// Just activated, movement locked.
    Blue,
    /// Startup finished, ready to move.
    Purple,
    /// Walking in any direction.
    Green,
    /// Idle after having walked.
    Yellow,
    /// Sitting.
    Red,
}

impl Tint {
    pub const ALL: [Tint; 5] = [
        Self::Blue,
        Self::Purple,
        Self::Green,
        Self::Yellow,
        Self::Red,
    ];

    /// sRGB color components in `[0, 1]`.
    pub const fn srgb(self) -> [f32; 3] {
        match self {
            Self::Blue => [0.0, 0.0, 1.0],
            Self::Purple => [0.5, 0.0, 0.5],
            Self::Green => [0.0, 1.0, 0.0],
            Self::Yellow => [1.0, 0.92, 0.016],
            Self::Red => [1.0, 0.0, 0.0],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresentationState {
    #[default]
    Idle,
    WalkForward,
    WalkBackward,
    Strafe,
    /// Terminal: nothing in this machine leaves it.
    Sitting,
}

impl PresentationState {
    #[inline]
    pub fn is_walking(self) -> bool {
        matches!(self, Self::WalkForward | Self::WalkBackward | Self::Strafe)
    }

    #[inline]
    pub fn is_sitting(self) -> bool {
        self == Self::Sitting
    }
}

/// One edge of the state machine and the presentation effects that go with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: PresentationState,
    /// Trigger to set on the animation driver.
    pub fire: AnimTrigger,
    /// Triggers to clear so a stale one does not play after `fire`.
    pub reset: &'static [AnimTrigger],
    pub tint: Tint,
}

impl Transition {
    /// Push this transition's trigger changes and tint to the host handles.
    pub fn apply<A, T>(&self, animator: &mut A, tint_target: &mut T)
    where
        A: AnimationDriver + ?Sized,
        T: TintTarget + ?Sized,
    {
        animator.set_trigger(self.fire);
        for &trigger in self.reset {
            animator.reset_trigger(trigger);
        }
        tint_target.set_tint(self.tint);
    }
}

/// Evaluate the walk/idle rules for one frame.
///
/// Rules, in priority order:
/// 1. forward > 0, not walking: enter `WalkForward`.
/// 2. forward < 0, not walking: enter `WalkBackward`.
/// 3. strafe != 0, not walking: enter `Strafe`.
/// 4. input exactly zero while walking: enter `Idle`.
///
/// Returns `None` when no edge is crossed. `Sitting` never transitions.
pub fn transition(state: PresentationState, input: MovementInput) -> Option<Transition> {
    if state.is_sitting() {
        return None;
    }
    let walking = state.is_walking();

    if input.forward > 0.0 && !walking {
        Some(Transition {
            next: PresentationState::WalkForward,
            fire: AnimTrigger::Walk,
            reset: &[AnimTrigger::Idle, AnimTrigger::WalkBack],
            tint: Tint::Green,
        })
    } else if input.forward < 0.0 && !walking {
        Some(Transition {
            next: PresentationState::WalkBackward,
            fire: AnimTrigger::WalkBack,
            reset: &[AnimTrigger::Idle, AnimTrigger::Walk],
            tint: Tint::Green,
        })
    } else if input.strafe != 0.0 && !walking {
        // Strafing reuses the forward walk clip.
        Some(Transition {
            next: PresentationState::Strafe,
            fire: AnimTrigger::Walk,
            reset: &[AnimTrigger::Idle],
            tint: Tint::Green,
        })
    } else if input.is_zero() && walking {
        Some(Transition {
            next: PresentationState::Idle,
            fire: AnimTrigger::Idle,
            reset: &[],
            tint: Tint::Yellow,
        })
    } else {
        None
    }
}

/// The sit edge. Valid from every state, including `Sitting` itself.
pub const SIT: Transition = Transition {
    next: PresentationState::Sitting,
    fire: AnimTrigger::Sit,
    reset: &[],
    tint: Tint::Red,
};
