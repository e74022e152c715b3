//! Polled input snapshot.
//!
//! The host samples its input devices once per tick/frame and hands the controller an
//! [`InputSnapshot`]. Only the latest value survives; events between samples are lost.

/// Two-axis movement input, each axis nominally in `[-1, 1]`.
///
/// Values are stored exactly as the device reports them: no deadzone, no normalization,
/// no clamping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementInput {
    /// Forward (+) / backward (-).
    pub forward: f32,
    /// Right (+) / left (-).
    pub strafe: f32,
}

impl MovementInput {
    pub const ZERO: Self = Self {
        forward: 0.0,
        strafe: 0.0,
    };

    pub const fn new(forward: f32, strafe: f32) -> Self {
        Self { forward, strafe }
    }

    /// True only when both axes are exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0
    }
}

/// Everything the controller reads from the input layer for one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub movement: MovementInput,
    /// The sit action fired since the last sample.
    pub sit: bool,
    /// The jump action fired since the last sample.
    pub jump: bool,
}
