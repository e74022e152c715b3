/*!
Controller tunables.

`ControllerSettings::default()` mirrors the constants in [`crate::constants`]. Hosts
that want per-character values build their own and call [`ControllerSettings::validate`]
at the boundary.

Notes
- Distances are in meters, time in seconds.
- `walk_back_speed_mps` and `turn_speed_dps` are carried but unused by the integrator.
*/

use std::time::Duration;

use nalgebra::Vector3;

use crate::constants::{
    CAMERA_DECAY_RATE, CAMERA_OFFSET, JUMP_IMPULSE, STARTUP_LOCK_DURATION, TURN_SPEED_DPS,
    WALK_BACK_SPEED_MPS, WALK_SPEED_MPS,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerSettings {
    pub walk_speed_mps: f32,
    pub walk_back_speed_mps: f32,
    pub turn_speed_dps: f32,
    pub jump_impulse: f32,
    pub startup_lock: Duration,
    pub camera_offset: Vector3<f32>,
    pub camera_decay_rate: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            walk_speed_mps: WALK_SPEED_MPS,
            walk_back_speed_mps: WALK_BACK_SPEED_MPS,
            turn_speed_dps: TURN_SPEED_DPS,
            jump_impulse: JUMP_IMPULSE,
            startup_lock: STARTUP_LOCK_DURATION,
            camera_offset: Vector3::from(CAMERA_OFFSET),
            camera_decay_rate: CAMERA_DECAY_RATE,
        }
    }
}

impl ControllerSettings {
    /// Checks that every tunable is finite and non-negative.
    pub fn validate(&self) -> Result<(), &'static str> {
        let scalars = [
            self.walk_speed_mps,
            self.walk_back_speed_mps,
            self.turn_speed_dps,
            self.jump_impulse,
            self.camera_decay_rate,
        ];
        if scalars.iter().any(|v| !v.is_finite()) {
            return Err("Controller setting is not finite");
        }
        if scalars.iter().any(|v| *v < 0.0) {
            return Err("Controller setting is negative");
        }
        if self.camera_offset.iter().any(|v| !v.is_finite()) {
            return Err("Camera offset is not finite");
        }
        Ok(())
    }
}
