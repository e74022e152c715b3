use nalgebra::{UnitQuaternion, Vector3};

use crate::input::MovementInput;

/// Character transform as the integrator sees it.
///
/// Axis convention
/// - The character faces local +Z.
/// - The frame is right-handed with +Y up, so the character's right is local -X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Pose {
    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation: UnitQuaternion::identity(),
        }
    }

    #[inline]
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * Vector3::z()
    }

    #[inline]
    pub fn right(&self) -> Vector3<f32> {
        self.rotation * -Vector3::x()
    }
}

/// World-space displacement for one step: `(forward * input.forward + right * input.strafe)
/// * speed * dt`.
///
/// No acceleration curve and no normalization: diagonal input moves faster than a
/// single axis, exactly as the device reports it.
#[inline]
pub fn displacement(pose: &Pose, input: MovementInput, speed_mps: f32, dt: f32) -> Vector3<f32> {
    (pose.forward() * input.forward + pose.right() * input.strafe) * speed_mps * dt
}

/// Target position for the body after one fixed step, or `None` when the input is exactly
/// zero and no move should be requested at all.
pub fn integrate(
    pose: &Pose,
    input: MovementInput,
    speed_mps: f32,
    dt: f32,
) -> Option<Vector3<f32>> {
    if input.is_zero() {
        return None;
    }

    Some(pose.translation + displacement(pose, input, speed_mps, dt))
}

/// Straight-up impulse of the given magnitude.
#[inline]
pub fn jump_impulse(magnitude: f32) -> Vector3<f32> {
    Vector3::y() * magnitude
}
