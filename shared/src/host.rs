//! Handles the host engine provides to the controller.
//!
//! The controller never creates or destroys what sits behind these traits; it only
//! pushes requests through them. Lifetimes belong to the host.

use nalgebra::Vector3;

use crate::presentation::{AnimTrigger, Tint};

/// Physics body the controller moves.
///
/// The controller only writes: it supplies target positions and impulses and never reads
/// body-internal state back.
pub trait PhysicsBody {
    /// Request the body move to an absolute world position during the next physics step.
    fn move_position(&mut self, target: Vector3<f32>);

    /// Apply an instantaneous impulse (N·s) at the center of mass.
    fn apply_impulse(&mut self, impulse: Vector3<f32>);
}

/// Animation graph driver with fire-once named triggers.
pub trait AnimationDriver {
    fn set_trigger(&mut self, trigger: AnimTrigger);
    fn reset_trigger(&mut self, trigger: AnimTrigger);
}

/// Surface whose flat color indicates the controller state.
pub trait TintTarget {
    /// Replace the current tint. No blending with the previous one.
    fn set_tint(&mut self, tint: Tint);
}
