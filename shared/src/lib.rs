pub mod body;
pub mod camera;
pub mod constants;
pub mod controller;
pub mod host;
pub mod input;
pub mod motion;
pub mod presentation;
pub mod rapier;
pub mod settings;
pub mod startup;

// Re-export Rapier so the client can use Rapier types without depending on `rapier3d`
// directly.
pub use rapier3d;

pub use body::{CapsuleSpec, RapierBody};
pub use camera::CameraFollow;
pub use constants::{
    CAMERA_DECAY_RATE, CAMERA_OFFSET, FIXED_TICK_HZ, JUMP_IMPULSE, STARTUP_LOCK_DURATION,
    WALK_BACK_SPEED_MPS, WALK_SPEED_MPS,
};
pub use controller::{ControllerState, LocomotionController};
pub use host::{AnimationDriver, PhysicsBody, TintTarget};
pub use input::{InputSnapshot, MovementInput};
pub use motion::Pose;
pub use presentation::{AnimTrigger, PresentationState, Tint, Transition};
pub use rapier::{ColliderShapeDef, WorldStaticDef, collider_from_def};
pub use settings::ControllerSettings;
pub use startup::StartupSequence;
