use std::time::Duration;

/// Planar walk speed in meters per second.
///
/// Used for forward, backward and strafe motion alike.
pub const WALK_SPEED_MPS: f32 = 5.0;

/// Backward walk speed in meters per second.
///
/// Carried as a tunable but not applied: backward motion integrates with
/// [`WALK_SPEED_MPS`] like every other direction.
pub const WALK_BACK_SPEED_MPS: f32 = 3.0;

/// Turn speed in degrees per second. Not applied by the integrator; the character
/// never rotates on its own.
pub const TURN_SPEED_DPS: f32 = 90.0;

/// Magnitude of the instantaneous upward impulse applied on jump (N·s).
pub const JUMP_IMPULSE: f32 = 5.0;

/// How long movement stays locked after the controller becomes active.
pub const STARTUP_LOCK_DURATION: Duration = Duration::from_secs(3);

/// World-space offset from the character to the camera's follow target (meters).
///
/// The character faces +Z, so a negative Z keeps the camera behind it.
pub const CAMERA_OFFSET: [f32; 3] = [0.0, 1.0, -3.0];

/// Exponential decay rate of the camera follow (1/s).
///
/// Higher values close the gap faster. `0.0` means the camera never moves.
pub const CAMERA_DECAY_RATE: f32 = 3.0;

/// Rate of the fixed physics tick (Hz).
pub const FIXED_TICK_HZ: f64 = 50.0;

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Mass of the character body (kg). With [`JUMP_IMPULSE`] this gives a 5 m/s launch.
pub const CHARACTER_MASS_KG: f32 = 1.0;

/// Character capsule radius (meters).
pub const CAPSULE_RADIUS: f32 = 0.3;

/// Character capsule half height of the cylindrical segment (meters).
pub const CAPSULE_HALF_HEIGHT: f32 = 0.6;
