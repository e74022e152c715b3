use nalgebra::Vector3;

use crate::settings::ControllerSettings;

/// Trailing camera that eases toward a fixed world-space offset from the character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFollow {
    pub offset: Vector3<f32>,
    pub decay_rate: f32,
}

impl From<&ControllerSettings> for CameraFollow {
    fn from(settings: &ControllerSettings) -> Self {
        Self {
            offset: settings.camera_offset,
            decay_rate: settings.camera_decay_rate,
        }
    }
}

impl CameraFollow {
    /// Point the camera is chasing this frame.
    #[inline]
    pub fn target(&self, character: Vector3<f32>) -> Vector3<f32> {
        character + self.offset
    }

    /// Exponentially decay the distance between `camera` and the target over `dt` seconds.
    ///
    /// The blend factor is `1 - exp(-rate * dt)`, which stays in `[0, 1)` for finite
    /// non-negative inputs, so the camera never snaps and never overshoots.
    pub fn step(&self, camera: Vector3<f32>, character: Vector3<f32>, dt: f32) -> Vector3<f32> {
        let target = self.target(character);
        let t = 1.0 - (-self.decay_rate.max(0.0) * dt.max(0.0)).exp();
        camera.lerp(&target, t)
    }
}
