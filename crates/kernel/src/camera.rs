use glam::{Mat3, Quat, Vec3};
use showcase_common::math::{facing_vector, smoothing_weight, wrap_angle};
use showcase_input::{Action, FrameInput};
use std::f32::consts::PI;

use crate::config::CameraConfig;
use crate::scene::CameraPose;

/// Orbit angles around the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

/// Third-person camera that orbits the avatar and always looks at it.
///
/// Yaw comes from the orbit keys and pointer-lock mouse movement; pitch only
/// from the mouse. The eye eases toward its desired spot, the aim does not.
#[derive(Debug, Clone)]
pub struct OrbitCameraRig {
    orientation: CameraOrientation,
    position: Vec3,
    look_at: Vec3,
    radius: f32,
    height: f32,
    orbit_rate: f32,
    sensitivity: f32,
    smoothing: f32,
    pitch_limit: f32,
    reference_rate: f32,
}

impl OrbitCameraRig {
    pub fn new(config: &CameraConfig, reference_rate: f32) -> Self {
        Self {
            orientation: CameraOrientation {
                yaw: config.initial_yaw,
                pitch: 0.0,
            },
            position: config.initial_position,
            look_at: Vec3::ZERO,
            radius: config.radius,
            height: config.height,
            orbit_rate: config.orbit_rate,
            sensitivity: config.mouse_sensitivity,
            smoothing: config.smoothing,
            pitch_limit: config.pitch_limit,
            reference_rate,
        }
    }

    pub fn orientation(&self) -> CameraOrientation {
        self.orientation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Apply a mouse delta to the orbit angles. Pitch is clamped after every call.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.orientation.yaw -= dx * self.sensitivity;
        self.orientation.pitch += dy * self.sensitivity;
        self.orientation.pitch = self
            .orientation
            .pitch
            .clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Where the eye wants to be for an avatar at `avatar`.
    pub fn desired_position(&self, avatar: Vec3) -> Vec3 {
        let CameraOrientation { yaw, pitch } = self.orientation;
        avatar
            + Vec3::new(
                self.radius * yaw.sin() * pitch.cos(),
                self.radius * pitch.sin() + self.height,
                self.radius * yaw.cos() * pitch.cos(),
            )
    }

    /// Run one tick against the avatar's visual position.
    pub fn update(&mut self, dt: f32, input: &FrameInput, avatar: Vec3) {
        if input.is_held(Action::OrbitLeft) {
            self.orientation.yaw += self.orbit_rate * dt;
        }
        if input.is_held(Action::OrbitRight) {
            self.orientation.yaw -= self.orbit_rate * dt;
        }
        // Lock lost mid-frame reads as no movement.
        if input.pointer_locked {
            self.rotate(input.mouse_delta.x, input.mouse_delta.y);
        }
        self.orientation.yaw = wrap_angle(self.orientation.yaw);

        let desired = self.desired_position(avatar);
        let w = smoothing_weight(self.smoothing, dt, self.reference_rate);
        self.position = self.position.lerp(desired, w);
        self.look_at = avatar;

        tracing::trace!(
            yaw = self.orientation.yaw,
            pitch = self.orientation.pitch,
            "camera updated"
        );
    }

    /// Unit direction the camera looks along.
    pub fn forward(&self) -> Vec3 {
        let dir = (self.look_at - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            -facing_vector(self.orientation.yaw)
        } else {
            dir
        }
    }

    /// Horizontal heading of the view, in the facing-yaw convention.
    pub fn view_yaw(&self) -> f32 {
        wrap_angle(self.orientation.yaw + PI)
    }

    /// Orientation whose local -Z axis points along [`Self::forward`].
    pub fn rotation(&self) -> Quat {
        let fwd = self.forward();
        let right = fwd.cross(Vec3::Y).normalize_or_zero();
        if right == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        let up = right.cross(fwd);
        Quat::from_mat3(&Mat3::from_cols(right, up, -fwd))
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
            rotation: self.rotation(),
        }
    }
}
