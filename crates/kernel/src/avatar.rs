use glam::{Quat, Vec3};
use showcase_common::EntityId;
use showcase_common::math::{facing_vector, flatten, smoothing_weight, yaw_of};
use showcase_input::{Action, FrameInput};

use crate::config::AvatarConfig;
use crate::projectile::OriginPose;
use crate::zone::{InteractiveZone, ZoneEvent, ZoneTracker, blocking_zone};

/// Where the avatar is drawn and where it is headed.
///
/// `target` is authoritative and only ever holds positions that passed the
/// zone check; `position` trails it through smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarPose {
    pub position: Vec3,
    pub target: Vec3,
    pub facing_yaw: f32,
}

impl AvatarPose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            target: position,
            facing_yaw: 0.0,
        }
    }

    /// Unit horizontal vector the avatar faces.
    pub fn forward(&self) -> Vec3 {
        facing_vector(self.facing_yaw)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.facing_yaw)
    }
}

/// Result of the movement half of a tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MoveOutcome {
    /// No movement key held, or no avatar bound.
    #[default]
    Idle,
    Accepted {
        from: Vec3,
        to: Vec3,
    },
    /// Candidate fell inside this zone's radius; the target did not change.
    Blocked {
        zone: String,
    },
}

/// Everything one `advance` produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AvatarStep {
    pub outcome: MoveOutcome,
    pub zone_events: Vec<ZoneEvent>,
}

/// Sum of the basis contributions for the held movement actions.
///
/// Forward is `camera_forward` flattened onto the ground plane; right is
/// forward crossed with world up. The result is not normalized.
pub fn move_direction(input: &FrameInput, camera_forward: Vec3) -> Vec3 {
    let forward = flatten(camera_forward);
    let right = forward.cross(Vec3::Y).normalize_or_zero();

    let mut dir = Vec3::ZERO;
    if input.is_held(Action::MoveForward) {
        dir += forward;
    }
    if input.is_held(Action::MoveBackward) {
        dir -= forward;
    }
    if input.is_held(Action::StrafeLeft) {
        dir -= right;
    }
    if input.is_held(Action::StrafeRight) {
        dir += right;
    }
    if input.is_held(Action::Ascend) {
        dir += Vec3::Y;
    }
    if input.is_held(Action::Descend) {
        dir -= Vec3::Y;
    }
    dir
}

/// Walks the avatar relative to the camera and keeps it out of zones.
#[derive(Debug, Clone)]
pub struct AvatarController {
    pose: AvatarPose,
    handle: Option<EntityId>,
    tracker: ZoneTracker,
    speed: f32,
    smoothing: f32,
    reference_rate: f32,
}

impl AvatarController {
    pub fn new(config: &AvatarConfig, reference_rate: f32) -> Self {
        Self {
            pose: AvatarPose::at(config.spawn),
            handle: None,
            tracker: ZoneTracker::new(config.proximity),
            speed: config.speed,
            smoothing: config.smoothing,
            reference_rate,
        }
    }

    /// Attach the renderable once the avatar asset is in the scene.
    pub fn bind(&mut self, handle: EntityId) {
        tracing::info!(handle = %handle.short(), "avatar bound");
        self.handle = Some(handle);
    }

    /// Detach the renderable. Zone membership is forgotten.
    pub fn unbind(&mut self) -> Option<EntityId> {
        self.tracker.reset();
        self.handle.take()
    }

    pub fn handle(&self) -> Option<EntityId> {
        self.handle
    }

    pub fn pose(&self) -> AvatarPose {
        self.pose
    }

    pub fn is_inside(&self, zone: &str) -> bool {
        self.tracker.is_inside(zone)
    }

    /// Override the visual facing, e.g. to follow the camera.
    pub fn set_facing_yaw(&mut self, yaw: f32) {
        self.pose.facing_yaw = yaw;
    }

    /// Chest-height muzzle offsets are applied by the projectile manager.
    pub fn origin_pose(&self) -> Option<OriginPose> {
        self.handle.map(|_| OriginPose {
            position: self.pose.position,
            forward: self.pose.forward(),
        })
    }

    /// Run one tick. Does nothing until an avatar is bound.
    pub fn advance(
        &mut self,
        dt: f32,
        input: &FrameInput,
        camera_forward: Vec3,
        zones: &[InteractiveZone],
    ) -> AvatarStep {
        if self.handle.is_none() {
            return AvatarStep::default();
        }

        let outcome = self.try_move(dt, input, camera_forward, zones);
        let zone_events = self.tracker.update(zones, self.pose.position);

        let w = smoothing_weight(self.smoothing, dt, self.reference_rate);
        self.pose.position = self.pose.position.lerp(self.pose.target, w);

        AvatarStep {
            outcome,
            zone_events,
        }
    }

    fn try_move(
        &mut self,
        dt: f32,
        input: &FrameInput,
        camera_forward: Vec3,
        zones: &[InteractiveZone],
    ) -> MoveOutcome {
        let dir = move_direction(input, camera_forward);
        if dir.length_squared() == 0.0 {
            return MoveOutcome::Idle;
        }

        let from = self.pose.target;
        let candidate = from + dir.normalize() * self.speed * dt;
        if let Some(zone) = blocking_zone(zones, candidate) {
            tracing::debug!(zone = %zone.id, ?candidate, "move blocked");
            return MoveOutcome::Blocked {
                zone: zone.id.clone(),
            };
        }

        self.pose.target = candidate;
        if let Some(yaw) = yaw_of(candidate - from) {
            self.pose.facing_yaw = yaw;
        }
        MoveOutcome::Accepted {
            from,
            to: candidate,
        }
    }
}
