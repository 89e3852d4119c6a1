use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use showcase_common::{EntityId, Transform};

use crate::config::ProjectileConfig;
use crate::scene::{RenderableKind, SceneSurface};

/// Which pose shots leave from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginSource {
    Avatar,
    Camera,
}

/// Point the range limit is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullOrigin {
    /// Distance from (0, 0, 0). Shots fired near the origin live longest.
    WorldOrigin,
    /// Distance travelled since the shot left the muzzle.
    FiringPoint,
}

/// Position and forward direction a shot is fired from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginPose {
    pub position: Vec3,
    pub forward: Vec3,
}

/// A live shot. The scene holds only the handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub handle: EntityId,
    pub position: Vec3,
    /// Units per second.
    pub velocity: Vec3,
    pub fired_from: Vec3,
}

/// What changed during one [`ProjectileManager::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectileStep {
    pub spawned: Option<EntityId>,
    pub culled: Vec<EntityId>,
}

/// Owns every live projectile: spawns on the trigger, advances, culls out of range.
#[derive(Debug, Clone)]
pub struct ProjectileManager {
    config: ProjectileConfig,
    live: Vec<Projectile>,
    cooldown: f32,
    firing: bool,
    fired: u64,
}

impl ProjectileManager {
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            config,
            live: Vec::new(),
            cooldown: 0.0,
            firing: false,
            fired: 0,
        }
    }

    pub fn source(&self) -> OriginSource {
        self.config.origin
    }

    pub fn set_firing(&mut self, firing: bool) {
        self.firing = firing;
    }

    pub fn firing(&self) -> bool {
        self.firing
    }

    /// Seconds until the next shot may leave. Zero or below means ready.
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Live projectiles in spawn order.
    pub fn live(&self) -> &[Projectile] {
        &self.live
    }

    /// Shots fired since construction.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Run one tick. With no origin available a shot is skipped, but live
    /// projectiles still advance.
    pub fn update(
        &mut self,
        dt: f32,
        origin: Option<OriginPose>,
        surface: &mut dyn SceneSurface,
    ) -> ProjectileStep {
        let mut step = ProjectileStep::default();

        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }

        if self.firing && self.cooldown <= 0.0 {
            if let Some(origin) = origin {
                step.spawned = self.spawn(origin, surface);
            }
        }

        for p in &mut self.live {
            p.position += p.velocity * dt;
            surface.set_transform(p.handle, p.position, Quat::IDENTITY);
        }

        let max_range = self.config.max_range;
        let cull_origin = self.config.cull_origin;
        self.live.retain(|p| {
            let reference = match cull_origin {
                CullOrigin::WorldOrigin => Vec3::ZERO,
                CullOrigin::FiringPoint => p.fired_from,
            };
            if p.position.distance(reference) > max_range {
                surface.remove_renderable(p.handle);
                tracing::debug!(handle = %p.handle.short(), "projectile out of range");
                step.culled.push(p.handle);
                false
            } else {
                true
            }
        });

        step
    }

    fn spawn(&mut self, origin: OriginPose, surface: &mut dyn SceneSurface) -> Option<EntityId> {
        let forward = origin.forward.normalize_or_zero();
        if forward == Vec3::ZERO {
            return None;
        }
        let start =
            origin.position + self.config.chest_offset + forward * self.config.muzzle_offset;
        let handle = surface.add_renderable(RenderableKind::Projectile, Transform::at(start));
        self.live.push(Projectile {
            handle,
            position: start,
            velocity: forward * self.config.speed,
            fired_from: start,
        });
        self.cooldown = self.config.cooldown;
        self.fired += 1;
        tracing::debug!(handle = %handle.short(), live = self.live.len(), "projectile fired");
        Some(handle)
    }

    /// Release every live projectile from the scene. Returns how many were released.
    pub fn teardown(&mut self, surface: &mut dyn SceneSurface) -> usize {
        let count = self.live.len();
        for p in self.live.drain(..) {
            surface.remove_renderable(p.handle);
        }
        self.firing = false;
        self.cooldown = 0.0;
        count
    }
}
