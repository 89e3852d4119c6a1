use glam::Vec3;
use showcase_common::{EntityId, Transform};
use showcase_input::{FrameInput, InputAdapter, InputEvent, InputSender, InputState};

use crate::avatar::{AvatarController, AvatarPose, MoveOutcome};
use crate::camera::OrbitCameraRig;
use crate::config::ShowcaseConfig;
use crate::projectile::{OriginPose, OriginSource, ProjectileManager};
use crate::scene::{CameraPose, RenderableKind, SceneSurface};
use crate::zone::{InteractiveZone, ZoneEvent};

/// Decorative pillars around the pads.
const PILLARS: [Vec3; 3] = [
    Vec3::new(0.0, 1.5, -10.0),
    Vec3::new(8.0, 1.5, 8.0),
    Vec3::new(-8.0, 1.5, -8.0),
];

/// What one tick changed, for the host to act on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub movement: MoveOutcome,
    pub zone_events: Vec<ZoneEvent>,
    /// Camera pose to hand to the host, once an avatar is bound.
    pub camera: Option<CameraPose>,
    pub spawned: Option<EntityId>,
    pub culled: Vec<EntityId>,
}

/// One mounted showcase scene: input, avatar, camera and projectiles, ticked
/// together by the host's frame callback.
pub struct Showcase {
    config: ShowcaseConfig,
    input: InputState,
    adapter: InputAdapter,
    avatar: AvatarController,
    rig: OrbitCameraRig,
    projectiles: ProjectileManager,
    decor: Vec<EntityId>,
    tick: u64,
}

impl Showcase {
    pub fn new(config: ShowcaseConfig) -> Self {
        let rate = config.reference_rate;
        Self {
            avatar: AvatarController::new(&config.avatar, rate),
            rig: OrbitCameraRig::new(&config.camera, rate),
            projectiles: ProjectileManager::new(config.projectile.clone()),
            input: InputState::new(),
            adapter: InputAdapter::new(),
            decor: Vec::new(),
            tick: 0,
            config,
        }
    }

    /// Register the static scenery: ground, one pad per zone, pillars.
    pub fn mount(&mut self, surface: &mut dyn SceneSurface) {
        let ground = Transform::default().with_scale(Vec3::new(200.0, 1.0, 200.0));
        self.decor
            .push(surface.add_renderable(RenderableKind::Ground, ground));
        for zone in &self.config.zones {
            let pad = Transform::at(zone.position).with_scale(Vec3::new(3.0, 0.3, 3.0));
            self.decor
                .push(surface.add_renderable(RenderableKind::ZonePad, pad));
        }
        for pos in PILLARS {
            let pillar = Transform::at(pos).with_scale(Vec3::new(1.0, 3.0, 1.0));
            self.decor
                .push(surface.add_renderable(RenderableKind::Pillar, pillar));
        }
        tracing::info!(
            zones = self.config.zones.len(),
            renderables = self.decor.len(),
            "showcase mounted"
        );
    }

    /// Put the avatar into the scene. Call once its asset has loaded; until
    /// then ticks leave the avatar and camera alone. Binding twice is a no-op.
    pub fn bind_avatar(&mut self, surface: &mut dyn SceneSurface) -> EntityId {
        if let Some(handle) = self.avatar.handle() {
            return handle;
        }
        let pose = self.avatar.pose();
        let initial = Transform::at(pose.position)
            .with_yaw(pose.facing_yaw)
            .with_scale(Vec3::splat(0.5));
        let handle = surface.add_renderable(RenderableKind::Avatar, initial);
        self.avatar.bind(handle);
        handle
    }

    /// Handle for event listeners. Events take effect at the next tick.
    pub fn input_sender(&self) -> InputSender {
        self.adapter.sender()
    }

    /// Apply an event directly, bypassing the queue. Same-thread hosts only.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.apply(&event);
    }

    /// Advance everything by `dt` seconds.
    pub fn tick(&mut self, dt: f32, surface: &mut dyn SceneSurface) -> TickReport {
        let _span = tracing::info_span!("showcase_tick", tick = self.tick + 1).entered();
        self.tick += 1;

        self.adapter.pump(&mut self.input);
        let frame = self.input.frame(&self.config.bindings);
        let mut report = self.step(dt, &frame, surface);
        report.tick = self.tick;

        tracing::trace!(
            live = self.projectiles.live().len(),
            zone_events = report.zone_events.len(),
            "tick complete"
        );
        report
    }

    fn step(&mut self, dt: f32, frame: &FrameInput, surface: &mut dyn SceneSurface) -> TickReport {
        let mut report = TickReport::default();

        let avatar_step = self
            .avatar
            .advance(dt, frame, self.rig.forward(), &self.config.zones);
        report.movement = avatar_step.outcome;
        report.zone_events = avatar_step.zone_events;

        if let Some(handle) = self.avatar.handle() {
            let pose = self.avatar.pose();
            self.rig.update(dt, frame, pose.position);
            if self.config.avatar.face_camera {
                self.avatar.set_facing_yaw(self.rig.view_yaw());
            }
            let pose = self.avatar.pose();
            surface.set_transform(handle, pose.position, pose.rotation());
            report.camera = Some(self.rig.pose());
        }

        self.projectiles.set_firing(frame.firing);
        let origin = match self.projectiles.source() {
            OriginSource::Avatar => self.avatar.origin_pose(),
            OriginSource::Camera => self.avatar.handle().map(|_| OriginPose {
                position: self.rig.position(),
                forward: self.rig.forward(),
            }),
        };
        let shots = self.projectiles.update(dt, origin, surface);
        report.spawned = shots.spawned;
        report.culled = shots.culled;
        report
    }

    /// Release everything this session put into the scene.
    pub fn teardown(&mut self, surface: &mut dyn SceneSurface) {
        let shots = self.projectiles.teardown(surface);
        if let Some(handle) = self.avatar.unbind() {
            surface.remove_renderable(handle);
        }
        for id in self.decor.drain(..) {
            surface.remove_renderable(id);
        }
        self.input.clear();
        tracing::info!(projectiles = shots, ticks = self.tick, "showcase torn down");
    }

    /// Copy of the avatar pose, safe to hand to a slower sampler.
    pub fn pose_snapshot(&self) -> AvatarPose {
        self.avatar.pose()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn zones(&self) -> &[InteractiveZone] {
        &self.config.zones
    }

    pub fn avatar(&self) -> &AvatarController {
        &self.avatar
    }

    pub fn camera(&self) -> &OrbitCameraRig {
        &self.rig
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;

    const DT: f32 = 1.0 / 60.0;

    fn mounted() -> (Showcase, SceneGraph) {
        let mut scene = SceneGraph::new();
        let mut show = Showcase::new(ShowcaseConfig::default());
        show.mount(&mut scene);
        (show, scene)
    }

    #[test]
    fn mount_registers_scenery() {
        let (_, scene) = mounted();
        assert_eq!(scene.count_of(RenderableKind::Ground), 1);
        assert_eq!(scene.count_of(RenderableKind::ZonePad), 3);
        assert_eq!(scene.count_of(RenderableKind::Pillar), 3);
    }

    #[test]
    fn ticks_before_bind_leave_avatar_and_camera_alone() {
        let (mut show, mut scene) = mounted();
        let tx = show.input_sender();
        tx.send(InputEvent::KeyDown("w".into()));
        tx.send(InputEvent::MouseDown);
        let start_cam = show.camera().position();

        for _ in 0..10 {
            let report = show.tick(DT, &mut scene);
            assert_eq!(report.movement, MoveOutcome::Idle);
            assert!(report.camera.is_none());
            assert!(report.spawned.is_none());
        }
        assert_eq!(show.pose_snapshot().target, Vec3::ZERO);
        assert_eq!(show.camera().position(), start_cam);
        assert_eq!(show.tick_count(), 10);
    }

    #[test]
    fn bind_is_idempotent() {
        let (mut show, mut scene) = mounted();
        let a = show.bind_avatar(&mut scene);
        let b = show.bind_avatar(&mut scene);
        assert_eq!(a, b);
        assert_eq!(scene.count_of(RenderableKind::Avatar), 1);
    }

    #[test]
    fn walking_forward_moves_away_from_camera() {
        let (mut show, mut scene) = mounted();
        let handle = show.bind_avatar(&mut scene);
        // Let the camera settle behind the avatar on +Z.
        for _ in 0..120 {
            show.tick(DT, &mut scene);
        }
        show.push_input(InputEvent::KeyDown("W".into()));
        for _ in 0..30 {
            show.tick(DT, &mut scene);
        }
        let pose = show.pose_snapshot();
        assert!(pose.target.z < -2.9, "target {:?}", pose.target);
        assert!(pose.target.x.abs() < 1e-3);
        let node = scene.get(handle).unwrap();
        assert_eq!(node.transform.position, pose.position);
    }

    #[test]
    fn facing_follows_camera_view() {
        let (mut show, mut scene) = mounted();
        show.bind_avatar(&mut scene);
        show.push_input(InputEvent::KeyDown("ArrowLeft".into()));
        for _ in 0..20 {
            show.tick(DT, &mut scene);
        }
        let yaw = show.pose_snapshot().facing_yaw;
        assert!((yaw - show.camera().view_yaw()).abs() < 1e-6);
    }

    #[test]
    fn travel_facing_kept_when_not_following_camera() {
        let mut config = ShowcaseConfig::default();
        config.avatar.face_camera = false;
        let mut scene = SceneGraph::new();
        let mut show = Showcase::new(config);
        show.bind_avatar(&mut scene);
        for _ in 0..120 {
            show.tick(DT, &mut scene);
        }
        show.push_input(InputEvent::KeyDown("d".into()));
        show.tick(DT, &mut scene);
        // Strafing right from a camera on +Z heads along +X.
        let fwd = show.pose_snapshot().forward();
        assert!((fwd - Vec3::X).length() < 1e-2, "forward {fwd:?}");
    }

    #[test]
    fn holding_trigger_fires_from_chest_height() {
        let (mut show, mut scene) = mounted();
        show.bind_avatar(&mut scene);
        show.push_input(InputEvent::MouseDown);
        let report = show.tick(DT, &mut scene);
        let handle = report.spawned.unwrap();
        assert!(scene.get(handle).is_some());
        let shot = show.projectiles().live()[0];
        assert!((shot.fired_from.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn camera_origin_fires_along_view() {
        let mut config = ShowcaseConfig::default();
        config.projectile.origin = OriginSource::Camera;
        let mut scene = SceneGraph::new();
        let mut show = Showcase::new(config);
        show.bind_avatar(&mut scene);
        for _ in 0..60 {
            show.tick(DT, &mut scene);
        }
        show.push_input(InputEvent::MouseDown);
        show.tick(DT, &mut scene);
        let shot = show.projectiles().live()[0];
        let dir = shot.velocity.normalize();
        assert!((dir - show.camera().forward()).length() < 1e-4);
    }

    #[test]
    fn zone_events_surface_in_report() {
        let mut config = ShowcaseConfig::default();
        config.zones = vec![InteractiveZone::new("near", Vec3::new(1.0, 0.0, 0.0), 0.2)];
        let mut scene = SceneGraph::new();
        let mut show = Showcase::new(config);
        show.bind_avatar(&mut scene);
        let report = show.tick(DT, &mut scene);
        assert_eq!(
            report.zone_events,
            vec![ZoneEvent::Entered {
                id: "near".into()
            }]
        );
        assert!(show.tick(DT, &mut scene).zone_events.is_empty());
    }

    #[test]
    fn teardown_empties_scene() {
        let (mut show, mut scene) = mounted();
        show.bind_avatar(&mut scene);
        show.push_input(InputEvent::MouseDown);
        for _ in 0..30 {
            show.tick(DT, &mut scene);
        }
        assert!(scene.count_of(RenderableKind::Projectile) > 0);
        show.teardown(&mut scene);
        assert!(scene.is_empty());
        assert!(show.avatar().handle().is_none());
    }
}
