use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use showcase_common::{EntityId, Transform};
use std::collections::BTreeMap;

/// What a renderable depicts. The host picks mesh and material from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderableKind {
    Ground,
    ZonePad,
    Pillar,
    Avatar,
    Projectile,
}

/// The minimal scene contract the controllers mutate.
///
/// Handles are issued by the host. Removing or moving an unknown handle is
/// a no-op that returns `false`, so repeated removal is harmless.
pub trait SceneSurface {
    /// Register a renderable and return its handle.
    fn add_renderable(&mut self, kind: RenderableKind, initial: Transform) -> EntityId;

    /// Release a renderable. Returns whether it was present.
    fn remove_renderable(&mut self, handle: EntityId) -> bool;

    /// Move a renderable, keeping its scale. Returns whether it was present.
    fn set_transform(&mut self, handle: EntityId, position: Vec3, rotation: Quat) -> bool;
}

/// Record of a structural change to the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    Added {
        id: EntityId,
        kind: RenderableKind,
        transform: Transform,
    },
    Removed {
        id: EntityId,
        kind: RenderableKind,
    },
}

/// One renderable in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub kind: RenderableKind,
    pub transform: Transform,
}

/// Where the host camera sits and which way it points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub rotation: Quat,
}

/// In-memory scene host.
///
/// Stands in for a real renderer in headless runs and tests. Nodes live in a
/// BTreeMap so iteration order is stable across runs with the same handles.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<EntityId, SceneNode>,
    camera: Option<CameraPose>,
    frame: u64,
    events: Vec<SceneEvent>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Mark the end of a frame.
    pub fn present(&mut self) {
        self.frame += 1;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> &BTreeMap<EntityId, SceneNode> {
        &self.nodes
    }

    /// Number of live renderables of one kind.
    pub fn count_of(&self, kind: RenderableKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }

    pub fn camera(&self) -> Option<&CameraPose> {
        self.camera.as_ref()
    }

    pub fn set_camera(&mut self, pose: CameraPose) {
        self.camera = Some(pose);
    }

    /// Read-only access to structural changes not yet drained.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

impl SceneSurface for SceneGraph {
    fn add_renderable(&mut self, kind: RenderableKind, initial: Transform) -> EntityId {
        let id = EntityId::new();
        self.nodes.insert(
            id,
            SceneNode {
                kind,
                transform: initial,
            },
        );
        self.events.push(SceneEvent::Added {
            id,
            kind,
            transform: initial,
        });
        id
    }

    fn remove_renderable(&mut self, handle: EntityId) -> bool {
        match self.nodes.remove(&handle) {
            Some(node) => {
                self.events.push(SceneEvent::Removed {
                    id: handle,
                    kind: node.kind,
                });
                true
            }
            None => false,
        }
    }

    fn set_transform(&mut self, handle: EntityId, position: Vec3, rotation: Quat) -> bool {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.transform.position = position;
            node.transform.rotation = rotation;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_starts_empty() {
        let s = SceneGraph::new();
        assert!(s.is_empty());
        assert_eq!(s.frame(), 0);
        assert!(s.camera().is_none());
    }

    #[test]
    fn add_and_remove() {
        let mut s = SceneGraph::new();
        let id = s.add_renderable(RenderableKind::Projectile, Transform::default());
        assert_eq!(s.count_of(RenderableKind::Projectile), 1);
        assert!(s.remove_renderable(id));
        assert!(s.is_empty());
        assert_eq!(s.events().len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut s = SceneGraph::new();
        let id = s.add_renderable(RenderableKind::Pillar, Transform::default());
        assert!(s.remove_renderable(id));
        assert!(!s.remove_renderable(id));
        // add + one remove, the repeat logs nothing
        assert_eq!(s.events().len(), 2);
    }

    #[test]
    fn set_transform_keeps_scale() {
        let mut s = SceneGraph::new();
        let id = s.add_renderable(
            RenderableKind::Avatar,
            Transform::default().with_scale(Vec3::splat(0.5)),
        );
        assert!(s.set_transform(id, Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(1.0)));
        let node = s.get(id).unwrap();
        assert_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.transform.scale, Vec3::splat(0.5));
    }

    #[test]
    fn set_transform_unknown_handle() {
        let mut s = SceneGraph::new();
        assert!(!s.set_transform(EntityId::new(), Vec3::ONE, Quat::IDENTITY));
    }

    #[test]
    fn drain_events_clears_log() {
        let mut s = SceneGraph::new();
        s.add_renderable(RenderableKind::Ground, Transform::default());
        let events = s.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SceneEvent::Added {
                kind: RenderableKind::Ground,
                ..
            }
        ));
        assert!(s.events().is_empty());
    }

    #[test]
    fn btreemap_gives_deterministic_iteration() {
        let mut s = SceneGraph::new();
        for _ in 0..50 {
            s.add_renderable(RenderableKind::Projectile, Transform::default());
        }
        let keys: Vec<EntityId> = s.nodes().keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
