use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Collision radius used when a zone does not carry its own.
pub const DEFAULT_ZONE_RADIUS: f32 = 2.0;

fn default_radius() -> f32 {
    DEFAULT_ZONE_RADIUS
}

/// A static circular region that blocks avatar movement and reports proximity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveZone {
    pub id: String,
    pub position: Vec3,
    #[serde(default = "default_radius")]
    pub radius: f32,
}

impl InteractiveZone {
    pub fn new(id: impl Into<String>, position: Vec3, radius: f32) -> Self {
        Self {
            id: id.into(),
            position,
            radius,
        }
    }

    /// Whether `point` lies strictly inside the collision radius.
    pub fn blocks(&self, point: Vec3) -> bool {
        point.distance(self.position) < self.radius
    }
}

/// The three pads of the portfolio scene.
pub fn default_zones() -> Vec<InteractiveZone> {
    vec![
        InteractiveZone::new("projects", Vec3::new(5.0, 0.1, 0.0), DEFAULT_ZONE_RADIUS),
        InteractiveZone::new("resume", Vec3::new(-5.0, 0.1, 0.0), DEFAULT_ZONE_RADIUS),
        InteractiveZone::new("contact", Vec3::new(0.0, 0.1, 5.0), DEFAULT_ZONE_RADIUS),
    ]
}

/// First zone whose collision radius contains `point`.
pub fn blocking_zone(zones: &[InteractiveZone], point: Vec3) -> Option<&InteractiveZone> {
    zones.iter().find(|z| z.blocks(point))
}

/// Proximity edge for one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneEvent {
    Entered { id: String },
    Exited { id: String },
}

/// Tracks which zones an entity is near and reports only transitions.
#[derive(Debug, Clone)]
pub struct ZoneTracker {
    threshold: f32,
    inside: BTreeSet<String>,
}

impl ZoneTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            inside: BTreeSet::new(),
        }
    }

    pub fn is_inside(&self, id: &str) -> bool {
        self.inside.contains(id)
    }

    /// Compare `position` against every zone and emit enter/exit edges.
    pub fn update(&mut self, zones: &[InteractiveZone], position: Vec3) -> Vec<ZoneEvent> {
        let mut events = Vec::new();
        for zone in zones {
            let near = position.distance(zone.position) < self.threshold;
            let was_near = self.inside.contains(&zone.id);
            if near && !was_near {
                tracing::info!(zone = %zone.id, "entered zone");
                self.inside.insert(zone.id.clone());
                events.push(ZoneEvent::Entered {
                    id: zone.id.clone(),
                });
            } else if !near && was_near {
                tracing::info!(zone = %zone.id, "left zone");
                self.inside.remove(&zone.id);
                events.push(ZoneEvent::Exited {
                    id: zone.id.clone(),
                });
            }
        }
        events
    }

    /// Forget all membership, e.g. when the avatar is unbound.
    pub fn reset(&mut self) {
        self.inside.clear();
    }
}
