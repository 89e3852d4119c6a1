//! Scene core: the per-frame update loop behind the showcase scene.
//!
//! # Invariants
//! - The core mutates the host scene only through [`SceneSurface`] handles.
//! - Every rate is scaled by the frame's `dt`; nothing assumes a frame rate.
//! - The avatar target only ever holds positions outside every zone radius.
//! - A tick never fails; missing avatar or origin makes the affected step a no-op.

pub mod avatar;
pub mod camera;
pub mod config;
pub mod projectile;
pub mod scene;
pub mod session;
pub mod zone;

pub use avatar::{AvatarController, AvatarPose, AvatarStep, MoveOutcome};
pub use camera::{CameraOrientation, OrbitCameraRig};
pub use config::{AvatarConfig, CameraConfig, ConfigError, ProjectileConfig, ShowcaseConfig};
pub use projectile::{CullOrigin, OriginPose, OriginSource, Projectile, ProjectileManager};
pub use scene::{CameraPose, RenderableKind, SceneEvent, SceneGraph, SceneNode, SceneSurface};
pub use session::{Showcase, TickReport};
pub use zone::{InteractiveZone, ZoneEvent, ZoneTracker};

pub fn crate_info() -> &'static str {
    "showcase-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
