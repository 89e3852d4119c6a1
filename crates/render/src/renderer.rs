use showcase_hud::HudOverlay;
use showcase_kernel::{RenderableKind, SceneGraph};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a SceneGraph,
    pub hud: &'a HudOverlay,
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: Frame<'_>) -> Self::Output;
}

/// Text renderer for CLI output, logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list static scenery (ground, pads, pillars).
    pub show_scenery: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scenery(mut self) -> Self {
        self.show_scenery = true;
        self
    }
}

fn is_scenery(kind: RenderableKind) -> bool {
    matches!(
        kind,
        RenderableKind::Ground | RenderableKind::ZonePad | RenderableKind::Pillar
    )
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: Frame<'_>) -> String {
        let Frame { scene, hud } = frame;
        let mut out = String::new();
        out.push_str(&format!("=== Frame {} === {}\n", scene.frame(), hud));
        out.push_str(&format!(
            "Renderables: {} (projectiles: {})\n",
            scene.len(),
            scene.count_of(RenderableKind::Projectile)
        ));
        match scene.camera() {
            Some(cam) => out.push_str(&format!(
                "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})\n",
                cam.position.x,
                cam.position.y,
                cam.position.z,
                cam.look_at.x,
                cam.look_at.y,
                cam.look_at.z
            )),
            None => out.push_str("Camera: unset\n"),
        }

        for (id, node) in scene.nodes() {
            if !self.show_scenery && is_scenery(node.kind) {
                continue;
            }
            let p = node.transform.position;
            out.push_str(&format!(
                "  [{}] {:?} pos=({:.2}, {:.2}, {:.2})\n",
                id.short(),
                node.kind,
                p.x,
                p.y,
                p.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use showcase_common::Transform;
    use showcase_hud::CompassLabel;
    use showcase_kernel::{CameraPose, SceneSurface};

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = SceneGraph::new();
        let hud = HudOverlay::new();
        let output = DebugTextRenderer::new().render(Frame {
            scene: &scene,
            hud: &hud,
        });

        assert!(output.contains("Frame 0"));
        assert!(output.contains("Renderables: 0"));
        assert!(output.contains("Camera: unset"));
        assert!(output.contains("[ N] +"));
    }

    #[test]
    fn scenery_hidden_by_default() {
        let mut scene = SceneGraph::new();
        scene.add_renderable(RenderableKind::Pillar, Transform::default());
        scene.add_renderable(
            RenderableKind::Projectile,
            Transform::at(Vec3::new(1.0, 2.0, 3.0)),
        );
        let hud = HudOverlay::new();
        let frame = Frame {
            scene: &scene,
            hud: &hud,
        };

        let terse = DebugTextRenderer::new().render(frame);
        assert!(terse.contains("Projectile pos=(1.00, 2.00, 3.00)"));
        assert!(!terse.contains("Pillar"));

        let full = DebugTextRenderer::new().with_scenery().render(frame);
        assert!(full.contains("Pillar"));
        assert!(full.contains("projectiles: 1"));
    }

    #[test]
    fn camera_and_compass_are_printed() {
        let mut scene = SceneGraph::new();
        scene.set_camera(CameraPose {
            position: Vec3::new(0.0, 2.0, 4.0),
            look_at: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        });
        let mut hud = HudOverlay::new();
        hud.push_compass(CompassLabel::SW);
        let output = DebugTextRenderer::new().render(Frame {
            scene: &scene,
            hud: &hud,
        });
        assert!(output.contains("eye=(0.00, 2.00, 4.00)"));
        assert!(output.contains("[SW]"));
    }
}
