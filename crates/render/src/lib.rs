//! Rendering Adapter: renderer-agnostic frame interface.
//!
//! # Invariants
//! - Renderers read the scene graph and HUD; they never mutate either.
//! - Everything drawn is addressed by handle; no renderer state leaks into the core.
//!
//! The debug text renderer stands in for a GPU or browser backend in headless
//! runs. Swap in another implementation without changing consumers.

mod renderer;

pub use renderer::{DebugTextRenderer, Frame, Renderer};

pub fn crate_info() -> &'static str {
    "showcase-render v0.1.0"
}
