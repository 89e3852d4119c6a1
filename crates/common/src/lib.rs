//! Shared types for the showcase scene core.
//!
//! # Invariants
//! - The core refers to renderables only through [`EntityId`] handles.
//! - Vector math is `glam::Vec3` value arithmetic; nothing here holds engine state.

pub mod math;
pub mod types;

pub use types::{EntityId, Transform};

pub fn crate_info() -> &'static str {
    "showcase-common v0.1.0"
}
