//! HUD overlay: a compass label and a static crosshair.
//!
//! # Invariants
//! - The compass is sampled on its own coarse timer, not every render tick.
//! - The HUD only reads pose values; it never writes scene state.

mod compass;
mod overlay;

pub use compass::{CompassLabel, CompassReporter, CompassSampler};
pub use overlay::HudOverlay;

pub fn crate_info() -> &'static str {
    "showcase-hud v0.1.0"
}
