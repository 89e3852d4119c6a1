//! Input: raw key and pointer-lock events folded into a per-tick snapshot.
//!
//! # Invariants
//! - Controllers consume [`Action`]s through [`FrameInput`], never raw key identifiers.
//! - [`InputState`] has one writer: [`InputAdapter::pump`] on the tick thread.
//! - A reported mouse delta is applied at most once.

pub mod action;
pub mod adapter;
pub mod state;

pub use action::{Action, BindingError, KeyBindings};
pub use adapter::{InputAdapter, InputEvent, InputSender};
pub use state::{FrameInput, InputState};

pub fn crate_info() -> &'static str {
    "showcase-input v0.1.0"
}
