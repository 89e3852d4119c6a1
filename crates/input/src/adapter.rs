use std::sync::mpsc::{self, Receiver, Sender};

use crate::state::InputState;

/// A raw event from the host's key and pointer listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key identifier as reported by the host; normalized on apply.
    KeyDown(String),
    KeyUp(String),
    /// Primary button pressed: start firing.
    MouseDown,
    /// Primary button released: stop firing.
    MouseUp,
    /// Relative pointer movement while locked.
    PointerMove { dx: f32, dy: f32 },
    /// Pointer lock engaged (`true`) or lost (`false`).
    PointerLockChanged(bool),
    /// Window lost focus; every key counts as released.
    FocusLost,
}

/// Cloneable handle given to event listeners. Sending never blocks.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Returns `false` once the adapter has been dropped.
    pub fn send(&self, event: InputEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(event = ?e.0, "input adapter gone, event dropped");
                false
            }
        }
    }
}

/// Single mutation point for [`InputState`].
///
/// Listeners on any thread push events through [`InputSender`]s; the tick loop
/// calls [`InputAdapter::pump`] once per frame, so only the tick thread ever
/// writes the state.
#[derive(Debug)]
pub struct InputAdapter {
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
}

impl InputAdapter {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Apply every queued event to `state` in arrival order. Returns how many were applied.
    pub fn pump(&self, state: &mut InputState) -> usize {
        let mut applied = 0;
        for event in self.rx.try_iter() {
            state.apply(&event);
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(applied, "input events applied");
        }
        applied
    }
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new()
    }
}
