use glam::Vec2;
use std::collections::BTreeSet;

use crate::action::{Action, KeyBindings, normalize_key};
use crate::adapter::InputEvent;

/// Accumulated raw input for the session.
///
/// Written only by [`InputState::apply`]; the tick loop reads it through
/// [`InputState::frame`], which also consumes the per-frame mouse delta.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: BTreeSet<String>,
    firing: bool,
    mouse_delta: Vec2,
    pointer_locked: bool,
}

/// Read-only view of the input for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub held: BTreeSet<Action>,
    pub firing: bool,
    /// Pointer-lock mouse movement since the previous frame; zero when unlocked.
    pub mouse_delta: Vec2,
    pub pointer_locked: bool,
}

impl FrameInput {
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Frame with the given actions held and nothing else going on.
    pub fn holding(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            held: actions.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one raw event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.keys_down.insert(normalize_key(key));
            }
            InputEvent::KeyUp(key) => {
                self.keys_down.remove(&normalize_key(key));
            }
            InputEvent::MouseDown => self.firing = true,
            InputEvent::MouseUp => self.firing = false,
            InputEvent::PointerMove { dx, dy } => {
                if self.pointer_locked {
                    self.mouse_delta += Vec2::new(*dx, *dy);
                }
            }
            InputEvent::PointerLockChanged(locked) => {
                if self.pointer_locked != *locked {
                    tracing::debug!(locked = *locked, "pointer lock changed");
                }
                self.pointer_locked = *locked;
                if !locked {
                    self.mouse_delta = Vec2::ZERO;
                }
            }
            InputEvent::FocusLost => self.clear(),
        }
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys_down.contains(&normalize_key(key))
    }

    pub fn firing(&self) -> bool {
        self.firing
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Pending mouse delta without consuming it.
    pub fn pending_mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Actions whose keys are currently held.
    pub fn held_actions(&self, bindings: &KeyBindings) -> BTreeSet<Action> {
        self.keys_down
            .iter()
            .filter_map(|k| bindings.action_for(k))
            .collect()
    }

    /// Snapshot for one tick. The mouse delta is handed out at most once.
    pub fn frame(&mut self, bindings: &KeyBindings) -> FrameInput {
        let mouse_delta = if self.pointer_locked {
            std::mem::take(&mut self.mouse_delta)
        } else {
            self.mouse_delta = Vec2::ZERO;
            Vec2::ZERO
        };
        FrameInput {
            held: self.held_actions(bindings),
            firing: self.firing,
            mouse_delta,
            pointer_locked: self.pointer_locked,
        }
    }

    /// Release every key and the trigger, drop pending mouse movement.
    /// Pointer lock is left to the host.
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.firing = false;
        self.mouse_delta = Vec2::ZERO;
    }
}
