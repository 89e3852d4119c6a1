use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A high-level action the controllers consume.
///
/// Controllers never look at raw key identifiers; the binding table maps
/// keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Walk along the camera's horizontal forward.
    MoveForward,
    /// Walk against the camera's horizontal forward.
    MoveBackward,
    /// Sidestep to the camera's left.
    StrafeLeft,
    /// Sidestep to the camera's right.
    StrafeRight,
    /// Rise along world up.
    Ascend,
    /// Sink along world up.
    Descend,
    /// Swing the orbit camera so its yaw increases.
    OrbitLeft,
    /// Swing the orbit camera so its yaw decreases.
    OrbitRight,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Ascend,
        Action::Descend,
        Action::OrbitLeft,
        Action::OrbitRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveForward => "move_forward",
            Action::MoveBackward => "move_backward",
            Action::StrafeLeft => "strafe_left",
            Action::StrafeRight => "strafe_right",
            Action::Ascend => "ascend",
            Action::Descend => "descend",
            Action::OrbitLeft => "orbit_left",
            Action::OrbitRight => "orbit_right",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| BindingError::UnknownAction(s.to_string()))
    }
}

/// Errors from building a binding table.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("empty key identifier bound to {0}")]
    EmptyKey(Action),
}

/// Case-normalize a raw key identifier (`"ArrowLeft"` and `"arrowleft"` are the same key).
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Key identifier to action table.
///
/// Several keys may map to one action; one key maps to at most one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Action>", into = "BTreeMap<String, Action>")]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl From<BTreeMap<String, Action>> for KeyBindings {
    fn from(raw: BTreeMap<String, Action>) -> Self {
        let keys = raw
            .into_iter()
            .map(|(k, a)| (normalize_key(&k), a))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { keys }
    }
}

impl From<KeyBindings> for BTreeMap<String, Action> {
    fn from(bindings: KeyBindings) -> Self {
        bindings.keys
    }
}

impl KeyBindings {
    /// An empty table with nothing bound.
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Build a table from `(key, action name)` pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, BindingError> {
        let mut bindings = Self::empty();
        for (key, action) in pairs {
            let action: Action = action.parse()?;
            bindings.bind(key, action)?;
        }
        Ok(bindings)
    }

    /// Bind `key` to `action`, replacing any earlier binding of that key.
    pub fn bind(&mut self, key: &str, action: Action) -> Result<(), BindingError> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(BindingError::EmptyKey(action));
        }
        if let Some(prev) = self.keys.insert(key.clone(), action) {
            if prev != action {
                tracing::debug!(%key, from = %prev, to = %action, "rebound key");
            }
        }
        Ok(())
    }

    /// Action bound to a raw key identifier, if any.
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(&normalize_key(key)).copied()
    }

    /// All keys bound to `action`, in sorted order.
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = BTreeMap::new();
        keys.insert("w".to_string(), Action::MoveForward);
        keys.insert("s".to_string(), Action::MoveBackward);
        keys.insert("a".to_string(), Action::StrafeLeft);
        keys.insert("d".to_string(), Action::StrafeRight);
        keys.insert("q".to_string(), Action::Ascend);
        keys.insert("e".to_string(), Action::Descend);
        keys.insert("arrowleft".to_string(), Action::OrbitLeft);
        keys.insert("arrowright".to_string(), Action::OrbitRight);
        Self { keys }
    }
}
