use std::fmt;

use crate::compass::CompassLabel;

/// HUD state pushed to the display surface: the compass label in the corner
/// and a crosshair at screen center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudOverlay {
    compass: CompassLabel,
    crosshair: bool,
}

impl HudOverlay {
    pub fn new() -> Self {
        Self {
            compass: CompassLabel::N,
            crosshair: true,
        }
    }

    pub fn compass(&self) -> CompassLabel {
        self.compass
    }

    pub fn crosshair(&self) -> bool {
        self.crosshair
    }

    pub fn set_crosshair(&mut self, visible: bool) {
        self.crosshair = visible;
    }

    /// Store a new compass label. Returns `true` if the display needs a redraw.
    pub fn push_compass(&mut self, label: CompassLabel) -> bool {
        let changed = self.compass != label;
        self.compass = label;
        changed
    }
}

impl Default for HudOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HudOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>2}]", self.compass)?;
        if self.crosshair {
            f.write_str(" +")?;
        }
        Ok(())
    }
}
