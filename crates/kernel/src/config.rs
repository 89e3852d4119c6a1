//! Tunables for the showcase scene.
//!
//! Rates are per second and smoothing factors are per reference tick, so the
//! same file behaves the same at any frame rate.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use showcase_input::KeyBindings;
use std::path::Path;

use crate::projectile::{CullOrigin, OriginSource};
use crate::zone::{InteractiveZone, blocking_zone, default_zones};

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn require_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must lie in [0, 1], got {value}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Where the avatar appears when bound.
    pub spawn: Vec3,
    /// Walking speed in units per second.
    pub speed: f32,
    /// Fraction of the gap to the target closed per reference tick.
    pub smoothing: f32,
    /// Distance under which the avatar counts as inside a zone.
    pub proximity: f32,
    /// Slave the avatar's facing to the camera view after each tick.
    pub face_camera: bool,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::ZERO,
            speed: 6.0,
            smoothing: 0.2,
            proximity: 1.5,
            face_camera: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_position: Vec3,
    pub initial_yaw: f32,
    pub radius: f32,
    pub height: f32,
    /// Yaw change per second while an orbit key is held.
    pub orbit_rate: f32,
    /// Radians per unit of pointer-lock movement.
    pub mouse_sensitivity: f32,
    pub smoothing: f32,
    /// Pitch stays within `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_position: Vec3::new(0.0, 5.0, 10.0),
            initial_yaw: 0.0,
            radius: 4.0,
            height: 2.0,
            orbit_rate: 1.8,
            mouse_sensitivity: 0.002,
            smoothing: 0.1,
            pitch_limit: std::f32::consts::FRAC_PI_3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub origin: OriginSource,
    /// Units per second along the origin's forward.
    pub speed: f32,
    /// Seconds between shots while the trigger is held.
    pub cooldown: f32,
    pub chest_offset: Vec3,
    pub muzzle_offset: f32,
    pub max_range: f32,
    pub cull_origin: CullOrigin,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            origin: OriginSource::Avatar,
            speed: 30.0,
            cooldown: 0.15,
            chest_offset: Vec3::Y,
            muzzle_offset: 0.6,
            max_range: 200.0,
            cull_origin: CullOrigin::WorldOrigin,
        }
    }
}

/// Full configuration for one showcase session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Frame rate the per-tick smoothing factors were tuned at.
    pub reference_rate: f32,
    /// How often the HUD compass is sampled.
    pub compass_interval_ms: u64,
    pub avatar: AvatarConfig,
    pub camera: CameraConfig,
    pub projectile: ProjectileConfig,
    pub zones: Vec<InteractiveZone>,
    pub bindings: KeyBindings,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            reference_rate: 60.0,
            compass_interval_ms: 100,
            avatar: AvatarConfig::default(),
            camera: CameraConfig::default(),
            projectile: ProjectileConfig::default(),
            zones: default_zones(),
            bindings: KeyBindings::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), zones = config.zones.len(), "loaded config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("reference_rate", self.reference_rate)?;
        if self.compass_interval_ms == 0 {
            return Err(invalid("compass_interval_ms", "must be non-zero"));
        }

        require_positive("avatar.speed", self.avatar.speed)?;
        require_positive("avatar.proximity", self.avatar.proximity)?;
        require_fraction("avatar.smoothing", self.avatar.smoothing)?;

        require_positive("camera.radius", self.camera.radius)?;
        require_positive("camera.mouse_sensitivity", self.camera.mouse_sensitivity)?;
        require_fraction("camera.smoothing", self.camera.smoothing)?;
        if !(self.camera.pitch_limit > 0.0
            && self.camera.pitch_limit < std::f32::consts::FRAC_PI_2)
        {
            return Err(invalid(
                "camera.pitch_limit",
                format!("must lie in (0, pi/2), got {}", self.camera.pitch_limit),
            ));
        }

        require_positive("projectile.speed", self.projectile.speed)?;
        require_positive("projectile.cooldown", self.projectile.cooldown)?;
        require_positive("projectile.max_range", self.projectile.max_range)?;

        for zone in &self.zones {
            if zone.id.is_empty() {
                return Err(invalid("zones", "zone id must not be empty"));
            }
            require_positive("zones.radius", zone.radius)?;
        }
        let mut ids: Vec<&str> = self.zones.iter().map(|z| z.id.as_str()).collect();
        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(invalid("zones", format!("duplicate zone id {}", w[0])));
        }

        // The avatar could never leave a zone it starts inside.
        if let Some(zone) = blocking_zone(&self.zones, self.avatar.spawn) {
            return Err(invalid("avatar.spawn", format!("lies inside zone {}", zone.id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ShowcaseConfig::default().validate().unwrap();
    }

    #[test]
    fn default_rates_match_sixty_hz_tuning() {
        let c = ShowcaseConfig::default();
        assert!((c.avatar.speed / c.reference_rate - 0.1).abs() < 1e-6);
        assert!((c.camera.orbit_rate / c.reference_rate - 0.03).abs() < 1e-6);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = ShowcaseConfig::from_json_str(r#"{"avatar":{"speed":3.0}}"#).unwrap();
        assert_eq!(c.avatar.speed, 3.0);
        assert_eq!(c.avatar.smoothing, 0.2);
        assert_eq!(c.zones.len(), 3);
        assert_eq!(c.projectile.cooldown, 0.15);
    }

    #[test]
    fn enums_parse_from_snake_case() {
        let c = ShowcaseConfig::from_json_str(
            r#"{"projectile":{"origin":"camera","cull_origin":"firing_point"}}"#,
        )
        .unwrap();
        assert_eq!(c.projectile.origin, OriginSource::Camera);
        assert_eq!(c.projectile.cull_origin, CullOrigin::FiringPoint);
    }

    #[test]
    fn rejects_non_positive_speed() {
        let err = ShowcaseConfig::from_json_str(r#"{"avatar":{"speed":0.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "avatar.speed",
                ..
            }
        ));
    }

    #[test]
    fn rejects_duplicate_zone_ids() {
        let json = r#"{"zones":[
            {"id":"a","position":[0,0,0]},
            {"id":"a","position":[9,0,0]}
        ]}"#;
        let err = ShowcaseConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("duplicate zone id a"));
    }

    #[test]
    fn rejects_spawn_inside_zone() {
        let err =
            ShowcaseConfig::from_json_str(r#"{"avatar":{"spawn":[5.0,0.0,0.0]}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "avatar.spawn",
                ..
            }
        ));
        assert!(err.to_string().contains("projects"));
    }

    #[test]
    fn spawn_on_zone_edge_is_allowed() {
        let json = r#"{
            "avatar":{"spawn":[2.0,0.0,0.0]},
            "zones":[{"id":"pad","position":[0,0,0]}]
        }"#;
        let c = ShowcaseConfig::from_json_str(json).unwrap();
        assert_eq!(c.avatar.spawn, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn rejects_flat_pitch_limit() {
        let mut c = ShowcaseConfig::default();
        c.camera.pitch_limit = 0.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            ShowcaseConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let c = ShowcaseConfig::default();
        let text = c.to_json_pretty().unwrap();
        assert_eq!(ShowcaseConfig::from_json_str(&text).unwrap(), c);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ShowcaseConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
