use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::BoundsPolicy;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Fixed-step loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated time per tick. Stored as seconds in JSON.
    #[serde(with = "secs")]
    pub fixed_step: Duration,
    pub bounds_policy: BoundsPolicy,
    /// Upper bound on ticks per `advance`; lag beyond it is dropped.
    /// `None` keeps every tick.
    pub max_ticks_per_advance: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_step: Duration::from_nanos(16_666_667),
            bounds_policy: BoundsPolicy::default(),
            max_ticks_per_advance: None,
        }
    }
}

impl SimConfig {
    pub fn with_fixed_step(mut self, step: Duration) -> Self {
        self.fixed_step = step;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_step.is_zero() {
            return Err(ConfigError::Invalid {
                field: "fixed_step",
                reason: "must be greater than zero".into(),
            });
        }
        if self.max_ticks_per_advance == Some(0) {
            return Err(ConfigError::Invalid {
                field: "max_ticks_per_advance",
                reason: "must be at least 1 when set".into(),
            });
        }
        Ok(())
    }
}

/// Shape of the procedural demo scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain_rows: u32,
    pub terrain_cols: u32,
    pub terrain_gap: f32,
    pub cuberman_count: u32,
    pub carrot_count: u32,
    pub fence_poles_per_row: u32,
    pub fence_distance: f32,
    pub fence_scale: f32,
    pub fence_spacing: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            terrain_rows: 12,
            terrain_cols: 12,
            terrain_gap: 0.01,
            cuberman_count: 1,
            carrot_count: 3,
            fence_poles_per_row: 20,
            fence_distance: 5.0,
            fence_scale: 0.3,
            fence_spacing: 1.7,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Zero counts are fine (empty groups); non-finite or negative
    /// distances are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("terrain_gap", self.terrain_gap),
            ("fence_distance", self.fence_distance),
            ("fence_scale", self.fence_scale),
            ("fence_spacing", self.fence_spacing),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a finite, non-negative number"),
                });
            }
        }
        Ok(())
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
        SceneConfig::default().validate().unwrap();
        assert_eq!(SimConfig::default().bounds_policy, BoundsPolicy::ChildUnion);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = SimConfig::from_json_str(r#"{ "fixed_step": 0.01 }"#).unwrap();
        assert_eq!(c.fixed_step, Duration::from_millis(10));
        assert_eq!(c.max_ticks_per_advance, None);

        let s = SceneConfig::from_json_str(r#"{ "terrain_rows": 2 }"#).unwrap();
        assert_eq!(s.terrain_rows, 2);
        assert_eq!(s.terrain_cols, 12);
    }

    #[test]
    fn bounds_policy_is_snake_case() {
        let c = SimConfig::from_json_str(r#"{ "bounds_policy": "include_own_geometry" }"#).unwrap();
        assert_eq!(c.bounds_policy, BoundsPolicy::IncludeOwnGeometry);
    }

    #[test]
    fn zero_step_rejected() {
        let err = SimConfig::from_json_str(r#"{ "fixed_step": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fixed_step", .. }));
    }

    #[test]
    fn negative_step_rejected() {
        let err = SimConfig::from_json_str(r#"{ "fixed_step": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn zero_tick_cap_rejected() {
        let err = SimConfig::from_json_str(r#"{ "max_ticks_per_advance": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn negative_spacing_rejected() {
        let err = SceneConfig::from_json_str(r#"{ "fence_spacing": -2 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fence_spacing", .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.json");
        let config = SimConfig {
            fixed_step: Duration::from_millis(20),
            max_ticks_per_advance: Some(5),
            ..SimConfig::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = SimConfig::load(&path).unwrap();
        assert_eq!(loaded.max_ticks_per_advance, Some(5));
        assert_eq!(loaded.fixed_step, config.fixed_step);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SceneConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
