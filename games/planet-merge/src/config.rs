//! Arena tuning.
//!
//! Gameplay constants are in the browser engine's units: milliseconds for
//! time, `px/ms²` for accelerations. `force_scale` converts forces to the
//! physics world's seconds.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tiers::{Tier, TierError, TierTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid arena json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("boundary radius {boundary} must exceed attractor radius {attractor}")]
    BoundaryInsideAttractor { boundary: f32, attractor: f32 },
    #[error("tier catalog: {0}")]
    Tiers(#[from] TierError),
}

/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Centre of the attractor and of the boundary ring.
    pub attractor: Vec2,
    pub attractor_radius: f32,
    /// Game-over radius, measured from the attractor centre.
    pub boundary_radius: f32,
    /// Where new launchable planets appear.
    pub staging: Vec2,
    /// `G` in `G * mass / d²`.
    pub gravity_constant: f32,
    /// Drag vector to launch force factor.
    pub impulse_scale: f32,
    /// Flight window before the next planet, in ms.
    pub cooldown_ms: f32,
    /// Multiplier from `px/ms²` forces to `px/s²` forces.
    pub force_scale: f32,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    /// Air drag on planets, per second.
    pub linear_damping: f32,
    pub seed: u64,
    /// Replaces the built-in planet catalog when present.
    pub tiers: Option<Vec<Tier>>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            world_width: 1000.0,
            world_height: 600.0,
            attractor: Vec2::new(700.0, 300.0),
            attractor_radius: 30.0,
            boundary_radius: 200.0,
            staging: Vec2::new(200.0, 300.0),
            gravity_constant: 0.3,
            impulse_scale: 0.0005,
            cooldown_ms: 2500.0,
            force_scale: 1.0e6,
            density: 0.001,
            restitution: 0.0,
            friction: 0.1,
            linear_damping: 0.6,
            seed: 0x0b17_5eed,
            tiers: None,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("attractor_radius", self.attractor_radius),
            ("boundary_radius", self.boundary_radius),
            ("cooldown_ms", self.cooldown_ms),
            ("force_scale", self.force_scale),
            ("density", self.density),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let finite = [
            ("attractor.x", self.attractor.x),
            ("attractor.y", self.attractor.y),
            ("staging.x", self.staging.x),
            ("staging.y", self.staging.y),
            ("gravity_constant", self.gravity_constant),
            ("impulse_scale", self.impulse_scale),
            ("restitution", self.restitution),
            ("friction", self.friction),
            ("linear_damping", self.linear_damping),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field });
        }

        if self.boundary_radius <= self.attractor_radius {
            return Err(ConfigError::BoundaryInsideAttractor {
                boundary: self.boundary_radius,
                attractor: self.attractor_radius,
            });
        }

        self.tier_table()?;
        Ok(())
    }

    /// The configured catalog, or the built-in planets.
    pub fn tier_table(&self) -> Result<TierTable, ConfigError> {
        match &self.tiers {
            Some(tiers) => Ok(TierTable::new(tiers.clone())?),
            None => Ok(TierTable::planets()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tier_table().unwrap().len(), 9);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ArenaConfig::from_json(r#"{ "cooldown_ms": 1000, "seed": 7 }"#).unwrap();
        assert_eq!(config.cooldown_ms, 1000.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.boundary_radius, 200.0);
        assert_eq!(config.attractor, Vec2::new(700.0, 300.0));
    }

    #[test]
    fn vectors_parse_as_pairs() {
        let config = ArenaConfig::from_json(r#"{ "staging": [150.0, 250.0] }"#).unwrap();
        assert_eq!(config.staging, Vec2::new(150.0, 250.0));
    }

    #[test]
    fn custom_tiers() {
        let json = r#"{ "tiers": [
            { "radius": 10, "identity": "rock" },
            { "radius": 20, "identity": "boulder" }
        ] }"#;
        let table = ArenaConfig::from_json(json).unwrap().tier_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.tier_at(1).unwrap().identity, "boulder");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ArenaConfig::from_json(r#"{ "cooldown_ms": 0 }"#),
            Err(ConfigError::NotPositive { field: "cooldown_ms", .. })
        ));
        assert!(matches!(
            ArenaConfig::from_json(r#"{ "boundary_radius": 20 }"#),
            Err(ConfigError::BoundaryInsideAttractor { .. })
        ));
        assert!(matches!(
            ArenaConfig::from_json(r#"{ "tiers": [] }"#),
            Err(ConfigError::Tiers(TierError::Empty))
        ));
        assert!(matches!(
            ArenaConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ArenaConfig::from_json(r#"{ "density": -1 }"#).unwrap_err();
        assert_eq!(err.to_string(), "density must be positive, got -1");
    }
}
