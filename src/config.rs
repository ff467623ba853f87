// Tunables for the particle field. Everything has a default, so a host can
// pass an empty JSON object or only the keys it cares about.

use crate::color::Color;
use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Pairs closer than this are joined by a line.
    pub connection_distance: f64,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`, in pixels per frame.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub line_width: f64,
    /// Painted over the whole surface each frame; a low alpha leaves trails.
    pub trail: Color,
    pub particle: Color,
    /// Alpha is replaced per line by the connection opacity.
    pub connection: Color,
    pub seed: Option<u64>,
    pub profile: bool,
}

impl FieldConfig {
    pub const PARTICLE_COUNT: usize = 80;
    pub const CONNECTION_DISTANCE: f64 = 150.0;
    /// Connections are an O(n^2) pass every frame.
    pub const MAX_PARTICLES: usize = 1000;

    pub fn from_json(json: &str) -> Result<FieldConfig, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > FieldConfig::MAX_PARTICLES {
            return Err(ConfigError::invalid(
                "particle_count",
                format!(
                    "{} is more than the maximum of {}",
                    self.particle_count,
                    FieldConfig::MAX_PARTICLES
                ),
            ));
        }
        non_negative("connection_distance", self.connection_distance)?;
        non_negative("max_speed", self.max_speed)?;
        non_negative("line_width", self.line_width)?;
        positive("min_radius", self.min_radius)?;
        positive("max_radius", self.max_radius)?;
        if self.min_radius > self.max_radius {
            return Err(ConfigError::invalid(
                "min_radius",
                format!(
                    "{} is larger than max_radius {}",
                    self.min_radius, self.max_radius
                ),
            ));
        }
        unit_alpha("trail", self.trail)?;
        unit_alpha("particle", self.particle)?;
        unit_alpha("connection", self.connection)?;
        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: FieldConfig::PARTICLE_COUNT,
            connection_distance: FieldConfig::CONNECTION_DISTANCE,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            line_width: 0.5,
            trail: Color::rgba(15, 15, 25, 0.1),
            particle: Color::rgba(0, 217, 255, 0.8),
            connection: Color::rgba(0, 217, 255, 1.0),
            seed: None,
            profile: false,
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{} is not a finite, non-negative number", value),
        ))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{} is not a finite, positive number", value),
        ))
    }
}

fn unit_alpha(field: &'static str, color: Color) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&color.a) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("alpha {} is outside [0, 1]", color.a),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = FieldConfig::from_json(r#"{"particle_count": 12, "seed": 7}"#).unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.connection_distance, 150.0);
        assert_eq!(config.particle, Color::rgba(0, 217, 255, 0.8));
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        match FieldConfig::from_json("{particle_count:") {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let err = FieldConfig::from_json(r#"{"min_radius": 4, "max_radius": 2}"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "min_radius"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_negative_speed_and_bad_alpha() {
        assert!(FieldConfig::from_json(r#"{"max_speed": -1}"#).is_err());
        assert!(FieldConfig::from_json(r#"{"trail": {"r": 0, "g": 0, "b": 0, "a": 2}}"#).is_err());
    }

    #[test]
    fn rejects_oversized_particle_count() {
        for json in &[
            r#"{"particle_count": 4294967295, "seed": 1}"#,
            r#"{"particle_count": 100000}"#,
            r#"{"particle_count": 1001}"#,
        ] {
            match FieldConfig::from_json(json) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "particle_count"),
                other => panic!("expected particle_count error, got {:?}", other),
            }
        }
        let config = FieldConfig::from_json(r#"{"particle_count": 1000}"#).unwrap();
        assert_eq!(config.particle_count, FieldConfig::MAX_PARTICLES);
    }

    #[test]
    fn zero_speed_is_allowed() {
        let config = FieldConfig::from_json(r#"{"max_speed": 0}"#).unwrap();
        assert_eq!(config.max_speed, 0.0);
    }
}
