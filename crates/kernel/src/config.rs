use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a composer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Composition constants. Defaults reproduce the reference composition:
/// a 5×5 grid spaced 145 units apart on the `z = -100` plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Half-width of the grid in cells. The grid spans `[-r, r]²`.
    pub grid_radius: i32,
    /// World distance between neighboring cube centers.
    pub spacing: f32,
    /// Z coordinate shared by every cube center.
    pub depth: f32,
    pub base_scale: f32,
    /// Maximum absolute noise-driven deviation from `base_scale`.
    pub scale_variation: f32,
    /// Noise frequency for per-cell parameter sampling.
    pub cell_frequency: f64,
    /// Noise-space offset of the magnitude sample relative to the scale sample.
    pub noise_seed_offset: f64,
    pub noise_gain: f32,
    /// Probability that the whole scene uses amplified noise.
    pub amplified_probability: f64,
    pub amplification: f32,
    /// Per-step gain of the diagonal noise gradient.
    pub gradient_gain: f32,
    /// Extra cells on each side of the grid the highlight pick may land on.
    /// A pick outside the grid highlights nothing.
    pub highlight_margin: i32,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            grid_radius: 2,
            spacing: 145.0,
            depth: -100.0,
            base_scale: 30.0,
            scale_variation: 10.0,
            cell_frequency: 0.1789,
            noise_seed_offset: 39.789,
            noise_gain: 2.5,
            amplified_probability: 0.25,
            amplification: 4.0,
            gradient_gain: 0.1,
            highlight_margin: 0,
        }
    }
}

impl ComposerConfig {
    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_radius < 0 {
            return invalid("grid_radius", "must not be negative");
        }
        if self.highlight_margin < 0 {
            return invalid("highlight_margin", "must not be negative");
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return invalid("spacing", "must be positive");
        }
        if !(self.base_scale.is_finite() && self.base_scale > 0.0) {
            return invalid("base_scale", "must be positive");
        }
        if !(self.scale_variation >= 0.0 && self.scale_variation < self.base_scale) {
            return invalid("scale_variation", "must be in [0, base_scale)");
        }
        if !(0.0..=1.0).contains(&self.amplified_probability) {
            return invalid("amplified_probability", "must be in [0, 1]");
        }
        let finite = [
            self.depth,
            self.noise_gain,
            self.amplification,
            self.gradient_gain,
        ];
        if finite.iter().any(|v| !v.is_finite())
            || !self.cell_frequency.is_finite()
            || !self.noise_seed_offset.is_finite()
        {
            return invalid("noise parameters", "must be finite");
        }
        Ok(())
    }

    /// Number of cells along one grid edge.
    pub fn grid_width(&self) -> i32 {
        2 * self.grid_radius + 1
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid { field, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ComposerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_width(), 5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ComposerConfig::from_json_str(r#"{ "spacing": 100.0 }"#).unwrap();
        assert_eq!(config.spacing, 100.0);
        assert_eq!(config.base_scale, 30.0);
        assert_eq!(config.grid_radius, 2);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ComposerConfig::from_json_str(r#"{ "base_scale": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "base_scale", .. }));

        let err = ComposerConfig::from_json_str(r#"{ "amplified_probability": 1.5 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = ComposerConfig::from_json_str(r#"{ "scale_variation": 40.0 }"#).unwrap_err();
        assert!(err.to_string().contains("scale_variation"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ComposerConfig::from_json_str("{ spacing: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ComposerConfig::from_json_file("/nonexistent/wirecubes.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
