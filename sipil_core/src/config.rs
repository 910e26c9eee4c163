//! # Design Configuration
//!
//! Tunable limits and prices for all engines, loaded from TOML. Every section
//! and field is optional; anything omitted keeps its default.
//!
//! ```toml
//! [spectrum]
//! num_points = 200
//! input_policy = "strict"
//!
//! [optimizer]
//! max_height_to_width = 2.5
//! top_n = 3
//!
//! [cost_rates]
//! steel_per_kg = 16500.0
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::optimizer::{MaterialCostRates, OptimizerConfig};
use crate::seismic::SpectrumConfig;

/// Configuration shared by every calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    pub spectrum: SpectrumConfig,
    pub optimizer: OptimizerConfig,
    /// Prices used when a request does not carry its own
    pub cost_rates: MaterialCostRates,
}

impl DesignConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        Self::parse(text, "<inline>")
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        let config = Self::parse(&text, &path.display().to_string())?;
        debug!("Loaded design config from {}", path.display());
        Ok(config)
    }

    fn parse(text: &str, origin: &str) -> CalcResult<Self> {
        let config: DesignConfig =
            toml::from_str(text).map_err(|e| CalcError::config_error(origin, e.to_string()))?;
        config
            .validate()
            .map_err(|e| CalcError::config_error(origin, e.to_string()))?;
        Ok(config)
    }

    /// Reject settings no engine can work with.
    pub fn validate(&self) -> CalcResult<()> {
        self.spectrum.validate()?;
        self.optimizer.validate()?;
        self.cost_rates.validate()?;
        Ok(())
    }

    /// Serialize to TOML, e.g. to write out a starter file
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::InputPolicy;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(DesignConfig::from_toml_str("").unwrap(), DesignConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let text = r#"
            [spectrum]
            input_policy = "strict"

            [optimizer]
            top_n = 3
            max_height_to_width = 2.5

            [cost_rates]
            steel_per_kg = 16500.0
        "#;
        let config = DesignConfig::from_toml_str(text).unwrap();
        assert_eq!(config.spectrum.input_policy, InputPolicy::Strict);
        assert_eq!(config.spectrum.num_points, 100);
        assert_eq!(config.optimizer.top_n, 3);
        assert_eq!(config.optimizer.max_height_to_width, 2.5);
        assert_eq!(config.optimizer.width_min_mm, 200);
        assert_eq!(config.cost_rates.steel_per_kg, 16500.0);
        assert_eq!(config.cost_rates.concrete_per_m3, 1_100_000.0);
    }

    #[test]
    fn test_invalid_surface_rejected() {
        let err = DesignConfig::from_toml_str("[optimizer]\nwidth_step_mm = 0\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let text = "[optimizer]\nmin_reinforcement_ratio = 0.03\nmax_reinforcement_ratio = 0.02\n";
        assert!(DesignConfig::from_toml_str(text).is_err());

        assert!(DesignConfig::from_toml_str("[spectrum]\nnum_points = 1\n").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = DesignConfig::from_toml_str("[optimizer\ntop_n = ").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = DesignConfig::load(Path::new("/nonexistent/sipil.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DesignConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(DesignConfig::from_toml_str(&text).unwrap(), config);
    }
}
