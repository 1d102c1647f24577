use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{FitOptions, DEFAULT_INITIAL_GROWTH_RATE};
use crate::error::AdoptionError;

/// Analysis configuration, loadable from a TOML file.
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Last year of the forward projection
    pub horizon_year: f64,
    /// Confidence level for parameter intervals
    pub confidence: f64,
    /// Initial guess for the growth rate `k`
    pub initial_growth_rate: f64,
    /// Optimizer iteration budget
    pub max_iterations: usize,
    /// Optimizer relative-improvement tolerance
    pub tolerance: f64,
    /// Explicit share column name; overrides header discovery
    pub share_column: Option<String>,
    /// Restrict fitting to these entities; `None` fits everything
    pub entities: Option<Vec<String>>,
    /// Terminal color per region for timeline rendering
    pub region_colors: HashMap<String, String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            horizon_year: 2030.0,
            confidence: 0.95,
            initial_growth_rate: DEFAULT_INITIAL_GROWTH_RATE,
            max_iterations: 200,
            tolerance: 1e-12,
            share_column: None,
            entities: None,
            region_colors: HashMap::new(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AdoptionError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Fit options derived from this configuration.
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            initial_growth_rate: self.initial_growth_rate,
            bounds: None,
        }
    }

    /// Configured terminal color for a region, if any.
    pub fn color_for(&self, region: &str) -> Option<&str> {
        self.region_colors.get(region).map(|s| s.as_str())
    }

    /// True when the entity passes the configured filter.
    pub fn includes_entity(&self, entity: &str) -> bool {
        match &self.entities {
            Some(list) => list.iter().any(|e| e == entity),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.horizon_year, 2030.0);
        assert_eq!(cfg.confidence, 0.95);
        assert_eq!(cfg.max_iterations, 200);
        assert!(cfg.share_column.is_none());
        assert!(cfg.includes_entity("anything"));
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let cfg: AnalysisConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.horizon_year, 2030.0);
        assert_eq!(cfg.initial_growth_rate, DEFAULT_INITIAL_GROWTH_RATE);
    }

    #[test]
    fn test_partial_toml() {
        let cfg: AnalysisConfig = toml::from_str(
            r#"
            horizon_year = 2035.0
            entities = ["Norway", "China"]

            [region_colors]
            Norway = "green"
            China = "red"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.horizon_year, 2035.0);
        assert!(cfg.includes_entity("Norway"));
        assert!(!cfg.includes_entity("World"));
        assert_eq!(cfg.color_for("Norway"), Some("green"));
        assert_eq!(cfg.color_for("EU"), None);
    }

    #[test]
    fn test_fit_options_reflect_config() {
        let cfg = AnalysisConfig {
            max_iterations: 50,
            tolerance: 1e-8,
            initial_growth_rate: 0.25,
            ..AnalysisConfig::default()
        };
        let opts = cfg.fit_options();
        assert_eq!(opts.max_iterations, 50);
        assert_eq!(opts.tolerance, 1e-8);
        assert_eq!(opts.initial_growth_rate, 0.25);
        assert!(opts.bounds.is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result: Result<AnalysisConfig, _> = toml::from_str("horizon_year = \"soon\"");
        assert!(result.is_err());
    }
}
