//! TOML configuration for a single estimation run.
//!
//! ```toml
//! method = "music"
//! num_sources = 2
//!
//! [covariance]
//! model = "forward"
//! model_order = 16
//!
//! [iaa]
//! variant = "recursive-levinson"
//! iterations = 10
//!
//! [grid]
//! points = 1024
//! ```

use serde::Deserialize;

use crate::error::ParspecError;

/// Top-level estimation configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimationConfig {
    /// Estimator: `music`, `esprit`, `capon`, `apes` or `iaa`.
    pub method: String,

    /// Number of sinusoids (MUSIC and ESPRIT).
    #[serde(default = "default_num_sources")]
    pub num_sources: usize,

    /// Covariance model settings.
    #[serde(default)]
    pub covariance: CovarianceToml,

    /// IAA settings.
    #[serde(default)]
    pub iaa: IaaToml,

    /// Frequency grid settings.
    #[serde(default)]
    pub grid: GridToml,
}

impl EstimationConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ParspecError::ConfigParse`] for malformed TOML, unknown keys
    /// or a missing `method`.
    pub fn from_toml_str(s: &str) -> Result<Self, ParspecError> {
        toml::from_str(s).map_err(|e| ParspecError::ConfigParse {
            message: e.to_string(),
        })
    }
}

fn default_num_sources() -> usize {
    1
}

/// Covariance model: `toeplitz` (default), `forward` or `backward`.
///
/// `model_order` is required by the windowed models and by APES, and
/// rejected by `toeplitz`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CovarianceToml {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub model_order: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IaaToml {
    #[serde(default = "default_iaa_variant")]
    pub variant: String,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for IaaToml {
    fn default() -> Self {
        Self {
            variant: default_iaa_variant(),
            iterations: default_iterations(),
        }
    }
}

fn default_iaa_variant() -> String {
    "recursive".to_string()
}
fn default_iterations() -> usize {
    10
}

/// Frequency grid: explicit `frequencies`, or a centred uniform grid of
/// `points` points.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default)]
    pub frequencies: Option<Vec<f32>>,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            points: default_points(),
            frequencies: None,
        }
    }
}

fn default_points() -> usize {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_uses_defaults() {
        let cfg = EstimationConfig::from_toml_str(r#"method = "capon""#).unwrap();
        assert_eq!(cfg.method, "capon");
        assert_eq!(cfg.num_sources, 1);
        assert!(cfg.covariance.model.is_none());
        assert!(cfg.covariance.model_order.is_none());
        assert_eq!(cfg.iaa.variant, "recursive");
        assert_eq!(cfg.iaa.iterations, 10);
        assert_eq!(cfg.grid.points, 1024);
        assert!(cfg.grid.frequencies.is_none());
    }

    #[test]
    fn full_document() {
        let cfg = EstimationConfig::from_toml_str(
            r#"
            method = "iaa"
            num_sources = 3

            [covariance]
            model = "backward"
            model_order = 6

            [iaa]
            variant = "synthesized"
            iterations = 4

            [grid]
            frequencies = [-1.0, 0.0, 1.0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.num_sources, 3);
        assert_eq!(cfg.covariance.model.as_deref(), Some("backward"));
        assert_eq!(cfg.covariance.model_order, Some(6));
        assert_eq!(cfg.iaa.variant, "synthesized");
        assert_eq!(cfg.iaa.iterations, 4);
        assert_eq!(cfg.grid.frequencies, Some(vec![-1.0, 0.0, 1.0]));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = EstimationConfig::from_toml_str(
            r#"
            method = "music"
            sources = 2
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ParspecError::ConfigParse { .. }));
    }

    #[test]
    fn method_is_required() {
        assert!(EstimationConfig::from_toml_str("num_sources = 2").is_err());
    }
}
