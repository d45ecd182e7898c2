//! Pure conversion functions: TOML config structs -> estimator config types.

use parspec_estimate::{
    ApesConfig, CaponConfig, CovarianceModel, FrequencyGrid, IaaConfig, IaaVariant,
    SubspaceConfig,
};

use crate::config::{CovarianceToml, EstimationConfig, GridToml, IaaToml};
use crate::error::ParspecError;

/// Spectral estimator selected by `method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Music,
    Esprit,
    Capon,
    Apes,
    Iaa,
}

/// Parses an estimator name.
pub fn parse_method(s: &str) -> Result<Method, ParspecError> {
    match s.to_lowercase().as_str() {
        "music" => Ok(Method::Music),
        "esprit" => Ok(Method::Esprit),
        "capon" | "mvdr" => Ok(Method::Capon),
        "apes" => Ok(Method::Apes),
        "iaa" => Ok(Method::Iaa),
        other => Err(unknown("method", other)),
    }
}

/// Parses an IAA variant name. Underscores and hyphens are interchangeable.
pub fn parse_iaa_variant(s: &str) -> Result<IaaVariant, ParspecError> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "non-recursive" | "nonrecursive" => Ok(IaaVariant::NonRecursive),
        "synthesized" => Ok(IaaVariant::Synthesized),
        "recursive" => Ok(IaaVariant::Recursive),
        "recursive-levinson" | "levinson" => Ok(IaaVariant::RecursiveLevinson),
        other => Err(unknown("iaa.variant", other)),
    }
}

/// Converts the `[covariance]` table into a [`CovarianceModel`].
///
/// A missing `model` means `toeplitz`. The windowed models need
/// `model_order`; `toeplitz` rejects it.
pub fn parse_covariance_model(c: &CovarianceToml) -> Result<CovarianceModel, ParspecError> {
    let name = c.model.as_deref().unwrap_or("toeplitz").to_lowercase();
    match (name.as_str(), c.model_order) {
        ("toeplitz", None) => Ok(CovarianceModel::Toeplitz),
        ("toeplitz", Some(_)) => Err(ParspecError::UnusedField {
            field: "covariance.model_order",
            context: "the toeplitz model".to_string(),
        }),
        ("forward", Some(model_order)) => Ok(CovarianceModel::Forward { model_order }),
        ("backward", Some(model_order)) => Ok(CovarianceModel::Backward { model_order }),
        ("forward" | "backward", None) => Err(ParspecError::MissingField {
            field: "covariance.model_order",
            context: format!("the {name} model"),
        }),
        (other, _) => Err(unknown("covariance.model", other)),
    }
}

/// Builds the frequency grid. Explicit `frequencies` take precedence over
/// `points`.
pub fn build_grid(g: &GridToml) -> Result<FrequencyGrid, ParspecError> {
    let grid = match &g.frequencies {
        Some(f) => FrequencyGrid::new(f.clone())?,
        None => FrequencyGrid::centered(g.points)?,
    };
    Ok(grid)
}

/// Builds the MUSIC/ESPRIT configuration.
pub fn build_subspace_config(cfg: &EstimationConfig) -> Result<SubspaceConfig, ParspecError> {
    let model = parse_covariance_model(&cfg.covariance)?;
    Ok(SubspaceConfig::new(cfg.num_sources).with_model(model))
}

/// Builds the Capon configuration.
pub fn build_capon_config(cfg: &EstimationConfig) -> Result<CaponConfig, ParspecError> {
    Ok(CaponConfig::new(parse_covariance_model(&cfg.covariance)?))
}

/// Builds the APES configuration.
///
/// APES always uses backward windows, so `model` may only be omitted or set
/// to `backward`.
pub fn build_apes_config(cfg: &EstimationConfig) -> Result<ApesConfig, ParspecError> {
    if let Some(model) = cfg.covariance.model.as_deref()
        && !model.eq_ignore_ascii_case("backward")
    {
        return Err(ParspecError::UnusedField {
            field: "covariance.model",
            context: format!("APES (got {model:?}, only \"backward\" applies)"),
        });
    }
    let model_order = cfg
        .covariance
        .model_order
        .ok_or_else(|| ParspecError::MissingField {
            field: "covariance.model_order",
            context: "APES".to_string(),
        })?;
    Ok(ApesConfig::new(model_order))
}

/// Builds the IAA configuration.
pub fn build_iaa_config(i: &IaaToml) -> Result<IaaConfig, ParspecError> {
    let variant = parse_iaa_variant(&i.variant)?;
    Ok(IaaConfig::new(variant).with_iterations(i.iterations))
}

fn unknown(field: &'static str, value: &str) -> ParspecError {
    ParspecError::UnknownVariant {
        field,
        value: value.to_string(),
    }
}
