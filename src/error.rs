//! Error type for configuration and dispatch.

use parspec_estimate::EstimateError;

/// Error type for the parspec facade.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParspecError {
    /// The estimator itself failed.
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    /// Returned when the TOML document cannot be deserialised.
    #[error("failed to parse config: {message}")]
    ConfigParse {
        /// Parser message.
        message: String,
    },

    /// Returned when a string option names no known variant.
    #[error("unknown {field}: {value:?}")]
    UnknownVariant {
        /// Config key.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Returned when a setting needed by the chosen method is absent.
    #[error("{field} is required by {context}")]
    MissingField {
        /// Config key.
        field: &'static str,
        /// What needs it.
        context: String,
    },

    /// Returned when a setting contradicts the chosen method.
    #[error("{field} is not used by {context}")]
    UnusedField {
        /// Config key.
        field: &'static str,
        /// What rejects it.
        context: String,
    },
}
