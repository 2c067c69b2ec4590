//! Model configuration and setup errors.
//!
//! [`ModelConfig`] is the input for constructing a
//! [`BatteryModel`](crate::BatteryModel): the raw option map, parameter
//! overrides, and optional mesh point counts. It deserializes from JSON.

use std::error::Error;
use std::fmt;

use galvan_core::{ConfigMap, ModelError, OptionError, OptionValue};
use galvan_space::VarPts;
use indexmap::IndexMap;
use serde::Deserialize;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors from turning a [`ModelConfig`] into a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    Parse {
        /// Parser message.
        reason: String,
    },
    /// The option map failed validation.
    Options(OptionError),
    /// The model preset failed to build.
    Build(ModelError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { reason } => write!(f, "invalid model configuration: {reason}"),
            Self::Options(e) => write!(f, "options: {e}"),
            Self::Build(e) => write!(f, "build: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Options(e) => Some(e),
            Self::Build(e) => Some(e),
            Self::Parse { .. } => None,
        }
    }
}

impl From<OptionError> for ConfigError {
    fn from(e: OptionError) -> Self {
        Self::Options(e)
    }
}

impl From<ModelError> for ConfigError {
    fn from(e: ModelError) -> Self {
        Self::Build(e)
    }
}

// ── ModelConfig ────────────────────────────────────────────────────

/// Everything needed to construct a battery model.
///
/// Every field is optional in JSON:
///
/// ```
/// use galvan_model::ModelConfig;
///
/// let config = ModelConfig::from_json(r#"{
///     "options": {"dimensionality": 1, "current collector": "potential pair"},
///     "parameters": {"Current function": 2.0},
///     "var_pts": {"z": 5}
/// }"#).unwrap();
/// assert_eq!(config.options.len(), 2);
/// assert!(config.var_pts.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Raw option map, validated when the model is constructed.
    pub options: ConfigMap,
    /// Numeric parameter values overlaid on the default table.
    ///
    /// Expression-valued parameters live in the model's own arena and are
    /// set through [`BatteryModel::update_parameters`](crate::BatteryModel::update_parameters).
    pub parameters: IndexMap<String, f64>,
    /// Mesh point counts; `None` keeps the defaults.
    pub var_pts: Option<VarPts>,
}

impl ModelConfig {
    /// All defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Set one option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set one numeric parameter override.
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Override the mesh point counts.
    pub fn with_var_pts(mut self, var_pts: VarPts) -> Self {
        self.var_pts = Some(var_pts);
        self
    }
}

impl From<ConfigMap> for ModelConfig {
    fn from(options: ConfigMap) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}
