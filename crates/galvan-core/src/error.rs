//! Error types for the Galvan model assembler.
//!
//! Organized by subsystem: option validation, model build, parameter
//! substitution, and discretisation. [`PipelineError`] joins the last two
//! for the composed process-then-discretise pipeline.

use std::error::Error;
use std::fmt;

use crate::domain::{display_domains, AuxiliaryDomains, Domain};
use crate::id::ExprId;

/// Errors from option validation.
///
/// Raised synchronously before any model state exists. Every message
/// names the offending key or role so the host can surface it verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionError {
    /// The configuration contains a key that is not a known option.
    UnknownOption {
        /// The unrecognised key.
        key: String,
    },
    /// A known key carries a value outside its enumerated domain.
    InvalidValue {
        /// Semantic role of the option (e.g. `"thermal model"`).
        role: &'static str,
        /// The rejected value, rendered as text.
        value: String,
    },
    /// `dimensionality` is not 0, 1, or 2.
    InvalidDimensionality {
        /// The rejected value, rendered as text.
        value: String,
    },
    /// Two individually valid options cannot be combined.
    Incompatible {
        /// First option key.
        first_key: &'static str,
        /// First option value.
        first_value: String,
        /// Second option key.
        second_key: &'static str,
        /// Second option value.
        second_value: String,
    },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption { key } => write!(f, "option '{key}' not recognised"),
            Self::InvalidValue { role, value } => write!(f, "{role} '{value}' not recognised"),
            Self::InvalidDimensionality { value } => write!(
                f,
                "Dimension of current collectors must be 0, 1, or 2, not {value}"
            ),
            Self::Incompatible {
                first_key,
                first_value,
                second_key,
                second_value,
            } => write!(
                f,
                "options '{first_key} = {first_value}' and \
                 '{second_key} = {second_value}' are incompatible"
            ),
        }
    }
}

impl Error for OptionError {}

/// Structural failures of the one-shot model build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// `build` (or `register`) was called on a model that is already built.
    AlreadyBuilt,
    /// The registry holds no submodels.
    NoSubmodels,
    /// A submodel needs a variable no registered submodel provides.
    UnsatisfiedSubmodel {
        /// Registry key of the submodel that could not be coupled.
        submodel: String,
        /// The variable it asked for.
        variable: String,
    },
    /// Two submodels define the same variable.
    DuplicateVariable {
        /// The contested variable.
        variable: String,
        /// Submodel that defined it first (registry order).
        first: String,
        /// Submodel that defined it again.
        second: String,
    },
    /// Two submodels set an equation for the same state variable.
    DuplicateEquation {
        /// The contested state variable.
        variable: String,
        /// Submodel that set it first.
        first: String,
        /// Submodel that set it again.
        second: String,
    },
    /// A state variable has an rhs or algebraic equation but no initial condition.
    MissingInitialCondition {
        /// The state variable.
        variable: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyBuilt => write!(f, "Model already built"),
            Self::NoSubmodels => write!(f, "no submodels registered"),
            Self::UnsatisfiedSubmodel { submodel, variable } => {
                write!(f, "Submodel '{submodel}' requires the variable '{variable}'")
            }
            Self::DuplicateVariable {
                variable,
                first,
                second,
            } => write!(
                f,
                "variable '{variable}' defined by both '{first}' and '{second}'"
            ),
            Self::DuplicateEquation {
                variable,
                first,
                second,
            } => write!(
                f,
                "equation for '{variable}' set by both '{first}' and '{second}'"
            ),
            Self::MissingInitialCondition { variable } => {
                write!(f, "no initial condition for state variable '{variable}'")
            }
        }
    }
}

impl Error for ModelError {}

/// Errors from parameter substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterError {
    /// A `Parameter` node names a parameter absent from the table.
    Unresolved {
        /// The parameter name.
        name: String,
    },
    /// A parameter's value refers back to itself, directly or indirectly.
    Cycle {
        /// The parameter at which the cycle was detected.
        name: String,
    },
    /// A parameter table could not be parsed.
    Parse {
        /// Parser message.
        reason: String,
    },
    /// A parameter's value is an expression ID the arena never allocated.
    ForeignExpression {
        /// The parameter name.
        name: String,
        /// The unknown ID.
        id: ExprId,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved { name } => write!(f, "parameter '{name}' not found"),
            Self::Cycle { name } => write!(f, "parameter '{name}' is defined in terms of itself"),
            Self::Parse { reason } => write!(f, "invalid parameter table: {reason}"),
            Self::ForeignExpression { name, id } => write!(
                f,
                "parameter '{name}' refers to expression {id}, which is not in this arena"
            ),
        }
    }
}

impl Error for ParameterError {}

/// Errors from binding variables to state-vector slices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiscretisationError {
    /// A `Variable` node has no slice in the layout.
    NoLayout {
        /// The variable name.
        variable: String,
        /// Its primary domain.
        domain: Vec<Domain>,
        /// Its auxiliary domains.
        auxiliary: AuxiliaryDomains,
    },
    /// The mesh reports no points for a domain a variable lives on.
    EmptyDomain {
        /// The variable being laid out.
        variable: String,
        /// The domain without points.
        domain: Domain,
    },
    /// A variable's slice would push the state vector past the largest
    /// length a `Vec<f64>` can hold.
    TooManyPoints {
        /// The variable being laid out.
        variable: String,
    },
}

impl fmt::Display for DiscretisationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLayout {
                variable,
                domain,
                auxiliary,
            } => write!(
                f,
                "no state vector slice for variable '{variable}' on domain {} \
                 with auxiliary domains {auxiliary}",
                display_domains(domain)
            ),
            Self::EmptyDomain { variable, domain } => write!(
                f,
                "domain '{domain}' of variable '{variable}' has no mesh points"
            ),
            Self::TooManyPoints { variable } => write!(
                f,
                "variable '{variable}' needs more mesh points than a state vector can hold"
            ),
        }
    }
}

impl Error for DiscretisationError {}

/// Errors from the composed process-then-discretise pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// Parameter substitution failed.
    Parameter(ParameterError),
    /// Discretisation failed.
    Discretisation(DiscretisationError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(e) => write!(f, "parameter processing: {e}"),
            Self::Discretisation(e) => write!(f, "discretisation: {e}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parameter(e) => Some(e),
            Self::Discretisation(e) => Some(e),
        }
    }
}

impl From<ParameterError> for PipelineError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}

impl From<DiscretisationError> for PipelineError {
    fn from(e: DiscretisationError) -> Self {
        Self::Discretisation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_built_message() {
        assert_eq!(ModelError::AlreadyBuilt.to_string(), "Model already built");
    }

    #[test]
    fn unsatisfied_submodel_names_both_sides() {
        let e = ModelError::UnsatisfiedSubmodel {
            submodel: "current collector".into(),
            variable: "Total current density".into(),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("Submodel 'current collector'"));
        assert!(msg.contains("Total current density"));
    }

    #[test]
    fn dimensionality_message() {
        let e = OptionError::InvalidDimensionality { value: "5".into() };
        assert!(e.to_string().contains("Dimension of current collectors"));
        assert!(e.to_string().ends_with("not 5"));
    }

    #[test]
    fn no_layout_names_variable_and_domains() {
        let e = DiscretisationError::NoLayout {
            variable: "c".into(),
            domain: vec![Domain::NegativeParticle],
            auxiliary: AuxiliaryDomains::secondary(Domain::CurrentCollector),
        };
        let msg = e.to_string();
        assert!(msg.contains("'c'"));
        assert!(msg.contains("[negative particle]"));
        assert!(msg.contains("current collector"));
    }

    #[test]
    fn pipeline_error_chains_source() {
        let e: PipelineError = ParameterError::Unresolved { name: "p".into() }.into();
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "parameter processing: parameter 'p' not found");
    }
}
