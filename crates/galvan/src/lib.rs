//! Galvan: declarative battery model assembly and symbolic discretisation.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Galvan sub-crates. For most users, adding `galvan` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use galvan::prelude::*;
//!
//! // A single particle model with a 1D current collector.
//! let config = ModelConfig::new()
//!     .with_option("dimensionality", 1i64)
//!     .with_option("current collector", "potential pair");
//! let mut model = galvan::model::lithium_ion::spm(config).unwrap();
//! assert!(model.is_built());
//!
//! // Run an expression through parameter substitution and discretisation.
//! let arena = model.arena_mut();
//! let thickness = arena.parameter("Negative electrode thickness [m]");
//! let c = arena.variable(
//!     VariableRef::new("X-averaged negative particle concentration")
//!         .on(Domain::NegativeParticle)
//!         .with_secondary(Domain::CurrentCollector),
//! );
//! let root = arena.multiply(thickness, c);
//! let out = model.process_parameters_and_discretise(root).unwrap();
//! assert_eq!(model.arena().display(out).to_string(), "0.0001 * y[0:100]");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `galvan-core` | Options, domains, ids, error types |
//! | [`expr`] | `galvan-expr` | Expression arena, parameter processing, discretisation |
//! | [`space`] | `galvan-space` | Geometry, submesh and spatial-method defaults |
//! | [`submodel`] | `galvan-submodel` | Submodel trait, registry, assembly |
//! | [`submodels`] | `galvan-submodels` | Reference lithium-ion submodels |
//! | [`model`] | `galvan-model` | `BatteryModel` and presets |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, option validation, and errors (`galvan-core`).
pub use galvan_core as types;

/// Expression trees and the substitution/discretisation pipeline (`galvan-expr`).
///
/// Expressions live in an [`expr::ExprArena`]; [`expr::ParameterProcessor`]
/// and [`expr::Discretiser`] rewrite them without mutating existing nodes.
pub use galvan_expr as expr;

/// Discretisation defaults (`galvan-space`).
pub use galvan_space as space;

/// The submodel extension point (`galvan-submodel`).
///
/// Implement [`submodel::Submodel`] to add a physical phenomenon.
pub use galvan_submodel as submodel;

/// Reference submodels (`galvan-submodels`).
pub use galvan_submodels as submodels;

/// Battery models and presets (`galvan-model`).
pub use galvan_model as model;

/// Common imports for typical Galvan usage.
///
/// ```rust
/// use galvan::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use galvan_core::{ConfigMap, Domain, ExprId, OptionValue, Options, SpatialVariable};

    // Errors
    pub use galvan_core::{
        DiscretisationError, ModelError, OptionError, ParameterError, PipelineError,
    };

    // Expressions
    pub use galvan_expr::{ExprArena, Node, ParameterValues, VariableRef};

    // Space
    pub use galvan_space::{DiscretisationCatalog, SpatialMethod, SubMeshType, VarPts};

    // Submodels
    pub use galvan_submodel::{CouplingError, EquationMap, Submodel, Variables};

    // Model
    pub use galvan_model::{BatteryModel, BuildState, ConfigError, ModelConfig};
}
