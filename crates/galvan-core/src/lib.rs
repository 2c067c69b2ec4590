//! Core types, option validation, and errors for the Galvan battery model
//! assembler.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Galvan workspace:
//! expression IDs, physical domain tags, the validated [`Options`] set,
//! and the error taxonomy shared by every layer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod id;
pub mod options;

pub use domain::{AuxiliaryDomains, Domain, DomainSet, SpatialVariable};
pub use error::{DiscretisationError, ModelError, OptionError, ParameterError, PipelineError};
pub use id::ExprId;
pub use options::{
    ConfigMap, CurrentCollectorModel, Dimensionality, InterfacialSurfaceArea, OperatingMode,
    OptionValue, Options, ParticleModel, SideReaction, SurfaceForm, ThermalModel,
};
