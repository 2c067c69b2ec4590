//! Submodel trait, registry, and model assembly for Galvan.
//!
//! A battery model is the union of independent [`Submodel`]s, one per
//! physical phenomenon, registered in a [`SubmodelRegistry`]. [`assemble`]
//! couples their variables and merges their equations into an
//! [`Assembly`], rejecting registries that are structurally invalid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assembly;
pub mod registry;
pub mod submodel;
pub mod variables;

pub use assembly::{assemble, Assembly};
pub use registry::SubmodelRegistry;
pub use submodel::{EquationMap, Submodel};
pub use variables::{CouplingError, Equations, Variables};
