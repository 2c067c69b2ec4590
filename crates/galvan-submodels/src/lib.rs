//! Reference lithium-ion submodels for Galvan.
//!
//! Each module covers one physical role and offers one submodel per
//! option value that role accepts. Submodels communicate only through the
//! canonical names in [`names`]; any of them can be replaced by a custom
//! [`Submodel`](galvan_submodel::Submodel) that defines the same names.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod current_collector;
pub mod electrolyte;
pub mod external_circuit;
pub mod interface;
pub mod names;
pub mod particle;
pub mod thermal;
pub mod voltage;

pub use names::Electrode;
