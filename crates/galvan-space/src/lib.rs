//! Discretisation defaults for Galvan battery models.
//!
//! The [`DiscretisationCatalog`] answers three questions for every
//! [`Domain`](galvan_core::Domain), given a validated option set:
//!
//! - what are its coordinate ranges ([`DomainGeometry`]),
//! - how is it meshed ([`SubMeshType`]),
//! - how are spatial operators on it discretised ([`SpatialMethod`]).
//!
//! It also implements [`MeshPoints`](galvan_expr::MeshPoints), sizing
//! state-vector slices from the [`VarPts`] point counts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod geometry;
pub mod method;
pub mod var_pts;

pub use catalog::DiscretisationCatalog;
pub use geometry::{Bound, CoordinateRange, DomainGeometry};
pub use method::{SpatialMethod, SubMeshType};
pub use var_pts::VarPts;
