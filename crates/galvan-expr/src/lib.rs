//! Expression trees and the parameter/discretisation pipeline for Galvan.
//!
//! Expressions live in an append-only [`ExprArena`] and are addressed by
//! [`ExprId`](galvan_core::ExprId). Rewrites never mutate existing nodes:
//! they push new nodes and return a new root, sharing every subtree that
//! did not change.
//!
//! ```text
//! Parameter("L_n") * Variable("c_n")
//!         │ ParameterProcessor (ParameterValues)
//!         ▼
//! Scalar(0.0001) * Variable("c_n")
//!         │ Discretiser (DomainLayout)
//!         ▼
//! Scalar(0.0001) * StateVector(0..10)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod discretise;
pub mod layout;
pub mod node;
pub mod parameters;
pub mod process;

pub use arena::{ExprArena, ExprDisplay, PreOrder};
pub use discretise::{discretise, process_and_discretise, Discretiser};
pub use layout::{DomainLayout, MeshPoints};
pub use node::{BinaryOp, Node, UnaryOp, VariableRef};
pub use parameters::{ParameterValue, ParameterValues};
pub use process::{process, ParameterProcessor};
