//! Battery model assembly for Galvan.
//!
//! [`BatteryModel`] ties the layers together: it validates options,
//! exposes the discretisation defaults they imply, holds the submodel
//! registry through its one-shot build, and runs expressions through
//! parameter processing and discretisation with its own parameter table
//! and state-vector layout.
//!
//! [`lithium_ion`] provides ready-made presets.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod lithium_ion;
pub mod model;
pub mod parameters;

pub use config::{ConfigError, ModelConfig};
pub use model::{BatteryModel, BuildState};
