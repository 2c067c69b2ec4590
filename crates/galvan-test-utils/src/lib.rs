//! Test fixtures and helpers for Galvan development.
//!
//! Provides small [`Submodel`](galvan_submodel::Submodel) implementations
//! with predictable contributions, and a [`config`] helper for building
//! option maps inline.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingSubmodel, ProvidesVariable, RequiresVariable, StateSubmodel};

use galvan_core::{ConfigMap, OptionValue};

/// Build a [`ConfigMap`] from `(key, value)` pairs, keeping their order.
///
/// ```
/// use galvan_test_utils::config;
///
/// let map = config([("dimensionality", 1i64.into()), ("current collector", "potential pair".into())]);
/// assert_eq!(map.len(), 2);
/// ```
pub fn config<const N: usize>(pairs: [(&str, OptionValue); N]) -> ConfigMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
