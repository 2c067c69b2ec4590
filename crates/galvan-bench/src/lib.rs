//! Benchmark profiles for the Galvan battery model assembler.
//!
//! - [`reference_profile`]: single particle model on a 1D current collector
//! - [`stress_profile`]: the same on a finely meshed 2D current collector
//! - [`parameter_chain`]: a deep expression tree with many parameters

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use galvan_core::{Domain, ExprId, SpatialVariable};
use galvan_expr::{ExprArena, ParameterValues, VariableRef};
use galvan_model::ModelConfig;
use galvan_space::VarPts;

/// Single particle model with a potential-pair 1D current collector and
/// a lumped thermal model, default point counts.
pub fn reference_profile() -> ModelConfig {
    ModelConfig::new()
        .with_option("dimensionality", 1i64)
        .with_option("current collector", "potential pair")
        .with_option("thermal", "lumped")
}

/// [`reference_profile`] on a 2D current collector with 40 points along
/// every spatial variable.
pub fn stress_profile() -> ModelConfig {
    let var_pts = SpatialVariable::ALL
        .into_iter()
        .fold(VarPts::default(), |pts, v| pts.with(v, 40));
    reference_profile()
        .with_option("dimensionality", 2i64)
        .with_var_pts(var_pts)
}

/// `p0 * v + p1 * v + ... + p{n-1} * v` over one particle variable,
/// with a table defining every `p{i}` as `0.5 * p{i+1}` and `p{n}` as a
/// scalar.
///
/// Processing the root resolves a chain of `n` nested definitions.
pub fn parameter_chain(arena: &mut ExprArena, n: usize) -> (ExprId, ParameterValues) {
    let v = arena.variable(
        VariableRef::new("X-averaged negative particle concentration")
            .on(Domain::NegativeParticle)
            .with_secondary(Domain::CurrentCollector),
    );
    let mut values = ParameterValues::new();
    let mut root = arena.scalar(0.0);
    for i in 0..n {
        let p = arena.parameter(format!("p{i}"));
        let term = arena.multiply(p, v);
        root = arena.add(root, term);

        let next = arena.parameter(format!("p{}", i + 1));
        let half = arena.scalar(0.5);
        values.insert(format!("p{i}"), arena.multiply(half, next));
    }
    values.insert(format!("p{n}"), 1.0);
    (root, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvan_expr::process;

    #[test]
    fn chain_resolves_to_a_parameter_free_tree() {
        let mut arena = ExprArena::new();
        let (root, values) = parameter_chain(&mut arena, 16);
        let out = process(&mut arena, root, &values).unwrap();
        assert!(arena.is_parameter_free(out));
    }

    #[test]
    fn stress_profile_is_two_dimensional() {
        let config = stress_profile();
        assert_eq!(config.options["dimensionality"], 2i64.into());
        assert_eq!(config.var_pts.map(|p| p.get(SpatialVariable::Y)), Some(40));
    }
}
