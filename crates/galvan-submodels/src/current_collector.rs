//! Current distribution in the current collectors.

use galvan_core::{CurrentCollectorModel, Dimensionality, Domain};
use galvan_expr::{ExprArena, VariableRef};
use galvan_submodel::{CouplingError, EquationMap, Submodel, Variables};

use crate::names::{
    CURRENT_COLLECTOR_CURRENT_DENSITY, NEGATIVE_CURRENT_COLLECTOR_POTENTIAL, TOTAL_CURRENT_DENSITY,
};

/// Infinitely conductive collectors: the through-cell current is the
/// applied current everywhere.
#[derive(Debug, Default)]
pub struct Uniform;

impl Submodel for Uniform {
    fn name(&self) -> &str {
        "uniform current collector"
    }

    fn coupled_variables(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        let i = variables.require(TOTAL_CURRENT_DENSITY)?;
        let phi = arena.scalar(0.0);
        Ok(Variables::new()
            .with(CURRENT_COLLECTOR_CURRENT_DENSITY, i)
            .with(NEGATIVE_CURRENT_COLLECTOR_POTENTIAL, phi))
    }
}

/// Solves for the collector potential and through-cell current over a
/// 1D or 2D current collector.
#[derive(Debug)]
pub struct PotentialPair {
    name: String,
}

impl PotentialPair {
    /// A potential-pair model for `model` on a collector of
    /// `dimensionality` 1 or 2.
    pub fn new(model: CurrentCollectorModel, dimensionality: Dimensionality) -> Self {
        let dims = match dimensionality {
            Dimensionality::Two => "2+1D",
            _ => "1+1D",
        };
        Self {
            name: format!("{model} {dims}"),
        }
    }

    fn state(name: &str) -> VariableRef {
        VariableRef::new(name).on(Domain::CurrentCollector)
    }
}

impl Submodel for PotentialPair {
    fn name(&self) -> &str {
        &self.name
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let phi = arena.variable(Self::state(NEGATIVE_CURRENT_COLLECTOR_POTENTIAL));
        let i_cc = arena.variable(Self::state(CURRENT_COLLECTOR_CURRENT_DENSITY));
        Variables::new()
            .with(NEGATIVE_CURRENT_COLLECTOR_POTENTIAL, phi)
            .with(CURRENT_COLLECTOR_CURRENT_DENSITY, i_cc)
    }

    fn set_algebraic(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let phi = variables.require(NEGATIVE_CURRENT_COLLECTOR_POTENTIAL)?;
        let i_cc = variables.require(CURRENT_COLLECTOR_CURRENT_DENSITY)?;
        let i = variables.require(TOTAL_CURRENT_DENSITY)?;

        // sigma * div(grad(phi)) = i_cc
        let sigma = arena.parameter("Negative current collector conductivity");
        let grad = arena.gradient(phi);
        let lap = arena.divergence(grad);
        let flux = arena.multiply(sigma, lap);
        let potential = arena.subtract(flux, i_cc);

        // Through-cell current balances the applied current.
        let current = arena.subtract(i_cc, i);

        Ok([
            (NEGATIVE_CURRENT_COLLECTOR_POTENTIAL.to_string(), potential),
            (CURRENT_COLLECTOR_CURRENT_DENSITY.to_string(), current),
        ]
        .into_iter()
        .collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let zero = arena.scalar(0.0);
        let i0 = arena.parameter("Current function");
        Ok([
            (NEGATIVE_CURRENT_COLLECTOR_POTENTIAL.to_string(), zero),
            (CURRENT_COLLECTOR_CURRENT_DENSITY.to_string(), i0),
        ]
        .into_iter()
        .collect())
    }
}

/// The collector potential is imposed from outside the model.
#[derive(Debug, Default)]
pub struct SetPotential;

impl Submodel for SetPotential {
    fn name(&self) -> &str {
        "set external potential"
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let phi = arena.parameter("Applied current collector potential");
        Variables::new().with(NEGATIVE_CURRENT_COLLECTOR_POTENTIAL, phi)
    }

    fn coupled_variables(
        &self,
        _arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        let i = variables.require(TOTAL_CURRENT_DENSITY)?;
        Ok(Variables::new().with(CURRENT_COLLECTOR_CURRENT_DENSITY, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn potential_pair_names_its_geometry() {
        let one = PotentialPair::new(CurrentCollectorModel::PotentialPair, Dimensionality::One);
        let two = PotentialPair::new(
            CurrentCollectorModel::PotentialPairQuiteConductive,
            Dimensionality::Two,
        );
        assert_eq!(one.name(), "potential pair 1+1D");
        assert_eq!(two.name(), "potential pair quite conductive 2+1D");
    }

    #[test]
    fn uniform_requires_total_current() {
        let mut arena = ExprArena::new();
        let err = Uniform
            .coupled_variables(&mut arena, &Variables::new())
            .unwrap_err();
        assert_eq!(
            err,
            CouplingError::MissingVariable {
                variable: TOTAL_CURRENT_DENSITY.into()
            }
        );
    }
}
