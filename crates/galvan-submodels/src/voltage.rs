//! Terminal voltage.

use galvan_expr::ExprArena;
use galvan_submodel::{CouplingError, Submodel, Variables};

use crate::names::{Electrode, TERMINAL_VOLTAGE};

/// Terminal voltage as the difference of the electrode surface potential
/// differences, ignoring electrolyte and ohmic losses.
#[derive(Debug, Default)]
pub struct TerminalVoltage;

impl Submodel for TerminalVoltage {
    fn name(&self) -> &str {
        "leading-order terminal voltage"
    }

    fn coupled_variables(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        let positive = variables.require(&Electrode::Positive.surface_potential_difference())?;
        let negative = variables.require(&Electrode::Negative.surface_potential_difference())?;
        let v = arena.subtract(positive, negative);
        Ok(Variables::new().with(TERMINAL_VOLTAGE, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_is_positive_minus_negative() {
        let mut arena = ExprArena::new();
        let n = arena.parameter("U_n");
        let p = arena.parameter("U_p");
        let vars = Variables::new()
            .with(Electrode::Negative.surface_potential_difference(), n)
            .with(Electrode::Positive.surface_potential_difference(), p);
        let out = TerminalVoltage.coupled_variables(&mut arena, &vars).unwrap();
        let v = out.require(TERMINAL_VOLTAGE).unwrap();
        assert_eq!(arena.display(v).to_string(), "U_p - U_n");
    }
}
