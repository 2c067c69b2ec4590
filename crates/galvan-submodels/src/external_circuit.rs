//! How the load on the cell is specified.

use galvan_core::OperatingMode;
use galvan_expr::{ExprArena, VariableRef};
use galvan_submodel::{CouplingError, EquationMap, Submodel, Variables};

use crate::names::{TERMINAL_VOLTAGE, TOTAL_CURRENT_DENSITY};

/// The applied current is a prescribed function of time.
#[derive(Debug, Default)]
pub struct CurrentControl;

impl Submodel for CurrentControl {
    fn name(&self) -> &str {
        "current control"
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let i = arena.parameter("Current function");
        Variables::new().with(TOTAL_CURRENT_DENSITY, i)
    }
}

/// The current is an unknown chosen so that the terminal voltage, or the
/// power drawn, follows a prescribed function.
#[derive(Debug)]
pub struct FunctionControl {
    mode: OperatingMode,
}

impl FunctionControl {
    /// Control for a voltage or power operating mode.
    ///
    /// Returns `None` for [`OperatingMode::Current`], which is handled by
    /// [`CurrentControl`].
    pub fn new(mode: OperatingMode) -> Option<Self> {
        match mode {
            OperatingMode::Current => None,
            OperatingMode::Voltage | OperatingMode::Power => Some(Self { mode }),
        }
    }
}

impl Submodel for FunctionControl {
    fn name(&self) -> &str {
        match self.mode {
            OperatingMode::Power => "power control",
            _ => "voltage control",
        }
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let i = arena.variable(VariableRef::new(TOTAL_CURRENT_DENSITY));
        Variables::new().with(TOTAL_CURRENT_DENSITY, i)
    }

    fn set_algebraic(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let i = variables.require(TOTAL_CURRENT_DENSITY)?;
        let v = variables.require(TERMINAL_VOLTAGE)?;
        let residual = match self.mode {
            OperatingMode::Power => {
                let power = arena.multiply(v, i);
                let target = arena.parameter("Power function");
                arena.subtract(power, target)
            }
            _ => {
                let target = arena.parameter("Voltage function");
                arena.subtract(v, target)
            }
        };
        Ok([(TOTAL_CURRENT_DENSITY.to_string(), residual)].into_iter().collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let guess = arena.parameter("Current function");
        Ok([(TOTAL_CURRENT_DENSITY.to_string(), guess)].into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_mode_has_no_function_control() {
        assert!(FunctionControl::new(OperatingMode::Current).is_none());
        assert_eq!(
            FunctionControl::new(OperatingMode::Power).map(|c| c.name().to_string()),
            Some("power control".into())
        );
    }

    #[test]
    fn voltage_control_needs_terminal_voltage() {
        let mut arena = ExprArena::new();
        let control = FunctionControl::new(OperatingMode::Voltage).unwrap();
        let vars = control.fundamental_variables(&mut arena);
        let err = control.set_algebraic(&mut arena, &vars).unwrap_err();
        assert_eq!(
            err,
            CouplingError::MissingVariable {
                variable: TERMINAL_VOLTAGE.into()
            }
        );
    }
}
