//! Cell temperature.

use galvan_core::{Domain, ExprId};
use galvan_expr::{ExprArena, VariableRef};
use galvan_submodel::{CouplingError, EquationMap, Submodel, Variables};

use crate::names::{CELL_TEMPERATURE, TOTAL_CURRENT_DENSITY, X_AVERAGED_CELL_TEMPERATURE};

const AMBIENT: &str = "Ambient temperature";

/// Ohmic heating `i^2 R`, the heat source shared by every non-isothermal model.
fn ohmic_heating(arena: &mut ExprArena, variables: &Variables) -> Result<ExprId, CouplingError> {
    let i = variables.require(TOTAL_CURRENT_DENSITY)?;
    let r = arena.parameter("Effective cell resistance");
    let i2 = arena.multiply(i, i);
    Ok(arena.multiply(i2, r))
}

/// Newton cooling `h (T - T_amb)` with coefficient `coefficient`.
fn cooling(arena: &mut ExprArena, coefficient: &str, t: ExprId) -> ExprId {
    let h = arena.parameter(coefficient);
    let ambient = arena.parameter(AMBIENT);
    let excess = arena.subtract(t, ambient);
    arena.multiply(h, excess)
}

fn ambient_initial_condition(arena: &mut ExprArena) -> EquationMap {
    let ambient = arena.parameter(AMBIENT);
    [(CELL_TEMPERATURE.to_string(), ambient)].into_iter().collect()
}

/// Constant temperature equal to the ambient temperature.
#[derive(Debug, Default)]
pub struct Isothermal;

impl Submodel for Isothermal {
    fn name(&self) -> &str {
        "isothermal"
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let t = arena.parameter(AMBIENT);
        Variables::new()
            .with(CELL_TEMPERATURE, t)
            .with(X_AVERAGED_CELL_TEMPERATURE, t)
    }
}

/// One temperature for the whole cell, optionally cooled through the
/// current-collector tabs as well as the cell surface.
#[derive(Debug)]
pub struct Lumped {
    include_current_collector: bool,
}

impl Lumped {
    /// A lumped model; `include_current_collector` adds tab cooling.
    pub fn new(include_current_collector: bool) -> Self {
        Self {
            include_current_collector,
        }
    }
}

impl Submodel for Lumped {
    fn name(&self) -> &str {
        if self.include_current_collector {
            "lumped thermal with current collectors"
        } else {
            "lumped thermal"
        }
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let t = arena.variable(VariableRef::new(CELL_TEMPERATURE));
        Variables::new()
            .with(CELL_TEMPERATURE, t)
            .with(X_AVERAGED_CELL_TEMPERATURE, t)
    }

    fn set_rhs(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let t = variables.require(CELL_TEMPERATURE)?;
        let heat = ohmic_heating(arena, variables)?;
        let mut loss = cooling(arena, "Cell cooling coefficient", t);
        if self.include_current_collector {
            let tabs = cooling(arena, "Current collector cooling coefficient", t);
            loss = arena.add(loss, tabs);
        }
        let net = arena.subtract(heat, loss);
        let capacity = arena.parameter("Cell heat capacity");
        let rhs = arena.divide(net, capacity);
        Ok([(CELL_TEMPERATURE.to_string(), rhs)].into_iter().collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        Ok(ambient_initial_condition(arena))
    }
}

/// Temperature resolved through the cell thickness.
#[derive(Debug, Default)]
pub struct XFull;

impl Submodel for XFull {
    fn name(&self) -> &str {
        "x-full thermal"
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let t = arena.variable(
            VariableRef::new(CELL_TEMPERATURE)
                .on_domains(&Domain::WHOLE_CELL)
                .with_secondary(Domain::CurrentCollector),
        );
        let t_av = arena.x_average(t);
        Variables::new()
            .with(CELL_TEMPERATURE, t)
            .with(X_AVERAGED_CELL_TEMPERATURE, t_av)
    }

    fn set_rhs(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let t = variables.require(CELL_TEMPERATURE)?;
        let heat = ohmic_heating(arena, variables)?;
        let lambda = arena.parameter("Cell thermal conductivity");
        let grad = arena.gradient(t);
        let flux = arena.multiply(lambda, grad);
        let conduction = arena.divergence(flux);
        let net = arena.add(conduction, heat);
        let capacity = arena.parameter("Cell heat capacity");
        let rhs = arena.divide(net, capacity);
        Ok([(CELL_TEMPERATURE.to_string(), rhs)].into_iter().collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        Ok(ambient_initial_condition(arena))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isothermal_defines_both_names_as_ambient() {
        let mut arena = ExprArena::new();
        let vars = Isothermal.fundamental_variables(&mut arena);
        assert_eq!(vars.get(CELL_TEMPERATURE), vars.get(X_AVERAGED_CELL_TEMPERATURE));
        assert_eq!(
            arena.display(vars.require(CELL_TEMPERATURE).unwrap()).to_string(),
            AMBIENT
        );
    }

    #[test]
    fn tab_cooling_adds_a_second_loss() {
        let mut arena = ExprArena::new();
        let i = arena.parameter("i");
        let model = Lumped::new(true);
        let vars = model
            .fundamental_variables(&mut arena)
            .with(TOTAL_CURRENT_DENSITY, i);
        let rhs = model.set_rhs(&mut arena, &vars).unwrap();
        let rendered = arena.display(rhs[CELL_TEMPERATURE]).to_string();
        assert!(rendered.contains("Current collector cooling coefficient"));
        assert!(rendered.contains("Cell cooling coefficient"));

        let without = Lumped::new(false).set_rhs(&mut arena, &vars).unwrap();
        let rendered = arena.display(without[CELL_TEMPERATURE]).to_string();
        assert!(!rendered.contains("Current collector"));
    }

    #[test]
    fn x_averaged_temperature_is_derived_from_the_state() {
        let mut arena = ExprArena::new();
        let vars = XFull.fundamental_variables(&mut arena);
        let t_av = vars.require(X_AVERAGED_CELL_TEMPERATURE).unwrap();
        assert_eq!(
            arena.display(t_av).to_string(),
            format!("x_average({CELL_TEMPERATURE})")
        );
        let state = VariableRef::new(CELL_TEMPERATURE)
            .on_domains(&Domain::WHOLE_CELL)
            .with_secondary(Domain::CurrentCollector);
        assert_eq!(arena.variables(t_av), vec![state]);
    }

    #[test]
    fn heating_needs_the_current() {
        let mut arena = ExprArena::new();
        let vars = XFull.fundamental_variables(&mut arena);
        assert!(XFull.set_rhs(&mut arena, &vars).is_err());
    }
}
