//! Reactions at the electrode/electrolyte interface.

use galvan_core::{Domain, ExprId, SurfaceForm};
use galvan_expr::{ExprArena, VariableRef};
use galvan_submodel::{CouplingError, EquationMap, Submodel, Variables};

use crate::names::{Electrode, TOTAL_CURRENT_DENSITY};

/// Push `sign * i / l` for `electrode`: the through-cell current spread
/// evenly over the electrode thickness.
fn averaged_current(arena: &mut ExprArena, electrode: Electrode, i: ExprId) -> ExprId {
    let l = arena.parameter(electrode.thickness());
    let per_length = arena.divide(i, l);
    if electrode.current_sign() < 0.0 {
        arena.negate(per_length)
    } else {
        per_length
    }
}

/// Leading-order reaction: the interfacial current is uniform through the
/// electrode and the surface potential difference sits at open circuit.
#[derive(Debug)]
pub struct LeadingOrderReaction {
    electrode: Electrode,
    name: String,
}

impl LeadingOrderReaction {
    /// The reaction model for `electrode`.
    pub fn new(electrode: Electrode) -> Self {
        Self {
            electrode,
            name: format!("{} leading-order reaction", electrode.as_str()),
        }
    }
}

impl Submodel for LeadingOrderReaction {
    fn name(&self) -> &str {
        &self.name
    }

    fn coupled_variables(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        let i = variables.require(TOTAL_CURRENT_DENSITY)?;
        let j = averaged_current(arena, self.electrode, i);
        let ocp = arena.parameter(self.electrode.parameter("electrode open-circuit potential"));
        Ok(Variables::new()
            .with(self.electrode.interfacial_current(), j)
            .with(self.electrode.surface_potential_difference(), ocp))
    }
}

/// Surface-form reaction: the surface potential difference is a state of
/// its own, driven by the mismatch between applied and reaction currents.
#[derive(Debug)]
pub struct SurfaceFormReaction {
    electrode: Electrode,
    form: SurfaceForm,
    name: String,
}

impl SurfaceFormReaction {
    /// The surface-form model for `electrode`.
    ///
    /// Returns `None` for [`SurfaceForm::Off`], which is handled by
    /// [`LeadingOrderReaction`].
    pub fn new(electrode: Electrode, form: SurfaceForm) -> Option<Self> {
        let kind = match form {
            SurfaceForm::Off => return None,
            SurfaceForm::Differential => "differential",
            SurfaceForm::Algebraic => "algebraic",
        };
        Some(Self {
            electrode,
            form,
            name: format!("{} {kind} surface form", electrode.as_str()),
        })
    }

    fn potential(&self) -> VariableRef {
        VariableRef::new(self.electrode.surface_potential_difference()).on(Domain::CurrentCollector)
    }

    /// `applied - reaction`, with the reaction current linearised about
    /// open circuit.
    fn imbalance(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<ExprId, CouplingError> {
        let j = variables.require(&self.electrode.interfacial_current())?;
        let dphi = variables.require(&self.electrode.surface_potential_difference())?;
        let j0 = arena.parameter(self.electrode.parameter("electrode exchange-current density"));
        let ocp = arena.parameter(self.electrode.parameter("electrode open-circuit potential"));
        let overpotential = arena.subtract(dphi, ocp);
        let reaction = arena.multiply(j0, overpotential);
        Ok(arena.subtract(j, reaction))
    }
}

impl Submodel for SurfaceFormReaction {
    fn name(&self) -> &str {
        &self.name
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let dphi = arena.variable(self.potential());
        Variables::new().with(self.electrode.surface_potential_difference(), dphi)
    }

    fn coupled_variables(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        let i = variables.require(TOTAL_CURRENT_DENSITY)?;
        let j = averaged_current(arena, self.electrode, i);
        Ok(Variables::new().with(self.electrode.interfacial_current(), j))
    }

    fn set_rhs(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        if self.form != SurfaceForm::Differential {
            return Ok(EquationMap::new());
        }
        let imbalance = self.imbalance(arena, variables)?;
        let c_dl = arena.parameter(self.electrode.parameter("electrode double-layer capacity"));
        let rhs = arena.divide(imbalance, c_dl);
        Ok([(self.electrode.surface_potential_difference(), rhs)]
            .into_iter()
            .collect())
    }

    fn set_algebraic(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        if self.form != SurfaceForm::Algebraic {
            return Ok(EquationMap::new());
        }
        let residual = self.imbalance(arena, variables)?;
        Ok([(self.electrode.surface_potential_difference(), residual)]
            .into_iter()
            .collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let ocp = arena.parameter(self.electrode.parameter("electrode open-circuit potential"));
        Ok([(self.electrode.surface_potential_difference(), ocp)]
            .into_iter()
            .collect())
    }
}
