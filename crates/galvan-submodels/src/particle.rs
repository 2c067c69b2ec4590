//! Lithium transport inside electrode particles.
//!
//! Both submodels track one representative particle per electrode,
//! averaged through the electrode thickness but still varying over the
//! current collector.

use galvan_core::Domain;
use galvan_expr::{ExprArena, VariableRef};
use galvan_submodel::{CouplingError, EquationMap, Submodel, Variables};

use crate::names::Electrode;

/// Radial Fickian diffusion in a single particle.
#[derive(Debug)]
pub struct FickianSingleParticle {
    electrode: Electrode,
    name: String,
}

impl FickianSingleParticle {
    /// The particle model for `electrode`.
    pub fn new(electrode: Electrode) -> Self {
        Self {
            electrode,
            name: format!("{} Fickian single particle", electrode.as_str()),
        }
    }

    /// The concentration variable: primary domain the particle, secondary
    /// domain the current collector.
    pub fn concentration(&self) -> VariableRef {
        VariableRef::new(self.electrode.particle_concentration())
            .on(self.electrode.particle_domain())
            .with_secondary(Domain::CurrentCollector)
    }
}

impl Submodel for FickianSingleParticle {
    fn name(&self) -> &str {
        &self.name
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let c = arena.variable(self.concentration());
        Variables::new()
            .with(self.electrode.particle_concentration(), c)
            .with(self.electrode.particle_surface_concentration(), c)
    }

    fn set_rhs(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let name = self.electrode.particle_concentration();
        let c = variables.require(&name)?;
        // dc/dt = div(D grad(c))
        let d = arena.parameter(self.electrode.parameter("particle diffusivity"));
        let grad = arena.gradient(c);
        let flux = arena.multiply(d, grad);
        let rhs = arena.divergence(flux);
        Ok([(name, rhs)].into_iter().collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let c0 = arena.parameter(format!(
            "Initial concentration in {} electrode",
            self.electrode.as_str()
        ));
        Ok([(self.electrode.particle_concentration(), c0)]
            .into_iter()
            .collect())
    }
}

/// Instantaneous radial diffusion: the particle concentration is uniform
/// and changes only through the interfacial current.
#[derive(Debug)]
pub struct FastSingleParticle {
    electrode: Electrode,
    name: String,
}

impl FastSingleParticle {
    /// The particle model for `electrode`.
    pub fn new(electrode: Electrode) -> Self {
        Self {
            electrode,
            name: format!("{} fast single particle", electrode.as_str()),
        }
    }

    /// The concentration variable, on the current collector only.
    pub fn concentration(&self) -> VariableRef {
        VariableRef::new(self.electrode.particle_concentration()).on(Domain::CurrentCollector)
    }
}

impl Submodel for FastSingleParticle {
    fn name(&self) -> &str {
        &self.name
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let c = arena.variable(self.concentration());
        Variables::new()
            .with(self.electrode.particle_concentration(), c)
            .with(self.electrode.particle_surface_concentration(), c)
    }

    fn set_rhs(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let name = self.electrode.particle_concentration();
        variables.require(&name)?;
        let j = variables.require(&self.electrode.interfacial_current())?;
        // dc/dt = -3 j / R
        let three = arena.scalar(-3.0);
        let r = arena.parameter(self.electrode.parameter("particle radius"));
        let scaled = arena.multiply(three, j);
        let rhs = arena.divide(scaled, r);
        Ok([(name, rhs)].into_iter().collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let c0 = arena.parameter(format!(
            "Initial concentration in {} electrode",
            self.electrode.as_str()
        ));
        Ok([(self.electrode.particle_concentration(), c0)]
            .into_iter()
            .collect())
    }
}
