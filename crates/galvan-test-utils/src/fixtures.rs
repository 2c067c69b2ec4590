//! Reusable submodel test fixtures.
//!
//! - [`ProvidesVariable`] defines one variable up front.
//! - [`RequiresVariable`] derives one variable from another during coupling.
//! - [`StateSubmodel`] owns a state variable with an rhs and, optionally,
//!   an initial condition.
//! - [`CountingSubmodel`] counts how often it is asked to couple.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use galvan_core::Domain;
use galvan_expr::{ExprArena, VariableRef};
use galvan_submodel::{CouplingError, EquationMap, Submodel, Variables};

/// Defines `variable` as a fundamental variable.
///
/// With a domain the definition is a symbolic `Variable` node on it;
/// without one it is `Scalar(value)`.
pub struct ProvidesVariable {
    pub name: String,
    pub variable: String,
    pub domain: Option<Domain>,
    pub value: f64,
}

impl ProvidesVariable {
    /// A scalar definition.
    pub fn scalar(name: impl Into<String>, variable: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            variable: variable.into(),
            domain: None,
            value,
        }
    }

    /// A symbolic definition on `domain`.
    pub fn on(name: impl Into<String>, variable: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            variable: variable.into(),
            domain: Some(domain),
            value: 0.0,
        }
    }
}

impl Submodel for ProvidesVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let id = match self.domain {
            Some(domain) => arena.variable(VariableRef::new(self.variable.as_str()).on(domain)),
            None => arena.scalar(self.value),
        };
        Variables::new().with(self.variable.as_str(), id)
    }
}

/// Defines `output = input` once `input` is available.
pub struct RequiresVariable {
    pub name: String,
    pub input: String,
    pub output: String,
}

impl RequiresVariable {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

impl Submodel for RequiresVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn coupled_variables(
        &self,
        _arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        let input = variables.require(&self.input)?;
        Ok(Variables::new().with(self.output.as_str(), input))
    }
}

/// Owns `variable` on `domain` with `d(variable)/dt = -variable`.
///
/// The initial condition `variable(0) = 1` is set unless
/// [`without_initial_condition`](StateSubmodel::without_initial_condition)
/// was called.
pub struct StateSubmodel {
    pub name: String,
    pub variable: VariableRef,
    pub initial_condition: bool,
}

impl StateSubmodel {
    pub fn new(name: impl Into<String>, variable: VariableRef) -> Self {
        Self {
            name: name.into(),
            variable,
            initial_condition: true,
        }
    }

    /// Leave the initial condition unset.
    pub fn without_initial_condition(mut self) -> Self {
        self.initial_condition = false;
        self
    }
}

impl Submodel for StateSubmodel {
    fn name(&self) -> &str {
        &self.name
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let id = arena.variable(self.variable.clone());
        Variables::new().with(self.variable.name.as_str(), id)
    }

    fn set_rhs(
        &self,
        arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        let v = variables.require(&self.variable.name)?;
        let rhs = arena.negate(v);
        Ok([(self.variable.name.clone(), rhs)].into_iter().collect())
    }

    fn set_initial_conditions(
        &self,
        arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        if !self.initial_condition {
            return Ok(EquationMap::new());
        }
        let one = arena.scalar(1.0);
        Ok([(self.variable.name.clone(), one)].into_iter().collect())
    }
}

/// Requires `input` and counts every coupling attempt.
///
/// The counter is shared, so a test can keep a [`counter`](Self::counter)
/// handle after the submodel has been moved into a registry.
pub struct CountingSubmodel {
    pub name: String,
    pub input: String,
    calls: Arc<AtomicUsize>,
}

impl CountingSubmodel {
    pub fn new(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times `coupled_variables()` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Shared handle on the call counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Submodel for CountingSubmodel {
    fn name(&self) -> &str {
        &self.name
    }

    fn coupled_variables(
        &self,
        _arena: &mut ExprArena,
        variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        variables.require(&self.input)?;
        Ok(Variables::new())
    }
}
