//! Assembling a registry into a composite model.
//!
//! [`assemble`] runs once per model build. It reads the registry without
//! modifying it and returns either a complete [`Assembly`] or the first
//! structural error, so a failed build has nothing to roll back.

use galvan_core::ModelError;
use galvan_expr::{ExprArena, Node, VariableRef};
use indexmap::IndexMap;

use crate::registry::SubmodelRegistry;
use crate::submodel::{EquationMap, Submodel};
use crate::variables::{CouplingError, Equations, Variables};

/// The composite model produced by [`assemble`].
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct Assembly {
    /// Every variable defined by any submodel.
    pub variables: Variables,
    /// Every equation set by any submodel.
    pub equations: Equations,
    /// Registry key of the submodel that defined each variable.
    pub provenance: IndexMap<String, String>,
}

impl Assembly {
    /// The symbolic variables governed by an rhs or algebraic equation,
    /// rhs first, in registry order.
    ///
    /// Names whose definition is not a bare `Variable` node are skipped;
    /// they have no slice of their own in the state vector.
    pub fn state_variables(&self, arena: &ExprArena) -> Vec<VariableRef> {
        self.equations
            .state_names()
            .filter_map(|name| self.variables.get(name))
            .filter_map(|id| match arena.node(id) {
                Node::Variable(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }
}

// ── Assembly ───────────────────────────────────────────────────────

/// Collect every submodel's contribution into one [`Assembly`].
///
/// Steps, in order:
///
/// 1. The registry is non-empty.
/// 2. Fundamental variables from every submodel, in registry order.
/// 3. Coupled variables by fixed-point iteration: each pass visits the
///    submodels still pending in registry order; one that reports a
///    missing variable is retried on the next pass. A pass that couples
///    nobody fails with the first pending submodel.
/// 4. Rhs, algebraic, and initial-condition equations.
/// 5. Every rhs and algebraic variable has an initial condition.
///
/// Any variable or equation defined twice fails with both submodels named.
pub fn assemble(
    registry: &SubmodelRegistry,
    arena: &mut ExprArena,
) -> Result<Assembly, ModelError> {
    if registry.is_empty() {
        return Err(ModelError::NoSubmodels);
    }

    let mut out = Assembly::default();

    for (key, submodel) in registry.iter() {
        let vars = submodel.fundamental_variables(arena);
        merge_variables(&mut out, key, vars)?;
    }

    couple(registry, arena, &mut out)?;

    let mut owners: [IndexMap<String, String>; 3] = Default::default();
    for (key, submodel) in registry.iter() {
        let rhs = equations_of(key, submodel.set_rhs(arena, &out.variables))?;
        let algebraic = equations_of(key, submodel.set_algebraic(arena, &out.variables))?;
        let initial = equations_of(key, submodel.set_initial_conditions(arena, &out.variables))?;

        let [rhs_owners, algebraic_owners, initial_owners] = &mut owners;
        merge_equations(&mut out.equations.rhs, rhs_owners, key, rhs)?;
        merge_equations(&mut out.equations.algebraic, algebraic_owners, key, algebraic)?;
        merge_equations(
            &mut out.equations.initial_conditions,
            initial_owners,
            key,
            initial,
        )?;
    }

    if let Some(name) = out
        .equations
        .state_names()
        .find(|name| !out.equations.initial_conditions.contains_key(*name))
    {
        return Err(ModelError::MissingInitialCondition {
            variable: name.to_string(),
        });
    }

    Ok(out)
}

fn couple(
    registry: &SubmodelRegistry,
    arena: &mut ExprArena,
    out: &mut Assembly,
) -> Result<(), ModelError> {
    let mut pending: Vec<(&str, &dyn Submodel)> = registry.iter().collect();
    let mut pass = 0usize;

    while !pending.is_empty() {
        pass += 1;
        let mut still_pending = Vec::with_capacity(pending.len());
        let mut first_missing: Option<(String, String)> = None;

        for (key, submodel) in pending.iter().copied() {
            match submodel.coupled_variables(arena, &out.variables) {
                Ok(vars) => merge_variables(out, key, vars)?,
                Err(CouplingError::MissingVariable { variable }) => {
                    first_missing.get_or_insert_with(|| (key.to_string(), variable));
                    still_pending.push((key, submodel));
                }
            }
        }

        tracing::debug!(
            pass,
            coupled = pending.len() - still_pending.len(),
            pending = still_pending.len(),
            "coupling pass"
        );

        if still_pending.len() == pending.len() {
            if let Some((submodel, variable)) = first_missing {
                return Err(ModelError::UnsatisfiedSubmodel { submodel, variable });
            }
        }
        pending = still_pending;
    }
    Ok(())
}

fn merge_variables(out: &mut Assembly, key: &str, vars: Variables) -> Result<(), ModelError> {
    for (name, id) in vars.iter() {
        if let Some(first) = out.provenance.get(name) {
            return Err(ModelError::DuplicateVariable {
                variable: name.to_string(),
                first: first.clone(),
                second: key.to_string(),
            });
        }
        out.variables.insert(name, id);
        out.provenance.insert(name.to_string(), key.to_string());
    }
    Ok(())
}

fn equations_of(
    key: &str,
    result: Result<EquationMap, CouplingError>,
) -> Result<EquationMap, ModelError> {
    result.map_err(
        |CouplingError::MissingVariable { variable }| ModelError::UnsatisfiedSubmodel {
            submodel: key.to_string(),
            variable,
        },
    )
}

fn merge_equations(
    target: &mut EquationMap,
    owners: &mut IndexMap<String, String>,
    key: &str,
    incoming: EquationMap,
) -> Result<(), ModelError> {
    for (name, id) in incoming {
        if let Some(first) = owners.get(&name) {
            return Err(ModelError::DuplicateEquation {
                variable: name,
                first: first.clone(),
                second: key.to_string(),
            });
        }
        owners.insert(name.clone(), key.to_string());
        target.insert(name, id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvan_core::Domain;

    /// Defines `state` as a variable with `d(state)/dt = -state`.
    struct Decay {
        state: &'static str,
    }

    impl Submodel for Decay {
        fn name(&self) -> &str {
            "decay"
        }
        fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
            let v = arena.variable(VariableRef::new(self.state).on(Domain::NegativeParticle));
            Variables::new().with(self.state, v)
        }
        fn set_rhs(
            &self,
            arena: &mut ExprArena,
            variables: &Variables,
        ) -> Result<EquationMap, CouplingError> {
            let v = variables.require(self.state)?;
            let rhs = arena.negate(v);
            Ok([(self.state.to_string(), rhs)].into_iter().collect())
        }
        fn set_initial_conditions(
            &self,
            arena: &mut ExprArena,
            _variables: &Variables,
        ) -> Result<EquationMap, CouplingError> {
            Ok([(self.state.to_string(), arena.scalar(1.0))].into_iter().collect())
        }
    }

    /// Defines `output = 2 * input` once `input` exists.
    struct Doubler {
        input: &'static str,
        output: &'static str,
    }

    impl Submodel for Doubler {
        fn name(&self) -> &str {
            "doubler"
        }
        fn coupled_variables(
            &self,
            arena: &mut ExprArena,
            variables: &Variables,
        ) -> Result<Variables, CouplingError> {
            let input = variables.require(self.input)?;
            let two = arena.scalar(2.0);
            Ok(Variables::new().with(self.output, arena.multiply(two, input)))
        }
    }

    fn boxed(s: impl Submodel) -> Box<dyn Submodel> {
        Box::new(s)
    }

    fn registry(entries: Vec<(&str, Box<dyn Submodel>)>) -> SubmodelRegistry {
        let mut reg = SubmodelRegistry::new();
        for (k, s) in entries {
            reg.insert(k, s);
        }
        reg
    }

    #[test]
    fn empty_registry_rejected() {
        let err = assemble(&SubmodelRegistry::new(), &mut ExprArena::new()).unwrap_err();
        assert_eq!(err, ModelError::NoSubmodels);
    }

    #[test]
    fn coupling_resolves_out_of_order_dependencies() {
        // "b" needs "a2", which "a" only defines after coupling on "x".
        let reg = registry(vec![
            ("b", boxed(Doubler { input: "a2", output: "b2" })),
            ("a", boxed(Doubler { input: "x", output: "a2" })),
            ("state", boxed(Decay { state: "x" })),
        ]);
        let mut arena = ExprArena::new();
        let out = assemble(&reg, &mut arena).unwrap();
        assert_eq!(out.variables.names().collect::<Vec<_>>(), vec!["x", "a2", "b2"]);
        assert_eq!(out.provenance.get("b2").map(String::as_str), Some("b"));
        assert_eq!(arena.display(out.variables.get("b2").unwrap()).to_string(), "2 * (2 * x)");
    }

    #[test]
    fn unsatisfied_requirement_names_submodel_and_variable() {
        let reg = registry(vec![
            ("state", boxed(Decay { state: "x" })),
            ("needs", boxed(Doubler { input: "missing", output: "y" })),
        ]);
        let err = assemble(&reg, &mut ExprArena::new()).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnsatisfiedSubmodel {
                submodel: "needs".into(),
                variable: "missing".into()
            }
        );
        assert!(err.to_string().contains("Submodel"));
    }

    #[test]
    fn duplicate_variable_names_both_owners() {
        let reg = registry(vec![
            ("first", boxed(Decay { state: "x" })),
            ("second", boxed(Decay { state: "x" })),
        ]);
        let err = assemble(&reg, &mut ExprArena::new()).unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateVariable {
                variable: "x".into(),
                first: "first".into(),
                second: "second".into()
            }
        );
    }

    #[test]
    fn state_variables_follow_rhs_keys() {
        let reg = registry(vec![
            ("x", boxed(Decay { state: "x" })),
            ("y", boxed(Decay { state: "y" })),
        ]);
        let mut arena = ExprArena::new();
        let out = assemble(&reg, &mut arena).unwrap();
        let names: Vec<String> = out
            .state_variables(&arena)
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(out.equations.initial_conditions.len(), 2);
    }
}
