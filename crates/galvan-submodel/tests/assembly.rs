use std::sync::atomic::Ordering;

use galvan_core::{Domain, ModelError};
use galvan_expr::{ExprArena, VariableRef};
use galvan_submodel::{assemble, SubmodelRegistry};
use galvan_test_utils::{CountingSubmodel, ProvidesVariable, RequiresVariable, StateSubmodel};

fn particle(name: &str) -> VariableRef {
    VariableRef::new(name)
        .on(Domain::NegativeParticle)
        .with_secondary(Domain::CurrentCollector)
}

#[test]
fn chain_of_requirements_resolves_in_reverse_registration_order() {
    let mut reg = SubmodelRegistry::new();
    reg.insert("c", Box::new(RequiresVariable::new("c", "b", "c")));
    reg.insert("b", Box::new(RequiresVariable::new("b", "a", "b")));
    reg.insert("a", Box::new(ProvidesVariable::scalar("a", "a", 3.0)));

    let mut arena = ExprArena::new();
    let out = assemble(&reg, &mut arena).unwrap();
    assert_eq!(out.variables.get("c"), out.variables.get("a"));
    assert_eq!(out.provenance.get("c").map(String::as_str), Some("c"));
}

#[test]
fn stalled_coupling_stops_after_an_unproductive_pass() {
    let counting = CountingSubmodel::new("counting", "never defined");
    let counter = counting.counter();
    let mut reg = SubmodelRegistry::new();
    reg.insert("source", Box::new(ProvidesVariable::scalar("source", "x", 1.0)));
    reg.insert("counting", Box::new(counting));

    let err = assemble(&reg, &mut ExprArena::new()).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnsatisfiedSubmodel {
            submodel: "counting".into(),
            variable: "never defined".into(),
        }
    );
    // Once in the productive first pass, once in the stalled second.
    assert_eq!(counter.load(Ordering::Relaxed), 2);
}

#[test]
fn missing_initial_condition_is_reported() {
    let mut reg = SubmodelRegistry::new();
    reg.insert(
        "particle",
        Box::new(StateSubmodel::new("particle", particle("c_n")).without_initial_condition()),
    );
    let err = assemble(&reg, &mut ExprArena::new()).unwrap_err();
    assert_eq!(
        err,
        ModelError::MissingInitialCondition {
            variable: "c_n".into()
        }
    );
}

#[test]
fn state_variables_skip_derived_names() {
    let mut reg = SubmodelRegistry::new();
    reg.insert("first", Box::new(StateSubmodel::new("first", particle("c_n"))));
    reg.insert(
        "second",
        Box::new(RequiresVariable::new("second", "c_n", "c_n alias")),
    );
    reg.insert("third", Box::new(StateSubmodel::new("third", particle("c_p"))));
    let mut arena = ExprArena::new();
    let out = assemble(&reg, &mut arena).unwrap();
    assert_eq!(out.state_variables(&arena), vec![particle("c_n"), particle("c_p")]);

    let mut clash = SubmodelRegistry::new();
    clash.insert("first", Box::new(StateSubmodel::new("first", particle("c_n"))));
    clash.insert(
        "second",
        Box::new(StateSubmodel::new("second", particle("c_n"))),
    );
    let err = assemble(&clash, &mut ExprArena::new()).unwrap_err();
    assert!(matches!(err, ModelError::DuplicateVariable { .. }));
}

#[test]
fn registry_is_untouched_by_a_failed_assembly() {
    let mut reg = SubmodelRegistry::new();
    reg.insert("needs", Box::new(RequiresVariable::new("needs", "x", "y")));
    assert!(assemble(&reg, &mut ExprArena::new()).is_err());
    assert_eq!(reg.keys().collect::<Vec<_>>(), vec!["needs"]);
    reg.insert("x", Box::new(ProvidesVariable::scalar("x", "x", 0.0)));
    assert!(assemble(&reg, &mut ExprArena::new()).is_ok());
}

/// Sets a second rhs for a variable another submodel owns.
struct ExtraRhs;

impl galvan_submodel::Submodel for ExtraRhs {
    fn name(&self) -> &str {
        "extra rhs"
    }

    fn set_rhs(
        &self,
        arena: &mut ExprArena,
        variables: &galvan_submodel::Variables,
    ) -> Result<galvan_submodel::EquationMap, galvan_submodel::CouplingError> {
        let c = variables.require("c_n")?;
        Ok([("c_n".to_string(), arena.negate(c))].into_iter().collect())
    }
}

#[test]
fn duplicate_equation_names_both_submodels() {
    let mut reg = SubmodelRegistry::new();
    reg.insert("particle", Box::new(StateSubmodel::new("particle", particle("c_n"))));
    reg.insert("extra", Box::new(ExtraRhs));
    let err = assemble(&reg, &mut ExprArena::new()).unwrap_err();
    assert_eq!(
        err,
        ModelError::DuplicateEquation {
            variable: "c_n".into(),
            first: "particle".into(),
            second: "extra".into(),
        }
    );
}
