//! The [`Submodel`] trait.
//!
//! A submodel covers one physical phenomenon (particle diffusion, heat
//! generation, current-collector potentials, ...). It never sees the
//! other submodels directly: it reads their output through the shared
//! [`Variables`] map and reports what it defines in return.

use galvan_expr::ExprArena;
use indexmap::IndexMap;

use galvan_core::ExprId;

use crate::variables::{CouplingError, Variables};

/// Equations of one kind contributed by one submodel.
pub type EquationMap = IndexMap<String, ExprId>;

/// A self-contained contributor of variables and equations.
///
/// # Contract
///
/// - Every method is deterministic: the same arena contents and the same
///   `variables` yield structurally equal contributions.
/// - [`coupled_variables`](Submodel::coupled_variables) may be called more
///   than once during a build. It returns
///   [`CouplingError::MissingVariable`] if something it reads is not
///   defined yet; the assembler retries it after the other submodels.
/// - Nodes pushed into the arena by a call that then fails are left as
///   unreferenced garbage.
///
/// # Object safety
///
/// This trait is object-safe; the registry stores submodels as
/// `Box<dyn Submodel>`.
///
/// # Examples
///
/// A submodel that defines a constant temperature:
///
/// ```
/// use galvan_expr::ExprArena;
/// use galvan_submodel::{Submodel, Variables};
///
/// struct FixedTemperature(f64);
///
/// impl Submodel for FixedTemperature {
///     fn name(&self) -> &str { "fixed temperature" }
///
///     fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
///         Variables::new().with("Cell temperature", arena.scalar(self.0))
///     }
/// }
///
/// let mut arena = ExprArena::new();
/// let vars = FixedTemperature(298.15).fundamental_variables(&mut arena);
/// assert!(vars.contains("Cell temperature"));
/// ```
pub trait Submodel: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Variables this submodel defines without reading any other
    /// submodel's output, typically its state variables.
    fn fundamental_variables(&self, _arena: &mut ExprArena) -> Variables {
        Variables::new()
    }

    /// Variables derived from what other submodels define.
    fn coupled_variables(
        &self,
        _arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<Variables, CouplingError> {
        Ok(Variables::new())
    }

    /// Time derivatives of this submodel's state variables.
    fn set_rhs(
        &self,
        _arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        Ok(EquationMap::new())
    }

    /// Algebraic constraints on this submodel's state variables.
    fn set_algebraic(
        &self,
        _arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        Ok(EquationMap::new())
    }

    /// Initial values of this submodel's state variables.
    fn set_initial_conditions(
        &self,
        _arena: &mut ExprArena,
        _variables: &Variables,
    ) -> Result<EquationMap, CouplingError> {
        Ok(EquationMap::new())
    }
}
