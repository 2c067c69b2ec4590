//! Electrolyte transport.

use galvan_expr::ExprArena;
use galvan_submodel::{Submodel, Variables};

use crate::names::ELECTROLYTE_CONCENTRATION;

/// Electrolyte concentration held at its initial value.
#[derive(Debug, Default)]
pub struct ConstantConcentration;

impl Submodel for ConstantConcentration {
    fn name(&self) -> &str {
        "constant electrolyte concentration"
    }

    fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
        let c = arena.parameter("Initial electrolyte concentration");
        Variables::new().with(ELECTROLYTE_CONCENTRATION, c)
    }
}
