//! Named contributions a submodel hands to the assembler.

use std::error::Error;
use std::fmt;

use galvan_core::ExprId;
use indexmap::IndexMap;

/// A submodel could not produce its contribution because a variable it
/// reads is not defined yet.
///
/// During coupling the assembler treats this as "retry later"; once no
/// submodel can make progress it becomes a
/// [`ModelError::UnsatisfiedSubmodel`](galvan_core::ModelError::UnsatisfiedSubmodel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CouplingError {
    /// The named variable is not in the model.
    MissingVariable {
        /// Variable name.
        variable: String,
    },
}

impl fmt::Display for CouplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable { variable } => {
                write!(f, "variable '{variable}' is not defined")
            }
        }
    }
}

impl Error for CouplingError {}

/// Ordered map from variable name to its defining expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variables {
    entries: IndexMap<String, ExprId>,
}

impl Variables {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name`, returning the previous definition if any.
    pub fn insert(&mut self, name: impl Into<String>, expr: ExprId) -> Option<ExprId> {
        self.entries.insert(name.into(), expr)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, expr: ExprId) -> Self {
        self.insert(name, expr);
        self
    }

    /// Look up a definition.
    pub fn get(&self, name: &str) -> Option<ExprId> {
        self.entries.get(name).copied()
    }

    /// Look up a definition a submodel cannot do without.
    pub fn require(&self, name: &str) -> Result<ExprId, CouplingError> {
        self.get(name).ok_or_else(|| CouplingError::MissingVariable {
            variable: name.to_string(),
        })
    }

    /// Whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no definitions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ExprId)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Variable names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, ExprId)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, ExprId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Equations keyed by the name of the variable they govern.
///
/// `rhs` holds `d(var)/dt = expr`, `algebraic` holds `0 = expr`, and
/// `initial_conditions` holds `var(0) = expr`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Equations {
    /// Time-derivative equations.
    pub rhs: IndexMap<String, ExprId>,
    /// Algebraic constraints.
    pub algebraic: IndexMap<String, ExprId>,
    /// Initial values.
    pub initial_conditions: IndexMap<String, ExprId>,
}

impl Equations {
    /// No equations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of equations of every kind.
    pub fn len(&self) -> usize {
        self.rhs.len() + self.algebraic.len() + self.initial_conditions.len()
    }

    /// Whether there are no equations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the variables governed by a differential or algebraic
    /// equation, rhs first.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.rhs
            .keys()
            .chain(self.algebraic.keys())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_names_the_missing_variable() {
        let vars: Variables = [("a", ExprId(0))].into_iter().collect();
        assert_eq!(vars.require("a"), Ok(ExprId(0)));
        let err = vars.require("Total current density").unwrap_err();
        assert_eq!(
            err.to_string(),
            "variable 'Total current density' is not defined"
        );
    }

    #[test]
    fn definition_order_is_kept() {
        let vars = Variables::new()
            .with("z", ExprId(2))
            .with("a", ExprId(0))
            .with("m", ExprId(1));
        assert_eq!(vars.names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn state_names_list_rhs_before_algebraic() {
        let mut eqs = Equations::new();
        eqs.algebraic.insert("phi".into(), ExprId(1));
        eqs.rhs.insert("c".into(), ExprId(0));
        eqs.initial_conditions.insert("c".into(), ExprId(2));
        assert_eq!(eqs.state_names().collect::<Vec<_>>(), vec!["c", "phi"]);
        assert_eq!(eqs.len(), 3);
    }
}
