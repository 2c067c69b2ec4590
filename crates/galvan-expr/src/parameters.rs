//! Parameter tables: name → numeric value or sub-expression.

use galvan_core::{ExprId, ParameterError};
use indexmap::IndexMap;
use serde::Deserialize;

/// The value a parameter resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterValue {
    /// A number; becomes a `Scalar` node.
    Scalar(f64),
    /// A sub-expression in the arena the table is used with. It is itself
    /// processed, so it may mention further parameters.
    Expression(ExprId),
}

impl From<f64> for ParameterValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<ExprId> for ParameterValue {
    fn from(id: ExprId) -> Self {
        Self::Expression(id)
    }
}

/// Ordered table of parameter values.
///
/// Deserializes from a JSON object of numbers; expression-valued entries
/// refer to arena nodes and are added with [`ParameterValues::insert`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "IndexMap<String, f64>")]
pub struct ParameterValues {
    values: IndexMap<String, ParameterValue>,
}

impl ParameterValues {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object mapping parameter names to numbers.
    pub fn from_json(json: &str) -> Result<Self, ParameterError> {
        serde_json::from_str(json).map_err(|e| ParameterError::Parse {
            reason: e.to_string(),
        })
    }

    /// Set a parameter, replacing any previous value. Returns the old value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Option<ParameterValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Look up a parameter.
    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.values.get(name).copied()
    }

    /// Whether a parameter is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Overlay `other` onto `self`; entries in `other` win.
    pub fn update(&mut self, other: &ParameterValues) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), *value);
        }
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ParameterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<IndexMap<String, f64>> for ParameterValues {
    fn from(map: IndexMap<String, f64>) -> Self {
        Self {
            values: map
                .into_iter()
                .map(|(k, v)| (k, ParameterValue::Scalar(v)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> FromIterator<(K, V)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
