//! Coordinate ranges of each domain, in dimensionless units.

use galvan_core::{ExprId, SpatialVariable};
use galvan_expr::ExprArena;
use indexmap::IndexMap;
use serde::Serialize;

/// One end of a coordinate range.
///
/// Bounds are kept symbolic so a geometry can be run through the parameter
/// processor once a parameter table is known.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bound {
    /// A fixed number.
    Scalar(f64),
    /// A named parameter, such as `l_n`.
    Parameter(String),
    /// The sum of named parameters, such as `l_n + l_s`.
    Sum(Vec<String>),
}

impl Bound {
    /// Shorthand for [`Bound::Parameter`].
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }

    /// Shorthand for [`Bound::Sum`].
    pub fn sum<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sum(names.into_iter().map(Into::into).collect())
    }

    /// The value, if the bound is a fixed number.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Push the bound into `arena` as an expression.
    ///
    /// An empty sum becomes `Scalar(0)`.
    pub fn to_expr(&self, arena: &mut ExprArena) -> ExprId {
        match self {
            Self::Scalar(v) => arena.scalar(*v),
            Self::Parameter(name) => arena.parameter(name.as_str()),
            Self::Sum(names) => {
                let mut terms = names.iter().map(|n| n.as_str());
                let Some(first) = terms.next() else {
                    return arena.scalar(0.0);
                };
                let mut acc = arena.parameter(first);
                for name in terms {
                    let term = arena.parameter(name);
                    acc = arena.add(acc, term);
                }
                acc
            }
        }
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

/// Extent of a domain along one spatial variable.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CoordinateRange {
    /// A closed interval.
    Interval {
        /// Lower end.
        min: Bound,
        /// Upper end.
        max: Bound,
    },
    /// A single point, used when the variable is not resolved.
    Point {
        /// Where the point sits.
        position: Bound,
    },
}

impl CoordinateRange {
    /// An interval from `min` to `max`.
    pub fn interval(min: impl Into<Bound>, max: impl Into<Bound>) -> Self {
        Self::Interval {
            min: min.into(),
            max: max.into(),
        }
    }

    /// A point at `position`.
    pub fn point(position: impl Into<Bound>) -> Self {
        Self::Point {
            position: position.into(),
        }
    }

    /// Lower end of an interval.
    pub fn min(&self) -> Option<&Bound> {
        match self {
            Self::Interval { min, .. } => Some(min),
            Self::Point { .. } => None,
        }
    }

    /// Upper end of an interval.
    pub fn max(&self) -> Option<&Bound> {
        match self {
            Self::Interval { max, .. } => Some(max),
            Self::Point { .. } => None,
        }
    }

    /// Position of a point.
    pub fn position(&self) -> Option<&Bound> {
        match self {
            Self::Point { position } => Some(position),
            Self::Interval { .. } => None,
        }
    }
}

/// Coordinate ranges of one domain, keyed by spatial variable.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DomainGeometry {
    ranges: IndexMap<SpatialVariable, CoordinateRange>,
}

impl DomainGeometry {
    /// A geometry with no coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, variable: SpatialVariable, range: CoordinateRange) -> Self {
        self.insert(variable, range);
        self
    }

    /// Set the range along `variable`.
    pub fn insert(&mut self, variable: SpatialVariable, range: CoordinateRange) {
        self.ranges.insert(variable, range);
    }

    /// Range along `variable`.
    pub fn get(&self, variable: SpatialVariable) -> Option<&CoordinateRange> {
        self.ranges.get(&variable)
    }

    /// Number of spatial variables.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether the geometry has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate over `(variable, range)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SpatialVariable, &CoordinateRange)> {
        self.ranges.iter().map(|(v, r)| (*v, r))
    }

    /// Every parameter name mentioned by a bound, first-seen order.
    pub fn parameters(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let bounds = self.ranges.values().flat_map(|range| match range {
            CoordinateRange::Interval { min, max } => vec![min, max],
            CoordinateRange::Point { position } => vec![position],
        });
        for bound in bounds {
            let found: Vec<&str> = match bound {
                Bound::Scalar(_) => Vec::new(),
                Bound::Parameter(name) => vec![name.as_str()],
                Bound::Sum(terms) => terms.iter().map(String::as_str).collect(),
            };
            for name in found {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvan_expr::{process, ParameterValues};

    #[test]
    fn sum_bound_processes_to_a_number_tree() {
        let mut arena = ExprArena::new();
        let id = Bound::sum(["l_n", "l_s"]).to_expr(&mut arena);
        assert_eq!(arena.display(id).to_string(), "l_n + l_s");
        let params: ParameterValues = [("l_n", 0.4), ("l_s", 0.2)].into_iter().collect();
        let out = process(&mut arena, id, &params).unwrap();
        assert_eq!(arena.display(out).to_string(), "0.4 + 0.2");
    }

    #[test]
    fn point_and_interval_accessors() {
        let point = CoordinateRange::point(1.0);
        assert_eq!(point.position(), Some(&Bound::Scalar(1.0)));
        assert_eq!(point.min(), None);

        let interval = CoordinateRange::interval(0.0, Bound::parameter("l_z"));
        assert_eq!(interval.min().and_then(Bound::as_scalar), Some(0.0));
        assert_eq!(interval.max(), Some(&Bound::parameter("l_z")));
        assert_eq!(interval.position(), None);
    }

    #[test]
    fn parameters_are_deduplicated() {
        let g = DomainGeometry::new()
            .with(
                SpatialVariable::XS,
                CoordinateRange::interval(Bound::parameter("l_n"), Bound::sum(["l_n", "l_s"])),
            )
            .with(SpatialVariable::Z, CoordinateRange::point(1.0));
        assert_eq!(g.parameters(), vec!["l_n", "l_s"]);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn serializes_like_a_nested_map() {
        let g = DomainGeometry::new().with(
            SpatialVariable::Z,
            CoordinateRange::interval(0.0, Bound::parameter("l_z")),
        );
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"z":{"min":0.0,"max":"l_z"}}"#);
    }
}
