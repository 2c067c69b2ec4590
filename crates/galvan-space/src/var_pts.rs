//! Mesh point counts per spatial variable.

use galvan_core::SpatialVariable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of mesh points along each spatial variable.
///
/// Deserializes from a partial map (`{"x_n": 40}`); variables not named keep
/// their default count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<SpatialVariable, usize>", into = "IndexMap<SpatialVariable, usize>")]
pub struct VarPts {
    points: IndexMap<SpatialVariable, usize>,
}

impl VarPts {
    /// Point count along `variable`.
    pub fn get(&self, variable: SpatialVariable) -> usize {
        self.points.get(&variable).copied().unwrap_or(0)
    }

    /// Set the point count along `variable`.
    pub fn set(&mut self, variable: SpatialVariable, points: usize) {
        self.points.insert(variable, points);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, variable: SpatialVariable, points: usize) -> Self {
        self.set(variable, points);
        self
    }

    /// Iterate in canonical variable order.
    pub fn iter(&self) -> impl Iterator<Item = (SpatialVariable, usize)> + '_ {
        self.points.iter().map(|(v, n)| (*v, *n))
    }
}

impl Default for VarPts {
    fn default() -> Self {
        let points = SpatialVariable::ALL
            .into_iter()
            .map(|v| {
                let n = match v {
                    SpatialVariable::XN | SpatialVariable::XS | SpatialVariable::XP => 20,
                    SpatialVariable::RN | SpatialVariable::RP => 10,
                    SpatialVariable::Y | SpatialVariable::Z => 10,
                };
                (v, n)
            })
            .collect();
        Self { points }
    }
}

impl From<IndexMap<SpatialVariable, usize>> for VarPts {
    fn from(overrides: IndexMap<SpatialVariable, usize>) -> Self {
        let mut pts = Self::default();
        for (v, n) in overrides {
            pts.set(v, n);
        }
        pts
    }
}

impl From<VarPts> for IndexMap<SpatialVariable, usize> {
    fn from(pts: VarPts) -> Self {
        pts.points
    }
}
