//! Submesh generators and spatial methods a domain can be assigned.

use std::fmt;

use serde::Serialize;

/// How a domain is meshed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SubMeshType {
    /// A single node.
    #[serde(rename = "zero-dimensional")]
    ZeroD,
    /// Evenly spaced nodes along one coordinate.
    #[serde(rename = "uniform 1D")]
    Uniform1D,
    /// A triangulated plane over two coordinates.
    #[serde(rename = "unstructured 2D")]
    Unstructured2D,
}

impl SubMeshType {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroD => "zero-dimensional",
            Self::Uniform1D => "uniform 1D",
            Self::Unstructured2D => "unstructured 2D",
        }
    }
}

impl fmt::Display for SubMeshType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How spatial operators on a domain are discretised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SpatialMethod {
    /// No spatial operators; the domain is a point.
    #[serde(rename = "zero-dimensional")]
    ZeroDimensional,
    /// Cell-centred finite volumes.
    #[serde(rename = "finite volume")]
    FiniteVolume,
    /// Linear finite elements.
    #[serde(rename = "finite element")]
    FiniteElement,
}

impl SpatialMethod {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroDimensional => "zero-dimensional",
            Self::FiniteVolume => "finite volume",
            Self::FiniteElement => "finite element",
        }
    }
}

impl fmt::Display for SpatialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
