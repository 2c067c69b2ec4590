//! Option-driven defaults for geometry, meshing, and spatial methods.
//!
//! Every lookup that depends on the current-collector dimensionality reads
//! a three-entry table indexed by [`Dimensionality::as_usize`]; all other
//! domains have a single default.

use galvan_core::{Dimensionality, Domain, Options, SpatialVariable};
use galvan_expr::MeshPoints;
use indexmap::IndexMap;

use crate::geometry::{Bound, CoordinateRange, DomainGeometry};
use crate::method::{SpatialMethod, SubMeshType};
use crate::var_pts::VarPts;

// ── Dimensionality tables ──────────────────────────────────────────

const CURRENT_COLLECTOR_SUBMESH: [SubMeshType; 3] = [
    SubMeshType::ZeroD,
    SubMeshType::Uniform1D,
    SubMeshType::Unstructured2D,
];

const CURRENT_COLLECTOR_METHOD: [SpatialMethod; 3] = [
    SpatialMethod::ZeroDimensional,
    SpatialMethod::FiniteVolume,
    SpatialMethod::FiniteElement,
];

const CURRENT_COLLECTOR_GEOMETRY: [fn() -> DomainGeometry; 3] = [
    current_collector_0d,
    current_collector_1d,
    current_collector_2d,
];

fn current_collector_0d() -> DomainGeometry {
    DomainGeometry::new().with(SpatialVariable::Z, CoordinateRange::point(1.0))
}

fn current_collector_1d() -> DomainGeometry {
    DomainGeometry::new().with(
        SpatialVariable::Z,
        CoordinateRange::interval(0.0, Bound::parameter("l_z")),
    )
}

fn current_collector_2d() -> DomainGeometry {
    DomainGeometry::new()
        .with(
            SpatialVariable::Y,
            CoordinateRange::interval(0.0, Bound::parameter("l_y")),
        )
        .with(
            SpatialVariable::Z,
            CoordinateRange::interval(0.0, Bound::parameter("l_z")),
        )
}

fn cell_range(domain: Domain) -> Option<CoordinateRange> {
    let range = match domain {
        Domain::NegativeElectrode => CoordinateRange::interval(0.0, Bound::parameter("l_n")),
        Domain::Separator => {
            CoordinateRange::interval(Bound::parameter("l_n"), Bound::sum(["l_n", "l_s"]))
        }
        Domain::PositiveElectrode => CoordinateRange::interval(Bound::sum(["l_n", "l_s"]), 1.0),
        Domain::NegativeParticle | Domain::PositiveParticle => CoordinateRange::interval(0.0, 1.0),
        Domain::CurrentCollector => return None,
    };
    Some(range)
}

// ── Catalog ────────────────────────────────────────────────────────

/// Default geometry, submesh type, spatial method, and point counts for
/// every domain of a battery model with a given option set.
///
/// # Examples
///
/// ```
/// use galvan_core::{ConfigMap, Domain, Options, SpatialVariable};
/// use galvan_space::{Bound, DiscretisationCatalog, SubMeshType};
///
/// let mut config = ConfigMap::new();
/// config.insert("dimensionality".into(), 1i64.into());
/// config.insert("current collector".into(), "potential pair".into());
/// let catalog = DiscretisationCatalog::new(&Options::validate(&config).unwrap());
///
/// let z = catalog.default_geometry(Domain::CurrentCollector);
/// let z = z.get(SpatialVariable::Z).unwrap();
/// assert_eq!(z.min(), Some(&Bound::Scalar(0.0)));
/// assert_eq!(
///     catalog.default_submesh_type(Domain::CurrentCollector),
///     SubMeshType::Uniform1D
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscretisationCatalog {
    dimensionality: Dimensionality,
    var_pts: VarPts,
}

impl DiscretisationCatalog {
    /// Catalog for `options` with default point counts.
    pub fn new(options: &Options) -> Self {
        Self {
            dimensionality: options.dimensionality(),
            var_pts: VarPts::default(),
        }
    }

    /// Replace the point counts.
    pub fn with_var_pts(mut self, var_pts: VarPts) -> Self {
        self.var_pts = var_pts;
        self
    }

    /// Current-collector dimensionality the catalog was built for.
    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    /// Point counts along each spatial variable.
    pub fn var_pts(&self) -> &VarPts {
        &self.var_pts
    }

    /// Default coordinate ranges of `domain`.
    pub fn default_geometry(&self, domain: Domain) -> DomainGeometry {
        match cell_range(domain) {
            Some(range) => DomainGeometry::new().with(domain.spatial_variable(), range),
            None => CURRENT_COLLECTOR_GEOMETRY[self.dimensionality.as_usize()](),
        }
    }

    /// Default submesh type of `domain`.
    pub fn default_submesh_type(&self, domain: Domain) -> SubMeshType {
        match domain {
            Domain::CurrentCollector => CURRENT_COLLECTOR_SUBMESH[self.dimensionality.as_usize()],
            _ => SubMeshType::Uniform1D,
        }
    }

    /// Default spatial method of `domain`.
    pub fn default_spatial_method(&self, domain: Domain) -> SpatialMethod {
        match domain {
            Domain::CurrentCollector => CURRENT_COLLECTOR_METHOD[self.dimensionality.as_usize()],
            _ => SpatialMethod::FiniteVolume,
        }
    }

    /// [`default_geometry`](Self::default_geometry) by domain name;
    /// `None` for a name that is not a domain.
    pub fn geometry_for(&self, name: &str) -> Option<DomainGeometry> {
        Domain::from_name(name).map(|d| self.default_geometry(d))
    }

    /// [`default_submesh_type`](Self::default_submesh_type) by domain name.
    pub fn submesh_type_for(&self, name: &str) -> Option<SubMeshType> {
        Domain::from_name(name).map(|d| self.default_submesh_type(d))
    }

    /// [`default_spatial_method`](Self::default_spatial_method) by domain name.
    pub fn spatial_method_for(&self, name: &str) -> Option<SpatialMethod> {
        Domain::from_name(name).map(|d| self.default_spatial_method(d))
    }

    /// Geometry of every domain, in canonical domain order.
    pub fn geometry(&self) -> IndexMap<Domain, DomainGeometry> {
        Domain::ALL
            .into_iter()
            .map(|d| (d, self.default_geometry(d)))
            .collect()
    }
}

impl MeshPoints for DiscretisationCatalog {
    fn npts(&self, domain: Domain) -> Option<usize> {
        let n = match self.default_submesh_type(domain) {
            SubMeshType::ZeroD => 1,
            SubMeshType::Uniform1D => self.var_pts.get(domain.spatial_variable()),
            // Saturates; the layout rejects any slice this large.
            SubMeshType::Unstructured2D => self
                .var_pts
                .get(SpatialVariable::Y)
                .saturating_mul(self.var_pts.get(SpatialVariable::Z)),
        };
        (n > 0).then_some(n)
    }
}
