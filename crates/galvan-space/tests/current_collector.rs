use galvan_core::{ConfigMap, Dimensionality, Domain, OptionValue, Options, SpatialVariable};
use galvan_expr::{process, ExprArena, MeshPoints, ParameterValues};
use galvan_space::{Bound, DiscretisationCatalog, SpatialMethod, SubMeshType};
use proptest::prelude::*;

fn catalog_for(dimensionality: i64, current_collector: &str) -> DiscretisationCatalog {
    let mut config = ConfigMap::new();
    config.insert("dimensionality".into(), OptionValue::Int(dimensionality));
    config.insert("current collector".into(), current_collector.into());
    DiscretisationCatalog::new(&Options::validate(&config).unwrap())
}

#[test]
fn zero_d_current_collector_is_a_point_at_one() {
    let geometry = catalog_for(0, "uniform").default_geometry(Domain::CurrentCollector);
    let z = geometry.get(SpatialVariable::Z).unwrap();
    assert_eq!(z.position(), Some(&Bound::Scalar(1.0)));
    assert!(geometry.get(SpatialVariable::Y).is_none());
}

#[test]
fn one_d_current_collector_spans_z() {
    let geometry = catalog_for(1, "potential pair").default_geometry(Domain::CurrentCollector);
    let z = geometry.get(SpatialVariable::Z).unwrap();
    assert_eq!(z.min(), Some(&Bound::Scalar(0.0)));
    assert_eq!(z.max(), Some(&Bound::parameter("l_z")));
    assert!(geometry.get(SpatialVariable::Y).is_none());
}

#[test]
fn two_d_current_collector_spans_y_and_z() {
    let geometry = catalog_for(2, "potential pair").default_geometry(Domain::CurrentCollector);
    let y = geometry.get(SpatialVariable::Y).unwrap();
    let z = geometry.get(SpatialVariable::Z).unwrap();
    assert_eq!(y.min(), Some(&Bound::Scalar(0.0)));
    assert_eq!(z.min(), Some(&Bound::Scalar(0.0)));
    assert_eq!(y.max(), Some(&Bound::parameter("l_y")));
}

#[test]
fn submesh_and_method_by_dimensionality() {
    let expected = [
        (0, "uniform", SubMeshType::ZeroD, SpatialMethod::ZeroDimensional),
        (1, "potential pair", SubMeshType::Uniform1D, SpatialMethod::FiniteVolume),
        (2, "potential pair", SubMeshType::Unstructured2D, SpatialMethod::FiniteElement),
    ];
    for (dim, cc, submesh, method) in expected {
        let catalog = catalog_for(dim, cc);
        assert_eq!(catalog.default_submesh_type(Domain::CurrentCollector), submesh);
        assert_eq!(catalog.default_spatial_method(Domain::CurrentCollector), method);
    }
}

#[test]
fn geometry_bounds_process_with_a_parameter_table() {
    let catalog = catalog_for(2, "potential pair");
    let geometry = catalog.default_geometry(Domain::CurrentCollector);
    let params: ParameterValues = [("l_y", 1.5), ("l_z", 1.0)].into_iter().collect();
    let mut arena = ExprArena::new();
    for name in geometry.parameters() {
        let id = arena.parameter(name);
        let out = process(&mut arena, id, &params).unwrap();
        assert!(arena.is_parameter_free(out));
    }
}

proptest! {
    #[test]
    fn current_collector_always_has_mesh_points(
        dim in 0usize..3,
        y in 1usize..50,
        z in 1usize..50,
    ) {
        let cc = if dim == 0 { "uniform" } else { "potential pair" };
        let catalog = catalog_for(dim as i64, cc).with_var_pts(
            galvan_space::VarPts::default()
                .with(SpatialVariable::Y, y)
                .with(SpatialVariable::Z, z),
        );
        let expected = match Dimensionality::ALL[dim] {
            Dimensionality::Zero => 1,
            Dimensionality::One => z,
            Dimensionality::Two => y * z,
        };
        prop_assert_eq!(catalog.npts(Domain::CurrentCollector), Some(expected));
    }
}
