use galvan_core::{Domain, ExprId};
use galvan_expr::{
    process, process_and_discretise, BinaryOp, DomainLayout, ExprArena, MeshPoints, Node,
    ParameterValues, VariableRef,
};
use proptest::prelude::*;

const PARAMS: [&str; 3] = ["a", "b", "c"];
const VARS: [&str; 2] = ["u", "w"];

struct TenPoints;

impl MeshPoints for TenPoints {
    fn npts(&self, _domain: Domain) -> Option<usize> {
        Some(10)
    }
}

/// Tree shape generated by proptest, realised into an arena afterwards.
#[derive(Clone, Debug)]
enum Shape {
    Scalar(f64),
    Param(usize),
    Var(usize),
    Time,
    Neg(Box<Shape>),
    Bin(BinaryOp, Box<Shape>, Box<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (-10.0f64..10.0).prop_map(Shape::Scalar),
        (0..PARAMS.len()).prop_map(Shape::Param),
        (0..VARS.len()).prop_map(Shape::Var),
        Just(Shape::Time),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        let op = prop_oneof![
            Just(BinaryOp::Add),
            Just(BinaryOp::Subtract),
            Just(BinaryOp::Multiply),
            Just(BinaryOp::Divide),
            Just(BinaryOp::Power),
        ];
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Neg(Box::new(s))),
            (op, inner.clone(), inner).prop_map(|(op, l, r)| Shape::Bin(op, Box::new(l), Box::new(r))),
        ]
    })
}

fn var_ref(i: usize) -> VariableRef {
    VariableRef::new(VARS[i]).on(Domain::NegativeElectrode)
}

fn build(arena: &mut ExprArena, shape: &Shape) -> ExprId {
    match shape {
        Shape::Scalar(v) => arena.scalar(*v),
        Shape::Param(i) => arena.parameter(PARAMS[*i]),
        Shape::Var(i) => arena.variable(var_ref(*i)),
        Shape::Time => arena.time(),
        Shape::Neg(s) => {
            let c = build(arena, s);
            arena.negate(c)
        }
        Shape::Bin(op, l, r) => {
            let l = build(arena, l);
            let r = build(arena, r);
            arena.binary(*op, l, r)
        }
    }
}

fn full_table() -> ParameterValues {
    [("a", 1.0), ("b", 2.5), ("c", -0.5)].into_iter().collect()
}

fn full_layout() -> DomainLayout {
    let mut layout = DomainLayout::new();
    layout
        .set_variable_slices((0..VARS.len()).map(var_ref), &TenPoints)
        .unwrap();
    layout
}

#[test]
fn electrode_thickness_times_particle_concentration() {
    let concentration = VariableRef::new("X-averaged negative particle concentration")
        .on(Domain::NegativeParticle)
        .with_secondary(Domain::CurrentCollector);
    let mut arena = ExprArena::new();
    let l = arena.parameter("Negative electrode thickness [m]");
    let c = arena.variable(concentration.clone());
    let root = arena.multiply(l, c);

    let params = ParameterValues::from_json(r#"{"Negative electrode thickness [m]": 1e-4}"#).unwrap();
    let mut layout = DomainLayout::new();
    layout
        .set_variable_slices(arena.variables(root), &TenPoints)
        .unwrap();
    assert_eq!(layout.slice(&concentration), Some(0..100));

    let out = process_and_discretise(&mut arena, root, &params, &layout).unwrap();
    match arena.node(out) {
        Node::Binary {
            op: BinaryOp::Multiply,
            left,
            right,
        } => {
            assert_eq!(arena.node(*left), &Node::Scalar(1e-4));
            assert_eq!(arena.node(*right), &Node::StateVector(0..100));
        }
        other => panic!("expected a product, got {other:?}"),
    }
}

#[test]
fn one_processor_serves_many_roots() {
    let mut arena = ExprArena::new();
    let a = arena.parameter("a");
    let t = arena.time();
    let first = arena.multiply(a, t);
    let second = arena.add(a, t);
    let table = full_table();
    let mut processor = galvan_expr::ParameterProcessor::new(&table);
    let p1 = processor.process(&mut arena, first).unwrap();
    let p2 = processor.process(&mut arena, second).unwrap();
    let (Node::Binary { left: l1, .. }, Node::Binary { left: l2, .. }) =
        (arena.node(p1), arena.node(p2))
    else {
        panic!("expected binary roots");
    };
    assert_eq!(l1, l2);
}

mod proptests {
    use super::*;

    proptest! {
        #[test]
        fn full_pipeline_leaves_nothing_symbolic(s in shape()) {
            let mut arena = ExprArena::new();
            let root = build(&mut arena, &s);
            let out = process_and_discretise(&mut arena, root, &full_table(), &full_layout()).unwrap();
            prop_assert!(arena.is_discretised(out));
        }

        #[test]
        fn processing_is_idempotent(s in shape()) {
            let mut arena = ExprArena::new();
            let root = build(&mut arena, &s);
            let table = full_table();
            let once = process(&mut arena, root, &table).unwrap();
            let twice = process(&mut arena, once, &table).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn processing_is_deterministic(s in shape()) {
            let mut arena = ExprArena::new();
            let root = build(&mut arena, &s);
            let table = full_table();
            let first = process(&mut arena, root, &table).unwrap();
            let second = process(&mut arena, root, &table).unwrap();
            prop_assert!(arena.structurally_eq(first, second));
        }

        #[test]
        fn input_rendering_survives_the_pipeline(s in shape()) {
            let mut arena = ExprArena::new();
            let root = build(&mut arena, &s);
            let before = arena.display(root).to_string();
            let _ = process_and_discretise(&mut arena, root, &full_table(), &full_layout()).unwrap();
            prop_assert_eq!(arena.display(root).to_string(), before);
        }
    }
}
