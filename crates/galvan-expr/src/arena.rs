//! Append-only node pool backing every expression tree.
//!
//! Nodes are never mutated or removed once pushed. A rewrite (parameter
//! processing, discretisation) pushes new nodes for the parts of a tree that
//! change and reuses the IDs of subtrees that do not, so the original root
//! keeps denoting the original tree and unchanged subtrees are shared.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use galvan_core::ExprId;

use crate::node::{BinaryOp, Node, UnaryOp, VariableRef};

/// Arena of expression nodes addressed by [`ExprId`].
///
/// Every `ExprId` handed out by an arena is valid for that arena's
/// lifetime. Passing an ID from a different arena is a logic error; the
/// accessors that index directly document where they panic.
///
/// # Examples
///
/// ```
/// use galvan_expr::{ExprArena, Node};
///
/// let mut arena = ExprArena::new();
/// let p = arena.parameter("p");
/// let two = arena.scalar(2.0);
/// let e = arena.multiply(p, two);
/// assert_eq!(arena.display(e).to_string(), "p * 2");
/// assert!(matches!(arena.node(p), Node::Parameter(_)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    nodes: Vec<Node>,
}

impl ExprArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes ever allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` nodes, or (in debug
    /// builds) if a child ID does not belong to this arena.
    pub fn push(&mut self, node: Node) -> ExprId {
        debug_assert!(
            node.children().iter().all(|c| c.index() < self.nodes.len()),
            "child of {} node not allocated in this arena",
            node.kind()
        );
        let id = u32::try_from(self.nodes.len()).expect("expression arena exceeds u32::MAX nodes");
        self.nodes.push(node);
        ExprId(id)
    }

    /// Look up a node, returning `None` for a foreign ID.
    pub fn get(&self, id: ExprId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    pub fn node(&self, id: ExprId) -> &Node {
        &self.nodes[id.index()]
    }

    // ── Leaf constructors ──────────────────────────────────────────

    /// A numeric constant.
    pub fn scalar(&mut self, value: f64) -> ExprId {
        self.push(Node::Scalar(value))
    }

    /// A named parameter.
    pub fn parameter(&mut self, name: impl Into<String>) -> ExprId {
        self.push(Node::Parameter(name.into()))
    }

    /// A continuous variable.
    pub fn variable(&mut self, variable: VariableRef) -> ExprId {
        self.push(Node::Variable(variable))
    }

    /// A state-vector slice.
    pub fn state_vector(&mut self, slice: Range<usize>) -> ExprId {
        self.push(Node::StateVector(slice))
    }

    /// Simulation time.
    pub fn time(&mut self) -> ExprId {
        self.push(Node::Time)
    }

    // ── Operators ──────────────────────────────────────────────────

    /// Apply a binary operator.
    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.push(Node::Binary { op, left, right })
    }

    /// Apply a unary operator.
    pub fn unary(&mut self, op: UnaryOp, child: ExprId) -> ExprId {
        self.push(Node::Unary { op, child })
    }

    /// `left + right`
    pub fn add(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.binary(BinaryOp::Add, left, right)
    }

    /// `left - right`
    pub fn subtract(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.binary(BinaryOp::Subtract, left, right)
    }

    /// `left * right`
    pub fn multiply(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.binary(BinaryOp::Multiply, left, right)
    }

    /// `left / right`
    pub fn divide(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.binary(BinaryOp::Divide, left, right)
    }

    /// `base ^ exponent`
    pub fn power(&mut self, base: ExprId, exponent: ExprId) -> ExprId {
        self.binary(BinaryOp::Power, base, exponent)
    }

    /// `-child`
    pub fn negate(&mut self, child: ExprId) -> ExprId {
        self.unary(UnaryOp::Negate, child)
    }

    /// `grad(child)`
    pub fn gradient(&mut self, child: ExprId) -> ExprId {
        self.unary(UnaryOp::Gradient, child)
    }

    /// `div(child)`
    pub fn divergence(&mut self, child: ExprId) -> ExprId {
        self.unary(UnaryOp::Divergence, child)
    }

    /// `x_average(child)`
    pub fn x_average(&mut self, child: ExprId) -> ExprId {
        self.unary(UnaryOp::XAverage, child)
    }

    // ── Rewriting support ──────────────────────────────────────────

    /// Rebuild `id` with new children, reusing `id` when nothing changed.
    ///
    /// `children` must list one ID per child of `id`, in order. Leaves are
    /// returned unchanged.
    pub(crate) fn with_children(&mut self, id: ExprId, children: &[ExprId]) -> ExprId {
        match *self.node(id) {
            Node::Unary { op, child } => {
                if children[0] == child {
                    id
                } else {
                    self.unary(op, children[0])
                }
            }
            Node::Binary { op, left, right } => {
                if children[0] == left && children[1] == right {
                    id
                } else {
                    self.binary(op, children[0], children[1])
                }
            }
            _ => id,
        }
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Depth-first, parent-before-children traversal from `root`.
    pub fn pre_order(&self, root: ExprId) -> PreOrder<'_> {
        PreOrder {
            arena: self,
            stack: vec![root],
        }
    }

    /// Distinct variables under `root`, in first-seen pre-order.
    pub fn variables(&self, root: ExprId) -> Vec<VariableRef> {
        let mut seen = HashSet::new();
        self.pre_order(root)
            .filter_map(|(_, node)| match node {
                Node::Variable(v) if seen.insert(v.clone()) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// Distinct parameter names under `root`, in first-seen pre-order.
    pub fn parameters(&self, root: ExprId) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.pre_order(root)
            .filter_map(|(_, node)| match node {
                Node::Parameter(name) if seen.insert(name.as_str()) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether the tree under `root` has no `Parameter` or `Variable` nodes.
    pub fn is_discretised(&self, root: ExprId) -> bool {
        self.pre_order(root).all(|(_, node)| !node.is_symbolic())
    }

    /// Whether the tree under `root` has no `Parameter` nodes.
    pub fn is_parameter_free(&self, root: ExprId) -> bool {
        self.pre_order(root)
            .all(|(_, node)| !matches!(node, Node::Parameter(_)))
    }

    /// Compare two trees by value, ignoring node identity.
    pub fn structurally_eq(&self, a: ExprId, b: ExprId) -> bool {
        let mut stack = vec![(a, b)];
        while let Some((a, b)) = stack.pop() {
            if a == b {
                continue;
            }
            match (self.node(a), self.node(b)) {
                (
                    Node::Unary { op: oa, child: ca },
                    Node::Unary { op: ob, child: cb },
                ) if oa == ob => stack.push((*ca, *cb)),
                (
                    Node::Binary {
                        op: oa,
                        left: la,
                        right: ra,
                    },
                    Node::Binary {
                        op: ob,
                        left: lb,
                        right: rb,
                    },
                ) if oa == ob => {
                    stack.push((*la, *lb));
                    stack.push((*ra, *rb));
                }
                (Node::Unary { .. }, _) | (Node::Binary { .. }, _) => return false,
                (x, y) => {
                    if x != y {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Infix rendering of the tree under `root`.
    pub fn display(&self, root: ExprId) -> ExprDisplay<'_> {
        ExprDisplay { arena: self, root }
    }
}

/// Iterator returned by [`ExprArena::pre_order`].
pub struct PreOrder<'a> {
    arena: &'a ExprArena,
    stack: Vec<ExprId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (ExprId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.arena.node(id);
        // Reverse so the left child is visited first.
        self.stack.extend(node.children().into_iter().rev());
        Some((id, node))
    }
}

/// Display adapter returned by [`ExprArena::display`].
pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    root: ExprId,
}

impl ExprDisplay<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: ExprId, nested: bool) -> fmt::Result {
        match self.arena.node(id) {
            Node::Scalar(v) => write!(f, "{v}"),
            Node::Parameter(name) => f.write_str(name),
            Node::Variable(v) => f.write_str(&v.name),
            Node::StateVector(slice) => write!(f, "y[{}:{}]", slice.start, slice.end),
            Node::Time => f.write_str("t"),
            Node::Unary {
                op: UnaryOp::Negate,
                child,
            } => {
                f.write_str("-")?;
                self.write_node(f, *child, true)
            }
            Node::Unary { op, child } => {
                write!(f, "{}(", op.prefix())?;
                self.write_node(f, *child, false)?;
                f.write_str(")")
            }
            Node::Binary { op, left, right } => {
                if nested {
                    f.write_str("(")?;
                }
                self.write_node(f, *left, true)?;
                write!(f, " {} ", op.symbol())?;
                self.write_node(f, *right, true)?;
                if nested {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvan_core::Domain;

    #[test]
    fn ids_are_sequential() {
        let mut arena = ExprArena::new();
        assert!(arena.is_empty());
        let a = arena.scalar(1.0);
        let b = arena.time();
        assert_eq!(a, ExprId(0));
        assert_eq!(b, ExprId(1));
        assert_eq!(arena.len(), 2);
        assert!(arena.get(ExprId(2)).is_none());
    }

    #[test]
    fn pre_order_visits_left_first() {
        let mut arena = ExprArena::new();
        let a = arena.parameter("a");
        let b = arena.parameter("b");
        let c = arena.parameter("c");
        let ab = arena.add(a, b);
        let root = arena.multiply(ab, c);
        let order: Vec<ExprId> = arena.pre_order(root).map(|(id, _)| id).collect();
        assert_eq!(order, vec![root, ab, a, b, c]);
    }

    #[test]
    fn variables_and_parameters_are_deduplicated() {
        let mut arena = ExprArena::new();
        let v = VariableRef::new("c").on(Domain::NegativeParticle);
        let x = arena.variable(v.clone());
        let y = arena.variable(v.clone());
        let p = arena.parameter("p");
        let q = arena.parameter("p");
        let xy = arena.add(x, y);
        let pq = arena.add(p, q);
        let root = arena.multiply(xy, pq);
        assert_eq!(arena.variables(root), vec![v]);
        assert_eq!(arena.parameters(root), vec!["p"]);
        assert!(!arena.is_discretised(root));
        assert!(!arena.is_parameter_free(root));
    }

    #[test]
    fn structural_equality_ignores_identity() {
        let mut arena = ExprArena::new();
        let a1 = arena.scalar(5.0);
        let b1 = arena.state_vector(0..10);
        let e1 = arena.multiply(a1, b1);
        let a2 = arena.scalar(5.0);
        let b2 = arena.state_vector(0..10);
        let e2 = arena.multiply(a2, b2);
        let e3 = arena.add(a2, b2);
        assert_ne!(e1, e2);
        assert!(arena.structurally_eq(e1, e2));
        assert!(!arena.structurally_eq(e1, e3));
        assert!(!arena.structurally_eq(a1, e1));
    }

    #[test]
    fn with_children_reuses_unchanged_nodes() {
        let mut arena = ExprArena::new();
        let a = arena.scalar(1.0);
        let b = arena.scalar(2.0);
        let e = arena.subtract(a, b);
        assert_eq!(arena.with_children(e, &[a, b]), e);
        let rebuilt = arena.with_children(e, &[b, a]);
        assert_ne!(rebuilt, e);
        assert_eq!(arena.display(rebuilt).to_string(), "2 - 1");
    }

    #[test]
    fn display_parenthesises_nested_operators() {
        let mut arena = ExprArena::new();
        let p = arena.parameter("p");
        let v = arena.variable(VariableRef::new("v"));
        let sum = arena.add(p, v);
        let neg = arena.negate(sum);
        let g = arena.gradient(v);
        let d = arena.divergence(g);
        let root = arena.multiply(neg, d);
        assert_eq!(arena.display(root).to_string(), "-(p + v) * div(grad(v))");
    }
}
