//! Parameter substitution.
//!
//! [`ParameterProcessor`] rewrites a tree so that every `Parameter` node is
//! replaced by its value from a [`ParameterValues`] table. The rewrite is
//! pure: the input tree is left intact, unchanged subtrees are shared, and
//! the same input with the same table always yields a structurally equal
//! output.

use std::collections::HashMap;

use galvan_core::{ExprId, ParameterError};
use smallvec::SmallVec;

use crate::arena::ExprArena;
use crate::node::Node;
use crate::parameters::{ParameterValue, ParameterValues};

/// Substitutes parameter values into expression trees.
///
/// A processor memoizes per node and per parameter, so processing several
/// roots with one processor resolves each parameter once and maps each
/// shared subtree to a single output node.
pub struct ParameterProcessor<'p> {
    values: &'p ParameterValues,
    processed: HashMap<ExprId, ExprId>,
    resolved: HashMap<String, ExprId>,
    resolving: Vec<String>,
}

impl<'p> ParameterProcessor<'p> {
    /// A processor reading from `values`.
    pub fn new(values: &'p ParameterValues) -> Self {
        Self {
            values,
            processed: HashMap::new(),
            resolved: HashMap::new(),
            resolving: Vec::new(),
        }
    }

    /// Process the tree under `root`, returning the new root.
    ///
    /// Returns `root` itself when the tree holds no parameters. On error no
    /// partial tree is returned. The walk keeps its own stack, so tree depth
    /// is bounded by memory rather than the call stack.
    ///
    /// # Panics
    ///
    /// Panics if `root` was not allocated by `arena`.
    pub fn process(&mut self, arena: &mut ExprArena, root: ExprId) -> Result<ExprId, ParameterError> {
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if self.processed.contains_key(&id) {
                continue;
            }
            let out = match arena.node(id) {
                Node::Parameter(name) => {
                    let name = name.clone();
                    self.resolve(arena, &name)?
                }
                Node::Unary { .. } | Node::Binary { .. } => {
                    let children = arena.node(id).children();
                    if !expanded {
                        stack.push((id, true));
                        stack.extend(children.into_iter().rev().map(|c| (c, false)));
                        continue;
                    }
                    // Children were popped, and so processed, before this second visit.
                    let new_children: SmallVec<[ExprId; 2]> =
                        children.iter().map(|c| self.processed[c]).collect();
                    arena.with_children(id, &new_children)
                }
                Node::Scalar(_) | Node::Variable(_) | Node::StateVector(_) | Node::Time => id,
            };
            self.processed.insert(id, out);
        }
        Ok(self.processed[&root])
    }

    fn resolve(&mut self, arena: &mut ExprArena, name: &str) -> Result<ExprId, ParameterError> {
        if let Some(&id) = self.resolved.get(name) {
            return Ok(id);
        }
        if self.resolving.iter().any(|n| n == name) {
            return Err(ParameterError::Cycle {
                name: name.to_string(),
            });
        }

        let values = self.values;
        let value = values.get(name).ok_or_else(|| ParameterError::Unresolved {
            name: name.to_string(),
        })?;

        let id = match value {
            ParameterValue::Scalar(v) => arena.scalar(v),
            ParameterValue::Expression(expr) if arena.get(expr).is_none() => {
                return Err(ParameterError::ForeignExpression {
                    name: name.to_string(),
                    id: expr,
                });
            }
            ParameterValue::Expression(expr) => {
                self.resolving.push(name.to_string());
                let result = self.process(arena, expr);
                self.resolving.pop();
                result?
            }
        };

        tracing::trace!(parameter = name, "resolved");
        self.resolved.insert(name.to_string(), id);
        Ok(id)
    }
}

/// Process a single tree with a fresh [`ParameterProcessor`].
pub fn process(
    arena: &mut ExprArena,
    root: ExprId,
    values: &ParameterValues,
) -> Result<ExprId, ParameterError> {
    ParameterProcessor::new(values).process(arena, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::VariableRef;
    use galvan_core::Domain;

    #[test]
    fn parameter_becomes_scalar() {
        let mut arena = ExprArena::new();
        let p = arena.parameter("p");
        let v = arena.variable(VariableRef::new("v").on(Domain::NegativeParticle));
        let root = arena.multiply(p, v);
        let params: ParameterValues = [("p", 5.0)].into_iter().collect();

        let out = process(&mut arena, root, &params).unwrap();
        let Node::Binary { left, right, .. } = *arena.node(out) else {
            panic!("expected binary node");
        };
        assert_eq!(arena.node(left), &Node::Scalar(5.0));
        assert_eq!(right, v);
    }

    #[test]
    fn input_tree_is_untouched() {
        let mut arena = ExprArena::new();
        let p = arena.parameter("p");
        let one = arena.scalar(1.0);
        let root = arena.add(p, one);
        let before = arena.display(root).to_string();
        let params: ParameterValues = [("p", 2.0)].into_iter().collect();

        let out = process(&mut arena, root, &params).unwrap();
        assert_ne!(out, root);
        assert_eq!(arena.display(root).to_string(), before);
        assert_eq!(arena.display(out).to_string(), "2 + 1");
    }

    #[test]
    fn resolved_tree_is_returned_as_is() {
        let mut arena = ExprArena::new();
        let a = arena.scalar(3.0);
        let t = arena.time();
        let root = arena.multiply(a, t);
        let len = arena.len();
        let out = process(&mut arena, root, &ParameterValues::new()).unwrap();
        assert_eq!(out, root);
        assert_eq!(arena.len(), len);
    }

    #[test]
    fn unresolved_parameter_is_named() {
        let mut arena = ExprArena::new();
        let p = arena.parameter("Electrode height [m]");
        let err = process(&mut arena, p, &ParameterValues::new()).unwrap_err();
        assert_eq!(
            err,
            ParameterError::Unresolved {
                name: "Electrode height [m]".into()
            }
        );
    }

    #[test]
    fn expression_values_are_processed_recursively() {
        let mut arena = ExprArena::new();
        let ln_dim = arena.parameter("L_n");
        let l_total = arena.parameter("L");
        let ratio = arena.divide(ln_dim, l_total);
        let mut params: ParameterValues = [("L_n", 1e-4), ("L", 2e-4)].into_iter().collect();
        params.insert("l_n", ratio);

        let root = arena.parameter("l_n");
        let out = process(&mut arena, root, &params).unwrap();
        assert!(arena.is_parameter_free(out));
        assert_eq!(arena.display(out).to_string(), "0.0001 / 0.0002");
    }

    #[test]
    fn self_referencing_parameters_are_rejected() {
        let mut arena = ExprArena::new();
        let b = arena.parameter("b");
        let two = arena.scalar(2.0);
        let a_value = arena.multiply(b, two);
        let a = arena.parameter("a");
        let mut params = ParameterValues::new();
        params.insert("a", a_value);
        params.insert("b", a);

        let err = process(&mut arena, a, &params).unwrap_err();
        assert!(matches!(err, ParameterError::Cycle { .. }));
    }

    #[test]
    fn expression_from_another_arena_is_rejected() {
        let mut arena = ExprArena::new();
        let p = arena.parameter("Current function [A]");
        let mut params = ParameterValues::new();
        params.insert("Current function [A]", ExprId(1_000_000));

        let err = process(&mut arena, p, &params).unwrap_err();
        assert_eq!(
            err,
            ParameterError::ForeignExpression {
                name: "Current function [A]".into(),
                id: ExprId(1_000_000)
            }
        );
    }

    #[test]
    fn deep_trees_do_not_exhaust_the_stack() {
        let mut arena = ExprArena::new();
        let mut root = arena.parameter("p");
        for _ in 0..200_000 {
            let q = arena.parameter("p");
            root = arena.add(root, q);
        }
        let params: ParameterValues = [("p", 1.0)].into_iter().collect();
        let out = process(&mut arena, root, &params).unwrap();
        assert!(arena.is_parameter_free(out));
    }

    #[test]
    fn repeated_parameter_resolves_to_shared_node() {
        let mut arena = ExprArena::new();
        let p1 = arena.parameter("p");
        let p2 = arena.parameter("p");
        let root = arena.add(p1, p2);
        let params: ParameterValues = [("p", 1.5)].into_iter().collect();
        let out = process(&mut arena, root, &params).unwrap();
        let Node::Binary { left, right, .. } = *arena.node(out) else {
            panic!("expected binary node");
        };
        assert_eq!(left, right);
    }
}
