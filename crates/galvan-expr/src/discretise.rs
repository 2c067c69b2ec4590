//! Binding variables to state-vector slices.

use std::collections::HashMap;

use galvan_core::{DiscretisationError, ExprId, PipelineError};
use smallvec::SmallVec;

use crate::arena::ExprArena;
use crate::layout::DomainLayout;
use crate::node::Node;
use crate::parameters::ParameterValues;
use crate::process::ParameterProcessor;

/// Replaces every `Variable` node with a `StateVector` over its slice.
///
/// Scalars, parameters, time, and operators pass through; operator
/// children are rewritten. Like [`ParameterProcessor`], the input tree is
/// never modified and unchanged subtrees are shared.
pub struct Discretiser<'l> {
    layout: &'l DomainLayout,
    discretised: HashMap<ExprId, ExprId>,
}

impl<'l> Discretiser<'l> {
    /// A discretiser reading slices from `layout`.
    pub fn new(layout: &'l DomainLayout) -> Self {
        Self {
            layout,
            discretised: HashMap::new(),
        }
    }

    /// Discretise the tree under `root`, returning the new root.
    ///
    /// Iterative like [`ParameterProcessor::process`].
    pub fn discretise(
        &mut self,
        arena: &mut ExprArena,
        root: ExprId,
    ) -> Result<ExprId, DiscretisationError> {
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if self.discretised.contains_key(&id) {
                continue;
            }
            let out = match arena.node(id) {
                Node::Variable(variable) => {
                    let slice =
                        self.layout
                            .slice(variable)
                            .ok_or_else(|| DiscretisationError::NoLayout {
                                variable: variable.name.clone(),
                                domain: variable.domain.to_vec(),
                                auxiliary: variable.auxiliary.clone(),
                            })?;
                    arena.state_vector(slice)
                }
                Node::Unary { .. } | Node::Binary { .. } => {
                    let children = arena.node(id).children();
                    if !expanded {
                        stack.push((id, true));
                        stack.extend(children.into_iter().rev().map(|c| (c, false)));
                        continue;
                    }
                    let new_children: SmallVec<[ExprId; 2]> =
                        children.iter().map(|c| self.discretised[c]).collect();
                    arena.with_children(id, &new_children)
                }
                Node::Scalar(_) | Node::Parameter(_) | Node::StateVector(_) | Node::Time => id,
            };
            self.discretised.insert(id, out);
        }
        Ok(self.discretised[&root])
    }
}

/// Discretise a single tree with a fresh [`Discretiser`].
pub fn discretise(
    arena: &mut ExprArena,
    root: ExprId,
    layout: &DomainLayout,
) -> Result<ExprId, DiscretisationError> {
    Discretiser::new(layout).discretise(arena, root)
}

/// Substitute parameters, then discretise.
///
/// With a complete table and layout the result satisfies
/// [`ExprArena::is_discretised`].
pub fn process_and_discretise(
    arena: &mut ExprArena,
    root: ExprId,
    values: &ParameterValues,
    layout: &DomainLayout,
) -> Result<ExprId, PipelineError> {
    let processed = ParameterProcessor::new(values).process(arena, root)?;
    Ok(discretise(arena, processed, layout)?)
}
