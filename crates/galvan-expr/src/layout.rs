//! State-vector layout: which slice of `y` holds each variable.

use std::ops::Range;

use galvan_core::{DiscretisationError, Domain};
use indexmap::IndexMap;

use crate::node::VariableRef;

/// Longest state vector a `Vec<f64>` can hold.
const MAX_STATE_LEN: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Number of mesh points per domain.
///
/// The narrow interface through which a mesh backend tells the layout how
/// large each variable's slice must be.
pub trait MeshPoints {
    /// Points in `domain`, or `None` if the mesh does not cover it.
    fn npts(&self, domain: Domain) -> Option<usize>;
}

impl<M: MeshPoints + ?Sized> MeshPoints for &M {
    fn npts(&self, domain: Domain) -> Option<usize> {
        (**self).npts(domain)
    }
}

/// Maps each variable (name, domain, auxiliary domains) to a contiguous
/// state-vector slice.
///
/// Uses `IndexMap` so iteration follows assignment order, which is also
/// the order slices appear in the state vector when built with
/// [`set_variable_slices`](DomainLayout::set_variable_slices).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DomainLayout {
    slices: IndexMap<VariableRef, Range<usize>>,
    end: usize,
}

impl DomainLayout {
    /// An empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an explicit slice, as a mesh backend would.
    ///
    /// Replaces any slice previously assigned to `variable`.
    pub fn insert(&mut self, variable: VariableRef, slice: Range<usize>) {
        self.end = self.end.max(slice.end);
        self.slices.insert(variable, slice);
    }

    /// Append slices for every variable not yet laid out, in order.
    ///
    /// Each slice holds `n(primary) * n(secondary) * n(tertiary)` entries,
    /// where `n(level)` sums the mesh points of that level's domains and an
    /// empty level counts as 1. Fails if the mesh has no points for one of
    /// a variable's domains, or if the state vector would outgrow
    /// `isize::MAX` bytes of `f64`; variables laid out before the failure
    /// keep their slices.
    pub fn set_variable_slices<I>(
        &mut self,
        variables: I,
        mesh: &dyn MeshPoints,
    ) -> Result<(), DiscretisationError>
    where
        I: IntoIterator<Item = VariableRef>,
    {
        for variable in variables {
            if self.slices.contains_key(&variable) {
                continue;
            }
            let size = Self::slice_len(&variable, mesh)?;
            let start = self.end;
            self.end = start
                .checked_add(size)
                .filter(|&end| end <= MAX_STATE_LEN)
                .ok_or_else(|| DiscretisationError::TooManyPoints {
                    variable: variable.name.clone(),
                })?;
            tracing::trace!(variable = %variable.name, start, size, "slice assigned");
            self.slices.insert(variable, start..self.end);
        }
        Ok(())
    }

    fn slice_len(variable: &VariableRef, mesh: &dyn MeshPoints) -> Result<usize, DiscretisationError> {
        let too_many = || DiscretisationError::TooManyPoints {
            variable: variable.name.clone(),
        };
        let level = |domains: &[Domain]| -> Result<usize, DiscretisationError> {
            if domains.is_empty() {
                return Ok(1);
            }
            domains.iter().try_fold(0usize, |acc, &domain| {
                match mesh.npts(domain) {
                    Some(n) if n > 0 => acc.checked_add(n).ok_or_else(too_many),
                    _ => Err(DiscretisationError::EmptyDomain {
                        variable: variable.name.clone(),
                        domain,
                    }),
                }
            })
        };
        let primary = level(&variable.domain)?;
        let secondary = level(&variable.auxiliary.secondary)?;
        let tertiary = level(&variable.auxiliary.tertiary)?;
        primary
            .checked_mul(secondary)
            .and_then(|n| n.checked_mul(tertiary))
            .ok_or_else(too_many)
    }

    /// The slice assigned to `variable`.
    pub fn slice(&self, variable: &VariableRef) -> Option<Range<usize>> {
        self.slices.get(variable).cloned()
    }

    /// Total state-vector length covered by the layout.
    pub fn len(&self) -> usize {
        self.end
    }

    /// Whether no variable has been laid out.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Number of variables laid out.
    pub fn variable_count(&self) -> usize {
        self.slices.len()
    }

    /// Iterate over `(variable, slice)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&VariableRef, &Range<usize>)> {
        self.slices.iter()
    }
}
