//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a node within an expression arena.
///
/// Nodes are appended to the arena and assigned sequential IDs.
/// `ExprId(n)` corresponds to the n-th node ever allocated; IDs are never
/// reused, so a root obtained before a rewrite still denotes the original
/// tree afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

impl ExprId {
    /// The index of this node in its arena's node vector.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ExprId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_inner_value() {
        assert_eq!(ExprId(7).index(), 7);
        assert_eq!(ExprId::from(3), ExprId(3));
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(ExprId(12).to_string(), "#12");
    }
}
