//! Graph Errors
//!
//! Every fallible graph or sort operation returns a [`GraphError`] carrying
//! the identifier(s) involved. Nothing in this crate panics on bad input and
//! nothing is retried internally.

use std::fmt::Debug;

/// Convenience alias for results produced by graph and sort operations.
pub type Result<T, Id> = std::result::Result<T, GraphError<Id>>;

/// Category of a [`GraphError`], without the identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced node is not in the node set.
    UndefinedNode,

    /// An edge already exists for the ordered pair.
    EdgeConflict,

    /// A topological sort found a cycle.
    NotAcyclic,
}

/// Errors returned by [`Graph`](crate::graph::Graph) mutations and
/// [`TopoSorter`](crate::topo::TopoSorter) runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError<Id: Debug> {
    /// An operation referenced a node identifier that is not present.
    #[error("undefined node: id = {id:?}")]
    UndefinedNode {
        /// The missing identifier.
        id: Id,
    },

    /// `add_edge` targeted a pair that already has an edge.
    #[error("edge conflicts: source = {from:?}, target = {to:?}")]
    EdgeConflict {
        /// Source endpoint of the existing edge.
        from: Id,
        /// Target endpoint of the existing edge.
        to: Id,
    },

    /// A back-edge to a node still being expanded was found.
    #[error("graph is not acyclic: cycle detected at {id:?}")]
    NotAcyclic {
        /// The node reached twice on the current traversal path.
        id: Id,
    },
}

impl<Id: Debug> GraphError<Id> {
    /// The error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedNode { .. } => ErrorKind::UndefinedNode,
            Self::EdgeConflict { .. } => ErrorKind::EdgeConflict,
            Self::NotAcyclic { .. } => ErrorKind::NotAcyclic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_identifiers() {
        let err: GraphError<&str> = GraphError::EdgeConflict { from: "a", to: "b" };
        assert_eq!(
            err.to_string(),
            "edge conflicts: source = \"a\", target = \"b\""
        );

        let err: GraphError<u32> = GraphError::UndefinedNode { id: 7 };
        assert_eq!(err.to_string(), "undefined node: id = 7");
        assert_eq!(err.kind(), ErrorKind::UndefinedNode);
    }

    #[test]
    fn kind_matches_variant() {
        let err: GraphError<u32> = GraphError::NotAcyclic { id: 1 };
        assert_eq!(err.kind(), ErrorKind::NotAcyclic);
    }
}
