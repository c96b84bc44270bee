//! Directed Graph
//!
//! This module implements a mutable, thread-safe directed graph with
//! weighted edges and lazily derived adjacency views.
//!
//! # Overview
//!
//! The graph is split into three layers:
//!
//! - [`EdgeStore`]: the node set and the `(source, target) -> weight` map.
//!   A plain storage primitive with no endpoint validation.
//! - [`AdjacencyCache`]: children and parents sets derived from the edge map,
//!   rebuilt in full whenever the graph has mutated since the last build.
//! - [`DirectedGraph`]: composes the two behind the [`Graph`] contract,
//!   validates endpoints, rejects duplicate edges and counts mutations.
//!
//! # Design Decisions
//!
//! 1. The adjacency views are never patched incrementally. Every accepted
//!    mutation bumps an operation counter; a read that sees a counter newer
//!    than the cached one rebuilds both maps from the edge map.
//!
//! 2. The store and the cache have separate locks, so readers hitting a fresh
//!    cache only contend on a shared read lock.
//!
//! 3. Removing a node leaves its incident edges in the store. Edge cleanup is
//!    the caller's job; see [`DirectedGraph::remove_node`].
//!
//! 4. Algorithms such as [`TopoSorter`](crate::topo::TopoSorter) are written
//!    against [`Graph`], never against [`DirectedGraph`] itself.

mod adjacency;
mod directed;
mod store;

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;

pub use adjacency::{Adjacency, AdjacencyCache, AdjacencyExport};
pub use directed::DirectedGraph;
pub use store::EdgeStore;

/// Opaque edge payload. The graph never interprets it.
pub type Weight = u64;

/// Bound for node identifiers.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Debug` type, so strings,
/// integers and caller-defined keys all work.
pub trait NodeKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeKey for T {}

/// The abstract graph contract.
///
/// Mutating methods take `&self`: implementations synchronize internally so a
/// graph can be shared across threads behind an `Arc`.
pub trait Graph {
    /// Node identifier type.
    type Id: NodeKey;

    /// All node identifiers, in enumeration order.
    fn nodes(&self) -> Vec<Self::Id>;

    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Whether `id` is in the node set.
    fn contains_node(&self, id: &Self::Id) -> bool;

    /// Insert a node. Returns `false` if it was already present.
    fn add_node(&self, id: Self::Id) -> bool;

    /// Remove a node. Returns `false` if it was absent.
    fn remove_node(&self, id: &Self::Id) -> bool;

    /// Successors of `id`, or `None` if `id` is not a node.
    fn children(&self, id: &Self::Id) -> Option<Vec<Self::Id>>;

    /// Predecessors of `id`, or `None` if `id` is not a node.
    fn parents(&self, id: &Self::Id) -> Option<Vec<Self::Id>>;

    /// Weight of the edge `source -> target`.
    ///
    /// `None` if either endpoint is missing or there is no such edge. The two
    /// cases are not distinguished.
    fn edge_weight(&self, source: &Self::Id, target: &Self::Id) -> Option<Weight>;

    /// Insert a new edge.
    ///
    /// Fails with `UndefinedNode` if an endpoint is missing and with
    /// `EdgeConflict` if the pair already has an edge.
    fn add_edge(&self, source: Self::Id, target: Self::Id, weight: Weight)
        -> Result<(), Self::Id>;

    /// Insert or overwrite an edge. Fails only with `UndefinedNode`.
    fn set_edge(&self, source: Self::Id, target: Self::Id, weight: Weight)
        -> Result<(), Self::Id>;

    /// Remove an edge. Returns `false` if an endpoint or the edge is missing.
    fn remove_edge(&self, source: &Self::Id, target: &Self::Id) -> bool;
}
