//! Directed Graph Implementation
//!
//! [`DirectedGraph`] composes an [`EdgeStore`] with an [`AdjacencyCache`]
//! and implements the [`Graph`] contract on top of them.
//!
//! # Thread Safety
//!
//! The store and the operation counter live together behind one `RwLock`, so
//! a mutation and its counter bump are applied as a unit. Existence checks
//! and edge lookups take the shared side and only wait on writers.
//!
//! Adjacency reads also hold the shared side while they consult the cache.
//! The counter therefore cannot move between the staleness check and the
//! edge scan. Lock order is always store, then rebuild lock, then the
//! published snapshot.

use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;

use super::adjacency::{Adjacency, AdjacencyCache, AdjacencyExport};
use super::store::EdgeStore;
use super::{Graph, NodeKey, Weight};
use crate::error::{GraphError, Result};

/// Store contents plus the number of accepted mutations.
#[derive(Debug)]
struct State<Id: NodeKey> {
    store: EdgeStore<Id>,

    /// Never decremented. Drives cache staleness.
    operations: u64,
}

impl<Id: NodeKey> State<Id> {
    fn record(&mut self, operation: &'static str) {
        self.operations += 1;
        tracing::trace!(operation, version = self.operations, "graph mutated");
    }

    fn check_endpoints(&self, source: &Id, target: &Id) -> Result<(), Id> {
        for id in [source, target] {
            if !self.store.contains_node(id) {
                return Err(GraphError::UndefinedNode { id: id.clone() });
            }
        }
        Ok(())
    }

    fn has_endpoints(&self, source: &Id, target: &Id) -> bool {
        self.store.contains_node(source) && self.store.contains_node(target)
    }
}

/// A thread-safe directed graph with weighted edges.
///
/// Children and parents are answered from a cache that is rebuilt from the
/// full edge map on the first read after any accepted mutation.
///
/// # Removing Nodes
///
/// [`remove_node`](Graph::remove_node) does not touch incident edges. They
/// stay in the store, still show up in the other endpoint's
/// [`children`](Graph::children) / [`parents`](Graph::parents), and
/// reappear through [`edge_weight`](Graph::edge_weight) if the node is added
/// back. Callers that want a clean removal must remove the edges first.
#[derive(Debug)]
pub struct DirectedGraph<Id: NodeKey> {
    state: RwLock<State<Id>>,
    cache: AdjacencyCache<Id>,
}

impl<Id: NodeKey> DirectedGraph<Id> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::from_store(EdgeStore::new())
    }

    /// Create an empty graph with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self::from_store(EdgeStore::with_capacity(nodes, edges))
    }

    fn from_store(store: EdgeStore<Id>) -> Self {
        Self {
            state: RwLock::new(State {
                store,
                operations: 0,
            }),
            cache: AdjacencyCache::new(),
        }
    }

    /// Number of accepted mutations so far.
    pub fn version(&self) -> u64 {
        self.state.read().operations
    }

    /// Number of stored edges, including edges left behind by removed nodes.
    pub fn edge_count(&self) -> usize {
        self.state.read().store.edge_count()
    }

    /// Owned copy of the current children and parents maps.
    pub fn export_adjacency(&self) -> AdjacencyExport<Id> {
        let state = self.state.read();
        self.adjacency(&state).export()
    }

    fn adjacency(&self, state: &State<Id>) -> Arc<Adjacency<Id>> {
        self.cache
            .ensure_fresh(state.operations, || state.store.edge_keys())
    }

    fn neighbours<F>(&self, id: &Id, select: F) -> Option<Vec<Id>>
    where
        F: for<'a> Fn(&'a Adjacency<Id>, &Id) -> Option<&'a IndexSet<Id>>,
    {
        let state = self.state.read();
        if !state.store.contains_node(id) {
            return None;
        }

        let adjacency = self.adjacency(&state);
        let ids = select(&*adjacency, id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        Some(ids)
    }
}

impl<Id: NodeKey> Default for DirectedGraph<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: NodeKey> Graph for DirectedGraph<Id> {
    type Id = Id;

    fn nodes(&self) -> Vec<Id> {
        self.state.read().store.nodes().cloned().collect()
    }

    fn node_count(&self) -> usize {
        self.state.read().store.node_count()
    }

    fn contains_node(&self, id: &Id) -> bool {
        self.state.read().store.contains_node(id)
    }

    fn add_node(&self, id: Id) -> bool {
        let mut state = self.state.write();
        let inserted = state.store.insert_node(id);
        if inserted {
            state.record("add_node");
        }
        inserted
    }

    fn remove_node(&self, id: &Id) -> bool {
        let mut state = self.state.write();
        let removed = state.store.remove_node(id);
        if removed {
            state.record("remove_node");
        }
        removed
    }

    fn children(&self, id: &Id) -> Option<Vec<Id>> {
        self.neighbours(id, Adjacency::children_of)
    }

    fn parents(&self, id: &Id) -> Option<Vec<Id>> {
        self.neighbours(id, Adjacency::parents_of)
    }

    fn edge_weight(&self, source: &Id, target: &Id) -> Option<Weight> {
        let state = self.state.read();
        if !state.has_endpoints(source, target) {
            return None;
        }
        state.store.edge(source, target)
    }

    fn add_edge(&self, source: Id, target: Id, weight: Weight) -> Result<(), Id> {
        let mut state = self.state.write();
        state.check_endpoints(&source, &target)?;

        if state.store.edge(&source, &target).is_some() {
            return Err(GraphError::EdgeConflict {
                from: source,
                to: target,
            });
        }

        state.store.insert_edge_if_absent(source, target, weight);
        state.record("add_edge");
        Ok(())
    }

    fn set_edge(&self, source: Id, target: Id, weight: Weight) -> Result<(), Id> {
        let mut state = self.state.write();
        state.check_endpoints(&source, &target)?;

        state.store.upsert_edge(source, target, weight);
        state.record("set_edge");
        Ok(())
    }

    fn remove_edge(&self, source: &Id, target: &Id) -> bool {
        let mut state = self.state.write();
        if !state.has_endpoints(source, target) {
            return false;
        }

        let removed = state.store.remove_edge(source, target);
        if removed {
            state.record("remove_edge");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn graph_with(nodes: &[&'static str]) -> DirectedGraph<&'static str> {
        let graph = DirectedGraph::new();
        for &id in nodes {
            graph.add_node(id);
        }
        graph
    }

    fn sorted(mut ids: Vec<&'static str>) -> Vec<&'static str> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn add_node_twice() {
        let graph = DirectedGraph::new();

        assert!(graph.add_node("x"));
        assert!(!graph.add_node("x"));
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains_node(&"x"));
    }

    #[test]
    fn edge_requires_both_endpoints() {
        let graph = graph_with(&["a"]);

        let err = graph.add_edge("a", "b", 1).unwrap_err();
        assert_eq!(err, GraphError::UndefinedNode { id: "b" });

        let err = graph.add_edge("z", "a", 1).unwrap_err();
        assert_eq!(err, GraphError::UndefinedNode { id: "z" });

        let err = graph.set_edge("a", "b", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndefinedNode);

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn duplicate_edge_conflicts() {
        let graph = graph_with(&["a", "b"]);

        graph.add_edge("a", "b", 5).unwrap();
        let err = graph.add_edge("a", "b", 7).unwrap_err();

        assert_eq!(err, GraphError::EdgeConflict { from: "a", to: "b" });
        assert_eq!(graph.edge_weight(&"a", &"b"), Some(5));
    }

    #[test]
    fn set_edge_overwrites() {
        let graph = graph_with(&["a", "b"]);

        graph.add_edge("a", "b", 5).unwrap();
        graph.set_edge("a", "b", 7).unwrap();

        assert_eq!(graph.edge_weight(&"a", &"b"), Some(7));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn only_accepted_mutations_bump_version() {
        let graph = DirectedGraph::new();
        assert_eq!(graph.version(), 0);

        graph.add_node("a");
        graph.add_node("a");
        assert_eq!(graph.version(), 1);

        graph.add_node("b");
        graph.add_edge("a", "b", 1).unwrap();
        let _ = graph.add_edge("a", "b", 2);
        let _ = graph.add_edge("a", "c", 2);
        assert_eq!(graph.version(), 3);

        graph.set_edge("a", "b", 3).unwrap();
        assert!(graph.remove_edge(&"a", &"b"));
        assert!(!graph.remove_edge(&"a", &"b"));
        assert!(!graph.remove_node(&"c"));
        assert!(graph.remove_node(&"b"));
        assert_eq!(graph.version(), 6);
    }

    #[test]
    fn children_and_parents_follow_mutations() {
        let graph = graph_with(&["a", "b", "c"]);

        graph.add_edge("a", "b", 1).unwrap();
        graph.add_edge("a", "c", 1).unwrap();
        assert_eq!(sorted(graph.children(&"a").unwrap()), vec!["b", "c"]);
        assert_eq!(graph.parents(&"c").unwrap(), vec!["a"]);

        graph.remove_edge(&"a", &"c");
        assert_eq!(graph.children(&"a").unwrap(), vec!["b"]);
        assert_eq!(graph.parents(&"c").unwrap(), Vec::<&str>::new());

        graph.add_edge("c", "b", 1).unwrap();
        assert_eq!(sorted(graph.parents(&"b").unwrap()), vec!["a", "c"]);
    }

    #[test]
    fn unknown_node_has_no_neighbours() {
        let graph = graph_with(&["a"]);

        assert_eq!(graph.children(&"missing"), None);
        assert_eq!(graph.parents(&"missing"), None);
        assert_eq!(graph.children(&"a"), Some(Vec::new()));
    }

    #[test]
    fn remove_edge_needs_endpoints() {
        let graph = graph_with(&["a", "b"]);
        graph.add_edge("a", "b", 1).unwrap();

        assert!(!graph.remove_edge(&"a", &"zz"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn removing_a_node_keeps_its_edges() {
        let graph = graph_with(&["a", "b"]);
        graph.add_edge("a", "b", 4).unwrap();

        assert!(graph.remove_node(&"a"));

        assert!(!graph.contains_node(&"a"));
        assert_eq!(graph.edge_count(), 1);
        // Hidden while an endpoint is missing.
        assert_eq!(graph.edge_weight(&"a", &"b"), None);
        assert!(!graph.remove_edge(&"a", &"b"));
        // Still derived into the surviving endpoint's adjacency.
        assert_eq!(graph.parents(&"b").unwrap(), vec!["a"]);

        graph.add_node("a");
        assert_eq!(graph.edge_weight(&"a", &"b"), Some(4));
    }

    #[test]
    fn export_matches_queries() {
        let graph = graph_with(&["a", "b", "c"]);
        graph.add_edge("a", "b", 1).unwrap();
        graph.add_edge("b", "c", 1).unwrap();

        let export = graph.export_adjacency();

        assert_eq!(export.children.get(&"a"), Some(&vec!["b"]));
        assert_eq!(export.children.get(&"b"), Some(&vec!["c"]));
        assert_eq!(export.parents.get(&"c"), Some(&vec!["b"]));
        assert!(export.children.get(&"c").is_none());
    }

    #[test]
    fn nodes_are_listed_in_insertion_order() {
        let graph = graph_with(&["q", "w", "e"]);
        graph.remove_node(&"w");
        graph.add_node("w");

        assert_eq!(graph.nodes(), vec!["q", "e", "w"]);
    }
}
