//! Node and Edge Storage
//!
//! [`EdgeStore`] owns the node set and the edge map. It does no endpoint
//! validation and keeps no derived state; [`DirectedGraph`](super::DirectedGraph)
//! adds both on top.

use indexmap::{IndexMap, IndexSet};

use super::{NodeKey, Weight};

/// Node set plus `(source, target) -> weight` map.
///
/// Both collections preserve insertion order, so [`nodes`](Self::nodes) and
/// [`edge_keys`](Self::edge_keys) enumerate deterministically. Removals keep the
/// relative order of the remaining entries.
#[derive(Debug, Clone)]
pub struct EdgeStore<Id: NodeKey> {
    nodes: IndexSet<Id>,
    edges: IndexMap<(Id, Id), Weight>,
}

impl<Id: NodeKey> EdgeStore<Id> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            nodes: IndexSet::new(),
            edges: IndexMap::new(),
        }
    }

    /// Create an empty store with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: IndexSet::with_capacity(nodes),
            edges: IndexMap::with_capacity(edges),
        }
    }

    /// Iterate node identifiers in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Id> + '_ {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check node membership.
    pub fn contains_node(&self, id: &Id) -> bool {
        self.nodes.contains(id)
    }

    /// Insert a node. Returns `false` if it was already present.
    pub fn insert_node(&mut self, id: Id) -> bool {
        self.nodes.insert(id)
    }

    /// Remove a node. Returns `false` if it was absent.
    ///
    /// Edges touching `id` are left alone.
    pub fn remove_node(&mut self, id: &Id) -> bool {
        self.nodes.shift_remove(id)
    }

    /// Iterate every stored `(source, target)` pair in insertion order.
    pub fn edge_keys(&self) -> impl Iterator<Item = &(Id, Id)> + '_ {
        self.edges.keys()
    }

    /// Number of stored edges, including ones whose endpoints were removed.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up an edge weight.
    pub fn edge(&self, source: &Id, target: &Id) -> Option<Weight> {
        // IndexMap lookups need an owned key of the tuple type.
        self.edges
            .get(&(source.clone(), target.clone()))
            .copied()
    }

    /// Store an edge unless the pair already has one.
    ///
    /// Returns `false`, leaving the existing weight untouched, on conflict.
    pub fn insert_edge_if_absent(&mut self, source: Id, target: Id, weight: Weight) -> bool {
        match self.edges.entry((source, target)) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(weight);
                true
            }
        }
    }

    /// Store an edge, overwriting any previous weight for the pair.
    pub fn upsert_edge(&mut self, source: Id, target: Id, weight: Weight) {
        self.edges.insert((source, target), weight);
    }

    /// Remove an edge. Returns `false` if the pair had no edge.
    pub fn remove_edge(&mut self, source: &Id, target: &Id) -> bool {
        self.edges
            .shift_remove(&(source.clone(), target.clone()))
            .is_some()
    }
}

impl<Id: NodeKey> Default for EdgeStore<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_insert_is_idempotent() {
        let mut store = EdgeStore::new();

        assert!(store.insert_node("a"));
        assert!(!store.insert_node("a"));
        assert_eq!(store.node_count(), 1);
        assert!(store.contains_node(&"a"));
    }

    #[test]
    fn remove_node_reports_absence() {
        let mut store = EdgeStore::new();
        store.insert_node(1u32);

        assert!(store.remove_node(&1));
        assert!(!store.remove_node(&1));
        assert!(!store.contains_node(&1));
    }

    #[test]
    fn enumeration_follows_insertion_order() {
        let mut store = EdgeStore::new();
        for id in ["c", "a", "d", "b"] {
            store.insert_node(id);
        }

        store.remove_node(&"a");
        store.upsert_edge("d", "b", 1);
        store.upsert_edge("c", "d", 1);

        assert_eq!(
            store.edge_keys().cloned().collect::<Vec<_>>(),
            vec![("d", "b"), ("c", "d")]
        );
        let order: Vec<_> = store.nodes().copied().collect();
        assert_eq!(order, vec!["c", "d", "b"]);
    }

    #[test]
    fn insert_if_absent_keeps_first_weight() {
        let mut store = EdgeStore::new();

        assert!(store.insert_edge_if_absent("a", "b", 5));
        assert!(!store.insert_edge_if_absent("a", "b", 7));
        assert_eq!(store.edge(&"a", &"b"), Some(5));

        // The reverse pair is a different edge.
        assert!(store.insert_edge_if_absent("b", "a", 7));
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn upsert_overwrites() {
        let mut store = EdgeStore::new();

        store.upsert_edge("a", "b", 5);
        store.upsert_edge("a", "b", 7);

        assert_eq!(store.edge(&"a", &"b"), Some(7));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn edges_need_no_nodes() {
        let mut store: EdgeStore<&str> = EdgeStore::new();

        store.upsert_edge("x", "y", 1);

        assert_eq!(store.node_count(), 0);
        assert_eq!(store.edge(&"x", &"y"), Some(1));
        assert!(store.remove_edge(&"x", &"y"));
        assert!(!store.remove_edge(&"x", &"y"));
        assert_eq!(store.edge(&"x", &"y"), None);
    }
}
