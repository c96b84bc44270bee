//! Lattice DAG
//!
//! This crate provides a generic, thread-safe directed graph and a
//! topological sorter built on top of it. It implements:
//!
//! - Node and weighted-edge storage with endpoint validation
//! - Children and parents views derived lazily from the edge set
//! - Depth-first topological sorting with cycle detection
//!
//! # Architecture
//!
//! The crate is organized into a few modules:
//!
//! - `graph`: the [`Graph`](graph::Graph) contract, storage, adjacency cache
//!   and [`DirectedGraph`](graph::DirectedGraph)
//! - `topo`: [`TopoSorter`](topo::TopoSorter) and its traversal state
//! - `error`: [`GraphError`] and friends
//!
//! # Example
//!
//! ```rust
//! use lattice_dag::graph::{DirectedGraph, Graph};
//! use lattice_dag::topo::TopoSorter;
//! use lattice_dag::GraphError;
//!
//! let graph = DirectedGraph::new();
//! graph.add_node("a");
//! graph.add_node("b");
//! graph.add_node("c");
//!
//! graph.add_edge("a", "b", 1).unwrap();
//! graph.add_edge("b", "c", 1).unwrap();
//! assert!(matches!(
//!     graph.add_edge("a", "b", 2),
//!     Err(GraphError::EdgeConflict { .. })
//! ));
//!
//! assert_eq!(graph.children(&"a"), Some(vec!["b"]));
//! assert_eq!(TopoSorter::new(&graph).sort_all().unwrap(), vec!["c", "b", "a"]);
//! ```
//!
//! Identifiers can be any `Clone + Eq + Hash + Debug` type.

pub mod error;
pub mod graph;
pub mod topo;

pub use error::{ErrorKind, GraphError, Result};
