//! Topological Sorting
//!
//! Dependency-respecting linearization of a [`Graph`](crate::graph::Graph).
//!
//! # Overview
//!
//! [`TopoSorter`] borrows any graph implementing the contract and offers two
//! entry points:
//!
//! - [`TopoSorter::sort_from`] orders the nodes reachable from one start node.
//! - [`TopoSorter::sort_all`] orders every node in the graph.
//!
//! Both emit children before parents: for every edge `(u, v)` covered by the
//! sort, `v` appears before `u`. A cycle anywhere in the covered subgraph
//! fails the whole call with [`GraphError::NotAcyclic`](crate::GraphError::NotAcyclic);
//! no partial order is returned.
//!
//! # Determinism
//!
//! [`DirectedGraph`](crate::graph::DirectedGraph) enumerates nodes and children
//! in insertion order, so repeated sorts of an unchanged graph agree. For a
//! canonical order that does not depend on insertion history, use
//! [`TopoSorter::with_order`] with [`Ascending`].

mod color;
mod sorter;

pub use color::Color;
pub use sorter::{Ascending, ChildOrder, Enumeration, TopoSorter};
