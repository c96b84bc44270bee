//! Topological Sorter
//!
//! Depth-first topological ordering with three-color cycle detection.
//!
//! # Algorithm
//!
//! 1. Every node of the graph starts white.
//! 2. Visiting a white node turns it gray and pushes a frame holding its
//!    children onto an explicit work stack.
//! 3. The top frame hands out its next child:
//!    - white: turn it gray and push its own frame,
//!    - gray: the child is an ancestor on the current path, so the graph has
//!      a cycle and the whole sort fails,
//!    - black: already emitted through another path, skip it.
//! 4. A frame with no children left is popped; its node turns black and is
//!    appended to the output.
//!
//! Children are therefore always emitted before their parents. The explicit
//! stack keeps deep graphs from exhausting the call stack.
//!
//! # Ordering
//!
//! With [`Enumeration`] the sorter visits children in whatever order the
//! graph returns them. [`Ascending`] sorts them by identifier first, which
//! makes the output canonical for a given graph.

use smallvec::SmallVec;

use super::color::{Color, ColorMap};
use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Strategy for ordering children (and roots) before they are visited.
pub trait ChildOrder<Id> {
    /// Reorder `ids` in place.
    fn arrange(&self, ids: &mut [Id]);
}

/// Visit nodes in the order the graph enumerates them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enumeration;

impl<Id> ChildOrder<Id> for Enumeration {
    fn arrange(&self, _ids: &mut [Id]) {}
}

/// Visit nodes in ascending identifier order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

impl<Id: Ord> ChildOrder<Id> for Ascending {
    fn arrange(&self, ids: &mut [Id]) {
        ids.sort_unstable();
    }
}

/// One node being expanded on the work stack.
struct Frame<Id> {
    id: Id,
    children: SmallVec<[Id; 8]>,
    next: usize,
}

/// Topological sorting over any [`Graph`].
///
/// The sorter only uses [`Graph::nodes`] and [`Graph::children`]; it never
/// sees the graph's storage. Each call works on its own color map, so one
/// sorter can be reused and shared.
///
/// # Example
///
/// ```rust
/// use lattice_dag::graph::{DirectedGraph, Graph};
/// use lattice_dag::topo::TopoSorter;
///
/// let graph = DirectedGraph::new();
/// for id in ["app", "lib", "core"] {
///     graph.add_node(id);
/// }
/// graph.add_edge("app", "lib", 1).unwrap();
/// graph.add_edge("lib", "core", 1).unwrap();
///
/// let order = TopoSorter::new(&graph).sort_from(&"app").unwrap();
/// assert_eq!(order, vec!["core", "lib", "app"]);
/// ```
#[derive(Debug)]
pub struct TopoSorter<'g, G: Graph + ?Sized, O = Enumeration> {
    graph: &'g G,
    order: O,
}

impl<'g, G: Graph + ?Sized> TopoSorter<'g, G> {
    /// Create a sorter that follows the graph's own enumeration order.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            order: Enumeration,
        }
    }
}

impl<'g, G, O> TopoSorter<'g, G, O>
where
    G: Graph + ?Sized,
    O: ChildOrder<G::Id>,
{
    /// Create a sorter with an explicit child ordering.
    pub fn with_order(graph: &'g G, order: O) -> Self {
        Self { graph, order }
    }

    /// Sort the subgraph reachable from `start`.
    ///
    /// The output holds `start` and everything reachable from it, children
    /// before parents, with `start` last.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UndefinedNode`] if `start` (or a node reached through a
    ///   dangling edge) is not in the graph.
    /// - [`GraphError::NotAcyclic`] if a cycle is reachable from `start`.
    pub fn sort_from(&self, start: &G::Id) -> Result<Vec<G::Id>, G::Id> {
        let nodes = self.graph.nodes();
        let mut colors = ColorMap::new(&nodes);
        let mut output = Vec::new();

        self.visit(start.clone(), &mut colors, &mut output)?;
        Ok(output)
    }

    /// Sort every node in the graph.
    ///
    /// Roots are taken in enumeration order (rearranged by the sorter's
    /// [`ChildOrder`]); nodes already emitted from an earlier root are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Same as [`sort_from`](Self::sort_from), for any node in the graph.
    pub fn sort_all(&self) -> Result<Vec<G::Id>, G::Id> {
        let mut nodes = self.graph.nodes();
        self.order.arrange(&mut nodes);

        let mut colors = ColorMap::new(&nodes);
        let mut output = Vec::with_capacity(nodes.len());

        for id in nodes {
            if colors.get(&id) == Color::White {
                self.visit(id, &mut colors, &mut output)?;
            }
        }

        tracing::trace!(sorted = output.len(), "topological sort complete");
        Ok(output)
    }

    fn visit(
        &self,
        start: G::Id,
        colors: &mut ColorMap<G::Id>,
        output: &mut Vec<G::Id>,
    ) -> Result<(), G::Id> {
        match colors.get(&start) {
            Color::White => {}
            Color::Gray => return Err(self.cycle_at(start)),
            Color::Black => return Ok(()),
        }

        colors.enter(&start);
        let mut stack = vec![self.expand(start)?];

        while let Some(frame) = stack.last_mut() {
            let next = frame.children.get(frame.next).cloned();
            frame.next += 1;

            let Some(child) = next else {
                if let Some(done) = stack.pop() {
                    colors.finish(&done.id);
                    output.push(done.id);
                }
                continue;
            };

            match colors.get(&child) {
                Color::White => {
                    colors.enter(&child);
                    stack.push(self.expand(child)?);
                }
                Color::Gray => return Err(self.cycle_at(child)),
                Color::Black => {}
            }
        }

        Ok(())
    }

    /// Fetch and arrange a node's children.
    fn expand(&self, id: G::Id) -> Result<Frame<G::Id>, G::Id> {
        let Some(children) = self.graph.children(&id) else {
            tracing::debug!(node = ?id, "topological sort reached an undefined node");
            return Err(GraphError::UndefinedNode { id });
        };

        let mut children: SmallVec<[G::Id; 8]> = children.into_iter().collect();
        self.order.arrange(&mut children);

        Ok(Frame {
            id,
            children,
            next: 0,
        })
    }

    fn cycle_at(&self, id: G::Id) -> GraphError<G::Id> {
        tracing::debug!(node = ?id, "cycle detected during topological sort");
        GraphError::NotAcyclic { id }
    }
}
