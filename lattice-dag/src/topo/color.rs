//! Traversal Colors
//!
//! Per-run visit state for the depth-first sort.

use std::collections::HashMap;

use crate::graph::NodeKey;

/// Visit state of a node during one sort.
///
/// Transitions are monotonic: `White -> Gray -> Black`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Not reached yet.
    #[default]
    White,

    /// On the current traversal path. Reaching a gray node again means a cycle.
    Gray,

    /// Fully processed and already emitted.
    Black,
}

/// Colors for every node of one sort run.
///
/// Identifiers the map has never seen read as [`Color::White`], which covers
/// targets of edges whose node has since been removed.
#[derive(Debug)]
pub(crate) struct ColorMap<Id: NodeKey> {
    colors: HashMap<Id, Color>,
}

impl<Id: NodeKey> ColorMap<Id> {
    /// Start every listed node as white.
    pub(crate) fn new(nodes: &[Id]) -> Self {
        let colors = nodes.iter().map(|id| (id.clone(), Color::White)).collect();
        Self { colors }
    }

    pub(crate) fn get(&self, id: &Id) -> Color {
        self.colors.get(id).copied().unwrap_or_default()
    }

    /// Mark a white node as on the current path.
    pub(crate) fn enter(&mut self, id: &Id) {
        debug_assert_eq!(self.get(id), Color::White);
        self.colors.insert(id.clone(), Color::Gray);
    }

    /// Mark a gray node as finished.
    pub(crate) fn finish(&mut self, id: &Id) {
        debug_assert_eq!(self.get(id), Color::Gray);
        self.colors.insert(id.clone(), Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_start_white() {
        let colors = ColorMap::new(&[1u32, 2, 3]);
        assert_eq!(colors.get(&2), Color::White);
    }

    #[test]
    fn unknown_nodes_read_white() {
        let colors = ColorMap::new(&[1u32]);
        assert_eq!(colors.get(&99), Color::White);
    }

    #[test]
    fn color_transitions() {
        let mut colors = ColorMap::new(&["a"]);

        colors.enter(&"a");
        assert_eq!(colors.get(&"a"), Color::Gray);

        colors.finish(&"a");
        assert_eq!(colors.get(&"a"), Color::Black);
    }
}
