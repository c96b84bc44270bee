//! Adjacency Cache
//!
//! Children and parents sets derived from an edge map.
//!
//! # How It Works
//!
//! 1. The owning graph passes in its current operation count on every read.
//!
//! 2. If the published [`Adjacency`] was built at that count, it is returned
//!    as-is (a cache hit costs one shared lock and an `Arc` clone).
//!
//! 3. Otherwise the caller takes the rebuild lock, checks the count again
//!    (another thread may have rebuilt while it waited), and if still stale
//!    scans every edge once to build fresh maps, then publishes them.
//!
//! A published [`Adjacency`] is immutable. Mutations that land after it was
//! handed out are only visible through the next [`AdjacencyCache::ensure_fresh`]
//! call that observes a newer count.
//!
//! # Thread Safety
//!
//! The rebuild lock only serializes rebuilds. Readers of a fresh snapshot
//! never touch it.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use super::NodeKey;

/// Children and parents maps built from one scan of the edge map.
#[derive(Debug)]
pub struct Adjacency<Id: NodeKey> {
    /// Operation count the maps were built at.
    version: u64,

    /// `source -> {target}` for every stored edge.
    children: IndexMap<Id, IndexSet<Id>>,

    /// `target -> {source}` for every stored edge.
    parents: IndexMap<Id, IndexSet<Id>>,
}

impl<Id: NodeKey> Adjacency<Id> {
    fn empty(version: u64) -> Self {
        Self {
            version,
            children: IndexMap::new(),
            parents: IndexMap::new(),
        }
    }

    /// Build both maps from a full edge scan.
    pub fn build<'a, I>(version: u64, edges: I) -> Self
    where
        I: IntoIterator<Item = &'a (Id, Id)>,
        Id: 'a,
    {
        let mut adjacency = Self::empty(version);
        for (source, target) in edges {
            adjacency
                .children
                .entry(source.clone())
                .or_default()
                .insert(target.clone());
            adjacency
                .parents
                .entry(target.clone())
                .or_default()
                .insert(source.clone());
        }
        adjacency
    }

    /// The operation count these maps reflect.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Targets of edges leaving `id`. `None` if it has no outgoing edges.
    pub fn children_of(&self, id: &Id) -> Option<&IndexSet<Id>> {
        self.children.get(id)
    }

    /// Sources of edges entering `id`. `None` if it has no incoming edges.
    pub fn parents_of(&self, id: &Id) -> Option<&IndexSet<Id>> {
        self.parents.get(id)
    }

    /// Copy both maps into an owned, serializable form.
    pub fn export(&self) -> AdjacencyExport<Id> {
        fn flatten<Id: NodeKey>(map: &IndexMap<Id, IndexSet<Id>>) -> IndexMap<Id, Vec<Id>> {
            map.iter()
                .map(|(id, set)| (id.clone(), set.iter().cloned().collect()))
                .collect()
        }

        AdjacencyExport {
            children: flatten(&self.children),
            parents: flatten(&self.parents),
        }
    }
}

/// Owned snapshot of the adjacency maps.
///
/// Only nodes with at least one outgoing (resp. incoming) edge get an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyExport<Id: NodeKey> {
    /// `source -> [target]`.
    pub children: IndexMap<Id, Vec<Id>>,

    /// `target -> [source]`.
    pub parents: IndexMap<Id, Vec<Id>>,
}

/// Lazily rebuilt adjacency, keyed by operation count.
#[derive(Debug)]
pub struct AdjacencyCache<Id: NodeKey> {
    /// The last published build.
    current: RwLock<Arc<Adjacency<Id>>>,

    /// Held for the duration of a rebuild.
    rebuild: Mutex<()>,
}

impl<Id: NodeKey> AdjacencyCache<Id> {
    /// Create a cache that is fresh for an empty graph at operation count 0.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Adjacency::empty(0))),
            rebuild: Mutex::new(()),
        }
    }

    /// Return adjacency consistent with `version`, rebuilding if needed.
    ///
    /// `scan` is only called on a miss, at most once, and must yield every
    /// edge as it exists at `version`. Concurrent callers that miss on the
    /// same version collapse into a single rebuild.
    pub fn ensure_fresh<'a, F, I>(&self, version: u64, scan: F) -> Arc<Adjacency<Id>>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = &'a (Id, Id)>,
        Id: 'a,
    {
        if let Some(hit) = self.lookup(version) {
            return hit;
        }

        let _rebuilding = self.rebuild.lock();

        if let Some(hit) = self.lookup(version) {
            tracing::trace!(version, "adjacency rebuilt by a concurrent reader");
            return hit;
        }

        let fresh = Arc::new(Adjacency::build(version, scan()));
        tracing::debug!(
            version,
            sources = fresh.children.len(),
            targets = fresh.parents.len(),
            "rebuilt adjacency cache"
        );

        *self.current.write() = Arc::clone(&fresh);
        fresh
    }

    /// Operation count of the last published build.
    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    fn lookup(&self, version: u64) -> Option<Arc<Adjacency<Id>>> {
        let current = self.current.read();
        (current.version == version).then(|| Arc::clone(&current))
    }
}

impl<Id: NodeKey> Default for AdjacencyCache<Id> {
    fn default() -> Self {
        Self::new()
    }
}
