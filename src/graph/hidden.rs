//! Permanent graph + visibility flags

use super::{BitSetFlags, Flags, LinearGraph, ListenerId, NodeRef, UpdateRange};
use crate::error::{GraphError, Result};

type Listener = Box<dyn FnMut(&UpdateRange)>;

/// Wraps the permanent graph with per-node visibility.
///
/// Neighbour queries are NOT filtered by visibility: `up_nodes`/`down_nodes`
/// return hidden neighbours too, in permanent index space. Callers decide
/// what a hidden neighbour means for them.
pub struct HiddenNodesGraph<G> {
    graph: G,
    flags: BitSetFlags,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<G: LinearGraph> HiddenNodesGraph<G> {
    /// Every node starts visible
    pub fn new(graph: G) -> Self {
        let flags = BitSetFlags::new(graph.nodes_count(), true);
        Self::from_parts(graph, flags)
    }

    pub fn with_flags(graph: G, flags: BitSetFlags) -> Result<Self> {
        if flags.size() != graph.nodes_count() {
            return Err(GraphError::FlagsSizeMismatch {
                flags: flags.size(),
                nodes: graph.nodes_count(),
            });
        }
        Ok(Self::from_parts(graph, flags))
    }

    fn from_parts(graph: G, flags: BitSetFlags) -> Self {
        Self {
            graph,
            flags,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn node_is_visible(&self, node_index: usize) -> bool {
        self.flags.get(node_index)
    }

    pub fn flags(&self) -> &BitSetFlags {
        &self.flags
    }

    pub fn permanent_graph(&self) -> &G {
        &self.graph
    }

    /// Listeners run synchronously, in registration order, after each change
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&UpdateRange) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Mutate the flags, then notify listeners with `[up, down]`.
    ///
    /// Every index whose flag `change` touches must lie inside `[up, down]`;
    /// an index outside it leaves dependent index maps stale.
    pub fn apply_flags_change<R, F>(&mut self, up: usize, down: usize, change: F) -> R
    where
        F: FnOnce(&mut BitSetFlags) -> R,
    {
        let (result, range) = self.change_flags(up, down, change);
        self.notify(&range);
        result
    }

    pub fn set_visible(&mut self, node_index: usize, visible: bool) {
        self.apply_flags_change(node_index, node_index, |flags| flags.set(node_index, visible));
    }

    /// `range` must be non-empty
    pub fn set_range_visible(&mut self, range: std::ops::Range<usize>, visible: bool) {
        assert!(!range.is_empty(), "empty visibility range {:?}", range);
        let (up, down) = (range.start, range.end - 1);
        self.apply_flags_change(up, down, |flags| flags.set_range(range, visible));
    }

    /// Mutation without notification; the printed graph updates its map
    /// between this and `notify`.
    pub(crate) fn change_flags<R, F>(&mut self, up: usize, down: usize, change: F) -> (R, UpdateRange)
    where
        F: FnOnce(&mut BitSetFlags) -> R,
    {
        let range = UpdateRange::new(up, down);
        assert!(
            range.down < self.flags.size(),
            "visibility range {:?} out of range (size {})",
            range,
            self.flags.size()
        );
        (change(&mut self.flags), range)
    }

    pub(crate) fn notify(&mut self, range: &UpdateRange) {
        tracing::trace!("Visibility changed in {:?}, {} listeners", range, self.listeners.len());
        for (_, listener) in self.listeners.iter_mut() {
            listener(range);
        }
    }
}

impl<G: LinearGraph> LinearGraph for HiddenNodesGraph<G> {
    fn nodes_count(&self) -> usize {
        self.graph.nodes_count()
    }

    fn up_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        self.graph.up_nodes(node_index)
    }

    fn down_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        self.graph.down_nodes(node_index)
    }
}
