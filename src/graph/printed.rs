//! Hidden-nodes graph translated into visible-index space

use super::{
    BitSetFlags, EdgeType, Flags, GraphLayout, HiddenNodesGraph, LinearGraph, ListenerId, NodeRef, NodeType,
    PrintedLinearGraph, UpdateRange,
};
use crate::config::IndexConfig;
use crate::error::{GraphError, Result};
use crate::index::{ListIntToIntMap, UpdatableIntToIntMap};

/// Visible-index view used for rendering.
///
/// Owns the hidden-nodes graph, the layout and the one compaction map. All
/// visibility changes go through this type so the map is updated before
/// listeners on the hidden graph hear about the change.
pub struct PrintedGraph<G, L> {
    hidden: HiddenNodesGraph<G>,
    layout: L,
    map: ListIntToIntMap,
    config: IndexConfig,
}

impl<G: LinearGraph, L: GraphLayout> PrintedGraph<G, L> {
    pub fn new(hidden: HiddenNodesGraph<G>, layout: L) -> Result<Self> {
        Self::with_config(hidden, layout, IndexConfig::default())
    }

    pub fn with_config(hidden: HiddenNodesGraph<G>, layout: L, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        if layout.nodes_count() != hidden.nodes_count() {
            return Err(GraphError::LayoutSizeMismatch {
                layout: layout.nodes_count(),
                nodes: hidden.nodes_count(),
            });
        }

        let map = ListIntToIntMap::with_config(hidden.flags(), &config);
        tracing::info!(
            "Printed graph ready: {} of {} nodes visible",
            map.short_size(),
            map.long_size()
        );

        Ok(Self { hidden, layout, map, config })
    }

    pub fn hidden_graph(&self) -> &HiddenNodesGraph<G> {
        &self.hidden
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn compaction_map(&self) -> &ListIntToIntMap {
        &self.map
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Panics if `visible_index >= nodes_count()`
    #[inline]
    pub fn permanent_index(&self, visible_index: usize) -> usize {
        self.map.long_index(visible_index, self.hidden.flags())
    }

    /// `None` for a hidden node
    #[inline]
    pub fn visible_index(&self, permanent_index: usize) -> Option<usize> {
        self.map.short_index(permanent_index, self.hidden.flags())
    }

    // NotLoaded is checked before any lookup; hidden neighbours are dropped
    fn to_visible(&self, node: NodeRef) -> Option<NodeRef> {
        match node {
            NodeRef::NotLoaded => Some(NodeRef::NotLoaded),
            NodeRef::Index(permanent) => self.visible_index(permanent).map(NodeRef::Index),
        }
    }

    fn translate_neighbours(&self, neighbours: Vec<NodeRef>) -> Vec<NodeRef> {
        neighbours.into_iter().filter_map(|node| self.to_visible(node)).collect()
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&UpdateRange) + 'static,
    {
        self.hidden.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.hidden.remove_listener(id)
    }

    /// Same contract as [`HiddenNodesGraph::apply_flags_change`]; the map is
    /// updated for `[up, down]` before listeners run.
    pub fn apply_flags_change<R, F>(&mut self, up: usize, down: usize, change: F) -> R
    where
        F: FnOnce(&mut BitSetFlags) -> R,
    {
        let (result, range) = self.hidden.change_flags(up, down, change);
        self.map.update(range.up, range.down, self.hidden.flags());
        self.hidden.notify(&range);
        result
    }

    pub fn set_visible(&mut self, permanent_index: usize, visible: bool) {
        self.apply_flags_change(permanent_index, permanent_index, |flags| {
            flags.set(permanent_index, visible)
        });
    }

    /// `range` must be non-empty
    pub fn set_range_visible(&mut self, range: std::ops::Range<usize>, visible: bool) {
        assert!(!range.is_empty(), "empty visibility range {:?}", range);
        let (up, down) = (range.start, range.end - 1);
        self.apply_flags_change(up, down, |flags| flags.set_range(range, visible));
    }

    /// Make visibility match `visible(permanent_index)` for every node, as one
    /// change bounded by the first and last node that actually flips.
    ///
    /// Returns the applied range, or `None` when nothing changed.
    pub fn set_visibility_by<P>(&mut self, mut visible: P) -> Option<UpdateRange>
    where
        P: FnMut(usize) -> bool,
    {
        let flags = self.hidden.flags();
        let flipped: Vec<usize> = (0..flags.size())
            .filter(|&i| flags.get(i) != visible(i))
            .collect();

        let (&first, &last) = (flipped.first()?, flipped.last()?);
        self.apply_flags_change(first, last, |flags| {
            for &i in &flipped {
                let current = flags.get(i);
                flags.set(i, !current);
            }
        });
        Some(UpdateRange::new(first, last))
    }

    /// Full rebuild of the compaction map from the current flags
    pub fn rebuild_index(&mut self) {
        self.map.rebuild(self.hidden.flags(), &self.config);
    }
}

impl<G: LinearGraph, L: GraphLayout> LinearGraph for PrintedGraph<G, L> {
    fn nodes_count(&self) -> usize {
        self.map.short_size()
    }

    fn up_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        let permanent = self.permanent_index(node_index);
        self.translate_neighbours(self.hidden.up_nodes(permanent))
    }

    fn down_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        let permanent = self.permanent_index(node_index);
        self.translate_neighbours(self.hidden.down_nodes(permanent))
    }

    fn node_type(&self, node_index: usize) -> NodeType {
        self.hidden.node_type(self.permanent_index(node_index))
    }

    fn edge_type(&self, up_node_index: usize, down_node: NodeRef) -> EdgeType {
        match down_node {
            NodeRef::NotLoaded => EdgeType::Usual,
            NodeRef::Index(down) => self.hidden.edge_type(
                self.permanent_index(up_node_index),
                NodeRef::Index(self.permanent_index(down)),
            ),
        }
    }
}

impl<G: LinearGraph, L: GraphLayout> PrintedLinearGraph for PrintedGraph<G, L> {
    fn layout_index(&self, node_index: usize) -> usize {
        self.layout.layout_index(self.permanent_index(node_index))
    }

    fn head_layout_index(&self, node_index: usize) -> usize {
        let head = self.layout.one_of_head_node_index(self.permanent_index(node_index));
        self.layout.layout_index(head)
    }
}
