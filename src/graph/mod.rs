//! Graph API: permanent commit graph and the adapters that project it into
//! visible-index space.
//!
//! Layering, bottom to top:
//!
//! - [`PermanentLinearGraph`]: the full commit DAG, permanent indices `0..N`
//! - [`HiddenNodesGraph`]: permanent graph + visibility flags + change listeners
//! - [`PrintedGraph`]: everything translated into visible indices `0..M`
//! - [`CommitInfoGraph`]: commit ids, timestamps and heads on top of that

pub mod flags;
pub mod traversal;
pub mod permanent;
pub mod commit;
pub mod layout;
pub mod hidden;
pub mod printed;
pub mod commit_info;


use std::fmt::Debug;
use std::hash::Hash;

pub use flags::{BitSetFlags, Flags};
pub use permanent::PermanentLinearGraph;
pub use commit::{GraphCommit, PermanentCommitsInfoImpl};
pub use layout::GraphLayoutImpl;
pub use hidden::HiddenNodesGraph;
pub use printed::PrintedGraph;
pub use commit_info::{CommitInfoGraph, LogGraph};

/// Endpoint of an edge.
///
/// `NotLoaded` marks an edge leaving the loaded part of the log (a parent that
/// was never read). It has no index in any space and is never translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Index(usize),
    NotLoaded,
}

impl NodeRef {
    pub fn index(self) -> Option<usize> {
        match self {
            NodeRef::Index(index) => Some(index),
            NodeRef::NotLoaded => None,
        }
    }

    pub fn is_not_loaded(self) -> bool {
        self == NodeRef::NotLoaded
    }
}

impl From<usize> for NodeRef {
    fn from(index: usize) -> Self {
        NodeRef::Index(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    #[default]
    Usual,
    /// Kept for graph structure, does not match the active filter
    Unmatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeType {
    #[default]
    Usual,
    /// Drawn dotted: stands for a path through hidden commits
    Dotted,
    NotLoadCommit,
}

/// Closed range of permanent indices whose visibility may have changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateRange {
    pub up: usize,
    pub down: usize,
}

impl UpdateRange {
    /// Endpoints may come in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self { up: a.min(b), down: a.max(b) }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.up <= index && index <= self.down
    }
}

/// Handle returned by listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Node/edge queries over a graph in some index space.
///
/// Indices passed in must be `< nodes_count()`; violating that is a caller bug
/// and panics.
pub trait LinearGraph {
    fn nodes_count(&self) -> usize;

    /// Children (newer commits)
    fn up_nodes(&self, node_index: usize) -> Vec<NodeRef>;

    /// Parents (older commits)
    fn down_nodes(&self, node_index: usize) -> Vec<NodeRef>;

    fn node_type(&self, _node_index: usize) -> NodeType {
        NodeType::Usual
    }

    fn edge_type(&self, _up_node_index: usize, _down_node: NodeRef) -> EdgeType {
        EdgeType::Usual
    }
}

/// A graph ready for rendering: visible-index space plus layout positions
pub trait PrintedLinearGraph: LinearGraph {
    fn layout_index(&self, node_index: usize) -> usize;

    /// Layout index of the head this node was laid out under
    fn head_layout_index(&self, node_index: usize) -> usize;
}

/// Branch/head ordering over permanent indices
pub trait GraphLayout {
    fn nodes_count(&self) -> usize;

    fn layout_index(&self, node_index: usize) -> usize;

    fn one_of_head_node_index(&self, node_index: usize) -> usize;

    fn head_node_indices(&self) -> &[usize];
}

/// Commit identity store keyed by permanent index
pub trait PermanentCommitsInfo {
    type CommitId: Clone + Eq + Hash + Debug;

    fn nodes_count(&self) -> usize;

    fn commit_id(&self, node_index: usize) -> Self::CommitId;

    fn timestamp(&self, node_index: usize) -> i64;

    fn node_index(&self, commit_id: &Self::CommitId) -> Option<usize>;
}
