//! Commit identity lookups in visible-index space

use std::fmt::Debug;
use std::hash::Hash;

use super::{
    EdgeType, GraphCommit, GraphLayout, GraphLayoutImpl, HiddenNodesGraph, LinearGraph, NodeRef,
    NodeType, PermanentCommitsInfo, PermanentCommitsInfoImpl, PermanentLinearGraph, PrintedGraph,
    PrintedLinearGraph,
};
use crate::config::IndexConfig;
use crate::error::{GraphError, Result};

/// The full stack built from a commit log
pub type LogGraph<Id> = CommitInfoGraph<PermanentLinearGraph, GraphLayoutImpl, PermanentCommitsInfoImpl<Id>>;

/// Printed graph plus commit ids, timestamps and heads.
///
/// Reuses the printed graph's compaction map for every translation.
pub struct CommitInfoGraph<G, L, C> {
    printed: PrintedGraph<G, L>,
    commits: C,
}

impl<G, L, C> CommitInfoGraph<G, L, C>
where
    G: LinearGraph,
    L: GraphLayout,
    C: PermanentCommitsInfo,
{
    pub fn new(printed: PrintedGraph<G, L>, commits: C) -> Result<Self> {
        let nodes = printed.hidden_graph().nodes_count();
        if commits.nodes_count() != nodes {
            return Err(GraphError::CommitsInfoSizeMismatch {
                commits: commits.nodes_count(),
                nodes,
            });
        }
        Ok(Self { printed, commits })
    }

    pub fn printed(&self) -> &PrintedGraph<G, L> {
        &self.printed
    }

    /// Visibility changes go through the printed graph
    pub fn printed_mut(&mut self) -> &mut PrintedGraph<G, L> {
        &mut self.printed
    }

    pub fn commits_info(&self) -> &C {
        &self.commits
    }

    pub fn commit_id(&self, visible_index: usize) -> C::CommitId {
        self.commits.commit_id(self.printed.permanent_index(visible_index))
    }

    pub fn timestamp(&self, visible_index: usize) -> i64 {
        self.commits.timestamp(self.printed.permanent_index(visible_index))
    }

    /// Id of the head this commit was laid out under
    pub fn one_of_heads(&self, visible_index: usize) -> C::CommitId {
        let permanent = self.printed.permanent_index(visible_index);
        let head = self.printed.layout().one_of_head_node_index(permanent);
        self.commits.commit_id(head)
    }

    /// `None` if the commit is unknown or currently hidden; the two cases are
    /// not told apart.
    pub fn node_index(&self, commit_id: &C::CommitId) -> Option<usize> {
        let permanent = self.commits.node_index(commit_id)?;
        self.printed.visible_index(permanent)
    }
}

impl<Id: Clone + Eq + Hash + Debug> LogGraph<Id> {
    /// Build every layer from a log (children before parents), all visible
    pub fn from_commits(commits: &[GraphCommit<Id>], config: IndexConfig) -> Result<Self> {
        let (graph, info) = PermanentLinearGraph::build(commits)?;
        let layout = GraphLayoutImpl::build(&graph);
        let printed = PrintedGraph::with_config(HiddenNodesGraph::new(graph), layout, config)?;
        Self::new(printed, info)
    }
}

impl<G, L, C> LinearGraph for CommitInfoGraph<G, L, C>
where
    G: LinearGraph,
    L: GraphLayout,
    C: PermanentCommitsInfo,
{
    fn nodes_count(&self) -> usize {
        self.printed.nodes_count()
    }

    fn up_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        self.printed.up_nodes(node_index)
    }

    fn down_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        self.printed.down_nodes(node_index)
    }

    fn node_type(&self, node_index: usize) -> NodeType {
        self.printed.node_type(node_index)
    }

    fn edge_type(&self, up_node_index: usize, down_node: NodeRef) -> EdgeType {
        self.printed.edge_type(up_node_index, down_node)
    }
}

impl<G, L, C> PrintedLinearGraph for CommitInfoGraph<G, L, C>
where
    G: LinearGraph,
    L: GraphLayout,
    C: PermanentCommitsInfo,
{
    fn layout_index(&self, node_index: usize) -> usize {
        self.printed.layout_index(node_index)
    }

    fn head_layout_index(&self, node_index: usize) -> usize {
        self.printed.head_layout_index(node_index)
    }
}
