//! Permanent commit graph: the full loaded log with fixed node numbering

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::{GraphCommit, LinearGraph, NodeRef, PermanentCommitsInfoImpl};
use crate::error::{GraphError, Result};

/// Adjacency lists over permanent indices.
///
/// Node `i` is the i-th commit of the log. Down nodes are parents; a parent
/// that is not part of the log shows up as `NodeRef::NotLoaded`.
#[derive(Debug, Clone, Default)]
pub struct PermanentLinearGraph {
    up: Vec<Vec<NodeRef>>,
    down: Vec<Vec<NodeRef>>,
}

impl PermanentLinearGraph {
    /// Build the graph and its commit-id store from a log
    pub fn build<Id>(commits: &[GraphCommit<Id>]) -> Result<(Self, PermanentCommitsInfoImpl<Id>)>
    where
        Id: Clone + Eq + Hash + Debug,
    {
        let mut index = HashMap::with_capacity(commits.len());
        for (i, commit) in commits.iter().enumerate() {
            if index.insert(commit.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateCommit(format!("{:?}", commit.id)));
            }
        }

        let down: Vec<Vec<NodeRef>> = commits
            .iter()
            .map(|commit| {
                commit
                    .parents
                    .iter()
                    .map(|parent| index.get(parent).map_or(NodeRef::NotLoaded, |&p| NodeRef::Index(p)))
                    .collect()
            })
            .collect();

        let graph = Self::from_down_nodes(down);

        let not_loaded = graph.down.iter().flatten().filter(|n| n.is_not_loaded()).count();
        tracing::info!(
            "Permanent graph built: {} commits, {} edges leave the loaded log",
            commits.len(),
            not_loaded
        );

        let ids = commits.iter().map(|c| c.id.clone()).collect();
        let timestamps = commits.iter().map(|c| c.timestamp).collect();
        Ok((graph, PermanentCommitsInfoImpl::from_parts(ids, timestamps, index)))
    }

    /// Up nodes are derived from `down`; indices in `down` must be `< down.len()`
    pub fn from_down_nodes(down: Vec<Vec<NodeRef>>) -> Self {
        let mut up = vec![Vec::new(); down.len()];
        for (child, parents) in down.iter().enumerate() {
            for parent in parents.iter().filter_map(|p| p.index()) {
                up[parent].push(NodeRef::Index(child));
            }
        }
        Self { up, down }
    }
}

impl LinearGraph for PermanentLinearGraph {
    fn nodes_count(&self) -> usize {
        self.down.len()
    }

    fn up_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        self.up[node_index].clone()
    }

    fn down_nodes(&self, node_index: usize) -> Vec<NodeRef> {
        self.down[node_index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PermanentCommitsInfo;

    fn commit(id: &str, parents: &[&str]) -> GraphCommit<String> {
        GraphCommit::new(id.to_string(), parents.iter().map(|p| p.to_string()).collect(), 0)
    }

    #[test]
    fn test_build_merge_graph() {
        // m merges a and b, both on top of root
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("a", &["root"]),
            commit("b", &["root"]),
            commit("root", &[]),
        ];
        let (graph, info) = PermanentLinearGraph::build(&commits).unwrap();

        assert_eq!(graph.nodes_count(), 4);
        assert_eq!(graph.down_nodes(0), vec![NodeRef::Index(1), NodeRef::Index(2)]);
        assert_eq!(graph.up_nodes(3), vec![NodeRef::Index(1), NodeRef::Index(2)]);
        assert!(graph.up_nodes(0).is_empty());
        assert_eq!(info.node_index(&"b".to_string()), Some(2));
    }

    #[test]
    fn test_missing_parent_is_not_loaded() {
        let commits = vec![commit("tip", &["older"]), commit("older", &["beyond-window"])];
        let (graph, _) = PermanentLinearGraph::build(&commits).unwrap();

        assert_eq!(graph.down_nodes(0), vec![NodeRef::Index(1)]);
        assert_eq!(graph.down_nodes(1), vec![NodeRef::NotLoaded]);
    }

    #[test]
    fn test_duplicate_commit_rejected() {
        let commits = vec![commit("a", &[]), commit("a", &[])];
        let result = PermanentLinearGraph::build(&commits);
        assert!(matches!(result, Err(GraphError::DuplicateCommit(_))));
    }
}
