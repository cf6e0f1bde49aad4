//! Commit records and the permanent commit-id store

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::PermanentCommitsInfo;

/// One commit of the loaded log, in log order (children before parents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphCommit<Id> {
    pub id: Id,
    pub parents: Vec<Id>,
    /// Seconds since epoch
    #[serde(default)]
    pub timestamp: i64,
}

impl<Id> GraphCommit<Id> {
    pub fn new(id: Id, parents: Vec<Id>, timestamp: i64) -> Self {
        Self { id, parents, timestamp }
    }
}

/// In-memory `PermanentCommitsInfo`: ids and timestamps by permanent index
#[derive(Debug, Clone)]
pub struct PermanentCommitsInfoImpl<Id> {
    ids: Vec<Id>,
    timestamps: Vec<i64>,
    index: HashMap<Id, usize>,
}

impl<Id: Clone + Eq + Hash> PermanentCommitsInfoImpl<Id> {
    /// Caller guarantees ids are unique (checked by the graph builder)
    pub(crate) fn from_parts(ids: Vec<Id>, timestamps: Vec<i64>, index: HashMap<Id, usize>) -> Self {
        debug_assert_eq!(ids.len(), timestamps.len());
        Self { ids, timestamps, index }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<Id: Clone + Eq + Hash + Debug> PermanentCommitsInfo for PermanentCommitsInfoImpl<Id> {
    type CommitId = Id;

    fn nodes_count(&self) -> usize {
        self.ids.len()
    }

    fn commit_id(&self, node_index: usize) -> Id {
        self.ids[node_index].clone()
    }

    fn timestamp(&self, node_index: usize) -> i64 {
        self.timestamps[node_index]
    }

    fn node_index(&self, commit_id: &Id) -> Option<usize> {
        self.index.get(commit_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_record_json() {
        let commit: GraphCommit<String> =
            serde_json::from_str(r#"{"id": "a1", "parents": ["b2", "c3"]}"#).unwrap();
        assert_eq!(commit.id, "a1");
        assert_eq!(commit.parents, vec!["b2".to_string(), "c3".to_string()]);
        assert_eq!(commit.timestamp, 0);
    }

    #[test]
    fn test_lookup_both_directions() {
        let ids = vec!["x".to_string(), "y".to_string()];
        let index = ids.iter().cloned().enumerate().map(|(i, id)| (id, i)).collect();
        let info = PermanentCommitsInfoImpl::from_parts(ids, vec![20, 10], index);

        assert_eq!(info.nodes_count(), 2);
        assert_eq!(info.commit_id(1), "y");
        assert_eq!(info.timestamp(0), 20);
        assert_eq!(info.node_index(&"y".to_string()), Some(1));
        assert_eq!(info.node_index(&"z".to_string()), None);
    }
}
