//! vlog-graph - visible-index layer over a permanent commit graph
//!
//! # Architecture
//!
//! - **Permanent graph**: the loaded log, node `i` = i-th commit, never renumbered
//! - **Visibility flags**: one bit per permanent node, flipped by filters
//! - **Compaction index**: permanent <-> visible index map, updated per changed range
//! - **Printed graph**: every query answered in visible-index space
//! - **Commit info**: commit ids, timestamps and heads by visible index
//!
//! # Usage example
//!
//! ```
//! use vlog_graph::{GraphCommit, IndexConfig, LinearGraph, LogGraph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let log = vec![
//!     GraphCommit::new("c".to_string(), vec!["b".to_string()], 30),
//!     GraphCommit::new("b".to_string(), vec!["a".to_string()], 20),
//!     GraphCommit::new("a".to_string(), vec![], 10),
//! ];
//! let mut graph = LogGraph::from_commits(&log, IndexConfig::default())?;
//!
//! // Hide "b": "a" moves up to visible row 1
//! graph.printed_mut().set_visible(1, false);
//! assert_eq!(graph.nodes_count(), 2);
//! assert_eq!(graph.commit_id(1), "a");
//! assert_eq!(graph.node_index(&"b".to_string()), None);
//! # Ok(())
//! # }
//! ```

pub mod graph;
pub mod index;
pub mod config;
pub mod error;

pub use graph::{
    BitSetFlags, CommitInfoGraph, EdgeType, Flags, GraphCommit, GraphLayout, GraphLayoutImpl,
    HiddenNodesGraph, LinearGraph, ListenerId, LogGraph, NodeRef, NodeType, PermanentCommitsInfo,
    PermanentCommitsInfoImpl, PermanentLinearGraph, PrintedGraph, PrintedLinearGraph, UpdateRange,
};
pub use index::{ListIntToIntMap, UpdatableIntToIntMap};
pub use config::IndexConfig;
pub use error::{GraphError, Result};
