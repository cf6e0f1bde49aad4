//! Error types for the visible graph layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Flags cover {flags} nodes, graph has {nodes}")]
    FlagsSizeMismatch { flags: usize, nodes: usize },

    #[error("Layout covers {layout} nodes, graph has {nodes}")]
    LayoutSizeMismatch { layout: usize, nodes: usize },

    #[error("Commits info covers {commits} nodes, graph has {nodes}")]
    CommitsInfoSizeMismatch { commits: usize, nodes: usize },

    #[error("Duplicate commit: {0}")]
    DuplicateCommit(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
