use graft_nodes::NodeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("no node variant accepts {0}")]
    UnknownType(String),

    #[error("text instances are not supported (got \"{0}\")")]
    TextInstance(String),

    #[error(transparent)]
    Node(#[from] NodeError),
}
