use thiserror::Error;

use crate::scene::NodeId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A collaborator the renderer depends on was not supplied.
    #[error("missing required collaborator: {capability}")]
    MissingCollaborator { capability: &'static str },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("scene node {0:?} is no longer live")]
    StaleNode(NodeId),
}
