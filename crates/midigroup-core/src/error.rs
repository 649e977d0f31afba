//! Error types for midigroup-core.

use crate::{NodeId, PortDirection};
use thiserror::Error;

/// Error type for midigroup-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{direction} port index {index} out of range (node has {count} {direction} ports)")]
    PortIndexOutOfRange {
        direction: PortDirection,
        index: usize,
        count: usize,
    },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
