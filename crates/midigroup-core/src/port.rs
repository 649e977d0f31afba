//! Port primitives shared by every node type.

use crate::NodeId;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Direction of a port on a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    /// Returns a human-readable name for the port direction.
    pub fn name(&self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plain signal port. Identity only; signal transport belongs to the host
/// graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassThroughPort {
    owner: NodeId,
    index: usize,
    direction: PortDirection,
}

impl PassThroughPort {
    pub fn new(owner: NodeId, index: usize, direction: PortDirection) -> Self {
        Self {
            owner,
            index,
            direction,
        }
    }

    #[inline]
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn direction(&self) -> PortDirection {
        self.direction
    }
}
