//! Error types for the MIDI dispatch subsystem.

use midigroup_core::{NodeId, PortDirection};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("MIDI {direction} index {index} out of range (node has {count} {direction} ports)")]
    Configuration {
        direction: PortDirection,
        index: usize,
        count: usize,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown MIDI command {command} on node {node}")]
    UnknownCommand { node: NodeId, command: u8 },

    #[error("MIDI output {port} of node {node} is not connected")]
    NotConnected { node: NodeId, port: usize },

    #[error("Node {0} has no MIDI output")]
    NoMidiOutput(NodeId),

    #[error("MIDI command {0} is already registered")]
    DuplicateCommand(u8),

    #[error("MIDI command {command} expects {expected} data bytes, got {actual}")]
    InvalidArguments {
        command: u8,
        expected: usize,
        actual: usize,
    },

    #[error("MIDI routing exceeded {max_depth} nested dispatches")]
    RoutingDepthExceeded { max_depth: usize },

    #[error(transparent)]
    Core(#[from] midigroup_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
