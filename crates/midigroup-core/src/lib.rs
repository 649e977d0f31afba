//! # midigroup-core
//!
//! The generic node graph the MIDI layer is built on:
//! - [`CompositeNode`]: a node owning an ordered set of input and output ports
//! - [`PassThroughPort`]: plain signal port with no MIDI role
//! - [`Graph`]: arena owning nodes by [`NodeId`] and recording signal edges
//!
//! Port types are generic so that higher layers can plug in their own port
//! variants without changing how nodes are composed.

pub mod error;
pub use error::{Error, Result};

pub mod graph;
pub use graph::{Edge, Graph};

pub mod node;
pub use node::{check_port_index, CompositeNode, NodeId};

pub mod port;
pub use port::{PassThroughPort, PortDirection};
