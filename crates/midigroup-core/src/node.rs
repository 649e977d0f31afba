//! Node identity and the generic composite node.

use crate::{Error, PortDirection, Result};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of a node inside a [`Graph`](crate::Graph).
///
/// Ids are issued by the graph and never reused for the graph's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node made of a fixed, ordered set of input and output ports.
///
/// The port type is left to the caller. Ports are created once at
/// construction and the port counts never change afterwards.
#[derive(Clone, Debug)]
pub struct CompositeNode<P> {
    id: NodeId,
    inputs: Vec<P>,
    outputs: Vec<P>,
}

impl<P> CompositeNode<P> {
    /// Build a node with `inputs` input ports and `outputs` output ports.
    ///
    /// `make_input` and `make_output` are called once per index, in order.
    pub fn new<I, O>(
        id: NodeId,
        inputs: usize,
        outputs: usize,
        mut make_input: I,
        mut make_output: O,
    ) -> Self
    where
        I: FnMut(NodeId, usize) -> P,
        O: FnMut(NodeId, usize) -> P,
    {
        Self {
            id,
            inputs: (0..inputs).map(|i| make_input(id, i)).collect(),
            outputs: (0..outputs).map(|i| make_output(id, i)).collect(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn inputs(&self) -> &[P] {
        &self.inputs
    }

    #[inline]
    pub fn outputs(&self) -> &[P] {
        &self.outputs
    }

    #[inline]
    pub fn input(&self, index: usize) -> Option<&P> {
        self.inputs.get(index)
    }

    #[inline]
    pub fn output(&self, index: usize) -> Option<&P> {
        self.outputs.get(index)
    }

    #[inline]
    pub fn output_mut(&mut self, index: usize) -> Option<&mut P> {
        self.outputs.get_mut(index)
    }

    pub fn port_count(&self, direction: PortDirection) -> usize {
        match direction {
            PortDirection::Input => self.inputs.len(),
            PortDirection::Output => self.outputs.len(),
        }
    }

    /// Fails with [`Error::PortIndexOutOfRange`] unless `index` names an
    /// existing port in `direction`.
    pub fn check_port(&self, direction: PortDirection, index: usize) -> Result<()> {
        check_port_index(direction, index, self.port_count(direction))
    }
}

/// Fails with [`Error::PortIndexOutOfRange`] unless `index < count`.
///
/// Usable before a node exists, e.g. when validating a node description.
pub fn check_port_index(direction: PortDirection, index: usize, count: usize) -> Result<()> {
    if index < count {
        Ok(())
    } else {
        Err(Error::PortIndexOutOfRange {
            direction,
            index,
            count,
        })
    }
}
