//! Port variants of a MIDI-capable node.
//!
//! A node's ports are a sum type: plain pass-through signal ports, at most
//! one [`MidiInputPort`] and at most one [`MidiOutputPort`]. Connection
//! resolution scans for the MIDI-tagged variant instead of relying on
//! runtime type checks.

use crate::{CompositeMidiNode, Error, Result};
use midigroup_core::{NodeId, PassThroughPort, PortDirection};
use serde::{Deserialize, Serialize};

/// Non-owning reference to a port: the owning node and the port index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub node: NodeId,
    pub index: usize,
}

/// Anything that can deliver a command to a node by id.
///
/// [`MidiGraph`](crate::MidiGraph) is the implementation used in practice.
pub trait Dispatch {
    fn dispatch(&mut self, node: NodeId, command: u8, data: &[u8]) -> Result<()>;
}

/// Marks an input as accepting MIDI messages. Identity only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiInputPort {
    owner: NodeId,
    index: usize,
}

impl MidiInputPort {
    pub fn new(owner: NodeId, index: usize) -> Self {
        Self { owner, index }
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
    pub fn port_ref(&self) -> PortRef {
        PortRef {
            node: self.owner,
            index: self.index,
        }
    }
}

/// Output that forwards commands to the MIDI input of whatever node it was
/// last connected to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MidiOutputPort {
    owner: NodeId,
    index: usize,
    target: Option<PortRef>,
}

impl MidiOutputPort {
    pub fn new(owner: NodeId, index: usize) -> Self {
        Self {
            owner,
            index,
            target: None,
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

    /// The MIDI input this port resolved on its last connection, if any.
    #[inline]
    pub fn target(&self) -> Option<PortRef> {
        self.target
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.target.is_some()
    }

    /// Resolve the first MIDI input of `node` and cache it.
    ///
    /// Always overwrites the previous target. If `node` has no MIDI input the
    /// port ends up unconnected, which is a valid state.
    pub fn connect(&mut self, node: &CompositeMidiNode) -> Option<PortRef> {
        self.target = first_midi_input(node.inputs()).map(MidiInputPort::port_ref);
        match self.target {
            Some(target) => tracing::debug!(
                "MIDI output {}:{} resolved to input {}:{}",
                self.owner,
                self.index,
                target.node,
                target.index
            ),
            None => tracing::warn!(
                "MIDI output {}:{} connected to node {} which has no MIDI input",
                self.owner,
                self.index,
                node.id()
            ),
        }
        self.target
    }

    pub fn disconnect(&mut self) -> Option<PortRef> {
        self.target.take()
    }

    /// Forward `(command, data)` to the node owning the cached MIDI input.
    ///
    /// Fails with [`Error::NotConnected`] when there is no cached input.
    pub fn send<D>(&self, dispatcher: &mut D, command: u8, data: &[u8]) -> Result<()>
    where
        D: Dispatch + ?Sized,
    {
        let target = self.target.ok_or(Error::NotConnected {
            node: self.owner,
            port: self.index,
        })?;
        tracing::trace!(
            "MIDI {} {:?}: {}:{} -> {}",
            command,
            data,
            self.owner,
            self.index,
            target.node
        );
        dispatcher.dispatch(target.node, command, data)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortKind {
    PassThrough,
    MidiIn,
    MidiOut,
}

/// A port of a [`CompositeMidiNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum Port {
    PassThrough(PassThroughPort),
    MidiIn(MidiInputPort),
    MidiOut(MidiOutputPort),
}

impl Port {
    pub(crate) fn input(owner: NodeId, index: usize, midi: bool) -> Self {
        if midi {
            Port::MidiIn(MidiInputPort::new(owner, index))
        } else {
            Port::PassThrough(PassThroughPort::new(owner, index, PortDirection::Input))
        }
    }

    pub(crate) fn output(owner: NodeId, index: usize, midi: bool) -> Self {
        if midi {
            Port::MidiOut(MidiOutputPort::new(owner, index))
        } else {
            Port::PassThrough(PassThroughPort::new(owner, index, PortDirection::Output))
        }
    }

    pub fn kind(&self) -> PortKind {
        match self {
            Port::PassThrough(_) => PortKind::PassThrough,
            Port::MidiIn(_) => PortKind::MidiIn,
            Port::MidiOut(_) => PortKind::MidiOut,
        }
    }

    pub fn owner(&self) -> NodeId {
        match self {
            Port::PassThrough(p) => p.owner(),
            Port::MidiIn(p) => p.owner(),
            Port::MidiOut(p) => p.owner(),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Port::PassThrough(p) => p.index(),
            Port::MidiIn(p) => p.index(),
            Port::MidiOut(p) => p.index(),
        }
    }

    #[inline]
    pub fn is_midi(&self) -> bool {
        !matches!(self, Port::PassThrough(_))
    }

    #[inline]
    pub fn as_midi_input(&self) -> Option<&MidiInputPort> {
        match self {
            Port::MidiIn(port) => Some(port),
            _ => None,
        }
    }

    #[inline]
    pub fn as_midi_output(&self) -> Option<&MidiOutputPort> {
        match self {
            Port::MidiOut(port) => Some(port),
            _ => None,
        }
    }

    #[inline]
    pub fn as_midi_output_mut(&mut self) -> Option<&mut MidiOutputPort> {
        match self {
            Port::MidiOut(port) => Some(port),
            _ => None,
        }
    }
}

/// First MIDI input in port order. Later MIDI inputs are ignored.
pub fn first_midi_input(ports: &[Port]) -> Option<&MidiInputPort> {
    ports.iter().find_map(Port::as_midi_input)
}
