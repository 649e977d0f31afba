//! Command codes and the per-node command table.
//!
//! Codes follow the channel-0 MIDI status bytes. Only the status nibble
//! matters here; nothing in this crate decodes a byte stream.

use crate::{Error, MidiGraph, Result};
use core::fmt;
use midigroup_core::NodeId;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const CONTROL_CHANGE: u8 = 0xB0;
pub const PROGRAM_CHANGE: u8 = 0xC0;

/// Signature of a node-defined operation.
///
/// Receives the graph so it can emit further messages, the id of the node
/// the command was dispatched to, and the message data bytes.
pub type Handler = dyn Fn(&mut MidiGraph, NodeId, &[u8]) -> Result<()> + Send + Sync;

/// A named operation supplied by the node author.
#[derive(Clone)]
pub struct CustomOperation {
    name: &'static str,
    handler: Arc<Handler>,
}

impl CustomOperation {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub(crate) fn call(&self, graph: &mut MidiGraph, node: NodeId, data: &[u8]) -> Result<()> {
        (self.handler)(graph, node, data)
    }
}

impl fmt::Debug for CustomOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomOperation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// What a command code resolves to on a node.
#[derive(Clone, Debug)]
pub enum Operation {
    /// `(key, velocity)`, re-emitted as [`NOTE_ON`] on the node's MIDI output.
    NoteOn,
    /// `(key, velocity)`, re-emitted as [`NOTE_OFF`].
    NoteOff,
    /// `(controller, value)`, re-emitted as [`CONTROL_CHANGE`].
    ControlChange,
    /// `(program)`, re-emitted as [`PROGRAM_CHANGE`].
    ProgramChange,
    Custom(CustomOperation),
}

impl Operation {
    pub fn custom<F>(name: &'static str, handler: F) -> Self
    where
        F: Fn(&mut MidiGraph, NodeId, &[u8]) -> Result<()> + Send + Sync + 'static,
    {
        Operation::Custom(CustomOperation {
            name,
            handler: Arc::new(handler),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::NoteOn => "note_on",
            Operation::NoteOff => "note_off",
            Operation::ControlChange => "control_change",
            Operation::ProgramChange => "program_change",
            Operation::Custom(custom) => custom.name(),
        }
    }

    /// Number of data bytes the operation takes. `None` for custom
    /// operations, which validate their own input.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Operation::NoteOn | Operation::NoteOff | Operation::ControlChange => Some(2),
            Operation::ProgramChange => Some(1),
            Operation::Custom(_) => None,
        }
    }
}

/// Mapping from command code to operation. Codes are unique by construction.
#[derive(Clone, Debug, Default)]
pub struct CommandTable {
    entries: BTreeMap<u8, Operation>,
}

impl CommandTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Note on and note off only.
    pub fn baseline() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(NOTE_ON, Operation::NoteOn);
        entries.insert(NOTE_OFF, Operation::NoteOff);
        Self { entries }
    }

    /// Baseline plus control change and program change.
    pub fn standard() -> Self {
        let mut table = Self::baseline();
        table.entries.insert(CONTROL_CHANGE, Operation::ControlChange);
        table.entries.insert(PROGRAM_CHANGE, Operation::ProgramChange);
        table
    }

    /// Add a mapping for a code that is not mapped yet.
    pub fn register(&mut self, code: u8, operation: Operation) -> Result<()> {
        if self.entries.contains_key(&code) {
            return Err(Error::DuplicateCommand(code));
        }
        tracing::debug!("Registered MIDI command {} -> {}", code, operation.name());
        self.entries.insert(code, operation);
        Ok(())
    }

    /// Map `code` to `operation`, returning whatever it was mapped to before.
    pub fn insert(&mut self, code: u8, operation: Operation) -> Option<Operation> {
        self.entries.insert(code, operation)
    }

    pub fn remove(&mut self, code: u8) -> Option<Operation> {
        self.entries.remove(&code)
    }

    #[inline]
    pub fn get(&self, code: u8) -> Option<&Operation> {
        self.entries.get(&code)
    }

    #[inline]
    pub fn contains(&self, code: u8) -> bool {
        self.entries.contains_key(&code)
    }

    /// Registered codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
