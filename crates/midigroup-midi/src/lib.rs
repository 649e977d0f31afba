//! MIDI port identity and command dispatch for composite graph nodes.
//!
//! A [`CompositeMidiNode`] designates at most one input as a
//! [`MidiInputPort`] and at most one output as a [`MidiOutputPort`]. When a
//! MIDI output is connected to another node it caches that node's first MIDI
//! input; [`MidiOutputPort::send`] then forwards `(command, data)` straight
//! to the receiving node's command table.
//!
//! # Example
//!
//! ```
//! use midigroup_midi::MidiGraph;
//!
//! let mut graph = MidiGraph::new();
//! let keyboard = graph.add_node(0, 1, None, Some(0))?;
//! let synth = graph.add_node(1, 0, Some(0), None)?;
//! graph.connect(keyboard, 0, synth)?;
//!
//! // Reaches synth's note on handler.
//! graph.note_on(keyboard, 67, 90)?;
//! # Ok::<(), midigroup_midi::Error>(())
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod command;
pub use command::{CommandTable, CustomOperation, Handler, Operation};

mod config;
pub use config::{CommandSet, MidiNodeConfig, RoutingConfig};

mod graph;
pub use graph::MidiGraph;

mod message;
pub use message::MidiMessage;

mod node;
pub use node::CompositeMidiNode;

mod port;
pub use port::{
    first_midi_input, Dispatch, MidiInputPort, MidiOutputPort, Port, PortKind, PortRef,
};

// Re-export upstream message types used by `MidiMessage::from_channel_voice`.
pub use midi_msg::{ChannelVoiceMsg, ControlChange};
