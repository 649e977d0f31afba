//! # midigroup
//!
//! Routes discrete MIDI-style command messages through a node graph built
//! for continuous signals.
//!
//! ## Architecture
//!
//! - **midigroup-core** - Node ids, pass-through ports, generic composite nodes, node arena
//! - **midigroup-midi** - MIDI port designation, connection resolution, command dispatch
//!
//! ## Quick Start
//!
//! ```
//! use midigroup::prelude::*;
//!
//! let mut graph = MidiGraph::new();
//! let sequencer = graph.add(MidiNodeConfig::new(0, 1).with_midi_out(0))?;
//! let synth = graph.add(MidiNodeConfig::new(2, 1).with_midi_in(1))?;
//!
//! graph.connect(sequencer, 0, synth)?;
//! graph.dispatch(sequencer, NOTE_ON, &[60, 100])?;
//! # Ok::<(), midigroup::Error>(())
//! ```

/// Re-export of midigroup-core for direct access
pub use midigroup_core as core;

/// Re-export of midigroup-midi for direct access
pub use midigroup_midi as midi;

pub use midigroup_core::{CompositeNode, Edge, Graph, NodeId, PassThroughPort, PortDirection};

pub use midigroup_midi::{
    command, first_midi_input, ChannelVoiceMsg, CommandSet, CommandTable, CompositeMidiNode,
    ControlChange, CustomOperation, Dispatch, MidiGraph, MidiInputPort, MidiMessage,
    MidiNodeConfig, MidiOutputPort, Operation, Port, PortKind, PortRef, RoutingConfig,
};

mod error;
pub use error::{Error, Result};

/// Everything needed to build and drive a MIDI graph.
pub mod prelude {
    pub use crate::command::{CONTROL_CHANGE, NOTE_OFF, NOTE_ON, PROGRAM_CHANGE};
    pub use crate::{
        CommandSet, CommandTable, CompositeMidiNode, Dispatch, Error, MidiGraph, MidiMessage,
        MidiNodeConfig, NodeId, Operation, Port, PortKind, PortRef, Result, RoutingConfig,
    };
}
