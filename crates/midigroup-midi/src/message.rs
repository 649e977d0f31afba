//! Command-plus-data message values.

use crate::command::{CONTROL_CHANGE, NOTE_OFF, NOTE_ON, PROGRAM_CHANGE};
use midi_msg::{ChannelVoiceMsg, ControlChange};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// A command code and its ordered data bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MidiMessage {
    pub command: u8,
    pub data: SmallVec<[u8; 2]>,
}

impl MidiMessage {
    pub fn new(command: u8, data: &[u8]) -> Self {
        Self {
            command,
            data: SmallVec::from_slice(data),
        }
    }

    #[inline]
    pub fn note_on(key: u8, velocity: u8) -> Self {
        Self {
            command: NOTE_ON,
            data: smallvec![key, velocity],
        }
    }

    #[inline]
    pub fn note_off(key: u8, velocity: u8) -> Self {
        Self {
            command: NOTE_OFF,
            data: smallvec![key, velocity],
        }
    }

    #[inline]
    pub fn control_change(controller: u8, value: u8) -> Self {
        Self {
            command: CONTROL_CHANGE,
            data: smallvec![controller, value],
        }
    }

    #[inline]
    pub fn program_change(program: u8) -> Self {
        Self {
            command: PROGRAM_CHANGE,
            data: smallvec![program],
        }
    }

    /// Translate a decoded channel voice message. Channel information is
    /// dropped; messages without a command table counterpart yield `None`.
    pub fn from_channel_voice(msg: &ChannelVoiceMsg) -> Option<Self> {
        match *msg {
            ChannelVoiceMsg::NoteOn { note, velocity } => Some(Self::note_on(note, velocity)),
            ChannelVoiceMsg::NoteOff { note, velocity } => Some(Self::note_off(note, velocity)),
            ChannelVoiceMsg::ControlChange {
                control: ControlChange::CC { control, value },
            } => Some(Self::control_change(control, value)),
            ChannelVoiceMsg::ProgramChange { program } => Some(Self::program_change(program)),
            _ => None,
        }
    }
}
