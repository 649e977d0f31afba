//! Node and routing configuration.

use crate::{CommandTable, Error, Result};
use midigroup_core::{check_port_index, PortDirection};
use serde::{Deserialize, Serialize};

/// Which command table a node starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandSet {
    /// Note on / note off.
    #[default]
    Baseline,
    /// Baseline plus control change and program change.
    Standard,
}

impl CommandSet {
    pub fn table(self) -> CommandTable {
        match self {
            CommandSet::Baseline => CommandTable::baseline(),
            CommandSet::Standard => CommandTable::standard(),
        }
    }
}

/// Shape of a [`CompositeMidiNode`](crate::CompositeMidiNode).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiNodeConfig {
    pub inputs: usize,
    pub outputs: usize,
    #[serde(default)]
    pub midi_in: Option<usize>,
    #[serde(default)]
    pub midi_out: Option<usize>,
    #[serde(default)]
    pub commands: CommandSet,
}

impl MidiNodeConfig {
    pub fn new(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            ..Self::default()
        }
    }

    pub fn with_midi_in(mut self, index: usize) -> Self {
        self.midi_in = Some(index);
        self
    }

    pub fn with_midi_out(mut self, index: usize) -> Self {
        self.midi_out = Some(index);
        self
    }

    pub fn with_commands(mut self, commands: CommandSet) -> Self {
        self.commands = commands;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_index(PortDirection::Input, self.midi_in, self.inputs)?;
        check_index(PortDirection::Output, self.midi_out, self.outputs)
    }
}

fn check_index(direction: PortDirection, index: Option<usize>, count: usize) -> Result<()> {
    let Some(index) = index else {
        return Ok(());
    };
    check_port_index(direction, index, count).map_err(|err| match err {
        midigroup_core::Error::PortIndexOutOfRange {
            direction,
            index,
            count,
        } => Error::Configuration {
            direction,
            index,
            count,
        },
        other => Error::Core(other),
    })
}

/// Limits applied by [`MidiGraph`](crate::MidiGraph) while delivering messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Maximum number of nested dispatches a single message may cause.
    pub max_depth: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

impl RoutingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
