//! Composite node with designated MIDI ports.

use crate::{CommandTable, MidiInputPort, MidiNodeConfig, MidiOutputPort, Port, Result};
use midigroup_core::{CompositeNode, NodeId, PortDirection};

/// A composite node where at most one input and at most one output carry
/// MIDI commands. All remaining ports are plain pass-through signal ports.
///
/// Ports and MIDI designations are fixed at construction. The command
/// table starts from the configured [`CommandSet`](crate::CommandSet) and may
/// be extended through [`commands_mut`](Self::commands_mut).
#[derive(Clone, Debug)]
pub struct CompositeMidiNode {
    ports: CompositeNode<Port>,
    midi_in: Option<usize>,
    midi_out: Option<usize>,
    commands: CommandTable,
}

impl CompositeMidiNode {
    /// Fails with [`Error::Configuration`](crate::Error::Configuration) when a
    /// MIDI index is outside the port range.
    pub fn new(
        id: NodeId,
        inputs: usize,
        outputs: usize,
        midi_in: Option<usize>,
        midi_out: Option<usize>,
    ) -> Result<Self> {
        let config = MidiNodeConfig {
            inputs,
            outputs,
            midi_in,
            midi_out,
            ..MidiNodeConfig::default()
        };
        Self::from_config(id, &config)
    }

    pub fn from_config(id: NodeId, config: &MidiNodeConfig) -> Result<Self> {
        config.validate()?;

        let midi_in = config.midi_in;
        let midi_out = config.midi_out;
        let ports = CompositeNode::new(
            id,
            config.inputs,
            config.outputs,
            |owner, i| Port::input(owner, i, midi_in == Some(i)),
            |owner, i| Port::output(owner, i, midi_out == Some(i)),
        );

        tracing::debug!(
            "Created MIDI node {} ({} in, {} out, midi in {:?}, midi out {:?})",
            id,
            config.inputs,
            config.outputs,
            midi_in,
            midi_out
        );

        Ok(Self {
            ports,
            midi_in,
            midi_out,
            commands: config.commands.table(),
        })
    }

    /// Replace the command table.
    pub fn with_commands(mut self, commands: CommandTable) -> Self {
        self.commands = commands;
        self
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.ports.id()
    }

    #[inline]
    pub fn inputs(&self) -> &[Port] {
        self.ports.inputs()
    }

    #[inline]
    pub fn outputs(&self) -> &[Port] {
        self.ports.outputs()
    }

    #[inline]
    pub fn midi_in_index(&self) -> Option<usize> {
        self.midi_in
    }

    #[inline]
    pub fn midi_out_index(&self) -> Option<usize> {
        self.midi_out
    }

    /// Fails with [`PortIndexOutOfRange`](midigroup_core::Error::PortIndexOutOfRange)
    /// unless `index` names an existing output.
    pub fn check_output(&self, index: usize) -> Result<()> {
        Ok(self.ports.check_port(PortDirection::Output, index)?)
    }

    pub fn midi_input(&self) -> Option<&MidiInputPort> {
        self.midi_in
            .and_then(|i| self.ports.input(i))
            .and_then(Port::as_midi_input)
    }

    pub fn midi_output(&self) -> Option<&MidiOutputPort> {
        self.midi_out
            .and_then(|i| self.ports.output(i))
            .and_then(Port::as_midi_output)
    }

    pub fn midi_output_mut(&mut self) -> Option<&mut MidiOutputPort> {
        let index = self.midi_out?;
        self.ports
            .output_mut(index)
            .and_then(Port::as_midi_output_mut)
    }

    #[inline]
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    #[inline]
    pub fn commands_mut(&mut self) -> &mut CommandTable {
        &mut self.commands
    }
}
