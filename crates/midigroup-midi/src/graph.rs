//! Graph of MIDI-capable nodes and synchronous message delivery.
//!
//! ```text
//! note_on(A) ──▶ A.midi_out.send ──▶ dispatch(B) ──▶ B.commands[code] ──▶ B.note_on ──▶ ...
//! ```
//!
//! Delivery is one direct call chain on the caller's thread. There is no
//! queue. `&mut self` keeps other callers from rewiring during a delivery,
//! but a custom [`Operation`] receives the graph itself: it may emit
//! messages and must not call [`MidiGraph::connect`] or
//! [`MidiGraph::disconnect`] while it runs.

use crate::command::{CONTROL_CHANGE, NOTE_OFF, NOTE_ON, PROGRAM_CHANGE};
use crate::{
    CompositeMidiNode, Dispatch, Error, MidiMessage, MidiNodeConfig, Operation, PortRef, Result,
    RoutingConfig,
};
use midigroup_core::{Edge, Graph, NodeId};

#[derive(Debug, Default)]
pub struct MidiGraph {
    nodes: Graph<CompositeMidiNode>,
    config: RoutingConfig,
    depth: usize,
}

impl MidiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RoutingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            nodes: Graph::new(),
            config,
            depth: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn add(&mut self, config: MidiNodeConfig) -> Result<NodeId> {
        self.nodes
            .try_add_with(|id| CompositeMidiNode::from_config(id, &config))
    }

    pub fn add_node(
        &mut self,
        inputs: usize,
        outputs: usize,
        midi_in: Option<usize>,
        midi_out: Option<usize>,
    ) -> Result<NodeId> {
        self.nodes
            .try_add_with(|id| CompositeMidiNode::new(id, inputs, outputs, midi_in, midi_out))
    }

    pub fn node(&self, id: NodeId) -> Result<&CompositeMidiNode> {
        Ok(self.nodes.get(id)?)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut CompositeMidiNode> {
        Ok(self.nodes.get_mut(id)?)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        self.nodes.edges()
    }

    /// Connect output `output` of `source` to `target`.
    ///
    /// The edge is always recorded. When the output is the source's MIDI
    /// output, it also resolves the target's first MIDI input, replacing any
    /// previous MIDI edge from that port. Returns the resolved input, which
    /// is `None` for plain outputs and for targets without a MIDI input.
    pub fn connect(
        &mut self,
        source: NodeId,
        output: usize,
        target: NodeId,
    ) -> Result<Option<PortRef>> {
        let target_node = self.nodes.get(target)?;
        let source_node = self.nodes.get(source)?;
        source_node.check_output(output)?;
        let edge = Edge {
            source,
            output,
            target,
        };

        let Some(mut port) = source_node.outputs()[output].as_midi_output().cloned() else {
            self.nodes.connect(edge)?;
            return Ok(None);
        };

        let resolved = port.connect(target_node);
        self.nodes.disconnect_output(source, output);
        self.nodes.connect(edge)?;
        if let Some(slot) = self.nodes.get_mut(source)?.midi_output_mut() {
            *slot = port;
        }
        Ok(resolved)
    }

    /// Remove every edge leaving `output` of `source`, clearing the cached
    /// MIDI target if it is the MIDI output.
    pub fn disconnect(&mut self, source: NodeId, output: usize) -> Result<()> {
        let node = self.nodes.get_mut(source)?;
        node.check_output(output)?;
        if node.midi_out_index() == Some(output) {
            if let Some(port) = node.midi_output_mut() {
                port.disconnect();
            }
        }
        self.nodes.disconnect_output(source, output);
        Ok(())
    }

    /// Look up `command` in the node's table and run the mapped operation.
    ///
    /// Fails with [`Error::UnknownCommand`] for unmapped codes, with
    /// [`Error::InvalidArguments`] when the data does not fit the operation,
    /// and with [`Error::RoutingDepthExceeded`] once nested deliveries reach
    /// [`RoutingConfig::max_depth`].
    pub fn dispatch(&mut self, node: NodeId, command: u8, data: &[u8]) -> Result<()> {
        let operation = self
            .node(node)?
            .commands()
            .get(command)
            .cloned()
            .ok_or(Error::UnknownCommand { node, command })?;

        if self.depth >= self.config.max_depth {
            tracing::warn!(
                "Dropping MIDI {} to node {}: depth limit {} reached",
                command,
                node,
                self.config.max_depth
            );
            return Err(Error::RoutingDepthExceeded {
                max_depth: self.config.max_depth,
            });
        }

        tracing::trace!(
            "Dispatch {} {:?} to node {} as {}",
            command,
            data,
            node,
            operation.name()
        );

        self.depth += 1;
        let result = self.invoke(node, command, &operation, data);
        self.depth -= 1;
        result
    }

    fn invoke(
        &mut self,
        node: NodeId,
        command: u8,
        operation: &Operation,
        data: &[u8],
    ) -> Result<()> {
        match (operation, data) {
            (Operation::NoteOn, &[key, velocity]) => self.note_on(node, key, velocity),
            (Operation::NoteOff, &[key, velocity]) => self.note_off(node, key, velocity),
            (Operation::ControlChange, &[controller, value]) => {
                self.control_change(node, controller, value)
            }
            (Operation::ProgramChange, &[program]) => self.program_change(node, program),
            (Operation::Custom(custom), data) => custom.call(self, node, data),
            (operation, data) => Err(Error::InvalidArguments {
                command,
                expected: operation.arity().unwrap_or_default(),
                actual: data.len(),
            }),
        }
    }

    /// Dispatch a message value.
    pub fn deliver(&mut self, node: NodeId, message: &MidiMessage) -> Result<()> {
        self.dispatch(node, message.command, &message.data)
    }

    /// Emit a note on from `node`. A no-op when the node has no MIDI output
    /// or its MIDI output is not connected.
    pub fn note_on(&mut self, node: NodeId, key: u8, velocity: u8) -> Result<()> {
        self.emit(node, NOTE_ON, &[key, velocity])
    }

    /// Emit a note off from `node`. Same no-op rules as [`note_on`](Self::note_on).
    pub fn note_off(&mut self, node: NodeId, key: u8, velocity: u8) -> Result<()> {
        self.emit(node, NOTE_OFF, &[key, velocity])
    }

    pub fn control_change(&mut self, node: NodeId, controller: u8, value: u8) -> Result<()> {
        self.emit(node, CONTROL_CHANGE, &[controller, value])
    }

    pub fn program_change(&mut self, node: NodeId, program: u8) -> Result<()> {
        self.emit(node, PROGRAM_CHANGE, &[program])
    }

    /// Send through the node's MIDI output.
    ///
    /// Unlike the note operations this is strict: a node without a MIDI
    /// output fails with [`Error::NoMidiOutput`] and an unconnected output
    /// fails with [`Error::NotConnected`].
    pub fn send(&mut self, node: NodeId, command: u8, data: &[u8]) -> Result<()> {
        let port = self
            .node(node)?
            .midi_output()
            .cloned()
            .ok_or(Error::NoMidiOutput(node))?;
        port.send(self, command, data)
    }

    fn emit(&mut self, node: NodeId, command: u8, data: &[u8]) -> Result<()> {
        let port = match self.node(node)?.midi_output() {
            Some(port) if port.is_connected() => port.clone(),
            Some(_) => {
                tracing::debug!("Node {} MIDI output unconnected, dropping {}", node, command);
                return Ok(());
            }
            None => {
                tracing::debug!("Node {} has no MIDI output, dropping {}", node, command);
                return Ok(());
            }
        };
        port.send(self, command, data)
    }
}

impl Dispatch for MidiGraph {
    fn dispatch(&mut self, node: NodeId, command: u8, data: &[u8]) -> Result<()> {
        MidiGraph::dispatch(self, node, command, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandSet;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Log = Arc<Mutex<Vec<(NodeId, u8, Vec<u8>)>>>;

    /// Terminal node whose note on / note off are replaced by a recorder.
    fn add_spy(graph: &mut MidiGraph) -> (NodeId, Log) {
        let log: Log = Arc::default();
        let id = graph.add_node(1, 0, Some(0), None).unwrap();
        for code in [NOTE_ON, NOTE_OFF, CONTROL_CHANGE, PROGRAM_CHANGE] {
            let log = Arc::clone(&log);
            graph.node_mut(id).unwrap().commands_mut().insert(
                code,
                Operation::custom("spy", move |_, node, data| {
                    log.lock().push((node, code, data.to_vec()));
                    Ok(())
                }),
            );
        }
        (id, log)
    }

    #[test]
    fn test_dispatch_note_on_reaches_downstream() {
        let mut graph = MidiGraph::new();
        let relay = graph.add_node(1, 1, Some(0), Some(0)).unwrap();
        let (spy, log) = add_spy(&mut graph);
        graph.connect(relay, 0, spy).unwrap();

        graph.dispatch(relay, 144, &[60, 100]).unwrap();
        graph.dispatch(relay, 128, &[60, 0]).unwrap();

        assert_eq!(
            *log.lock(),
            vec![(spy, 144, vec![60, 100]), (spy, 128, vec![60, 0])]
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut graph = MidiGraph::new();
        let relay = graph.add_node(1, 1, Some(0), Some(0)).unwrap();
        let (spy, log) = add_spy(&mut graph);
        graph.connect(relay, 0, spy).unwrap();

        let err = graph.dispatch(relay, 0xE0, &[0, 64]).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownCommand {
                node: relay,
                command: 0xE0
            }
        );
        assert!(log.lock().is_empty());
        let target = graph.node(relay).unwrap().midi_output().unwrap().target();
        assert_eq!(
            target,
            Some(PortRef {
                node: spy,
                index: 0
            })
        );
    }

    #[test]
    fn test_wrong_arity() {
        let mut graph = MidiGraph::new();
        let node = graph
            .add(MidiNodeConfig::new(0, 0).with_commands(CommandSet::Standard))
            .unwrap();

        let cases: [(u8, &[u8], usize); 4] = [
            (NOTE_ON, &[60], 2),
            (NOTE_OFF, &[60, 0, 1], 2),
            (CONTROL_CHANGE, &[], 2),
            (PROGRAM_CHANGE, &[3, 4], 1),
        ];
        for (command, data, expected) in cases {
            let err = graph.dispatch(node, command, data).unwrap_err();
            assert_eq!(
                err,
                Error::InvalidArguments {
                    command,
                    expected,
                    actual: data.len()
                }
            );
        }
        assert_eq!(graph.depth, 0);
    }

    #[test]
    fn test_note_on_without_midi_output_is_noop() {
        let mut graph = MidiGraph::new();
        let terminal = graph.add_node(1, 0, Some(0), None).unwrap();

        graph.note_on(terminal, 60, 100).unwrap();
        graph.note_off(terminal, 60, 0).unwrap();
        graph.dispatch(terminal, NOTE_ON, &[60, 100]).unwrap();
    }

    #[test]
    fn test_note_on_unconnected_is_noop_but_send_fails() {
        let mut graph = MidiGraph::new();
        let source = graph.add_node(0, 1, None, Some(0)).unwrap();
        let plain = graph.add_node(1, 1, None, None).unwrap();

        graph.note_on(source, 60, 100).unwrap();
        assert_eq!(
            graph.send(source, NOTE_ON, &[60, 100]).unwrap_err(),
            Error::NotConnected {
                node: source,
                port: 0
            }
        );
        assert_eq!(
            graph.send(plain, NOTE_ON, &[60, 100]).unwrap_err(),
            Error::NoMidiOutput(plain)
        );
    }

    #[test]
    fn test_connect_to_node_without_midi_input() {
        let mut graph = MidiGraph::new();
        let source = graph.add_node(0, 1, None, Some(0)).unwrap();
        let sink = graph.add_node(2, 0, None, None).unwrap();

        assert_eq!(graph.connect(source, 0, sink).unwrap(), None);
        assert!(!graph.node(source).unwrap().midi_output().unwrap().is_connected());
        assert_eq!(graph.edges().len(), 1);
        assert!(graph.send(source, NOTE_ON, &[1, 2]).is_err());
    }

    #[test]
    fn test_reconnect_redirects_exclusively() {
        let mut graph = MidiGraph::new();
        let source = graph.add_node(0, 1, None, Some(0)).unwrap();
        let (first, first_log) = add_spy(&mut graph);
        let (second, second_log) = add_spy(&mut graph);

        graph.connect(source, 0, first).unwrap();
        graph.note_on(source, 60, 100).unwrap();
        graph.connect(source, 0, second).unwrap();
        graph.note_on(source, 61, 100).unwrap();
        graph.note_off(source, 61, 0).unwrap();

        assert_eq!(first_log.lock().len(), 1);
        assert_eq!(second_log.lock().len(), 2);
        assert_eq!(
            graph.edges(),
            &[Edge {
                source,
                output: 0,
                target: second
            }]
        );
    }

    #[test]
    fn test_pass_through_output_records_edge_only() {
        let mut graph = MidiGraph::new();
        let source = graph.add_node(0, 2, None, Some(1)).unwrap();
        let (spy, log) = add_spy(&mut graph);

        assert_eq!(graph.connect(source, 0, spy).unwrap(), None);
        assert!(!graph.node(source).unwrap().midi_output().unwrap().is_connected());
        graph.note_on(source, 60, 100).unwrap();
        assert!(log.lock().is_empty());

        assert!(matches!(
            graph.connect(source, 5, spy),
            Err(Error::Core(midigroup_core::Error::PortIndexOutOfRange { index: 5, .. }))
        ));
        assert!(matches!(
            graph.connect(source, 1, NodeId::new(42)),
            Err(Error::Core(midigroup_core::Error::NodeNotFound(_)))
        ));
    }

    #[test]
    fn test_disconnect_rejects_missing_output() {
        let mut graph = MidiGraph::new();
        let source = graph.add_node(0, 1, None, Some(0)).unwrap();
        let (spy, log) = add_spy(&mut graph);
        graph.connect(source, 0, spy).unwrap();

        let err = graph.disconnect(source, 5).unwrap_err();
        assert_eq!(
            err,
            Error::Core(midigroup_core::Error::PortIndexOutOfRange {
                direction: midigroup_core::PortDirection::Output,
                index: 5,
                count: 1,
            })
        );
        assert_eq!(graph.edges().len(), 1);
        graph.note_on(source, 60, 100).unwrap();
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_disconnect_clears_target() {
        let mut graph = MidiGraph::new();
        let source = graph.add_node(0, 1, None, Some(0)).unwrap();
        let (spy, log) = add_spy(&mut graph);
        graph.connect(source, 0, spy).unwrap();

        graph.disconnect(source, 0).unwrap();
        graph.note_on(source, 60, 100).unwrap();

        assert!(log.lock().is_empty());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_standard_commands_forward() {
        let mut graph = MidiGraph::new();
        let relay = graph
            .add(
                MidiNodeConfig::new(1, 1)
                    .with_midi_in(0)
                    .with_midi_out(0)
                    .with_commands(CommandSet::Standard),
            )
            .unwrap();
        let (spy, log) = add_spy(&mut graph);
        graph.connect(relay, 0, spy).unwrap();

        graph.deliver(relay, &MidiMessage::control_change(7, 127)).unwrap();
        graph.deliver(relay, &MidiMessage::program_change(3)).unwrap();

        assert_eq!(
            *log.lock(),
            vec![(spy, CONTROL_CHANGE, vec![7, 127]), (spy, PROGRAM_CHANGE, vec![3])]
        );
    }

    #[test]
    fn test_custom_operation_receives_graph() {
        let mut graph = MidiGraph::new();
        let transposer = graph.add_node(1, 1, Some(0), Some(0)).unwrap();
        let (spy, log) = add_spy(&mut graph);
        graph.connect(transposer, 0, spy).unwrap();

        graph
            .node_mut(transposer)
            .unwrap()
            .commands_mut()
            .insert(NOTE_ON, Operation::custom("transpose_up", |graph, node, data| {
                graph.note_on(node, data[0] + 12, data[1])
            }));

        graph.dispatch(transposer, NOTE_ON, &[60, 80]).unwrap();
        assert_eq!(*log.lock(), vec![(spy, NOTE_ON, vec![72, 80])]);
    }

    #[test]
    fn test_feedback_loop_hits_depth_limit() {
        let mut graph = MidiGraph::with_config(RoutingConfig { max_depth: 8 }).unwrap();
        let a = graph.add_node(1, 1, Some(0), Some(0)).unwrap();
        let b = graph.add_node(1, 1, Some(0), Some(0)).unwrap();
        graph.connect(a, 0, b).unwrap();
        graph.connect(b, 0, a).unwrap();

        let err = graph.note_on(a, 60, 100).unwrap_err();
        assert_eq!(err, Error::RoutingDepthExceeded { max_depth: 8 });
        assert_eq!(graph.depth, 0);

        assert!(MidiGraph::with_config(RoutingConfig { max_depth: 0 }).is_err());
    }

    #[test]
    fn test_add_rejects_bad_config() {
        let mut graph = MidiGraph::new();
        assert!(graph.add_node(1, 1, Some(3), None).is_err());
        assert!(graph.is_empty());

        let id = graph.add(MidiNodeConfig::new(1, 1)).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.node(id).is_ok());
        assert!(graph.node(NodeId::new(5)).is_err());
    }
}
