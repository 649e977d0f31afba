//! Test helpers for midigroup integration tests.
//!
//! Spy nodes replace their command table entries with recorders so tests can
//! observe exactly which operations a node received.

#![allow(dead_code)]

use midigroup::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;

/// `(receiving node, command, data)` in delivery order.
pub type Received = Arc<Mutex<Vec<(NodeId, u8, Vec<u8>)>>>;

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

/// Replace every mapped operation on `node` with one that records the call
/// and then runs the original operation.
pub fn spy_on(graph: &mut MidiGraph, node: NodeId) -> Received {
    let received: Received = Arc::default();
    let table = graph.node(node).expect("spied node exists").commands().clone();

    for code in table.codes() {
        let original = table.get(code).cloned().expect("code listed by table");
        let received = Arc::clone(&received);
        graph.node_mut(node).expect("spied node exists").commands_mut().insert(
            code,
            Operation::custom("spy", move |graph, node, data| {
                received.lock().push((node, code, data.to_vec()));
                match &original {
                    Operation::NoteOn => graph.note_on(node, data[0], data[1]),
                    Operation::NoteOff => graph.note_off(node, data[0], data[1]),
                    Operation::ControlChange => graph.control_change(node, data[0], data[1]),
                    Operation::ProgramChange => graph.program_change(node, data[0]),
                    Operation::Custom(_) => Ok(()),
                }
            }),
        );
    }
    received
}

/// A node with one MIDI input and no outputs.
pub fn terminal(graph: &mut MidiGraph) -> NodeId {
    graph
        .add(MidiNodeConfig::new(1, 0).with_midi_in(0))
        .expect("valid terminal config")
}

/// A node that forwards everything it receives.
pub fn relay(graph: &mut MidiGraph) -> NodeId {
    graph
        .add(MidiNodeConfig::new(1, 1).with_midi_in(0).with_midi_out(0))
        .expect("valid relay config")
}
