//! Node arena with edge bookkeeping.
//!
//! The graph owns every node. Nodes refer to each other only through
//! [`NodeId`]s, so a connection never keeps its target alive.

use crate::{Error, NodeId, Result};
use serde::{Deserialize, Serialize};

/// A connection from an output port of one node to another node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub output: usize,
    pub target: NodeId,
}

/// Arena of nodes addressed by [`NodeId`].
#[derive(Debug)]
pub struct Graph<N> {
    nodes: Vec<N>,
    edges: Vec<Edge>,
}

impl<N> Graph<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Id the next added node will receive.
    #[inline]
    pub fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() as u64)
    }

    /// Insert a node built by `build`, which receives the id it will live under.
    ///
    /// Nothing is inserted if `build` fails.
    pub fn try_add_with<E, F>(&mut self, build: F) -> core::result::Result<NodeId, E>
    where
        F: FnOnce(NodeId) -> core::result::Result<N, E>,
    {
        let id = self.next_id();
        let node = build(id)?;
        self.nodes.push(node);
        tracing::debug!("Added node {}", id);
        Ok(id)
    }

    pub fn add_with<F>(&mut self, build: F) -> NodeId
    where
        F: FnOnce(NodeId) -> N,
    {
        let id = self.next_id();
        self.nodes.push(build(id));
        tracing::debug!("Added node {}", id);
        id
    }

    pub fn get(&self, id: NodeId) -> Result<&N> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|i| self.nodes.get(i))
            .ok_or(Error::NodeNotFound(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut N> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|i| self.nodes.get_mut(i))
            .ok_or(Error::NodeNotFound(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record an edge. Both endpoints must exist.
    pub fn connect(&mut self, edge: Edge) -> Result<()> {
        self.get(edge.source)?;
        self.get(edge.target)?;
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
        Ok(())
    }

    /// Drop every edge leaving `output` of `source`. Returns how many were removed.
    pub fn disconnect_output(&mut self, source: NodeId, output: usize) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| !(e.source == source && e.output == output));
        before - self.edges.len()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}
