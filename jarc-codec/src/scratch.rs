//! Reusable scratch buffers for composite construction
//!
//! Every composite value needs a staging buffer for its children before the
//! finished region is copied into the archive. Buffers are checked out per
//! recursion frame and returned on every exit path, so deep documents reuse
//! a small stack of allocations instead of churning the heap per level.

use jarc_format::{ArchivedField, ArchivedNode};

/// Pool of idle scratch buffers owned by a parser and reused across calls.
#[derive(Debug, Default)]
pub struct ScratchPool {
    nodes: Vec<Vec<ArchivedNode>>,
    fields: Vec<Vec<ArchivedField>>,
}

impl ScratchPool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out a cleared node buffer for an array frame.
    pub fn take_nodes(&mut self) -> Vec<ArchivedNode> {
        self.nodes.pop().unwrap_or_default()
    }

    /// Return an array frame's buffer to the pool.
    pub fn put_nodes(&mut self, mut buf: Vec<ArchivedNode>) {
        buf.clear();
        self.nodes.push(buf);
    }

    /// Check out a cleared field buffer for an object frame.
    pub fn take_fields(&mut self) -> Vec<ArchivedField> {
        self.fields.pop().unwrap_or_default()
    }

    /// Return an object frame's buffer to the pool.
    pub fn put_fields(&mut self, mut buf: Vec<ArchivedField>) {
        buf.clear();
        self.fields.push(buf);
    }
}
