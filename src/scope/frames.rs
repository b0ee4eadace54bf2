// ABOUTME: Arena of scope frames addressed by handle, each holding a value and its parent
// ABOUTME: Used for both the context chain and the private data chain of a render call

use crate::value::Value;

/// Handle to a frame inside a [`FrameArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

#[derive(Debug)]
struct Frame {
    value: Value,
    parent: Option<FrameId>,
}

/// Frames are only ever appended and released from the top, so a handle stays
/// valid for as long as the scope that created it is still rendering.
#[derive(Debug)]
pub struct FrameArena {
    frames: Vec<Frame>,
}

impl FrameArena {
    /// Create an arena whose first frame is the root
    pub fn new(root: Value) -> Self {
        Self {
            frames: vec![Frame {
                value: root,
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> FrameId {
        FrameId(0)
    }

    /// Append a frame chained to `parent`
    pub fn push(&mut self, value: Value, parent: FrameId) -> FrameId {
        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            value,
            parent: Some(parent),
        });
        id
    }

    pub fn value(&self, id: FrameId) -> &Value {
        &self.frames[id.0].value
    }

    pub fn parent(&self, id: FrameId) -> Option<FrameId> {
        self.frames[id.0].parent
    }

    /// Walk `up` parents from `id`; `None` when that leaves the chain
    pub fn ancestor(&self, id: FrameId, up: usize) -> Option<FrameId> {
        let mut current = id;
        for _ in 0..up {
            current = self.parent(current)?;
        }
        Some(current)
    }

    /// `id` followed by each of its ancestors up to the root
    pub fn chain(&self, id: FrameId) -> Chain<'_> {
        Chain {
            arena: self,
            next: Some(id),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Drop every frame allocated after the arena had `len` frames. The root always survives.
    pub fn truncate(&mut self, len: usize) {
        self.frames.truncate(len.max(1));
    }
}

pub struct Chain<'a> {
    arena: &'a FrameArena,
    next: Option<FrameId>,
}

impl Iterator for Chain<'_> {
    type Item = FrameId;

    fn next(&mut self) -> Option<FrameId> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}
