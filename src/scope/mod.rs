// ABOUTME: Context and private-data scope chains for a single render call
// ABOUTME: Resolves path expressions by walking frames from the current scope to the root

mod data;
mod frames;

use tracing::trace;

use crate::ast::PathExpr;
use crate::value::{Map, Value};

pub use data::DataFrame;
use frames::FrameArena;
pub use frames::FrameId;

/// Position in both chains: the active context frame and the active data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub context: FrameId,
    pub data: FrameId,
}

/// Arena sizes at a point in time; releasing a mark drops every frame pushed since
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    contexts: usize,
    data: usize,
}

/// The two frame chains owned by one render call
#[derive(Debug)]
pub(crate) struct ScopeStack {
    contexts: FrameArena,
    data: FrameArena,
}

impl ScopeStack {
    pub fn new(root: Value, data: DataFrame) -> Self {
        Self {
            contexts: FrameArena::new(root),
            data: FrameArena::new(Value::from(data)),
        }
    }

    pub fn root_cursor(&self) -> Cursor {
        Cursor {
            context: self.contexts.root(),
            data: self.data.root(),
        }
    }

    pub fn context_value(&self, cursor: Cursor) -> &Value {
        self.contexts.value(cursor.context)
    }

    pub fn root_value(&self) -> &Value {
        self.contexts.value(self.contexts.root())
    }

    /// Substitute a new context for child scopes
    pub fn push_context(&mut self, cursor: Cursor, value: Value) -> Cursor {
        Cursor {
            context: self.contexts.push(value, cursor.context),
            ..cursor
        }
    }

    /// Inject private data for child scopes; unset keys keep resolving through the parent
    pub fn push_data(&mut self, cursor: Cursor, frame: DataFrame) -> Cursor {
        Cursor {
            data: self.data.push(Value::from(frame), cursor.data),
            ..cursor
        }
    }

    pub fn mark(&self) -> Mark {
        Mark {
            contexts: self.contexts.len(),
            data: self.data.len(),
        }
    }

    pub fn release(&mut self, mark: Mark) {
        self.contexts.truncate(mark.contexts);
        self.data.truncate(mark.data);
    }

    /// Number of live context frames
    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// Resolve a path as a value. Helper lookup is the caller's concern.
    pub fn resolve(&self, cursor: Cursor, path: &PathExpr) -> Value {
        if path.data {
            return self.resolve_data(cursor, path);
        }

        let Some(start) = self.contexts.ancestor(cursor.context, path.up) else {
            trace!(path = %path, "up-navigation left the context chain");
            return Value::Absent;
        };

        let Some((first, rest)) = path.segments.split_first() else {
            return self.contexts.value(start).clone();
        };

        for frame in self.contexts.chain(start) {
            if let Some(found) = self.contexts.value(frame).get(first) {
                return found.get_path(rest);
            }
        }

        trace!(path = %path, "path not found in any context frame");
        Value::Absent
    }

    fn resolve_data(&self, cursor: Cursor, path: &PathExpr) -> Value {
        let Some((first, rest)) = path.segments.split_first() else {
            return Value::Absent;
        };

        if first == "root" && path.up == 0 {
            return self.root_value().get_path(rest);
        }

        let Some(start) = self.data.ancestor(cursor.data, path.up) else {
            return Value::Absent;
        };

        self.data
            .chain(start)
            .find_map(|frame| self.data.value(frame).get(first))
            .map_or(Value::Absent, |found| found.get_path(rest))
    }

    /// Flatten the data chain ending at `cursor` into one frame; nearer frames win
    pub fn data_snapshot(&self, cursor: Cursor) -> DataFrame {
        let frames: Vec<FrameId> = self.data.chain(cursor.data).collect();
        let mut merged = Map::new();
        for frame in frames.into_iter().rev() {
            if let Some(entries) = self.data.value(frame).as_mapping() {
                for (key, value) in entries {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        DataFrame::from_map(merged)
    }
}
