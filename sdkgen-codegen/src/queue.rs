//! Class generation work queue.
//!
//! Object types are discovered while other classes are being rendered, so
//! the driver drains this queue to a fixed point. A `(source type, direction)`
//! pair is enqueued at most once for the lifetime of the queue.

use crate::error::CodegenError;
use crate::names::Fqn;
use sdkgen_schema::ObjectTypeId;
use std::collections::{BTreeSet, VecDeque};

/// Which side of the wire a generated class serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Write-side argument class with a builder.
    Input,
    /// Read-side result class.
    Output,
}

/// A class that still has to be generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassQueueEntry {
    /// Package the class lives in.
    pub target_package: Fqn,
    /// Class identifier.
    pub class_name: String,
    /// Object type the class is generated from.
    pub source_type: ObjectTypeId,
    /// Input or output class.
    pub direction: Direction,
}

impl ClassQueueEntry {
    /// Returns the fully-qualified class name.
    #[must_use]
    pub fn fqn(&self) -> Fqn {
        self.target_package.append(self.class_name.clone())
    }
}

/// Deduplicating work list of classes to generate.
#[derive(Debug, Default)]
pub struct ClassQueue {
    seen: BTreeSet<(ObjectTypeId, Direction)>,
    pending_inputs: VecDeque<ClassQueueEntry>,
    pending_outputs: VecDeque<ClassQueueEntry>,
}

impl ClassQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues `entry` unless its `(source type, direction)` was seen before.
    ///
    /// Returns true if the entry was enqueued.
    pub fn ensure_generated(&mut self, entry: ClassQueueEntry) -> bool {
        let key = (entry.source_type.clone(), entry.direction);
        if !self.seen.insert(key) {
            return false;
        }
        tracing::debug!(
            class = %entry.fqn(),
            direction = ?entry.direction,
            "enqueued class"
        );
        match entry.direction {
            Direction::Input => self.pending_inputs.push_back(entry),
            Direction::Output => self.pending_outputs.push_back(entry),
        }
        true
    }

    /// Merges a batch of discovered entries.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = ClassQueueEntry>) {
        for entry in entries {
            self.ensure_generated(entry);
        }
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending_inputs.is_empty() && self.pending_outputs.is_empty()
    }

    /// Pops the next entry, inputs before outputs.
    ///
    /// # Errors
    /// Returns `CodegenError::QueueEmpty` if nothing is pending.
    pub fn dequeue(&mut self) -> Result<ClassQueueEntry, CodegenError> {
        self.pending_inputs
            .pop_front()
            .or_else(|| self.pending_outputs.pop_front())
            .ok_or(CodegenError::QueueEmpty)
    }

    /// Returns true if the pair was ever enqueued.
    #[cfg(test)]
    #[must_use]
    pub fn was_seen(&self, source_type: &ObjectTypeId, direction: Direction) -> bool {
        self.seen.contains(&(source_type.clone(), direction))
    }
}
