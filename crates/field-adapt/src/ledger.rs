//! Deferred write-backs into caller-visible storage.
//!
//! The walker adapts copies. Wherever a copy stands in for storage the
//! caller can observe (a pointer target, a boxed sequence element), an entry
//! is reserved before descending and filled once the copy is final. Nothing
//! reaches shared storage until [`WriteBackLedger::commit`], and a failed
//! call simply drops the ledger.

use std::fmt;

use crate::value::{Shared, Value};

/// Storage a write-back lands in.
#[derive(Clone)]
pub enum WriteBackTarget {
    /// The target of a present pointer.
    Pointee(Shared<Value>),
    /// One element of a sequence's backing storage.
    SequenceSlot {
        items: Shared<Vec<Value>>,
        index: usize,
    },
}

impl fmt::Debug for WriteBackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteBackTarget::Pointee(_) => f.write_str("Pointee"),
            WriteBackTarget::SequenceSlot { index, .. } => {
                f.debug_struct("SequenceSlot").field("index", index).finish()
            }
        }
    }
}

/// A reserved write-back. `replacement` stays empty until the adapted copy
/// is final.
#[derive(Clone, Debug)]
pub struct WriteBack {
    pub target: WriteBackTarget,
    pub replacement: Option<Value>,
}

/// Handle to a reserved entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryId(usize);

/// Ordered list of write-backs, outermost first.
#[derive(Debug)]
pub struct WriteBackLedger {
    entries: Vec<WriteBack>,
}

impl WriteBackLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Reserve an entry before descending into the copy it will carry.
    pub fn reserve(&mut self, target: WriteBackTarget) -> EntryId {
        self.entries.push(WriteBack {
            target,
            replacement: None,
        });
        EntryId(self.entries.len() - 1)
    }

    pub fn fill(&mut self, id: EntryId, replacement: Value) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.replacement = Some(replacement);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every filled entry, innermost first, so an outer replacement
    /// is the last write to any storage it shares with an inner one.
    /// Returns the number of writes performed.
    pub fn commit(self) -> usize {
        let mut written = 0;
        for entry in self.entries.into_iter().rev() {
            let Some(replacement) = entry.replacement else {
                continue;
            };
            match entry.target {
                WriteBackTarget::Pointee(target) => *target.write() = replacement,
                WriteBackTarget::SequenceSlot { items, index } => {
                    match items.write().get_mut(index) {
                        Some(slot) => *slot = replacement,
                        None => continue,
                    }
                }
            }
            written += 1;
        }
        written
    }
}

impl Default for WriteBackLedger {
    fn default() -> Self {
        Self::new()
    }
}
