//! Per-kind identity sequences.
//!
//! # Invariants
//! - Each entity kind has its own strictly increasing sequence starting at 1.
//! - `0` is never issued; it is reserved for detached entities
//!   (see `model::DETACHED_ID`).
//! - Allocation is atomic, so one allocator may be shared across threads.

use std::sync::atomic::{AtomicI64, Ordering};

/// Entity kinds that receive allocated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Author,
    Reader,
    Category,
}

#[derive(Debug, Default)]
pub struct IdAllocator {
    author: AtomicI64,
    reader: AtomicI64,
    category: AtomicI64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next id for `kind`.
    pub fn next_id(&self, kind: EntityKind) -> i64 {
        self.sequence(kind).fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the last id issued for `kind`, or `0` when none was issued.
    pub fn last_issued(&self, kind: EntityKind) -> i64 {
        self.sequence(kind).load(Ordering::Relaxed)
    }

    fn sequence(&self, kind: EntityKind) -> &AtomicI64 {
        match kind {
            EntityKind::Author => &self.author,
            EntityKind::Reader => &self.reader,
            EntityKind::Category => &self.category,
        }
    }
}
