// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identifiers.

use core::fmt;

/// Identifier for an element (or text/comment node) in a document.
///
/// This is a small, copyable handle made of a slot index and a generation
/// counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On destruction, the slot is freed; any existing `ElementId` that pointed to
///   that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new,
///   distinct `ElementId`.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether a
/// handle still refers to a live element. Detaching an element from the tree
/// does not make it stale; only destroying it does.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    /// Creates an identifier from a raw slot and generation.
    ///
    /// Host bindings that implement [`Document`](crate::Document) over their own
    /// element storage use this to mint handles.
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// Returns the slot index.
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Returns the generation counter.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}v{})", self.0, self.1)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.0, self.1)
    }
}
