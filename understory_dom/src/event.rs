// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener masks, listener handles, pointer identifiers, and mutation records.

use crate::ElementId;

bitflags::bitflags! {
    /// Kinds of events an element listens for.
    ///
    /// Listeners are registered through
    /// [`Document::add_listener`](crate::Document::add_listener) and revoked with
    /// [`Document::remove_listener`](crate::Document::remove_listener). The mask
    /// is a routing hint for hosts: events whose kind is not in any live
    /// listener's mask for the target (or its ancestors) need not be delivered.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventMask: u32 {
        /// Native drag gesture started on the element.
        const DRAG_START     = 1 << 0;
        /// Native drag entered the element.
        const DRAG_ENTER     = 1 << 1;
        /// Native drag moved over the element.
        const DRAG_OVER      = 1 << 2;
        /// Native drag left the element.
        const DRAG_LEAVE     = 1 << 3;
        /// Native drag dropped on the element.
        const DROP           = 1 << 4;
        /// Native drag ended (dropped or cancelled).
        const DRAG_END       = 1 << 5;
        /// Pointer pressed.
        const POINTER_DOWN   = 1 << 6;
        /// Pointer moved.
        const POINTER_MOVE   = 1 << 7;
        /// Pointer released.
        const POINTER_UP     = 1 << 8;
        /// Pointer interaction cancelled by the platform.
        const POINTER_CANCEL = 1 << 9;
        /// Context menu requested (long press on touch devices).
        const CONTEXT_MENU   = 1 << 10;
        /// Element box size changed.
        const RESIZE         = 1 << 11;
        /// Element scrolled.
        const SCROLL         = 1 << 12;

        /// Every native drag lifecycle event.
        const NATIVE_DRAG = Self::DRAG_START.bits()
            | Self::DRAG_ENTER.bits()
            | Self::DRAG_OVER.bits()
            | Self::DRAG_LEAVE.bits()
            | Self::DROP.bits()
            | Self::DRAG_END.bits();
        /// Every pointer event.
        const POINTER = Self::POINTER_DOWN.bits()
            | Self::POINTER_MOVE.bits()
            | Self::POINTER_UP.bits()
            | Self::POINTER_CANCEL.bits()
            | Self::CONTEXT_MENU.bits();
    }
}

/// Handle for a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Creates a listener handle from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifier of an active pointer (mouse, pen, or one touch contact).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// A child-list change observed on `target`.
///
/// Recorded whenever an element gains or loses a child, mirroring a
/// `childList` mutation observer entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    /// The element whose children changed.
    pub target: ElementId,
}
