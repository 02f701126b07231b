// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors, diagnostics, and remap outcomes.

use core::fmt;

use understory_dom::ElementId;

/// Errors returned by fallible registration and selection calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DndError {
    /// The handle is stale, detached, or not an element.
    InvalidElement(ElementId),
    /// The element is not a registered container.
    NotRegistered(ElementId),
    /// A drag session is already active.
    SessionActive,
}

impl fmt::Display for DndError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidElement(el) => write!(f, "{el} is not a connected element"),
            Self::NotRegistered(el) => write!(f, "{el} is not a registered container"),
            Self::SessionActive => f.write_str("a drag session is already active"),
        }
    }
}

impl core::error::Error for DndError {}

/// Recoverable conditions recorded by the controller.
///
/// Nothing here is fatal; the controller keeps running and the affected
/// operation becomes a no-op. Drain them with
/// [`DragController::take_diagnostics`](crate::DragController::take_diagnostics).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A container's enabled node count disagrees with its value count.
    ///
    /// The remap for that container was skipped and its previous state kept.
    ValueCountMismatch {
        /// The container.
        parent: ElementId,
        /// Number of eligible element children.
        nodes: usize,
        /// Number of values reported by the owner.
        values: usize,
    },
    /// A callback or caller supplied something that is not a usable element.
    IgnoredInvalidElement {
        /// The offending handle.
        element: ElementId,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueCountMismatch {
                parent,
                nodes,
                values,
            } => write!(
                f,
                "container {parent} has {nodes} enabled nodes but {values} values; remap skipped"
            ),
            Self::IgnoredInvalidElement { element } => {
                write!(f, "ignored {element}: not a usable element")
            }
        }
    }
}

/// Result of a remap pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RemapOutcome {
    /// The enabled node list was rebuilt.
    Remapped {
        /// Number of enabled nodes after the pass.
        nodes: usize,
    },
    /// Children, values, and configuration were unchanged; nothing was touched.
    Unchanged,
    /// The pass was skipped; see the diagnostic.
    Skipped(Diagnostic),
    /// The element is not a registered container.
    NotRegistered,
}
