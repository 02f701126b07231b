// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events fed by the host and notifications produced for owners.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use understory_dom::{ElementId, PointerId};

/// Phase of a platform drag-and-drop gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeDragKind {
    /// The platform started dragging `target`.
    DragStart,
    /// The drag entered `target`.
    DragEnter,
    /// The drag moved over `target`.
    DragOver,
    /// The drag left `target`.
    DragLeave,
    /// The drag was dropped on `target`.
    Drop,
    /// The gesture finished, dropped or not.
    DragEnd,
}

/// A platform drag lifecycle event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NativeDragEvent {
    /// Event phase.
    pub kind: NativeDragKind,
    /// The element the platform delivered the event to.
    pub target: ElementId,
    /// Pointer position in client coordinates.
    pub position: Point,
}

/// Effect to advertise for the platform drop cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropEffect {
    /// Leave the platform default.
    #[default]
    None,
    /// Advertise a move.
    Move,
}

/// The image the platform should show under the cursor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragImage {
    /// Element to snapshot.
    pub element: ElementId,
    /// Cursor offset inside the element.
    pub offset: Vec2,
}

/// What the host should do with a native event after the controller saw it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NativeResponse {
    /// Suppress the platform default (required on drag-over for drops to be allowed).
    pub prevent_default: bool,
    /// Drop effect to set on the transfer.
    pub drop_effect: DropEffect,
    /// Drag image to install, on drag start only.
    pub drag_image: Option<DragImage>,
}

/// Phase of a low-level pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button or contact pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button or contact released.
    Up,
    /// The platform took the pointer away.
    Cancel,
    /// The platform is about to show a context menu.
    ContextMenu,
}

/// Input device class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// Mouse.
    Mouse,
    /// Stylus.
    Pen,
    /// Touch contact.
    Touch,
}

/// A low-level pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event phase.
    pub kind: PointerKind,
    /// Pointer identity.
    pub pointer_id: PointerId,
    /// Device class.
    pub pointer_type: PointerType,
    /// The element under the pointer (or holding its capture).
    pub target: ElementId,
    /// Pointer position in client coordinates.
    pub position: Point,
    /// Event timestamp in milliseconds, on the same clock as [`DragController::tick`](crate::DragController::tick).
    pub time_ms: u64,
}

/// What the host should do with a pointer event after the controller saw it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerResponse {
    /// Suppress the platform default (text selection, scrolling, context menu).
    pub prevent_default: bool,
    /// The controller owns this pointer for the rest of the gesture.
    pub captured: bool,
}

/// Geometry notifications for registered containers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerEvent {
    /// The container's box changed size.
    Resized(ElementId),
    /// The container scrolled.
    Scrolled(ElementId),
}

/// One item taking part in a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggedItem<V> {
    /// Element at pick-up time.
    pub element: ElementId,
    /// Index among the container's enabled nodes at pick-up time.
    pub index: usize,
    /// The item's value.
    pub value: V,
}

/// Sent when a drag session starts.
#[derive(Clone, Debug, PartialEq)]
pub struct DragStartEvent<V> {
    /// Container the drag started in.
    pub parent: ElementId,
    /// The container's values at pick-up.
    pub values: Vec<V>,
    /// Dragged items in index order.
    pub dragged: Vec<DraggedItem<V>>,
    /// Pointer position.
    pub position: Point,
}

/// Sent when values were reordered inside one container.
#[derive(Clone, Debug, PartialEq)]
pub struct SortEvent<V> {
    /// The container.
    pub parent: ElementId,
    /// Values before the change.
    pub previous_values: Vec<V>,
    /// Values after the change.
    pub values: Vec<V>,
    /// The dragged values.
    pub dragged: Vec<V>,
    /// Index of the first dragged value before the change.
    pub previous_index: usize,
    /// Index of the first dragged value after the change.
    pub index: usize,
    /// Pointer position.
    pub position: Point,
}

/// Sent when values moved from one container to another.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferEvent<V> {
    /// Container the values left.
    pub source: ElementId,
    /// Container the values entered.
    pub target: ElementId,
    /// Source values before the change.
    pub source_previous_values: Vec<V>,
    /// Source values after the change.
    pub source_values: Vec<V>,
    /// Target values before the change.
    pub target_previous_values: Vec<V>,
    /// Target values after the change.
    pub target_values: Vec<V>,
    /// The dragged values.
    pub dragged: Vec<V>,
    /// Index of the first dragged value in the target.
    pub index: usize,
    /// Pointer position.
    pub position: Point,
}

/// Sent when a drag session ends, committed or cancelled.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEndEvent<V> {
    /// Container the drag started in.
    pub initial_parent: ElementId,
    /// Container the dragged values ended up in.
    pub parent: ElementId,
    /// Final values of `parent`.
    pub values: Vec<V>,
    /// The dragged values.
    pub dragged: Vec<V>,
    /// Index of the first dragged value at pick-up.
    pub initial_index: usize,
    /// Index of the first dragged value at release.
    pub index: usize,
    /// The values crossed at least one container boundary.
    pub transferred: bool,
    /// The gesture was cancelled rather than dropped.
    pub cancelled: bool,
    /// Last pointer position.
    pub position: Point,
}
