// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host document contract.

use kurbo::{Point, Rect, Vec2};

use crate::{ElementId, EventMask, ListenerId, PointerId};

/// Kind of a node in the document tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An element: can carry classes, geometry, listeners, and children.
    Element,
    /// A text node.
    Text,
    /// A comment node (frameworks often use these as anchors).
    Comment,
}

bitflags::bitflags! {
    /// Axes along which an element clips and scrolls its content.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ScrollAxes: u8 {
        /// Horizontal overflow scrolls.
        const X = 0b01;
        /// Vertical overflow scrolls.
        const Y = 0b10;
    }
}

/// The operations interaction logic needs from a document.
///
/// The trait is object safe so that interaction crates can accept
/// `&mut dyn Document` and hosts can hand over whatever binding they have.
///
/// Conventions:
/// - Methods taking a stale or non-element handle degrade gracefully: queries
///   return `None`/empty/`false`, mutations are no-ops that return `false`.
/// - Geometry is in client space: [`bounding_rect`](Self::bounding_rect) already
///   accounts for the scroll offsets of every ancestor.
pub trait Document {
    /// Returns the document root element.
    fn root(&self) -> ElementId;

    /// Returns `true` if `el` refers to a live (not destroyed) node.
    fn is_alive(&self, el: ElementId) -> bool;

    /// Returns `true` if `el` is live and attached under the root.
    fn is_connected(&self, el: ElementId) -> bool;

    /// Returns the node kind, or `None` for stale handles.
    fn kind(&self, el: ElementId) -> Option<NodeKind>;

    /// Returns the parent of `el`, if attached.
    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Returns the children of `el` in document order (all node kinds).
    fn children(&self, el: ElementId) -> &[ElementId];

    /// Returns the client-space bounding box of a connected element.
    fn bounding_rect(&self, el: ElementId) -> Option<Rect>;

    /// Returns the scroll offset of the viewport (the root element).
    fn viewport_scroll(&self) -> Vec2;

    /// Returns the topmost pickable element under a client-space point.
    fn hit_test(&self, pt: Point) -> Option<ElementId>;

    /// Returns `true` if the element carries `class`.
    fn has_class(&self, el: ElementId, class: &str) -> bool;

    /// Adds `class`; returns `true` if the class list changed.
    fn add_class(&mut self, el: ElementId, class: &str) -> bool;

    /// Removes `class`; returns `true` if the class list changed.
    fn remove_class(&mut self, el: ElementId, class: &str) -> bool;

    /// Sets whether the platform may start a native drag from the element.
    fn set_draggable(&mut self, el: ElementId, draggable: bool);

    /// Sets whether the element (and its subtree) participates in hit testing.
    fn set_pickable(&mut self, el: ElementId, pickable: bool);

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Deep-clones an element into a detached copy.
    fn clone_element(&mut self, el: ElementId) -> Option<ElementId>;

    /// Appends `child` to `parent`, detaching it from its previous parent first.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool;

    /// Detaches `el` from its parent. The element stays alive.
    fn remove(&mut self, el: ElementId);

    /// Places an element at an absolute client-space position.
    ///
    /// Positioned elements ignore ancestor scroll offsets, like fixed positioning.
    fn set_position(&mut self, el: ElementId, origin: Point);

    /// Returns the current scroll offset of an element.
    fn scroll_offset(&self, el: ElementId) -> Vec2;

    /// Returns the maximum scroll offset along each axis (zero when not scrollable).
    fn scroll_range(&self, el: ElementId) -> Vec2;

    /// Scrolls an element, clamping into its scroll range; returns the applied offset.
    fn set_scroll_offset(&mut self, el: ElementId, offset: Vec2) -> Vec2;

    /// Registers interest in events on `el`.
    fn add_listener(&mut self, el: ElementId, mask: EventMask) -> Option<ListenerId>;

    /// Revokes a listener; returns `true` if it was live.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Routes subsequent events of `pointer` to `el`.
    fn set_pointer_capture(&mut self, el: ElementId, pointer: PointerId) -> bool;

    /// Releases a capture previously taken by `el`.
    fn release_pointer_capture(&mut self, el: ElementId, pointer: PointerId) -> bool;
}
