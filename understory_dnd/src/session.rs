// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session: state of the one active gesture.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use understory_dom::{ElementId, PointerId};

use crate::config::ClassNames;
use crate::error::DndError;
use crate::events::DragImage;
use crate::placement::Direction;

/// A dragged node, tracked across re-renders by value.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionNode<V> {
    /// The element currently representing the value.
    pub element: ElementId,
    /// The dragged value.
    pub value: V,
    /// Position among the current container's enabled nodes.
    pub index: usize,
}

/// Driver-specific payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum DriverState {
    Native {
        drag_image: Option<DragImage>,
    },
    Synthetic {
        /// Clone of the dragged node that follows the pointer.
        proxy: ElementId,
        pointer_id: PointerId,
        /// Pointer offset inside the dragged node at pick-up.
        grab_offset: Vec2,
        /// Element currently holding the pointer capture.
        capture: Option<ElementId>,
    },
}

/// A placement that only applies on release.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Pending {
    Swap { parent: ElementId, index: usize },
    Place { parent: ElementId, index: usize },
    Insert { parent: ElementId, index: usize },
}

impl Pending {
    pub(crate) fn parent(self) -> ElementId {
        match self {
            Self::Swap { parent, .. } | Self::Place { parent, .. } | Self::Insert { parent, .. } => {
                parent
            }
        }
    }
}

/// State of the active drag gesture.
///
/// Exactly one session exists between pick-up and release. Element references
/// in it are re-pointed by remaps whenever the owner re-renders the dragged
/// values into new elements.
#[derive(Clone, Debug)]
pub struct DragSession<V> {
    /// The grabbed node.
    pub(crate) dragged_node: SessionNode<V>,
    /// Every dragged node in index order, the grabbed one included.
    pub(crate) dragged_nodes: Vec<SessionNode<V>>,
    pub(crate) initial_parent: ElementId,
    pub(crate) current_parent: ElementId,
    pub(crate) initial_index: usize,
    pub(crate) target_index: usize,
    /// Siblings shifted by the last sort; cleared by the next remap.
    pub(crate) affected: SmallVec<[ElementId; 4]>,
    pub(crate) incoming_direction: Option<Direction>,
    pub(crate) ascending: bool,
    pub(crate) transferred: bool,
    pub(crate) coordinates: Point,
    pub(crate) last_target_value: Option<V>,
    pub(crate) remap_just_finished: bool,
    pub(crate) placeholder_applied: bool,
    pub(crate) pending: Option<Pending>,
    /// Nodes carrying the drop-target class for a pending swap or place.
    pub(crate) marked: SmallVec<[ElementId; 4]>,
    pub(crate) marker: Option<ElementId>,
    pub(crate) driver: DriverState,
}

impl<V> DragSession<V> {
    /// The grabbed node.
    #[must_use]
    pub fn dragged_node(&self) -> &SessionNode<V> {
        &self.dragged_node
    }

    /// Every dragged node in index order.
    #[must_use]
    pub fn dragged_nodes(&self) -> &[SessionNode<V>] {
        &self.dragged_nodes
    }

    /// Container the drag started in.
    #[must_use]
    pub fn initial_parent(&self) -> ElementId {
        self.initial_parent
    }

    /// Container currently holding the dragged values.
    #[must_use]
    pub fn current_parent(&self) -> ElementId {
        self.current_parent
    }

    /// Index of the first dragged node at pick-up.
    #[must_use]
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    /// Index the dragged values were last moved to.
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Siblings shifted by the last sort.
    #[must_use]
    pub fn affected_nodes(&self) -> &[ElementId] {
        &self.affected
    }

    /// Side from which the last accepted sort approached its target.
    #[must_use]
    pub fn incoming_direction(&self) -> Option<Direction> {
        self.incoming_direction
    }

    /// The last sort moved toward higher indices.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// The values crossed a container boundary at least once.
    #[must_use]
    pub fn transferred(&self) -> bool {
        self.transferred
    }

    /// Last known pointer position in client coordinates.
    #[must_use]
    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    /// `true` for sessions driven by pointer emulation.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        matches!(self.driver, DriverState::Synthetic { .. })
    }

    /// The proxy element following the pointer during a synthetic drag.
    #[must_use]
    pub fn proxy(&self) -> Option<ElementId> {
        match self.driver {
            DriverState::Synthetic { proxy, .. } => Some(proxy),
            DriverState::Native { .. } => None,
        }
    }

    /// The drag image chosen at pick-up of a native drag.
    #[must_use]
    pub fn drag_image(&self) -> Option<DragImage> {
        match self.driver {
            DriverState::Native { drag_image } => drag_image,
            DriverState::Synthetic { .. } => None,
        }
    }

    /// The insertion marker element, while an insert is pending.
    #[must_use]
    pub fn insert_marker(&self) -> Option<ElementId> {
        self.marker
    }

    /// Container and index of a placement that will apply on release.
    #[must_use]
    pub fn pending_target(&self) -> Option<(ElementId, usize)> {
        self.pending.map(|p| match p {
            Pending::Swap { parent, index }
            | Pending::Place { parent, index }
            | Pending::Insert { parent, index } => (parent, index),
        })
    }

    pub(crate) fn is_dragged(&self, el: ElementId) -> bool {
        self.dragged_nodes.iter().any(|n| n.element == el)
    }

    pub(crate) fn pointer_id(&self) -> Option<PointerId> {
        match self.driver {
            DriverState::Synthetic { pointer_id, .. } => Some(pointer_id),
            DriverState::Native { .. } => None,
        }
    }

    /// The class dragged nodes should carry right now.
    pub(crate) fn node_class<'a>(&self, classes: &'a ClassNames) -> &'a str {
        match self.driver {
            DriverState::Synthetic { .. } => &classes.synthetic_placeholder,
            DriverState::Native { .. } if self.placeholder_applied => &classes.drag_placeholder,
            DriverState::Native { .. } => &classes.dragging,
        }
    }
}

impl<V: Clone> DragSession<V> {
    /// The dragged values in index order.
    #[must_use]
    pub fn dragged_values(&self) -> Vec<V> {
        self.dragged_nodes.iter().map(|n| n.value.clone()).collect()
    }

    /// Records that the dragged values now occupy `index..` of the current parent.
    pub(crate) fn moved_to(&mut self, index: usize) {
        for (offset, node) in self.dragged_nodes.iter_mut().enumerate() {
            node.index = index + offset;
        }
        if let Some(primary) = self
            .dragged_nodes
            .iter()
            .find(|n| n.element == self.dragged_node.element)
        {
            self.dragged_node.index = primary.index;
        }
        self.target_index = index;
    }
}

/// Owner of the at-most-one active session.
#[derive(Clone, Debug)]
pub(crate) struct SessionSlot<V> {
    current: Option<DragSession<V>>,
}

impl<V> Default for SessionSlot<V> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<V> SessionSlot<V> {
    pub(crate) fn current(&self) -> Option<&DragSession<V>> {
        self.current.as_ref()
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut DragSession<V>> {
        self.current.as_mut()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Installs a new session; refuses while another one is active.
    pub(crate) fn start(&mut self, session: DragSession<V>) -> Result<&mut DragSession<V>, DndError> {
        if self.current.is_some() {
            return Err(DndError::SessionActive);
        }
        Ok(self.current.insert(session))
    }

    /// Removes and returns the active session.
    pub(crate) fn end(&mut self) -> Option<DragSession<V>> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn node(slot: u32, value: &'static str, index: usize) -> SessionNode<&'static str> {
        SessionNode {
            element: ElementId::new(slot, 1),
            value,
            index,
        }
    }

    fn session() -> DragSession<&'static str> {
        DragSession {
            dragged_node: node(2, "b", 1),
            dragged_nodes: vec![node(1, "a", 0), node(2, "b", 1)],
            initial_parent: ElementId::new(0, 1),
            current_parent: ElementId::new(0, 1),
            initial_index: 0,
            target_index: 0,
            affected: SmallVec::new(),
            incoming_direction: None,
            ascending: false,
            transferred: false,
            coordinates: Point::ORIGIN,
            last_target_value: None,
            remap_just_finished: false,
            placeholder_applied: false,
            pending: None,
            marked: SmallVec::new(),
            marker: None,
            driver: DriverState::Native { drag_image: None },
        }
    }

    #[test]
    fn slot_refuses_a_second_session() {
        let mut slot = SessionSlot::default();
        assert!(slot.start(session()).is_ok());
        assert_eq!(slot.start(session()).err(), Some(DndError::SessionActive));
        assert!(slot.end().is_some());
        assert!(!slot.is_active());
        assert!(slot.start(session()).is_ok());
    }

    #[test]
    fn moved_to_renumbers_every_dragged_node() {
        let mut s = session();
        s.moved_to(3);
        let indices: Vec<_> = s.dragged_nodes().iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![3, 4]);
        assert_eq!(s.dragged_node().index, 4);
        assert_eq!(s.target_index(), 3);
        assert_eq!(s.dragged_values(), vec!["a", "b"]);
    }

    #[test]
    fn node_class_tracks_the_driver_phase() {
        let classes = ClassNames::default();
        let mut s = session();
        assert_eq!(s.node_class(&classes), classes.dragging);
        s.placeholder_applied = true;
        assert_eq!(s.node_class(&classes), classes.drag_placeholder);
        s.driver = DriverState::Synthetic {
            proxy: ElementId::new(9, 1),
            pointer_id: PointerId(1),
            grab_offset: Vec2::ZERO,
            capture: None,
        };
        assert_eq!(s.node_class(&classes), classes.synthetic_placeholder);
        assert_eq!(s.proxy(), Some(ElementId::new(9, 1)));
    }
}
