// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover handling shared by both drivers.
//!
//! The native and synthetic drivers both normalize what lies under the pointer
//! into a [`DragOver`] and hand it to [`DragController::drag_over`]. Nothing
//! below this point knows which driver produced the event.

use kurbo::Point;
use smallvec::SmallVec;
use understory_dom::{Document, ElementId};

use super::DragController;
use crate::autoscroll::{scroll_directions, scrollable_ancestor};
use crate::config::{AcceptContext, Flow, HookContext, ParentConfig, Placement};
use crate::events::{SortEvent, TransferEvent};
use crate::placement::{
    crosses_threshold, find_insert_point, incoming_direction, placed_range, positions_of,
    sorted_values, swapped_across, swapped_values, transferred_values,
};
use crate::session::Pending;

/// What lies under the pointer, independent of the driver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct DragOver {
    /// Pointer position in client coordinates.
    pub(crate) pointer: Point,
    /// The enabled node under the pointer.
    pub(crate) node: Option<ElementId>,
    /// The registered container under the pointer.
    pub(crate) parent: Option<ElementId>,
}

impl<V: Clone + PartialEq + 'static> DragController<V> {
    /// Resolves an event target into a [`DragOver`].
    pub(crate) fn resolve_over(
        &self,
        doc: &dyn Document,
        target: Option<ElementId>,
        pointer: Point,
    ) -> DragOver {
        let node = target.and_then(|t| self.registry.closest_node(doc, t));
        let parent = match node {
            Some(node) => self.registry.node(node).map(|n| n.parent),
            None => target.and_then(|t| self.registry.closest_parent(doc, t)),
        };
        DragOver {
            pointer,
            node,
            parent,
        }
    }

    /// Applies one hover to the active session.
    ///
    /// Returns `true` when a drop is allowed here, which the drivers report
    /// back as "prevent default".
    pub(crate) fn drag_over(&mut self, doc: &mut dyn Document, over: DragOver) -> bool {
        let Some(session) = self.session.current_mut() else {
            return false;
        };
        session.coordinates = over.pointer;
        let debounced = core::mem::take(&mut session.remap_just_finished);
        let current = session.current_parent;
        let dragged = session.dragged_values();
        self.update_autoscroll(doc, &over);

        let Some((parent, config)) = over
            .parent
            .and_then(|p| self.registry.config(p).map(|c| (p, c)))
            .filter(|(_, c)| !c.disabled)
        else {
            // Nowhere to drop: a release from here must not commit anything.
            self.drop_pending(doc);
            return false;
        };

        let hook = match over.node {
            Some(_) => config.hooks.handle_node_dragover.as_ref(),
            None => config.hooks.handle_parent_dragover.as_ref(),
        };
        if let Some(hook) = hook {
            let ctx = HookContext {
                parent,
                node: over.node,
                position: over.pointer,
                dragged: &dragged,
            };
            if hook(doc, &ctx) == Flow::Handled {
                return true;
            }
        }

        match config.placement {
            Placement::Sort if parent == current => {
                self.drop_pending(doc);
                self.sort_over(doc, parent, &over, &config, debounced);
                true
            }
            Placement::Sort => {
                self.drop_pending(doc);
                self.transfer_over(doc, parent, &over, &config)
            }
            Placement::Swap | Placement::Place => {
                self.mark_over(doc, parent, &over, config.placement)
            }
            Placement::Insert => self.insert_over(doc, parent, &over),
        }
    }

    /// Whether `target` takes values currently held by `source`.
    pub(crate) fn accepts(&self, target: ElementId, source: ElementId) -> bool {
        if target == source {
            return true;
        }
        let (Some(session), Some(config)) = (self.session.current(), self.registry.config(target))
        else {
            return false;
        };
        if !config.drop_zone || config.disabled {
            return false;
        }
        let dragged = session.dragged_values();
        if let Some(accepts) = &config.accepts {
            return accepts(&AcceptContext {
                target,
                source,
                initial_parent: session.initial_parent,
                dragged: &dragged,
            });
        }
        let initial = self.registry.config(session.initial_parent);
        match (&config.group, initial.as_ref().and_then(|c| c.group.as_ref())) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn sort_over(
        &mut self,
        doc: &mut dyn Document,
        parent: ElementId,
        over: &DragOver,
        config: &ParentConfig<V>,
        debounced: bool,
    ) {
        if !config.sortable {
            return;
        }
        let Some(node) = over.node else {
            return;
        };
        let Some(session) = self.session.current_mut() else {
            return;
        };
        if session.is_dragged(node) {
            session.last_target_value = None;
            return;
        }
        if debounced || session.affected.contains(&node) {
            return;
        }
        let Some(target) = self.registry.node(node) else {
            return;
        };
        if session.last_target_value.as_ref() == Some(&target.value) {
            return;
        }
        let (Some(hovered), Some(dragged_rect)) = (
            doc.bounding_rect(node),
            doc.bounding_rect(session.dragged_node.element),
        ) else {
            return;
        };
        let direction = incoming_direction(hovered, dragged_rect);
        if !crosses_threshold(direction, hovered, over.pointer, config.threshold) {
            return;
        }

        let Some(values) = self.registry.values(parent) else {
            return;
        };
        let dragged = session.dragged_values();
        let Some(positions) = positions_of(&values, &dragged) else {
            return;
        };
        let index = target.index;
        let target_value = target.value.clone();
        let next = sorted_values(&values, &positions, index);
        if next == values {
            return;
        }
        let previous_index = positions[0];
        let landed = index.min(values.len() - dragged.len());

        let (lo, hi) = if previous_index < index {
            (previous_index, index)
        } else {
            (index, previous_index)
        };
        let affected: SmallVec<[ElementId; 4]> = self
            .registry
            .parent(parent)
            .map(|p| {
                p.enabled
                    .iter()
                    .enumerate()
                    .filter(|(i, el)| (lo..=hi).contains(i) && !session.is_dragged(**el))
                    .map(|(_, el)| *el)
                    .collect()
            })
            .unwrap_or_default();
        session.affected = affected;
        session.incoming_direction = Some(direction);
        session.ascending = index > previous_index;
        session.last_target_value = Some(target_value);
        session.moved_to(landed);

        self.registry.set_values(parent, next.clone());
        self.fire_sort(&SortEvent {
            parent,
            previous_values: values,
            values: next,
            dragged,
            previous_index,
            index: landed,
            position: over.pointer,
        });
    }

    fn transfer_over(
        &mut self,
        doc: &mut dyn Document,
        target: ElementId,
        over: &DragOver,
        config: &ParentConfig<V>,
    ) -> bool {
        let Some(source) = self.session.current().map(|s| s.current_parent) else {
            return false;
        };
        if !self.accepts(target, source) {
            return false;
        }
        let (Some(source_values), Some(target_values)) =
            (self.registry.values(source), self.registry.values(target))
        else {
            return false;
        };
        let Some(session) = self.session.current_mut() else {
            return false;
        };
        let dragged = session.dragged_values();
        let Some(positions) = positions_of(&source_values, &dragged) else {
            return false;
        };
        let mut index = over
            .node
            .and_then(|n| self.registry.node(n))
            .map_or(target_values.len(), |n| n.index);
        if !config.sortable {
            index = if target == session.initial_parent {
                session.initial_index
            } else {
                target_values.len()
            };
        }
        let index = index.min(target_values.len());
        let (next_source, next_target) =
            transferred_values(&source_values, &positions, &target_values, index);

        session.current_parent = target;
        session.transferred = true;
        session.last_target_value = None;
        session.affected.clear();
        session.moved_to(index);

        self.registry.set_values(source, next_source.clone());
        self.registry.set_values(target, next_target.clone());
        if let Some(source_config) = self.registry.config(source) {
            self.registry
                .remove_parent_class(doc, source, &source_config.classes.drop_zone);
        }
        self.registry
            .add_parent_class(doc, target, &config.classes.drop_zone);
        self.fire_transfer(&TransferEvent {
            source,
            target,
            source_previous_values: source_values,
            source_values: next_source,
            target_previous_values: target_values,
            target_values: next_target,
            dragged,
            index,
            position: over.pointer,
        });
        true
    }

    /// Marks the run a swap or place would occupy and records it as pending.
    fn mark_over(
        &mut self,
        doc: &mut dyn Document,
        parent: ElementId,
        over: &DragOver,
        placement: Placement,
    ) -> bool {
        self.drop_pending(doc);
        let Some(source) = self.session.current().map(|s| s.current_parent) else {
            return false;
        };
        if !self.accepts(parent, source) {
            return false;
        }
        let (Some(session), Some(record)) =
            (self.session.current(), self.registry.parent(parent))
        else {
            return false;
        };
        let len = record.enabled.len();
        let count = session.dragged_nodes.len();
        let index = match over.node {
            Some(node) if session.is_dragged(node) => return true,
            Some(node) => match self.registry.node(node) {
                Some(n) => n.index,
                None => return true,
            },
            None if placement == Placement::Place && parent != source => len,
            None => return true,
        };

        let pending = match placement {
            Placement::Swap => {
                let dragged = session.dragged_values();
                let (Some(source_values), Some(target_values)) =
                    (self.registry.values(source), self.registry.values(parent))
                else {
                    return false;
                };
                let Some(positions) = positions_of(&source_values, &dragged) else {
                    return false;
                };
                let valid = if parent == source {
                    swapped_values(&source_values, &positions, index).is_some()
                } else {
                    swapped_across(&source_values, &positions, &target_values, index).is_some()
                };
                if !valid {
                    return true;
                }
                Pending::Swap { parent, index }
            }
            _ => Pending::Place { parent, index },
        };
        let run: SmallVec<[ElementId; 4]> = record.enabled[placed_range(index, count, len)]
            .iter()
            .copied()
            .filter(|el| !session.is_dragged(*el))
            .collect();
        let class = self
            .registry
            .config(session.initial_parent)
            .map(|c| c.classes.drop_target.clone())
            .unwrap_or_default();
        for &el in &run {
            self.registry.add_node_class(doc, el, &class);
        }
        if let Some(session) = self.session.current_mut() {
            session.marked = run;
            session.pending = Some(pending);
        }
        true
    }

    /// Matches the pointer against insertion zones and moves the marker.
    fn insert_over(&mut self, doc: &mut dyn Document, parent: ElementId, over: &DragOver) -> bool {
        let Some(source) = self.session.current().map(|s| s.current_parent) else {
            return false;
        };
        if !self.accepts(parent, source) {
            self.drop_pending(doc);
            return false;
        }
        let Some(record) = self.registry.parent(parent) else {
            return false;
        };
        let scroll = doc.viewport_scroll();
        if record.enabled.is_empty() {
            self.remove_marker(doc);
            if let Some(session) = self.session.current_mut() {
                session.pending = Some(Pending::Insert { parent, index: 0 });
            }
            return true;
        }
        let Some(point) = find_insert_point(&record.insert_zones, over.pointer + scroll) else {
            return true;
        };
        let class = record.config.classes.insert_marker.clone();
        let marker = match self
            .session
            .current()
            .and_then(|s| s.marker)
            .filter(|&m| doc.is_connected(m))
        {
            Some(marker) => marker,
            None => {
                let marker = doc.create_element("div");
                doc.set_pickable(marker, false);
                doc.add_class(marker, &class);
                let root = doc.root();
                doc.append_child(root, marker);
                marker
            }
        };
        doc.set_position(marker, point.marker.origin() - scroll);
        if let Some(session) = self.session.current_mut() {
            session.marker = Some(marker);
            session.pending = Some(Pending::Insert {
                parent,
                index: point.index,
            });
        }
        true
    }

    /// Drops any pending swap or place along with its drop-target classes.
    fn clear_pending(&mut self, doc: &mut dyn Document) {
        let Some(session) = self.session.current_mut() else {
            return;
        };
        session.pending = None;
        let marked = core::mem::take(&mut session.marked);
        if marked.is_empty() {
            return;
        }
        let initial = session.initial_parent;
        let class = self
            .registry
            .config(initial)
            .map(|c| c.classes.drop_target.clone())
            .unwrap_or_default();
        for el in marked {
            self.registry.remove_node_class(doc, el, &class);
        }
    }

    /// Forgets every pending placement: drop-target classes and the insert marker.
    pub(crate) fn drop_pending(&mut self, doc: &mut dyn Document) {
        self.clear_pending(doc);
        self.remove_marker(doc);
    }

    fn remove_marker(&mut self, doc: &mut dyn Document) {
        if let Some(marker) = self.session.current_mut().and_then(|s| s.marker.take()) {
            doc.remove(marker);
        }
    }

    /// Schedules, keeps, or cancels the autoscroll task for this hover.
    fn update_autoscroll(&mut self, doc: &dyn Document, over: &DragOver) {
        let Some(base) = over
            .parent
            .or_else(|| self.session.current().map(|s| s.current_parent))
        else {
            return;
        };
        let behavior = self
            .registry
            .config(base)
            .map(|c| c.scroll_behavior)
            .unwrap_or_default();
        let Some(target) = scrollable_ancestor(doc, base) else {
            self.autoscroll.cancel();
            return;
        };
        let Some(rect) = doc.bounding_rect(target) else {
            self.autoscroll.cancel();
            return;
        };
        let dirs = scroll_directions(
            rect,
            over.pointer,
            behavior,
            doc.scroll_offset(target),
            doc.scroll_range(target),
        );
        self.autoscroll.schedule(target, dirs, behavior.speed);
    }

    /// Re-runs hover detection under a stationary pointer after the content moved.
    pub(crate) fn reprobe(&mut self, doc: &mut dyn Document) {
        let Some((pointer, position)) = self
            .session
            .current()
            .and_then(|s| s.pointer_id().map(|p| (p, s.coordinates)))
        else {
            return;
        };
        self.synthetic_move(doc, pointer, position);
    }
}

