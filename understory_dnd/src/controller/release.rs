// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ending a session: commit, cleanup, notify.

use alloc::rc::Rc;

use understory_dom::Document;

use super::DragController;
use crate::config::{Flow, HookContext};
use crate::events::{DragEndEvent, SortEvent, TransferEvent};
use crate::placement::{
    inserted_values, placed_values, positions_of, swapped_across, swapped_values,
    transferred_values,
};
use crate::session::{DragSession, DriverState, Pending};

impl<V: Clone + PartialEq + 'static> DragController<V> {
    /// Ends the active session.
    ///
    /// Unless `cancelled` (or the end hook handled it), a pending swap, place,
    /// or insert is committed first. Cleanup and the drag-end notification
    /// always run, so no session outlives its gesture.
    pub(crate) fn release(&mut self, doc: &mut dyn Document, cancelled: bool) {
        let Some(mut session) = self.session.end() else {
            return;
        };
        self.autoscroll.cancel();
        let initial = self.registry.config(session.initial_parent);
        let dragged = session.dragged_values();

        let mut handled = false;
        if let Some(hook) = initial.as_ref().and_then(|c| c.hooks.handle_end.clone()) {
            let ctx = HookContext {
                parent: session.current_parent,
                node: Some(session.dragged_node.element),
                position: session.coordinates,
                dragged: &dragged,
            };
            handled = hook(doc, &ctx) == Flow::Handled;
        }
        if !cancelled && !handled {
            if let Some(pending) = session.pending {
                self.commit(&mut session, pending);
            }
        }
        self.cleanup(doc, &session);

        let current = self.registry.config(session.current_parent);
        let event = DragEndEvent {
            initial_parent: session.initial_parent,
            parent: session.current_parent,
            values: self
                .registry
                .values(session.current_parent)
                .unwrap_or_default(),
            dragged,
            initial_index: session.initial_index,
            index: session.target_index,
            transferred: session.transferred,
            cancelled,
            position: session.coordinates,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            parent = %event.parent,
            index = event.index,
            transferred = event.transferred,
            cancelled,
            "drag session ended"
        );
        let configs = match (&initial, &current) {
            (Some(a), Some(b)) if Rc::ptr_eq(a, b) => [initial.as_ref(), None],
            _ => [initial.as_ref(), current.as_ref()],
        };
        for config in configs.into_iter().flatten() {
            if let Some(f) = &config.on_drag_end {
                f(&event);
            }
            for plugin in &config.plugins {
                plugin.drag_end(doc, &event);
            }
        }
    }

    /// Applies a pending placement to the owners' values.
    fn commit(&mut self, session: &mut DragSession<V>, pending: Pending) {
        let source = session.current_parent;
        let target = pending.parent();
        let dragged = session.dragged_values();
        let (Some(source_values), Some(target_values)) =
            (self.registry.values(source), self.registry.values(target))
        else {
            return;
        };
        let Some(positions) = positions_of(&source_values, &dragged) else {
            return;
        };
        let previous_index = positions[0];
        let position = session.coordinates;

        if source == target {
            let (next, landed) = match pending {
                Pending::Swap { index, .. } => {
                    let Some(next) = swapped_values(&source_values, &positions, index) else {
                        return;
                    };
                    (next, index)
                }
                Pending::Place { index, .. } => {
                    let (next, _) = placed_values(&source_values, &positions, None, index);
                    (next, index.min(source_values.len() - dragged.len()))
                }
                Pending::Insert { index, .. } => {
                    let shift = positions.iter().filter(|&&p| p < index).count();
                    (
                        inserted_values(&source_values, &positions, index),
                        index - shift,
                    )
                }
            };
            if next == source_values {
                return;
            }
            session.ascending = landed > previous_index;
            session.moved_to(landed);
            self.registry.set_values(source, next.clone());
            self.fire_sort(&SortEvent {
                parent: source,
                previous_values: source_values,
                values: next,
                dragged,
                previous_index,
                index: landed,
                position,
            });
            return;
        }

        let (next_source, next_target, index) = match pending {
            Pending::Swap { index, .. } => {
                let Some((s, t)) = swapped_across(&source_values, &positions, &target_values, index)
                else {
                    return;
                };
                (s, t, index)
            }
            Pending::Place { index, .. } => {
                let (s, t) = placed_values(&source_values, &positions, Some(&target_values), index);
                let Some(t) = t else {
                    return;
                };
                (s, t, index.min(target_values.len()))
            }
            Pending::Insert { index, .. } => {
                let (s, t) = transferred_values(&source_values, &positions, &target_values, index);
                (s, t, index.min(target_values.len()))
            }
        };
        session.current_parent = target;
        session.transferred = true;
        session.moved_to(index);
        self.registry.set_values(source, next_source.clone());
        self.registry.set_values(target, next_target.clone());
        self.fire_transfer(&TransferEvent {
            source,
            target,
            source_previous_values: source_values,
            source_values: next_source,
            target_previous_values: target_values,
            target_values: next_target,
            dragged,
            index,
            position,
        });
    }

    /// Strips every decoration the session applied and drops its helper elements.
    fn cleanup(&mut self, doc: &mut dyn Document, session: &DragSession<V>) {
        let classes = self
            .registry
            .config(session.initial_parent)
            .map(|c| c.classes.clone())
            .unwrap_or_default();
        for node in &session.dragged_nodes {
            for class in [
                &classes.dragging,
                &classes.drag_placeholder,
                &classes.synthetic_placeholder,
                &classes.long_press,
            ] {
                self.registry.remove_node_class(doc, node.element, class);
            }
        }
        for &el in &session.marked {
            self.registry
                .remove_node_class(doc, el, &classes.drop_target);
        }
        for parent in [session.initial_parent, session.current_parent] {
            if let Some(config) = self.registry.config(parent) {
                self.registry
                    .remove_parent_class(doc, parent, &config.classes.drop_zone);
            }
        }
        if let Some(marker) = session.marker {
            doc.remove(marker);
        }
        if let DriverState::Synthetic {
            proxy,
            pointer_id,
            capture,
            ..
        } = session.driver
        {
            doc.remove(proxy);
            if let Some(el) = capture {
                doc.release_pointer_capture(el, pointer_id);
            }
        }
    }
}
