// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The synthetic driver: drag emulation from pointer events.
//!
//! A press only arms. The session starts once the pointer travels past
//! [`drag_start_threshold`](crate::ParentConfig::drag_start_threshold) (or
//! after a completed long press). From then on a non-pickable clone of the
//! grabbed node follows the pointer and hit testing stands in for the
//! platform's drag-over targeting.

use kurbo::Point;
use understory_dom::{Document, PointerId};

use super::DragController;
use crate::config::ParentConfig;
use crate::error::Diagnostic;
use crate::events::{PointerEvent, PointerKind, PointerResponse, PointerType};
use crate::pointer::ArmedPress;
use crate::session::DriverState;

/// Whether presses of `pointer_type` in a container with `config` use this driver.
fn uses_synthetic<V>(config: &ParentConfig<V>, pointer_type: PointerType) -> bool {
    !config.native_drag || pointer_type == PointerType::Touch
}

const HANDLED: PointerResponse = PointerResponse {
    prevent_default: true,
    captured: false,
};

impl<V: Clone + PartialEq + 'static> DragController<V> {
    /// Handles a pointer event delivered to a node.
    ///
    /// Pointer events for a pointer other than the one driving the active
    /// session, or arriving during a native session, are ignored.
    pub fn handle_pointer(&mut self, doc: &mut dyn Document, event: PointerEvent) -> PointerResponse {
        let owns_session = self
            .session
            .current()
            .is_some_and(|s| s.pointer_id() == Some(event.pointer_id));
        match event.kind {
            PointerKind::Down => self.pointer_down(doc, &event),
            PointerKind::Move if owns_session => {
                self.synthetic_move(doc, event.pointer_id, event.position);
                HANDLED
            }
            PointerKind::Move => self.pointer_move(doc, &event),
            PointerKind::Up | PointerKind::Cancel if owns_session => {
                if let Some(session) = self.session.current_mut() {
                    session.coordinates = event.position;
                }
                self.release(doc, event.kind == PointerKind::Cancel);
                HANDLED
            }
            PointerKind::Up | PointerKind::Cancel => {
                if self.armed.is_some_and(|a| a.pointer_id == event.pointer_id) {
                    self.disarm(doc);
                }
                PointerResponse::default()
            }
            PointerKind::ContextMenu => PointerResponse {
                prevent_default: self.armed.is_some() || owns_session,
                captured: false,
            },
        }
    }

    fn pointer_down(&mut self, doc: &mut dyn Document, event: &PointerEvent) -> PointerResponse {
        if self.session.is_active() {
            return PointerResponse::default();
        }
        self.disarm(doc);
        let Some(node) = self.registry.closest_node(&*doc, event.target) else {
            return PointerResponse::default();
        };
        let Some((parent, config)) = self.can_pick_up(&*doc, node, event.target) else {
            return PointerResponse::default();
        };
        if !uses_synthetic(&config, event.pointer_type) {
            return PointerResponse::default();
        }
        let deadline = config
            .long_press
            .then(|| event.time_ms.saturating_add(config.long_press_duration));
        self.armed = Some(ArmedPress::new(
            node,
            parent,
            event.pointer_id,
            event.pointer_type,
            event.position,
            deadline,
        ));
        PointerResponse::default()
    }

    fn pointer_move(&mut self, doc: &mut dyn Document, event: &PointerEvent) -> PointerResponse {
        let Some(armed) = self
            .armed
            .as_mut()
            .filter(|a| {
                a.pointer_id == event.pointer_id
                    && a.pointer_type == event.pointer_type
                    && a.press.is_active()
            })
        else {
            return PointerResponse::default();
        };
        let became_long = armed.poll_long_press(event.time_ms);
        let snapshot = *armed;
        let Some(config) = self.registry.config(snapshot.parent) else {
            self.armed = None;
            return PointerResponse::default();
        };
        if became_long {
            self.registry
                .add_node_class(doc, snapshot.node, &config.classes.long_press);
        }
        let moved = snapshot
            .press
            .exceeds(event.position, config.drag_start_threshold);
        if snapshot.awaiting_long_press() {
            // Moving away before the long press completes is a scroll, not a drag.
            if moved {
                self.disarm(doc);
            }
            return PointerResponse::default();
        }
        if !moved && !snapshot.long_pressed {
            return PointerResponse::default();
        }
        self.start_synthetic(doc, snapshot, event.position)
    }

    fn start_synthetic(
        &mut self,
        doc: &mut dyn Document,
        armed: ArmedPress,
        position: Point,
    ) -> PointerResponse {
        self.armed = None;
        let Some(config) = self.registry.config(armed.parent) else {
            return PointerResponse::default();
        };
        let Some(dragged) = self.prepare_drag(doc, armed.parent, armed.node, position, &config)
        else {
            self.registry
                .remove_node_class(doc, armed.node, &config.classes.long_press);
            return PointerResponse::default();
        };
        let Some(proxy) = doc.clone_element(armed.node) else {
            self.diagnose(Diagnostic::IgnoredInvalidElement {
                element: armed.node,
            });
            return PointerResponse::default();
        };
        let origin = doc
            .bounding_rect(armed.node)
            .map_or(position, |rect| rect.origin());
        let grab_offset = armed.press.start_pos.unwrap_or(position) - origin;
        doc.set_pickable(proxy, false);
        doc.add_class(proxy, &config.classes.dragging);
        let root = doc.root();
        doc.append_child(root, proxy);
        doc.set_position(proxy, position - grab_offset);

        let capture = doc
            .set_pointer_capture(armed.node, armed.pointer_id)
            .then_some(armed.node);
        let driver = DriverState::Synthetic {
            proxy,
            pointer_id: armed.pointer_id,
            grab_offset,
            capture,
        };
        if !self.begin_session(doc, armed.parent, armed.node, dragged, position, driver) {
            doc.remove(proxy);
            if let Some(el) = capture {
                doc.release_pointer_capture(el, armed.pointer_id);
            }
            return PointerResponse::default();
        }
        self.synthetic_move(doc, armed.pointer_id, position);
        PointerResponse {
            prevent_default: true,
            captured: capture.is_some(),
        }
    }

    /// Moves the proxy and probes what lies under the pointer.
    pub(crate) fn synthetic_move(&mut self, doc: &mut dyn Document, pointer: PointerId, position: Point) {
        let Some(session) = self.session.current() else {
            return;
        };
        let DriverState::Synthetic {
            proxy,
            pointer_id,
            grab_offset,
            ..
        } = session.driver
        else {
            return;
        };
        if pointer_id != pointer {
            return;
        }
        doc.set_position(proxy, position - grab_offset);
        let over = self.resolve_over(&*doc, doc.hit_test(position), position);
        self.drag_over(doc, over);
    }
}
