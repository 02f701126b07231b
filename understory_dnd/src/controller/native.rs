// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The native driver: platform drag lifecycle events.

use alloc::vec::Vec;

use understory_dom::{Document, NodeKind};

use super::DragController;
use crate::error::Diagnostic;
use crate::events::{DragImage, DropEffect, NativeDragEvent, NativeDragKind, NativeResponse};
use crate::session::DriverState;

impl<V: Clone + PartialEq + 'static> DragController<V> {
    /// Handles a native drag event delivered to a node or container.
    ///
    /// The response tells the host whether to prevent the platform default
    /// (which, for drag-over, is what allows a drop) and, on drag start, which
    /// drag image and effect to use.
    ///
    /// Native events arriving while a synthetic session is active are ignored.
    pub fn handle_native(&mut self, doc: &mut dyn Document, event: NativeDragEvent) -> NativeResponse {
        let native_session = self.session.current().is_some_and(|s| !s.is_synthetic());
        match event.kind {
            NativeDragKind::DragStart => self.native_start(doc, event),
            NativeDragKind::DragEnter | NativeDragKind::DragOver if native_session => {
                let over = self.resolve_over(&*doc, Some(event.target), event.position);
                let allowed = self.drag_over(doc, over);
                NativeResponse {
                    prevent_default: allowed,
                    drop_effect: if allowed {
                        DropEffect::Move
                    } else {
                        DropEffect::None
                    },
                    drag_image: None,
                }
            }
            NativeDragKind::Drop if native_session => {
                if let Some(session) = self.session.current_mut() {
                    session.coordinates = event.position;
                }
                self.release(doc, false);
                NativeResponse {
                    prevent_default: true,
                    drop_effect: DropEffect::Move,
                    drag_image: None,
                }
            }
            // A drag that ends without a drop was abandoned outside any target.
            NativeDragKind::DragEnd if native_session => {
                self.release(doc, true);
                NativeResponse::default()
            }
            _ => NativeResponse::default(),
        }
    }

    fn native_start(&mut self, doc: &mut dyn Document, event: NativeDragEvent) -> NativeResponse {
        if self.session.is_active() {
            return NativeResponse::default();
        }
        let Some(node) = self.registry.closest_node(&*doc, event.target) else {
            return NativeResponse::default();
        };
        let Some((parent, config)) = self.can_pick_up(&*doc, node, event.target) else {
            return NativeResponse {
                prevent_default: true,
                ..NativeResponse::default()
            };
        };
        if !config.native_drag {
            // The synthetic driver owns this container.
            return NativeResponse {
                prevent_default: true,
                ..NativeResponse::default()
            };
        }
        let Some(dragged) = self.prepare_drag(doc, parent, node, event.position, &config) else {
            return NativeResponse::default();
        };

        let mut image = None;
        if let Some(choose) = &config.drag_image {
            let elements: Vec<_> = dragged.iter().map(|n| n.element).collect();
            match choose(doc, &elements, event.position) {
                Some(chosen) if doc.kind(chosen.element) == Some(NodeKind::Element) => {
                    image = Some(chosen);
                }
                Some(chosen) => self.diagnose(Diagnostic::IgnoredInvalidElement {
                    element: chosen.element,
                }),
                None => {}
            }
        }
        let image = image.or_else(|| {
            doc.bounding_rect(node).map(|rect| DragImage {
                element: node,
                offset: event.position - rect.origin(),
            })
        });

        let driver = DriverState::Native { drag_image: image };
        if !self.begin_session(doc, parent, node, dragged, event.position, driver) {
            return NativeResponse::default();
        }
        NativeResponse {
            prevent_default: false,
            drop_effect: DropEffect::Move,
            drag_image: image,
        }
    }
}
