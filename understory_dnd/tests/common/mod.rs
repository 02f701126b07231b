// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixture: a headless document whose lists re-render like a framework would.

#![allow(dead_code, reason = "each test crate uses a subset of the fixture")]

use kurbo::{Point, Rect, Size};
use understory_dnd::{
    DragController, NativeDragEvent, NativeDragKind, NativeResponse, ParentConfig, PointerEvent,
    PointerKind, PointerResponse, PointerType, RemapOutcome, SharedValues,
};
use understory_dom::{Document, ElementId, MemoryDocument, PointerId};

pub const ITEM_WIDTH: f64 = 100.0;
pub const ITEM_HEIGHT: f64 = 50.0;
pub const LIST_HEIGHT: f64 = 500.0;
pub const TOUCH: PointerId = PointerId(1);

/// A container and the values it renders.
#[derive(Clone, Debug)]
pub struct List {
    pub el: ElementId,
    pub values: SharedValues<&'static str>,
    pub x: f64,
}

#[derive(Debug)]
pub struct Fixture {
    pub doc: MemoryDocument,
    pub dnd: DragController<&'static str>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            doc: MemoryDocument::new(Size::new(800.0, 600.0)),
            dnd: DragController::new(),
        }
    }

    /// Creates a list at column `x` and renders `values` into it.
    pub fn list(&mut self, x: f64, values: &[&'static str]) -> List {
        let el = self.doc.create_element("ul");
        let root = self.doc.root();
        self.doc.append_child(root, el);
        self.doc
            .set_layout(el, Rect::new(x, 0.0, x + ITEM_WIDTH, LIST_HEIGHT));
        let list = List {
            el,
            values: SharedValues::new(values.to_vec()),
            x,
        };
        self.render(&list);
        list
    }

    /// Replaces every child of `list` with fresh elements, one per value.
    pub fn render(&mut self, list: &List) {
        for child in self.doc.children(list.el).to_vec() {
            self.doc.destroy(child);
        }
        for i in 0..list.values.len() {
            let y = ITEM_HEIGHT * i as f64;
            let item = self.doc.create_element("li");
            self.doc.append_child(list.el, item);
            self.doc
                .set_layout(item, Rect::new(list.x, y, list.x + ITEM_WIDTH, y + ITEM_HEIGHT));
        }
    }

    /// Delivers pending child-list mutations to the controller.
    pub fn sync(&mut self) {
        let records = self.doc.take_mutations();
        self.dnd.handle_mutations(&mut self.doc, &records);
    }

    /// Re-renders `list` and lets the controller observe it.
    pub fn rerender(&mut self, list: &List) {
        self.render(list);
        self.sync();
    }

    /// Re-renders `list` by rebinding its existing elements to the current values.
    ///
    /// No child-list mutation happens, so the owner asks for the remap itself.
    pub fn update_in_place(&mut self, list: &List) -> RemapOutcome {
        self.dnd.remap(&mut self.doc, list.el, false)
    }

    pub fn register(&mut self, list: &List, config: ParentConfig<&'static str>) -> RemapOutcome {
        let outcome = self
            .dnd
            .register(&mut self.doc, list.el, list.values.clone(), config)
            .unwrap();
        self.doc.take_mutations();
        outcome
    }

    /// The enabled node currently representing `value`.
    pub fn item(&self, list: &List, value: &str) -> ElementId {
        self.dnd
            .enabled_nodes(list.el)
            .iter()
            .copied()
            .find(|&el| self.dnd.node(el).is_some_and(|n| *n.value == value))
            .unwrap()
    }

    pub fn rect(&self, el: ElementId) -> Rect {
        self.doc.bounding_rect(el).unwrap()
    }

    pub fn native(&mut self, kind: NativeDragKind, target: ElementId, position: Point) -> NativeResponse {
        self.dnd.handle_native(
            &mut self.doc,
            NativeDragEvent {
                kind,
                target,
                position,
            },
        )
    }

    /// Starts a native drag of `el` from its center.
    pub fn native_start(&mut self, el: ElementId) -> NativeResponse {
        let center = self.rect(el).center();
        self.native(NativeDragKind::DragStart, el, center)
    }

    pub fn drag_over(&mut self, target: ElementId, position: Point) -> NativeResponse {
        self.native(NativeDragKind::DragOver, target, position)
    }

    pub fn drop_on(&mut self, target: ElementId, position: Point) -> NativeResponse {
        self.native(NativeDragKind::Drop, target, position)
    }

    pub fn pointer(
        &mut self,
        kind: PointerKind,
        pointer_type: PointerType,
        target: ElementId,
        position: Point,
        time_ms: u64,
    ) -> PointerResponse {
        self.dnd.handle_pointer(
            &mut self.doc,
            PointerEvent {
                kind,
                pointer_id: TOUCH,
                pointer_type,
                target,
                position,
                time_ms,
            },
        )
    }

    pub fn touch(&mut self, kind: PointerKind, target: ElementId, position: Point, time_ms: u64) -> PointerResponse {
        self.pointer(kind, PointerType::Touch, target, position, time_ms)
    }
}
