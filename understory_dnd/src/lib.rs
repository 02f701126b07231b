// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dnd --heading-base-level=0

//! Understory DnD: drag-and-drop for reorderable and transferable lists.
//!
//! Any element of a [`Document`](understory_dom::Document) can be registered as
//! a container. Its element children become draggable nodes bound, by
//! position, to the values of an owner-supplied [`ValueStore`]. Dragging a node
//! never moves elements; the controller computes the new order and hands it to
//! the store, the owner re-renders, and the next remap binds the new elements
//! to their values again. The owner's values stay the single source of truth.
//!
//! The pieces:
//!
//! - **Registry and remap.** [`DragController::register`] binds a container;
//!   [`DragController::handle_mutations`] keeps the binding in sync with
//!   child-list changes. A remap requires as many eligible children as values
//!   and otherwise records a [`Diagnostic`] and keeps the previous state.
//! - **Drivers.** [`DragController::handle_native`] consumes platform drag
//!   events; [`DragController::handle_pointer`] emulates dragging from pointer
//!   events (touch, or containers with `native_drag` off) using a proxy clone,
//!   pointer capture, and hit testing. Both feed one hover path.
//! - **Placement.** [`Placement::Sort`] reorders and transfers live while
//!   hovering; [`Placement::Swap`], [`Placement::Insert`], and
//!   [`Placement::Place`] mark a target and apply on release. The value
//!   arithmetic lives in the pure [`placement`] module.
//! - **Autoscroll.** Near the edge of the nearest scrollable ancestor, a
//!   single cancellable task scrolls at a fixed speed per elapsed time, driven
//!   by [`DragController::tick`].
//! - **Plugins and hooks.** [`Plugin`] receives node lifecycle and drag
//!   notifications; [`Hooks`] can take over default behavior.
//!
//! The controller never reads a clock: the host passes event timestamps and
//! calls [`DragController::tick`] once per animation frame while anything is
//! in flight.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_dnd::{DragController, NativeDragEvent, NativeDragKind, ParentConfig, SharedValues};
//! use understory_dom::{Document, MemoryDocument};
//!
//! let mut doc = MemoryDocument::new(Size::new(400.0, 400.0));
//! let list = doc.create_element("ul");
//! doc.append_child(doc.root(), list);
//! doc.set_layout(list, Rect::new(0.0, 0.0, 100.0, 150.0));
//! let mut items = Vec::new();
//! for y in [0.0, 50.0, 100.0] {
//!     let item = doc.create_element("li");
//!     doc.append_child(list, item);
//!     doc.set_layout(item, Rect::new(0.0, y, 100.0, y + 50.0));
//!     items.push(item);
//! }
//!
//! let fruit = SharedValues::new(vec!["Apple", "Banana", "Orange"]);
//! let mut dnd = DragController::new();
//! dnd.register(&mut doc, list, fruit.clone(), ParentConfig::new()).unwrap();
//!
//! let at = |kind, target, y| NativeDragEvent { kind, target, position: Point::new(50.0, y) };
//! dnd.handle_native(&mut doc, at(NativeDragKind::DragStart, items[0], 10.0));
//! dnd.handle_native(&mut doc, at(NativeDragKind::DragOver, items[1], 80.0));
//! assert_eq!(fruit.get(), ["Banana", "Apple", "Orange"]);
//!
//! dnd.handle_native(&mut doc, at(NativeDragKind::Drop, items[1], 80.0));
//! assert!(dnd.session().is_none());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: floating point support for `no_std` targets through `kurbo/libm`.
//! - `tracing`: emits [`tracing`](https://docs.rs/tracing) events for session
//!   lifecycle, placement decisions, remaps, and diagnostics.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod autoscroll;
mod config;
mod controller;
mod error;
mod events;
pub mod placement;
mod plugin;
mod pointer;
mod registry;
mod session;
mod values;

pub use autoscroll::{ScrollDirections, scroll_directions};
pub use config::{
    AcceptContext, AcceptsPredicate, Callback, ClassNames, DragImageFn, DraggablePredicate, Flow,
    Hook, HookContext, Hooks, ParentConfig, Placement, ScrollBehavior, Threshold,
};
pub use controller::DragController;
pub use error::{Diagnostic, DndError, RemapOutcome};
pub use events::{
    ContainerEvent, DragEndEvent, DragImage, DragStartEvent, DraggedItem, DropEffect,
    NativeDragEvent, NativeDragKind, NativeResponse, PointerEvent, PointerKind, PointerResponse,
    PointerType, SortEvent, TransferEvent,
};
pub use placement::Direction;
pub use plugin::{NodeInfo, Plugin};
pub use session::{DragSession, SessionNode};
pub use values::{Accessors, SharedValues, ValueStore};
