// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dom --heading-base-level=0

//! Understory DOM: a headless element tree contract for UI hosts.
//!
//! Interaction crates such as `understory_dnd` need to observe a document-like
//! structure: which elements exist, how they nest, where they are on screen,
//! which classes they carry, and when their child lists change. This crate
//! captures that surface as the object-safe [`Document`] trait so the same
//! interaction logic can run against a browser binding, a retained-mode widget
//! tree, or a test fixture.
//!
//! It also ships [`MemoryDocument`], a small in-memory implementation that
//! records child-list mutations, supports explicit layout rectangles, scroll
//! containers, hit testing, and pointer capture. It is intended for headless
//! hosts and tests.
//!
//! ## Identity
//!
//! Elements are addressed by [`ElementId`], a generational handle. Destroying an
//! element frees its slot; reusing the slot bumps the generation, so a stale
//! handle never aliases a different live element. Side tables keyed by
//! `ElementId` therefore behave like weak associations that simply stop
//! resolving once the element is gone.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_dom::{Document, MemoryDocument};
//!
//! let mut doc = MemoryDocument::new(Size::new(800.0, 600.0));
//! let list = doc.create_element("ul");
//! let item = doc.create_element("li");
//! doc.append_child(doc.root(), list);
//! doc.append_child(list, item);
//! doc.set_layout(item, Rect::new(0.0, 0.0, 100.0, 20.0));
//!
//! assert_eq!(doc.hit_test(Point::new(10.0, 10.0)), Some(item));
//!
//! // Every child-list change is recorded against the element whose children changed.
//! let targets: Vec<_> = doc.take_mutations().iter().map(|m| m.target).collect();
//! assert_eq!(targets, vec![doc.root(), list]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod event;
mod id;
mod memory;

pub use document::{Document, NodeKind, ScrollAxes};
pub use event::{EventMask, ListenerId, MutationRecord, PointerId};
pub use id::ElementId;
pub use memory::MemoryDocument;
