// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle hooks for decorators.

use understory_dom::{Document, ElementId};

use crate::events::{DragEndEvent, DragStartEvent};

/// A registered node as seen by plugins and queries.
#[derive(Debug, PartialEq)]
pub struct NodeInfo<'a, V> {
    /// The node element.
    pub element: ElementId,
    /// Its container.
    pub parent: ElementId,
    /// Position among the container's enabled nodes.
    pub index: usize,
    /// The value the node represents.
    pub value: &'a V,
}

impl<V> Clone for NodeInfo<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeInfo<'_, V> {}

/// A decorator attached to a container through [`ParentConfig::plugins`](crate::ParentConfig::plugins).
///
/// Every method has an empty default, so a plugin implements only what it
/// needs. Plugins run in the order they appear in the configuration.
///
/// Call order for one container:
/// - registration: [`setup`](Self::setup), then a remap;
/// - each changed remap: [`teardown_node_remap`](Self::teardown_node_remap) for
///   the previous nodes, [`teardown_node`](Self::teardown_node) for nodes that
///   left, [`setup_node`](Self::setup_node) for nodes that are new,
///   [`setup_node_remap`](Self::setup_node_remap) for every current node, and
///   finally [`remap_finished`](Self::remap_finished);
/// - unregistration: [`teardown_node`](Self::teardown_node) for every node, then
///   [`teardown`](Self::teardown).
///
/// Remaps that find nothing changed call no plugin methods at all.
pub trait Plugin<V> {
    /// The container was registered.
    fn setup(&self, _doc: &mut dyn Document, _parent: ElementId) {}

    /// The container is being unregistered.
    fn teardown(&self, _doc: &mut dyn Document, _parent: ElementId) {}

    /// A node became enabled for the first time.
    fn setup_node(&self, _doc: &mut dyn Document, _node: &NodeInfo<'_, V>) {}

    /// A node stopped being enabled or is being unregistered.
    fn teardown_node(&self, _doc: &mut dyn Document, _node: &NodeInfo<'_, V>) {}

    /// A node is enabled after a remap, new or not.
    fn setup_node_remap(&self, _doc: &mut dyn Document, _node: &NodeInfo<'_, V>) {}

    /// A node was enabled before a remap.
    fn teardown_node_remap(&self, _doc: &mut dyn Document, _node: &NodeInfo<'_, V>) {}

    /// A remap of the container completed.
    fn remap_finished(&self, _doc: &mut dyn Document, _parent: ElementId) {}

    /// A drag started from the container.
    fn drag_start(&self, _doc: &mut dyn Document, _event: &DragStartEvent<V>) {}

    /// A drag that started from the container ended.
    fn drag_end(&self, _doc: &mut dyn Document, _event: &DragEndEvent<V>) {}
}
