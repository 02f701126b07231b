// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation of container children against owner values.

use alloc::rc::Rc;
use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_dom::{Document, ElementId, MutationRecord};

use super::{DragController, NODE_EVENTS, release_node};
use crate::error::{Diagnostic, RemapOutcome};
use crate::plugin::NodeInfo;
use crate::registry::{ClassLedger, NodeRecord, Signature, eligible_children};
use crate::session::DriverState;

impl<V: Clone + PartialEq + 'static> DragController<V> {
    /// Rebuilds the enabled node list of `parent` from its children and values.
    ///
    /// Each eligible child at position `i` is bound to `values[i]`. Genuinely
    /// new nodes get a listener and [`Plugin::setup_node`](crate::Plugin::setup_node);
    /// nodes that left are torn down. An active session whose values live in
    /// `parent` is re-pointed at the elements now representing them.
    ///
    /// Without `force`, a container whose children and values are unchanged
    /// since the last pass is left untouched and [`RemapOutcome::Unchanged`]
    /// is returned, so repeated remaps cause no class or listener churn.
    pub fn remap(&mut self, doc: &mut dyn Document, parent: ElementId, force: bool) -> RemapOutcome {
        let Some(record) = self.registry.parents.get(&parent) else {
            return RemapOutcome::NotRegistered;
        };
        let config = Rc::clone(&record.config);
        let children = eligible_children(&*doc, parent, &config);
        let values = if config.disabled {
            Vec::new()
        } else {
            record.store.values()
        };
        let signature = Signature { children, values };
        let previous = record.enabled.clone();
        if !force && record.signature.as_ref() == Some(&signature) {
            return RemapOutcome::Unchanged;
        }
        if signature.children.len() != signature.values.len() {
            let diagnostic = Diagnostic::ValueCountMismatch {
                parent,
                nodes: signature.children.len(),
                values: signature.values.len(),
            };
            self.diagnose(diagnostic);
            return RemapOutcome::Skipped(diagnostic);
        }

        for el in &previous {
            if let Some(node) = self.registry.nodes.get(el).filter(|n| n.parent == parent) {
                let info = node_info(node);
                for plugin in &config.plugins {
                    plugin.teardown_node_remap(doc, &info);
                }
            }
        }

        for el in previous.iter().filter(|el| !signature.children.contains(el)) {
            if self.registry.nodes.get(el).is_some_and(|n| n.parent == parent) {
                if let Some(mut node) = self.registry.nodes.remove(el) {
                    let info = node_info(&node);
                    for plugin in &config.plugins {
                        plugin.teardown_node(doc, &info);
                    }
                    release_node(doc, *el, &mut node.classes, node.listener);
                }
            }
        }

        for (index, (&el, value)) in signature
            .children
            .iter()
            .zip(&signature.values)
            .enumerate()
        {
            if let Some(node) = self
                .registry
                .nodes
                .get_mut(&el)
                .filter(|n| n.parent == parent)
            {
                node.index = index;
                node.value = value.clone();
                continue;
            }
            // Moved in from another container: that container lets go first.
            if let Some(mut moved) = self.registry.nodes.remove(&el) {
                if let Some(old) = self.registry.config(moved.parent) {
                    let info = node_info(&moved);
                    for plugin in &old.plugins {
                        plugin.teardown_node(doc, &info);
                    }
                }
                if let Some(old) = self.registry.parents.get_mut(&moved.parent) {
                    old.enabled.retain(|e| *e != el);
                    old.signature = None;
                }
                release_node(doc, el, &mut moved.classes, moved.listener);
            }
            let listener = doc.add_listener(el, NODE_EVENTS);
            doc.set_draggable(el, config.native_drag);
            let node = NodeRecord {
                element: el,
                parent,
                index,
                value: value.clone(),
                classes: ClassLedger::default(),
                listener,
            };
            let info = node_info(&node);
            for plugin in &config.plugins {
                plugin.setup_node(doc, &info);
            }
            self.registry.nodes.insert(el, node);
        }

        for el in &signature.children {
            if let Some(node) = self.registry.nodes.get(el) {
                let info = node_info(node);
                for plugin in &config.plugins {
                    plugin.setup_node_remap(doc, &info);
                }
            }
        }

        let count = signature.children.len();
        if let Some(record) = self.registry.parents.get_mut(&parent) {
            record.enabled.clone_from(&signature.children);
            record.signature = Some(signature);
        }
        self.apply_selection_classes(doc, parent);
        self.repoint_session(doc, parent);
        self.refresh_insert_zones(doc, parent);
        for plugin in &config.plugins {
            plugin.remap_finished(doc, parent);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(parent = %parent, nodes = count, "remapped");
        RemapOutcome::Remapped { nodes: count }
    }

    /// Processes child-list mutation records.
    ///
    /// Registered containers that are no longer connected are unregistered;
    /// every registered container named by a record is remapped once, in
    /// record order.
    pub fn handle_mutations(&mut self, doc: &mut dyn Document, records: &[MutationRecord]) {
        let gone: Vec<_> = self
            .registry
            .parents
            .keys()
            .copied()
            .filter(|&p| !doc.is_connected(p))
            .collect();
        for parent in gone {
            self.retire(doc, parent);
        }

        let mut targets: SmallVec<[ElementId; 4]> = SmallVec::new();
        for record in records {
            if !targets.contains(&record.target) {
                targets.push(record.target);
            }
        }
        for target in targets {
            if self.is_registered(target) {
                self.remap(doc, target, false);
            }
        }
    }

    /// Points the session at the elements now holding the dragged values.
    fn repoint_session(&mut self, doc: &mut dyn Document, parent: ElementId) {
        let classes = self.session_classes();
        let Some(session) = self.session.current_mut() else {
            return;
        };
        if session.current_parent != parent {
            return;
        }
        let Some(record) = self.registry.parents.get(&parent) else {
            return;
        };
        let before: SmallVec<[ElementId; 4]> =
            session.dragged_nodes.iter().map(|n| n.element).collect();
        let mut claimed: SmallVec<[usize; 4]> = SmallVec::new();
        for dragged in &mut session.dragged_nodes {
            let found = record.enabled.iter().enumerate().find(|(i, el)| {
                !claimed.contains(i)
                    && self
                        .registry
                        .nodes
                        .get(*el)
                        .is_some_and(|n| n.value == dragged.value)
            });
            if let Some((index, &el)) = found {
                claimed.push(index);
                dragged.element = el;
                dragged.index = index;
            }
        }
        session.dragged_nodes.sort_by_key(|n| n.index);
        if let Some(primary) = session
            .dragged_nodes
            .iter()
            .find(|n| n.value == session.dragged_node.value)
        {
            session.dragged_node = primary.clone();
        }
        session.affected.clear();
        session.remap_just_finished = true;

        let class = session.node_class(&classes);
        let elements: SmallVec<[ElementId; 4]> =
            session.dragged_nodes.iter().map(|n| n.element).collect();
        let primary = session.dragged_node.element;
        if let DriverState::Synthetic {
            pointer_id,
            capture,
            ..
        } = &mut session.driver
        {
            if *capture != Some(primary) {
                if let Some(old) = capture.take() {
                    doc.release_pointer_capture(old, *pointer_id);
                }
                if doc.set_pointer_capture(primary, *pointer_id) {
                    *capture = Some(primary);
                }
            }
        }
        // Elements updated in place may now hold other values.
        for el in before.into_iter().filter(|el| !elements.contains(el)) {
            for stale in [
                &classes.dragging,
                &classes.drag_placeholder,
                &classes.synthetic_placeholder,
            ] {
                self.registry.remove_node_class(doc, el, stale);
            }
        }
        for el in elements {
            self.registry.add_node_class(doc, el, class);
        }
    }
}

fn node_info<V>(node: &NodeRecord<V>) -> NodeInfo<'_, V> {
    NodeInfo {
        element: node.element,
        parent: node.parent,
        index: node.index,
        value: &node.value,
    }
}
