// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side tables binding containers and nodes to their metadata.
//!
//! Records are keyed by generational [`ElementId`]s. A destroyed element's id
//! never resolves again, so a stale record is inert until the next remap or
//! mutation sweep removes it explicitly.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_dom::{Document, ElementId, ListenerId, NodeKind};

use crate::config::ParentConfig;
use crate::placement::InsertZone;
use crate::values::ValueStore;

/// Classes the controller added to one element.
///
/// Only classes whose addition actually changed the element are recorded, so
/// clearing the ledger never strips a class the owner applied itself.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClassLedger {
    added: SmallVec<[String; 2]>,
}

impl ClassLedger {
    pub(crate) fn add(&mut self, doc: &mut dyn Document, el: ElementId, class: &str) {
        if class.is_empty() || self.added.iter().any(|c| c == class) {
            return;
        }
        if doc.add_class(el, class) {
            self.added.push(class.into());
        }
    }

    pub(crate) fn remove(&mut self, doc: &mut dyn Document, el: ElementId, class: &str) {
        if let Some(pos) = self.added.iter().position(|c| c == class) {
            self.added.remove(pos);
            doc.remove_class(el, class);
        }
    }

    pub(crate) fn clear(&mut self, doc: &mut dyn Document, el: ElementId) {
        for class in self.added.drain(..) {
            doc.remove_class(el, &class);
        }
    }
}

/// What a remap compares against to detect that nothing changed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Signature<V> {
    pub(crate) children: Vec<ElementId>,
    pub(crate) values: Vec<V>,
}

pub(crate) struct ParentRecord<V> {
    pub(crate) element: ElementId,
    pub(crate) store: Box<dyn ValueStore<V>>,
    pub(crate) config: Rc<ParentConfig<V>>,
    pub(crate) enabled: Vec<ElementId>,
    pub(crate) listener: Option<ListenerId>,
    pub(crate) signature: Option<Signature<V>>,
    pub(crate) insert_zones: Vec<InsertZone>,
    /// Selected values; survives re-renders.
    pub(crate) selection: Vec<V>,
    pub(crate) classes: ClassLedger,
}

impl<V> fmt::Debug for ParentRecord<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentRecord")
            .field("element", &self.element)
            .field("config", &self.config)
            .field("enabled", &self.enabled)
            .field("listener", &self.listener)
            .field("insert_zones", &self.insert_zones.len())
            .field("selection", &self.selection.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeRecord<V> {
    pub(crate) element: ElementId,
    pub(crate) parent: ElementId,
    pub(crate) index: usize,
    pub(crate) value: V,
    pub(crate) classes: ClassLedger,
    pub(crate) listener: Option<ListenerId>,
}

pub(crate) struct Registry<V> {
    pub(crate) parents: HashMap<ElementId, ParentRecord<V>>,
    pub(crate) nodes: HashMap<ElementId, NodeRecord<V>>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            parents: HashMap::new(),
            nodes: HashMap::new(),
        }
    }
}

impl<V> fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("parents", &self.parents.len())
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl<V> Registry<V> {
    pub(crate) fn parent(&self, el: ElementId) -> Option<&ParentRecord<V>> {
        self.parents.get(&el)
    }

    pub(crate) fn config(&self, el: ElementId) -> Option<Rc<ParentConfig<V>>> {
        self.parents.get(&el).map(|p| Rc::clone(&p.config))
    }

    /// The node record of `el`, if it is an enabled node of a registered parent.
    pub(crate) fn node(&self, el: ElementId) -> Option<&NodeRecord<V>> {
        self.nodes
            .get(&el)
            .filter(|n| self.parents.contains_key(&n.parent))
    }

    /// Walks from `el` up to the nearest registered container.
    pub(crate) fn closest_parent(&self, doc: &dyn Document, el: ElementId) -> Option<ElementId> {
        let mut cur = Some(el);
        while let Some(candidate) = cur {
            if self.parents.contains_key(&candidate) {
                return Some(candidate);
            }
            cur = doc.parent(candidate);
        }
        None
    }

    /// Walks from `el` up to the nearest enabled node.
    ///
    /// Stops at the first registered container so a node never resolves
    /// through an inner list into an outer one.
    pub(crate) fn closest_node(&self, doc: &dyn Document, el: ElementId) -> Option<ElementId> {
        let mut cur = Some(el);
        while let Some(candidate) = cur {
            if self.node(candidate).is_some() {
                return Some(candidate);
            }
            if self.parents.contains_key(&candidate) {
                return None;
            }
            cur = doc.parent(candidate);
        }
        None
    }

    pub(crate) fn values(&self, parent: ElementId) -> Option<Vec<V>> {
        self.parents.get(&parent).map(|p| p.store.values())
    }

    pub(crate) fn set_values(&mut self, parent: ElementId, values: Vec<V>) {
        if let Some(record) = self.parents.get_mut(&parent) {
            record.store.set_values(values);
        }
    }

    /// Adds a class to an enabled node through its ledger.
    pub(crate) fn add_node_class(&mut self, doc: &mut dyn Document, el: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&el) {
            node.classes.add(doc, el, class);
        }
    }

    /// Removes a class the controller previously added to a node.
    pub(crate) fn remove_node_class(&mut self, doc: &mut dyn Document, el: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&el) {
            node.classes.remove(doc, el, class);
        }
    }

    pub(crate) fn add_parent_class(&mut self, doc: &mut dyn Document, el: ElementId, class: &str) {
        if let Some(parent) = self.parents.get_mut(&el) {
            parent.classes.add(doc, el, class);
        }
    }

    pub(crate) fn remove_parent_class(
        &mut self,
        doc: &mut dyn Document,
        el: ElementId,
        class: &str,
    ) {
        if let Some(parent) = self.parents.get_mut(&el) {
            parent.classes.remove(doc, el, class);
        }
    }
}

/// Element children of `parent` that pass the configured predicate.
pub(crate) fn eligible_children<V>(
    doc: &dyn Document,
    parent: ElementId,
    config: &ParentConfig<V>,
) -> Vec<ElementId> {
    if config.disabled {
        return Vec::new();
    }
    doc.children(parent)
        .iter()
        .copied()
        .filter(|&child| doc.kind(child) == Some(NodeKind::Element))
        .filter(|&child| config.draggable.as_ref().is_none_or(|f| f(doc, child)))
        .collect()
}
