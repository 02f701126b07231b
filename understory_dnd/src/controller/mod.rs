// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag controller: registry, session, and drivers behind one facade.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;
use understory_dom::{Document, ElementId, EventMask, NodeKind};

use crate::autoscroll::Autoscroll;
use crate::config::{ClassNames, Flow, HookContext, ParentConfig, Placement};
use crate::error::{Diagnostic, DndError, RemapOutcome};
use crate::events::{ContainerEvent, DragStartEvent, DraggedItem, SortEvent, TransferEvent};
use crate::placement::insert_zones;
use crate::plugin::NodeInfo;
use crate::pointer::ArmedPress;
use crate::registry::{ClassLedger, ParentRecord, Registry};
use crate::session::{DragSession, DriverState, SessionNode, SessionSlot};
use crate::values::ValueStore;

mod hover;
mod native;
mod release;
mod remap;
mod synthetic;

/// Events a registered container listens for.
const PARENT_EVENTS: EventMask = EventMask::NATIVE_DRAG
    .union(EventMask::RESIZE)
    .union(EventMask::SCROLL);

/// Events an enabled node listens for.
const NODE_EVENTS: EventMask = EventMask::NATIVE_DRAG.union(EventMask::POINTER);

/// Drives drag-and-drop for every registered container of one document.
///
/// The controller never reads a clock and never renders. The host feeds it
/// events ([`handle_native`](Self::handle_native),
/// [`handle_pointer`](Self::handle_pointer),
/// [`handle_container`](Self::handle_container)), child-list mutations
/// ([`handle_mutations`](Self::handle_mutations)), and animation-frame time
/// ([`tick`](Self::tick)); the controller answers with [`ValueStore::set_values`]
/// calls on the owners' stores and class changes on the document.
///
/// At most one [`DragSession`] exists at a time.
pub struct DragController<V> {
    registry: Registry<V>,
    session: SessionSlot<V>,
    armed: Option<ArmedPress>,
    autoscroll: Autoscroll,
    diagnostics: Vec<Diagnostic>,
}

impl<V> Default for DragController<V> {
    fn default() -> Self {
        Self {
            registry: Registry::default(),
            session: SessionSlot::default(),
            armed: None,
            autoscroll: Autoscroll::default(),
            diagnostics: Vec::new(),
        }
    }
}

impl<V> fmt::Debug for DragController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("registry", &self.registry)
            .field("session_active", &self.session.is_active())
            .field("armed", &self.armed)
            .field("autoscroll", &self.autoscroll)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl<V: Clone + PartialEq + 'static> DragController<V> {
    /// Creates a controller with no registered containers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `parent` as a container whose children are the items of `store`.
    ///
    /// Re-registering an already registered container replaces its record
    /// wholesale (nodes are torn down and set up again). An initial remap runs
    /// before returning; its outcome is returned.
    pub fn register(
        &mut self,
        doc: &mut dyn Document,
        parent: ElementId,
        store: impl ValueStore<V> + 'static,
        config: ParentConfig<V>,
    ) -> Result<RemapOutcome, DndError> {
        if doc.kind(parent) != Some(NodeKind::Element) || !doc.is_connected(parent) {
            return Err(DndError::InvalidElement(parent));
        }
        if self.registry.parents.contains_key(&parent) {
            self.retire(doc, parent);
        }
        let listener = doc.add_listener(parent, PARENT_EVENTS);
        let config = Rc::new(config);
        self.registry.parents.insert(
            parent,
            ParentRecord {
                element: parent,
                store: Box::new(store),
                config: Rc::clone(&config),
                enabled: Vec::new(),
                listener,
                signature: None,
                insert_zones: Vec::new(),
                selection: Vec::new(),
                classes: ClassLedger::default(),
            },
        );
        for plugin in &config.plugins {
            plugin.setup(doc, parent);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(parent = %parent, "registered container");
        Ok(self.remap(doc, parent, true))
    }

    /// Unregisters a container, tearing down its nodes and plugins.
    ///
    /// A drag session involving the container is cancelled first.
    pub fn unregister(&mut self, doc: &mut dyn Document, parent: ElementId) -> Result<(), DndError> {
        if !self.registry.parents.contains_key(&parent) {
            return Err(DndError::NotRegistered(parent));
        }
        self.retire(doc, parent);
        Ok(())
    }

    /// Cancels whatever involves `parent`, then tears its record down.
    fn retire(&mut self, doc: &mut dyn Document, parent: ElementId) {
        if self
            .session
            .current()
            .is_some_and(|s| s.initial_parent == parent || s.current_parent == parent)
        {
            self.release(doc, true);
        }
        if self.armed.is_some_and(|a| a.parent == parent) {
            self.disarm(doc);
        }
        self.teardown_parent(doc, parent);
        #[cfg(feature = "tracing")]
        tracing::debug!(parent = %parent, "unregistered container");
    }

    fn teardown_parent(&mut self, doc: &mut dyn Document, parent: ElementId) {
        let Some(mut record) = self.registry.parents.remove(&parent) else {
            return;
        };
        let config = Rc::clone(&record.config);
        let mut nodes: Vec<_> = self
            .registry
            .nodes
            .iter()
            .filter(|(_, n)| n.parent == parent)
            .map(|(&el, n)| (n.index, el))
            .collect();
        nodes.sort_unstable();
        for (_, el) in nodes {
            if let Some(mut node) = self.registry.nodes.remove(&el) {
                let info = NodeInfo {
                    element: el,
                    parent,
                    index: node.index,
                    value: &node.value,
                };
                for plugin in &config.plugins {
                    plugin.teardown_node(doc, &info);
                }
                release_node(doc, el, &mut node.classes, node.listener);
            }
        }
        record.classes.clear(doc, parent);
        if let Some(listener) = record.listener.take() {
            doc.remove_listener(listener);
        }
        for plugin in &config.plugins {
            plugin.teardown(doc, parent);
        }
    }

    /// Returns `true` if `parent` is a registered container.
    #[must_use]
    pub fn is_registered(&self, parent: ElementId) -> bool {
        self.registry.parents.contains_key(&parent)
    }

    /// The enabled nodes of a container in index order.
    #[must_use]
    pub fn enabled_nodes(&self, parent: ElementId) -> &[ElementId] {
        self.registry
            .parent(parent)
            .map(|p| p.enabled.as_slice())
            .unwrap_or(&[])
    }

    /// The node record of an enabled node.
    #[must_use]
    pub fn node(&self, el: ElementId) -> Option<NodeInfo<'_, V>> {
        self.registry.node(el).map(|n| NodeInfo {
            element: n.element,
            parent: n.parent,
            index: n.index,
            value: &n.value,
        })
    }

    /// The container an enabled node belongs to.
    #[must_use]
    pub fn parent(&self, node: ElementId) -> Option<ElementId> {
        self.registry.node(node).map(|n| n.parent)
    }

    /// The current values of a container, read from its store.
    #[must_use]
    pub fn values(&self, parent: ElementId) -> Option<Vec<V>> {
        self.registry.values(parent)
    }

    /// The configuration a container was registered with.
    #[must_use]
    pub fn config(&self, parent: ElementId) -> Option<&ParentConfig<V>> {
        self.registry.parent(parent).map(|p| &*p.config)
    }

    /// The active drag session.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<V>> {
        self.session.current()
    }

    /// `true` while a synthetic press waits for its drag distance or long press.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// `true` while an autoscroll task is running.
    #[must_use]
    pub fn is_autoscrolling(&self) -> bool {
        self.autoscroll.is_active()
    }

    /// Recoverable conditions recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drains the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        core::mem::take(&mut self.diagnostics)
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        #[cfg(feature = "tracing")]
        tracing::warn!(%diagnostic, "drag-and-drop diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Selects the given nodes of `parent` for multi-drag.
    ///
    /// Selection is stored by value, so it survives re-renders. Elements that
    /// are not enabled nodes of `parent` are ignored with a diagnostic.
    pub fn set_selection(
        &mut self,
        doc: &mut dyn Document,
        parent: ElementId,
        nodes: &[ElementId],
    ) -> Result<(), DndError> {
        if !self.registry.parents.contains_key(&parent) {
            return Err(DndError::NotRegistered(parent));
        }
        let mut selection = Vec::with_capacity(nodes.len());
        for &el in nodes {
            match self.registry.node(el) {
                Some(node) if node.parent == parent => selection.push(node.value.clone()),
                _ => self.diagnose(Diagnostic::IgnoredInvalidElement { element: el }),
            }
        }
        if let Some(record) = self.registry.parents.get_mut(&parent) {
            record.selection = selection;
        }
        self.apply_selection_classes(doc, parent);
        Ok(())
    }

    /// The selected values of a container.
    #[must_use]
    pub fn selection(&self, parent: ElementId) -> Option<&[V]> {
        self.registry.parent(parent).map(|p| p.selection.as_slice())
    }

    fn apply_selection_classes(&mut self, doc: &mut dyn Document, parent: ElementId) {
        let Some(record) = self.registry.parents.get(&parent) else {
            return;
        };
        let config = Rc::clone(&record.config);
        let changes: Vec<(ElementId, bool)> = record
            .enabled
            .iter()
            .filter_map(|el| self.registry.nodes.get(el))
            .map(|n| (n.element, record.selection.contains(&n.value)))
            .collect();
        let class = &config.classes.selected;
        for (el, selected) in changes {
            if selected {
                self.registry.add_node_class(doc, el, class);
            } else {
                self.registry.remove_node_class(doc, el, class);
            }
        }
    }

    /// Reacts to a container resize or scroll.
    ///
    /// Insertion zones are recomputed. During a synthetic drag, a scroll also
    /// re-probes what lies under the stationary pointer.
    pub fn handle_container(&mut self, doc: &mut dyn Document, event: ContainerEvent) {
        let (ContainerEvent::Resized(parent) | ContainerEvent::Scrolled(parent)) = event;
        self.refresh_insert_zones(doc, parent);
        if matches!(event, ContainerEvent::Scrolled(_)) {
            self.reprobe(doc);
        }
    }

    /// Advances time-driven behavior to `now_ms`.
    ///
    /// Call once per animation frame while [`session`](Self::session),
    /// [`is_armed`](Self::is_armed), or [`is_autoscrolling`](Self::is_autoscrolling)
    /// reports activity. Completes long presses, applies the deferred native
    /// placeholder class, and steps autoscroll.
    pub fn tick(&mut self, doc: &mut dyn Document, now_ms: u64) {
        if let Some(armed) = self.armed.as_mut() {
            if armed.poll_long_press(now_ms) {
                let (node, parent) = (armed.node, armed.parent);
                if let Some(config) = self.registry.config(parent) {
                    self.registry
                        .add_node_class(doc, node, &config.classes.long_press);
                }
            }
        }

        let classes = self.session_classes();
        if let Some(session) = self.session.current_mut() {
            if !session.placeholder_applied && !session.is_synthetic() {
                session.placeholder_applied = true;
                let elements: Vec<_> = session.dragged_nodes.iter().map(|n| n.element).collect();
                for el in elements {
                    self.registry.remove_node_class(doc, el, &classes.dragging);
                    self.registry
                        .add_node_class(doc, el, &classes.drag_placeholder);
                }
            }
        }

        if self.autoscroll.step(doc, now_ms).is_some() {
            let parents: Vec<_> = self.registry.parents.keys().copied().collect();
            for parent in parents {
                self.refresh_insert_zones(doc, parent);
            }
            self.reprobe(doc);
        }
    }

    /// Cancels the active session (nothing pending is committed) and any armed press.
    pub fn cancel(&mut self, doc: &mut dyn Document) {
        self.release(doc, true);
        self.disarm(doc);
    }

    /// Class names for session decorations, taken from the container the drag started in.
    fn session_classes(&self) -> ClassNames {
        self.session
            .current()
            .and_then(|s| self.registry.config(s.initial_parent))
            .map(|c| c.classes.clone())
            .unwrap_or_default()
    }

    fn refresh_insert_zones(&mut self, doc: &dyn Document, parent: ElementId) {
        let Some(record) = self.registry.parents.get_mut(&parent) else {
            return;
        };
        if record.config.placement != Placement::Insert {
            record.insert_zones.clear();
            return;
        }
        let scroll = doc.viewport_scroll();
        let rects: Vec<_> = record
            .enabled
            .iter()
            .map(|&el| doc.bounding_rect(el).unwrap_or_default() + scroll)
            .collect();
        record.insert_zones = insert_zones(&rects);
    }

    /// Checks that `node` may be picked up with a press that landed on `origin`.
    fn can_pick_up(
        &self,
        doc: &dyn Document,
        node: ElementId,
        origin: ElementId,
    ) -> Option<(ElementId, Rc<ParentConfig<V>>)> {
        let parent = self.registry.node(node)?.parent;
        let config = self.registry.config(parent)?;
        if config.disabled {
            return None;
        }
        if let Some(handle) = &config.drag_handle {
            let mut cur = Some(origin);
            let mut found = false;
            while let Some(el) = cur {
                if doc.has_class(el, handle) {
                    found = true;
                    break;
                }
                if el == node {
                    break;
                }
                cur = doc.parent(el);
            }
            if !found {
                return None;
            }
        }
        Some((parent, config))
    }

    /// The nodes a pick-up of `node` drags, in index order.
    fn dragged_set(
        &self,
        parent: ElementId,
        node: ElementId,
        config: &ParentConfig<V>,
    ) -> Vec<SessionNode<V>> {
        let (Some(record), Some(grabbed)) = (self.registry.parent(parent), self.registry.node(node))
        else {
            return Vec::new();
        };
        let to_session = |n: &crate::registry::NodeRecord<V>| SessionNode {
            element: n.element,
            value: n.value.clone(),
            index: n.index,
        };
        if config.multi_drag && record.selection.contains(&grabbed.value) {
            record
                .enabled
                .iter()
                .filter_map(|el| self.registry.nodes.get(el))
                .filter(|n| record.selection.contains(&n.value))
                .map(to_session)
                .collect()
        } else {
            alloc::vec![to_session(grabbed)]
        }
    }

    /// Resolves the dragged set and runs the drag-start hook.
    fn prepare_drag(
        &self,
        doc: &mut dyn Document,
        parent: ElementId,
        node: ElementId,
        position: Point,
        config: &ParentConfig<V>,
    ) -> Option<Vec<SessionNode<V>>> {
        if self.session.is_active() {
            return None;
        }
        let dragged = self.dragged_set(parent, node, config);
        if dragged.is_empty() {
            return None;
        }
        if let Some(hook) = &config.hooks.handle_drag_start {
            let values: Vec<V> = dragged.iter().map(|n| n.value.clone()).collect();
            let ctx = HookContext {
                parent,
                node: Some(node),
                position,
                dragged: &values,
            };
            if hook(doc, &ctx) == Flow::Handled {
                return None;
            }
        }
        Some(dragged)
    }

    /// Installs a session, decorates the dragged nodes, and notifies.
    fn begin_session(
        &mut self,
        doc: &mut dyn Document,
        parent: ElementId,
        node: ElementId,
        dragged: Vec<SessionNode<V>>,
        position: Point,
        driver: DriverState,
    ) -> bool {
        let Some(config) = self.registry.config(parent) else {
            return false;
        };
        let Some(first) = dragged.first() else {
            return false;
        };
        let initial_index = first.index;
        let Some(primary) = dragged.iter().find(|n| n.element == node).cloned() else {
            return false;
        };
        let values = self.registry.values(parent).unwrap_or_default();
        let session = DragSession {
            dragged_node: primary,
            dragged_nodes: dragged,
            initial_parent: parent,
            current_parent: parent,
            initial_index,
            target_index: initial_index,
            affected: SmallVec::new(),
            incoming_direction: None,
            ascending: false,
            transferred: false,
            coordinates: position,
            last_target_value: None,
            remap_just_finished: false,
            placeholder_applied: false,
            pending: None,
            marked: SmallVec::new(),
            marker: None,
            driver,
        };
        let Ok(session) = self.session.start(session) else {
            return false;
        };
        let class = session.node_class(&config.classes);
        let items: Vec<DraggedItem<V>> = session
            .dragged_nodes
            .iter()
            .map(|n| DraggedItem {
                element: n.element,
                index: n.index,
                value: n.value.clone(),
            })
            .collect();
        for item in &items {
            self.registry.add_node_class(doc, item.element, class);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            parent = %parent,
            node = %node,
            count = items.len(),
            synthetic = matches!(driver, DriverState::Synthetic { .. }),
            "drag session started"
        );
        let event = DragStartEvent {
            parent,
            values,
            dragged: items,
            position,
        };
        if let Some(f) = &config.on_drag_start {
            f(&event);
        }
        for plugin in &config.plugins {
            plugin.drag_start(doc, &event);
        }
        true
    }

    /// Drops an armed press, removing its long-press decoration.
    fn disarm(&mut self, doc: &mut dyn Document) {
        let Some(armed) = self.armed.take() else {
            return;
        };
        if armed.long_pressed {
            if let Some(config) = self.registry.config(armed.parent) {
                self.registry
                    .remove_node_class(doc, armed.node, &config.classes.long_press);
            }
        }
    }

    fn fire_sort(&self, event: &SortEvent<V>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            parent = %event.parent,
            from = event.previous_index,
            to = event.index,
            "sorted"
        );
        if let Some(f) = self
            .registry
            .config(event.parent)
            .and_then(|c| c.on_sort.clone())
        {
            f(event);
        }
    }

    fn fire_transfer(&self, event: &TransferEvent<V>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = %event.source,
            target = %event.target,
            index = event.index,
            "transferred"
        );
        let source = self
            .registry
            .config(event.source)
            .and_then(|c| c.on_transfer.clone());
        let target = self
            .registry
            .config(event.target)
            .and_then(|c| c.on_transfer.clone());
        if let Some(f) = &source {
            f(event);
        }
        if let Some(f) = target {
            if !source.as_ref().is_some_and(|s| Rc::ptr_eq(s, &f)) {
                f(event);
            }
        }
    }
}

/// Revokes a node's listener and strips the classes the controller added.
fn release_node(
    doc: &mut dyn Document,
    el: ElementId,
    classes: &mut ClassLedger,
    listener: Option<understory_dom::ListenerId>,
) {
    if let Some(listener) = listener {
        doc.remove_listener(listener);
    }
    classes.clear(doc, el);
    doc.set_draggable(el, false);
}
