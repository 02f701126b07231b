// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Document`] implementation for headless hosts and tests.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::{
    Document, ElementId, EventMask, ListenerId, MutationRecord, NodeKind, PointerId, ScrollAxes,
};

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    tag: String,
    text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: SmallVec<[String; 4]>,
    layout: Rect,
    position: Option<Point>,
    scroll_axes: ScrollAxes,
    content_size: Size,
    scroll: Vec2,
    pickable: bool,
    draggable: bool,
}

impl NodeData {
    fn new(kind: NodeKind, tag: &str) -> Self {
        Self {
            kind,
            tag: String::from(tag),
            text: None,
            parent: None,
            children: Vec::new(),
            classes: SmallVec::new(),
            layout: Rect::ZERO,
            position: None,
            scroll_axes: ScrollAxes::empty(),
            content_size: Size::ZERO,
            scroll: Vec2::ZERO,
            pickable: true,
            draggable: false,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

#[derive(Copy, Clone, Debug)]
struct Listener {
    element: ElementId,
    mask: EventMask,
}

/// A headless, in-memory document.
///
/// Layout is explicit: hosts (or tests) assign each element a layout rectangle
/// with [`set_layout`](Self::set_layout), expressed in document space as if
/// nothing were scrolled. [`Document::bounding_rect`] then subtracts ancestor
/// scroll offsets to produce client-space boxes.
///
/// Every child-list change is appended to an internal log that hosts drain with
/// [`take_mutations`](Self::take_mutations), the way a mutation observer would
/// deliver them.
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: ElementId,
    mutations: Vec<MutationRecord>,
    listeners: HashMap<ListenerId, Listener>,
    next_listener: u64,
    captures: HashMap<PointerId, ElementId>,
    class_mutations: u64,
}

impl MemoryDocument {
    /// Creates a document whose root element covers a viewport of `viewport` size.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: ElementId::new(0, 1),
            mutations: Vec::new(),
            listeners: HashMap::new(),
            next_listener: 1,
            captures: HashMap::new(),
            class_mutations: 0,
        };
        let mut root = NodeData::new(NodeKind::Element, "html");
        root.layout = Rect::from_origin_size(Point::ORIGIN, viewport);
        doc.root = doc.alloc(root);
        doc
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot counts stay far below u32::MAX"
    )]
    fn alloc(&mut self, data: NodeData) -> ElementId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.data = Some(data);
            ElementId::new(idx, slot.generation)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                data: Some(data),
            });
            ElementId::new(idx, 1)
        }
    }

    fn data(&self, el: ElementId) -> Option<&NodeData> {
        let slot = self.slots.get(el.idx())?;
        if slot.generation != el.generation() {
            return None;
        }
        slot.data.as_ref()
    }

    fn data_mut(&mut self, el: ElementId) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(el.idx())?;
        if slot.generation != el.generation() {
            return None;
        }
        slot.data.as_mut()
    }

    fn element_mut(&mut self, el: ElementId) -> Option<&mut NodeData> {
        self.data_mut(el).filter(|d| d.kind == NodeKind::Element)
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> ElementId {
        let mut data = NodeData::new(NodeKind::Text, "#text");
        data.text = Some(String::from(text));
        data.pickable = false;
        self.alloc(data)
    }

    /// Creates a detached comment node.
    pub fn create_comment(&mut self, text: &str) -> ElementId {
        let mut data = NodeData::new(NodeKind::Comment, "#comment");
        data.text = Some(String::from(text));
        data.pickable = false;
        self.alloc(data)
    }

    /// Returns the tag name of a live node.
    #[must_use]
    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.data(el).map(|d| d.tag.as_str())
    }

    /// Returns the text payload of an element or text node.
    #[must_use]
    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.data(el).and_then(|d| d.text.as_deref())
    }

    /// Sets the text payload of a node.
    pub fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(data) = self.data_mut(el) {
            data.text = Some(String::from(text));
        }
    }

    /// Returns the classes of an element in insertion order.
    #[must_use]
    pub fn classes(&self, el: ElementId) -> &[String] {
        self.data(el).map(|d| d.classes.as_slice()).unwrap_or(&[])
    }

    /// Sets the unscrolled, document-space layout rectangle of an element.
    pub fn set_layout(&mut self, el: ElementId, rect: Rect) {
        if let Some(data) = self.data_mut(el) {
            data.layout = rect;
        }
    }

    /// Returns the layout rectangle previously assigned with [`set_layout`](Self::set_layout).
    #[must_use]
    pub fn layout(&self, el: ElementId) -> Option<Rect> {
        self.data(el).map(|d| d.layout)
    }

    /// Makes an element a scroll container over content of `content_size`.
    ///
    /// The element clips hit testing of its subtree to its own box.
    pub fn set_scrollable(&mut self, el: ElementId, axes: ScrollAxes, content_size: Size) {
        if let Some(data) = self.element_mut(el) {
            data.scroll_axes = axes;
            data.content_size = content_size;
        }
        let offset = self.scroll_offset(el);
        self.set_scroll_offset(el, offset);
    }

    /// Resizes the viewport (the root element's box).
    pub fn set_viewport_size(&mut self, size: Size) {
        let root = self.root;
        if let Some(data) = self.data_mut(root) {
            data.layout = Rect::from_origin_size(Point::ORIGIN, size);
        }
    }

    /// Clears an absolute position set with [`Document::set_position`].
    pub fn clear_position(&mut self, el: ElementId) {
        if let Some(data) = self.data_mut(el) {
            data.position = None;
        }
    }

    /// Returns `true` if a native drag may start from the element.
    #[must_use]
    pub fn is_draggable(&self, el: ElementId) -> bool {
        self.data(el).is_some_and(|d| d.draggable)
    }

    /// Returns `true` if the element participates in hit testing.
    #[must_use]
    pub fn is_pickable(&self, el: ElementId) -> bool {
        self.data(el).is_some_and(|d| d.pickable)
    }

    /// Inserts `child` into `parent` before `reference`, or at the end when `reference` is `None`.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) -> bool {
        if !self.can_adopt(parent, child) {
            return false;
        }
        self.detach(child);
        let Some(data) = self.data_mut(parent) else {
            return false;
        };
        let at = reference
            .and_then(|r| data.children.iter().position(|&c| c == r))
            .unwrap_or(data.children.len());
        data.children.insert(at, child);
        if let Some(child_data) = self.data_mut(child) {
            child_data.parent = Some(parent);
        }
        self.mutations.push(MutationRecord { target: parent });
        true
    }

    /// Detaches and frees an element with its whole subtree.
    ///
    /// Handles to destroyed nodes become stale. Listeners and pointer captures
    /// held by them are revoked.
    pub fn destroy(&mut self, el: ElementId) {
        if !self.is_alive(el) || el == self.root {
            return;
        }
        self.detach(el);
        let mut stack = alloc::vec![el];
        let mut freed = Vec::new();
        while let Some(next) = stack.pop() {
            let Some(slot) = self.slots.get_mut(next.idx()) else {
                continue;
            };
            if let Some(data) = slot.data.take() {
                stack.extend(data.children);
                self.free.push(next.slot());
                freed.push(next);
            }
        }
        self.listeners.retain(|_, l| !freed.contains(&l.element));
        self.captures.retain(|_, e| !freed.contains(e));
    }

    /// Drains the child-list mutation log.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        core::mem::take(&mut self.mutations)
    }

    /// Returns pending mutations without draining them.
    #[must_use]
    pub fn pending_mutations(&self) -> &[MutationRecord] {
        &self.mutations
    }

    /// Number of class additions/removals that actually changed a class list.
    #[must_use]
    pub fn class_mutations(&self) -> u64 {
        self.class_mutations
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Union of the masks of all live listeners on `el`.
    #[must_use]
    pub fn listener_mask(&self, el: ElementId) -> EventMask {
        self.listeners
            .values()
            .filter(|l| l.element == el)
            .fold(EventMask::empty(), |acc, l| acc | l.mask)
    }

    /// Returns the element currently capturing `pointer`.
    #[must_use]
    pub fn pointer_capture(&self, pointer: PointerId) -> Option<ElementId> {
        self.captures.get(&pointer).copied()
    }

    fn can_adopt(&self, parent: ElementId, child: ElementId) -> bool {
        if parent == child || child == self.root {
            return false;
        }
        if self.kind(parent) != Some(NodeKind::Element) || !self.is_alive(child) {
            return false;
        }
        // Refuse to create a cycle: `child` must not be an ancestor of `parent`.
        let mut cur = Some(parent);
        while let Some(el) = cur {
            if el == child {
                return false;
            }
            cur = self.parent(el);
        }
        true
    }

    fn detach(&mut self, el: ElementId) {
        let Some(parent) = self.data(el).and_then(|d| d.parent) else {
            return;
        };
        if let Some(data) = self.data_mut(parent) {
            data.children.retain(|&c| c != el);
        }
        if let Some(data) = self.data_mut(el) {
            data.parent = None;
        }
        self.mutations.push(MutationRecord { target: parent });
    }

    fn clone_subtree(&mut self, el: ElementId) -> Option<ElementId> {
        let mut copy = self.data(el)?.clone();
        let children = core::mem::take(&mut copy.children);
        copy.parent = None;
        let id = self.alloc(copy);
        for child in children {
            if let Some(child_copy) = self.clone_subtree(child) {
                if let Some(data) = self.data_mut(child_copy) {
                    data.parent = Some(id);
                }
                if let Some(data) = self.data_mut(id) {
                    data.children.push(child_copy);
                }
            }
        }
        Some(id)
    }

    fn hit_walk(&self, el: ElementId, pt: Point, clip: Option<Rect>, best: &mut Option<ElementId>) {
        let Some(data) = self.data(el) else {
            return;
        };
        if data.kind != NodeKind::Element || !data.pickable {
            return;
        }
        let Some(rect) = self.bounding_rect(el) else {
            return;
        };
        if rect.contains(pt) && clip.is_none_or(|c| c.contains(pt)) {
            *best = Some(el);
        }
        let child_clip = if data.scroll_axes.is_empty() {
            clip
        } else {
            Some(clip.map_or(rect, |c| c.intersect(rect)))
        };
        for &child in &data.children {
            self.hit_walk(child, pt, child_clip, best);
        }
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> ElementId {
        self.root
    }

    fn is_alive(&self, el: ElementId) -> bool {
        self.data(el).is_some()
    }

    fn is_connected(&self, el: ElementId) -> bool {
        let mut cur = el;
        loop {
            if cur == self.root {
                return true;
            }
            match self.data(cur).and_then(|d| d.parent) {
                Some(parent) => cur = parent,
                None => return false,
            }
        }
    }

    fn kind(&self, el: ElementId) -> Option<NodeKind> {
        self.data(el).map(|d| d.kind)
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.data(el).and_then(|d| d.parent)
    }

    fn children(&self, el: ElementId) -> &[ElementId] {
        self.data(el).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        let data = self.data(el)?;
        if data.kind != NodeKind::Element || !self.is_connected(el) {
            return None;
        }
        if let Some(origin) = data.position {
            return Some(Rect::from_origin_size(origin, data.layout.size()));
        }
        let mut offset = Vec2::ZERO;
        let mut cur = data.parent;
        while let Some(parent) = cur {
            let parent_data = self.data(parent)?;
            offset += parent_data.scroll;
            cur = parent_data.parent;
        }
        Some(data.layout - offset)
    }

    fn viewport_scroll(&self) -> Vec2 {
        self.scroll_offset(self.root)
    }

    fn hit_test(&self, pt: Point) -> Option<ElementId> {
        let mut best = None;
        self.hit_walk(self.root, pt, None, &mut best);
        best
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.data(el)
            .is_some_and(|d| d.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> bool {
        if class.is_empty() {
            return false;
        }
        let Some(data) = self.element_mut(el) else {
            return false;
        };
        if data.classes.iter().any(|c| c == class) {
            return false;
        }
        data.classes.push(String::from(class));
        self.class_mutations += 1;
        true
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> bool {
        let Some(data) = self.element_mut(el) else {
            return false;
        };
        let Some(pos) = data.classes.iter().position(|c| c == class) else {
            return false;
        };
        data.classes.remove(pos);
        self.class_mutations += 1;
        true
    }

    fn set_draggable(&mut self, el: ElementId, draggable: bool) {
        if let Some(data) = self.element_mut(el) {
            data.draggable = draggable;
        }
    }

    fn set_pickable(&mut self, el: ElementId, pickable: bool) {
        if let Some(data) = self.element_mut(el) {
            data.pickable = pickable;
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.alloc(NodeData::new(NodeKind::Element, tag))
    }

    fn clone_element(&mut self, el: ElementId) -> Option<ElementId> {
        if self.kind(el) != Some(NodeKind::Element) {
            return None;
        }
        self.clone_subtree(el)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        self.insert_before(parent, child, None)
    }

    fn remove(&mut self, el: ElementId) {
        self.detach(el);
    }

    fn set_position(&mut self, el: ElementId, origin: Point) {
        if let Some(data) = self.element_mut(el) {
            data.position = Some(origin);
        }
    }

    fn scroll_offset(&self, el: ElementId) -> Vec2 {
        self.data(el).map(|d| d.scroll).unwrap_or(Vec2::ZERO)
    }

    fn scroll_range(&self, el: ElementId) -> Vec2 {
        let Some(data) = self.data(el) else {
            return Vec2::ZERO;
        };
        let size = data.layout.size();
        let x = if data.scroll_axes.contains(ScrollAxes::X) {
            (data.content_size.width - size.width).max(0.0)
        } else {
            0.0
        };
        let y = if data.scroll_axes.contains(ScrollAxes::Y) {
            (data.content_size.height - size.height).max(0.0)
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    fn set_scroll_offset(&mut self, el: ElementId, offset: Vec2) -> Vec2 {
        let range = self.scroll_range(el);
        let clamped = Vec2::new(offset.x.clamp(0.0, range.x), offset.y.clamp(0.0, range.y));
        match self.data_mut(el) {
            Some(data) => {
                data.scroll = clamped;
                clamped
            }
            None => Vec2::ZERO,
        }
    }

    fn add_listener(&mut self, el: ElementId, mask: EventMask) -> Option<ListenerId> {
        if self.kind(el) != Some(NodeKind::Element) {
            return None;
        }
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Listener { element: el, mask });
        Some(id)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn set_pointer_capture(&mut self, el: ElementId, pointer: PointerId) -> bool {
        if !self.is_connected(el) {
            return false;
        }
        self.captures.insert(pointer, el);
        true
    }

    fn release_pointer_capture(&mut self, el: ElementId, pointer: PointerId) -> bool {
        if self.captures.get(&pointer) == Some(&el) {
            self.captures.remove(&pointer);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn doc() -> MemoryDocument {
        MemoryDocument::new(Size::new(500.0, 500.0))
    }

    #[test]
    fn destroyed_handles_go_stale_and_slots_are_reused() {
        let mut doc = doc();
        let a = doc.create_element("div");
        doc.destroy(a);
        assert!(!doc.is_alive(a));

        let b = doc.create_element("div");
        assert_eq!(a.slot(), b.slot());
        assert_ne!(a, b);
        assert!(doc.is_alive(b));
        assert_eq!(doc.kind(a), None);
    }

    #[test]
    fn child_list_changes_are_recorded_on_the_parent() {
        let mut doc = doc();
        let root = doc.root();
        let list = doc.create_element("ul");
        let item = doc.create_element("li");
        doc.append_child(root, list);
        doc.append_child(list, item);
        doc.remove(item);

        let targets: Vec<_> = doc.take_mutations().iter().map(|m| m.target).collect();
        assert_eq!(targets, vec![root, list, list]);
        assert!(doc.take_mutations().is_empty());
    }

    #[test]
    fn moving_a_child_records_both_parents() {
        let mut doc = doc();
        let a = doc.create_element("ul");
        let b = doc.create_element("ul");
        let item = doc.create_element("li");
        doc.append_child(a, item);
        doc.take_mutations();

        doc.append_child(b, item);
        let targets: Vec<_> = doc.take_mutations().iter().map(|m| m.target).collect();
        assert_eq!(targets, vec![a, b]);
        assert_eq!(doc.parent(item), Some(b));
    }

    #[test]
    fn cycles_are_refused() {
        let mut doc = doc();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner);
        assert!(!doc.append_child(inner, outer));
        assert!(!doc.append_child(outer, outer));
    }

    #[test]
    fn insert_before_places_relative_to_reference() {
        let mut doc = doc();
        let list = doc.create_element("ul");
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        let c = doc.create_element("li");
        doc.append_child(list, a);
        doc.append_child(list, c);
        doc.insert_before(list, b, Some(c));
        assert_eq!(doc.children(list), &[a, b, c]);
    }

    #[test]
    fn detached_elements_have_no_geometry() {
        let mut doc = doc();
        let el = doc.create_element("div");
        doc.set_layout(el, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(doc.bounding_rect(el), None);

        doc.append_child(doc.root(), el);
        assert_eq!(doc.bounding_rect(el), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn ancestor_scroll_shifts_client_rects() {
        let mut doc = doc();
        let scroller = doc.create_element("div");
        let item = doc.create_element("div");
        doc.append_child(doc.root(), scroller);
        doc.append_child(scroller, item);
        doc.set_layout(scroller, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.set_layout(item, Rect::new(0.0, 150.0, 100.0, 200.0));
        doc.set_scrollable(scroller, ScrollAxes::Y, Size::new(100.0, 300.0));

        let applied = doc.set_scroll_offset(scroller, Vec2::new(0.0, 100.0));
        assert_eq!(applied, Vec2::new(0.0, 100.0));
        assert_eq!(doc.bounding_rect(item), Some(Rect::new(0.0, 50.0, 100.0, 100.0)));
        // The scroller itself is not moved by its own offset.
        assert_eq!(doc.bounding_rect(scroller), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn scroll_offsets_clamp_to_range() {
        let mut doc = doc();
        let scroller = doc.create_element("div");
        doc.append_child(doc.root(), scroller);
        doc.set_layout(scroller, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.set_scrollable(scroller, ScrollAxes::Y, Size::new(100.0, 250.0));

        assert_eq!(doc.scroll_range(scroller), Vec2::new(0.0, 150.0));
        let applied = doc.set_scroll_offset(scroller, Vec2::new(40.0, 900.0));
        assert_eq!(applied, Vec2::new(0.0, 150.0));
        let applied = doc.set_scroll_offset(scroller, Vec2::new(0.0, -5.0));
        assert_eq!(applied, Vec2::ZERO);
    }

    #[test]
    fn hit_test_prefers_topmost_pickable_descendant() {
        let mut doc = doc();
        let list = doc.create_element("ul");
        let a = doc.create_element("li");
        let overlay = doc.create_element("div");
        doc.append_child(doc.root(), list);
        doc.append_child(list, a);
        doc.append_child(doc.root(), overlay);
        doc.set_layout(list, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.set_layout(a, Rect::new(0.0, 0.0, 100.0, 50.0));
        doc.set_layout(overlay, Rect::new(0.0, 0.0, 100.0, 100.0));

        let pt = Point::new(10.0, 10.0);
        assert_eq!(doc.hit_test(pt), Some(overlay));

        doc.set_pickable(overlay, false);
        assert_eq!(doc.hit_test(pt), Some(a));
        assert_eq!(doc.hit_test(Point::new(10.0, 70.0)), Some(list));
    }

    #[test]
    fn scroll_containers_clip_hit_testing() {
        let mut doc = doc();
        let scroller = doc.create_element("div");
        let item = doc.create_element("div");
        doc.append_child(doc.root(), scroller);
        doc.append_child(scroller, item);
        doc.set_layout(scroller, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.set_layout(item, Rect::new(0.0, 120.0, 100.0, 170.0));
        doc.set_scrollable(scroller, ScrollAxes::Y, Size::new(100.0, 200.0));

        assert_eq!(doc.hit_test(Point::new(10.0, 130.0)), Some(doc.root()));
    }

    #[test]
    fn clones_are_detached_deep_copies() {
        let mut doc = doc();
        let item = doc.create_element("li");
        let label = doc.create_element("span");
        doc.append_child(doc.root(), item);
        doc.append_child(item, label);
        doc.add_class(item, "card");
        doc.take_mutations();

        let copy = doc.clone_element(item).unwrap();
        assert_ne!(copy, item);
        assert_eq!(doc.parent(copy), None);
        assert!(doc.has_class(copy, "card"));
        assert_eq!(doc.children(copy).len(), 1);
        assert_ne!(doc.children(copy)[0], label);
        assert!(doc.take_mutations().is_empty());
    }

    #[test]
    fn class_changes_are_counted_only_when_effective() {
        let mut doc = doc();
        let el = doc.create_element("div");
        assert!(doc.add_class(el, "a"));
        assert!(!doc.add_class(el, "a"));
        assert!(!doc.remove_class(el, "b"));
        assert!(doc.remove_class(el, "a"));
        assert_eq!(doc.class_mutations(), 2);
    }

    #[test]
    fn destroy_revokes_listeners_and_captures() {
        let mut doc = doc();
        let el = doc.create_element("div");
        doc.append_child(doc.root(), el);
        let listener = doc.add_listener(el, EventMask::POINTER).unwrap();
        assert!(doc.set_pointer_capture(el, PointerId(1)));
        assert_eq!(doc.listener_mask(el), EventMask::POINTER);

        doc.destroy(el);
        assert_eq!(doc.listener_count(), 0);
        assert_eq!(doc.pointer_capture(PointerId(1)), None);
        assert!(!doc.remove_listener(listener));
    }

    #[test]
    fn listeners_require_elements() {
        let mut doc = doc();
        let text = doc.create_text("hello");
        assert_eq!(doc.add_listener(text, EventMask::DRAG_START), None);
    }

    #[test]
    fn positioned_elements_ignore_scroll() {
        let mut doc = doc();
        let proxy = doc.create_element("div");
        doc.append_child(doc.root(), proxy);
        doc.set_layout(proxy, Rect::new(0.0, 0.0, 20.0, 10.0));
        doc.set_position(proxy, Point::new(30.0, 40.0));
        assert_eq!(doc.bounding_rect(proxy), Some(Rect::new(30.0, 40.0, 50.0, 50.0)));
    }
}
