// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-container configuration.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use understory_dom::{Document, ElementId};

use crate::events::{DragEndEvent, DragImage, DragStartEvent, SortEvent, TransferEvent};
use crate::plugin::Plugin;

/// Class names the controller applies to elements.
///
/// Empty names disable the corresponding class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    /// On the dragged nodes while a native drag image is captured, and on the synthetic proxy.
    pub dragging: String,
    /// On the dragged nodes once a native drag is underway.
    pub drag_placeholder: String,
    /// On the dragged nodes during a synthetic drag.
    pub synthetic_placeholder: String,
    /// On the container currently receiving transferred values.
    pub drop_zone: String,
    /// On the nodes marked as the prospective target of a swap or place.
    pub drop_target: String,
    /// On the insertion marker element.
    pub insert_marker: String,
    /// On a node whose long press has completed.
    pub long_press: String,
    /// On selected nodes.
    pub selected: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            dragging: "understory-dragging".into(),
            drag_placeholder: "understory-drag-placeholder".into(),
            synthetic_placeholder: "understory-synthetic-placeholder".into(),
            drop_zone: "understory-drop-zone".into(),
            drop_target: "understory-drop-target".into(),
            insert_marker: "understory-insert-marker".into(),
            long_press: "understory-long-press".into(),
            selected: "understory-selected".into(),
        }
    }
}

/// How far past a hovered node's midpoint the pointer must travel before a sort happens.
///
/// Each value is a fraction of the half-extent of the hovered node along the
/// direction of travel: `0.0` accepts at the midpoint, values near `1.0` accept
/// only close to the far edge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Threshold {
    /// Fraction applied to horizontal travel.
    pub horizontal: f64,
    /// Fraction applied to vertical travel.
    pub vertical: f64,
}

/// Autoscroll behavior.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollBehavior {
    /// Horizontal edge fraction: scrolling starts when the pointer is past this
    /// fraction of the width from one edge (`0.95` means the outer 5% on each side).
    pub x: f64,
    /// Vertical edge fraction, as for `x`.
    pub y: f64,
    /// Keep scrolling after the pointer leaves the scroll container.
    pub scroll_outside: bool,
    /// Scroll speed in pixels per second.
    pub speed: f64,
}

impl Default for ScrollBehavior {
    fn default() -> Self {
        Self {
            x: 0.95,
            y: 0.95,
            scroll_outside: false,
            speed: 600.0,
        }
    }
}

/// How hovering turns into new values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Reorder live while hovering; transfer live between containers.
    #[default]
    Sort,
    /// Mark a run of hovered nodes; exchange it with the dragged nodes on release.
    Swap,
    /// Match the pointer against per-node insertion zones; insert on release.
    Insert,
    /// Mark the hovered range; move the dragged values there on release.
    Place,
}

/// Whether a hook consumed an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Run the default behavior.
    #[default]
    Continue,
    /// Skip the default behavior.
    Handled,
}

/// Context passed to [`Hooks`].
#[derive(Debug)]
pub struct HookContext<'a, V> {
    /// The container the event concerns.
    pub parent: ElementId,
    /// The node the event concerns, if any.
    pub node: Option<ElementId>,
    /// Pointer position in client coordinates.
    pub position: Point,
    /// Dragged values (or the values about to be dragged on drag start).
    pub dragged: &'a [V],
}

/// A hook override.
pub type Hook<V> = Rc<dyn Fn(&mut dyn Document, &HookContext<'_, V>) -> Flow>;

/// Overrides for the default event handling.
///
/// Returning [`Flow::Handled`] skips the default behavior of that step. Release
/// cleanup (classes, proxy, capture, autoscroll) always runs.
pub struct Hooks<V> {
    /// Runs before a session is started.
    pub handle_drag_start: Option<Hook<V>>,
    /// Runs before the default handling of hovering a node.
    pub handle_node_dragover: Option<Hook<V>>,
    /// Runs before the default handling of hovering a container body.
    pub handle_parent_dragover: Option<Hook<V>>,
    /// Runs before pending placements are committed on release.
    pub handle_end: Option<Hook<V>>,
}

impl<V> Default for Hooks<V> {
    fn default() -> Self {
        Self {
            handle_drag_start: None,
            handle_node_dragover: None,
            handle_parent_dragover: None,
            handle_end: None,
        }
    }
}

impl<V> Clone for Hooks<V> {
    fn clone(&self) -> Self {
        Self {
            handle_drag_start: self.handle_drag_start.clone(),
            handle_node_dragover: self.handle_node_dragover.clone(),
            handle_parent_dragover: self.handle_parent_dragover.clone(),
            handle_end: self.handle_end.clone(),
        }
    }
}

impl<V> fmt::Debug for Hooks<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("handle_drag_start", &self.handle_drag_start.is_some())
            .field("handle_node_dragover", &self.handle_node_dragover.is_some())
            .field("handle_parent_dragover", &self.handle_parent_dragover.is_some())
            .field("handle_end", &self.handle_end.is_some())
            .finish()
    }
}

/// Context passed to an [`AcceptsPredicate`].
#[derive(Debug)]
pub struct AcceptContext<'a, V> {
    /// The container that would receive the values.
    pub target: ElementId,
    /// The container currently holding the values.
    pub source: ElementId,
    /// The container the drag started in.
    pub initial_parent: ElementId,
    /// The dragged values.
    pub dragged: &'a [V],
}

/// Decides whether a container accepts a transfer.
pub type AcceptsPredicate<V> = Rc<dyn Fn(&AcceptContext<'_, V>) -> bool>;

/// Decides whether a child element is an enabled node.
pub type DraggablePredicate = Rc<dyn Fn(&dyn Document, ElementId) -> bool>;

/// Chooses the native drag image for the dragged elements at a pointer position.
pub type DragImageFn = Rc<dyn Fn(&mut dyn Document, &[ElementId], Point) -> Option<DragImage>>;

/// Owner notification callback.
pub type Callback<E> = Rc<dyn Fn(&E)>;

/// Configuration of one registered container.
///
/// Fields are public; the `with_*` methods are shorthands for building one in
/// a single expression.
///
/// ```
/// use understory_dnd::{ParentConfig, Placement};
///
/// let config = ParentConfig::<u32>::new()
///     .with_group("fruit")
///     .with_placement(Placement::Swap);
/// assert_eq!(config.group.as_deref(), Some("fruit"));
/// assert!(config.sortable);
/// ```
pub struct ParentConfig<V> {
    /// Suspend every drag affordance of the container.
    pub disabled: bool,
    /// Allow reordering inside the container.
    pub sortable: bool,
    /// Accept values transferred from other containers.
    pub drop_zone: bool,
    /// Transfer group; containers with equal groups exchange values.
    pub group: Option<String>,
    /// Explicit transfer acceptance; overrides `group`.
    pub accepts: Option<AcceptsPredicate<V>>,
    /// Per-child eligibility.
    pub draggable: Option<DraggablePredicate>,
    /// Pick-up must start inside an element carrying this class.
    pub drag_handle: Option<String>,
    /// Class names.
    pub classes: ClassNames,
    /// Sort acceptance threshold.
    pub threshold: Threshold,
    /// Autoscroll behavior.
    pub scroll_behavior: ScrollBehavior,
    /// Require a long press before a synthetic drag starts.
    pub long_press: bool,
    /// Long press duration in milliseconds.
    pub long_press_duration: u64,
    /// Use platform drag-and-drop for mouse and pen; `false` forces the synthetic driver.
    pub native_drag: bool,
    /// Distance in pixels a press must travel before a synthetic drag starts.
    pub drag_start_threshold: f64,
    /// Placement policy used when this container is hovered.
    pub placement: Placement,
    /// Dragging a selected node drags the whole selection.
    pub multi_drag: bool,
    /// Native drag image override.
    pub drag_image: Option<DragImageFn>,
    /// Default-behavior overrides.
    pub hooks: Hooks<V>,
    /// Called when a drag starts from this container.
    pub on_drag_start: Option<Callback<DragStartEvent<V>>>,
    /// Called when a drag that started from this container, or ended in it, ends.
    pub on_drag_end: Option<Callback<DragEndEvent<V>>>,
    /// Called when this container's values were reordered.
    pub on_sort: Option<Callback<SortEvent<V>>>,
    /// Called when values left or entered this container.
    pub on_transfer: Option<Callback<TransferEvent<V>>>,
    /// Decorators, in call order.
    pub plugins: Vec<Rc<dyn Plugin<V>>>,
}

impl<V> ParentConfig<V> {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`disabled`](Self::disabled).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets [`sortable`](Self::sortable).
    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets [`drop_zone`](Self::drop_zone).
    #[must_use]
    pub fn with_drop_zone(mut self, drop_zone: bool) -> Self {
        self.drop_zone = drop_zone;
        self
    }

    /// Sets [`group`](Self::group).
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets [`accepts`](Self::accepts).
    #[must_use]
    pub fn with_accepts(mut self, accepts: impl Fn(&AcceptContext<'_, V>) -> bool + 'static) -> Self {
        self.accepts = Some(Rc::new(accepts));
        self
    }

    /// Sets [`draggable`](Self::draggable).
    #[must_use]
    pub fn with_draggable(
        mut self,
        draggable: impl Fn(&dyn Document, ElementId) -> bool + 'static,
    ) -> Self {
        self.draggable = Some(Rc::new(draggable));
        self
    }

    /// Sets [`drag_handle`](Self::drag_handle).
    #[must_use]
    pub fn with_drag_handle(mut self, class: impl Into<String>) -> Self {
        self.drag_handle = Some(class.into());
        self
    }

    /// Sets [`threshold`](Self::threshold).
    #[must_use]
    pub fn with_threshold(mut self, horizontal: f64, vertical: f64) -> Self {
        self.threshold = Threshold {
            horizontal,
            vertical,
        };
        self
    }

    /// Sets [`scroll_behavior`](Self::scroll_behavior).
    #[must_use]
    pub fn with_scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = behavior;
        self
    }

    /// Requires a long press of `duration_ms` before synthetic drags start.
    #[must_use]
    pub fn with_long_press(mut self, duration_ms: u64) -> Self {
        self.long_press = true;
        self.long_press_duration = duration_ms;
        self
    }

    /// Sets [`native_drag`](Self::native_drag).
    #[must_use]
    pub fn with_native_drag(mut self, native_drag: bool) -> Self {
        self.native_drag = native_drag;
        self
    }

    /// Sets [`placement`](Self::placement).
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets [`multi_drag`](Self::multi_drag).
    #[must_use]
    pub fn with_multi_drag(mut self, multi_drag: bool) -> Self {
        self.multi_drag = multi_drag;
        self
    }

    /// Sets [`drag_image`](Self::drag_image).
    #[must_use]
    pub fn with_drag_image(
        mut self,
        drag_image: impl Fn(&mut dyn Document, &[ElementId], Point) -> Option<DragImage> + 'static,
    ) -> Self {
        self.drag_image = Some(Rc::new(drag_image));
        self
    }

    /// Sets [`hooks`](Self::hooks).
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks<V>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Appends a plugin.
    #[must_use]
    pub fn with_plugin(mut self, plugin: Rc<dyn Plugin<V>>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Sets [`on_drag_start`](Self::on_drag_start).
    #[must_use]
    pub fn on_drag_start(mut self, f: impl Fn(&DragStartEvent<V>) + 'static) -> Self {
        self.on_drag_start = Some(Rc::new(f));
        self
    }

    /// Sets [`on_drag_end`](Self::on_drag_end).
    #[must_use]
    pub fn on_drag_end(mut self, f: impl Fn(&DragEndEvent<V>) + 'static) -> Self {
        self.on_drag_end = Some(Rc::new(f));
        self
    }

    /// Sets [`on_sort`](Self::on_sort).
    #[must_use]
    pub fn on_sort(mut self, f: impl Fn(&SortEvent<V>) + 'static) -> Self {
        self.on_sort = Some(Rc::new(f));
        self
    }

    /// Sets [`on_transfer`](Self::on_transfer).
    #[must_use]
    pub fn on_transfer(mut self, f: impl Fn(&TransferEvent<V>) + 'static) -> Self {
        self.on_transfer = Some(Rc::new(f));
        self
    }
}

impl<V> Default for ParentConfig<V> {
    fn default() -> Self {
        Self {
            disabled: false,
            sortable: true,
            drop_zone: true,
            group: None,
            accepts: None,
            draggable: None,
            drag_handle: None,
            classes: ClassNames::default(),
            threshold: Threshold::default(),
            scroll_behavior: ScrollBehavior::default(),
            long_press: false,
            long_press_duration: 1000,
            native_drag: true,
            drag_start_threshold: 4.0,
            placement: Placement::Sort,
            multi_drag: false,
            drag_image: None,
            hooks: Hooks::default(),
            on_drag_start: None,
            on_drag_end: None,
            on_sort: None,
            on_transfer: None,
            plugins: Vec::new(),
        }
    }
}

impl<V> fmt::Debug for ParentConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentConfig")
            .field("disabled", &self.disabled)
            .field("sortable", &self.sortable)
            .field("drop_zone", &self.drop_zone)
            .field("group", &self.group)
            .field("drag_handle", &self.drag_handle)
            .field("threshold", &self.threshold)
            .field("scroll_behavior", &self.scroll_behavior)
            .field("long_press", &self.long_press)
            .field("native_drag", &self.native_drag)
            .field("placement", &self.placement)
            .field("multi_drag", &self.multi_drag)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}
