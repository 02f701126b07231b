// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge autoscroll during a drag.
//!
//! Each pointer move re-evaluates which edges of the nearest scrollable
//! ancestor the pointer is close to ([`scroll_directions`]). A non-empty result
//! schedules a repeating scroll task that the host drives with animation-frame
//! ticks; the distance scrolled per tick is proportional to the elapsed time,
//! not to pointer speed. Changing the target or the set of directions replaces
//! the task, so velocities never compound.

use kurbo::{Point, Rect, Vec2};
use understory_dom::{Document, ElementId};

use crate::config::ScrollBehavior;

bitflags::bitflags! {
    /// Edges toward which an autoscroll is running.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ScrollDirections: u8 {
        /// Toward the top edge.
        const UP = 0b0001;
        /// Toward the bottom edge.
        const DOWN = 0b0010;
        /// Toward the left edge.
        const LEFT = 0b0100;
        /// Toward the right edge.
        const RIGHT = 0b1000;
    }
}

/// Directions to scroll a container with box `rect`, current `offset`, and scroll `range`.
///
/// A direction is active when the pointer is within the outer
/// `1 - behavior.{x,y}` fraction of the box on that side and the container can
/// still scroll that way. Outside the box nothing is active unless
/// `scroll_outside` is set.
///
/// ```
/// use kurbo::{Point, Rect, Vec2};
/// use understory_dnd::{ScrollBehavior, ScrollDirections, scroll_directions};
///
/// let rect = Rect::new(0.0, 0.0, 100.0, 200.0);
/// let range = Vec2::new(0.0, 800.0);
/// let behavior = ScrollBehavior::default();
/// let dirs = scroll_directions(rect, Point::new(50.0, 195.0), behavior, Vec2::ZERO, range);
/// assert_eq!(dirs, ScrollDirections::DOWN);
/// ```
#[must_use]
pub fn scroll_directions(
    rect: Rect,
    pointer: Point,
    behavior: ScrollBehavior,
    offset: Vec2,
    range: Vec2,
) -> ScrollDirections {
    let mut dirs = ScrollDirections::empty();
    let inside = rect.contains(pointer);
    if !inside && !behavior.scroll_outside {
        return dirs;
    }
    let band_y = rect.height() * (1.0 - behavior.y).max(0.0);
    let band_x = rect.width() * (1.0 - behavior.x).max(0.0);
    let within_x = pointer.x >= rect.x0 && pointer.x <= rect.x1;
    let within_y = pointer.y >= rect.y0 && pointer.y <= rect.y1;

    if within_x || behavior.scroll_outside {
        if pointer.y >= rect.y1 - band_y && offset.y < range.y {
            dirs |= ScrollDirections::DOWN;
        } else if pointer.y <= rect.y0 + band_y && offset.y > 0.0 {
            dirs |= ScrollDirections::UP;
        }
    }
    if within_y || behavior.scroll_outside {
        if pointer.x >= rect.x1 - band_x && offset.x < range.x {
            dirs |= ScrollDirections::RIGHT;
        } else if pointer.x <= rect.x0 + band_x && offset.x > 0.0 {
            dirs |= ScrollDirections::LEFT;
        }
    }
    dirs
}

/// The nearest element at or above `el` that can scroll, falling back to the root.
///
/// Returns `None` when nothing, not even the root, has a scroll range.
pub(crate) fn scrollable_ancestor(doc: &dyn Document, el: ElementId) -> Option<ElementId> {
    let mut cur = Some(el);
    while let Some(candidate) = cur {
        let range = doc.scroll_range(candidate);
        if range.x > 0.0 || range.y > 0.0 {
            return Some(candidate);
        }
        cur = doc.parent(candidate);
    }
    None
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct ScrollTask {
    target: ElementId,
    directions: ScrollDirections,
    speed: f64,
    last_frame: Option<u64>,
}

/// The single cancellable repeating scroll task.
#[derive(Clone, Debug, Default)]
pub(crate) struct Autoscroll {
    task: Option<ScrollTask>,
}

impl Autoscroll {
    /// Starts, keeps, or replaces the task.
    ///
    /// Scheduling the same target and directions again keeps the running task
    /// and its frame timing. Empty directions cancel.
    pub(crate) fn schedule(&mut self, target: ElementId, directions: ScrollDirections, speed: f64) {
        if directions.is_empty() {
            self.cancel();
            return;
        }
        if let Some(task) = &mut self.task {
            if task.target == target && task.directions == directions {
                task.speed = speed;
                return;
            }
        }
        self.task = Some(ScrollTask {
            target,
            directions,
            speed,
            last_frame: None,
        });
    }

    pub(crate) fn cancel(&mut self) {
        self.task = None;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Advances the task to `now_ms`; returns the scrolled element if anything moved.
    ///
    /// The first frame only records a baseline. The task ends by itself once
    /// the target cannot scroll any further in its directions.
    pub(crate) fn step(&mut self, doc: &mut dyn Document, now_ms: u64) -> Option<ElementId> {
        let task = self.task.as_mut()?;
        let Some(last) = task.last_frame.replace(now_ms) else {
            return None;
        };
        let elapsed = now_ms.saturating_sub(last);
        if elapsed == 0 {
            return None;
        }
        let distance = task.speed * elapsed as f64 / 1000.0;
        let mut delta = Vec2::ZERO;
        if task.directions.contains(ScrollDirections::DOWN) {
            delta.y += distance;
        }
        if task.directions.contains(ScrollDirections::UP) {
            delta.y -= distance;
        }
        if task.directions.contains(ScrollDirections::RIGHT) {
            delta.x += distance;
        }
        if task.directions.contains(ScrollDirections::LEFT) {
            delta.x -= distance;
        }
        let target = task.target;
        let before = doc.scroll_offset(target);
        let after = doc.set_scroll_offset(target, before + delta);
        if after == before {
            self.cancel();
            return None;
        }
        Some(target)
    }
}
