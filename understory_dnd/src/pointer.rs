// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press tracking for the synthetic driver: travel distance and arming.
//!
//! A press does not start a drag by itself. The synthetic driver arms on press
//! and only picks up once the pointer has travelled past the configured
//! distance (or a long press has completed), so plain clicks stay clicks.

use kurbo::{Point, Vec2};
use understory_dom::{ElementId, PointerId};

use crate::events::PointerType;

/// Tracks the origin of one press.
#[derive(Debug, Clone, Default, Copy)]
pub(crate) struct PressState {
    /// Position where the press started.
    pub(crate) start_pos: Option<Point>,
}

impl PressState {
    /// Start tracking a press at `pos`.
    pub(crate) fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
    }

    /// Offset of `current_pos` from the press origin.
    pub(crate) fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// `true` once `current_pos` is strictly farther than `distance` from the origin.
    pub(crate) fn exceeds(&self, current_pos: Point, distance: f64) -> bool {
        self.total_offset(current_pos)
            .is_some_and(|offset| offset.hypot2() > distance * distance)
    }

    /// Returns `true` while a press is tracked.
    pub(crate) fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// A press on an enabled node that may still turn into a synthetic drag.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArmedPress {
    pub(crate) node: ElementId,
    pub(crate) parent: ElementId,
    pub(crate) pointer_id: PointerId,
    pub(crate) pointer_type: PointerType,
    pub(crate) press: PressState,
    /// When the long press completes; `None` when no long press is required.
    pub(crate) long_press_deadline: Option<u64>,
    pub(crate) long_pressed: bool,
}

impl ArmedPress {
    pub(crate) fn new(
        node: ElementId,
        parent: ElementId,
        pointer_id: PointerId,
        pointer_type: PointerType,
        position: Point,
        long_press_deadline: Option<u64>,
    ) -> Self {
        let mut press = PressState::default();
        press.start(position);
        Self {
            node,
            parent,
            pointer_id,
            pointer_type,
            press,
            long_press_deadline,
            long_pressed: false,
        }
    }

    /// Marks the long press complete if `now_ms` reached the deadline.
    ///
    /// Returns `true` on the transition.
    pub(crate) fn poll_long_press(&mut self, now_ms: u64) -> bool {
        match self.long_press_deadline {
            Some(deadline) if !self.long_pressed && now_ms >= deadline => {
                self.long_pressed = true;
                true
            }
            _ => false,
        }
    }

    /// `true` while a required long press has not completed.
    pub(crate) fn awaiting_long_press(&self) -> bool {
        self.long_press_deadline.is_some() && !self.long_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_press_state_is_inactive() {
        let press = PressState::default();
        assert!(!press.is_active());
        assert_eq!(press.total_offset(Point::new(1.0, 1.0)), None);
        assert!(!press.exceeds(Point::new(100.0, 0.0), 4.0));
    }

    #[test]
    fn total_offset_is_measured_from_the_origin() {
        let mut press = PressState::default();
        press.start(Point::new(10.0, 20.0));
        assert!(press.is_active());
        assert_eq!(
            press.total_offset(Point::new(20.0, 35.0)),
            Some(Vec2::new(10.0, 15.0))
        );
    }

    #[test]
    fn exceeds_is_strict() {
        let mut press = PressState::default();
        press.start(Point::new(0.0, 0.0));
        assert!(!press.exceeds(Point::new(3.0, 4.0), 5.0));
        assert!(press.exceeds(Point::new(3.0, 4.1), 5.0));
        assert!(press.exceeds(Point::new(-6.0, 0.0), 5.0));
    }

    #[test]
    fn long_press_fires_once_at_the_deadline() {
        let mut armed = ArmedPress::new(
            ElementId::new(1, 1),
            ElementId::new(0, 1),
            PointerId(1),
            PointerType::Touch,
            Point::ORIGIN,
            Some(500),
        );
        assert!(armed.awaiting_long_press());
        assert!(!armed.poll_long_press(499));
        assert!(armed.poll_long_press(500));
        assert!(!armed.poll_long_press(900));
        assert!(!armed.awaiting_long_press());
    }

    #[test]
    fn no_deadline_never_awaits() {
        let mut armed = ArmedPress::new(
            ElementId::new(1, 1),
            ElementId::new(0, 1),
            PointerId(1),
            PointerType::Mouse,
            Point::ORIGIN,
            None,
        );
        assert!(!armed.awaiting_long_press());
        assert!(!armed.poll_long_press(u64::MAX));
    }
}
