// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Same-container sorting through the native driver.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::Fixture;
use kurbo::Point;
use understory_dnd::{Direction, DropEffect, NativeDragKind, ParentConfig, SortEvent};
use understory_dom::Document;

const FRUIT: [&str; 3] = ["Apple", "Banana", "Orange"];

#[test]
fn dragging_apple_onto_banana_swaps_their_order() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new());

    let apple = f.item(&list, "Apple");
    let banana = f.item(&list, "Banana");
    let start = f.native_start(apple);
    assert_eq!(start.drop_effect, DropEffect::Move);
    assert_eq!(start.drag_image.map(|i| i.element), Some(apple));

    let over = f.drag_over(banana, Point::new(50.0, 80.0));
    assert!(over.prevent_default);
    assert_eq!(list.values.get(), ["Banana", "Apple", "Orange"]);

    let session = f.dnd.session().unwrap();
    assert_eq!(session.incoming_direction(), Some(Direction::Above));
    assert!(session.is_ascending());
    assert_eq!(session.target_index(), 1);
    assert_eq!(session.affected_nodes(), [banana]);

    f.drop_on(banana, Point::new(50.0, 80.0));
    assert!(f.dnd.session().is_none());
    assert_eq!(list.values.get(), ["Banana", "Apple", "Orange"]);
}

#[test]
fn dragging_the_last_node_onto_the_first_shifts_the_range_between() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &["Banana", "Apple", "Orange"]);
    f.register(&list, ParentConfig::new());

    let orange = f.item(&list, "Orange");
    let banana = f.item(&list, "Banana");
    f.native_start(orange);
    f.drag_over(banana, Point::new(50.0, 20.0));

    assert_eq!(list.values.get(), ["Orange", "Banana", "Apple"]);
    let session = f.dnd.session().unwrap();
    assert_eq!(session.incoming_direction(), Some(Direction::Below));
    assert!(!session.is_ascending());
    assert_eq!(session.target_index(), 0);
}

#[test]
fn zero_threshold_accepts_at_the_midpoint() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new());
    let apple = f.item(&list, "Apple");
    let banana = f.item(&list, "Banana");

    f.native_start(apple);
    f.drag_over(banana, Point::new(50.0, 74.0));
    assert_eq!(list.values.get(), FRUIT);
    f.drag_over(banana, Point::new(50.0, 75.0));
    assert_eq!(list.values.get(), ["Banana", "Apple", "Orange"]);
}

#[test]
fn large_threshold_requires_reaching_the_far_edge() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new().with_threshold(0.0, 0.9));
    let apple = f.item(&list, "Apple");
    let banana = f.item(&list, "Banana");

    f.native_start(apple);
    f.drag_over(banana, Point::new(50.0, 80.0));
    f.drag_over(banana, Point::new(50.0, 95.0));
    assert_eq!(list.values.get(), FRUIT);
    f.drag_over(banana, Point::new(50.0, 98.0));
    assert_eq!(list.values.get(), ["Banana", "Apple", "Orange"]);
}

#[test]
fn repeating_the_last_target_is_ignored() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new());
    let apple = f.item(&list, "Apple");
    let banana = f.item(&list, "Banana");

    f.native_start(apple);
    f.drag_over(banana, Point::new(50.0, 80.0));
    f.drag_over(banana, Point::new(50.0, 90.0));
    assert_eq!(list.values.get(), ["Banana", "Apple", "Orange"]);
}

#[test]
fn first_hover_after_a_remap_is_debounced() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new());
    let apple = f.item(&list, "Apple");
    let banana = f.item(&list, "Banana");

    f.native_start(apple);
    f.drag_over(banana, Point::new(50.0, 80.0));
    f.rerender(&list);

    // Apple now sits at 50..100; Orange at 100..150.
    let orange = f.item(&list, "Orange");
    f.drag_over(orange, Point::new(50.0, 130.0));
    assert_eq!(list.values.get(), ["Banana", "Apple", "Orange"]);
    f.drag_over(orange, Point::new(50.0, 130.0));
    assert_eq!(list.values.get(), ["Banana", "Orange", "Apple"]);
}

#[test]
fn hovering_the_dragged_node_does_nothing() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new());
    let apple = f.item(&list, "Apple");

    f.native_start(apple);
    let over = f.drag_over(apple, Point::new(50.0, 40.0));
    assert!(over.prevent_default);
    assert_eq!(list.values.get(), FRUIT);
}

#[test]
fn non_sortable_container_keeps_its_order() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new().with_sortable(false));
    let apple = f.item(&list, "Apple");
    let banana = f.item(&list, "Banana");

    f.native_start(apple);
    f.drag_over(banana, Point::new(50.0, 90.0));
    assert_eq!(list.values.get(), FRUIT);
}

#[test]
fn disabled_container_ignores_drags() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new().with_disabled(true));
    assert!(f.dnd.enabled_nodes(list.el).is_empty());
    assert!(f.dnd.diagnostics().is_empty());

    let children = f.doc.children(list.el).to_vec();
    let start = f.native_start(children[0]);
    assert_eq!(start.drop_effect, DropEffect::None);
    assert!(f.dnd.session().is_none());
    f.drag_over(children[1], Point::new(50.0, 90.0));
    assert_eq!(list.values.get(), FRUIT);
}

#[test]
fn sort_callback_reports_before_and_after() {
    let events: Rc<RefCell<Vec<SortEvent<&'static str>>>> = Rc::default();
    let sink = Rc::clone(&events);
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(
        &list,
        ParentConfig::new().on_sort(move |e| sink.borrow_mut().push(e.clone())),
    );
    let apple = f.item(&list, "Apple");
    let orange = f.item(&list, "Orange");

    f.native_start(apple);
    f.drag_over(orange, Point::new(50.0, 140.0));

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.parent, list.el);
    assert_eq!(event.previous_values, FRUIT);
    assert_eq!(event.values, ["Banana", "Orange", "Apple"]);
    assert_eq!(event.dragged, ["Apple"]);
    assert_eq!((event.previous_index, event.index), (0, 2));
}

#[test]
fn drag_handle_restricts_the_pick_up_origin() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &FRUIT);
    f.register(&list, ParentConfig::new().with_drag_handle("grip"));
    let apple = f.item(&list, "Apple");

    f.native_start(apple);
    assert!(f.dnd.session().is_none());

    let grip = f.doc.create_element("span");
    f.doc.append_child(apple, grip);
    f.doc.add_class(grip, "grip");
    f.native(NativeDragKind::DragStart, grip, Point::new(10.0, 10.0));
    assert_eq!(f.dnd.session().unwrap().dragged_node().element, apple);
}
