// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-container transfers.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{Fixture, List};
use kurbo::Point;
use understory_dnd::{ClassNames, DragEndEvent, ParentConfig};
use understory_dom::Document;

fn two_lists(a: ParentConfig<&'static str>, b: ParentConfig<&'static str>) -> (Fixture, List, List) {
    let mut f = Fixture::new();
    let first = f.list(0.0, &["Apple", "Banana", "Orange"]);
    let second = f.list(200.0, &["Cherry", "Grape"]);
    f.register(&first, a);
    f.register(&second, b);
    (f, first, second)
}

fn grouped() -> ParentConfig<&'static str> {
    ParentConfig::new().with_group("fruit")
}

#[test]
fn hovering_the_container_body_appends() {
    let (mut f, a, b) = two_lists(grouped(), grouped());
    let apple = f.item(&a, "Apple");

    f.native_start(apple);
    let over = f.drag_over(b.el, Point::new(250.0, 300.0));
    assert!(over.prevent_default);
    assert_eq!(a.values.get(), ["Banana", "Orange"]);
    assert_eq!(b.values.get(), ["Cherry", "Grape", "Apple"]);

    let session = f.dnd.session().unwrap();
    assert_eq!(session.current_parent(), b.el);
    assert!(session.transferred());
    assert_eq!(session.target_index(), 2);
    assert!(f.doc.has_class(b.el, &ClassNames::default().drop_zone));
}

#[test]
fn hovering_a_node_inserts_at_its_index() {
    let (mut f, a, b) = two_lists(grouped(), grouped());
    let apple = f.item(&a, "Apple");
    let grape = f.item(&b, "Grape");

    f.native_start(apple);
    f.drag_over(grape, Point::new(250.0, 60.0));
    assert_eq!(a.values.get(), ["Banana", "Orange"]);
    assert_eq!(b.values.get(), ["Cherry", "Apple", "Grape"]);
}

#[test]
fn different_groups_refuse_the_drop() {
    let (mut f, a, b) = two_lists(grouped(), ParentConfig::new().with_group("veg"));
    let apple = f.item(&a, "Apple");

    f.native_start(apple);
    let over = f.drag_over(b.el, Point::new(250.0, 300.0));
    assert!(!over.prevent_default);
    assert_eq!(a.values.get(), ["Apple", "Banana", "Orange"]);
    assert_eq!(b.values.get(), ["Cherry", "Grape"]);
}

#[test]
fn accepts_predicate_overrides_groups() {
    let b_config = ParentConfig::<&'static str>::new().with_accepts(|ctx| ctx.dragged.iter().all(|v| v.len() == 5));
    let (mut f, a, b) = two_lists(ParentConfig::new(), b_config);

    let banana = f.item(&a, "Banana");
    f.native_start(banana);
    f.drag_over(b.el, Point::new(250.0, 300.0));
    assert_eq!(b.values.get(), ["Cherry", "Grape"]);
    f.drop_on(b.el, Point::new(250.0, 300.0));

    let apple = f.item(&a, "Apple");
    f.native_start(apple);
    f.drag_over(b.el, Point::new(250.0, 300.0));
    assert_eq!(b.values.get(), ["Cherry", "Grape", "Apple"]);
}

#[test]
fn drop_zone_off_refuses_transfers() {
    let (mut f, a, b) = two_lists(grouped(), grouped().with_drop_zone(false));
    let apple = f.item(&a, "Apple");

    f.native_start(apple);
    f.drag_over(b.el, Point::new(250.0, 300.0));
    assert_eq!(b.values.get(), ["Cherry", "Grape"]);
}

#[test]
fn non_sortable_target_appends_even_over_a_node() {
    let (mut f, a, b) = two_lists(grouped(), grouped().with_sortable(false));
    let apple = f.item(&a, "Apple");
    let cherry = f.item(&b, "Cherry");

    f.native_start(apple);
    f.drag_over(cherry, Point::new(250.0, 10.0));
    assert_eq!(b.values.get(), ["Cherry", "Grape", "Apple"]);
}

#[test]
fn returning_to_a_non_sortable_origin_restores_the_initial_index() {
    let (mut f, a, b) = two_lists(grouped().with_sortable(false), grouped());
    let banana = f.item(&a, "Banana");

    f.native_start(banana);
    f.drag_over(b.el, Point::new(250.0, 300.0));
    assert_eq!(a.values.get(), ["Apple", "Orange"]);
    f.rerender(&a);
    f.rerender(&b);

    let orange = f.item(&a, "Orange");
    f.drag_over(orange, Point::new(50.0, 70.0));
    assert_eq!(a.values.get(), ["Apple", "Banana", "Orange"]);
    assert_eq!(b.values.get(), ["Cherry", "Grape"]);
    assert_eq!(f.dnd.session().unwrap().current_parent(), a.el);
}

#[test]
fn session_follows_the_values_into_the_target() {
    let (mut f, a, b) = two_lists(grouped(), grouped());
    let apple = f.item(&a, "Apple");

    f.native_start(apple);
    f.drag_over(b.el, Point::new(250.0, 300.0));
    f.rerender(&a);
    f.rerender(&b);

    let moved = f.item(&b, "Apple");
    let session = f.dnd.session().unwrap();
    assert_eq!(session.dragged_node().element, moved);
    assert_eq!(session.dragged_node().index, 2);
    assert!(f.doc.is_connected(moved));
    assert!(f.doc.has_class(moved, &ClassNames::default().dragging));
}

#[test]
fn transfer_callbacks_fire_for_source_and_target() {
    let source_calls = Rc::new(Cell::new(0));
    let target_calls = Rc::new(Cell::new(0));
    let ends: Rc<RefCell<Vec<DragEndEvent<&'static str>>>> = Rc::default();

    let (s, t, e) = (
        Rc::clone(&source_calls),
        Rc::clone(&target_calls),
        Rc::clone(&ends),
    );
    let a_config = grouped()
        .on_transfer(move |_| s.set(s.get() + 1))
        .on_drag_end(move |ev| e.borrow_mut().push(ev.clone()));
    let b_config = grouped().on_transfer(move |ev| {
        assert_eq!(ev.target_values, ["Cherry", "Grape", "Apple"]);
        t.set(t.get() + 1);
    });
    let (mut f, a, b) = two_lists(a_config, b_config);
    let apple = f.item(&a, "Apple");

    f.native_start(apple);
    f.drag_over(b.el, Point::new(250.0, 300.0));
    assert_eq!((source_calls.get(), target_calls.get()), (1, 1));

    f.drop_on(b.el, Point::new(250.0, 300.0));
    let ends = ends.borrow();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].initial_parent, a.el);
    assert_eq!(ends[0].parent, b.el);
    assert_eq!(ends[0].values, ["Cherry", "Grape", "Apple"]);
    assert!(ends[0].transferred);
    assert!(!ends[0].cancelled);
    assert!(!f.doc.has_class(b.el, &ClassNames::default().drop_zone));
}
