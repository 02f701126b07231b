// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging a selection as one block.

mod common;

use common::Fixture;
use kurbo::Point;
use understory_dnd::{ClassNames, ParentConfig};
use understory_dom::Document;

const LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];

#[test]
fn selected_nodes_move_together() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &LETTERS);
    f.register(&list, ParentConfig::new().with_multi_drag(true));
    let a = f.item(&list, "A");
    let b = f.item(&list, "B");
    let d = f.item(&list, "D");
    f.dnd.set_selection(&mut f.doc, list.el, &[b, a]).unwrap();
    let dragging = ClassNames::default().dragging;

    f.native_start(a);
    let session = f.dnd.session().unwrap();
    assert_eq!(session.dragged_values(), ["A", "B"]);
    assert_eq!(session.dragged_node().element, a);
    assert!(f.doc.has_class(a, &dragging));
    assert!(f.doc.has_class(b, &dragging));

    f.drag_over(d, Point::new(50.0, 190.0));
    assert_eq!(list.values.get(), ["C", "D", "E", "A", "B"]);
    assert_eq!(f.dnd.session().unwrap().target_index(), 3);

    f.drop_on(d, Point::new(50.0, 190.0));
    assert!(f.dnd.session().is_none());
    assert!(!f.doc.has_class(a, &dragging));
    assert!(!f.doc.has_class(b, &dragging));
}

#[test]
fn grabbing_an_unselected_node_drags_it_alone() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &LETTERS);
    f.register(&list, ParentConfig::new().with_multi_drag(true));
    let a = f.item(&list, "A");
    let b = f.item(&list, "B");
    let c = f.item(&list, "C");
    f.dnd.set_selection(&mut f.doc, list.el, &[a, b]).unwrap();

    f.native_start(c);
    assert_eq!(f.dnd.session().unwrap().dragged_values(), ["C"]);
}

#[test]
fn selection_is_ignored_without_multi_drag() {
    let mut f = Fixture::new();
    let list = f.list(0.0, &LETTERS);
    f.register(&list, ParentConfig::new());
    let a = f.item(&list, "A");
    let b = f.item(&list, "B");
    f.dnd.set_selection(&mut f.doc, list.el, &[a, b]).unwrap();
    assert!(f.doc.has_class(b, &ClassNames::default().selected));

    f.native_start(a);
    assert_eq!(f.dnd.session().unwrap().dragged_nodes().len(), 1);
}

#[test]
fn a_selection_transfers_in_index_order() {
    let mut f = Fixture::new();
    let a = f.list(0.0, &["Apple", "Banana", "Orange"]);
    let b = f.list(200.0, &["Cherry"]);
    let config = || {
        ParentConfig::new()
            .with_group("fruit")
            .with_multi_drag(true)
    };
    f.register(&a, config());
    f.register(&b, config());
    let apple = f.item(&a, "Apple");
    let orange = f.item(&a, "Orange");
    f.dnd
        .set_selection(&mut f.doc, a.el, &[orange, apple])
        .unwrap();

    f.native_start(orange);
    f.drag_over(b.el, Point::new(250.0, 300.0));
    assert_eq!(a.values.get(), ["Banana"]);
    assert_eq!(b.values.get(), ["Cherry", "Apple", "Orange"]);

    let session = f.dnd.session().unwrap();
    assert_eq!(session.current_parent(), b.el);
    assert_eq!(session.target_index(), 1);
    assert_eq!(session.dragged_node().index, 2);
}
