// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owner-held value stores.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::fmt;

/// Access to the ordered values an owner keeps for one container.
///
/// The drag-and-drop core never owns data. It reads the current values before
/// each decision and reports the desired ordering through
/// [`set_values`](Self::set_values). Rendering the new ordering into the
/// document is the owner's job; the resulting child-list mutations are fed back
/// through [`DragController::handle_mutations`](crate::DragController::handle_mutations).
pub trait ValueStore<V> {
    /// Returns a snapshot of the current values.
    fn values(&self) -> Vec<V>;

    /// Replaces the values with `values`.
    fn set_values(&mut self, values: Vec<V>);
}

/// A shared, reference-counted vector of values.
///
/// Clone the handle before registering: the owner keeps one clone to render
/// from, the controller keeps another to read and write through.
///
/// ```
/// use understory_dnd::{SharedValues, ValueStore};
///
/// let owner = SharedValues::new(vec!["a", "b"]);
/// let mut store = owner.clone();
/// store.set_values(vec!["b", "a"]);
/// assert_eq!(owner.get(), vec!["b", "a"]);
/// ```
pub struct SharedValues<V>(Rc<RefCell<Vec<V>>>);

impl<V> SharedValues<V> {
    /// Creates a store holding `values`.
    #[must_use]
    pub fn new(values: Vec<V>) -> Self {
        Self(Rc::new(RefCell::new(values)))
    }

    /// Borrows the current values.
    pub fn borrow(&self) -> Ref<'_, Vec<V>> {
        self.0.borrow()
    }

    /// Replaces the current values.
    pub fn set(&self, values: Vec<V>) {
        *self.0.borrow_mut() = values;
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl<V: Clone> SharedValues<V> {
    /// Returns a copy of the current values.
    #[must_use]
    pub fn get(&self) -> Vec<V> {
        self.0.borrow().clone()
    }
}

impl<V> Clone for SharedValues<V> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<V: fmt::Debug> fmt::Debug for SharedValues<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedValues").field(&*self.0.borrow()).finish()
    }
}

impl<V: Clone> ValueStore<V> for SharedValues<V> {
    fn values(&self) -> Vec<V> {
        self.get()
    }

    fn set_values(&mut self, values: Vec<V>) {
        self.set(values);
    }
}

/// A getter/setter closure pair used as a [`ValueStore`].
///
/// This is the shape framework adapters usually have at hand: a way to read a
/// reactive array and a setter that schedules a re-render.
pub struct Accessors<G, S> {
    get: G,
    set: S,
}

impl<G, S> Accessors<G, S> {
    /// Wraps a getter and a setter.
    pub fn new(get: G, set: S) -> Self {
        Self { get, set }
    }
}

impl<G, S> fmt::Debug for Accessors<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessors").finish_non_exhaustive()
    }
}

impl<V, G, S> ValueStore<V> for Accessors<G, S>
where
    G: Fn() -> Vec<V>,
    S: FnMut(Vec<V>),
{
    fn values(&self) -> Vec<V> {
        (self.get)()
    }

    fn set_values(&mut self, values: Vec<V>) {
        (self.set)(values);
    }
}
