// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::key::Key;
use crate::value::ErasedValue;

/// A change notification, delivered to every listener of a store.
#[derive(Clone, Copy, Debug)]
pub struct Change<'a> {
    key: &'a Key,
    value: &'a ErasedValue,
}

impl<'a> Change<'a> {
    pub(crate) fn new(key: &'a Key, value: &'a ErasedValue) -> Self {
        Self { key, value }
    }

    /// The key that changed.
    #[must_use]
    pub fn key(&self) -> &'a Key {
        self.key
    }

    /// The new value, type-erased.
    #[must_use]
    pub fn value(&self) -> &'a ErasedValue {
        self.value
    }

    /// The new value as a `T`, or `None` on a type mismatch.
    #[must_use]
    pub fn value_as<T: 'static>(&self) -> Option<&'a T> {
        self.value.downcast_ref()
    }
}

/// Handle returned by [`PropertyStore::subscribe`](crate::PropertyStore::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// What a [`PropertyStore::set`](crate::PropertyStore::set) did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// Listeners were notified of the change.
    Notified,
    /// The set was silent; the owner should re-derive its visual state.
    Rederive,
}
