// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-widget keyed property storage.
//!
//! Entries live in a sorted `SmallVec` searched with binary search: widgets
//! carry a handful of keys (value, bounds, step, display flags), so contiguous
//! storage beats a hash map and stays inline without allocating.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::change::{Change, ListenerId, SetOutcome};
use crate::key::Key;
use crate::value::ErasedValue;

/// Most widgets set fewer than this many keys.
const INLINE_CAPACITY: usize = 8;

type Listener = Box<dyn FnMut(&Change<'_>)>;

/// A keyed property store with a single change-notification channel.
///
/// See the [crate documentation](crate) for the notification rules.
pub struct PropertyStore {
    /// Sorted by key for binary search.
    entries: SmallVec<[(Key, ErasedValue); INLINE_CAPACITY]>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u32,
}

impl PropertyStore {
    /// Creates an empty store with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Builder form of [`PropertyStore::insert`].
    #[must_use]
    pub fn with<T: Clone + fmt::Debug + 'static>(mut self, key: impl Into<Key>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Stores a value without notifying anyone, even for [`Key::VALUE`].
    ///
    /// Meant for seeding a store during construction, before the owner has a
    /// committed value to announce.
    pub fn insert<T: Clone + fmt::Debug + 'static>(&mut self, key: impl Into<Key>, value: T) {
        self.put(key.into(), ErasedValue::new(value));
    }

    /// Returns the number of keys with a value.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key has a value.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns `true` if `key` has a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_ok()
    }

    /// Returns the type-erased value for `key`.
    #[must_use]
    pub fn get_erased(&self, key: &str) -> Option<&ErasedValue> {
        self.find(key).ok().map(|i| &self.entries[i].1)
    }

    /// Returns the value for `key` as a `T`.
    ///
    /// Unset keys and type mismatches both return `None`.
    #[must_use]
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.get_erased(key).and_then(ErasedValue::downcast_ref)
    }

    /// Returns the value for `key` as a `T`, or `default` when absent.
    #[must_use]
    pub fn get_or<T: Clone + 'static>(&self, key: &str, default: T) -> T {
        self.get::<T>(key).cloned().unwrap_or(default)
    }

    /// Returns the committed value stored under [`Key::VALUE`].
    #[must_use]
    pub fn value<T: 'static>(&self) -> Option<&T> {
        self.get(Key::VALUE.as_str())
    }

    /// Commits a new value under [`Key::VALUE`] and notifies listeners.
    pub fn set_value<T: Clone + fmt::Debug + 'static>(&mut self, value: T) {
        self.set(Key::VALUE, value, true);
    }

    /// Sets `key` to `value`.
    ///
    /// [`Key::VALUE`] always notifies. Other keys notify only when `emit` is
    /// `true`; otherwise the set is silent and the caller is told to re-derive.
    pub fn set<T: Clone + fmt::Debug + 'static>(
        &mut self,
        key: impl Into<Key>,
        value: T,
        emit: bool,
    ) -> SetOutcome {
        let key = key.into();
        let notify = emit || key.is_value();
        let index = self.put(key, ErasedValue::new(value));
        if notify {
            self.emit_at(index);
            SetOutcome::Notified
        } else {
            SetOutcome::Rederive
        }
    }

    /// Notifies listeners about the current value of `key` without changing it.
    ///
    /// Returns `false` if `key` is unset.
    pub fn notify(&mut self, key: &str) -> bool {
        match self.find(key) {
            Ok(index) => {
                self.emit_at(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes `key` silently. Returns `true` if it had a value.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.find(key) {
            Ok(index) => {
                self.entries.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Registers a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&Change<'_>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a change listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    fn find(&self, key: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.as_str().cmp(key))
    }

    fn put(&mut self, key: Key, value: ErasedValue) -> usize {
        match self.find(key.as_str()) {
            Ok(index) => {
                self.entries[index].1 = value;
                index
            }
            Err(index) => {
                self.entries.insert(index, (key, value));
                index
            }
        }
    }

    fn emit_at(&mut self, index: usize) {
        let (key, value) = &self.entries[index];
        log::debug!("property {key} changed to {value:?}");
        let change = Change::new(key, value);
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyStore")
            .field("entries", &self.entries)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
