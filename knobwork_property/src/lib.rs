// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knobwork Property: the keyed value store every widget builds on.
//!
//! A [`PropertyStore`] maps string [`Key`]s to values of any `Clone + Debug`
//! type and owns exactly one change-notification channel.
//!
//! ## Notification rules
//!
//! - The default key, [`Key::VALUE`], holds the widget's committed domain value.
//!   Setting it always notifies listeners, once per set.
//! - Any other key (bounds, step, display mode, ...) notifies only when the
//!   caller asks for it with `emit = true`. Otherwise the set is silent and
//!   returns [`SetOutcome::Rederive`]: the owner should recompute its visual
//!   state, but no new domain value has been committed.
//! - Reading an unset key, or reading it as the wrong type, returns `None`.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use knobwork_property::{Key, PropertyStore, SetOutcome};
//!
//! let mut store = PropertyStore::new()
//!     .with("min", 1.0_f64)
//!     .with("max", 10.0_f64);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! store.subscribe(move |change| sink.borrow_mut().push(change.key().clone()));
//!
//! store.set_value(5.0_f64);
//! assert_eq!(store.set("max", 20.0_f64, false), SetOutcome::Rederive);
//! assert_eq!(store.set("step", 0.5_f64, true), SetOutcome::Notified);
//!
//! assert_eq!(*seen.borrow(), [Key::VALUE, Key::from("step")]);
//! assert_eq!(store.get::<f64>("max"), Some(&20.0));
//! assert_eq!(store.get::<f64>("unset"), None);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod change;
mod key;
mod store;
mod value;

pub use change::{Change, ListenerId, SetOutcome};
pub use key::Key;
pub use store::PropertyStore;
pub use value::ErasedValue;
