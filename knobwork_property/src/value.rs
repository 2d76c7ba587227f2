// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased property values.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

/// A property value of any `Clone + Debug + 'static` type.
///
/// The value keeps its [`TypeId`] for checked downcasts and forwards `Debug`
/// to the inner value, so change logs show what was actually stored.
///
/// ```rust
/// use knobwork_property::ErasedValue;
///
/// let value = ErasedValue::new(0.25_f64);
/// assert!(value.is::<f64>());
/// assert_eq!(value.downcast_ref::<f64>(), Some(&0.25));
/// assert_eq!(value.downcast_ref::<f32>(), None);
/// assert_eq!(format!("{value:?}"), "0.25");
/// ```
pub struct ErasedValue {
    inner: Box<dyn StoredValue>,
}

impl ErasedValue {
    /// Wraps a concrete value.
    #[must_use]
    pub fn new<T: Clone + fmt::Debug + 'static>(value: T) -> Self {
        Self {
            inner: Box::new(value),
        }
    }

    /// Returns the [`TypeId`] of the wrapped value.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.inner.as_any().type_id()
    }

    /// Returns `true` if the wrapped value is a `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.as_any().is::<T>()
    }

    /// Returns the wrapped value as a `T`, or `None` on a type mismatch.
    #[must_use]
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref()
    }
}

impl Clone for ErasedValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
        }
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_value(f)
    }
}

trait StoredValue: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn StoredValue>;
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: Clone + fmt::Debug + 'static> StoredValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn StoredValue> {
        Box::new(self.clone())
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
