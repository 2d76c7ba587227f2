// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed widget values.

use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use knobwork_color::Color;

/// A value a widget can commit.
///
/// Buttons and toggles commit whichever of their configured `true`/`false`
/// values applies, so those are arbitrary [`Value`]s. Numeric widgets commit
/// [`Value::Number`], the color wheel [`Value::Color`] and select buttons a
/// [`Value::List`] of the selected options' values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// A color.
    Color(Color),
    /// An ordered list of values.
    List(Vec<Self>),
}

impl Value {
    /// Returns the boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the color, if this is one.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts a dynamically typed property into a value, if its type is one
    /// a widget can commit.
    pub(crate) fn from_any(any: &dyn Any) -> Option<Self> {
        if let Some(v) = any.downcast_ref::<Self>() {
            Some(v.clone())
        } else if let Some(&n) = any.downcast_ref::<f64>() {
            Some(Self::Number(n))
        } else if let Some(&n) = any.downcast_ref::<f32>() {
            Some(Self::Number(f64::from(n)))
        } else if let Some(&n) = any.downcast_ref::<i32>() {
            Some(Self::Number(f64::from(n)))
        } else if let Some(&n) = any.downcast_ref::<u32>() {
            Some(Self::Number(f64::from(n)))
        } else if let Some(&b) = any.downcast_ref::<bool>() {
            Some(Self::Bool(b))
        } else if let Some(&c) = any.downcast_ref::<Color>() {
            Some(Self::Color(c))
        } else if let Some(&s) = any.downcast_ref::<&'static str>() {
            Some(Self::from(s))
        } else if let Some(s) = any.downcast_ref::<String>() {
            Some(Self::Text(s.clone()))
        } else {
            any.downcast_ref::<Vec<Self>>().map(|items| Self::List(items.clone()))
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Color(c) => f.write_str(&c.css_rgb()),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
