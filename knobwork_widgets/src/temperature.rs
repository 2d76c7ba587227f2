// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A kelvin-backed temperature value.

use core::ops::{Add, AddAssign, Sub, SubAssign};

const CELSIUS_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 459.67;

/// A temperature stored in kelvin.
///
/// Thermostat widgets take plain numbers in whatever unit the host shows;
/// this type converts between those units.
///
/// ```rust
/// use knobwork_widgets::Temperature;
///
/// let t = Temperature::from_celsius(21.5);
/// assert!((t.to_fahrenheit() - 70.7).abs() < 1e-9);
/// assert!((t.to_halc() - 43.0).abs() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Temperature {
    kelvin: f64,
}

impl Temperature {
    /// Creates a temperature from kelvin.
    #[must_use]
    pub const fn from_kelvin(kelvin: f64) -> Self {
        Self { kelvin }
    }

    /// Creates a temperature from degrees Celsius.
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self::from_kelvin(celsius + CELSIUS_OFFSET)
    }

    /// Creates a temperature from degrees Fahrenheit.
    #[must_use]
    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        Self::from_kelvin((fahrenheit + FAHRENHEIT_OFFSET) * 5.0 / 9.0)
    }

    /// Creates a temperature from half-degrees Celsius ("halc").
    #[must_use]
    pub fn from_halc(halc: f64) -> Self {
        Self::from_celsius(halc / 2.0)
    }

    /// Kelvin.
    #[must_use]
    pub const fn to_kelvin(self) -> f64 {
        self.kelvin
    }

    /// Degrees Celsius.
    #[must_use]
    pub fn to_celsius(self) -> f64 {
        self.kelvin - CELSIUS_OFFSET
    }

    /// Degrees Fahrenheit.
    #[must_use]
    pub fn to_fahrenheit(self) -> f64 {
        self.kelvin * 9.0 / 5.0 - FAHRENHEIT_OFFSET
    }

    /// Half-degrees Celsius.
    #[must_use]
    pub fn to_halc(self) -> f64 {
        self.to_celsius() * 2.0
    }
}

impl Add for Temperature {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_kelvin(self.kelvin + rhs.kelvin)
    }
}

impl AddAssign for Temperature {
    fn add_assign(&mut self, rhs: Self) {
        self.kelvin += rhs.kelvin;
    }
}

impl Sub for Temperature {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_kelvin(self.kelvin - rhs.kelvin)
    }
}

impl SubAssign for Temperature {
    fn sub_assign(&mut self, rhs: Self) {
        self.kelvin -= rhs.kelvin;
    }
}
