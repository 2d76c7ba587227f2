// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property keys recognized by the widgets, with the type each one stores.
//!
//! Setting a key with a different type stores it anyway, but the widget logs a
//! warning and falls back to its default. [`VALUE`] is the exception: a value
//! the widget cannot hold is refused.

/// The committed value. Type depends on the widget kind; see
/// [`Widget::value`](crate::Widget::value).
pub const VALUE: &str = "value";
/// Range minimum, `f64`.
pub const MIN: &str = "min";
/// Range maximum, `f64`.
pub const MAX: &str = "max";
/// Quantization or per-tick step, `f64`.
pub const STEP: &str = "step";
/// Decimal places a plain slider displays, `u8`.
pub const PRECISION: &str = "prec";
/// Whether a slider displays a percentage, `bool`.
pub const PERCENT: &str = "perc";
/// A button's or toggle's "on" value, [`Value`](crate::Value).
pub const TRUE: &str = "true";
/// A button's or toggle's "off" value, [`Value`](crate::Value).
pub const FALSE: &str = "false";
/// Scrubber zones per side, `u32`.
pub const ZONES: &str = "zones";
/// Scrubber timer period, [`Duration`](core::time::Duration).
pub const SPEED: &str = "speed";
/// Scrubber spring constant, `f64`.
pub const SPRING: &str = "spring";
/// Thermostat measured temperature, `f64`.
pub const READING: &str = "reading";
/// Thermostat dial deviation, `f64`.
pub const DEVIATION: &str = "deviation";
/// Thermostat cold band color, [`Color`](knobwork_color::Color).
pub const COLD: &str = "cold";
/// Thermostat temperate band color, [`Color`](knobwork_color::Color).
pub const TEMPERATE: &str = "temp";
/// Thermostat warm band color, [`Color`](knobwork_color::Color).
pub const WARM: &str = "warm";
/// Difference at which a thermostat turns from cold to temperate, `f64`.
pub const COLD_THRESHOLD: &str = "ct";
/// Difference at which a thermostat turns from temperate to warm, `f64`.
pub const WARM_THRESHOLD: &str = "tw";
