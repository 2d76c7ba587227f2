// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived display properties.

use alloc::string::String;

use knobwork_color::Color;
use kurbo::Vec2;

/// What a rendering surface needs to draw a widget.
///
/// Widgets re-derive this after every sample, commit and property change.
/// Fields a widget kind does not use stay at their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayState {
    /// Normalized fill or dial position.
    ///
    /// Sliders and thermostats use `[0, 1]`; scrubbers report their signed
    /// deflection in `[-1, 1]`.
    pub percent: f64,
    /// Detail text, such as a formatted slider value.
    pub text: Option<String>,
    /// Detail color: the slider color variants, the color wheel's pending
    /// color and the thermostat band.
    pub color: Option<Color>,
    /// Color wheel handle in normalized wheel space.
    pub handle: Option<Vec2>,
    /// Whether a button or toggle currently shows its `true` value.
    pub on: bool,
    /// The scrubber's velocity zone.
    pub zone: i32,
}
