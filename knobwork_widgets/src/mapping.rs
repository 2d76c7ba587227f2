// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure mappings from a pointer position to a candidate value.
//!
//! Each function here is stateless; the widgets in this crate call them from
//! their gesture handling, and hosts can call them directly to preview values.
//! Positions and bounds share one coordinate space with `y` growing downward,
//! so vertical controls put their minimum at the bottom edge.

use alloc::format;
use alloc::string::String;
use core::f64::consts::{FRAC_PI_2, PI};

use knobwork_color::Color;
use kurbo::{Point, Rect, Vec2};

/// Orientation of a linear control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Minimum at the left edge.
    Horizontal,
    /// Minimum at the bottom edge.
    #[default]
    Vertical,
}

/// `(low, high, point)` along `axis`, with vertical positions flipped so the
/// bottom edge is `low`.
fn span(axis: Axis, bounds: Rect, position: Point) -> (f64, f64, f64) {
    match axis {
        Axis::Horizontal => (bounds.x0, bounds.x1, position.x),
        Axis::Vertical => (bounds.y0, bounds.y1, bounds.y1 - position.y + bounds.y0),
    }
}

/// Fraction of the way along `axis` that `position` lies, clamped to `[0, 1]`.
///
/// Degenerate bounds give `0`.
#[must_use]
pub fn slider_fraction(axis: Axis, bounds: Rect, position: Point) -> f64 {
    let (low, high, point) = span(axis, bounds, position);
    if high <= low {
        return 0.0;
    }
    ((point - low) / (high - low)).clamp(0.0, 1.0)
}

/// Snaps `value` to a multiple of `step`, rounding half up.
///
/// The remainder is taken with a truncating modulo, so the grid is anchored at
/// zero rather than at the control's minimum. A non-positive `step` leaves the
/// value unchanged.
#[must_use]
pub fn quantize(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return value;
    }
    let remainder = value % step;
    let snapped = value - remainder;
    if remainder >= step / 2.0 {
        snapped + step
    } else {
        snapped
    }
}

/// Maps a pointer position to a quantized slider value in `[min, max]`.
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use knobwork_widgets::mapping::{Axis, slider_value};
///
/// let bounds = Rect::new(0.0, 0.0, 100.0, 10.0);
/// let v = slider_value(Axis::Horizontal, bounds, Point::new(50.0, 5.0), 0.0, 10.0, 1.0);
/// assert_eq!(v, 5.0);
/// // Outside the bounds the value pins to the ends.
/// let v = slider_value(Axis::Horizontal, bounds, Point::new(-20.0, 5.0), 0.0, 10.0, 1.0);
/// assert_eq!(v, 0.0);
/// ```
#[must_use]
pub fn slider_value(
    axis: Axis,
    bounds: Rect,
    position: Point,
    min: f64,
    max: f64,
    step: f64,
) -> f64 {
    let raw = min + slider_fraction(axis, bounds, position) * (max - min);
    clamp_range(quantize(raw, step), min, max)
}

/// Fraction of `[min, max]` that `value` covers; `0` for an empty range.
#[must_use]
pub fn range_fraction(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// Clamps `value` to `[min, max]`, tolerating an inverted range.
#[must_use]
pub fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Formats a slider value for display.
///
/// With `percent`, shows the truncated integer percentage of `fraction`.
/// Otherwise shows `value` truncated toward zero to `precision` decimals.
#[must_use]
pub fn format_value(value: f64, fraction: f64, precision: u8, percent: bool) -> String {
    if percent {
        format!("{}%", libm::trunc(fraction * 100.0))
    } else {
        let scale = libm::pow(10.0, f64::from(precision));
        format!("{}", libm::trunc(value * scale) / scale)
    }
}

/// A pointer position normalized against a color wheel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelPoint {
    /// Offset from the center, `-1` at the left edge, `1` at the right.
    pub x: f64,
    /// Offset from the center, `-1` at the bottom edge, `1` at the top.
    pub y: f64,
    /// Distance from the center, at most `1`.
    pub magnitude: f64,
}

impl WheelPoint {
    /// Normalizes `position` against `bounds`.
    ///
    /// Points outside the unit circle are projected onto it.
    #[must_use]
    pub fn from_position(bounds: Rect, position: Point) -> Self {
        let center = bounds.center();
        let half_w = bounds.width() / 2.0;
        let half_h = bounds.height() / 2.0;
        let mut x = if half_w > 0.0 {
            (position.x - center.x) / half_w
        } else {
            0.0
        };
        let mut y = if half_h > 0.0 {
            (center.y - position.y) / half_h
        } else {
            0.0
        };
        let mut magnitude = libm::hypot(x, y);
        if magnitude > 1.0 {
            x /= magnitude;
            y /= magnitude;
            magnitude = 1.0;
        }
        Self { x, y, magnitude }
    }

    /// Hue angle of this point, counter-clockwise from the positive x axis.
    ///
    /// The center maps to `0`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        if self.x == 0.0 {
            if self.y > 0.0 {
                FRAC_PI_2
            } else if self.y < 0.0 {
                -FRAC_PI_2
            } else {
                0.0
            }
        } else if self.x < 0.0 {
            libm::atan(self.y / self.x) + PI
        } else {
            libm::atan(self.y / self.x)
        }
    }

    /// The fully bright color at this point: hue from the angle, saturation
    /// from the magnitude.
    #[must_use]
    pub fn color(&self) -> Color {
        Color::from_hsv(self.angle(), self.magnitude, 1.0)
    }
}

/// Where the handle for `color` sits on a color wheel, in the same normalized
/// space as [`WheelPoint`].
#[must_use]
pub fn wheel_position(color: &Color) -> Vec2 {
    let angle = color.hue_angle();
    let magnitude = color.hue_magnitude();
    Vec2::new(libm::cos(angle) * magnitude, libm::sin(angle) * magnitude)
}

/// Signed offset of `position` from the center of `bounds` along `axis`, in
/// half-extents: `-1` at the low edge, `1` at the high edge.
///
/// Degenerate bounds give `0`.
#[must_use]
pub fn scrub_offset(axis: Axis, bounds: Rect, position: Point) -> f64 {
    let (dist, point) = match axis {
        Axis::Horizontal => {
            let dist = bounds.width() / 2.0;
            (dist, position.x - (bounds.x0 + dist))
        }
        Axis::Vertical => {
            let dist = bounds.height() / 2.0;
            (dist, (bounds.y0 + dist) - position.y)
        }
    };
    if dist == 0.0 { 0.0 } else { point / dist }
}

/// Scrubber deflection after the spring: `offset / spring` clamped to `[-1, 1]`.
#[must_use]
pub fn scrub_deflection(offset: f64, spring: f64) -> f64 {
    let deflection = offset / spring;
    if deflection.is_nan() {
        return 0.0;
    }
    deflection.clamp(-1.0, 1.0)
}

/// The velocity zone for a deflection: rounded to the nearest of
/// `-zones..=zones`, halves rounding up.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "deflection is in [-1, 1], so the result is within ±zones"
)]
pub fn scrub_zone(deflection: f64, zones: u32) -> i32 {
    libm::floor(deflection * f64::from(zones) + 0.5) as i32
}

/// One scrubber timer tick: `pending + zone * step`, clamped to `[min, max]`.
#[must_use]
pub fn scrub_step(pending: f64, zone: i32, step: f64, min: f64, max: f64) -> f64 {
    clamp_range(pending + f64::from(zone) * step, min, max)
}

/// Which color band a thermostat shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// The reading is below the setpoint by more than the cold threshold.
    Cold,
    /// The reading is near the setpoint.
    Temperate,
    /// The reading is above the setpoint by at least the warm threshold.
    Warm,
}

impl Band {
    /// Classifies `reading - setpoint`.
    ///
    /// `Warm` at or above `warm_threshold`, `Temperate` at or above
    /// `cold_threshold`, `Cold` below it.
    #[must_use]
    pub fn classify(difference: f64, cold_threshold: f64, warm_threshold: f64) -> Self {
        if difference >= warm_threshold {
            Self::Warm
        } else if difference >= cold_threshold {
            Self::Temperate
        } else {
            Self::Cold
        }
    }
}

/// Thermostat dial position in `[0, 1]`; `0.5` when the reading equals the
/// setpoint and the ends at `±deviation`.
#[must_use]
pub fn thermostat_dial(difference: f64, deviation: f64) -> f64 {
    let dial = difference / deviation / 2.0 + 0.5;
    if dial.is_nan() {
        return 0.5;
    }
    dial.clamp(0.0, 1.0)
}

/// Display color of a color-temperature slider at `fraction` of its range.
///
/// Warm orange fades to white over the first 85%, then white to a cool blue.
#[must_use]
pub fn color_temperature_detail(fraction: f64) -> Color {
    let orange = Color::from_rgb8(250, 160, 100);
    let white = Color::rgb(1.0, 1.0, 1.0);
    let blue = Color::from_rgb8(190, 200, 255);
    if fraction < 0.85 {
        orange.interpolate(&white, fraction / 0.85)
    } else {
        white.interpolate(&blue, (fraction - 0.85) / 0.15)
    }
}

/// Display color of a color-light slider: black to white across the range.
#[must_use]
pub fn color_light_detail(fraction: f64) -> Color {
    Color::rgb(0.0, 0.0, 0.0).interpolate(&Color::rgb(1.0, 1.0, 1.0), fraction)
}
