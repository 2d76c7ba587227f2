// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hue-sector conversions: HSV/HSL construction and hue extraction.

use core::f64::consts::{PI, TAU};

use crate::color::Color;

/// Width of one hue sector, `π/3`.
pub const PI_THIRDS: f64 = PI / 3.0;

/// How close the normalized middle channel must be to the maximum for
/// [`Color::hue_angle`] to snap to a secondary color.
pub const SECONDARY_TOLERANCE: f64 = 1.0 / 256.0;

/// Sector endpoints, closing the circle back at red.
const SECTORS: [Color; 7] = [
    Color::RED,
    Color::YELLOW,
    Color::GREEN,
    Color::CYAN,
    Color::BLUE,
    Color::MAGENTA,
    Color::RED,
];

/// Angles of the sector endpoints. Primaries sit at even indices.
const SECTOR_ANGLES: [f64; 6] = [
    0.0,
    PI_THIRDS,
    2.0 * PI_THIRDS,
    3.0 * PI_THIRDS,
    4.0 * PI_THIRDS,
    5.0 * PI_THIRDS,
];

/// Wraps a hue angle into `[0, 2π)` with a floored modulo.
///
/// Angles already in range are returned unchanged.
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    if (0.0..TAU).contains(&h) {
        return h;
    }
    let h = h % TAU;
    let h = if h < 0.0 { h + TAU } else { h };
    // `-tiny + TAU` can round up to exactly TAU.
    if h >= TAU { 0.0 } else { h }
}

/// The fully saturated color at hue `h`.
fn hue_color(h: f64) -> Color {
    let h = normalize_hue(h);
    let within = h % PI_THIRDS;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the floored quotient of a value in [0, 2π) by π/3 is in 0..=6"
    )]
    let sector = (libm::floor((h - within) / PI_THIRDS) as usize) % 6;
    SECTORS[sector].interpolate(&SECTORS[sector + 1], within / PI_THIRDS)
}

impl Color {
    /// Builds a color from hue (radians), saturation and value.
    ///
    /// Saturation blends from white toward the hue color, then value blends from
    /// black toward that result. The output has an alpha channel of `1.0`.
    #[must_use]
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let saturated = Self::WHITE.interpolate(&hue_color(h), s);
        Self::BLACK.interpolate(&saturated, v)
    }

    /// Builds a color from hue (radians), saturation and lightness.
    ///
    /// Below `l = 0.5` the hue color is blended up from black; at or above it is
    /// blended toward white. The gray lightness baseline is then blended toward
    /// that color by `s`.
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let hue = hue_color(h);
        let baseline = Self::BLACK.interpolate(&Self::WHITE, l);
        let lit = if l < 0.5 {
            Self::BLACK.interpolate(&hue, l / 0.5)
        } else {
            hue.interpolate(&Self::WHITE, (l - 0.5) / 0.5)
        };
        baseline.interpolate(&lit, s)
    }

    /// Returns the saturation magnitude `1 - min / max` of the RGB channels.
    ///
    /// Black (`max == 0`) has magnitude `0`.
    #[must_use]
    pub fn hue_magnitude(&self) -> f64 {
        let (_, max) = self.max_channel();
        if max <= 0.0 {
            return 0.0;
        }
        1.0 - self.min_channel() / max
    }

    /// Returns the hue angle in `[0, 2π)` that [`Color::from_hsv`] would need to
    /// produce this color.
    ///
    /// Black returns `0`. Colors whose middle channel equals their minimum return
    /// the angle of the primary holding the maximum; colors whose middle channel
    /// is within [`SECONDARY_TOLERANCE`] of the maximum (after subtracting the
    /// minimum) return the exact secondary angle.
    #[must_use]
    pub fn hue_angle(&self) -> f64 {
        let (top, max) = self.max_channel();
        if max <= 0.0 {
            return 0.0;
        }
        let rgb = [self.red(), self.green(), self.blue()];
        let min = self.min_channel();
        let chroma = max - min;
        let primary = 2 * top;
        if chroma <= 0.0 {
            return SECTOR_ANGLES[primary];
        }

        // Walking forward from the top channel (R→G→B→R) rotates the hue
        // counter-clockwise; the larger neighbour decides the direction.
        let next = (top + 1) % 3;
        let prev = (top + 2) % 3;
        let (mid, forward) = if rgb[next] >= rgb[prev] {
            (rgb[next], true)
        } else {
            (rgb[prev], false)
        };
        let t = (mid - min) / chroma;
        if t <= 0.0 {
            return SECTOR_ANGLES[primary];
        }
        if 1.0 - t < SECONDARY_TOLERANCE {
            let secondary = if forward { primary + 1 } else { primary + 5 };
            return SECTOR_ANGLES[secondary % 6];
        }
        let sign = if forward { 1.0 } else { -1.0 };
        normalize_hue(SECTOR_ANGLES[primary] + sign * t * PI_THIRDS)
    }

    /// Index and value of the largest RGB channel; ties go to the lowest index.
    fn max_channel(&self) -> (usize, f64) {
        let rgb = [self.red(), self.green(), self.blue()];
        let mut top = 0;
        for (i, &channel) in rgb.iter().enumerate().skip(1) {
            if channel > rgb[top] {
                top = i;
            }
        }
        (top, rgb[top])
    }

    fn min_channel(&self) -> f64 {
        self.red().min(self.green()).min(self.blue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Color, b: &Color, tol: f64) {
        for (x, y) in a.channels().iter().zip(b.channels()) {
            assert!((x - y).abs() < tol, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn normalize_hue_is_floored() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert!((normalize_hue(-PI_THIRDS) - 5.0 * PI_THIRDS).abs() < 1e-12);
        assert!((normalize_hue(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!(normalize_hue(-1e-18) < TAU);
    }

    #[test]
    fn hsv_primaries() {
        assert_close(&Color::from_hsv(0.0, 1.0, 1.0), &Color::RED, 1e-9);
        assert_close(
            &Color::from_hsv(2.0 * PI / 3.0, 1.0, 1.0),
            &Color::GREEN,
            1e-9,
        );
        assert_close(
            &Color::from_hsv(4.0 * PI / 3.0, 1.0, 1.0),
            &Color::BLUE,
            1e-9,
        );
    }

    #[test]
    fn hsv_negative_hue_wraps() {
        assert_close(
            &Color::from_hsv(-PI / 3.0, 1.0, 1.0),
            &Color::MAGENTA,
            1e-9,
        );
    }

    #[test]
    fn hsv_saturation_then_value() {
        assert_close(&Color::from_hsv(1.3, 0.0, 1.0), &Color::WHITE, 1e-12);
        assert_close(&Color::from_hsv(1.3, 1.0, 0.0), &Color::BLACK, 1e-12);
        let c = Color::from_hsv(0.0, 0.5, 0.5);
        assert_close(&c, &Color::rgba(0.5, 0.25, 0.25, 1.0), 1e-12);
    }

    #[test]
    fn hsl_lightness_bands() {
        assert_close(&Color::from_hsl(0.0, 1.0, 0.5), &Color::RED, 1e-12);
        assert_close(&Color::from_hsl(0.0, 1.0, 0.0), &Color::BLACK, 1e-12);
        assert_close(&Color::from_hsl(0.0, 1.0, 1.0), &Color::WHITE, 1e-12);
        assert_close(
            &Color::from_hsl(0.0, 1.0, 0.25),
            &Color::rgba(0.5, 0.0, 0.0, 1.0),
            1e-12,
        );
        assert_close(
            &Color::from_hsl(0.0, 1.0, 0.75),
            &Color::rgba(1.0, 0.5, 0.5, 1.0),
            1e-12,
        );
    }

    #[test]
    fn hsl_zero_saturation_is_gray() {
        assert_close(
            &Color::from_hsl(2.0, 0.0, 0.3),
            &Color::rgba(0.3, 0.3, 0.3, 1.0),
            1e-12,
        );
    }

    #[test]
    fn magnitude_of_black_and_white() {
        assert_eq!(Color::BLACK.hue_magnitude(), 0.0);
        assert_eq!(Color::BLACK.hue_angle(), 0.0);
        assert_eq!(Color::WHITE.hue_magnitude(), 0.0);
        assert_eq!(Color::WHITE.hue_angle(), 0.0);
    }

    #[test]
    fn primary_angles_when_mid_equals_min() {
        assert_eq!(Color::rgb(1.0, 0.2, 0.2).hue_angle(), 0.0);
        assert_eq!(Color::rgb(0.2, 1.0, 0.2).hue_angle(), 2.0 * PI_THIRDS);
        assert_eq!(Color::rgb(0.2, 0.2, 1.0).hue_angle(), 4.0 * PI_THIRDS);
    }

    #[test]
    fn secondary_angles_snap_within_tolerance() {
        assert_eq!(Color::rgb(1.0, 0.999, 0.0).hue_angle(), PI_THIRDS);
        assert_eq!(Color::rgb(0.0, 1.0, 1.0).hue_angle(), 3.0 * PI_THIRDS);
        assert_eq!(Color::rgb(1.0, 0.0, 1.0).hue_angle(), 5.0 * PI_THIRDS);
        // Outside the tolerance the fractional angle is kept.
        let a = Color::rgb(1.0, 0.9, 0.0).hue_angle();
        assert!((a - 0.9 * PI_THIRDS).abs() < 1e-12);
    }

    #[test]
    fn sign_rule_follows_larger_neighbour() {
        // Red max, blue ahead of green: between magenta and red.
        let a = Color::rgb(1.0, 0.0, 0.5).hue_angle();
        assert!((a - (TAU - 0.5 * PI_THIRDS)).abs() < 1e-12);
        // Green max, red ahead of blue: between yellow and green.
        let a = Color::rgb(0.5, 1.0, 0.0).hue_angle();
        assert!((a - 1.5 * PI_THIRDS).abs() < 1e-12);
        // Blue max, red ahead of green: between blue and magenta.
        let a = Color::rgb(0.5, 0.0, 1.0).hue_angle();
        assert!((a - 4.5 * PI_THIRDS).abs() < 1e-12);
    }
}
