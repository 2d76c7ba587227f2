// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions to and from `peniko::Color`.

use crate::color::Color;

impl From<Color> for peniko::Color {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "peniko stores f32 components; the precision loss is intended"
    )]
    fn from(color: Color) -> Self {
        Self::new([
            color.red() as f32,
            color.green() as f32,
            color.blue() as f32,
            color.alpha() as f32,
        ])
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let [r, g, b, a] = color.components;
        Self::rgba(f64::from(r), f64::from(g), f64::from(b), f64::from(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_gains_opaque_alpha() {
        let p: peniko::Color = Color::rgb(0.5, 0.25, 1.0).into();
        assert_eq!(p.components, [0.5, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn peniko_round_trip_keeps_exact_fractions() {
        let c = Color::rgba(0.5, 0.25, 0.125, 0.75);
        let back = Color::from(peniko::Color::from(c));
        assert_eq!(back, c);
    }
}
