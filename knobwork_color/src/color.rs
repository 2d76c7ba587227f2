// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Color`] value type and channel-wise interpolation.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// Maximum number of channels a [`Color`] can carry.
const MAX_CHANNELS: usize = 4;

/// An immutable RGB or RGBA color with fractional channels.
///
/// Channels are nominally in `[0, 1]`, but nothing clamps them: arithmetic such
/// as [`Color::interpolate`] with `t` outside `[0, 1]` can push channels out of
/// range, and display conversions saturate at that point.
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    channels: [f64; MAX_CHANNELS],
    len: u8,
}

impl Color {
    /// Opaque red.
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgba(1.0, 1.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgba(0.0, 1.0, 0.0, 1.0);
    /// Opaque cyan.
    pub const CYAN: Self = Self::rgba(0.0, 1.0, 1.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::rgba(1.0, 0.0, 1.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    /// Creates a three-channel color from fractional channels.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            channels: [r, g, b, 0.0],
            len: 3,
        }
    }

    /// Creates a four-channel color from fractional channels.
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            channels: [r, g, b, a],
            len: 4,
        }
    }

    /// Creates a color from a slice of three or four channels.
    ///
    /// Returns `None` for any other length.
    #[must_use]
    pub fn from_channels(channels: &[f64]) -> Option<Self> {
        match *channels {
            [r, g, b] => Some(Self::rgb(r, g, b)),
            [r, g, b, a] => Some(Self::rgba(r, g, b, a)),
            _ => None,
        }
    }

    /// Creates a three-channel color from 8-bit integers.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Creates a four-channel color from 8-bit integers.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Returns the channels as a slice of length 3 or 4.
    #[must_use]
    #[inline]
    pub fn channels(&self) -> &[f64] {
        &self.channels[..usize::from(self.len)]
    }

    /// Returns the number of channels (3 or 4).
    #[must_use]
    #[inline]
    pub fn channel_count(&self) -> usize {
        usize::from(self.len)
    }

    /// Returns `true` if this color carries an alpha channel.
    #[must_use]
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.len == 4
    }

    /// Red channel.
    #[must_use]
    #[inline]
    pub fn red(&self) -> f64 {
        self.channels[0]
    }

    /// Green channel.
    #[must_use]
    #[inline]
    pub fn green(&self) -> f64 {
        self.channels[1]
    }

    /// Blue channel.
    #[must_use]
    #[inline]
    pub fn blue(&self) -> f64 {
        self.channels[2]
    }

    /// Alpha channel, or `1.0` for a three-channel color.
    #[must_use]
    #[inline]
    pub fn alpha(&self) -> f64 {
        if self.has_alpha() {
            self.channels[3]
        } else {
            1.0
        }
    }

    /// Blends channel-wise toward `other`: `self * (1 - t) + other * t`.
    ///
    /// Only the channels both colors share are blended, so the result has the
    /// shorter of the two channel counts. `t` is not clamped.
    #[must_use]
    pub fn interpolate(&self, other: &Self, t: f64) -> Self {
        let len = self.len.min(other.len);
        let mut channels = [0.0; MAX_CHANNELS];
        for (i, out) in channels.iter_mut().enumerate().take(usize::from(len)) {
            *out = other.channels[i] * t + self.channels[i] * (1.0 - t);
        }
        Self { channels, len }
    }

    /// Converts to 8-bit channels, truncating toward zero.
    ///
    /// Out-of-range channels saturate at 0 and 255.
    #[must_use]
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.red()),
            channel_to_u8(self.green()),
            channel_to_u8(self.blue()),
        ]
    }

    /// Formats as a CSS `rgb(r, g, b)` string with truncated 8-bit channels.
    #[must_use]
    pub fn css_rgb(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgb({r}, {g}, {b})")
    }

    /// Formats as a CSS `rgba(r, g, b, a)` string.
    ///
    /// The color channels are truncated 8-bit values; alpha stays fractional.
    #[must_use]
    pub fn css_rgba(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgba({r}, {g}, {b}, {})", self.alpha())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Color").field(&self.channels()).finish()
    }
}

/// Blends `a` toward `b` by `t`; see [`Color::interpolate`].
#[must_use]
pub fn interpolate(a: &Color, b: &Color, t: f64) -> Color {
    a.interpolate(b, t)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to u8 casts saturate; truncation toward zero is the display contract"
)]
fn channel_to_u8(channel: f64) -> u8 {
    (channel * 255.0) as u8
}
