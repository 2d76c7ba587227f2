// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knobwork Color: a small channel-wise color value type for interactive controls.
//!
//! [`Color`] is an immutable sequence of three (RGB) or four (RGBA) fractional
//! channel intensities in `[0, 1]`. Every operation returns a new value.
//!
//! ## Hue sectors
//!
//! Hue-based constructors split the hue circle into six sectors of width `π/3`,
//! anchored at the pure and secondary colors:
//!
//! ```text
//! Red → Yellow → Green → Cyan → Blue → Magenta → Red
//! 0     π/3      2π/3    π      4π/3   5π/3      2π
//! ```
//!
//! A hue selects a sector and a fractional position inside it; the sector's two
//! endpoint colors are blended by that fraction. [`Color::from_hsv`] then blends
//! toward white by `1 - s` and toward black by `1 - v`. [`Color::from_hsl`] uses a
//! black→white lightness baseline instead.
//!
//! [`Color::hue_angle`] and [`Color::hue_magnitude`] go the other way, recovering
//! the angle and saturation that drive a color wheel from a stored color.
//!
//! ## Example
//!
//! ```rust
//! use core::f64::consts::PI;
//! use knobwork_color::Color;
//!
//! let green = Color::from_hsv(2.0 * PI / 3.0, 1.0, 1.0);
//! assert_eq!(green.to_rgb8(), [0, 255, 0]);
//!
//! let pale = Color::from_hsv(PI, 0.5, 1.0);
//! assert!((pale.hue_angle() - PI).abs() < 1e-9);
//! assert!((pale.hue_magnitude() - 0.5).abs() < 1e-9);
//!
//! let half = Color::BLACK.interpolate(&Color::WHITE, 0.5);
//! assert_eq!(half.css_rgb(), "rgb(127, 127, 127)");
//! ```
//!
//! ## Features
//!
//! - `peniko`: conversions to and from `peniko::Color`.
//! - `serde`: `Serialize`/`Deserialize` for [`Color`].
//!
//! This crate is `no_std` and uses `alloc`; float math goes through `libm`.

#![no_std]

extern crate alloc;

mod color;
mod hue;
#[cfg(feature = "peniko")]
mod interop;

pub use color::{Color, interpolate};
pub use hue::{PI_THIRDS, SECONDARY_TOLERANCE, normalize_hue};
