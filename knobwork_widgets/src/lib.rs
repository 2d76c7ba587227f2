// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knobwork Widgets: value-producing interactive controls.
//!
//! A [`Widget`] is a button, toggle, slider, color wheel, thermostat, scrubber
//! or group of select buttons. Each one reduces raw input to samples with a
//! [`GestureUnifier`](knobwork_gesture::GestureUnifier), maps sample positions
//! to a pending value with the functions in [`mapping`], and commits values
//! into a [`PropertyStore`](knobwork_property::PropertyStore) that notifies
//! listeners.
//!
//! ## Commit rules
//!
//! - Buttons commit their `true` value on press and their `false` value when
//!   the last pointer lifts.
//! - Toggles flip once per gesture, when it ends on the widget.
//! - Sliders, color wheels and scrubbers update a pending value while dragged
//!   and commit it on the terminal sample. Mouse and touch share that pending
//!   value; whichever wrote last wins.
//! - Scrubbers step their pending value on every tick of a repeating timer
//!   while deflected out of the neutral zone.
//! - Thermostats take no input and display a setpoint against a reading.
//!
//! Configuration lives in the same store under the names in [`keys`]; setting
//! those re-derives the [`DisplayState`] without committing a value.
//!
//! ## Hosts
//!
//! The host supplies bounds, forwards events with [`Widget::handle`], and
//! implements [`CaptureHost`](knobwork_gesture::CaptureHost) for window-level
//! capture and [`TimerHost`](knobwork_timing::TimerHost) for scrubber timers,
//! calling [`Widget::tick`] when a timer fires.
//!
//! ## Features
//!
//! - `std` (enabled by default): use the Rust standard library.
//! - `libm`: float math through `libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for the options structs and [`Value`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

pub mod keys;
pub mod mapping;

mod display;
mod options;
mod select;
mod temperature;
mod value;
mod widget;

pub use display::DisplayState;
pub use options::{
    ButtonOptions, ColorWheelOptions, OptionsError, ScrubberOptions, SelectOptions,
    SliderOptions, SliderVariant, ThermostatOptions, ToggleOptions, ToggleStyle,
};
pub use select::SelectOption;
pub use temperature::Temperature;
pub use value::Value;
pub use widget::{Dispatch, ValueTypeError, Widget, WidgetKind};
