// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options for each widget kind.
//!
//! Every options struct implements [`Default`] with the stock configuration
//! and has `with_*` builders. [`validate`](SliderOptions::validate) reports
//! malformed settings; widget constructors never fail and instead normalize
//! them, logging a warning.

use core::fmt;
use core::time::Duration;

use knobwork_color::Color;

use crate::mapping::Axis;
use crate::value::Value;

/// A malformed option value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OptionsError {
    /// `min` is greater than `max`.
    InvertedRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// `step` is zero, negative or not finite.
    NonPositiveStep(f64),
    /// The scrubber spring is zero, negative or not finite.
    NonPositiveSpring(f64),
    /// The thermostat deviation is zero, negative or not finite.
    NonPositiveDeviation(f64),
    /// The cold threshold is above the warm threshold.
    InvertedThresholds {
        /// Configured cold threshold.
        cold: f64,
        /// Configured warm threshold.
        warm: f64,
    },
    /// A scrubber needs at least one zone on each side.
    NoZones,
    /// The scrubber timer period is zero.
    ZeroSpeed,
    /// Select buttons must allow at least one selection.
    NoSelections,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvertedRange { min, max } => {
                write!(f, "minimum {min} is greater than maximum {max}")
            }
            Self::NonPositiveStep(step) => write!(f, "step {step} must be positive"),
            Self::NonPositiveSpring(spring) => write!(f, "spring {spring} must be positive"),
            Self::NonPositiveDeviation(dev) => write!(f, "deviation {dev} must be positive"),
            Self::InvertedThresholds { cold, warm } => write!(
                f,
                "cold threshold {cold} is greater than warm threshold {warm}"
            ),
            Self::NoZones => f.write_str("scrubber needs at least one zone"),
            Self::ZeroSpeed => f.write_str("scrubber speed must be non-zero"),
            Self::NoSelections => f.write_str("select buttons must allow a selection"),
        }
    }
}

impl core::error::Error for OptionsError {}

fn positive(v: f64) -> bool {
    v > 0.0 && v.is_finite()
}

fn check_range(min: f64, max: f64) -> Result<(), OptionsError> {
    if min > max {
        Err(OptionsError::InvertedRange { min, max })
    } else {
        Ok(())
    }
}

fn check_step(step: f64) -> Result<(), OptionsError> {
    if positive(step) {
        Ok(())
    } else {
        Err(OptionsError::NonPositiveStep(step))
    }
}

/// Swaps an inverted range, logging a warning.
fn normalize_range(min: &mut f64, max: &mut f64) {
    if *min > *max {
        log::warn!("swapping inverted range {min}..{max}");
        core::mem::swap(min, max);
    }
}

/// Replaces a non-positive step with `fallback`, logging a warning.
fn normalize_step(step: &mut f64, fallback: f64) {
    if !positive(*step) {
        log::warn!("replacing step {step} with {fallback}");
        *step = fallback;
    }
}

/// Options for a momentary button.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonOptions {
    /// Value committed while pressed.
    pub true_value: Value,
    /// Value committed while released.
    pub false_value: Value,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            true_value: Value::Bool(true),
            false_value: Value::Bool(false),
        }
    }
}

impl ButtonOptions {
    /// Sets the pressed value.
    #[must_use]
    pub fn with_true_value(mut self, value: impl Into<Value>) -> Self {
        self.true_value = value.into();
        self
    }

    /// Sets the released value.
    #[must_use]
    pub fn with_false_value(mut self, value: impl Into<Value>) -> Self {
        self.false_value = value.into();
        self
    }
}

/// How a toggle presents itself. Behavior is identical.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToggleStyle {
    /// An on/off power switch.
    #[default]
    Switch,
    /// A checkbox.
    Checkbox,
}

/// Options for a toggle or checkbox.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleOptions {
    /// Initial value.
    pub value: Value,
    /// The "on" value.
    pub true_value: Value,
    /// The "off" value.
    pub false_value: Value,
    /// Presentation.
    pub style: ToggleStyle,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self {
            value: Value::Bool(false),
            true_value: Value::Bool(true),
            false_value: Value::Bool(false),
            style: ToggleStyle::Switch,
        }
    }
}

impl ToggleOptions {
    /// Stock checkbox options.
    #[must_use]
    pub fn checkbox() -> Self {
        Self {
            style: ToggleStyle::Checkbox,
            ..Self::default()
        }
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the "on" value.
    #[must_use]
    pub fn with_true_value(mut self, value: impl Into<Value>) -> Self {
        self.true_value = value.into();
        self
    }

    /// Sets the "off" value.
    #[must_use]
    pub fn with_false_value(mut self, value: impl Into<Value>) -> Self {
        self.false_value = value.into();
        self
    }
}

/// What a slider's detail area shows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SliderVariant {
    /// The formatted value or percentage.
    #[default]
    Plain,
    /// A warm-to-cool color for a color temperature in kelvin.
    ColorTemperature,
    /// A black-to-white color for a light level.
    ColorLight,
}

/// Options for a linear slider.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderOptions {
    /// Initial value.
    pub value: f64,
    /// Value at the low end.
    pub min: f64,
    /// Value at the high end.
    pub max: f64,
    /// Quantization step.
    pub step: f64,
    /// Decimal places shown by a plain slider.
    pub precision: u8,
    /// Show a percentage of the range instead of the value.
    pub percent: bool,
    /// Orientation.
    pub axis: Axis,
    /// Detail presentation.
    pub variant: SliderVariant,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            value: 5.0,
            min: 1.0,
            max: 10.0,
            step: 0.1,
            precision: 1,
            percent: false,
            axis: Axis::Vertical,
            variant: SliderVariant::Plain,
        }
    }
}

impl SliderOptions {
    /// A color temperature slider over 2700 K to 6000 K in steps of 100 K.
    #[must_use]
    pub fn color_temperature() -> Self {
        Self {
            value: 2700.0,
            min: 2700.0,
            max: 6000.0,
            step: 100.0,
            variant: SliderVariant::ColorTemperature,
            ..Self::default()
        }
    }

    /// A light level slider over `0..=1` in steps of `0.01`.
    #[must_use]
    pub fn color_light() -> Self {
        Self {
            value: 1.0,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            variant: SliderVariant::ColorLight,
            ..Self::default()
        }
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the quantization step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the displayed decimal places.
    #[must_use]
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Shows a percentage instead of the value.
    #[must_use]
    pub fn with_percent(mut self, percent: bool) -> Self {
        self.percent = percent;
        self
    }

    /// Sets the orientation.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Checks the range and step.
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_range(self.min, self.max)?;
        check_step(self.step)
    }

    pub(crate) fn normalized(mut self) -> Self {
        normalize_range(&mut self.min, &mut self.max);
        normalize_step(&mut self.step, Self::default().step);
        self
    }
}

/// Options for a color wheel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorWheelOptions {
    /// Initial color.
    pub value: Color,
}

impl Default for ColorWheelOptions {
    fn default() -> Self {
        Self {
            value: Color::from_rgb8(255, 255, 255),
        }
    }
}

impl ColorWheelOptions {
    /// Sets the initial color.
    #[must_use]
    pub fn with_value(mut self, value: Color) -> Self {
        self.value = value;
        self
    }
}

/// Options for a thermostat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermostatOptions {
    /// Setpoint, the committed value.
    pub setpoint: f64,
    /// Measured temperature.
    pub reading: f64,
    /// Temperature difference at either end of the dial.
    pub deviation: f64,
    /// Color when the reading is well below the setpoint.
    pub cold: Color,
    /// Color when the reading is near the setpoint.
    pub temperate: Color,
    /// Color when the reading is well above the setpoint.
    pub warm: Color,
    /// Difference at which cold turns temperate.
    pub cold_threshold: f64,
    /// Difference at which temperate turns warm.
    pub warm_threshold: f64,
}

impl Default for ThermostatOptions {
    fn default() -> Self {
        Self {
            setpoint: 20.0,
            reading: 20.0,
            deviation: 7.0,
            cold: Color::from_rgb8(0, 133, 255),
            temperate: Color::from_rgb8(18, 229, 82),
            warm: Color::from_rgb8(255, 149, 0),
            cold_threshold: -2.0,
            warm_threshold: 2.0,
        }
    }
}

impl ThermostatOptions {
    /// Sets the setpoint and reading.
    #[must_use]
    pub fn with_temperatures(mut self, setpoint: f64, reading: f64) -> Self {
        self.setpoint = setpoint;
        self.reading = reading;
        self
    }

    /// Sets the dial deviation.
    #[must_use]
    pub fn with_deviation(mut self, deviation: f64) -> Self {
        self.deviation = deviation;
        self
    }

    /// Sets the three band colors.
    #[must_use]
    pub fn with_colors(mut self, cold: Color, temperate: Color, warm: Color) -> Self {
        self.cold = cold;
        self.temperate = temperate;
        self.warm = warm;
        self
    }

    /// Sets the band thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, cold: f64, warm: f64) -> Self {
        self.cold_threshold = cold;
        self.warm_threshold = warm;
        self
    }

    /// Checks the deviation and thresholds.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !positive(self.deviation) {
            return Err(OptionsError::NonPositiveDeviation(self.deviation));
        }
        if self.cold_threshold > self.warm_threshold {
            return Err(OptionsError::InvertedThresholds {
                cold: self.cold_threshold,
                warm: self.warm_threshold,
            });
        }
        Ok(())
    }

    pub(crate) fn normalized(mut self) -> Self {
        if !positive(self.deviation) {
            let fallback = Self::default().deviation;
            log::warn!("replacing deviation {} with {fallback}", self.deviation);
            self.deviation = fallback;
        }
        normalize_range(&mut self.cold_threshold, &mut self.warm_threshold);
        self
    }
}

/// Options for a scrubber.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrubberOptions {
    /// Initial value.
    pub value: f64,
    /// Lowest value.
    pub min: f64,
    /// Highest value.
    pub max: f64,
    /// Change per tick per zone.
    pub step: f64,
    /// Zones on each side of the neutral center.
    pub zones: u32,
    /// Timer period between steps.
    pub speed: Duration,
    /// Deflection needed to reach the outermost zone, in half-extents.
    pub spring: f64,
    /// Orientation.
    pub axis: Axis,
}

impl Default for ScrubberOptions {
    fn default() -> Self {
        Self {
            value: 5.0,
            min: 1.0,
            max: 10.0,
            step: 0.5,
            zones: 2,
            speed: Duration::from_millis(350),
            spring: 1.5,
            axis: Axis::Vertical,
        }
    }
}

impl ScrubberOptions {
    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the per-zone step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the zone count per side.
    #[must_use]
    pub fn with_zones(mut self, zones: u32) -> Self {
        self.zones = zones;
        self
    }

    /// Sets the timer period.
    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the spring constant.
    #[must_use]
    pub fn with_spring(mut self, spring: f64) -> Self {
        self.spring = spring;
        self
    }

    /// Sets the orientation.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Checks range, step, zones, speed and spring.
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_range(self.min, self.max)?;
        check_step(self.step)?;
        if self.zones == 0 {
            return Err(OptionsError::NoZones);
        }
        if self.speed.is_zero() {
            return Err(OptionsError::ZeroSpeed);
        }
        if !positive(self.spring) {
            return Err(OptionsError::NonPositiveSpring(self.spring));
        }
        Ok(())
    }

    pub(crate) fn normalized(mut self) -> Self {
        let defaults = Self::default();
        normalize_range(&mut self.min, &mut self.max);
        normalize_step(&mut self.step, defaults.step);
        if !positive(self.spring) {
            log::warn!("replacing spring {} with {}", self.spring, defaults.spring);
            self.spring = defaults.spring;
        }
        // Zero zones and a zero speed are usable as configured: the first
        // never moves, the second is clamped by the timer host.
        self
    }
}

/// Options for a group of select buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectOptions {
    /// Most options selected at once.
    pub max_selections: usize,
    /// When full, drop the oldest selection to make room. Otherwise refuse
    /// new selections until one is removed.
    pub replace_oldest: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            max_selections: 1,
            replace_oldest: true,
        }
    }
}

impl SelectOptions {
    /// Sets the selection limit.
    #[must_use]
    pub fn with_max_selections(mut self, max: usize) -> Self {
        self.max_selections = max;
        self
    }

    /// Sets what happens when selecting past the limit.
    #[must_use]
    pub fn with_replace_oldest(mut self, replace: bool) -> Self {
        self.replace_oldest = replace;
        self
    }

    /// Checks the selection limit.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_selections == 0 {
            Err(OptionsError::NoSelections)
        } else {
            Ok(())
        }
    }

    pub(crate) fn normalized(mut self) -> Self {
        if self.max_selections == 0 {
            log::warn!("select buttons allow no selections; allowing one");
            self.max_selections = 1;
        }
        self
    }
}
