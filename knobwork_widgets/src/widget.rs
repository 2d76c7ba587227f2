// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget type and its per-kind behavior.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use knobwork_color::Color;
use knobwork_gesture::{
    ActivePointers, CaptureHost, DEFAULT_MAX_TOUCHES, GestureContext, GestureSink,
    GestureUnifier, InputEvent, Phase, PointerSource, Sample,
};
use knobwork_property::{Change, Key, ListenerId, PropertyStore, SetOutcome};
use knobwork_timing::{Interval, TimerHost, TimerId};
use kurbo::{Rect, Vec2};

use crate::display::DisplayState;
use crate::keys;
use crate::mapping::{self, Axis, Band, WheelPoint};
use crate::options::{
    ButtonOptions, ColorWheelOptions, ScrubberOptions, SelectOptions, SliderOptions,
    SliderVariant, ThermostatOptions, ToggleOptions, ToggleStyle,
};
use crate::select::{SelectOption, Selection};
use crate::value::Value;

/// Which kind of control a [`Widget`] is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A momentary button.
    Button,
    /// A latching toggle, drawn as a switch or a checkbox.
    Toggle(ToggleStyle),
    /// A linear slider.
    Slider(SliderVariant),
    /// A hue/saturation color wheel.
    ColorWheel,
    /// A setpoint display with a measured reading.
    Thermostat,
    /// A spring-loaded, timer-driven value adjuster.
    Scrubber,
    /// A group of select buttons.
    Select,
}

/// What happened to an event passed to a widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// The event went through the widget's gesture unifier.
    Handled {
        /// Samples the event produced.
        samples: usize,
    },
    /// The widget, or the targeted option, is inactive and dropped the event.
    Inactive,
    /// Nothing in the widget takes this event: a select group addressed as a
    /// whole, or an option index that does not exist.
    NoTarget,
}

/// A value of the wrong type for the widget it was given to.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTypeError {
    /// The widget that refused the value.
    pub kind: WidgetKind,
    /// The refused value.
    pub value: Value,
}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} widget cannot hold `{}`", self.kind, self.value)
    }
}

impl core::error::Error for ValueTypeError {}

/// Returns `true` if `sample` ends a gesture on the widget it started on.
///
/// A mouse gesture counts unless it escaped the widget; a touch has no
/// enter/leave, so its release position is hit-tested against `bounds`.
fn released_inside(sample: &Sample, escaped: bool, bounds: Rect) -> bool {
    sample.is_terminal()
        && match sample.source {
            PointerSource::Mouse => !escaped,
            PointerSource::Touch(_) => bounds.contains(sample.position),
        }
}

/// Reads a configuration key, falling back to `default` when it is unset or
/// holds another type.
fn setting<T: Clone + 'static>(store: &PropertyStore, key: &str, default: T) -> T {
    match store.get_erased(key) {
        None => default,
        Some(erased) => erased.downcast_ref::<T>().cloned().unwrap_or_else(|| {
            log::warn!(
                "property `{key}` is not a `{}`, using the default",
                core::any::type_name::<T>()
            );
            default
        }),
    }
}

#[derive(Clone, Debug)]
struct Scrub {
    axis: Axis,
    pending: f64,
    offset: f64,
    zone: i32,
    interval: Interval,
}

#[derive(Clone, Debug)]
enum Kind {
    Button,
    Toggle(ToggleStyle),
    Slider {
        axis: Axis,
        variant: SliderVariant,
        pending: f64,
    },
    ColorWheel {
        pending: Color,
        handle: Vec2,
    },
    Thermostat,
    Scrubber(Scrub),
    Select(Selection),
}

/// Everything but the gesture unifier, so the unifier can drive it as a sink.
#[derive(Debug)]
struct Body {
    store: PropertyStore,
    bounds: Rect,
    kind: Kind,
    display: DisplayState,
}

impl Body {
    fn number(&self, key: &str, default: f64) -> f64 {
        setting(&self.store, key, default)
    }

    fn committed_number(&self) -> f64 {
        self.store.value::<f64>().copied().unwrap_or_default()
    }

    /// `(min, max, step)` of a slider or scrubber.
    fn range(&self, defaults: (f64, f64, f64)) -> (f64, f64, f64) {
        (
            self.number(keys::MIN, defaults.0),
            self.number(keys::MAX, defaults.1),
            self.number(keys::STEP, defaults.2),
        )
    }

    fn commit<T: Clone + fmt::Debug + 'static>(&mut self, value: T) {
        log::debug!("committing {value:?}");
        self.store.set_value(value);
        self.sync_pending();
        self.rederive();
    }

    /// Points the pending slot of a continuous control at the committed value.
    fn sync_pending(&mut self) {
        let number = self.committed_number();
        let color = self.store.value::<Color>().copied();
        match &mut self.kind {
            Kind::Slider { pending, .. } => *pending = number,
            Kind::Scrubber(scrub) => scrub.pending = number,
            Kind::ColorWheel { pending, handle } => {
                if let Some(color) = color {
                    *pending = color;
                    *handle = mapping::wheel_position(&color);
                }
            }
            Kind::Button | Kind::Toggle(_) | Kind::Thermostat | Kind::Select(_) => {}
        }
    }

    fn rederive(&mut self) {
        let mut display = DisplayState::default();
        match &mut self.kind {
            Kind::Button | Kind::Toggle(_) => {
                let current = self.store.value::<Value>();
                display.on = current.is_some() && current == self.store.get::<Value>(keys::TRUE);
            }
            Kind::Slider {
                variant, pending, ..
            } => {
                let defaults = SliderOptions::default();
                let min = setting(&self.store, keys::MIN, defaults.min);
                let max = setting(&self.store, keys::MAX, defaults.max);
                *pending = mapping::clamp_range(*pending, min, max);
                let fraction = mapping::range_fraction(*pending, min, max);
                display.percent = fraction;
                match variant {
                    SliderVariant::Plain => {
                        let precision = setting(&self.store, keys::PRECISION, defaults.precision);
                        let percent = setting(&self.store, keys::PERCENT, defaults.percent);
                        display.text = Some(mapping::format_value(
                            *pending, fraction, precision, percent,
                        ));
                    }
                    SliderVariant::ColorTemperature => {
                        display.color = Some(mapping::color_temperature_detail(fraction));
                    }
                    SliderVariant::ColorLight => {
                        display.color = Some(mapping::color_light_detail(fraction));
                    }
                }
            }
            Kind::ColorWheel { pending, handle } => {
                display.color = Some(*pending);
                display.handle = Some(*handle);
            }
            Kind::Thermostat => {
                let defaults = ThermostatOptions::default();
                let setpoint = self.store.value::<f64>().copied().unwrap_or_default();
                let reading = setting(&self.store, keys::READING, setpoint);
                let deviation = setting(&self.store, keys::DEVIATION, defaults.deviation);
                let cold_t = setting(&self.store, keys::COLD_THRESHOLD, defaults.cold_threshold);
                let warm_t = setting(&self.store, keys::WARM_THRESHOLD, defaults.warm_threshold);
                let difference = reading - setpoint;
                let band_key = match Band::classify(difference, cold_t, warm_t) {
                    Band::Cold => keys::COLD,
                    Band::Temperate => keys::TEMPERATE,
                    Band::Warm => keys::WARM,
                };
                display.percent = mapping::thermostat_dial(difference, deviation);
                display.color = Some(setting(&self.store, band_key, Color::BLACK));
                display.text = Some(format!("{setpoint}"));
            }
            Kind::Scrubber(scrub) => {
                let defaults = ScrubberOptions::default();
                let spring = setting(&self.store, keys::SPRING, defaults.spring);
                let zones = setting(&self.store, keys::ZONES, defaults.zones);
                let deflection = mapping::scrub_deflection(scrub.offset, spring);
                scrub.zone = mapping::scrub_zone(deflection, zones);
                display.percent = deflection;
                display.zone = scrub.zone;
                display.text = Some(format!("{}", scrub.pending));
            }
            Kind::Select(_) => {}
        }
        self.display = display;
    }

    /// Starts the scrubber timer while a zone is engaged and stops it once
    /// the gesture is over.
    fn sync_timer<H: TimerHost + ?Sized>(&mut self, idle: bool, timers: &mut H) {
        let Kind::Scrubber(scrub) = &mut self.kind else {
            return;
        };
        if scrub.zone != 0 {
            if scrub.interval.ensure_running(timers) {
                log::debug!("scrubber engaged zone {}", scrub.zone);
            }
        } else if idle && scrub.interval.cancel(timers) {
            log::debug!("scrubber released");
        }
    }

    /// Drops an unfinished gesture: continuous controls fall back to the
    /// committed value and a pressed button reverts to its `false` value.
    fn abandon(&mut self) {
        if let Kind::Scrubber(scrub) = &mut self.kind {
            scrub.offset = 0.0;
        }
        if matches!(self.kind, Kind::Button) && self.display.on {
            let off = setting(&self.store, keys::FALSE, Value::Bool(false));
            self.commit(off);
            return;
        }
        self.sync_pending();
        self.rederive();
    }

    fn flip(&mut self) {
        let on = setting(&self.store, keys::TRUE, Value::Bool(true));
        let off = setting(&self.store, keys::FALSE, Value::Bool(false));
        let next = if self.store.value::<Value>() == Some(&on) {
            off
        } else {
            on
        };
        self.commit(next);
    }

    fn slider_sample(&mut self, sample: &Sample) {
        let defaults = SliderOptions::default();
        let (min, max, step) = self.range((defaults.min, defaults.max, defaults.step));
        let bounds = self.bounds;
        let Kind::Slider { axis, pending, .. } = &mut self.kind else {
            return;
        };
        if sample.is_terminal() {
            let value = *pending;
            self.commit(value);
            return;
        }
        *pending = mapping::slider_value(*axis, bounds, sample.position, min, max, step);
        self.rederive();
    }

    fn wheel_sample(&mut self, sample: &Sample) {
        let bounds = self.bounds;
        let Kind::ColorWheel { pending, handle } = &mut self.kind else {
            return;
        };
        if sample.is_terminal() {
            let color = *pending;
            self.commit(color);
            return;
        }
        let point = WheelPoint::from_position(bounds, sample.position);
        *pending = point.color();
        *handle = Vec2::new(point.x, point.y);
        self.rederive();
    }

    fn scrub_sample(&mut self, sample: &Sample) {
        let bounds = self.bounds;
        let committed = self.committed_number();
        let Kind::Scrubber(scrub) = &mut self.kind else {
            return;
        };
        match sample.phase {
            Phase::End => {
                scrub.offset = 0.0;
                let value = scrub.pending;
                self.commit(value);
                return;
            }
            Phase::Start => scrub.pending = committed,
            Phase::Move => {}
        }
        scrub.offset = mapping::scrub_offset(scrub.axis, bounds, sample.position);
        self.rederive();
    }
}

impl GestureSink for Body {
    fn on_sample(&mut self, sample: &Sample, active: ActivePointers, escaped: bool) {
        log::trace!("{:?} sample at {:?}", sample.phase, sample.position);
        match self.kind {
            Kind::Button => match sample.phase {
                Phase::Start if active.count() == 1 => {
                    let on = setting(&self.store, keys::TRUE, Value::Bool(true));
                    self.commit(on);
                }
                Phase::End if active.is_empty() => {
                    let off = setting(&self.store, keys::FALSE, Value::Bool(false));
                    self.commit(off);
                }
                _ => {}
            },
            Kind::Toggle(_) => {
                if released_inside(sample, escaped, self.bounds) {
                    self.flip();
                }
            }
            Kind::Slider { .. } => self.slider_sample(sample),
            Kind::ColorWheel { .. } => self.wheel_sample(sample),
            Kind::Scrubber(_) => self.scrub_sample(sample),
            Kind::Thermostat | Kind::Select(_) => {}
        }
    }
}

/// An interactive control producing a committed value.
///
/// A widget owns a [`GestureUnifier`] that turns raw events into samples, a
/// [`PropertyStore`] holding its committed value and configuration, and the
/// per-kind state mapping samples to values. Hosts feed it events with
/// [`handle`](Self::handle), timer expirations with [`tick`](Self::tick), and
/// read [`display`](Self::display) to draw it.
///
/// ```rust
/// use core::time::Duration;
/// use knobwork_gesture::{CaptureHost, GestureContext, InputEvent};
/// use knobwork_timing::{TimerHost, TimerId, TimerQueue};
/// use knobwork_widgets::{SliderOptions, Value, Widget};
/// use kurbo::{Point, Rect};
///
/// struct Host(TimerQueue);
///
/// impl CaptureHost for Host {
///     fn attach_window_listeners(&mut self) {}
///     fn detach_window_listeners(&mut self) {}
/// }
///
/// impl TimerHost for Host {
///     fn schedule_repeating(&mut self, period: Duration) -> TimerId {
///         self.0.schedule_repeating(period)
///     }
///     fn cancel(&mut self, id: TimerId) -> bool {
///         self.0.cancel(id)
///     }
/// }
///
/// let mut host = Host(TimerQueue::new());
/// let mut slider = Widget::slider(SliderOptions::default().with_range(0.0, 10.0).with_step(1.0))
///     .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0));
///
/// let cx = GestureContext::IDLE;
/// let press = InputEvent::MouseDown { button: 0, position: Point::new(10.0, 30.0) };
/// slider.handle(&press, cx, &mut host);
/// slider.handle(&InputEvent::mouse_up(0, Point::new(10.0, 30.0)), cx, &mut host);
/// assert_eq!(slider.value(), Value::Number(7.0));
/// ```
#[derive(Debug)]
pub struct Widget {
    gesture: GestureUnifier,
    body: Body,
    inactive: bool,
}

impl Widget {
    fn from_parts(kind: Kind, store: PropertyStore, max_touches: u8) -> Self {
        let mut widget = Self {
            gesture: GestureUnifier::with_max_touches(max_touches),
            body: Body {
                store,
                bounds: Rect::ZERO,
                kind,
                display: DisplayState::default(),
            },
            inactive: false,
        };
        widget.body.sync_pending();
        widget.body.rederive();
        widget
    }

    /// Creates a momentary button, showing its `false` value.
    #[must_use]
    pub fn button(options: ButtonOptions) -> Self {
        let store = PropertyStore::new()
            .with(keys::VALUE, options.false_value.clone())
            .with(keys::TRUE, options.true_value)
            .with(keys::FALSE, options.false_value);
        Self::from_parts(Kind::Button, store, u8::MAX)
    }

    /// Creates a toggle or checkbox.
    #[must_use]
    pub fn toggle(options: ToggleOptions) -> Self {
        let store = PropertyStore::new()
            .with(keys::VALUE, options.value)
            .with(keys::TRUE, options.true_value)
            .with(keys::FALSE, options.false_value);
        Self::from_parts(Kind::Toggle(options.style), store, DEFAULT_MAX_TOUCHES)
    }

    /// Creates a slider. A malformed range or step is normalized.
    #[must_use]
    pub fn slider(options: SliderOptions) -> Self {
        let o = options.normalized();
        let store = PropertyStore::new()
            .with(keys::VALUE, o.value)
            .with(keys::MIN, o.min)
            .with(keys::MAX, o.max)
            .with(keys::STEP, o.step)
            .with(keys::PRECISION, o.precision)
            .with(keys::PERCENT, o.percent);
        let kind = Kind::Slider {
            axis: o.axis,
            variant: o.variant,
            pending: o.value,
        };
        Self::from_parts(kind, store, 1)
    }

    /// Creates a color wheel.
    #[must_use]
    pub fn color_wheel(options: ColorWheelOptions) -> Self {
        let store = PropertyStore::new().with(keys::VALUE, options.value);
        let kind = Kind::ColorWheel {
            pending: options.value,
            handle: mapping::wheel_position(&options.value),
        };
        Self::from_parts(kind, store, 1)
    }

    /// Creates a thermostat. It displays values and takes no input.
    #[must_use]
    pub fn thermostat(options: ThermostatOptions) -> Self {
        let o = options.normalized();
        let store = PropertyStore::new()
            .with(keys::VALUE, o.setpoint)
            .with(keys::READING, o.reading)
            .with(keys::DEVIATION, o.deviation)
            .with(keys::COLD, o.cold)
            .with(keys::TEMPERATE, o.temperate)
            .with(keys::WARM, o.warm)
            .with(keys::COLD_THRESHOLD, o.cold_threshold)
            .with(keys::WARM_THRESHOLD, o.warm_threshold);
        Self::from_parts(Kind::Thermostat, store, DEFAULT_MAX_TOUCHES)
    }

    /// Creates a scrubber. A malformed range, step or spring is normalized.
    #[must_use]
    pub fn scrubber(options: ScrubberOptions) -> Self {
        let o = options.normalized();
        let store = PropertyStore::new()
            .with(keys::VALUE, o.value)
            .with(keys::MIN, o.min)
            .with(keys::MAX, o.max)
            .with(keys::STEP, o.step)
            .with(keys::ZONES, o.zones)
            .with(keys::SPEED, o.speed)
            .with(keys::SPRING, o.spring);
        let kind = Kind::Scrubber(Scrub {
            axis: o.axis,
            pending: o.value,
            offset: 0.0,
            zone: 0,
            interval: Interval::new(o.speed),
        });
        Self::from_parts(kind, store, 1)
    }

    /// Creates an empty group of select buttons; see
    /// [`add_option`](Self::add_option).
    #[must_use]
    pub fn select(options: SelectOptions) -> Self {
        let o = options.normalized();
        let store = PropertyStore::new().with(keys::VALUE, Vec::<Value>::new());
        Self::from_parts(Kind::Select(Selection::new(o)), store, DEFAULT_MAX_TOUCHES)
    }

    /// Sets the bounds used for position mapping.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.body.bounds = bounds;
        self
    }

    /// The kind of control.
    #[must_use]
    pub fn kind(&self) -> WidgetKind {
        match &self.body.kind {
            Kind::Button => WidgetKind::Button,
            Kind::Toggle(style) => WidgetKind::Toggle(*style),
            Kind::Slider { variant, .. } => WidgetKind::Slider(*variant),
            Kind::ColorWheel { .. } => WidgetKind::ColorWheel,
            Kind::Thermostat => WidgetKind::Thermostat,
            Kind::Scrubber(_) => WidgetKind::Scrubber,
            Kind::Select(_) => WidgetKind::Select,
        }
    }

    /// Bounds used for position mapping, in the host's coordinate space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.body.bounds
    }

    /// Moves or resizes the widget.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.body.bounds = bounds;
    }

    /// Returns `true` if the widget drops input.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.inactive
    }

    /// Makes the widget drop input, or accept it again.
    ///
    /// Deactivating mid-gesture abandons the gesture without committing:
    /// window capture is released and a scrubber's timer is cancelled.
    pub fn set_inactive<H>(&mut self, inactive: bool, host: &mut H)
    where
        H: CaptureHost + TimerHost + ?Sized,
    {
        self.inactive = inactive;
        if !inactive {
            return;
        }
        let mut abandoned = self.gesture.abandon(host);
        if let Kind::Select(selection) = &mut self.body.kind {
            for option in &mut selection.options {
                abandoned |= option.gesture.abandon(host);
            }
        }
        if self.cancel_timer(host) {
            log::debug!("scrubber timer cancelled on deactivation");
        }
        if abandoned {
            self.body.abandon();
        }
    }

    /// Returns `true` while a mouse button or touch is engaged.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// The widget's gesture unifier.
    #[must_use]
    pub fn gesture(&self) -> &GestureUnifier {
        &self.gesture
    }

    /// The committed value.
    ///
    /// Buttons and toggles return whichever of their `true`/`false` values is
    /// committed; sliders, scrubbers and thermostats a [`Value::Number`]; the
    /// color wheel a [`Value::Color`]; select buttons a [`Value::List`].
    #[must_use]
    pub fn value(&self) -> Value {
        let store = &self.body.store;
        match self.body.kind {
            Kind::Button | Kind::Toggle(_) => store.value::<Value>().cloned().unwrap_or_default(),
            Kind::Slider { .. } | Kind::Scrubber(_) | Kind::Thermostat => {
                Value::Number(self.body.committed_number())
            }
            Kind::ColorWheel { pending, .. } => {
                Value::Color(store.value::<Color>().copied().unwrap_or(pending))
            }
            Kind::Select(_) => Value::List(store.value::<Vec<Value>>().cloned().unwrap_or_default()),
        }
    }

    /// The value under consideration during a drag: the pending number of a
    /// slider or scrubber, or the pending color of a color wheel.
    #[must_use]
    pub fn pending(&self) -> Option<Value> {
        match &self.body.kind {
            Kind::Slider { pending, .. } => Some(Value::Number(*pending)),
            Kind::Scrubber(scrub) => Some(Value::Number(scrub.pending)),
            Kind::ColorWheel { pending, .. } => Some(Value::Color(*pending)),
            _ => None,
        }
    }

    /// Commits `value` and notifies listeners.
    ///
    /// Numeric widgets take a [`Value::Number`], the color wheel a
    /// [`Value::Color`] and select buttons a [`Value::List`] of option values;
    /// buttons and toggles take anything.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<(), ValueTypeError> {
        let value = value.into();
        match self.body.kind {
            Kind::Button | Kind::Toggle(_) => self.body.commit(value),
            Kind::Slider { .. } | Kind::Scrubber(_) | Kind::Thermostat => match value {
                Value::Number(n) => self.body.commit(n),
                _ => return Err(self.refuse(value)),
            },
            Kind::ColorWheel { .. } => match value {
                Value::Color(c) => self.body.commit(c),
                _ => return Err(self.refuse(value)),
            },
            Kind::Select(ref mut selection) => match value {
                Value::List(items) => {
                    selection.select_values(&items);
                    let values = selection.values();
                    self.body.commit(values);
                }
                _ => return Err(self.refuse(value)),
            },
        }
        Ok(())
    }

    fn refuse(&self, value: Value) -> ValueTypeError {
        ValueTypeError {
            kind: self.kind(),
            value,
        }
    }

    /// Returns the property stored under `key` as a `T`.
    ///
    /// See [`keys`](crate::keys) for the type each key holds.
    #[must_use]
    pub fn property<T: 'static>(&self, key: &str) -> Option<&T> {
        self.body.store.get(key)
    }

    /// All properties of this widget.
    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.body.store
    }

    /// Sets a property and re-derives the display.
    ///
    /// [`keys::VALUE`] always notifies; other keys notify only with `emit`.
    /// A [`keys::VALUE`] goes through [`set_value`](Self::set_value): one the
    /// widget cannot hold is refused with a warning and nothing is notified.
    /// Changing a button's or toggle's `true`/`false` value while it shows
    /// that value commits the new one. Changing a scrubber's
    /// [`keys::SPEED`] while its timer runs reschedules the timer.
    pub fn set_property<T, H>(
        &mut self,
        key: impl Into<Key>,
        value: T,
        emit: bool,
        timers: &mut H,
    ) -> SetOutcome
    where
        T: Clone + fmt::Debug + 'static,
        H: TimerHost + ?Sized,
    {
        let key = key.into();
        if key.is_value() {
            let refused = match Value::from_any(&value) {
                Some(v) => self.set_value(v).err().map(|e| e.value),
                None => Some(Value::Text(format!("{value:?}"))),
            };
            if let Some(v) = refused {
                log::warn!("{:?} widget refused value `{v}`", self.kind());
                return SetOutcome::Rederive;
            }
            self.body.sync_timer(self.gesture.is_idle(), timers);
            return SetOutcome::Notified;
        }
        let is_speed = key.as_str() == keys::SPEED;
        let store = &self.body.store;
        let follows = matches!(self.body.kind, Kind::Button | Kind::Toggle(_))
            && (key.as_str() == keys::TRUE || key.as_str() == keys::FALSE)
            && store.value::<Value>().is_some()
            && store.value::<Value>() == store.get::<Value>(key.as_str());
        let follow_key = follows.then(|| key.clone());

        let outcome = self.body.store.set(key, value, emit);

        let followed = follow_key.and_then(|k| self.body.store.get::<Value>(k.as_str()).cloned());
        if let Some(v) = followed {
            self.body.store.set_value(v);
        }
        if is_speed {
            let period = self.body.store.get::<Duration>(keys::SPEED).copied();
            if let (Kind::Scrubber(scrub), Some(period)) = (&mut self.body.kind, period) {
                scrub.interval.set_period(period, timers);
            }
        }
        self.body.rederive();
        self.body.sync_timer(self.gesture.is_idle(), timers);
        outcome
    }

    /// Registers `listener` for this widget's property changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&Change<'_>) + 'static) -> ListenerId {
        self.body.store.subscribe(listener)
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.body.store.unsubscribe(id)
    }

    /// Derived display properties.
    #[must_use]
    pub fn display(&self) -> &DisplayState {
        &self.body.display
    }

    /// Applies one input event.
    ///
    /// `host` receives window-capture requests when a mouse gesture escapes
    /// the widget and timer requests from a scrubber.
    pub fn handle<H>(&mut self, event: &InputEvent<'_>, cx: GestureContext, host: &mut H) -> Dispatch
    where
        H: CaptureHost + TimerHost + ?Sized,
    {
        if self.inactive {
            log::trace!("inactive widget dropped {event:?}");
            return Dispatch::Inactive;
        }
        if matches!(self.body.kind, Kind::Select(_)) {
            log::trace!("select group takes input per option");
            return Dispatch::NoTarget;
        }
        let samples = self.gesture.handle(event, cx, &mut self.body, host);
        self.body.sync_timer(self.gesture.is_idle(), host);
        Dispatch::Handled { samples }
    }

    /// Advances the scrubber by one step if `id` is its timer.
    ///
    /// Returns `false` for a timer this widget does not own. A tick at zone
    /// `0` cancels the timer.
    pub fn tick<H: TimerHost + ?Sized>(&mut self, id: TimerId, timers: &mut H) -> bool {
        let defaults = ScrubberOptions::default();
        let (min, max, step) = self.body.range((defaults.min, defaults.max, defaults.step));
        let Kind::Scrubber(scrub) = &mut self.body.kind else {
            return false;
        };
        if !scrub.interval.is(id) {
            return false;
        }
        if scrub.zone == 0 && scrub.interval.cancel(timers) {
            log::debug!("scrubber timer stopped at the neutral zone");
        }
        scrub.pending = mapping::scrub_step(scrub.pending, scrub.zone, step, min, max);
        log::trace!("scrubber pending {}", scrub.pending);
        self.body.rederive();
        true
    }

    /// The scrubber's running timer.
    #[must_use]
    pub fn timer(&self) -> Option<TimerId> {
        match &self.body.kind {
            Kind::Scrubber(scrub) => scrub.interval.id(),
            _ => None,
        }
    }

    /// Cancels the scrubber's timer. Call before dropping a widget that may
    /// be mid-gesture.
    ///
    /// Returns `true` if a timer was running.
    pub fn cancel_timer<H: TimerHost + ?Sized>(&mut self, timers: &mut H) -> bool {
        match &mut self.body.kind {
            Kind::Scrubber(scrub) => scrub.interval.cancel(timers),
            _ => false,
        }
    }

    /// Adds an option to a group of select buttons and returns its index.
    ///
    /// Returns `None` for other kinds.
    pub fn add_option(
        &mut self,
        label: impl Into<String>,
        value: impl Into<Value>,
        bounds: Rect,
    ) -> Option<usize> {
        let Kind::Select(selection) = &mut self.body.kind else {
            return None;
        };
        Some(selection.push(label.into(), value.into(), bounds))
    }

    /// Removes a select option, shifting later indices down.
    ///
    /// Commits the new selection if the option was selected. Returns `false`
    /// if there is no such option.
    pub fn remove_option(&mut self, index: usize) -> bool {
        let Kind::Select(selection) = &mut self.body.kind else {
            return false;
        };
        let Some(removed) = selection.remove(index) else {
            return false;
        };
        if removed.is_selected() {
            let values = selection.values();
            self.body.commit(values);
        }
        true
    }

    /// The options of a group of select buttons; empty for other kinds.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match &self.body.kind {
            Kind::Select(selection) => &selection.options,
            _ => &[],
        }
    }

    /// Index of the select option holding `value`.
    #[must_use]
    pub fn option_index(&self, value: &Value) -> Option<usize> {
        match &self.body.kind {
            Kind::Select(selection) => selection.index_of(value),
            _ => None,
        }
    }

    /// Applies one input event to the select option at `index`.
    ///
    /// Options behave like toggles: a gesture released on the option selects
    /// or deselects it, and the new selection is committed.
    pub fn handle_option<H>(
        &mut self,
        index: usize,
        event: &InputEvent<'_>,
        cx: GestureContext,
        host: &mut H,
    ) -> Dispatch
    where
        H: CaptureHost + ?Sized,
    {
        if self.inactive {
            return Dispatch::Inactive;
        }
        let Kind::Select(selection) = &mut self.body.kind else {
            return Dispatch::NoTarget;
        };
        let Some(option) = selection.options.get_mut(index) else {
            return Dispatch::NoTarget;
        };
        if option.is_inactive() {
            log::trace!("option {index} is locked out");
            return Dispatch::Inactive;
        }
        let bounds = option.bounds();
        let mut flips = 0_u32;
        let mut sink = |sample: &Sample, _: ActivePointers, escaped: bool| {
            if released_inside(sample, escaped, bounds) {
                flips += 1;
            }
        };
        let samples = option.gesture.handle(event, cx, &mut sink, host);
        if flips > 0 {
            for _ in 0..flips {
                selection.toggle(index);
            }
            for (i, option) in selection.options.iter_mut().enumerate() {
                if option.is_inactive() && option.gesture.abandon(host) {
                    log::debug!("option {i} locked out mid-gesture");
                }
            }
            let values = selection.values();
            self.body.commit(values);
        }
        Dispatch::Handled { samples }
    }
}
