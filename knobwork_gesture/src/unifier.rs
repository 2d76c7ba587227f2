// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-widget gesture state machine.

use kurbo::Point;
use smallvec::SmallVec;

use crate::capture::{CaptureGuard, CaptureHost};
use crate::event::{EventOrigin, GestureContext, InputEvent};
use crate::pointer::{ActivePointers, ButtonMask, Phase, PointerSource, Sample, Touch, TouchId};

/// Concurrent touches tracked when no other limit is configured.
pub const DEFAULT_MAX_TOUCHES: u8 = 2;

/// Consumer of unified gesture samples.
pub trait GestureSink {
    /// Called once per sample, in event order.
    ///
    /// `active` is the pointer set after the sample was applied; it is empty
    /// for the source's modality on a terminal sample. `escaped` is `true`
    /// while the mouse gesture continues outside the widget's bounds.
    fn on_sample(&mut self, sample: &Sample, active: ActivePointers, escaped: bool);
}

impl<F: FnMut(&Sample, ActivePointers, bool)> GestureSink for F {
    fn on_sample(&mut self, sample: &Sample, active: ActivePointers, escaped: bool) {
        self(sample, active, escaped);
    }
}

/// Turns mouse and touch input for one widget into a single sample stream.
///
/// Mouse buttons are tracked as a [`ButtonMask`] and touches as a bounded set
/// of [`TouchId`]s. The two modalities are tracked independently: each has its
/// own `Start` and `End` samples, and either can be engaged while the other is.
///
/// When the mouse leaves the widget with a button held, the unifier marks the
/// gesture escaped and asks the [`CaptureHost`] for window-level listeners.
/// It releases them when the pointer re-enters or the last button is released,
/// so attaches and detaches always pair up.
///
/// ```rust
/// use kurbo::Point;
/// use knobwork_gesture::{
///     ActivePointers, CaptureHost, GestureContext, GestureUnifier, InputEvent, Phase, Sample,
/// };
///
/// struct NoCapture;
/// impl CaptureHost for NoCapture {
///     fn attach_window_listeners(&mut self) {}
///     fn detach_window_listeners(&mut self) {}
/// }
///
/// let mut unifier = GestureUnifier::new();
/// let mut phases = Vec::new();
/// let mut sink = |s: &Sample, _: ActivePointers, _: bool| phases.push(s.phase);
/// let cx = GestureContext::IDLE;
///
/// let p = Point::new(4.0, 4.0);
/// unifier.handle(&InputEvent::MouseDown { button: 0, position: p }, cx, &mut sink, &mut NoCapture);
/// unifier.handle(&InputEvent::mouse_move(p), cx, &mut sink, &mut NoCapture);
/// unifier.handle(&InputEvent::mouse_up(0, p), cx, &mut sink, &mut NoCapture);
///
/// assert_eq!(phases, [Phase::Start, Phase::Move, Phase::End]);
/// assert!(unifier.is_idle());
/// ```
#[derive(Clone, Debug)]
pub struct GestureUnifier {
    buttons: ButtonMask,
    touches: SmallVec<[TouchId; 2]>,
    max_touches: u8,
    escaped: bool,
    capture: CaptureGuard,
}

impl GestureUnifier {
    /// Creates an idle unifier accepting [`DEFAULT_MAX_TOUCHES`] touches.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_touches(DEFAULT_MAX_TOUCHES)
    }

    /// Creates an idle unifier accepting at most `max_touches` concurrent touches.
    #[must_use]
    pub fn with_max_touches(max_touches: u8) -> Self {
        Self {
            buttons: ButtonMask::empty(),
            touches: SmallVec::new(),
            max_touches,
            escaped: false,
            capture: CaptureGuard::new(),
        }
    }

    /// Maximum number of concurrent touches.
    #[must_use]
    #[inline]
    pub fn max_touches(&self) -> u8 {
        self.max_touches
    }

    /// Currently pressed mouse buttons.
    #[must_use]
    #[inline]
    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    /// Currently active touches, oldest first.
    #[must_use]
    #[inline]
    pub fn touches(&self) -> &[TouchId] {
        &self.touches
    }

    /// Returns `true` while the mouse gesture continues outside the bounds.
    #[must_use]
    #[inline]
    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Returns `true` while window-level listeners are attached.
    #[must_use]
    #[inline]
    pub fn is_capturing(&self) -> bool {
        self.capture.is_active()
    }

    /// Returns `true` if no button or touch is engaged.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active().is_empty()
    }

    /// The pointer set currently engaged.
    #[must_use]
    pub fn active(&self) -> ActivePointers {
        ActivePointers {
            buttons: self.buttons,
            // Bounded by `max_touches`.
            touches: u8::try_from(self.touches.len()).unwrap_or(u8::MAX),
        }
    }

    /// Drops every engaged pointer without delivering a terminal sample.
    ///
    /// Releases the window capture if the gesture had escaped. Returns `true`
    /// if a gesture was in progress.
    pub fn abandon<H: CaptureHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let engaged = !self.is_idle();
        if engaged {
            log::debug!("gesture abandoned");
        }
        self.buttons = ButtonMask::empty();
        self.touches.clear();
        if self.escaped {
            self.escaped = false;
            self.capture.release(host);
        }
        engaged
    }

    /// Applies one input event, delivering any resulting samples to `sink`.
    ///
    /// Returns the number of samples delivered.
    pub fn handle<S, H>(
        &mut self,
        event: &InputEvent<'_>,
        cx: GestureContext,
        sink: &mut S,
        host: &mut H,
    ) -> usize
    where
        S: GestureSink + ?Sized,
        H: CaptureHost + ?Sized,
    {
        match *event {
            InputEvent::MouseDown { button, position } => self.mouse_down(button, position, sink),
            InputEvent::MouseMove { position, origin } => {
                self.mouse_move(position, origin, sink)
            }
            InputEvent::MouseUp {
                button,
                position,
                origin,
            } => self.mouse_up(button, position, origin, sink, host),
            InputEvent::MouseLeave => {
                self.mouse_leave(host);
                0
            }
            InputEvent::MouseEnter => {
                self.mouse_enter(host);
                0
            }
            InputEvent::TouchStart(touches) => self.touch_start(touches, cx, sink),
            InputEvent::TouchMove(touches) => self.touch_move(touches, sink),
            InputEvent::TouchEnd(touches) | InputEvent::TouchCancel(touches) => {
                self.touch_end(touches, sink)
            }
        }
    }

    fn mouse_down<S: GestureSink + ?Sized>(
        &mut self,
        button: u8,
        position: Point,
        sink: &mut S,
    ) -> usize {
        let Some(bit) = ButtonMask::from_button(button) else {
            log::trace!("ignoring press of unrepresentable button {button}");
            return 0;
        };
        let phase = if self.buttons.is_empty() {
            log::debug!("mouse gesture engaged with button {button}");
            Phase::Start
        } else {
            Phase::Move
        };
        self.buttons |= bit;
        self.deliver(position, phase, PointerSource::Mouse, sink)
    }

    fn mouse_move<S: GestureSink + ?Sized>(
        &mut self,
        position: Point,
        origin: EventOrigin,
        sink: &mut S,
    ) -> usize {
        if self.buttons.is_empty() || !self.accepts(origin) {
            return 0;
        }
        self.deliver(position, Phase::Move, PointerSource::Mouse, sink)
    }

    fn mouse_up<S, H>(
        &mut self,
        button: u8,
        position: Point,
        origin: EventOrigin,
        sink: &mut S,
        host: &mut H,
    ) -> usize
    where
        S: GestureSink + ?Sized,
        H: CaptureHost + ?Sized,
    {
        let Some(bit) = ButtonMask::from_button(button) else {
            return 0;
        };
        if !self.buttons.contains(bit) || !self.accepts(origin) {
            return 0;
        }
        self.buttons.remove(bit);
        if !self.buttons.is_empty() {
            return self.deliver(position, Phase::Move, PointerSource::Mouse, sink);
        }

        log::debug!("mouse gesture ended with button {button}");
        // The terminal sample still reports whether the release happened outside.
        let delivered = self.deliver(position, Phase::End, PointerSource::Mouse, sink);
        if self.escaped {
            self.escaped = false;
            self.capture.release(host);
        }
        delivered
    }

    fn mouse_leave<H: CaptureHost + ?Sized>(&mut self, host: &mut H) {
        if self.buttons.is_empty() || self.escaped {
            return;
        }
        log::debug!("mouse gesture escaped the widget bounds");
        self.escaped = true;
        self.capture.acquire(host);
    }

    fn mouse_enter<H: CaptureHost + ?Sized>(&mut self, host: &mut H) {
        if !self.escaped {
            return;
        }
        log::debug!("mouse gesture re-entered the widget bounds");
        self.escaped = false;
        self.capture.release(host);
    }

    fn touch_start<S: GestureSink + ?Sized>(
        &mut self,
        touches: &[Touch],
        cx: GestureContext,
        sink: &mut S,
    ) -> usize {
        if cx.scrolling {
            log::trace!("ignoring touch start while scrolling");
            return 0;
        }
        let mut delivered = 0;
        for touch in touches {
            if self.touches.contains(&touch.id) {
                continue;
            }
            if self.touches.len() >= usize::from(self.max_touches) {
                log::trace!("ignoring {:?}: touch limit reached", touch.id);
                continue;
            }
            let phase = if self.touches.is_empty() {
                log::debug!("touch gesture engaged with {:?}", touch.id);
                Phase::Start
            } else {
                Phase::Move
            };
            self.touches.push(touch.id);
            delivered += self.deliver(touch.position, phase, PointerSource::Touch(touch.id), sink);
        }
        delivered
    }

    fn touch_move<S: GestureSink + ?Sized>(&mut self, touches: &[Touch], sink: &mut S) -> usize {
        let mut delivered = 0;
        for touch in touches {
            if self.touches.contains(&touch.id) {
                delivered +=
                    self.deliver(touch.position, Phase::Move, PointerSource::Touch(touch.id), sink);
            }
        }
        delivered
    }

    fn touch_end<S: GestureSink + ?Sized>(&mut self, touches: &[Touch], sink: &mut S) -> usize {
        let mut delivered = 0;
        for touch in touches {
            let Some(index) = self.touches.iter().position(|id| *id == touch.id) else {
                continue;
            };
            self.touches.remove(index);
            if self.touches.is_empty() {
                log::debug!("touch gesture ended with {:?}", touch.id);
                delivered +=
                    self.deliver(touch.position, Phase::End, PointerSource::Touch(touch.id), sink);
            }
        }
        delivered
    }

    /// Window-level events only count while the capture fallback is attached.
    fn accepts(&self, origin: EventOrigin) -> bool {
        match origin {
            EventOrigin::Element => true,
            EventOrigin::Window => self.escaped,
        }
    }

    fn deliver<S: GestureSink + ?Sized>(
        &self,
        position: Point,
        phase: Phase,
        source: PointerSource,
        sink: &mut S,
    ) -> usize {
        let sample = Sample {
            position,
            phase,
            source,
        };
        log::trace!("gesture sample {sample:?}");
        sink.on_sample(&sample, self.active(), self.escaped);
        1
    }
}

impl Default for GestureUnifier {
    fn default() -> Self {
        Self::new()
    }
}
