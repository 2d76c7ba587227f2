// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knobwork Gesture: one gesture stream from mouse buttons and touches.
//!
//! A draggable control wants to see "the pointer is here, the gesture is still
//! going" and "the gesture is over, commit". Hosts deliver something messier:
//! per-button presses and releases, touches with identifiers, and enter/leave
//! transitions that stop element-level events once the pointer is outside the
//! control. [`GestureUnifier`] reduces all of that to ordered [`Sample`]s.
//!
//! ## States
//!
//! Each modality goes `Idle → Engaged → Idle`:
//!
//! - Mouse: engaged while any button in the [`ButtonMask`] is held. The first
//!   press delivers a [`Phase::Start`] sample at the press position; releasing
//!   the last button delivers the [`Phase::End`] sample.
//! - Touch: engaged while any tracked [`TouchId`] is active, up to a maximum
//!   (two by default). Touches beyond the maximum are ignored entirely.
//!
//! While the mouse is engaged, leaving the control's bounds sets the *escaped*
//! flag and attaches window-level listeners through [`CaptureHost`]; events
//! from those listeners carry [`EventOrigin::Window`]. Re-entering or releasing
//! detaches them. A [`CaptureGuard`] pairs every attach with one detach.
//!
//! ## Ordering
//!
//! Samples of one gesture are delivered in event order, and nothing of that
//! gesture follows its terminal sample. Mouse and touch are tracked
//! independently and may overlap; a consumer sharing one pending value
//! between them sees whichever modality wrote last.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use knobwork_gesture::{
//!     ActivePointers, CaptureHost, EventOrigin, GestureContext, GestureSink, GestureUnifier,
//!     InputEvent, Sample,
//! };
//!
//! #[derive(Default)]
//! struct Window { listening: bool }
//! impl CaptureHost for Window {
//!     fn attach_window_listeners(&mut self) { self.listening = true; }
//!     fn detach_window_listeners(&mut self) { self.listening = false; }
//! }
//!
//! #[derive(Default)]
//! struct Terminals(u32);
//! impl GestureSink for Terminals {
//!     fn on_sample(&mut self, s: &Sample, _: ActivePointers, _: bool) {
//!         if s.is_terminal() { self.0 += 1; }
//!     }
//! }
//!
//! let mut unifier = GestureUnifier::new();
//! let mut window = Window::default();
//! let mut sink = Terminals::default();
//! let cx = GestureContext::IDLE;
//! let p = Point::new(10.0, 10.0);
//!
//! unifier.handle(&InputEvent::MouseDown { button: 0, position: p }, cx, &mut sink, &mut window);
//! unifier.handle(&InputEvent::MouseLeave, cx, &mut sink, &mut window);
//! assert!(window.listening);
//!
//! let up = InputEvent::MouseUp { button: 0, position: p, origin: EventOrigin::Window };
//! unifier.handle(&up, cx, &mut sink, &mut window);
//! assert!(!window.listening);
//! assert_eq!(sink.0, 1);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod capture;
mod event;
mod pointer;
mod unifier;

pub use capture::{CaptureGuard, CaptureHost};
pub use event::{EventOrigin, GestureContext, InputEvent};
pub use pointer::{ActivePointers, ButtonMask, Phase, PointerSource, Sample, Touch, TouchId};
pub use unifier::{DEFAULT_MAX_TOUCHES, GestureSink, GestureUnifier};
