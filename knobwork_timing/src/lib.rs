// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knobwork Timing: host-agnostic recurring timer primitives.
//!
//! Controls that keep changing a value while a gesture is held (a scrubber
//! stepping its pending value, for example) need a recurring timer. The host
//! environment owns the real clock, so this crate only describes the contract:
//!
//! - [`TimerHost`]: schedule and cancel repeating timers, identified by [`TimerId`].
//!   The host calls back into the control with the id each time a timer fires.
//! - [`Interval`]: a slot holding at most one scheduled timer. Every path that
//!   restarts or changes the period cancels the previous timer first, so a
//!   control can never leak a timer.
//! - [`TimerQueue`]: a deterministic [`TimerHost`] driven by a manual clock,
//!   for headless hosts and tests.
//!
//! ## Example
//!
//! ```rust
//! use core::time::Duration;
//! use knobwork_timing::{Interval, TimerQueue};
//!
//! let mut queue = TimerQueue::new();
//! let mut interval = Interval::new(Duration::from_millis(100));
//!
//! assert!(interval.ensure_running(&mut queue));
//! // Already running: nothing new is scheduled.
//! assert!(!interval.ensure_running(&mut queue));
//! assert_eq!(queue.len(), 1);
//!
//! let mut fired = 0;
//! while let Some(id) = queue.pop_due(Duration::from_millis(350)) {
//!     assert!(interval.is(id));
//!     fired += 1;
//! }
//! assert_eq!(fired, 3);
//!
//! interval.cancel(&mut queue);
//! assert!(queue.is_empty());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod interval;
mod queue;

use core::fmt;
use core::time::Duration;

pub use interval::Interval;
pub use queue::{MIN_PERIOD, TimerQueue};

/// Identifies one scheduled repeating timer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Creates a timer id from a raw value chosen by the host.
    #[must_use]
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimerId").field(&self.0).finish()
    }
}

/// The host side of recurring timers.
///
/// Implementations fire each scheduled timer every `period` until it is
/// cancelled, by calling back into whichever control scheduled it.
pub trait TimerHost {
    /// Schedules a repeating timer and returns its id.
    fn schedule_repeating(&mut self, period: Duration) -> TimerId;

    /// Cancels a timer. Returns `false` if it was not scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}
