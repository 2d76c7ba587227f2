// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic timer queue driven by a manual clock.

use core::time::Duration;

use smallvec::SmallVec;

use crate::{TimerHost, TimerId};

/// Shortest period the queue will honor.
///
/// A zero period would fire unboundedly often within one advance.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Copy, Clone, Debug)]
struct Entry {
    id: TimerId,
    deadline: Duration,
    period: Duration,
}

/// A [`TimerHost`] whose clock only moves when told to.
///
/// Timers fire in deadline order; ties fire in scheduling order. The caller
/// pulls due timers one at a time with [`TimerQueue::pop_due`], which lets the
/// control cancel or reschedule between fires.
///
/// ```rust
/// use core::time::Duration;
/// use knobwork_timing::{TimerHost, TimerQueue};
///
/// let mut queue = TimerQueue::new();
/// let fast = queue.schedule_repeating(Duration::from_millis(10));
/// let slow = queue.schedule_repeating(Duration::from_millis(25));
///
/// let until = Duration::from_millis(30);
/// let mut order = Vec::new();
/// while let Some(id) = queue.pop_due(until) {
///     order.push(id);
/// }
/// assert_eq!(order, [fast, fast, slow, fast]);
/// queue.advance_to(until);
/// assert_eq!(queue.now(), until);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    entries: SmallVec<[Entry; 4]>,
}

impl TimerQueue {
    /// Creates an empty queue with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current clock reading.
    #[must_use]
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns the number of scheduled timers.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are scheduled.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` is scheduled.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Fires the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline and the timer is rescheduled
    /// one period later. Returns `None` when nothing is due; the clock is then
    /// left where it was, see [`TimerQueue::advance_to`].
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let mut due: Option<usize> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.deadline > until {
                continue;
            }
            match due {
                Some(best) if self.entries[best].deadline <= entry.deadline => {}
                _ => due = Some(i),
            }
        }
        let entry = &mut self.entries[due?];
        self.now = self.now.max(entry.deadline);
        entry.deadline += entry.period;
        log::trace!("timer {:?} fired at {:?}", entry.id, self.now);
        Some(entry.id)
    }

    /// Moves the clock forward to `until` without firing anything.
    ///
    /// Call this after draining [`TimerQueue::pop_due`]. The clock never moves
    /// backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl TimerHost for TimerQueue {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline: self.now + period,
            period,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_due_before_first_period() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(ms(100));
        assert_eq!(queue.pop_due(ms(99)), None);
        assert_eq!(queue.now(), Duration::ZERO);
        assert_eq!(queue.next_deadline(), Some(ms(100)));
    }

    #[test]
    fn repeating_timer_fires_each_period() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(ms(100));
        let mut fired = 0;
        while let Some(got) = queue.pop_due(ms(1000)) {
            assert_eq!(got, id);
            fired += 1;
        }
        assert_eq!(fired, 10);
        assert_eq!(queue.now(), ms(1000));
    }

    #[test]
    fn schedule_after_advance_uses_current_clock() {
        let mut queue = TimerQueue::new();
        queue.advance_to(ms(500));
        queue.schedule_repeating(ms(100));
        assert_eq!(queue.next_deadline(), Some(ms(600)));
    }

    #[test]
    fn cancelled_timer_stops_firing() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(ms(10));
        assert_eq!(queue.pop_due(ms(10)), Some(id));
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert_eq!(queue.pop_due(ms(100)), None);
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(Duration::ZERO);
        assert_eq!(queue.next_deadline(), Some(MIN_PERIOD));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut queue = TimerQueue::new();
        queue.advance_to(ms(50));
        queue.advance_to(ms(20));
        assert_eq!(queue.now(), ms(50));
    }

    #[test]
    fn ids_are_unique() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule_repeating(ms(1));
        queue.cancel(a);
        let b = queue.schedule_repeating(ms(1));
        assert_ne!(a, b);
    }
}
