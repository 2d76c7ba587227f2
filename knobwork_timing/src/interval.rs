// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::{TimerHost, TimerId};

/// A slot for at most one repeating timer with a configurable period.
///
/// `Interval` does not tick by itself; it remembers which [`TimerId`] it owns
/// so that [`Interval::cancel`] and [`Interval::set_period`] always release the
/// previous timer before anything new is scheduled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    id: Option<TimerId>,
    period: Duration,
}

impl Interval {
    /// Creates an idle interval.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { id: None, period }
    }

    /// Returns the configured period.
    #[must_use]
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` while a timer is scheduled.
    #[must_use]
    #[inline]
    pub fn is_running(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the id of the scheduled timer, if any.
    #[must_use]
    #[inline]
    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// Returns `true` if `id` is the timer this interval owns.
    #[must_use]
    #[inline]
    pub fn is(&self, id: TimerId) -> bool {
        self.id == Some(id)
    }

    /// Schedules a timer unless one is already running.
    ///
    /// Returns `true` if a new timer was scheduled.
    pub fn ensure_running<H: TimerHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.id.is_some() {
            return false;
        }
        let id = host.schedule_repeating(self.period);
        log::debug!("interval scheduled {id:?} every {:?}", self.period);
        self.id = Some(id);
        true
    }

    /// Cancels the scheduled timer, if any.
    ///
    /// Returns `true` if a timer was cancelled.
    pub fn cancel<H: TimerHost + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.id.take() {
            Some(id) => {
                log::debug!("interval cancelled {id:?}");
                host.cancel(id);
                true
            }
            None => false,
        }
    }

    /// Changes the period.
    ///
    /// A running timer is cancelled and then rescheduled with the new period;
    /// an idle interval only records it.
    pub fn set_period<H: TimerHost + ?Sized>(&mut self, period: Duration, host: &mut H) {
        self.period = period;
        if self.cancel(host) {
            self.ensure_running(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimerQueue;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn new_interval_is_idle() {
        let interval = Interval::new(MS_100);
        assert!(!interval.is_running());
        assert_eq!(interval.id(), None);
        assert_eq!(interval.period(), MS_100);
    }

    #[test]
    fn cancel_when_idle_is_noop() {
        let mut queue = TimerQueue::new();
        let mut interval = Interval::new(MS_100);
        assert!(!interval.cancel(&mut queue));
        assert!(queue.is_empty());
    }

    #[test]
    fn set_period_while_running_replaces_timer() {
        let mut queue = TimerQueue::new();
        let mut interval = Interval::new(MS_100);
        interval.ensure_running(&mut queue);
        let first = interval.id().unwrap();

        interval.set_period(Duration::from_millis(40), &mut queue);

        let second = interval.id().unwrap();
        assert_ne!(first, second);
        assert!(!queue.is_scheduled(first));
        assert!(queue.is_scheduled(second));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(Duration::from_millis(40)), Some(second));
    }

    #[test]
    fn set_period_while_idle_does_not_schedule() {
        let mut queue = TimerQueue::new();
        let mut interval = Interval::new(MS_100);
        interval.set_period(Duration::from_millis(5), &mut queue);
        assert!(!interval.is_running());
        assert!(queue.is_empty());
        assert_eq!(interval.period(), Duration::from_millis(5));
    }

    #[test]
    fn works_through_trait_objects() {
        let mut queue = TimerQueue::new();
        let host: &mut dyn TimerHost = &mut queue;
        let mut interval = Interval::new(MS_100);
        assert!(interval.ensure_running(host));
        assert!(interval.cancel(host));
    }
}
