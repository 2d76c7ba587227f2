// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window-level capture fallback bookkeeping.

/// The host side of capture fallback.
///
/// While a gesture has left the widget's bounds, the element stops seeing
/// mouse moves and releases. The host then routes window-level moves and
/// releases to the widget with [`EventOrigin::Window`](crate::EventOrigin::Window).
pub trait CaptureHost {
    /// Starts routing window-level mouse move and release events to the widget.
    fn attach_window_listeners(&mut self);

    /// Stops routing window-level mouse events to the widget.
    fn detach_window_listeners(&mut self);
}

/// Reference-counted attach/detach pairing for one widget.
///
/// The first [`acquire`](Self::acquire) attaches the window listeners and the
/// matching last [`release`](Self::release) detaches them, so every detach
/// matches exactly one attach. Releasing an unheld guard does nothing.
///
/// ```rust
/// use knobwork_gesture::{CaptureGuard, CaptureHost};
///
/// #[derive(Default)]
/// struct Host { attached: u32 }
/// impl CaptureHost for Host {
///     fn attach_window_listeners(&mut self) { self.attached += 1; }
///     fn detach_window_listeners(&mut self) { self.attached -= 1; }
/// }
///
/// let mut host = Host::default();
/// let mut guard = CaptureGuard::new();
/// assert!(guard.acquire(&mut host));
/// assert!(!guard.acquire(&mut host));
/// assert!(!guard.release(&mut host));
/// assert!(guard.release(&mut host));
/// assert!(!guard.release(&mut host));
/// assert_eq!(host.attached, 0);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureGuard {
    holders: u32,
}

impl CaptureGuard {
    /// Creates an unheld guard.
    #[must_use]
    pub const fn new() -> Self {
        Self { holders: 0 }
    }

    /// Returns `true` while the window listeners are attached.
    #[must_use]
    #[inline]
    pub fn is_active(&self) -> bool {
        self.holders > 0
    }

    /// Adds a holder. Returns `true` if this call attached the listeners.
    pub fn acquire<H: CaptureHost + ?Sized>(&mut self, host: &mut H) -> bool {
        self.holders += 1;
        if self.holders == 1 {
            log::debug!("attaching window capture listeners");
            host.attach_window_listeners();
            true
        } else {
            false
        }
    }

    /// Drops a holder. Returns `true` if this call detached the listeners.
    pub fn release<H: CaptureHost + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.holders {
            0 => false,
            1 => {
                self.holders = 0;
                log::debug!("detaching window capture listeners");
                host.detach_window_listeners();
                true
            }
            _ => {
                self.holders -= 1;
                false
            }
        }
    }
}
