// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer identities and the samples delivered to a [`GestureSink`](crate::GestureSink).

use kurbo::Point;

bitflags::bitflags! {
    /// Set of pressed mouse buttons, one bit per button index.
    ///
    /// Buttons are numbered as the host reports them (`0` primary, `1`
    /// auxiliary, `2` secondary, ...). Indices up to 31 are representable.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ButtonMask: u32 {
        /// Button 0, usually the left button.
        const PRIMARY = 1;
        /// Button 1, usually the wheel button.
        const AUXILIARY = 1 << 1;
        /// Button 2, usually the right button.
        const SECONDARY = 1 << 2;
        /// Button 3, usually "back".
        const BACK = 1 << 3;
        /// Button 4, usually "forward".
        const FORWARD = 1 << 4;

        // Hosts may report buttons beyond the named ones.
        const _ = !0;
    }
}

impl ButtonMask {
    /// The mask holding only `button`, or `None` for indices above 31.
    #[must_use]
    pub fn from_button(button: u8) -> Option<Self> {
        1_u32
            .checked_shl(u32::from(button))
            .map(Self::from_bits_retain)
    }
}

impl Default for ButtonMask {
    fn default() -> Self {
        Self::empty()
    }
}

/// Host-assigned identifier of one touch point, stable for the touch's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TouchId(pub u64);

/// One changed touch point in a touch event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Identifier of the touch.
    pub id: TouchId,
    /// Position in the host's coordinate space.
    pub position: Point,
}

impl Touch {
    /// Creates a touch point.
    #[must_use]
    pub const fn new(id: u64, position: Point) -> Self {
        Self {
            id: TouchId(id),
            position,
        }
    }
}

/// The device behind a [`Sample`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// The mouse, with any combination of buttons held.
    Mouse,
    /// One touch point.
    Touch(TouchId),
}

/// Where a [`Sample`] sits in its gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// First sample of a gesture: the modality went from idle to engaged.
    Start,
    /// Any sample between the first and the terminal one.
    Move,
    /// Terminal sample: the modality has no pointers left.
    ///
    /// No further sample follows for this gesture.
    End,
}

/// One unified position sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Pointer position in the host's coordinate space.
    pub position: Point,
    /// Position of this sample within its gesture.
    pub phase: Phase,
    /// Device that produced the sample.
    pub source: PointerSource,
}

impl Sample {
    /// Returns `true` for the terminal sample of a gesture.
    #[must_use]
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::End
    }
}

/// Pointers still driving a widget after a sample was applied.
///
/// A terminal mouse sample carries an empty button mask; a terminal touch
/// sample carries a touch count of zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActivePointers {
    /// Pressed mouse buttons.
    pub buttons: ButtonMask,
    /// Number of active touches.
    pub touches: u8,
}

impl ActivePointers {
    /// Returns `true` if neither a button nor a touch is active.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty() && self.touches == 0
    }

    /// Number of engaged pointers: pressed buttons plus active touches.
    #[must_use]
    #[inline]
    pub fn count(&self) -> u32 {
        self.buttons.bits().count_ones() + u32::from(self.touches)
    }
}
