// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events as the host reports them.

use kurbo::Point;

use crate::pointer::Touch;

/// Which listener saw a mouse event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventOrigin {
    /// A listener on the widget's own element.
    #[default]
    Element,
    /// A window-level fallback listener, attached while a gesture has escaped
    /// the widget's bounds.
    Window,
}

/// One raw input event addressed to a widget.
///
/// Mouse buttons are host indices (`0` primary). Touch events carry the touch
/// points that changed, each with its stable identifier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent<'a> {
    /// A mouse button went down over the widget.
    MouseDown {
        /// Button index.
        button: u8,
        /// Pointer position.
        position: Point,
    },
    /// The mouse moved.
    MouseMove {
        /// Pointer position.
        position: Point,
        /// Listener that saw the event.
        origin: EventOrigin,
    },
    /// A mouse button went up.
    MouseUp {
        /// Button index.
        button: u8,
        /// Pointer position.
        position: Point,
        /// Listener that saw the event.
        origin: EventOrigin,
    },
    /// The mouse entered the widget's bounds.
    MouseEnter,
    /// The mouse left the widget's bounds.
    MouseLeave,
    /// Touches started on the widget.
    TouchStart(&'a [Touch]),
    /// Touches moved.
    TouchMove(&'a [Touch]),
    /// Touches lifted.
    TouchEnd(&'a [Touch]),
    /// The host cancelled touches.
    TouchCancel(&'a [Touch]),
}

impl InputEvent<'_> {
    /// Element-level mouse move.
    #[must_use]
    pub const fn mouse_move(position: Point) -> Self {
        Self::MouseMove {
            position,
            origin: EventOrigin::Element,
        }
    }

    /// Element-level mouse release.
    #[must_use]
    pub const fn mouse_up(button: u8, position: Point) -> Self {
        Self::MouseUp {
            button,
            position,
            origin: EventOrigin::Element,
        }
    }

    /// Returns `true` for touch events.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            Self::TouchStart(_) | Self::TouchMove(_) | Self::TouchEnd(_) | Self::TouchCancel(_)
        )
    }
}

/// Host state that gesture handling may consult.
///
/// The host owns this value and passes it in with each event; nothing about
/// it is global.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GestureContext {
    /// The page or container is scrolling. New touches are ignored so a
    /// scroll swipe does not also drive a widget.
    pub scrolling: bool,
}

impl GestureContext {
    /// A context with no scroll in progress.
    pub const IDLE: Self = Self { scrolling: false };
}
