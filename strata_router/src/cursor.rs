// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor selection.
//!
//! The cursor is software drawn. Which image (if any) is shown depends on the host, the control
//! scheme and whether the primary pointer rests on UI:
//!
//! - Mobile hosts never show a cursor.
//! - Pointer-driven schemes show the UI cursor outside of a session and over UI, otherwise the
//!   session's cursor.
//! - The keyboard scheme shows the UI cursor, and hides it once the mouse has been idle for
//!   the configured threshold during a session whose top screen is not the menu.

use kurbo::Point;
use strata_control::{ControlScheme, ImageId};

/// Everything [`CursorPolicy::update`] looks at for one frame.
#[derive(Copy, Clone, Debug)]
pub struct CursorFrame {
    /// Host is touch-first.
    pub mobile: bool,
    /// Active control scheme.
    pub scheme: ControlScheme,
    /// A session is running.
    pub session_active: bool,
    /// The top screen is the session's menu.
    pub top_is_menu: bool,
    /// The primary pointer rests on a control or a screen background.
    pub pointer_over_ui: bool,
    /// Primary pointer position.
    pub mouse: Point,
    /// Default cursor.
    pub ui_cursor: ImageId,
    /// Session cursor, when the session has one.
    pub session_cursor: Option<ImageId>,
    /// Seconds since the previous frame.
    pub dt: f64,
    /// Idle time after which the keyboard scheme hides the cursor.
    pub idle_threshold: f64,
}

/// Cursor image and mouse-idle bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CursorPolicy {
    image: Option<ImageId>,
    idle_time: f64,
    last_mouse: Point,
}

impl CursorPolicy {
    /// No cursor, no idle time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the cursor for this frame.
    pub fn update(&mut self, frame: &CursorFrame) {
        let next = self.select(frame);
        if next != self.image {
            tracing::trace!(from = ?self.image, to = ?next, "cursor changed");
            self.image = next;
        }
    }

    fn select(&mut self, frame: &CursorFrame) -> Option<ImageId> {
        if frame.mobile {
            return None;
        }
        if frame.scheme.is_pointer_driven() {
            if !frame.session_active || frame.pointer_over_ui {
                return Some(frame.ui_cursor);
            }
            return Some(frame.session_cursor.unwrap_or(frame.ui_cursor));
        }
        if frame.mouse == self.last_mouse && frame.session_active && !frame.top_is_menu {
            self.idle_time += frame.dt;
            return (self.idle_time < frame.idle_threshold).then_some(frame.ui_cursor);
        }
        self.idle_time = 0.0;
        self.last_mouse = frame.mouse;
        Some(frame.ui_cursor)
    }

    /// Cursor to draw, or `None` when hidden.
    pub fn image(&self) -> Option<ImageId> {
        self.image
    }

    /// Whether a cursor is drawn.
    pub fn is_visible(&self) -> bool {
        self.image.is_some()
    }

    /// Seconds the mouse has rested under the keyboard scheme.
    pub fn idle_time(&self) -> f64 {
        self.idle_time
    }
}
