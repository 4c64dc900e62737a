// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrow interfaces to the application embedding the router.

use strata_control::{ControlScheme, ImageId, UiDrawer};

use crate::screen::ScreenId;

/// Audio cues requested by controls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The pointer started hovering a control.
    Hover,
    /// A press on a control with sound completed.
    Click,
}

/// The application as seen by the router.
///
/// The same value is handed to every [`Screen`](crate::Screen) hook, so screens reach the rest
/// of the application through it.
pub trait UiHost {
    /// Active control scheme, read every frame.
    fn control_scheme(&self) -> ControlScheme;

    /// Touch-first hosts never show a cursor and never capture the pointer.
    fn is_mobile(&self) -> bool {
        false
    }

    /// Image of the default UI cursor.
    fn ui_cursor(&self) -> ImageId;

    /// The running game session, if any.
    fn session(&self) -> Option<&dyn Session> {
        None
    }

    /// Play a UI cue. Failures are the host's to swallow.
    fn play_cue(&mut self, cue: SoundCue) {
        let _ = cue;
    }
}

/// A running game session.
pub trait Session {
    /// Cursor to show over the game view; `None` uses the UI cursor.
    fn cursor_image(&self) -> Option<ImageId> {
        None
    }

    /// Whether `screen` is the session's pause menu.
    ///
    /// Pointer capture, cursor hiding and the overlay are suspended while it is on top.
    fn is_menu_screen(&self, screen: ScreenId) -> bool {
        let _ = screen;
        false
    }

    /// Draw session-wide overlays such as tutorial hints above every screen.
    fn draw_overlay(&self, drawer: &mut dyn UiDrawer) {
        let _ = drawer;
    }
}
