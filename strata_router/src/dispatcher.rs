// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-screen input step of the top-down walk.
//!
//! The router calls [`route_screen`] for each active screen, topmost first, threading a
//! [`Walk`] through the calls. A screen can:
//!
//! - consume the frame, through a control that is pressed or just released, or through a
//!   pressed pointer on its background. Screens below then cannot start new presses.
//! - receive the clicked-outside signal when a pointer is released off its background. The
//!   first screen that receives it and reacts to outside clicks claims it, and screens below
//!   no longer receive it.
//! - put the primary pointer over UI, through a control area or its background.

use strata_control::{ControlFeedback, ControlInput};
use strata_input::Pointer;

use crate::screen::Screen;

bitflags::bitflags! {
    /// Outcome of routing input to one screen.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Routed: u8 {
        /// The screen consumed the frame.
        const CONSUMED        = 0b0000_0001;
        /// The screen receives the clicked-outside signal.
        const CLICKED_OUTSIDE = 0b0000_0010;
        /// The screen claimed the clicked-outside signal.
        const CLAIMED_OUTSIDE = 0b0000_0100;
        /// The primary pointer rests on one of the screen's controls or its background.
        const POINTER_OVER_UI = 0b0000_1000;
        /// A control started hovering.
        const HOVER_CUE       = 0b0001_0000;
        /// A control with sound completed a press.
        const CLICK_CUE       = 0b0010_0000;
    }
}

/// State carried from one screen to the next during a frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Walk {
    /// A screen above consumed the frame.
    pub consumed: bool,
    /// A screen above claimed the clicked-outside signal.
    pub outside_claimed: bool,
    /// The primary pointer rests on UI somewhere above.
    pub pointer_over_ui: bool,
}

impl Walk {
    /// Fold one screen's outcome into the walk.
    pub fn absorb(&mut self, routed: Routed) {
        self.consumed |= routed.contains(Routed::CONSUMED);
        self.outside_claimed |= routed.contains(Routed::CLAIMED_OUTSIDE);
        self.pointer_over_ui |= routed.contains(Routed::POINTER_OVER_UI);
    }
}

/// Update `screen`'s controls and hit-test its background.
///
/// `input.can_be_pressed` is overridden from `walk`. The screen's own update hook is not called.
pub fn route_screen<A: ?Sized>(
    screen: &mut dyn Screen<A>,
    input: &ControlInput<'_>,
    walk: &Walk,
) -> Routed {
    let mut routed = Routed::empty();
    let primary = input.pointers.first();
    let control_input = input.with_can_be_pressed(!walk.consumed);

    for control in screen.controls_mut().iter_mut() {
        let feedback = control.update(&control_input);
        if feedback.contains(ControlFeedback::CONSUMED) {
            routed |= Routed::CONSUMED;
        }
        if feedback.contains(ControlFeedback::HOVER_ENTERED) {
            routed |= Routed::HOVER_CUE;
        }
        if feedback.contains(ControlFeedback::CLICKED) {
            routed |= Routed::CLICK_CUE;
        }
        if let (Some(area), Some(p)) = (control.area(), primary)
            && area.contains(p.position)
        {
            routed |= Routed::POINTER_OVER_UI;
        }
    }

    if !walk.consumed && !routed.contains(Routed::CONSUMED) {
        routed |= hit_background(screen, input.pointers, walk.outside_claimed);
    }
    if routed.contains(Routed::CLICKED_OUTSIDE) && screen.reacts_to_click_outside() {
        routed |= Routed::CLAIMED_OUTSIDE;
    }
    if primary.is_some_and(|p| screen.is_cursor_on_background(p)) {
        routed |= Routed::POINTER_OVER_UI;
    }
    if !routed.is_empty() {
        tracing::trace!(?routed, "screen routed");
    }
    routed
}

fn hit_background<A: ?Sized>(
    screen: &dyn Screen<A>,
    pointers: &[Pointer],
    outside_claimed: bool,
) -> Routed {
    let mut routed = Routed::empty();
    for p in pointers {
        let on_background = screen.is_cursor_on_background(p);
        if p.pressed && on_background {
            // A press on the background wins over any release elsewhere.
            return Routed::CONSUMED;
        }
        if !on_background && p.is_just_released() && !outside_claimed {
            routed |= Routed::CLICKED_OUTSIDE;
        }
    }
    routed
}
