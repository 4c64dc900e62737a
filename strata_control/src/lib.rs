// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Control: interactive hotspots with a small press/release state machine.
//!
//! ## Overview
//!
//! A [`Control`] is a button or toggle: an optional hit area, zero or more bound keys, an
//! enabled flag and a [`ControlState`] that is advanced once per frame by
//! [`Control::update`]. Screens own their controls in a [`Controls`] collection and read the
//! state after the router has updated them, typically reacting to
//! [`Control::is_just_off`] (a completed click).
//!
//! ## States
//!
//! - [`ControlState::JustOn`] for exactly one update after the control becomes pressed,
//!   then [`ControlState::On`] while it stays pressed.
//! - [`ControlState::JustOff`] for exactly one update after a completed press, then
//!   [`ControlState::Off`].
//!
//! A pointer dragged out of the area before release cancels the press without a `JustOff`.
//! A disabled control never becomes pressed and drops straight to `Off` when disabled mid-press.
//!
//! ## Flash
//!
//! Keyboard shortcuts and between-frame taps are delivered as *flashes*
//! ([`Control::flash_key`], [`Control::flash_pointer`], [`Control::flash`]). A flash reads as
//! a press on the next update and as a release on the one after, so shortcut-triggered actions
//! go through the same `JustOn`/`JustOff` sequence as clicks. It also lights the control for a
//! short, independently timed highlight.
//!
//! ```
//! use kurbo::Rect;
//! use strata_control::{Control, ControlInput, ControlState};
//! use strata_input::{InputSnapshot, KeyCode};
//!
//! let mut close = Control::new(Some(Rect::new(0.1, 0.1, 0.3, 0.2)), true)
//!     .with_name("Close")
//!     .with_keys([KeyCode(27)]);
//!
//! let input = InputSnapshot::new(kurbo::Size::new(800.0, 600.0));
//! assert!(close.flash_key(KeyCode(27)));
//!
//! close.update(&ControlInput::new(&[], &input));
//! assert_eq!(close.state(), ControlState::JustOn);
//! close.update(&ControlInput::new(&[], &input));
//! assert!(close.is_just_off());
//! ```
//!
//! ## Drawing
//!
//! Controls draw themselves through the [`UiDrawer`] trait: a tinted rectangle for the button
//! and a centred label in the text pass. The palette lives in [`palette`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod control;
mod draw;
mod options;
pub mod palette;

pub use control::{
    Control, ControlFeedback, ControlId, ControlInput, ControlState, Controls, DEFAULT_FLASH_DURATION,
};
pub use draw::{Color, DrawMode, ImageId, UiDrawer};
pub use options::{ControlScheme, KeyMap, ParseControlSchemeError};
