// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=strata_router --heading-base-level=0

//! Strata Router: a frame-driven, `no_std` screen stack for game UI.
//!
//! ## Overview
//!
//! The [`Router`] owns every [`Screen`] of an application and decides, once per frame, which of
//! them receive input. Active screens form a stack with the topmost screen first. Input flows
//! down the stack until something consumes it; drawing goes the other way.
//!
//! ## Consumption
//!
//! Walking the stack from the top, each screen's controls are updated first. A control that is
//! pressed or was just released consumes the frame, and so does a pointer pressed on the screen's
//! background. Controls of screens below a consumer keep updating (so held keys and hover stay
//! coherent) but cannot start new presses.
//!
//! ## Clicked outside
//!
//! A pointer released off a screen's background is an outside click for that screen. The
//! topmost screen that [reacts to outside clicks](Screen::reacts_to_click_outside) claims the
//! signal; screens below it do not see it. Dialogs use this to close themselves.
//!
//! ## Navigation
//!
//! [`Router::set_screen`] replaces the stack, [`Router::add_screen`] pushes on top. Both may be
//! called from screen hooks through [`ScreenCx`]. Lifecycle hooks (blur, add) run immediately;
//! the active list only changes at the end of [`Router::update`], after every screen has had its
//! turn, so a screen removed mid-frame still finishes the frame.
//!
//! ## Cursor and warn pulse
//!
//! The router also picks the software cursor ([`cursor`]) and drives a triangle-wave
//! [`WarnPulse`] whose colour controls use for warn highlights.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use strata_control::{Control, ControlScheme, Controls, ImageId};
//! use strata_input::InputSnapshot;
//! use strata_router::{Router, Screen, ScreenCx, ScreenFrame, UiHost};
//!
//! struct App {
//!     quit: bool,
//! }
//!
//! impl UiHost for App {
//!     fn control_scheme(&self) -> ControlScheme {
//!         ControlScheme::Mouse
//!     }
//!     fn ui_cursor(&self) -> ImageId {
//!         ImageId(0)
//!     }
//! }
//!
//! struct MainMenu {
//!     controls: Controls,
//! }
//!
//! impl Screen<App> for MainMenu {
//!     fn controls(&self) -> &Controls {
//!         &self.controls
//!     }
//!     fn controls_mut(&mut self) -> &mut Controls {
//!         &mut self.controls
//!     }
//!     fn update(&mut self, cx: &mut ScreenCx<'_, App>, _frame: &ScreenFrame<'_>) {
//!         if self.controls.iter().any(|c| c.is_just_off()) {
//!             cx.app.quit = true;
//!         }
//!     }
//! }
//!
//! let window = Size::new(800.0, 600.0);
//! let mut router = Router::new(window);
//! let mut controls = Controls::new();
//! controls.push(Control::new(Some(Rect::new(0.0, 0.0, 0.5, 0.5)), true).with_name("Quit"));
//! let menu = router.register(MainMenu { controls });
//!
//! let mut app = App { quit: false };
//! router.set_screen(&mut app, menu);
//!
//! // Click at the top-left corner of the window.
//! let mut input = InputSnapshot::new(window);
//! router.update(&mut app, &input);
//! input.set_pointer(0, Point::new(10.0, 10.0), true);
//! router.update(&mut app, &input);
//! input.set_pointer(0, Point::new(10.0, 10.0), false);
//! router.update(&mut app, &input);
//! assert!(app.quit);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
pub mod cursor;
pub mod dispatcher;
mod host;
mod pulse;
mod router;
mod screen;
mod stack;

pub use config::RouterConfig;
pub use host::{Session, SoundCue, UiHost};
pub use pulse::WarnPulse;
pub use router::Router;
pub use screen::{Screen, ScreenCx, ScreenFrame, ScreenId};
pub use stack::{Applied, ScreenStack};
