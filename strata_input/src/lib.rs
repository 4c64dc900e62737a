// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Input: frame-sampled pointer tracking for layered UIs.
//!
//! ## Overview
//!
//! This crate turns raw, host-provided input (mouse, multi-touch, keyboard) into a small,
//! fixed set of logical [`Pointer`]s with press-edge detection.
//! It does not route input anywhere; higher layers (for example `strata_router`) read the
//! tracked pointers once per frame and decide which surface receives them.
//!
//! ## Coordinates
//!
//! Pointer positions are height-normalized: `y` runs from `0.0` at the top of the window to
//! `1.0` at the bottom, and `x` is scaled so that layout coordinates stay put when the window is
//! resized. The aspect ratio captured when the [`PointerTracker`] is created is the reference;
//! see [`Normalizer`] for the exact mapping.
//!
//! ## Sampling
//!
//! Call [`PointerTracker::update`] exactly once per frame with an [`InputSurface`].
//! Each slot shifts its `pressed` flag into `prev_pressed` before reading the new state, so
//! [`Pointer::is_just_pressed`] and [`Pointer::is_just_released`] hold for exactly one frame.
//!
//! ```
//! use kurbo::{Point, Size};
//! use strata_input::{InputSnapshot, PointerTracker};
//!
//! let window = Size::new(800.0, 600.0);
//! let mut tracker = PointerTracker::new(window);
//!
//! let mut input = InputSnapshot::new(window);
//! input.set_pointer(0, Point::new(400.0, 300.0), true);
//! tracker.update(&input, false);
//! assert!(tracker.primary().is_just_pressed());
//!
//! tracker.update(&input, false);
//! assert!(tracker.primary().pressed);
//! assert!(!tracker.primary().is_just_pressed());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod pointer;
mod surface;
mod types;

pub use pointer::{Normalizer, POINTER_COUNT, Pointer, PointerTracker};
pub use surface::{InputSnapshot, InputSurface};
pub use types::{KeyCode, ScrollDirection};
