// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical pointers and the per-frame tracker that fills them.
//!
//! ## Slots
//!
//! The tracker owns a fixed pool of [`POINTER_COUNT`] pointers. Slot `0` is the mouse (or the
//! first finger on touch hosts) and doubles as the cursor position. Slots are never created or
//! destroyed; they are overwritten every frame.
//!
//! ## Flash pointer
//!
//! Touch events can start and end between two frames, in which case frame sampling never sees
//! the slot pressed. Hosts forward such taps to [`PointerTracker::set_flash`], which normalizes
//! the position into a separate pointer that the router hit-tests against controls the same
//! way it treats sampled pointers.

use kurbo::{Point, Size};

use crate::surface::InputSurface;

/// Number of logical pointer slots tracked per frame.
pub const POINTER_COUNT: usize = 4;

/// A logical pointer in normalized coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pointer {
    /// Normalized position. Unspecified for slots that are not in use.
    pub position: Point,
    /// Whether the pointer is down this frame.
    pub pressed: bool,
    /// Whether the pointer was down last frame.
    pub prev_pressed: bool,
}

impl Pointer {
    /// Create a pointer at `position` that is neither pressed nor was pressed.
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            pressed: false,
            prev_pressed: false,
        }
    }

    /// Pressed this frame but not the previous one.
    pub const fn is_just_pressed(&self) -> bool {
        self.pressed && !self.prev_pressed
    }

    /// Released this frame after being pressed the previous one.
    pub const fn is_just_released(&self) -> bool {
        !self.pressed && self.prev_pressed
    }
}

/// Maps window pixels into the aspect-stable normalized space.
///
/// With `h` the current window height, `r0` the aspect ratio at startup and `r` the current
/// aspect ratio:
///
/// - `x = raw.x / h * (r0 / r)`
/// - `y = raw.y / h`
///
/// A point at the same fraction of the window therefore maps to the same normalized point no
/// matter how the window is resized, which keeps layout rectangles valid.
///
/// ```
/// use kurbo::{Point, Size};
/// use strata_input::Normalizer;
///
/// let n = Normalizer::new(Size::new(1600.0, 900.0));
/// let a = n.normalize(Point::new(800.0, 450.0), Size::new(1600.0, 900.0)).unwrap();
/// let b = n.normalize(Point::new(400.0, 300.0), Size::new(800.0, 600.0)).unwrap();
/// assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalizer {
    initial_ratio: f64,
}

impl Normalizer {
    /// Capture the reference aspect ratio from the initial window size.
    ///
    /// A degenerate initial size (zero or negative extent) falls back to a square reference.
    pub fn new(initial_window: Size) -> Self {
        Self {
            initial_ratio: aspect_ratio(initial_window).unwrap_or(1.0),
        }
    }

    /// Reference aspect ratio (width / height) captured at construction.
    pub const fn initial_ratio(&self) -> f64 {
        self.initial_ratio
    }

    /// Width of the normalized layout space. Height is always `1.0`.
    pub const fn layout_width(&self) -> f64 {
        self.initial_ratio
    }

    /// Normalize a raw window position.
    ///
    /// Returns `None` when the window is degenerate (minimized windows report a zero extent).
    pub fn normalize(&self, raw: Point, window: Size) -> Option<Point> {
        let current = aspect_ratio(window)?;
        let h = window.height;
        Some(Point::new(
            raw.x / h * (self.initial_ratio / current),
            raw.y / h,
        ))
    }
}

fn aspect_ratio(size: Size) -> Option<f64> {
    (size.width > 0.0 && size.height > 0.0).then(|| size.width / size.height)
}

/// Fixed pool of logical pointers refreshed once per frame.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    pointers: [Pointer; POINTER_COUNT],
    flash: Pointer,
    normalizer: Normalizer,
}

impl PointerTracker {
    /// Create a tracker whose reference aspect ratio is taken from `initial_window`.
    pub fn new(initial_window: Size) -> Self {
        Self {
            pointers: [Pointer::default(); POINTER_COUNT],
            flash: Pointer::default(),
            normalizer: Normalizer::new(initial_window),
        }
    }

    /// Sample every slot from `input`.
    ///
    /// When `clamp_primary` is set (the OS cursor is captured by the window), the raw position
    /// of slot `0` is clamped into the window before normalization.
    pub fn update<I: InputSurface + ?Sized>(&mut self, input: &I, clamp_primary: bool) {
        let window = input.window_size();
        for (slot, pointer) in self.pointers.iter_mut().enumerate() {
            let mut raw = input.pointer_position(slot);
            if clamp_primary && slot == 0 {
                raw = Point::new(
                    raw.x.clamp(0.0, window.width.max(0.0)),
                    raw.y.clamp(0.0, window.height.max(0.0)),
                );
            }
            if let Some(position) = self.normalizer.normalize(raw, window) {
                pointer.position = position;
            }
            pointer.prev_pressed = pointer.pressed;
            pointer.pressed = input.is_pointer_down(slot);
        }
    }

    /// All tracked pointers, slot order.
    pub const fn pointers(&self) -> &[Pointer; POINTER_COUNT] {
        &self.pointers
    }

    /// Pointer in `slot`, or `None` when the slot is out of range.
    pub fn pointer(&self, slot: usize) -> Option<&Pointer> {
        self.pointers.get(slot)
    }

    /// Slot `0`: the mouse, or the first touch.
    pub const fn primary(&self) -> &Pointer {
        &self.pointers[0]
    }

    /// Normalize `raw` into the flash pointer and return it.
    ///
    /// Returns `None`, leaving the flash pointer untouched, when the window is degenerate.
    pub fn set_flash(&mut self, raw: Point, window: Size) -> Option<Pointer> {
        let position = self.normalizer.normalize(raw, window)?;
        self.flash = Pointer::at(position);
        Some(self.flash)
    }

    /// The synthetic pointer last written by [`PointerTracker::set_flash`].
    pub const fn flash_pointer(&self) -> &Pointer {
        &self.flash
    }

    /// The normalizer shared by sampled and flash pointers.
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}
