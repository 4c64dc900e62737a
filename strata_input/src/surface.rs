// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host input surface and a buffered implementation of it.

use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::pointer::POINTER_COUNT;
use crate::types::KeyCode;

/// Read-only view of the host's raw input state for the current frame.
///
/// Positions are in window pixels with the origin at the top-left corner.
/// Implementations must tolerate any `slot` value: slots the host does not track should report
/// "not down" and an arbitrary position.
pub trait InputSurface {
    /// Current window size in pixels.
    fn window_size(&self) -> Size;
    /// Raw position of the pointer in `slot`.
    fn pointer_position(&self, slot: usize) -> Point;
    /// Whether the pointer in `slot` is currently touching / has its primary button held.
    fn is_pointer_down(&self, slot: usize) -> bool;
    /// Whether `key` is currently held.
    fn is_key_down(&self, key: KeyCode) -> bool;
}

/// A frozen copy of raw input, suitable for hosts that accumulate events between frames and
/// for driving the router in tests.
#[derive(Clone, Debug)]
pub struct InputSnapshot {
    window: Size,
    pointers: [(Point, bool); POINTER_COUNT],
    keys: SmallVec<[KeyCode; 8]>,
}

impl InputSnapshot {
    /// Create an empty snapshot for a window of the given size.
    pub fn new(window: Size) -> Self {
        Self {
            window,
            pointers: [(Point::ZERO, false); POINTER_COUNT],
            keys: SmallVec::new(),
        }
    }

    /// Resize the window.
    pub fn set_window_size(&mut self, window: Size) {
        self.window = window;
    }

    /// Set raw position and down state of `slot`. Out-of-range slots are ignored.
    pub fn set_pointer(&mut self, slot: usize, position: Point, down: bool) {
        if let Some(p) = self.pointers.get_mut(slot) {
            *p = (position, down);
        }
    }

    /// Move `slot` without changing its down state.
    pub fn move_pointer(&mut self, slot: usize, position: Point) {
        if let Some(p) = self.pointers.get_mut(slot) {
            p.0 = position;
        }
    }

    /// Mark `key` as held or released.
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        let held = self.keys.iter().position(|k| *k == key);
        match (held, down) {
            (None, true) => self.keys.push(key),
            (Some(i), false) => {
                self.keys.swap_remove(i);
            }
            _ => {}
        }
    }
}

impl InputSurface for InputSnapshot {
    fn window_size(&self) -> Size {
        self.window
    }

    fn pointer_position(&self, slot: usize) -> Point {
        self.pointers.get(slot).map_or(Point::ZERO, |p| p.0)
    }

    fn is_pointer_down(&self, slot: usize) -> bool {
        self.pointers.get(slot).is_some_and(|p| p.1)
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }
}
