// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The control state machine and the per-screen control collection.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use kurbo::Rect;
use smallvec::SmallVec;
use strata_input::{InputSurface, KeyCode, Pointer};

use crate::draw::{Color, UiDrawer};
use crate::palette;

/// How long a flashed control stays highlighted, in seconds.
pub const DEFAULT_FLASH_DURATION: f64 = 0.15;

/// Number of updates a warn highlight survives without being re-armed.
const WARN_FRAMES: u8 = 2;

/// Interaction state of a [`Control`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControlState {
    /// Not pressed.
    #[default]
    Off,
    /// Pressed, and was already pressed last update.
    On,
    /// Became pressed this update.
    JustOn,
    /// A press completed this update.
    JustOff,
}

impl ControlState {
    /// `On` or `JustOn`.
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::On | Self::JustOn)
    }
}

bitflags::bitflags! {
    /// Side effects of a single [`Control::update`] for the caller to act on.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ControlFeedback: u8 {
        /// The pointer started hovering the control; play the hover cue.
        const HOVER_ENTERED = 0b0000_0001;
        /// A press completed on a control with sound; play the click cue.
        const CLICKED       = 0b0000_0010;
        /// The control holds or just released a press; input below it must not start presses.
        const CONSUMED      = 0b0000_0100;
    }
}

/// Per-frame input handed to [`Control::update`].
#[derive(Copy, Clone)]
pub struct ControlInput<'a> {
    /// Tracked pointers for this frame, slot order. Slot `0` drives hover.
    pub pointers: &'a [Pointer],
    /// Keyboard state.
    pub surface: &'a dyn InputSurface,
    /// Whether a cursor is drawn; hover is only tracked while it is.
    pub cursor_shown: bool,
    /// Whether the control may start a new press this frame.
    pub can_be_pressed: bool,
    /// Seconds since the previous update.
    pub dt: f64,
    /// Highlight duration armed by a flash.
    pub flash_duration: f64,
}

impl<'a> ControlInput<'a> {
    /// Input with the cursor shown, presses allowed and no elapsed time.
    pub fn new(pointers: &'a [Pointer], surface: &'a dyn InputSurface) -> Self {
        Self {
            pointers,
            surface,
            cursor_shown: true,
            can_be_pressed: true,
            dt: 0.0,
            flash_duration: DEFAULT_FLASH_DURATION,
        }
    }

    /// Set whether new presses are allowed.
    #[must_use]
    pub fn with_can_be_pressed(mut self, can_be_pressed: bool) -> Self {
        self.can_be_pressed = can_be_pressed;
        self
    }

    /// Set whether the cursor is shown.
    #[must_use]
    pub fn with_cursor_shown(mut self, cursor_shown: bool) -> Self {
        self.cursor_shown = cursor_shown;
        self
    }

    /// Set the elapsed time and the flash highlight duration.
    #[must_use]
    pub fn with_timing(mut self, dt: f64, flash_duration: f64) -> Self {
        self.dt = dt;
        self.flash_duration = flash_duration;
        self
    }
}

impl core::fmt::Debug for ControlInput<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControlInput")
            .field("pointers", &self.pointers)
            .field("cursor_shown", &self.cursor_shown)
            .field("can_be_pressed", &self.can_be_pressed)
            .field("dt", &self.dt)
            .finish_non_exhaustive()
    }
}

/// A single interactive hotspot.
///
/// A control without an area is key-only: it can be pressed through its keys or a flash but is
/// never hit by pointers and never drawn.
#[derive(Clone, Debug)]
pub struct Control {
    name: String,
    keys: SmallVec<[KeyCode; 2]>,
    area: Option<Rect>,
    enabled: bool,
    with_sound: bool,
    state: ControlState,
    key_pressed: bool,
    area_pressed: bool,
    flash_pressed: bool,
    pending_flash: bool,
    hovered: bool,
    flash_timer: f64,
    warn_frames: u8,
}

impl Control {
    /// Create an enabled control. `with_sound` makes completed presses request a click cue.
    pub fn new(area: Option<Rect>, with_sound: bool) -> Self {
        Self {
            name: String::new(),
            keys: SmallVec::new(),
            area,
            enabled: true,
            with_sound,
            state: ControlState::Off,
            key_pressed: false,
            area_pressed: false,
            flash_pressed: false,
            pending_flash: false,
            hovered: false,
            flash_timer: 0.0,
            warn_frames: 0,
        }
    }

    /// Set the label drawn in the text pass.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Bind keys that press the control while held.
    #[must_use]
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyCode>) -> Self {
        self.keys.extend(keys);
        self
    }

    /// Label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the label.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Bound keys.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Hit area in normalized coordinates.
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Move or remove the hit area.
    pub fn set_area(&mut self, area: Option<Rect>) {
        self.area = area;
    }

    /// Whether the control accepts input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable. A disabled control keeps being drawn, greyed out.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current state.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Pressed (`On` or `JustOn`) and enabled.
    pub fn is_on(&self) -> bool {
        self.enabled && self.state.is_pressed()
    }

    /// Became pressed during the last update.
    pub fn is_just_on(&self) -> bool {
        self.state == ControlState::JustOn
    }

    /// A press completed during the last update.
    pub fn is_just_off(&self) -> bool {
        self.state == ControlState::JustOff
    }

    /// Whether the control blocks new presses below it this frame.
    pub fn consumes_input(&self) -> bool {
        self.enabled && !matches!(self.state, ControlState::Off)
    }

    /// Whether the primary pointer rests on the control.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the flash highlight is still lit.
    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    /// Whether the warn highlight is armed.
    pub fn is_warning(&self) -> bool {
        self.warn_frames > 0
    }

    /// Highlight the control with the warn colour for the next couple of frames.
    ///
    /// Call every frame to keep the highlight lit.
    pub fn enable_warn(&mut self) {
        self.warn_frames = WARN_FRAMES;
    }

    /// Flash the control if `key` is bound to it.
    pub fn flash_key(&mut self, key: KeyCode) -> bool {
        if !self.enabled || !self.keys.contains(&key) {
            return false;
        }
        self.arm_flash();
        true
    }

    /// Flash the control if its area contains `pointer`.
    pub fn flash_pointer(&mut self, pointer: &Pointer) -> bool {
        if !self.enabled || !self.area.is_some_and(|a| a.contains(pointer.position)) {
            return false;
        }
        self.arm_flash();
        true
    }

    /// Flash the control unconditionally, for actions that did not come from its own inputs.
    pub fn flash(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.arm_flash();
        true
    }

    fn arm_flash(&mut self) {
        tracing::trace!(control = %self.name, "flash armed");
        self.pending_flash = true;
    }

    /// Advance the state machine by one frame.
    pub fn update(&mut self, input: &ControlInput<'_>) -> ControlFeedback {
        self.flash_timer = (self.flash_timer - input.dt).max(0.0);
        self.warn_frames = self.warn_frames.saturating_sub(1);

        if !self.enabled {
            self.blur();
            return ControlFeedback::empty();
        }

        let was_pressed = self.state.is_pressed();
        let held_by_area_only = self.area_pressed && !self.key_pressed && !self.flash_pressed;

        self.flash_pressed = core::mem::take(&mut self.pending_flash);
        if self.flash_pressed {
            self.flash_timer = input.flash_duration;
        }

        self.key_pressed = input.can_be_pressed
            && self.keys.iter().any(|k| input.surface.is_key_down(*k));

        self.area_pressed = false;
        let mut released_inside = false;
        if input.can_be_pressed
            && let Some(area) = self.area
        {
            for p in input.pointers.iter().filter(|p| area.contains(p.position)) {
                self.area_pressed |= p.pressed;
                released_inside |= p.is_just_released();
            }
        }

        let pressed = self.key_pressed || self.area_pressed || self.flash_pressed;
        self.state = match (was_pressed, pressed) {
            (false, true) => ControlState::JustOn,
            (true, true) => ControlState::On,
            // Dragging a pointer out of the area cancels the press.
            (true, false) if !held_by_area_only || released_inside => ControlState::JustOff,
            _ => ControlState::Off,
        };

        let mut feedback = ControlFeedback::empty();
        if self.update_hover(input) {
            feedback |= ControlFeedback::HOVER_ENTERED;
        }
        if self.with_sound && self.is_just_off() {
            feedback |= ControlFeedback::CLICKED;
        }
        if self.consumes_input() {
            feedback |= ControlFeedback::CONSUMED;
        }
        feedback
    }

    /// Returns `true` when hover started this update.
    fn update_hover(&mut self, input: &ControlInput<'_>) -> bool {
        let Some(area) = self.area else {
            return false;
        };
        let Some(primary) = input.pointers.first() else {
            return false;
        };
        // Hover is frozen while anything is held.
        if self.area_pressed || primary.pressed {
            return false;
        }
        let was = self.hovered;
        self.hovered =
            input.cursor_shown && input.can_be_pressed && area.contains(primary.position);
        self.hovered && !was
    }

    /// Force the control to `Off` and drop pending flashes.
    ///
    /// Called when the owning screen leaves the stack so no control is left mid-press.
    pub fn blur(&mut self) {
        self.key_pressed = false;
        self.area_pressed = false;
        self.flash_pressed = false;
        self.pending_flash = false;
        self.hovered = false;
        self.state = ControlState::Off;
    }

    /// Draw the button rectangle and, when armed, the warn overlay.
    pub fn draw_button(&self, drawer: &mut dyn UiDrawer, warn: Color) {
        let Some(area) = self.area else {
            return;
        };
        let tint = if !self.enabled {
            palette::UI_INACTIVE
        } else if self.is_on() || self.is_flashing() {
            palette::UI_LIGHT
        } else if self.hovered {
            palette::UI_MED
        } else {
            palette::UI_DARK
        };
        drawer.draw_rect(area, tint);
        if self.enabled && self.is_warning() {
            drawer.draw_rect(area, warn);
        }
    }

    /// Draw the label centred on the area.
    pub fn draw_label(&self, drawer: &mut dyn UiDrawer) {
        let Some(area) = self.area else {
            return;
        };
        if self.name.is_empty() {
            return;
        }
        let color = if self.enabled {
            palette::WHITE
        } else {
            palette::GREY
        };
        drawer.draw_text(&self.name, area.center(), color);
    }
}

/// Handle to a control inside a [`Controls`] collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

/// Ordered controls of one screen. Insertion order is update and draw order.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    items: Vec<Control>,
}

impl Controls {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a control.
    pub fn push(&mut self, control: Control) -> ControlId {
        self.items.push(control);
        ControlId(self.items.len() - 1)
    }

    /// Control by id.
    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.items.get(id.0)
    }

    /// Mutable control by id.
    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.items.get_mut(id.0)
    }

    /// Controls in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Control> {
        self.items.iter()
    }

    /// Mutable controls in insertion order.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Control> {
        self.items.iter_mut()
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no controls.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Blur every control.
    pub fn blur_all(&mut self) {
        self.items.iter_mut().for_each(Control::blur);
    }
}

impl Index<ControlId> for Controls {
    type Output = Control;

    fn index(&self, id: ControlId) -> &Control {
        &self.items[id.0]
    }
}

impl IndexMut<ControlId> for Controls {
    fn index_mut(&mut self, id: ControlId) -> &mut Control {
        &mut self.items[id.0]
    }
}

impl<'a> IntoIterator for &'a Controls {
    type Item = &'a Control;
    type IntoIter = core::slice::Iter<'a, Control>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
