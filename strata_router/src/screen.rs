// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The screen capability set and the context handed to screen hooks.

use smallvec::SmallVec;
use strata_control::{Controls, UiDrawer};
use strata_input::{Pointer, ScrollDirection};

/// Handle to a screen registered with a [`Router`](crate::Router).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenId(u32);

impl ScreenId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Registration order, starting at `0`.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Navigation requested from inside a hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NavRequest {
    Set(ScreenId),
    Add(ScreenId),
}

/// Context for hooks that may navigate.
///
/// Requests are applied by the router right after the hook returns, in the order they were
/// made. The active list itself only changes at the end of the frame.
pub struct ScreenCx<'a, A: ?Sized> {
    /// The application.
    pub app: &'a mut A,
    requests: &'a mut SmallVec<[NavRequest; 2]>,
}

impl<'a, A: ?Sized> ScreenCx<'a, A> {
    pub(crate) fn new(app: &'a mut A, requests: &'a mut SmallVec<[NavRequest; 2]>) -> Self {
        Self { app, requests }
    }

    /// Replace every active screen with `id`.
    pub fn set_screen(&mut self, id: ScreenId) {
        self.requests.push(NavRequest::Set(id));
    }

    /// Put `id` on top of the stack.
    pub fn add_screen(&mut self, id: ScreenId) {
        self.requests.push(NavRequest::Add(id));
    }
}

impl<A: ?Sized> core::fmt::Debug for ScreenCx<'_, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScreenCx")
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

/// Per-frame input of [`Screen::update`].
#[derive(Copy, Clone, Debug)]
pub struct ScreenFrame<'a> {
    /// Tracked pointers, slot order.
    pub pointers: &'a [Pointer],
    /// A pointer was released outside this screen's background and no screen above claimed it.
    ///
    /// Only one screen that [reacts to outside clicks](Screen::reacts_to_click_outside) sees
    /// this set per release. Screens that do not react may see it set alongside the claimer
    /// and should ignore it.
    pub clicked_outside: bool,
    /// Scroll reported since the previous frame.
    pub scroll: Option<ScrollDirection>,
    /// Seconds since the previous frame.
    pub dt: f64,
}

/// A layer of the UI.
///
/// Screens own their [`Controls`]; the router updates and draws them. Every other hook has a
/// default so simple screens only provide their controls.
pub trait Screen<A: ?Sized> {
    /// Controls in update and draw order.
    fn controls(&self) -> &Controls;

    /// Mutable access to the controls.
    fn controls_mut(&mut self) -> &mut Controls;

    /// Called when the screen is added, including when it is already active.
    fn on_add(&mut self, cx: &mut ScreenCx<'_, A>) {
        let _ = cx;
    }

    /// Called every frame after the screen's controls have been updated.
    fn update(&mut self, cx: &mut ScreenCx<'_, A>, frame: &ScreenFrame<'_>) {
        let _ = (cx, frame);
    }

    /// Called when the screen is removed, after its controls were blurred.
    fn blur(&mut self, app: &mut A) {
        let _ = app;
    }

    /// Whether `pointer` rests on the screen's own background (a dialog body, a game view).
    fn is_cursor_on_background(&self, pointer: &Pointer) -> bool {
        let _ = pointer;
        false
    }

    /// Whether this screen consumes the clicked-outside signal, hiding it from screens below.
    fn reacts_to_click_outside(&self) -> bool {
        false
    }

    /// Draw behind the controls.
    fn draw_background(&self, app: &A, drawer: &mut dyn UiDrawer) {
        let _ = (app, drawer);
    }

    /// Draw images above the control buttons.
    fn draw_images(&self, app: &A, drawer: &mut dyn UiDrawer) {
        let _ = (app, drawer);
    }

    /// Draw text in the text pass, before control labels.
    fn draw_text(&self, app: &A, drawer: &mut dyn UiDrawer) {
        let _ = (app, drawer);
    }
}
