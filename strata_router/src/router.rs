// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Frame
//!
//! [`Router::update`] runs, in order:
//!
//! 1. Pointer capture is decided and the pointer tracker samples the host input.
//! 2. Active screens are walked topmost first (see [`dispatcher`](crate::dispatcher)); after
//!    each screen's controls are updated, its update hook runs and any navigation it requested
//!    is applied.
//! 3. The cursor is chosen for the next frame.
//! 4. Queued removals, then queued additions, reach the active list.
//! 5. The warn pulse advances by one step.
//!
//! [`Router::draw`] walks the active list bottom-up, then draws the session overlay and the
//! cursor.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use strata_control::{Color, ControlInput, DrawMode, ImageId, UiDrawer, palette};
use strata_input::{InputSurface, KeyCode, POINTER_COUNT, Pointer, PointerTracker, ScrollDirection};

use crate::config::RouterConfig;
use crate::cursor::{CursorFrame, CursorPolicy};
use crate::dispatcher::{Routed, Walk, route_screen};
use crate::host::{SoundCue, UiHost};
use crate::pulse::WarnPulse;
use crate::screen::{NavRequest, Screen, ScreenCx, ScreenFrame, ScreenId};
use crate::stack::{Applied, ScreenStack};

type Requests = SmallVec<[NavRequest; 2]>;

/// Owner of every screen and of the per-frame routing state.
///
/// ## Usage
///
/// - [`Router::register`] each screen once and keep the returned [`ScreenId`].
/// - [`Router::set_screen`] or [`Router::add_screen`] to build the stack.
/// - Call [`Router::update`] then [`Router::draw`] once per frame.
/// - Forward between-frame key presses and taps to [`Router::flash_key`] and
///   [`Router::flash_at`], and scroll wheel events to [`Router::notify_scroll`].
pub struct Router<A: ?Sized> {
    config: RouterConfig,
    screens: Vec<Box<dyn Screen<A>>>,
    stack: ScreenStack,
    tracker: PointerTracker,
    cursor: CursorPolicy,
    warn: WarnPulse,
    scroll: Option<ScrollDirection>,
    pointer_over_ui: bool,
    captured: bool,
}

impl<A: ?Sized> core::fmt::Debug for Router<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("screens", &self.screens.len())
            .field("stack", &self.stack)
            .field("cursor", &self.cursor)
            .field("pointer_over_ui", &self.pointer_over_ui)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct SessionState {
    active: bool,
    top_is_menu: bool,
    cursor: Option<ImageId>,
}

impl<A: UiHost + ?Sized> Router<A> {
    /// Create a router with the default configuration.
    ///
    /// `initial_window` fixes the reference aspect ratio of the normalized layout space.
    pub fn new(initial_window: Size) -> Self {
        Self::with_config(initial_window, RouterConfig::default())
    }

    /// Create a router with an explicit configuration.
    pub fn with_config(initial_window: Size, config: RouterConfig) -> Self {
        Self {
            config,
            screens: Vec::new(),
            stack: ScreenStack::new(),
            tracker: PointerTracker::new(initial_window),
            cursor: CursorPolicy::new(),
            warn: WarnPulse::new(),
            scroll: None,
            pointer_over_ui: false,
            captured: false,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Take ownership of `screen` and return its handle. The screen is not activated.
    pub fn register<S: Screen<A> + 'static>(&mut self, screen: S) -> ScreenId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ScreenId uses 32-bit indices; registries never get near that."
        )]
        let id = ScreenId::new(self.screens.len() as u32);
        self.screens.push(Box::new(screen));
        id
    }

    /// A registered screen.
    pub fn screen(&self, id: ScreenId) -> Option<&dyn Screen<A>> {
        let screen = self.screens.get(id.index())?;
        Some(&**screen)
    }

    /// A registered screen, mutably.
    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut dyn Screen<A>> {
        let screen = self.screens.get_mut(id.index())?;
        Some(&mut **screen)
    }

    fn is_registered(&self, id: ScreenId) -> bool {
        id.index() < self.screens.len()
    }

    /// Replace every active screen with `id`.
    ///
    /// Active screens, and screens still waiting to be added, are blurred right away; the
    /// active list changes at the end of the next [`Router::update`].
    pub fn set_screen(&mut self, app: &mut A, id: ScreenId) {
        if !self.is_registered(id) {
            tracing::warn!(screen = id.raw(), "set_screen: unknown screen");
            return;
        }
        tracing::debug!(screen = id.raw(), "set screen");
        let cancelled = self.stack.cancel_pending_adds();
        let active: SmallVec<[ScreenId; 8]> = self.stack.active().iter().copied().collect();
        for old in active.into_iter().chain(cancelled) {
            self.remove_screen(app, old);
        }
        self.add_screen(app, id);
    }

    /// Put `id` on top of the stack at the end of the next [`Router::update`].
    ///
    /// The add hook runs right away, even when the screen is already active.
    pub fn add_screen(&mut self, app: &mut A, id: ScreenId) {
        let Some(screen) = self.screens.get_mut(id.index()) else {
            tracing::warn!(screen = id.raw(), "add_screen: unknown screen");
            return;
        };
        tracing::debug!(screen = id.raw(), "add screen");
        self.stack.queue_add(id);
        let mut requests = Requests::new();
        screen.on_add(&mut ScreenCx::new(app, &mut requests));
        self.apply_requests(app, requests);
    }

    fn remove_screen(&mut self, app: &mut A, id: ScreenId) {
        let Some(screen) = self.screens.get_mut(id.index()) else {
            return;
        };
        tracing::debug!(screen = id.raw(), "remove screen");
        self.stack.queue_remove(id);
        screen.controls_mut().blur_all();
        screen.blur(app);
    }

    fn apply_requests(&mut self, app: &mut A, requests: Requests) {
        for request in requests {
            match request {
                NavRequest::Set(id) => self.set_screen(app, id),
                NavRequest::Add(id) => self.add_screen(app, id),
            }
        }
    }

    fn session_state(&self, app: &A) -> SessionState {
        let Some(session) = app.session() else {
            return SessionState::default();
        };
        SessionState {
            active: true,
            top_is_menu: self.stack.top().is_some_and(|top| session.is_menu_screen(top)),
            cursor: session.cursor_image(),
        }
    }

    /// Run one frame of input routing.
    pub fn update(&mut self, app: &mut A, input: &dyn InputSurface) {
        let session = self.session_state(app);
        self.captured = !app.is_mobile()
            && app.control_scheme().is_pointer_driven()
            && session.active
            && !session.top_is_menu;
        self.tracker.update(input, self.captured);

        let pointers = *self.tracker.pointers();
        let scroll = self.scroll.take();
        let dt = self.config.time_step;
        let control_input = ControlInput::new(&pointers, input)
            .with_cursor_shown(self.cursor.is_visible())
            .with_timing(dt, self.config.flash_duration);

        let mut walk = Walk::default();
        let active: SmallVec<[ScreenId; 8]> = self.stack.active().iter().copied().collect();
        for id in active {
            let Some(screen) = self.screens.get_mut(id.index()) else {
                continue;
            };
            let routed = route_screen(&mut **screen, &control_input, &walk);
            walk.absorb(routed);
            if routed.contains(Routed::HOVER_CUE) {
                app.play_cue(SoundCue::Hover);
            }
            if routed.contains(Routed::CLICK_CUE) {
                app.play_cue(SoundCue::Click);
            }

            let frame = ScreenFrame {
                pointers: &pointers,
                clicked_outside: routed.contains(Routed::CLICKED_OUTSIDE),
                scroll,
                dt,
            };
            let mut requests = Requests::new();
            screen.update(&mut ScreenCx::new(app, &mut requests), &frame);
            self.apply_requests(app, requests);
        }
        self.pointer_over_ui = walk.pointer_over_ui;

        let session = self.session_state(app);
        let cursor_frame = CursorFrame {
            mobile: app.is_mobile(),
            scheme: app.control_scheme(),
            session_active: session.active,
            top_is_menu: session.top_is_menu,
            pointer_over_ui: self.pointer_over_ui,
            mouse: self.mouse_position(),
            ui_cursor: app.ui_cursor(),
            session_cursor: session.cursor,
            dt,
            idle_threshold: self.config.cursor_idle_threshold,
        };
        self.cursor.update(&cursor_frame);

        let applied = self.stack.apply_pending();
        if applied != Applied::default() {
            tracing::debug!(
                removed = applied.removed,
                added = applied.added,
                top = ?self.stack.top(),
                "screen stack changed"
            );
        }

        self.warn
            .advance(self.config.time_step / self.config.warn_growth_time);
    }

    /// Draw every active screen bottom-up, then the session overlay and the cursor.
    pub fn draw(&self, app: &A, drawer: &mut dyn UiDrawer) {
        let warn = self.warn_color();
        for id in self.stack.active().iter().rev() {
            let Some(screen) = self.screens.get(id.index()) else {
                continue;
            };
            drawer.set_mode(Some(DrawMode::Images));
            screen.draw_background(app, drawer);
            for control in screen.controls() {
                control.draw_button(drawer, warn);
            }
            screen.draw_images(app, drawer);

            drawer.set_mode(Some(DrawMode::Text));
            screen.draw_text(app, drawer);
            for control in screen.controls() {
                control.draw_label(drawer);
            }
        }
        drawer.set_mode(None);

        if let Some(session) = app.session()
            && !self.stack.top().is_some_and(|top| session.is_menu_screen(top))
        {
            session.draw_overlay(drawer);
        }

        if let Some(image) = self.cursor.image() {
            let size = self.config.cursor_size;
            let rect = Rect::from_center_size(self.mouse_position(), Size::new(size, size));
            drawer.draw_image(image, rect, palette::WHITE);
        }
    }

    /// Flash the controls bound to `key`.
    ///
    /// Screens are visited topmost first; every matching control of a screen is flashed and the
    /// walk stops at the first screen with a match. Returns whether anything was flashed.
    pub fn flash_key(&mut self, key: KeyCode) -> bool {
        for id in self.stack.active() {
            let Some(screen) = self.screens.get_mut(id.index()) else {
                continue;
            };
            let mut accepted = false;
            for control in screen.controls_mut().iter_mut() {
                accepted |= control.flash_key(key);
            }
            if accepted {
                tracing::trace!(screen = id.raw(), key = key.0, "key flash");
                return true;
            }
        }
        false
    }

    /// Flash the control under a tap that began and ended between two frames.
    ///
    /// `raw` is in window pixels. The first control whose area contains the tap is flashed; a
    /// screen background under the tap shields the screens below. Returns whether the tap was
    /// taken by a control or a background. A tap on a degenerate window is ignored.
    pub fn flash_at(&mut self, raw: Point, window: Size) -> bool {
        let Some(flash) = self.tracker.set_flash(raw, window) else {
            tracing::trace!(?window, "pointer flash on degenerate window ignored");
            return false;
        };
        for id in self.stack.active() {
            let Some(screen) = self.screens.get_mut(id.index()) else {
                continue;
            };
            if screen
                .controls_mut()
                .iter_mut()
                .any(|control| control.flash_pointer(&flash))
            {
                tracing::trace!(screen = id.raw(), "pointer flash");
                return true;
            }
            if screen.is_cursor_on_background(&flash) {
                return true;
            }
        }
        false
    }

    /// Record a scroll event for the next [`Router::update`].
    pub fn notify_scroll(&mut self, direction: ScrollDirection) {
        self.scroll = Some(direction);
    }

    /// Whether `id` is in the active list.
    pub fn is_screen_active(&self, id: ScreenId) -> bool {
        self.stack.contains(id)
    }

    /// Topmost active screen.
    pub fn top_screen(&self) -> Option<ScreenId> {
        self.stack.top()
    }

    /// Active screens, topmost first.
    pub fn active_screens(&self) -> &[ScreenId] {
        self.stack.active()
    }

    /// Primary pointer position in normalized coordinates.
    pub fn mouse_position(&self) -> Point {
        self.tracker.primary().position
    }

    /// Whether the primary pointer rested on a control or a screen background last update.
    pub fn is_pointer_over_ui(&self) -> bool {
        self.pointer_over_ui
    }

    /// Tracked pointers, slot order.
    pub fn pointers(&self) -> &[Pointer; POINTER_COUNT] {
        self.tracker.pointers()
    }

    /// Cursor drawn by [`Router::draw`], or `None` when hidden.
    pub fn cursor(&self) -> Option<ImageId> {
        self.cursor.image()
    }

    /// Whether the host should capture the OS cursor.
    pub fn is_cursor_captured(&self) -> bool {
        self.captured
    }

    /// The warn pulse.
    pub fn warn_pulse(&self) -> &WarnPulse {
        &self.warn
    }

    /// Colour of warn highlights this frame.
    pub fn warn_color(&self) -> Color {
        self.warn.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use strata_control::{Control, ControlId, ControlScheme, ControlState, Controls};
    use strata_input::InputSnapshot;

    use crate::host::Session;

    const UI_CURSOR: ImageId = ImageId(5);
    const OVERLAY: ImageId = ImageId(77);

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Hook {
        Add,
        Blur,
        Update {
            clicked_outside: bool,
            scroll: Option<ScrollDirection>,
        },
    }

    struct TestSession {
        menu: Option<ScreenId>,
    }

    impl Session for TestSession {
        fn is_menu_screen(&self, screen: ScreenId) -> bool {
            self.menu == Some(screen)
        }

        fn draw_overlay(&self, drawer: &mut dyn UiDrawer) {
            drawer.draw_image(OVERLAY, Rect::ZERO, palette::WHITE);
        }
    }

    struct App {
        scheme: ControlScheme,
        session: Option<TestSession>,
        log: Vec<(&'static str, Hook)>,
        cues: Vec<SoundCue>,
    }

    impl App {
        fn new(scheme: ControlScheme) -> Self {
            Self {
                scheme,
                session: None,
                log: Vec::new(),
                cues: Vec::new(),
            }
        }

        fn hooks(&self, name: &str) -> Vec<Hook> {
            self.log
                .iter()
                .filter(|(n, _)| *n == name)
                .map(|(_, h)| *h)
                .collect()
        }
    }

    impl UiHost for App {
        fn control_scheme(&self) -> ControlScheme {
            self.scheme
        }

        fn ui_cursor(&self) -> ImageId {
            UI_CURSOR
        }

        fn session(&self) -> Option<&dyn Session> {
            self.session.as_ref().map(|s| s as &dyn Session)
        }

        fn play_cue(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }
    }

    struct Probe {
        name: &'static str,
        tag: u32,
        controls: Controls,
        background: Option<Rect>,
        reacts: bool,
        on_click: Option<(ControlId, NavRequest)>,
    }

    impl Probe {
        fn new(name: &'static str, tag: u32) -> Self {
            Self {
                name,
                tag,
                controls: Controls::new(),
                background: None,
                reacts: false,
                on_click: None,
            }
        }

        fn with_background(mut self, rect: Rect) -> Self {
            self.background = Some(rect);
            self
        }

        fn reacting(mut self) -> Self {
            self.reacts = true;
            self
        }
    }

    impl Screen<App> for Probe {
        fn controls(&self) -> &Controls {
            &self.controls
        }

        fn controls_mut(&mut self) -> &mut Controls {
            &mut self.controls
        }

        fn on_add(&mut self, cx: &mut ScreenCx<'_, App>) {
            cx.app.log.push((self.name, Hook::Add));
        }

        fn update(&mut self, cx: &mut ScreenCx<'_, App>, frame: &ScreenFrame<'_>) {
            cx.app.log.push((
                self.name,
                Hook::Update {
                    clicked_outside: frame.clicked_outside,
                    scroll: frame.scroll,
                },
            ));
            if let Some((button, nav)) = self.on_click
                && self.controls[button].is_just_off()
            {
                match nav {
                    NavRequest::Set(id) => cx.set_screen(id),
                    NavRequest::Add(id) => cx.add_screen(id),
                }
            }
        }

        fn blur(&mut self, app: &mut App) {
            app.log.push((self.name, Hook::Blur));
        }

        fn is_cursor_on_background(&self, pointer: &Pointer) -> bool {
            self.background.is_some_and(|r| r.contains(pointer.position))
        }

        fn reacts_to_click_outside(&self) -> bool {
            self.reacts
        }

        fn draw_background(&self, _app: &App, drawer: &mut dyn UiDrawer) {
            drawer.draw_image(ImageId(self.tag), Rect::ZERO, palette::WHITE);
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Mode(Option<DrawMode>),
        Rect(Rect, Color),
        Image(ImageId),
        Text(String, Color),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl UiDrawer for Recorder {
        fn set_mode(&mut self, mode: Option<DrawMode>) {
            self.0.push(Call::Mode(mode));
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.0.push(Call::Rect(rect, color));
        }

        fn draw_image(&mut self, image: ImageId, _rect: Rect, _tint: Color) {
            self.0.push(Call::Image(image));
        }

        fn draw_text(&mut self, text: &str, _center: Point, color: Color) {
            self.0.push(Call::Text(text.to_string(), color));
        }
    }

    // 100x100 window: normalized coordinates are pixels / 100.
    fn window() -> Size {
        Size::new(100.0, 100.0)
    }

    fn router() -> Router<App> {
        Router::new(window())
    }

    fn button(rect: Rect) -> Control {
        Control::new(Some(rect), true).with_name("ok")
    }

    fn control(router: &Router<App>, screen: ScreenId, id: ControlId) -> &Control {
        &router.screen(screen).expect("registered").controls()[id]
    }

    #[test]
    fn set_screen_blurs_now_and_swaps_after_update() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let mut a = Probe::new("a", 1);
        let ok = a.controls.push(button(Rect::new(0.0, 0.0, 0.5, 0.5)));
        let a = r.register(a);
        let b = r.register(Probe::new("b", 2));
        let mut input = InputSnapshot::new(window());

        r.set_screen(&mut app, a);
        assert!(!r.is_screen_active(a));
        r.update(&mut app, &input);
        assert!(r.is_screen_active(a));

        input.set_pointer(0, Point::new(10.0, 10.0), true);
        r.update(&mut app, &input);
        assert!(control(&r, a, ok).is_on());

        r.set_screen(&mut app, b);
        assert!(!control(&r, a, ok).is_on());
        assert_eq!(app.hooks("a").last(), Some(&Hook::Blur));
        assert!(r.is_screen_active(a));
        assert!(!r.is_screen_active(b));

        r.update(&mut app, &input);
        assert!(!r.is_screen_active(a));
        assert_eq!(r.active_screens(), &[b]);
    }

    #[test]
    fn readding_runs_add_hook_without_duplicating() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let a = r.register(Probe::new("a", 1));
        let input = InputSnapshot::new(window());

        r.add_screen(&mut app, a);
        r.update(&mut app, &input);
        r.add_screen(&mut app, a);
        r.update(&mut app, &input);

        assert_eq!(r.active_screens(), &[a]);
        let adds = app.hooks("a").iter().filter(|h| **h == Hook::Add).count();
        assert_eq!(adds, 2);
    }

    #[test]
    fn set_screen_drops_additions_queued_in_the_same_frame() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let a = r.register(Probe::new("a", 1));
        let b = r.register(Probe::new("b", 2));
        let input = InputSnapshot::new(window());

        r.add_screen(&mut app, a);
        r.set_screen(&mut app, b);
        r.update(&mut app, &input);
        assert_eq!(r.active_screens(), &[b]);
        assert_eq!(app.hooks("a"), vec![Hook::Add, Hook::Blur]);
    }

    #[test]
    fn background_press_is_consumed_by_the_game_view() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let game = r.register(Probe::new("game", 1).with_background(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let dialog =
            r.register(Probe::new("dialog", 2).with_background(Rect::new(0.3, 0.3, 0.7, 0.7)));
        let mut input = InputSnapshot::new(window());
        r.set_screen(&mut app, game);
        r.add_screen(&mut app, dialog);
        r.update(&mut app, &input);
        assert_eq!(r.active_screens(), &[dialog, game]);
        app.log.clear();

        input.set_pointer(0, Point::new(10.0, 10.0), true);
        r.update(&mut app, &input);

        let quiet = Hook::Update {
            clicked_outside: false,
            scroll: None,
        };
        assert_eq!(app.hooks("dialog"), vec![quiet]);
        assert_eq!(app.hooks("game"), vec![quiet]);
        assert!(r.is_pointer_over_ui());
    }

    #[test]
    fn outside_release_is_claimed_by_the_topmost_reacting_screen() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let lower = r.register(Probe::new("lower", 1).reacting());
        let upper = r.register(Probe::new("upper", 2).reacting());
        let mut input = InputSnapshot::new(window());
        r.add_screen(&mut app, lower);
        r.add_screen(&mut app, upper);
        input.set_pointer(0, Point::new(10.0, 10.0), true);
        r.update(&mut app, &input);
        app.log.clear();

        input.set_pointer(0, Point::new(10.0, 10.0), false);
        r.update(&mut app, &input);
        let outside = |hooks: Vec<Hook>| {
            hooks.iter().any(|h| {
                matches!(
                    h,
                    Hook::Update {
                        clicked_outside: true,
                        ..
                    }
                )
            })
        };
        assert!(outside(app.hooks("upper")));
        assert!(!outside(app.hooks("lower")));
    }

    #[test]
    fn non_reacting_screens_pass_the_outside_signal_down() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let lower = r.register(Probe::new("lower", 1).reacting());
        let upper = r.register(Probe::new("upper", 2));
        let mut input = InputSnapshot::new(window());
        r.add_screen(&mut app, lower);
        r.add_screen(&mut app, upper);
        input.set_pointer(0, Point::new(10.0, 10.0), true);
        r.update(&mut app, &input);
        app.log.clear();

        input.set_pointer(0, Point::new(10.0, 10.0), false);
        r.update(&mut app, &input);
        let signalled = Hook::Update {
            clicked_outside: true,
            scroll: None,
        };
        assert_eq!(app.hooks("upper"), vec![signalled]);
        assert_eq!(app.hooks("lower"), vec![signalled]);
    }

    #[test]
    fn pressed_control_above_blocks_presses_below() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let area = Rect::new(0.0, 0.0, 0.5, 0.5);
        let mut lower = Probe::new("lower", 1);
        let below = lower.controls.push(button(area));
        let lower = r.register(lower);
        let mut upper = Probe::new("upper", 2);
        let above = upper.controls.push(button(area));
        let upper = r.register(upper);
        let mut input = InputSnapshot::new(window());
        r.add_screen(&mut app, lower);
        r.add_screen(&mut app, upper);
        r.update(&mut app, &input);

        input.set_pointer(0, Point::new(10.0, 10.0), true);
        r.update(&mut app, &input);
        assert!(control(&r, upper, above).is_just_on());
        assert_eq!(control(&r, lower, below).state(), ControlState::Off);
    }

    #[test]
    fn key_flash_reaches_only_the_topmost_accepting_screen() {
        let mut app = App::new(ControlScheme::Keyboard);
        let mut r = router();
        let key = KeyCode(13);
        let mut lower = Probe::new("lower", 1);
        let below = lower
            .controls
            .push(Control::new(None, false).with_keys([key]));
        let lower = r.register(lower);
        let mut upper = Probe::new("upper", 2);
        let above = upper
            .controls
            .push(Control::new(None, false).with_keys([key]));
        upper.controls.push(Control::new(None, false));
        let upper = r.register(upper);
        let input = InputSnapshot::new(window());
        r.add_screen(&mut app, lower);
        r.add_screen(&mut app, upper);
        r.update(&mut app, &input);

        assert!(!r.flash_key(KeyCode(14)));
        assert!(r.flash_key(key));
        r.update(&mut app, &input);
        assert!(control(&r, upper, above).is_just_on());
        assert_eq!(control(&r, lower, below).state(), ControlState::Off);

        r.update(&mut app, &input);
        assert!(control(&r, upper, above).is_just_off());
    }

    #[test]
    fn tap_flash_hits_controls_until_a_background_shields() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let mut lower = Probe::new("lower", 1);
        let left = lower.controls.push(button(Rect::new(0.0, 0.0, 0.2, 0.2)));
        let right = lower.controls.push(button(Rect::new(0.8, 0.8, 1.0, 1.0)));
        let lower = r.register(lower);
        let upper = r.register(Probe::new("upper", 2).with_background(Rect::new(0.5, 0.5, 1.0, 1.0)));
        let input = InputSnapshot::new(window());
        r.add_screen(&mut app, lower);
        r.add_screen(&mut app, upper);
        r.update(&mut app, &input);

        assert!(r.flash_at(Point::new(10.0, 10.0), window()));
        assert!(r.flash_at(Point::new(90.0, 90.0), window()), "shielded");
        assert!(!r.flash_at(Point::new(40.0, 10.0), window()));
        r.update(&mut app, &input);
        assert!(control(&r, lower, left).is_just_on());
        assert_eq!(control(&r, lower, right).state(), ControlState::Off);
    }

    #[test]
    fn tap_on_degenerate_window_flashes_nothing() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let mut s = Probe::new("s", 1);
        let ok = s.controls.push(button(Rect::new(0.0, 0.0, 0.2, 0.2)));
        let s = r.register(s);
        let input = InputSnapshot::new(window());
        r.set_screen(&mut app, s);
        r.update(&mut app, &input);

        assert!(r.flash_at(Point::new(10.0, 10.0), window()));
        for _ in 0..3 {
            r.update(&mut app, &input);
        }
        assert_eq!(control(&r, s, ok).state(), ControlState::Off);

        // A minimized window reports a zero size; the previous tap position must not be reused.
        assert!(!r.flash_at(Point::new(5000.0, 5000.0), Size::ZERO));
        r.update(&mut app, &input);
        assert_eq!(control(&r, s, ok).state(), ControlState::Off);
    }

    #[test]
    fn navigation_from_a_hook_lands_after_the_frame() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let dialog = r.register(Probe::new("dialog", 2));
        let mut menu = Probe::new("menu", 1);
        let open = menu.controls.push(button(Rect::new(0.0, 0.0, 0.5, 0.5)));
        menu.on_click = Some((open, NavRequest::Add(dialog)));
        let menu = r.register(menu);
        let mut input = InputSnapshot::new(window());
        r.set_screen(&mut app, menu);
        r.update(&mut app, &input);

        input.set_pointer(0, Point::new(10.0, 10.0), true);
        r.update(&mut app, &input);
        input.set_pointer(0, Point::new(10.0, 10.0), false);
        r.update(&mut app, &input);

        assert_eq!(app.hooks("dialog"), vec![Hook::Add]);
        assert_eq!(r.active_screens(), &[dialog, menu]);
        assert_eq!(app.cues.last(), Some(&SoundCue::Click));
    }

    #[test]
    fn hover_cue_needs_a_visible_cursor() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let mut s = Probe::new("s", 1);
        s.controls.push(button(Rect::new(0.0, 0.0, 0.5, 0.5)));
        let s = r.register(s);
        let mut input = InputSnapshot::new(window());
        r.set_screen(&mut app, s);

        // No cursor has been chosen yet on the first frame.
        input.set_pointer(0, Point::new(10.0, 10.0), false);
        r.update(&mut app, &input);
        assert!(app.cues.is_empty());
        assert_eq!(r.cursor(), Some(UI_CURSOR));

        input.set_pointer(0, Point::new(80.0, 80.0), false);
        r.update(&mut app, &input);
        input.set_pointer(0, Point::new(20.0, 20.0), false);
        r.update(&mut app, &input);
        assert_eq!(app.cues, vec![SoundCue::Hover]);
        assert!(r.is_pointer_over_ui());
    }

    #[test]
    fn keyboard_cursor_hides_when_idle_in_a_session() {
        let mut app = App::new(ControlScheme::Keyboard);
        app.session = Some(TestSession { menu: None });
        let mut r = router();
        let game = r.register(Probe::new("game", 1));
        let mut input = InputSnapshot::new(window());
        r.set_screen(&mut app, game);

        input.set_pointer(0, Point::new(50.0, 50.0), false);
        for _ in 0..170 {
            r.update(&mut app, &input);
        }
        assert_eq!(r.cursor(), Some(UI_CURSOR));
        for _ in 0..30 {
            r.update(&mut app, &input);
        }
        assert_eq!(r.cursor(), None);

        input.set_pointer(0, Point::new(51.0, 50.0), false);
        r.update(&mut app, &input);
        assert_eq!(r.cursor(), Some(UI_CURSOR));
    }

    #[test]
    fn pointer_capture_follows_scheme_session_and_menu() {
        let mut app = App::new(ControlScheme::Mixed);
        let mut r = router();
        let game = r.register(Probe::new("game", 1));
        let menu = r.register(Probe::new("menu", 2));
        let mut input = InputSnapshot::new(window());
        r.set_screen(&mut app, game);
        r.update(&mut app, &input);
        assert!(!r.is_cursor_captured(), "no session");

        app.session = Some(TestSession { menu: Some(menu) });
        input.set_pointer(0, Point::new(-50.0, 500.0), false);
        r.update(&mut app, &input);
        assert!(r.is_cursor_captured());
        assert_eq!(r.mouse_position(), Point::new(0.0, 1.0));

        r.add_screen(&mut app, menu);
        r.update(&mut app, &input);
        r.update(&mut app, &input);
        assert!(!r.is_cursor_captured(), "menu on top");

        app.scheme = ControlScheme::Keyboard;
        r.set_screen(&mut app, game);
        r.update(&mut app, &input);
        r.update(&mut app, &input);
        assert!(!r.is_cursor_captured(), "keyboard scheme");
    }

    #[test]
    fn scroll_is_delivered_once() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let s = r.register(Probe::new("s", 1));
        let input = InputSnapshot::new(window());
        r.set_screen(&mut app, s);
        r.update(&mut app, &input);
        app.log.clear();

        r.notify_scroll(ScrollDirection::Down);
        r.update(&mut app, &input);
        r.update(&mut app, &input);
        let scrolls: Vec<_> = app
            .hooks("s")
            .into_iter()
            .map(|h| match h {
                Hook::Update { scroll, .. } => scroll,
                _ => None,
            })
            .collect();
        assert_eq!(scrolls, vec![Some(ScrollDirection::Down), None]);
    }

    #[test]
    fn unknown_screens_are_ignored() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        r.set_screen(&mut app, ScreenId::new(9));
        r.add_screen(&mut app, ScreenId::new(9));
        assert!(r.screen(ScreenId::new(9)).is_none());
        r.update(&mut app, &InputSnapshot::new(window()));
        assert!(r.top_screen().is_none());
        assert!(app.log.is_empty());
    }

    #[test]
    fn draw_runs_bottom_up_then_overlay_then_cursor() {
        let mut app = App::new(ControlScheme::Mouse);
        app.session = Some(TestSession { menu: None });
        let mut r = router();
        let area = Rect::new(0.0, 0.0, 0.1, 0.1);
        let greyed = |name: &str| {
            let mut control = Control::new(Some(area), false).with_name(name);
            control.set_enabled(false);
            control
        };
        let mut game = Probe::new("game", 1);
        game.controls.push(greyed("g"));
        let game = r.register(game);
        let mut dialog = Probe::new("dialog", 2);
        dialog.controls.push(greyed("d"));
        let dialog = r.register(dialog);
        let input = InputSnapshot::new(window());
        r.set_screen(&mut app, game);
        r.add_screen(&mut app, dialog);
        r.update(&mut app, &input);

        let mut rec = Recorder::default();
        r.draw(&app, &mut rec);
        let images = Some(DrawMode::Images);
        let text = Some(DrawMode::Text);
        assert_eq!(
            rec.0,
            vec![
                Call::Mode(images),
                Call::Image(ImageId(1)),
                Call::Rect(area, palette::UI_INACTIVE),
                Call::Mode(text),
                Call::Text("g".into(), palette::GREY),
                Call::Mode(images),
                Call::Image(ImageId(2)),
                Call::Rect(area, palette::UI_INACTIVE),
                Call::Mode(text),
                Call::Text("d".into(), palette::GREY),
                Call::Mode(None),
                Call::Image(OVERLAY),
                Call::Image(UI_CURSOR),
            ]
        );
    }

    #[test]
    fn flashed_button_stays_lit_after_release() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let key = KeyCode(13);
        let area = Rect::new(0.5, 0.5, 0.6, 0.6);
        let mut s = Probe::new("s", 1);
        let ok = s.controls.push(Control::new(Some(area), false).with_keys([key]));
        let s = r.register(s);
        let input = InputSnapshot::new(window());
        r.set_screen(&mut app, s);
        r.update(&mut app, &input);

        let tint = |r: &Router<App>, app: &App| {
            let mut rec = Recorder::default();
            r.draw(app, &mut rec);
            rec.0.iter().find_map(|c| match c {
                Call::Rect(rect, color) if *rect == area => Some(*color),
                _ => None,
            })
        };
        assert_eq!(tint(&r, &app), Some(palette::UI_DARK));

        assert!(r.flash_key(key));
        r.update(&mut app, &input);
        r.update(&mut app, &input);
        assert!(control(&r, s, ok).is_just_off());
        assert_eq!(tint(&r, &app), Some(palette::UI_LIGHT));

        for _ in 0..12 {
            r.update(&mut app, &input);
        }
        assert_eq!(tint(&r, &app), Some(palette::UI_DARK));
    }

    #[test]
    fn menu_on_top_suppresses_the_overlay() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let menu = r.register(Probe::new("menu", 1));
        app.session = Some(TestSession { menu: Some(menu) });
        let input = InputSnapshot::new(window());
        r.set_screen(&mut app, menu);
        r.update(&mut app, &input);

        let mut rec = Recorder::default();
        r.draw(&app, &mut rec);
        assert!(!rec.0.contains(&Call::Image(OVERLAY)));
    }

    #[test]
    fn warn_overlay_uses_the_pulse_colour() {
        let mut app = App::new(ControlScheme::Mouse);
        let mut r = router();
        let area = Rect::new(0.0, 0.0, 0.1, 0.1);
        let mut s = Probe::new("s", 1);
        let warned = s.controls.push(Control::new(Some(area), false));
        let s = r.register(s);
        let input = InputSnapshot::new(window());
        r.set_screen(&mut app, s);
        r.update(&mut app, &input);

        r.screen_mut(s).expect("registered").controls_mut()[warned].enable_warn();
        r.update(&mut app, &input);
        assert!(r.warn_color().a > 0.0);

        let mut rec = Recorder::default();
        r.draw(&app, &mut rec);
        let rects: Vec<Color> = rec
            .0
            .iter()
            .filter_map(|c| match c {
                Call::Rect(rect, color) if *rect == area => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1], r.warn_color());
    }
}
