// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dialog stacked over a game view, driven by a scripted sequence of frames.
//!
//! This example shows:
//! - a game view whose background swallows presses that no control took,
//! - an inventory dialog opened by a key flash and closed by a click outside of it,
//! - cursor selection and pointer capture while a session runs.
//!
//! Run:
//! - `cargo run -p strata_demos --example dialog_over_view`
//! - `RUST_LOG=strata_router=debug cargo run -p strata_demos --example dialog_over_view`

use kurbo::{Point, Rect, Size};
use strata_control::{Color, Control, ControlId, ControlScheme, Controls, DrawMode, ImageId, UiDrawer};
use strata_input::{InputSnapshot, KeyCode, Pointer};
use strata_router::{Router, Screen, ScreenCx, ScreenFrame, ScreenId, Session, SoundCue, UiHost};
use tracing_subscriber::EnvFilter;

const UI_CURSOR: ImageId = ImageId(1);
const CROSSHAIR: ImageId = ImageId(2);
const KEY_INVENTORY: KeyCode = KeyCode(23);
const KEY_ESCAPE: KeyCode = KeyCode(27);

struct Game {
    inventory: ScreenId,
}

impl Session for Game {
    fn cursor_image(&self) -> Option<ImageId> {
        Some(CROSSHAIR)
    }
}

struct App {
    game: Option<Game>,
    view: ScreenId,
}

impl UiHost for App {
    fn control_scheme(&self) -> ControlScheme {
        ControlScheme::Mixed
    }

    fn ui_cursor(&self) -> ImageId {
        UI_CURSOR
    }

    fn session(&self) -> Option<&dyn Session> {
        self.game.as_ref().map(|g| g as &dyn Session)
    }

    fn play_cue(&mut self, cue: SoundCue) {
        println!("  sound: {cue:?}");
    }
}

/// The world view: everything not covered by another screen.
struct GameView {
    controls: Controls,
    open_inventory: ControlId,
}

impl GameView {
    fn new() -> Self {
        let mut controls = Controls::new();
        let open_inventory = controls.push(
            Control::new(Some(Rect::new(1.1, 0.02, 1.3, 0.1)), true)
                .with_name("Items")
                .with_keys([KEY_INVENTORY]),
        );
        Self {
            controls,
            open_inventory,
        }
    }
}

impl Screen<App> for GameView {
    fn controls(&self) -> &Controls {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    fn update(&mut self, cx: &mut ScreenCx<'_, App>, _frame: &ScreenFrame<'_>) {
        if self.controls[self.open_inventory].is_just_off()
            && let Some(inventory) = cx.app.game.as_ref().map(|g| g.inventory)
        {
            cx.add_screen(inventory);
        }
    }

    fn is_cursor_on_background(&self, _pointer: &Pointer) -> bool {
        true
    }

    fn draw_background(&self, _app: &App, drawer: &mut dyn UiDrawer) {
        drawer.draw_rect(Rect::new(0.0, 0.0, 1.333, 1.0), Color::rgba(0.0, 0.1, 0.0, 1.0));
    }
}

/// A modal list that closes on Escape, on its close button or on a click outside.
struct Inventory {
    controls: Controls,
    close: ControlId,
    body: Rect,
}

impl Inventory {
    fn new() -> Self {
        let mut controls = Controls::new();
        let close = controls.push(
            Control::new(Some(Rect::new(0.85, 0.25, 0.95, 0.32)), true)
                .with_name("X")
                .with_keys([KEY_ESCAPE]),
        );
        Self {
            controls,
            close,
            body: Rect::new(0.35, 0.2, 1.0, 0.8),
        }
    }
}

impl Screen<App> for Inventory {
    fn controls(&self) -> &Controls {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    fn on_add(&mut self, _cx: &mut ScreenCx<'_, App>) {
        println!("  inventory opened");
    }

    fn update(&mut self, cx: &mut ScreenCx<'_, App>, frame: &ScreenFrame<'_>) {
        if frame.clicked_outside || self.controls[self.close].is_just_off() {
            let view = cx.app.view;
            cx.set_screen(view);
        }
    }

    fn blur(&mut self, _app: &mut App) {
        println!("  inventory closed");
    }

    fn is_cursor_on_background(&self, pointer: &Pointer) -> bool {
        self.body.contains(pointer.position)
    }

    fn reacts_to_click_outside(&self) -> bool {
        true
    }

    fn draw_background(&self, _app: &App, drawer: &mut dyn UiDrawer) {
        drawer.draw_rect(self.body, Color::rgba(0.1, 0.1, 0.2, 0.9));
    }
}

/// Counts draw calls instead of rendering.
#[derive(Default)]
struct CountingDrawer {
    rects: usize,
    images: usize,
    labels: Vec<String>,
}

impl UiDrawer for CountingDrawer {
    fn set_mode(&mut self, _mode: Option<DrawMode>) {}

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects += 1;
    }

    fn draw_image(&mut self, _image: ImageId, _rect: Rect, _tint: Color) {
        self.images += 1;
    }

    fn draw_text(&mut self, text: &str, _center: Point, _color: Color) {
        self.labels.push(text.to_owned());
    }
}

enum Step {
    Move(f64, f64),
    Press(f64, f64),
    Release(f64, f64),
    Key(KeyCode),
    Idle,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let window = Size::new(1280.0, 960.0);
    let mut router = Router::new(window);
    let view = router.register(GameView::new());
    let inventory = router.register(Inventory::new());
    let mut app = App {
        game: Some(Game { inventory }),
        view,
    };
    router.set_screen(&mut app, view);

    let script = [
        ("start", Step::Idle),
        ("aim", Step::Move(600.0, 500.0)),
        ("click the world", Step::Press(600.0, 500.0)),
        ("", Step::Release(600.0, 500.0)),
        ("open inventory by key", Step::Key(KEY_INVENTORY)),
        ("", Step::Idle),
        ("", Step::Idle),
        ("press inside dialog", Step::Press(700.0, 480.0)),
        ("release inside dialog", Step::Release(700.0, 480.0)),
        ("press outside dialog", Step::Press(100.0, 100.0)),
        ("release outside dialog", Step::Release(100.0, 100.0)),
        ("", Step::Idle),
    ];

    let mut input = InputSnapshot::new(window);
    for (frame, (label, step)) in script.into_iter().enumerate() {
        match step {
            Step::Move(x, y) => input.move_pointer(0, Point::new(x, y)),
            Step::Press(x, y) => input.set_pointer(0, Point::new(x, y), true),
            Step::Release(x, y) => input.set_pointer(0, Point::new(x, y), false),
            Step::Key(key) => {
                router.flash_key(key);
            }
            Step::Idle => {}
        }
        if !label.is_empty() {
            println!("frame {frame}: {label}");
        }
        router.update(&mut app, &input);

        let mut drawer = CountingDrawer::default();
        router.draw(&app, &mut drawer);
        println!(
            "  stack={:?} cursor={:?} captured={} over_ui={} rects={} images={} labels={:?}",
            router.active_screens(),
            router.cursor(),
            router.is_cursor_captured(),
            router.is_pointer_over_ui(),
            drawer.rects,
            drawer.images,
            drawer.labels,
        );
    }
    tracing::info!(top = ?router.top_screen(), "script finished");
}
