// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface consumed by controls and screens.

use kurbo::{Point, Rect};

/// Linear RGBA colour with components in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Build a colour from components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Opaque handle to an image owned by the host's asset system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Batch the drawer should be in.
///
/// Hosts that batch sprites and glyphs separately switch batches here; others can ignore it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Rectangles and images.
    Images,
    /// Labels and other text.
    Text,
}

/// Rendering surface in normalized layout coordinates.
///
/// Calls are fire-and-forget; implementations swallow their own failures.
pub trait UiDrawer {
    /// Switch batches. `None` ends the UI pass.
    fn set_mode(&mut self, mode: Option<DrawMode>);
    /// Fill `rect` with a flat colour.
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// Draw `image` stretched over `rect`, modulated by `tint`.
    fn draw_image(&mut self, image: ImageId, rect: Rect, tint: Color);
    /// Draw `text` centred on `center`.
    fn draw_text(&mut self, text: &str, center: Point, color: Color);
}
