// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default UI colours.

use crate::draw::Color;

/// Idle button fill.
pub const UI_DARK: Color = Color::rgba(0.16, 0.25, 0.35, 0.6);
/// Hovered button fill.
pub const UI_MED: Color = Color::rgba(0.25, 0.39, 0.53, 0.7);
/// Pressed or flashing button fill.
pub const UI_LIGHT: Color = Color::rgba(0.44, 0.62, 0.8, 0.8);
/// Disabled button fill.
pub const UI_INACTIVE: Color = Color::rgba(0.2, 0.2, 0.2, 0.4);
/// Warn overlay; alpha is driven by the router's warn pulse.
pub const UI_WARN: Color = Color::rgba(1.0, 0.5, 0.0, 0.0);
/// Enabled label.
pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
/// Disabled label.
pub const GREY: Color = Color::rgba(0.5, 0.5, 0.5, 1.0);
