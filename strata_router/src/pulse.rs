// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle-wave oscillator behind the warn highlight.

use strata_control::{Color, palette};

/// A value bouncing between `0` and `1`.
///
/// ```
/// use strata_router::WarnPulse;
///
/// let mut pulse = WarnPulse::new();
/// pulse.advance(0.75);
/// pulse.advance(0.75);
/// // Overshot the top bound: clamped and now falling.
/// assert_eq!(pulse.value(), 1.0);
/// assert!(!pulse.is_rising());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WarnPulse {
    value: f64,
    rising: bool,
}

impl Default for WarnPulse {
    fn default() -> Self {
        Self::new()
    }
}

impl WarnPulse {
    /// Start at `0`, rising.
    pub const fn new() -> Self {
        Self {
            value: 0.0,
            rising: true,
        }
    }

    /// Move by `step` in the current direction, reversing at either bound.
    pub fn advance(&mut self, step: f64) {
        let step = step.abs();
        self.value += if self.rising { step } else { -step };
        if !(0.0..=1.0).contains(&self.value) {
            self.value = self.value.clamp(0.0, 1.0);
            self.rising = !self.rising;
        }
    }

    /// Current value in `0.0..=1.0`.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Direction of travel.
    pub const fn is_rising(&self) -> bool {
        self.rising
    }

    /// The warn overlay colour for the current value. Peaks at half opacity.
    pub fn color(&self) -> Color {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Colour channels are f32; the value is in 0..=1."
        )]
        palette::UI_WARN.with_alpha((self.value * 0.5) as f32)
    }
}
