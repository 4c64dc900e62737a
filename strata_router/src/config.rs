// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables of the router.

use strata_control::DEFAULT_FLASH_DURATION;

/// Timing and sizing constants of a [`Router`](crate::Router).
///
/// With the `serde` feature enabled, missing fields fall back to [`RouterConfig::default`], so
/// settings files only need to name what they override.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Edge length of the software cursor in normalized units.
    pub cursor_size: f64,
    /// Seconds of mouse inactivity after which the keyboard scheme hides the cursor.
    pub cursor_idle_threshold: f64,
    /// Seconds the warn pulse takes to sweep from `0` to `1`.
    pub warn_growth_time: f64,
    /// Fixed frame step in seconds used by timers advanced in [`Router::update`](crate::Router::update).
    pub time_step: f64,
    /// Seconds a flashed control stays highlighted.
    pub flash_duration: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cursor_size: 0.07,
            cursor_idle_threshold: 3.0,
            warn_growth_time: 1.0,
            time_step: 1.0 / 60.0,
            flash_duration: DEFAULT_FLASH_DURATION,
        }
    }
}
