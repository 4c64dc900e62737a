// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small value types shared by the input layer.

/// Host key code.
///
/// The numbering is whatever the host's windowing backend uses; Strata only compares codes
/// for equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KeyCode(pub u16);

/// Direction of a discrete scroll step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// Wheel moved away from the user.
    Up,
    /// Wheel moved towards the user.
    Down,
}

impl ScrollDirection {
    /// Classify a signed wheel delta; positive amounts scroll up.
    ///
    /// Returns `None` for a zero (or NaN) delta.
    pub fn from_amount(amount: f64) -> Option<Self> {
        if amount > 0.0 {
            Some(Self::Up)
        } else if amount < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}
