// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Player-facing input options: the control scheme and named key bindings.

use alloc::string::{String, ToString};
use core::str::FromStr;

use hashbrown::HashMap;
use smallvec::SmallVec;
use strata_input::KeyCode;

/// How the player drives the game.
///
/// The scheme decides whether the OS cursor is captured by the window and which cursor image is
/// shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ControlScheme {
    /// Keyboard only; the cursor hides itself after a period of mouse inactivity.
    #[default]
    Keyboard,
    /// Keyboard for movement, mouse for aiming.
    Mixed,
    /// Mouse only.
    Mouse,
}

impl ControlScheme {
    /// `Mixed` or `Mouse`.
    pub const fn is_pointer_driven(self) -> bool {
        matches!(self, Self::Mixed | Self::Mouse)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Mixed => "mixed",
            Self::Mouse => "mouse",
        }
    }
}

impl core::fmt::Display for ControlScheme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to read a [`ControlScheme`] from a settings value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseControlSchemeError {
    /// The name matched no scheme.
    #[error("unknown control scheme `{0}`")]
    Unknown(String),
    /// The stored index is not `0..=2`.
    #[error("control scheme index {0} out of range")]
    OutOfRange(u8),
}

impl FromStr for ControlScheme {
    type Err = ParseControlSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            (Self::Keyboard, "keyboard"),
            (Self::Keyboard, "kb"),
            (Self::Mixed, "mixed"),
            (Self::Mouse, "mouse"),
        ]
        .into_iter()
        .find_map(|(scheme, name)| name.eq_ignore_ascii_case(s).then_some(scheme))
        .ok_or_else(|| ParseControlSchemeError::Unknown(s.to_string()))
    }
}

impl TryFrom<u8> for ControlScheme {
    type Error = ParseControlSchemeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Keyboard),
            1 => Ok(Self::Mixed),
            2 => Ok(Self::Mouse),
            other => Err(ParseControlSchemeError::OutOfRange(other)),
        }
    }
}

impl From<ControlScheme> for u8 {
    fn from(scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::Keyboard => 0,
            ControlScheme::Mixed => 1,
            ControlScheme::Mouse => 2,
        }
    }
}

/// Named actions bound to keys, loaded from settings and handed to controls via
/// [`Control::with_keys`](crate::Control::with_keys).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KeyMap {
    bindings: HashMap<String, SmallVec<[KeyCode; 2]>>,
}

impl KeyMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` to `action`. Duplicate bindings are ignored.
    pub fn bind(&mut self, action: &str, key: KeyCode) {
        let keys = self.bindings.entry(action.to_string()).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    /// Replace every key of `action`.
    pub fn set(&mut self, action: &str, keys: impl IntoIterator<Item = KeyCode>) {
        self.bindings
            .insert(action.to_string(), keys.into_iter().collect());
    }

    /// Keys bound to `action`; empty when unbound.
    pub fn keys(&self, action: &str) -> &[KeyCode] {
        self.bindings.get(action).map_or(&[], |k| k.as_slice())
    }

    /// Drop `action`, returning whether it was bound.
    pub fn unbind(&mut self, action: &str) -> bool {
        self.bindings.remove(action).is_some()
    }

    /// All bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[KeyCode])> {
        self.bindings
            .iter()
            .map(|(action, keys)| (action.as_str(), keys.as_slice()))
    }

    /// Number of bound actions.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no action is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
