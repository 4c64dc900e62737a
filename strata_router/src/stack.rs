// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active screen order with deferred mutation.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::screen::ScreenId;

/// Active screens, topmost first, plus queued additions and removals.
///
/// Queues are only drained by [`ScreenStack::apply_pending`], so the active list is stable
/// while the router walks it.
#[derive(Clone, Debug, Default)]
pub struct ScreenStack {
    active: Vec<ScreenId>,
    to_add: SmallVec<[ScreenId; 4]>,
    to_remove: SmallVec<[ScreenId; 4]>,
}

/// What [`ScreenStack::apply_pending`] changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// Screens that left the active list.
    pub removed: usize,
    /// Screens that joined the active list.
    pub added: usize,
}

impl ScreenStack {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active screens, index `0` on top.
    pub fn active(&self) -> &[ScreenId] {
        &self.active
    }

    /// Topmost active screen.
    pub fn top(&self) -> Option<ScreenId> {
        self.active.first().copied()
    }

    /// Whether `id` is in the active list.
    pub fn contains(&self, id: ScreenId) -> bool {
        self.active.contains(&id)
    }

    /// Queue `id` for addition on top.
    pub fn queue_add(&mut self, id: ScreenId) {
        self.to_add.push(id);
    }

    /// Queue `id` for removal.
    pub fn queue_remove(&mut self, id: ScreenId) {
        self.to_remove.push(id);
    }

    /// Drop every queued addition, returning what was queued.
    pub fn cancel_pending_adds(&mut self) -> SmallVec<[ScreenId; 4]> {
        core::mem::take(&mut self.to_add)
    }

    /// Whether anything is queued.
    pub fn has_pending(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }

    /// Apply removals, then additions in queue order so the last one ends on top.
    ///
    /// Adding a screen that is already active leaves the list unchanged.
    pub fn apply_pending(&mut self) -> Applied {
        let mut applied = Applied::default();
        for id in self.to_remove.drain(..) {
            let before = self.active.len();
            self.active.retain(|s| *s != id);
            applied.removed += before - self.active.len();
        }
        for id in self.to_add.drain(..) {
            if !self.active.contains(&id) {
                self.active.insert(0, id);
                applied.added += 1;
            }
        }
        applied
    }
}
