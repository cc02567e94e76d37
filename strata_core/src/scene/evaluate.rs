// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene evaluation and change tracking.
//!
//! Evaluation drains each dirty channel in turn:
//!
//! 1. **TRANSFORM**: recompute `world_transform` as
//!    `parent_world * local` and `effective_hidden` as
//!    `parent_effective_hidden || flags.hidden`, parents before children.
//! 2. **APPEARANCE**, **CONTENT**, **GEOMETRY**: collect only. Presenters
//!    read the current values straight from the store.
//! 3. **TOPOLOGY**: drain and discard. The traversal order was already
//!    rebuilt at the start of evaluation.
//!
//! [`SceneChanges`] carries raw slot indices so presenters can use the
//! `*_at()` accessors without generation checks.

use alloc::vec::Vec;

use super::id::{INVALID, TextureId};
use super::store::SceneStore;
use crate::dirty;
use crate::transform::Transform3d;

/// The set of changes produced by a single [`SceneStore::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneChanges {
    /// Nodes whose world transform was recomputed.
    pub transforms: Vec<u32>,
    /// Nodes whose colour changed.
    pub appearance: Vec<u32>,
    /// Nodes whose texture binding changed.
    pub content: Vec<u32>,
    /// Nodes whose primitive was rebuilt.
    pub geometry: Vec<u32>,
    /// Nodes that became effectively hidden.
    pub hidden: Vec<u32>,
    /// Nodes that became visible again.
    pub unhidden: Vec<u32>,
    /// Nodes created since the last evaluate.
    pub added: Vec<u32>,
    /// Nodes destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Textures no longer bound to any node. The host may free them.
    pub released_textures: Vec<TextureId>,
    /// Whether the traversal order was rebuilt.
    pub topology_changed: bool,
}

impl SceneChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.appearance.clear();
        self.content.clear();
        self.geometry.clear();
        self.hidden.clear();
        self.unhidden.clear();
        self.added.clear();
        self.removed.clear();
        self.released_textures.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.appearance.is_empty()
            && self.content.is_empty()
            && self.geometry.is_empty()
            && self.hidden.is_empty()
            && self.unhidden.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.released_textures.is_empty()
            && !self.topology_changed
    }
}

impl SceneStore {
    /// Evaluates the scene, recomputing dirty derived state and returning the
    /// set of changes.
    pub fn evaluate(&mut self) -> SceneChanges {
        let mut changes = SceneChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut SceneChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        let dirty_transforms: Vec<u32> = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_transforms {
            let i = idx as usize;
            let parent_idx = self.parent[i];
            let (parent_world, parent_hidden) = if parent_idx != INVALID {
                (
                    self.world_transform[parent_idx as usize],
                    self.effective_hidden[parent_idx as usize],
                )
            } else {
                (Transform3d::IDENTITY, false)
            };
            self.world_transform[i] =
                parent_world * Transform3d::from_position_scale(self.position[i], self.scale[i]);

            let new_hidden = parent_hidden || self.flags[i].hidden;
            if new_hidden != self.effective_hidden[i] {
                if new_hidden {
                    changes.hidden.push(idx);
                } else {
                    changes.unhidden.push(idx);
                }
                self.effective_hidden[i] = new_hidden;
            }
        }
        changes.transforms = dirty_transforms;

        changes.appearance = self
            .dirty
            .drain(dirty::APPEARANCE)
            .deterministic()
            .run()
            .collect();

        changes.content = self
            .dirty
            .drain(dirty::CONTENT)
            .deterministic()
            .run()
            .collect();

        changes.geometry = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();

        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        core::mem::swap(&mut self.pending_released, &mut changes.released_textures);
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    /// Rebuilds the depth-first pre-order traversal of all live nodes.
    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        let mut stack = Vec::new();
        for root in 0..self.len {
            if self.parent[root as usize] != INVALID || !self.alive[root as usize] {
                continue;
            }
            stack.push(root);
            while let Some(idx) = stack.pop() {
                self.traversal_order.push(idx);
                let first = stack.len();
                let mut child = self.first_child[idx as usize];
                while child != INVALID {
                    stack.push(child);
                    child = self.next_sibling[child as usize];
                }
                // Siblings were pushed first-to-last; pop them in that order.
                stack[first..].reverse();
            }
        }
    }
}
