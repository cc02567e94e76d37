// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays scene storage with allocation, topology, and property management.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use crate::dirty;
use crate::geometry::{Color, Point3, Scale2};
use crate::transform::Transform3d;

use super::id::{INVALID, SceneId, TextureId};
use super::primitive::Primitive;
use super::traverse::Children;

/// Per-node boolean flags.
///
/// Setting [`hidden`](Self::hidden) suppresses the node and its entire
/// subtree. Properties can still be mutated while hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeFlags {
    /// Whether the node (and its subtree) is hidden.
    pub hidden: bool,
}

/// Struct-of-arrays storage for all scene nodes.
///
/// Nodes are addressed by [`SceneId`] handles. Destroyed nodes are recycled
/// via a free list, and generation counters make any use of a destroyed
/// handle panic instead of touching the slot's new occupant.
#[derive(Debug)]
pub struct SceneStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) position: Vec<Point3>,
    pub(crate) scale: Vec<Scale2>,
    pub(crate) primitive: Vec<Primitive>,
    pub(crate) color: Vec<Color>,
    pub(crate) texture: Vec<Option<TextureId>>,
    pub(crate) flags: Vec<NodeFlags>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_transform: Vec<Transform3d>,
    pub(crate) effective_hidden: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) pending_released: Vec<TextureId>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            position: Vec::new(),
            scale: Vec::new(),
            primitive: Vec::new(),
            color: Vec::new(),
            texture: Vec::new(),
            flags: Vec::new(),
            world_transform: Vec::new(),
            effective_hidden: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            pending_released: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a detached node drawing `primitive` and returns its handle.
    ///
    /// The node starts at the origin with unit scale, the default colour, no
    /// texture and no parent.
    pub fn create_node(&mut self, primitive: Primitive) -> SceneId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.alive[i] = true;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.position[i] = Point3::ZERO;
            self.scale[i] = Scale2::ONE;
            self.primitive[i] = primitive;
            self.color[i] = Color::default();
            self.texture[i] = None;
            self.flags[i] = NodeFlags::default();
            self.world_transform[i] = Transform3d::IDENTITY;
            self.effective_hidden[i] = false;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.position.push(Point3::ZERO);
            self.scale.push(Scale2::ONE);
            self.primitive.push(primitive);
            self.color.push(Color::default());
            self.texture.push(None);
            self.flags.push(NodeFlags::default());
            self.world_transform.push(Transform3d::IDENTITY);
            self.effective_hidden.push(false);
            self.generation.push(0);
            self.alive.push(true);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);

        SceneId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node, releasing its texture and freeing its slot.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (destroy them first, or use
    /// [`destroy_subtree`](Self::destroy_subtree)) or if the handle is stale.
    pub fn destroy_node(&mut self, id: SceneId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        if let Some(texture) = self.texture[idx as usize].take() {
            self.pending_released.push(texture);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.alive[idx as usize] = false;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Destroys `id` and every node beneath it, children first.
    ///
    /// Returns the destroyed handles in destruction order. Uses an explicit
    /// stack, so subtree depth is not bounded by the call stack.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_subtree(&mut self, id: SceneId) -> Vec<SceneId> {
        self.validate(id);
        let mut preorder = Vec::new();
        let mut stack = Vec::new();
        stack.push(id.idx);
        while let Some(idx) = stack.pop() {
            preorder.push(self.handle(idx));
            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                stack.push(child);
                child = self.next_sibling[child as usize];
            }
        }
        // Reverse pre-order visits every node after all of its descendants.
        preorder.reverse();
        for &node in &preorder {
            self.destroy_node(node);
        }
        preorder
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: SceneId) -> bool {
        id.idx < self.len
            && self.alive[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    /// Number of live nodes.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: SceneId, child: SceneId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        self.link_last(parent.idx, child.idx);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: SceneId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "node has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn reparent(&mut self, child: SceneId, new_parent: SceneId) {
        self.validate(child);
        self.validate(new_parent);

        let c = child.idx;
        if self.parent[c as usize] != INVALID {
            let old_p = self.parent[c as usize];
            self.unlink_from_parent(c);
            self.dirty.remove_dependency(c, old_p, dirty::TRANSFORM);
            self.dirty.mark(old_p, dirty::TOPOLOGY);
        }
        self.link_last(new_parent.idx, c);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: SceneId) -> Option<SceneId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: SceneId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the handles of live root nodes (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<SceneId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && self.alive[idx as usize])
            .map(|idx| self.handle(idx))
            .collect()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the position of a node relative to its parent.
    #[must_use]
    pub fn position(&self, id: SceneId) -> Point3 {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Returns the x/y scale of a node.
    #[must_use]
    pub fn scale(&self, id: SceneId) -> Scale2 {
        self.validate(id);
        self.scale[id.idx as usize]
    }

    /// Returns the primitive a node draws.
    #[must_use]
    pub fn primitive(&self, id: SceneId) -> Primitive {
        self.validate(id);
        self.primitive[id.idx as usize]
    }

    /// Returns the colour of a node.
    #[must_use]
    pub fn color(&self, id: SceneId) -> Color {
        self.validate(id);
        self.color[id.idx as usize]
    }

    /// Returns the texture bound to a node.
    #[must_use]
    pub fn texture(&self, id: SceneId) -> Option<TextureId> {
        self.validate(id);
        self.texture[id.idx as usize]
    }

    /// Returns the flags of a node.
    #[must_use]
    pub fn flags(&self, id: SceneId) -> NodeFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the local transform built from position and scale.
    #[must_use]
    pub fn local_transform(&self, id: SceneId) -> Transform3d {
        self.validate(id);
        let i = id.idx as usize;
        Transform3d::from_position_scale(self.position[i], self.scale[i])
    }

    /// Returns the computed world transform of a node.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_transform(&self, id: SceneId) -> Transform3d {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns whether the node is effectively hidden (including by an
    /// ancestor's hidden flag).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_hidden(&self, id: SceneId) -> bool {
        self.validate(id);
        self.effective_hidden[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the position of a node relative to its parent.
    ///
    /// Marks the TRANSFORM channel dirty with eager propagation to descendants.
    pub fn set_position(&mut self, id: SceneId, position: Point3) {
        self.validate(id);
        self.position[id.idx as usize] = position;
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    /// Sets the x/y scale of a node.
    ///
    /// Marks the TRANSFORM channel dirty with eager propagation to descendants.
    pub fn set_scale(&mut self, id: SceneId, scale: Scale2) {
        self.validate(id);
        self.scale[id.idx as usize] = scale;
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    /// Replaces the primitive of a node.
    pub fn set_primitive(&mut self, id: SceneId, primitive: Primitive) {
        self.validate(id);
        self.primitive[id.idx as usize] = primitive;
        self.dirty.mark(id.idx, dirty::GEOMETRY);
    }

    /// Sets the colour of a node.
    pub fn set_color(&mut self, id: SceneId, color: Color) {
        self.validate(id);
        self.color[id.idx as usize] = color;
        self.dirty.mark(id.idx, dirty::APPEARANCE);
    }

    /// Binds a texture to a node.
    ///
    /// A previously bound texture that differs from the new one is reported
    /// as released by the next [`evaluate`](Self::evaluate).
    pub fn set_texture(&mut self, id: SceneId, texture: Option<TextureId>) {
        self.validate(id);
        let slot = &mut self.texture[id.idx as usize];
        if let Some(old) = *slot
            && Some(old) != texture
        {
            self.pending_released.push(old);
        }
        *slot = texture;
        self.dirty.mark(id.idx, dirty::CONTENT);
    }

    /// Sets the flags of a node.
    pub fn set_flags(&mut self, id: SceneId, flags: NodeFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
        // Hidden state is inherited, so it rides on the TRANSFORM channel.
        self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `SceneChanges`) rather than
    // `SceneId` handles, skipping generation validation. Only use with indices
    // that came from `SceneChanges` or `traversal_order()`.

    /// Returns the computed world transform at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn world_transform_at(&self, idx: u32) -> Transform3d {
        self.check_index(idx);
        self.world_transform[idx as usize]
    }

    /// Returns whether the node at raw slot `idx` is effectively hidden.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn effective_hidden_at(&self, idx: u32) -> bool {
        self.check_index(idx);
        self.effective_hidden[idx as usize]
    }

    /// Returns the primitive at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn primitive_at(&self, idx: u32) -> Primitive {
        self.check_index(idx);
        self.primitive[idx as usize]
    }

    /// Returns the colour at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn color_at(&self, idx: u32) -> Color {
        self.check_index(idx);
        self.color[idx as usize]
    }

    /// Returns the texture at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn texture_at(&self, idx: u32) -> Option<TextureId> {
        self.check_index(idx);
        self.texture[idx as usize]
    }

    /// Returns the live handle for raw slot `idx`, if the slot is occupied.
    #[must_use]
    pub fn handle_at(&self, idx: u32) -> Option<SceneId> {
        (idx < self.len && self.alive[idx as usize]).then(|| self.handle(idx))
    }

    // -- Internal helpers --

    fn handle(&self, idx: u32) -> SceneId {
        SceneId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: SceneId) {
        assert!(
            self.is_alive(id),
            "stale SceneId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_index(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    /// Appends `c` to `p`'s child list and wires up inherited dirtiness.
    fn link_last(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // Child depends on parent for TRANSFORM.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
