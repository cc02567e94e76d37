// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view scene resources and their in-place updates.

use alloc::vec::Vec;

use kurbo::Size;

use super::indicator::IndicatorGroup;
use super::texture::TextureToken;
use crate::config::SceneConfig;
use crate::geometry::Scale2;
use crate::scene::{NodeFlags, Primitive, SceneId, SceneStore};
use crate::translate::scene_offset;
use crate::view::{NodeGeometry, ViewNode, ViewSnapshot};

/// Scene handles owned by one retained view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewParts {
    /// Positions the view and parents everything else it owns, including the
    /// groups of its retained children.
    pub group: SceneId,
    /// Textured quad showing the view's content.
    pub mesh: SceneId,
    /// Wireframe outline.
    pub outline: SceneId,
    /// Selection overlay, present while the view is selected.
    pub overlay: Option<SceneId>,
    /// Group of indicator lines for the selected constraints this view hosts.
    pub indicator: Option<SceneId>,
}

/// Shared inputs for building and updating views.
#[derive(Clone, Copy, Debug)]
pub(super) struct BuildContext<'c> {
    pub config: &'c SceneConfig,
    pub depth_scale: f64,
    pub textures_visible: bool,
}

/// Everything the reconciler keeps for one view id.
#[derive(Debug)]
pub(super) struct RetainedNode {
    /// Fields seen on the last sync that touched this view.
    pub snapshot: ViewSnapshot,
    /// Geometry of the retained parent the offset was computed against.
    pub anchor: Option<NodeGeometry>,
    pub group: SceneId,
    pub mesh: SceneId,
    pub outline: SceneId,
    pub overlay: Option<SceneId>,
    pub indicator: Option<IndicatorGroup>,
    /// Latest texture request still in flight.
    pub texture_token: Option<TextureToken>,
    /// The last texture request was cut off by a lost context and must be
    /// repeated even if the content is unchanged.
    pub content_pending: bool,
}

/// What [`RetainedNode::update`] did.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct UpdateOutcome {
    /// The content reference changed; a texture request is due.
    pub content_changed: bool,
    pub overlay_added: Option<SceneId>,
    pub overlay_removed: Option<SceneId>,
}

impl RetainedNode {
    /// Builds the scene nodes for `node` under `parent_group`.
    pub fn create(
        store: &mut SceneStore,
        node: &ViewNode,
        parent_group: SceneId,
        anchor: Option<NodeGeometry>,
        ctx: BuildContext<'_>,
    ) -> Self {
        let geometry = node.geometry();
        let group = store.create_node(Primitive::Group);
        store.add_child(parent_group, group);
        store.set_position(group, scene_offset(&geometry, anchor.as_ref(), ctx.depth_scale));
        if !node.is_visible() {
            store.set_flags(group, NodeFlags { hidden: true });
        }

        let mesh = store.create_node(Primitive::TexturedQuad {
            size: geometry.size,
        });
        store.add_child(group, mesh);
        if !ctx.textures_visible {
            store.set_flags(mesh, NodeFlags { hidden: true });
        }

        let outline = store.create_node(Primitive::Outline {
            size: geometry.size,
        });
        store.add_child(group, outline);
        store.set_color(outline, ctx.config.outline.pick(node.selected, node.on_focus));

        let overlay = node
            .selected
            .then(|| create_overlay(store, group, geometry.size, ctx.config));

        Self {
            snapshot: ViewSnapshot::of(node),
            anchor,
            group,
            mesh,
            outline,
            overlay,
            indicator: None,
            texture_token: None,
            content_pending: false,
        }
    }

    /// Brings the scene nodes in line with `node`, touching only what
    /// differs from the stored snapshot.
    pub fn update(
        &mut self,
        store: &mut SceneStore,
        node: &ViewNode,
        anchor: Option<NodeGeometry>,
        ctx: BuildContext<'_>,
    ) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();
        let old = &self.snapshot;
        let geometry = node.geometry();

        self.anchor = anchor;
        self.retranslate(store, &geometry, ctx.depth_scale);

        if old.geometry.size != geometry.size {
            let parts = [Some(self.mesh), Some(self.outline), self.overlay];
            for part in parts.into_iter().flatten() {
                resize(store, part, old.geometry.size, geometry.size);
            }
        }

        let color = ctx.config.outline.pick(node.selected, node.on_focus);
        if store.color(self.outline) != color {
            store.set_color(self.outline, color);
        }

        match (self.overlay, node.selected) {
            (None, true) => {
                let overlay = create_overlay(store, self.group, geometry.size, ctx.config);
                self.overlay = Some(overlay);
                outcome.overlay_added = Some(overlay);
            }
            (Some(overlay), false) => {
                store.destroy_node(overlay);
                self.overlay = None;
                outcome.overlay_removed = Some(overlay);
            }
            _ => {}
        }

        let hidden = !node.is_visible();
        if store.flags(self.group).hidden != hidden {
            store.set_flags(self.group, NodeFlags { hidden });
        }

        outcome.content_changed = old.content_differs(node);
        self.snapshot = ViewSnapshot::of(node);
        outcome
    }

    /// Rewrites the group's offset against the stored anchor if it changed.
    ///
    /// Returns `true` if the store was touched.
    pub fn retranslate(&self, store: &mut SceneStore, geometry: &NodeGeometry, depth_scale: f64) -> bool {
        let offset = scene_offset(geometry, self.anchor.as_ref(), depth_scale);
        if store.position(self.group) == offset {
            return false;
        }
        store.set_position(self.group, offset);
        true
    }

    /// The scene handles this view owns.
    pub fn parts(&self) -> ViewParts {
        ViewParts {
            group: self.group,
            mesh: self.mesh,
            outline: self.outline,
            overlay: self.overlay,
            indicator: self.indicator.as_ref().map(|i| i.group),
        }
    }

    /// Handles that map back to this view for hit-testing.
    pub fn owned_handles(&self) -> Vec<SceneId> {
        let mut handles = Vec::with_capacity(4);
        handles.extend([self.group, self.mesh, self.outline]);
        handles.extend(self.overlay);
        handles
    }
}

fn create_overlay(store: &mut SceneStore, group: SceneId, size: Size, config: &SceneConfig) -> SceneId {
    let overlay = store.create_node(Primitive::Overlay {
        size,
        opacity: config.overlay_opacity,
    });
    store.add_child(group, overlay);
    store.set_color(overlay, config.overlay_color);
    overlay
}

/// Scales a quad-like primitive from `old` to `new` size.
///
/// Multiplies the current scale by the new/old ratio. Growing out of (or
/// shrinking into) a zero dimension has no finite ratio, so the primitive is
/// rebuilt at the new size instead.
fn resize(store: &mut SceneStore, id: SceneId, old: Size, new: Size) {
    let rx = new.width / old.width;
    let ry = new.height / old.height;
    let usable = |r: f64| r.is_finite() && r != 0.0;
    if usable(rx) && usable(ry) {
        let scale = store.scale(id);
        store.set_scale(
            id,
            Scale2 {
                x: scale.x * rx,
                y: scale.y * ry,
            },
        );
    } else {
        store.set_primitive(id, store.primitive(id).resized(new));
        if store.scale(id) != Scale2::ONE {
            store.set_scale(id, Scale2::ONE);
        }
    }
}
