// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one frame.

use alloc::vec::Vec;

use kurbo::Rect;

use strata_core::geometry::{Color, Point3};
use strata_core::scene::{Primitive, SceneId, SceneStore, TextureId};

/// A single draw command in the render plan.
///
/// Items are produced in back-to-front order, matching the store's
/// depth-first traversal order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The scene node this item originates from.
    pub scene_id: SceneId,
    /// What to draw. Never [`Primitive::Group`].
    pub primitive: Primitive,
    /// World-space transform (column-major 4x4).
    pub world_transform: [f32; 16],
    /// Outline, overlay or line colour.
    pub color: Color,
    /// Bound content, for textured quads.
    pub texture: Option<TextureId>,
}

/// An ordered list of draw commands for a single frame.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Draw items in back-to-front order.
    pub items: Vec<RenderItem>,
    /// World-space x/y extent of every drawn item, for camera framing.
    pub bounds: Option<Rect>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.bounds = None;
    }

    /// Refills the plan from an evaluated store.
    ///
    /// Groups draw nothing and effectively hidden nodes are skipped.
    pub fn rebuild(&mut self, store: &SceneStore) {
        self.clear();
        for &idx in store.traversal_order() {
            let primitive = store.primitive_at(idx);
            if matches!(primitive, Primitive::Group) || store.effective_hidden_at(idx) {
                continue;
            }
            let Some(scene_id) = store.handle_at(idx) else {
                continue;
            };
            let world = store.world_transform_at(idx);
            let corners = match primitive {
                Primitive::Line { from, to } => [from, to],
                _ => {
                    let size = primitive.size().unwrap_or_default();
                    let (hw, hh) = (size.width / 2.0, size.height / 2.0);
                    [Point3::new(-hw, -hh, 0.0), Point3::new(hw, hh, 0.0)]
                }
            };
            for corner in corners {
                let p = world.transform_point(corner);
                let r = Rect::new(p.x, p.y, p.x, p.y);
                self.bounds = Some(self.bounds.map_or(r, |b| b.union(r)));
            }
            self.items.push(RenderItem {
                scene_id,
                primitive,
                world_transform: world.to_f32_array(),
                color: store.color_at(idx),
                texture: store.texture_at(idx),
            });
        }
    }

    /// Number of draw items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the plan draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use strata_core::scene::NodeFlags;

    fn quad(store: &mut SceneStore, parent: SceneId, x: f64, w: f64) -> SceneId {
        let id = store.create_node(Primitive::Outline {
            size: Size::new(w, w),
        });
        store.add_child(parent, id);
        store.set_position(id, Point3::new(x, 0.0, 0.0));
        id
    }

    #[test]
    fn plan_skips_groups_and_hidden_nodes() {
        let mut store = SceneStore::new();
        let root = store.create_node(Primitive::Group);
        let a = quad(&mut store, root, 0.0, 10.0);
        let b = quad(&mut store, root, 20.0, 10.0);
        store.set_flags(b, NodeFlags { hidden: true });
        let _ = store.evaluate();

        let mut plan = RenderPlan::new();
        plan.rebuild(&store);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.items[0].scene_id, a);
        assert_eq!(plan.bounds, Some(Rect::new(-5.0, -5.0, 5.0, 5.0)));
    }

    #[test]
    fn plan_is_back_to_front() {
        let mut store = SceneStore::new();
        let root = store.create_node(Primitive::Group);
        let a = quad(&mut store, root, 0.0, 2.0);
        let inner = quad(&mut store, a, 1.0, 1.0);
        let b = quad(&mut store, root, 5.0, 2.0);
        let _ = store.evaluate();

        let mut plan = RenderPlan::new();
        plan.rebuild(&store);
        let order: Vec<_> = plan.items.iter().map(|i| i.scene_id).collect();
        assert_eq!(order, [a, inner, b]);
        assert_eq!(&plan.items[1].world_transform[12..], &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn lines_contribute_their_endpoints_to_bounds() {
        let mut store = SceneStore::new();
        let root = store.create_node(Primitive::Group);
        store.set_position(root, Point3::new(100.0, 0.0, 0.0));
        let line = store.create_node(Primitive::Line {
            from: Point3::new(-10.0, 0.0, 1.0),
            to: Point3::new(10.0, 4.0, 1.0),
        });
        store.add_child(root, line);
        let _ = store.evaluate();

        let mut plan = RenderPlan::new();
        plan.rebuild(&store);
        assert_eq!(plan.bounds, Some(Rect::new(90.0, 0.0, 110.0, 4.0)));
    }

    #[test]
    fn rebuild_clears_previous_items() {
        let mut store = SceneStore::new();
        let root = store.create_node(Primitive::Group);
        let a = quad(&mut store, root, 0.0, 2.0);
        let _ = store.evaluate();
        let mut plan = RenderPlan::new();
        plan.rebuild(&store);
        assert_eq!(plan.len(), 1);

        store.destroy_node(a);
        let _ = store.evaluate();
        plan.rebuild(&store);
        assert!(plan.is_empty());
        assert_eq!(plan.bounds, None);
    }
}
