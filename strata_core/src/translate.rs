// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout-space to scene-space conversion.
//!
//! Every function here is pure. The scene graph nests a child's group under
//! its parent's group, so [`scene_offset`] always answers "where is this node
//! relative to its parent", never "where is it in the world". The world
//! position falls out of the scene store's transform hierarchy.
//!
//! Depth is the only coordinate that is scaled: layout `z` values are layer
//! indices, and the depth scale spreads them apart into an exploded view.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::hash::BuildHasher;

use crate::attribute::{Edge, LayoutAttribute};
use crate::error::IndicatorError;
use crate::geometry::{Axis, Point3};
use crate::view::{NodeGeometry, ViewNode};

/// A resolved constraint anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// The anchor point in layout space.
    pub point: Point3,
    /// Axis the anchor is measured along.
    pub axis: Axis,
}

/// Position of `node` relative to its parent's retained transform.
///
/// `parent` is the geometry of the nearest *retained* ancestor, or `None` for
/// a node attached to the scene root.
#[must_use]
pub fn scene_offset(node: &NodeGeometry, parent: Option<&NodeGeometry>, depth_scale: f64) -> Point3 {
    match parent {
        Some(p) => Point3::new(
            node.center.x - p.center.x,
            node.center.y - p.center.y,
            (node.z - p.z) * depth_scale,
        ),
        None => Point3::new(node.center.x, node.center.y, node.z * depth_scale),
    }
}

/// Resolves `attribute` to a point on `geometry`'s bounding rectangle.
///
/// Returns `None` for attributes without an edge (centres, baselines,
/// dimensions and unrecognized codes); callers treat that as "cannot
/// visualize".
#[must_use]
pub fn anchor_point(attribute: LayoutAttribute, geometry: &NodeGeometry) -> Option<Anchor> {
    let edge = attribute.edge()?;
    let NodeGeometry { center, z, size } = *geometry;
    let point = match edge {
        Edge::Left => Point3::new(center.x - size.width / 2.0, center.y, z),
        Edge::Right => Point3::new(center.x + size.width / 2.0, center.y, z),
        Edge::Top => Point3::new(center.x, center.y + size.height / 2.0, z),
        Edge::Bottom => Point3::new(center.x, center.y - size.height / 2.0, z),
    };
    Some(Anchor {
        point,
        axis: edge.axis(),
    })
}

/// Converts a layout-space indicator point into the local space of the group
/// hosting it.
///
/// `owner` is the hosting view's geometry (`None` when the host is the scene
/// root). `lift` raises the line slightly above its view plane so it is not
/// hidden by the view's own mesh.
#[must_use]
pub fn to_scene_point(
    point: Point3,
    owner: Option<&NodeGeometry>,
    depth_scale: f64,
    lift: f64,
) -> Point3 {
    let world_z = point.z * depth_scale + lift;
    match owner {
        Some(o) => Point3::new(
            point.x - o.center.x,
            point.y - o.center.y,
            world_z - o.z * depth_scale,
        ),
        None => point.with_z(world_z),
    }
}

/// Looks up the current geometry of a view by id.
pub trait GeometryLookup {
    /// Returns the geometry of the view with the given id.
    fn geometry_of(&self, id: &str) -> Option<NodeGeometry>;

    /// Like [`geometry_of`](Self::geometry_of), but reports a missing item as
    /// [`IndicatorError::ItemNotFound`].
    fn resolve(&self, id: &str) -> Result<NodeGeometry, IndicatorError> {
        self.geometry_of(id)
            .ok_or_else(|| IndicatorError::ItemNotFound { item: id.to_string() })
    }
}

impl<S: BuildHasher> GeometryLookup for hashbrown::HashMap<&str, NodeGeometry, S> {
    fn geometry_of(&self, id: &str) -> Option<NodeGeometry> {
        self.get(&id).copied()
    }
}

/// Searches the whole tree (views only, first match in pre-order).
impl GeometryLookup for ViewNode {
    fn geometry_of(&self, id: &str) -> Option<NodeGeometry> {
        let mut stack: Vec<&Self> = Vec::new();
        stack.push(self);
        while let Some(node) = stack.pop() {
            if node.is_retained() && node.key() == Some(id) {
                return Some(node.geometry());
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}
