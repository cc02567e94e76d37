// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View tree snapshots.
//!
//! A [`ViewNode`] tree is the immutable input to
//! [`SceneGraphState::sync`](crate::reconcile::SceneGraphState::sync). It is
//! built fresh for every fetched revision and never mutated afterwards.
//!
//! Positions are in *layout space*: `x`/`y` locate the centre of the view
//! relative to the root of the tree (y grows upward), and `z` is the view's
//! layer depth before the depth scale is applied.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::attribute::LayoutAttribute;

/// One item of a constraint: a view id plus the attribute it pins.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintItem {
    /// Id of the referenced view.
    pub item: String,
    /// Attribute of the referenced view.
    pub attribute: LayoutAttribute,
}

impl ConstraintItem {
    /// Creates an item from a view id and a raw attribute code.
    #[must_use]
    pub fn new(item: impl Into<String>, code: i64) -> Self {
        Self::with_attribute(item, LayoutAttribute::from_code(code))
    }

    /// Creates an item from a view id and a decoded attribute.
    #[must_use]
    pub fn with_attribute(item: impl Into<String>, attribute: LayoutAttribute) -> Self {
        Self {
            item: item.into(),
            attribute,
        }
    }
}

/// The items of a layout constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSpec {
    /// The constrained item.
    pub first: ConstraintItem,
    /// The item it is related to; `None` for dimension constraints.
    pub second: Option<ConstraintItem>,
}

/// Semantic kind of a tree node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeKind {
    /// A native view; retained with a mesh when it carries an id.
    #[default]
    View,
    /// A constraint pseudo-node. Never gets a mesh; when selected it produces
    /// an indicator hosted by its nearest retained ancestor.
    Constraint(ConstraintSpec),
}

/// A node of an immutable view tree snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewNode {
    /// Stable identity; `None` or empty for structural-only nodes.
    pub id: Option<String>,
    /// Semantic kind.
    pub kind: NodeKind,
    /// Layout-space centre x.
    pub x: f64,
    /// Layout-space centre y.
    pub y: f64,
    /// Layout depth.
    pub z: f64,
    /// Layout width.
    pub width: f64,
    /// Layout height.
    pub height: f64,
    /// Whether the node is selected in the editor.
    pub selected: bool,
    /// Whether the node has editor focus.
    pub on_focus: bool,
    /// The native hidden flag.
    pub is_hidden: bool,
    /// Reference to the node's rendered content.
    pub img_url: String,
    /// Fetch revision that produced this value.
    pub revision: u64,
    /// Ordered children.
    pub children: Vec<Self>,
}

impl ViewNode {
    /// Creates a view node with the given id and layout rectangle.
    #[must_use]
    pub fn view(id: impl Into<String>, x: f64, y: f64, z: f64, width: f64, height: f64) -> Self {
        Self {
            id: Some(id.into()),
            x,
            y,
            z,
            width,
            height,
            ..Self::default()
        }
    }

    /// Creates a structural node holding `children`.
    #[must_use]
    pub fn group(children: Vec<Self>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    /// Creates a constraint pseudo-node.
    #[must_use]
    pub fn constraint(id: impl Into<String>, spec: ConstraintSpec) -> Self {
        Self {
            id: Some(id.into()),
            kind: NodeKind::Constraint(spec),
            ..Self::default()
        }
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the selection flag.
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Sets the content reference and revision.
    #[must_use]
    pub fn with_image(mut self, img_url: impl Into<String>, revision: u64) -> Self {
        self.img_url = img_url.into();
        self.revision = revision;
        self
    }

    /// The node's id if it is non-empty.
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Whether the reconciler keeps a mesh for this node.
    #[inline]
    #[must_use]
    pub fn is_retained(&self) -> bool {
        matches!(self.kind, NodeKind::View) && self.key().is_some()
    }

    /// The constraint carried by this node, if any.
    #[inline]
    #[must_use]
    pub fn constraint_spec(&self) -> Option<&ConstraintSpec> {
        match &self.kind {
            NodeKind::Constraint(spec) => Some(spec),
            NodeKind::View => None,
        }
    }

    /// Layout geometry of this node.
    #[inline]
    #[must_use]
    pub fn geometry(&self) -> NodeGeometry {
        NodeGeometry {
            center: Point::new(self.x, self.y),
            z: self.z,
            size: Size::new(self.width, self.height),
        }
    }

    /// `height > 0 && width > 0 && !is_hidden`.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.height > 0.0 && self.width > 0.0 && !self.is_hidden
    }
}

/// Centre, depth and size of a node in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeGeometry {
    /// Centre of the bounding rectangle.
    pub center: Point,
    /// Layout depth.
    pub z: f64,
    /// Size of the bounding rectangle.
    pub size: Size,
}

impl NodeGeometry {
    /// The bounding rectangle.
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }
}

/// The per-node fields the reconciler diffs, without children.
///
/// Comparing against a [`ViewNode`] with [`differs_from`](Self::differs_from)
/// never allocates and never looks at children, so an unchanged node costs
/// O(1) regardless of its subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot {
    /// Layout geometry.
    pub geometry: NodeGeometry,
    /// Selection flag.
    pub selected: bool,
    /// Focus flag.
    pub on_focus: bool,
    /// Native hidden flag.
    pub is_hidden: bool,
    /// Content reference.
    pub img_url: String,
    /// Fetch revision.
    pub revision: u64,
}

impl ViewSnapshot {
    /// Captures the diffable fields of `node`.
    #[must_use]
    pub fn of(node: &ViewNode) -> Self {
        Self {
            geometry: node.geometry(),
            selected: node.selected,
            on_focus: node.on_focus,
            is_hidden: node.is_hidden,
            img_url: node.img_url.clone(),
            revision: node.revision,
        }
    }

    /// Field-by-field comparison against a fresh node.
    #[must_use]
    pub fn differs_from(&self, node: &ViewNode) -> bool {
        self.geometry != node.geometry()
            || self.selected != node.selected
            || self.on_focus != node.on_focus
            || self.is_hidden != node.is_hidden
            || self.revision != node.revision
            || self.img_url != node.img_url
    }

    /// Whether the content reference differs from `node`'s.
    #[must_use]
    pub fn content_differs(&self, node: &ViewNode) -> bool {
        self.revision != node.revision || self.img_url != node.img_url
    }

    /// `height > 0 && width > 0 && !is_hidden`.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.geometry.size.height > 0.0 && self.geometry.size.width > 0.0 && !self.is_hidden
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn structural_and_constraint_nodes_are_not_retained() {
        let group = ViewNode::group(vec![]);
        assert!(!group.is_retained());

        let mut empty = ViewNode::view("", 0.0, 0.0, 0.0, 1.0, 1.0);
        assert!(!empty.is_retained(), "empty ids are structural");
        empty.id = Some("v".into());
        assert!(empty.is_retained());

        let c = ViewNode::constraint(
            "v.c0",
            ConstraintSpec {
                first: ConstraintItem::new("v", 7),
                second: None,
            },
        );
        assert!(!c.is_retained());
        assert!(c.constraint_spec().is_some());
    }

    #[test]
    fn visibility_rule() {
        let mut node = ViewNode::view("a", 0.0, 0.0, 0.0, 10.0, 10.0);
        assert!(node.is_visible());
        node.height = 0.0;
        assert!(!node.is_visible());
        node.height = 10.0;
        node.is_hidden = true;
        assert!(!node.is_visible());
    }

    #[test]
    fn snapshot_diff_ignores_children() {
        let parent = ViewNode::view("p", 0.0, 0.0, 0.0, 10.0, 10.0);
        let snapshot = ViewSnapshot::of(&parent);
        let with_kid = parent
            .clone()
            .with_child(ViewNode::view("c", 1.0, 1.0, 1.0, 2.0, 2.0));
        assert!(!snapshot.differs_from(&with_kid));
        assert!(snapshot.differs_from(&parent.clone().selected(true)));
    }

    #[test]
    fn snapshot_content_diff_tracks_revision() {
        let node = ViewNode::view("a", 0.0, 0.0, 0.0, 1.0, 1.0).with_image("img://a", 1);
        let snapshot = ViewSnapshot::of(&node);
        assert!(!snapshot.content_differs(&node));
        let bumped = node.clone().with_image("img://a", 2);
        assert!(snapshot.content_differs(&bumped));
        assert!(snapshot.differs_from(&bumped));
    }

    #[test]
    fn geometry_rect_is_centred() {
        let g = ViewNode::view("a", 100.0, 0.0, 0.0, 20.0, 10.0).geometry();
        assert_eq!(g.rect(), Rect::new(90.0, -5.0, 110.0, 5.0));
    }
}
