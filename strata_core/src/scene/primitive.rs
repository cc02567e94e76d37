// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable content of a scene node.

use kurbo::Size;

use crate::geometry::Point3;

/// What a scene node draws.
///
/// Sizes are the geometry the primitive was *built* with. Later resizes are
/// expressed through the node's [`Scale2`](crate::geometry::Scale2) so the
/// geometry does not have to be rebuilt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Draws nothing; positions its children.
    Group,
    /// A quad showing the node's content texture.
    TexturedQuad {
        /// Built size.
        size: Size,
    },
    /// The wireframe outline of a quad.
    Outline {
        /// Built size.
        size: Size,
    },
    /// A translucent selection highlight.
    Overlay {
        /// Built size.
        size: Size,
        /// Overlay opacity.
        opacity: f32,
    },
    /// A single line segment in the parent's local space.
    Line {
        /// Start point.
        from: Point3,
        /// End point.
        to: Point3,
    },
}

impl Primitive {
    /// Built size of a quad-like primitive.
    #[must_use]
    pub const fn size(&self) -> Option<Size> {
        match self {
            Self::TexturedQuad { size } | Self::Outline { size } | Self::Overlay { size, .. } => {
                Some(*size)
            }
            Self::Group | Self::Line { .. } => None,
        }
    }

    /// Returns a copy rebuilt at `size`; other primitives are returned as-is.
    #[must_use]
    pub const fn resized(self, size: Size) -> Self {
        match self {
            Self::TexturedQuad { .. } => Self::TexturedQuad { size },
            Self::Outline { .. } => Self::Outline { size },
            Self::Overlay { opacity, .. } => Self::Overlay { size, opacity },
            Self::Group | Self::Line { .. } => self,
        }
    }
}
