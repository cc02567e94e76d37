// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform.
//!
//! Scene nodes are only ever translated and scaled in x/y, so this type
//! covers composition, translation and scale without pulling in a full
//! linear-algebra crate.

use core::ops::Mul;

use crate::geometry::{Point3, Scale2};

/// A column-major 4×4 affine transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the memory layout
/// used by GPU APIs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 4] {
        self.cols[i]
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// The local transform of a scene node: scale first, then translate.
    #[inline]
    #[must_use]
    pub const fn from_position_scale(position: Point3, scale: Scale2) -> Self {
        Self {
            cols: [
                [scale.x, 0.0, 0.0, 0.0],
                [0.0, scale.y, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [position.x, position.y, position.z, 1.0],
            ],
        }
    }

    /// The translation part.
    #[inline]
    #[must_use]
    pub const fn translation(self) -> Point3 {
        Point3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    /// Maps a point through this transform (`w = 1`).
    #[inline]
    #[must_use]
    pub fn transform_point(self, p: Point3) -> Point3 {
        let c = &self.cols;
        Point3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// Column-major `f32` array for upload.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "GPU upload format is f32 by definition"
    )]
    pub fn to_f32_array(self) -> [f32; 16] {
        let mut out = [0.0_f32; 16];
        for (j, col) in self.cols.iter().enumerate() {
            for (i, v) in col.iter().enumerate() {
                out[j * 4 + i] = *v as f32;
            }
        }
        out
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform3d::default(), Transform3d::IDENTITY);
    }

    #[test]
    fn nested_translations_add_up() {
        let parent = Transform3d::from_translation(10.0, 20.0, 30.0);
        let child = Transform3d::from_translation(1.0, -2.0, 3.0);
        assert_eq!((parent * child).translation(), Point3::new(11.0, 18.0, 33.0));
    }

    #[test]
    fn position_scale_matches_translate_times_scale() {
        let p = Point3::new(3.0, 4.0, 5.0);
        let s = Scale2 { x: 2.0, y: 0.5 };
        let expected = Transform3d::from_translation(3.0, 4.0, 5.0) * Transform3d::from_scale(2.0, 0.5, 1.0);
        assert_eq!(Transform3d::from_position_scale(p, s), expected);
    }

    #[test]
    fn child_scale_does_not_leak_into_parent_translation() {
        let parent = Transform3d::from_translation(5.0, 0.0, 0.0);
        let child = Transform3d::from_position_scale(Point3::ZERO, Scale2 { x: 2.0, y: 1.0 });
        let world = parent * child;
        assert_eq!(world.col(0), [2.0, 0.0, 0.0, 0.0]);
        assert_eq!(world.col(3), [5.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn points_are_scaled_then_translated() {
        let t = Transform3d::from_position_scale(Point3::new(10.0, 0.0, 2.0), Scale2 { x: 2.0, y: 3.0 });
        assert_eq!(t.transform_point(Point3::new(1.0, 1.0, 1.0)), Point3::new(12.0, 3.0, 3.0));
    }

    #[test]
    fn f32_array_is_column_major() {
        let t = Transform3d::from_translation(1.0, 2.0, 3.0);
        let arr = t.to_f32_array();
        assert_eq!(&arr[12..], &[1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn infinity_detected() {
        let mut t = Transform3d::IDENTITY;
        assert!(t.is_finite());
        t.cols[0][3] = f64::INFINITY;
        assert!(!t.is_finite());
    }
}
