// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small value types shared by the translator, the constraint builder and the
//! scene store.

use core::fmt;

/// A point in 3-D space.
///
/// Depending on context this is either a layout-space point (z is the raw
/// layout depth) or a scene-space point (z already multiplied by the depth
/// scale).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (positive is up).
    pub y: f64,
    /// Depth coordinate.
    pub z: f64,
}

impl Point3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns a copy with `z` replaced.
    #[inline]
    #[must_use]
    pub const fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Are all coordinates finite?
    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Which axis an anchor or a measured span lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right anchors and width spans.
    Horizontal,
    /// Top/bottom anchors and height spans.
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Non-uniform x/y scale applied to a scene node's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale2 {
    /// Horizontal factor.
    pub x: f64,
    /// Vertical factor.
    pub y: f64,
}

impl Scale2 {
    /// No scaling.
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
}

impl Default for Scale2 {
    #[inline]
    fn default() -> Self {
        Self::ONE
    }
}

/// A packed `0xRRGGBB` colour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// Red channel.
    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        self.0.to_be_bytes()[3]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:06x})", self.0)
    }
}
