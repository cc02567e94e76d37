// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint indicator geometry.
//!
//! Every indicator is a *bracket*: one main segment spanning the measured
//! distance and a short perpendicular tick at each end. Dimension constraints
//! (width/height of the first item) measure along an inset edge of that item;
//! relational constraints measure from the first item's anchor to the second
//! item's anchor, projected onto the first anchor's line.
//!
//! All output is in layout space. Placing the lines under the right group is
//! the reconciler's job.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::IndicatorError;
use crate::geometry::{Axis, Point3};
use crate::translate::{GeometryLookup, anchor_point};
use crate::view::{ConstraintSpec, NodeGeometry};

/// One line segment of an indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    /// Start point.
    pub p1: Point3,
    /// End point.
    pub p2: Point3,
}

impl LineSegment {
    /// Creates a segment.
    #[inline]
    #[must_use]
    pub const fn new(p1: Point3, p2: Point3) -> Self {
        Self { p1, p2 }
    }
}

/// Bracket dimensions, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BracketStyle {
    /// Length of each end tick.
    pub bracket_len: f64,
    /// Distance between a dimension bracket and the edge it runs along.
    pub dimension_inset: f64,
}

impl BracketStyle {
    /// Ten-unit ticks and a ten-unit dimension inset.
    pub const STANDARD: Self = Self {
        bracket_len: 10.0,
        dimension_inset: 10.0,
    };
}

impl Default for BracketStyle {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The indicator for one selected constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintIndicator {
    /// Id of the constraint node.
    pub constraint_id: String,
    /// Id of the view hosting the lines (`None` for the scene root).
    pub owner_id: Option<String>,
    /// Segments in layout space, main line first.
    pub lines: Vec<LineSegment>,
}

/// Builds the three bracket segments from `p1` to `p2` along `axis`.
///
/// The ticks are centred on each end point and run along the cross axis.
#[must_use]
pub fn bracket(p1: Point3, p2: Point3, axis: Axis, bracket_len: f64) -> Vec<LineSegment> {
    let half = bracket_len / 2.0;
    let tick = |p: Point3| match axis.cross() {
        Axis::Vertical => LineSegment::new(
            Point3::new(p.x, p.y + half, p.z),
            Point3::new(p.x, p.y - half, p.z),
        ),
        Axis::Horizontal => LineSegment::new(
            Point3::new(p.x + half, p.y, p.z),
            Point3::new(p.x - half, p.y, p.z),
        ),
    };
    let mut lines = Vec::with_capacity(3);
    lines.push(LineSegment::new(p1, p2));
    lines.push(tick(p1));
    lines.push(tick(p2));
    lines
}

/// The measurement bracket for a width or height constraint on `item`.
#[must_use]
pub fn dimension_bracket(item: &NodeGeometry, axis: Axis, style: &BracketStyle) -> Vec<LineSegment> {
    let NodeGeometry { center, z, size } = *item;
    match axis {
        Axis::Horizontal => {
            let x1 = center.x - size.width / 2.0;
            let y = center.y + size.height / 2.0 - style.dimension_inset;
            bracket(
                Point3::new(x1, y, z),
                Point3::new(x1 + size.width, y, z),
                axis,
                style.bracket_len,
            )
        }
        Axis::Vertical => {
            let x = center.x - size.width / 2.0 + style.dimension_inset;
            let y1 = center.y + size.height / 2.0;
            bracket(
                Point3::new(x, y1, z),
                Point3::new(x, y1 - size.height, z),
                axis,
                style.bracket_len,
            )
        }
    }
}

/// Computes the indicator lines for `spec`, resolving item ids in `items`.
///
/// # Errors
///
/// Returns an [`IndicatorError`] when an item is missing from the tree, an
/// attribute has no anchor, a relational constraint lacks its second item, or
/// the two anchors disagree in axis. None of these are fatal: the caller
/// skips the indicator.
pub fn indicator_lines(
    spec: &ConstraintSpec,
    items: &impl GeometryLookup,
    style: &BracketStyle,
) -> Result<Vec<LineSegment>, IndicatorError> {
    let first = items.resolve(&spec.first.item)?;
    if let Some(axis) = spec.first.attribute.dimension() {
        return Ok(dimension_bracket(&first, axis, style));
    }

    let second_spec = spec.second.as_ref().ok_or(IndicatorError::MissingSecondItem)?;
    let second = items.resolve(&second_spec.item)?;

    let a = anchor_point(spec.first.attribute, &first).ok_or(
        IndicatorError::UnrecognizedAttribute {
            attribute: spec.first.attribute,
        },
    )?;
    let b = anchor_point(second_spec.attribute, &second).ok_or(
        IndicatorError::UnrecognizedAttribute {
            attribute: second_spec.attribute,
        },
    )?;
    if a.axis != b.axis {
        return Err(IndicatorError::AxisMismatch {
            first: a.axis,
            second: b.axis,
        });
    }

    let end = match a.axis {
        Axis::Horizontal => Point3::new(b.point.x, a.point.y, b.point.z),
        Axis::Vertical => Point3::new(a.point.x, b.point.y, b.point.z),
    };
    Ok(bracket(a.point, end, a.axis, style.bracket_len))
}
