// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout-attribute codes.
//!
//! Constraint items name one edge, centre or dimension of a view by an
//! integer code taken from the native layout-attribute enumeration. This
//! module turns those codes into a closed [`LayoutAttribute`] enum; codes
//! outside the table become [`LayoutAttribute::Unrecognized`] and are never
//! silently folded into a known variant.
//!
//! For geometry only the *base family* matters: `leading`, `leftMargin` and
//! `leadingMargin` all anchor on the left edge. The margin and
//! language-direction modifiers are kept so that editors can show them, but
//! they never change the resolved [`Edge`] or [`Axis`].

use crate::geometry::Axis;

/// One edge of a view's bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Minimum x.
    Left,
    /// Maximum x.
    Right,
    /// Maximum y (layout space is y-up).
    Top,
    /// Minimum y.
    Bottom,
}

impl Edge {
    /// The axis along which this edge is measured.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }
}

/// A native layout attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutAttribute {
    /// Code 0: the placeholder used by dimension constraints for their
    /// second item.
    NotAnAttribute,
    /// Code 1.
    Left,
    /// Code 2.
    Right,
    /// Code 3.
    Top,
    /// Code 4.
    Bottom,
    /// Code 5.
    Leading,
    /// Code 6.
    Trailing,
    /// Code 7.
    Width,
    /// Code 8.
    Height,
    /// Code 9.
    CenterX,
    /// Code 10.
    CenterY,
    /// Code 11.
    LastBaseline,
    /// Code 12.
    FirstBaseline,
    /// Code 13.
    LeftMargin,
    /// Code 14.
    RightMargin,
    /// Code 15.
    TopMargin,
    /// Code 16.
    BottomMargin,
    /// Code 17.
    LeadingMargin,
    /// Code 18.
    TrailingMargin,
    /// Code 19.
    CenterXWithinMargins,
    /// Code 20.
    CenterYWithinMargins,
    /// Any code outside the table.
    Unrecognized(i64),
}

impl LayoutAttribute {
    /// Decodes a raw attribute code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::NotAnAttribute,
            1 => Self::Left,
            2 => Self::Right,
            3 => Self::Top,
            4 => Self::Bottom,
            5 => Self::Leading,
            6 => Self::Trailing,
            7 => Self::Width,
            8 => Self::Height,
            9 => Self::CenterX,
            10 => Self::CenterY,
            11 => Self::LastBaseline,
            12 => Self::FirstBaseline,
            13 => Self::LeftMargin,
            14 => Self::RightMargin,
            15 => Self::TopMargin,
            16 => Self::BottomMargin,
            17 => Self::LeadingMargin,
            18 => Self::TrailingMargin,
            19 => Self::CenterXWithinMargins,
            20 => Self::CenterYWithinMargins,
            other => Self::Unrecognized(other),
        }
    }

    /// Returns the raw attribute code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::NotAnAttribute => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Top => 3,
            Self::Bottom => 4,
            Self::Leading => 5,
            Self::Trailing => 6,
            Self::Width => 7,
            Self::Height => 8,
            Self::CenterX => 9,
            Self::CenterY => 10,
            Self::LastBaseline => 11,
            Self::FirstBaseline => 12,
            Self::LeftMargin => 13,
            Self::RightMargin => 14,
            Self::TopMargin => 15,
            Self::BottomMargin => 16,
            Self::LeadingMargin => 17,
            Self::TrailingMargin => 18,
            Self::CenterXWithinMargins => 19,
            Self::CenterYWithinMargins => 20,
            Self::Unrecognized(code) => code,
        }
    }

    /// The edge this attribute anchors on, by base family.
    ///
    /// Leading/trailing resolve to left/right. Centres, baselines and
    /// dimensions have no edge.
    #[must_use]
    pub const fn edge(self) -> Option<Edge> {
        match self {
            Self::Left | Self::Leading | Self::LeftMargin | Self::LeadingMargin => Some(Edge::Left),
            Self::Right | Self::Trailing | Self::RightMargin | Self::TrailingMargin => {
                Some(Edge::Right)
            }
            Self::Top | Self::TopMargin => Some(Edge::Top),
            Self::Bottom | Self::BottomMargin => Some(Edge::Bottom),
            Self::NotAnAttribute
            | Self::Width
            | Self::Height
            | Self::CenterX
            | Self::CenterY
            | Self::LastBaseline
            | Self::FirstBaseline
            | Self::CenterXWithinMargins
            | Self::CenterYWithinMargins
            | Self::Unrecognized(_) => None,
        }
    }

    /// The measured axis if this is a dimension attribute.
    #[must_use]
    pub const fn dimension(self) -> Option<Axis> {
        match self {
            Self::Width => Some(Axis::Horizontal),
            Self::Height => Some(Axis::Vertical),
            _ => None,
        }
    }

    /// Whether the attribute is the margin-relative variant of its family.
    #[must_use]
    pub const fn relative_to_margin(self) -> bool {
        matches!(
            self,
            Self::LeftMargin
                | Self::RightMargin
                | Self::TopMargin
                | Self::BottomMargin
                | Self::LeadingMargin
                | Self::TrailingMargin
                | Self::CenterXWithinMargins
                | Self::CenterYWithinMargins
        )
    }

    /// Whether the attribute flips with the user-interface layout direction.
    #[must_use]
    pub const fn respects_language_direction(self) -> bool {
        matches!(
            self,
            Self::Leading | Self::Trailing | Self::LeadingMargin | Self::TrailingMargin
        )
    }
}

impl From<i64> for LayoutAttribute {
    #[inline]
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_the_table() {
        for code in 0..=20 {
            let attr = LayoutAttribute::from_code(code);
            assert!(
                !matches!(attr, LayoutAttribute::Unrecognized(_)),
                "code {code} is in the table"
            );
            assert_eq!(attr.code(), code);
        }
    }

    #[test]
    fn unknown_codes_are_kept_verbatim() {
        assert_eq!(
            LayoutAttribute::from_code(42),
            LayoutAttribute::Unrecognized(42)
        );
        assert_eq!(LayoutAttribute::from_code(-1).code(), -1);
        assert_eq!(LayoutAttribute::Unrecognized(42).edge(), None);
    }

    #[test]
    fn modifiers_do_not_change_the_family() {
        let left_family = [
            LayoutAttribute::Left,
            LayoutAttribute::Leading,
            LayoutAttribute::LeftMargin,
            LayoutAttribute::LeadingMargin,
        ];
        for attr in left_family {
            assert_eq!(attr.edge(), Some(Edge::Left), "{attr:?}");
            assert_eq!(attr.edge().map(Edge::axis), Some(Axis::Horizontal));
        }
        assert_eq!(LayoutAttribute::TopMargin.edge(), Some(Edge::Top));
        assert_eq!(LayoutAttribute::BottomMargin.edge(), Some(Edge::Bottom));
        assert_eq!(LayoutAttribute::TrailingMargin.edge(), Some(Edge::Right));
    }

    #[test]
    fn modifier_flags() {
        assert!(LayoutAttribute::LeadingMargin.relative_to_margin());
        assert!(LayoutAttribute::LeadingMargin.respects_language_direction());
        assert!(!LayoutAttribute::Left.relative_to_margin());
        assert!(!LayoutAttribute::Left.respects_language_direction());
        assert!(LayoutAttribute::CenterXWithinMargins.relative_to_margin());
    }

    #[test]
    fn centres_and_dimensions_have_no_edge() {
        assert_eq!(LayoutAttribute::CenterX.edge(), None);
        assert_eq!(LayoutAttribute::Width.edge(), None);
        assert_eq!(LayoutAttribute::Width.dimension(), Some(Axis::Horizontal));
        assert_eq!(LayoutAttribute::Height.dimension(), Some(Axis::Vertical));
        assert_eq!(LayoutAttribute::Top.dimension(), None);
    }
}
