// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Only [`SyncError`] and [`DepthScaleError`] ever escape an entry point.
//! [`IndicatorError`] and [`TextureError::Unavailable`] are per-node problems
//! that the reconciler records in its
//! [`SyncReport`](crate::reconcile::SyncReport) and keeps going.

use alloc::string::String;
use core::fmt;

use crate::attribute::LayoutAttribute;
use crate::geometry::Axis;

/// Why a constraint could not be visualized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndicatorError {
    /// A constraint item refers to an id absent from the current tree.
    ItemNotFound {
        /// The missing id.
        item: String,
    },
    /// An attribute code has no anchor.
    UnrecognizedAttribute {
        /// The offending attribute.
        attribute: LayoutAttribute,
    },
    /// A relational constraint has no usable second item.
    MissingSecondItem,
    /// The two anchors lie on different axes.
    AxisMismatch {
        /// Axis of the first anchor.
        first: Axis,
        /// Axis of the second anchor.
        second: Axis,
    },
}

impl fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemNotFound { item } => write!(f, "item not found: {item:?}"),
            Self::UnrecognizedAttribute { attribute } => {
                write!(f, "attribute {} has no anchor", attribute.code())
            }
            Self::MissingSecondItem => f.write_str("relational constraint has no second item"),
            Self::AxisMismatch { first, second } => {
                write!(f, "anchors disagree in axis ({first:?} vs {second:?})")
            }
        }
    }
}

impl core::error::Error for IndicatorError {}

/// Errors reported by a [`TextureLoader`](crate::reconcile::TextureLoader).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureError {
    /// The texture cannot be produced; the mesh renders untextured.
    Unavailable(String),
    /// The graphics context is gone. Fatal for the running `sync`.
    ContextLost,
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "texture unavailable: {reason}"),
            Self::ContextLost => f.write_str("graphics context lost"),
        }
    }
}

impl core::error::Error for TextureError {}

/// A fatal `sync` failure.
///
/// The retained map stays consistent: every node created or updated before
/// the failure is fully formed, and nothing was destroyed half-way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncError {
    /// The graphics context became invalid during the walk.
    ContextLost,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextLost => f.write_str("sync aborted: graphics context lost"),
        }
    }
}

impl core::error::Error for SyncError {}

/// Rejected depth-scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthScaleError(pub f64);

impl fmt::Display for DepthScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth scale must be finite, got {}", self.0)
    }
}

impl core::error::Error for DepthScaleError {}
