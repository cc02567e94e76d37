// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a sync did, and what it could not do.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::IndicatorError;

/// Counters for one sync.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Views seen for the first time.
    pub created: usize,
    /// Views whose snapshot changed.
    pub updated: usize,
    /// Unchanged views whose parent-relative offset had to be rewritten.
    pub retranslated: usize,
    /// Views moved under a different parent.
    pub reparented: usize,
    /// Views left untouched.
    pub unchanged: usize,
    /// Views destroyed because their id disappeared.
    pub removed: usize,
    /// Indicator groups (re)built.
    pub indicators: usize,
}

/// A non-fatal problem found during a sync.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncIssue {
    /// A selected constraint could not be visualized.
    Indicator {
        /// Id of the constraint node.
        constraint_id: String,
        /// Why.
        error: IndicatorError,
    },
    /// An id appeared twice in one tree. The second subtree was skipped.
    DuplicateId {
        /// The repeated id.
        id: String,
    },
    /// A texture could not be produced; the view renders untextured.
    TextureUnavailable {
        /// Id of the view.
        node_id: String,
        /// Loader's explanation.
        reason: String,
    },
}

impl fmt::Display for SyncIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indicator {
                constraint_id,
                error,
            } => write!(f, "constraint {constraint_id:?}: {error}"),
            Self::DuplicateId { id } => write!(f, "duplicate id {id:?}, subtree skipped"),
            Self::TextureUnavailable { node_id, reason } => {
                write!(f, "view {node_id:?} has no texture: {reason}")
            }
        }
    }
}

/// Result of a successful sync.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncReport {
    /// Counters.
    pub stats: SyncStats,
    /// Non-fatal problems, in discovery order.
    pub issues: Vec<SyncIssue>,
}

impl SyncReport {
    /// Returns `true` if the sync found no problems.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
