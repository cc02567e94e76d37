// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for reconciliation.
//!
//! [`TraceSink`] has one method per event, each defaulting to a no-op, so a
//! sink only overrides what it cares about.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. With the `trace` feature
//! **off**, every `Tracer` method compiles to nothing. With it **on**, each
//! method is a single `Option` branch before dispatch.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies.
//! - `trace-rich` (implies `trace`): gates per-node [`NodeChange`] records.

use crate::reconcile::{SyncIssue, SyncStats, TextureToken};
#[cfg(feature = "trace-rich")]
use crate::scene::SceneId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to a texture request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureEventKind {
    /// A load was requested from the host.
    Requested,
    /// A completed load was bound to its mesh.
    Applied,
    /// A completed load arrived for a superseded or destroyed mesh.
    Discarded,
    /// The host reported the load as failed.
    Failed,
}

/// How a retained node was touched by a sync.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeChangeKind {
    /// First sight of the id.
    Created,
    /// Snapshot differed; node updated in place.
    Updated,
    /// Only the parent-relative offset was rewritten.
    Retranslated,
    /// Moved under a different parent group.
    Reparented,
    /// Id disappeared; node destroyed.
    Removed,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a sync starts.
#[derive(Clone, Copy, Debug)]
pub struct SyncBeginEvent {
    /// Monotonic sync counter.
    pub sync_index: u64,
    /// Revision token of the tree's root node.
    pub revision: u64,
    /// Number of retained nodes before the walk.
    pub retained: usize,
}

/// Emitted when a sync completes without a fatal error.
#[derive(Clone, Copy, Debug)]
pub struct SyncEndEvent {
    /// Monotonic sync counter.
    pub sync_index: u64,
    /// What the sync did.
    pub stats: SyncStats,
}

/// Emitted for each texture request and completion.
#[derive(Clone, Copy, Debug)]
pub struct TextureEvent {
    /// The request's token.
    pub token: TextureToken,
    /// What happened.
    pub kind: TextureEventKind,
}

/// Emitted after the depth scale was reapplied.
#[derive(Clone, Copy, Debug)]
pub struct DepthScaleEvent {
    /// The new factor.
    pub factor: f64,
    /// Retained view groups that were moved.
    pub nodes: usize,
    /// Indicator lines that were rebuilt.
    pub lines: usize,
}

/// A per-node change record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct NodeChange {
    /// The view's group node.
    pub group: SceneId,
    /// What happened to it.
    pub kind: NodeChangeKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the reconciler.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called before a sync walks its tree.
    fn on_sync_begin(&mut self, e: &SyncBeginEvent) {
        _ = e;
    }

    /// Called after a sync finished.
    fn on_sync_end(&mut self, e: &SyncEndEvent) {
        _ = e;
    }

    /// Called for each non-fatal problem found during a sync.
    fn on_issue(&mut self, issue: &SyncIssue) {
        _ = issue;
    }

    /// Called for each texture request and completion.
    fn on_texture(&mut self, e: &TextureEvent) {
        _ = e;
    }

    /// Called after the depth scale was reapplied.
    fn on_depth_scale(&mut self, e: &DepthScaleEvent) {
        _ = e;
    }

    /// Called with the per-node changes of one sync (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_node_changes(&mut self, sync_index: u64, changes: &[NodeChange]) {
        _ = (sync_index, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SyncBeginEvent`].
    #[inline]
    pub fn sync_begin(&mut self, e: &SyncBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sync_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SyncEndEvent`].
    #[inline]
    pub fn sync_end(&mut self, e: &SyncEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sync_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SyncIssue`].
    #[inline]
    pub fn issue(&mut self, issue: &SyncIssue) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_issue(issue);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = issue;
        }
    }

    /// Emits a [`TextureEvent`].
    #[inline]
    pub fn texture(&mut self, e: &TextureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_texture(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DepthScaleEvent`].
    #[inline]
    pub fn depth_scale(&mut self, e: &DepthScaleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_depth_scale(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits per-node changes (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn node_changes(&mut self, sync_index: u64, changes: &[NodeChange]) {
        if let Some(s) = &mut self.sink {
            s.on_node_changes(sync_index, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_sync_begin(&SyncBeginEvent {
            sync_index: 0,
            revision: 0,
            retained: 0,
        });
        sink.on_depth_scale(&DepthScaleEvent {
            factor: 2.0,
            nodes: 0,
            lines: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.sync_end(&SyncEndEvent {
            sync_index: 1,
            stats: SyncStats::default(),
        });
        tracer.issue(&SyncIssue::DuplicateId { id: "a".into() });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            syncs: Vec<u64>,
            issues: usize,
        }
        impl TraceSink for RecordingSink {
            fn on_sync_begin(&mut self, e: &SyncBeginEvent) {
                self.syncs.push(e.sync_index);
            }
            fn on_issue(&mut self, _issue: &SyncIssue) {
                self.issues += 1;
            }
        }

        let mut sink = RecordingSink {
            syncs: Vec::new(),
            issues: 0,
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.sync_begin(&SyncBeginEvent {
            sync_index: 42,
            revision: 7,
            retained: 0,
        });
        tracer.issue(&SyncIssue::DuplicateId { id: "a".into() });
        drop(tracer);
        assert_eq!(sink.syncs, &[42]);
        assert_eq!(sink.issues, 1);
    }
}
