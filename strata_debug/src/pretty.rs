// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::reconcile::SyncIssue;
use strata_core::trace::{
    DepthScaleEvent, NodeChange, NodeChangeKind, SyncBeginEvent, SyncEndEvent, TextureEvent,
    TextureEventKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn texture_kind(kind: TextureEventKind) -> &'static str {
    match kind {
        TextureEventKind::Requested => "requested",
        TextureEventKind::Applied => "applied",
        TextureEventKind::Discarded => "discarded",
        TextureEventKind::Failed => "failed",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_sync_begin(&mut self, e: &SyncBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[sync:begin] sync={} revision={} retained={}",
            e.sync_index, e.revision, e.retained,
        );
    }

    fn on_sync_end(&mut self, e: &SyncEndEvent) {
        let s = &e.stats;
        let _ = writeln!(
            self.writer,
            "[sync:end] sync={} created={} updated={} retranslated={} reparented={} \
             unchanged={} removed={} indicators={}",
            e.sync_index,
            s.created,
            s.updated,
            s.retranslated,
            s.reparented,
            s.unchanged,
            s.removed,
            s.indicators,
        );
    }

    fn on_issue(&mut self, issue: &SyncIssue) {
        let _ = writeln!(self.writer, "[issue] {issue}");
    }

    fn on_texture(&mut self, e: &TextureEvent) {
        let _ = writeln!(
            self.writer,
            "[texture] token={} {}",
            e.token.get(),
            texture_kind(e.kind),
        );
    }

    fn on_depth_scale(&mut self, e: &DepthScaleEvent) {
        let _ = writeln!(
            self.writer,
            "[depth] factor={} nodes={} lines={}",
            e.factor, e.nodes, e.lines,
        );
    }

    fn on_node_changes(&mut self, sync_index: u64, changes: &[NodeChange]) {
        let count = |kind: NodeChangeKind| changes.iter().filter(|c| c.kind == kind).count();
        let _ = writeln!(
            self.writer,
            "[nodes] sync={sync_index} created={} updated={} removed={}",
            count(NodeChangeKind::Created),
            count(NodeChangeKind::Updated),
            count(NodeChangeKind::Removed),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::reconcile::SyncStats;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_sync_end() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_sync_end(&SyncEndEvent {
            sync_index: 3,
            stats: SyncStats {
                created: 2,
                ..SyncStats::default()
            },
        });
        let output = output(sink);
        assert!(output.starts_with("[sync:end]"), "got: {output}");
        assert!(output.contains("sync=3"), "got: {output}");
        assert!(output.contains("created=2"), "got: {output}");
    }

    #[test]
    fn pretty_print_issue_uses_display() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_issue(&SyncIssue::DuplicateId { id: "a".into() });
        let output = output(sink);
        assert_eq!(output, "[issue] duplicate id \"a\", subtree skipped\n");
    }
}
