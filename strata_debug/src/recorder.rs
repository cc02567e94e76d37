// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`EventLog`] implements [`TraceSink`] and keeps every event as an owned
//! [`RecordedEvent`]. [`EventLog::to_json`] renders the recording as a JSON
//! array for post-mortem inspection.
//!
//! Per-node change records ([`on_node_changes`](TraceSink::on_node_changes))
//! are stored as counts only.

use serde_json::{Value, json};

use strata_core::reconcile::{SyncIssue, SyncStats};
use strata_core::trace::{
    DepthScaleEvent, NodeChange, SyncBeginEvent, SyncEndEvent, TextureEvent, TraceSink,
};

/// An event captured by [`EventLog`].
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`SyncBeginEvent`].
    SyncBegin(SyncBeginEvent),
    /// A [`SyncEndEvent`].
    SyncEnd(SyncEndEvent),
    /// A non-fatal problem.
    Issue(SyncIssue),
    /// A [`TextureEvent`].
    Texture(TextureEvent),
    /// A [`DepthScaleEvent`].
    DepthScale(DepthScaleEvent),
    /// Per-node change count for a sync.
    NodeChangesCount {
        /// Sync counter.
        sync_index: u64,
        /// Number of node changes.
        count: usize,
    },
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<RecordedEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Issues recorded so far.
    pub fn issues(&self) -> impl Iterator<Item = &SyncIssue> + '_ {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::Issue(issue) => Some(issue),
            _ => None,
        })
    }

    /// Drops every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Renders the recording as a JSON array, one object per event.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.events.iter().map(event_json).collect())
    }
}

fn stats_json(s: &SyncStats) -> Value {
    json!({
        "created": s.created,
        "updated": s.updated,
        "retranslated": s.retranslated,
        "reparented": s.reparented,
        "unchanged": s.unchanged,
        "removed": s.removed,
        "indicators": s.indicators,
    })
}

fn event_json(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::SyncBegin(e) => json!({
            "event": "SyncBegin",
            "sync_index": e.sync_index,
            "revision": e.revision,
            "retained": e.retained,
        }),
        RecordedEvent::SyncEnd(e) => json!({
            "event": "SyncEnd",
            "sync_index": e.sync_index,
            "stats": stats_json(&e.stats),
        }),
        RecordedEvent::Issue(issue) => json!({
            "event": "Issue",
            "message": issue.to_string(),
        }),
        RecordedEvent::Texture(e) => json!({
            "event": "Texture",
            "token": e.token.get(),
            "kind": format!("{:?}", e.kind),
        }),
        RecordedEvent::DepthScale(e) => json!({
            "event": "DepthScale",
            "factor": e.factor,
            "nodes": e.nodes,
            "lines": e.lines,
        }),
        RecordedEvent::NodeChangesCount { sync_index, count } => json!({
            "event": "NodeChanges",
            "sync_index": sync_index,
            "count": count,
        }),
    }
}

impl TraceSink for EventLog {
    fn on_sync_begin(&mut self, e: &SyncBeginEvent) {
        self.events.push(RecordedEvent::SyncBegin(*e));
    }

    fn on_sync_end(&mut self, e: &SyncEndEvent) {
        self.events.push(RecordedEvent::SyncEnd(*e));
    }

    fn on_issue(&mut self, issue: &SyncIssue) {
        self.events.push(RecordedEvent::Issue(issue.clone()));
    }

    fn on_texture(&mut self, e: &TextureEvent) {
        self.events.push(RecordedEvent::Texture(*e));
    }

    fn on_depth_scale(&mut self, e: &DepthScaleEvent) {
        self.events.push(RecordedEvent::DepthScale(*e));
    }

    fn on_node_changes(&mut self, sync_index: u64, changes: &[NodeChange]) {
        self.events.push(RecordedEvent::NodeChangesCount {
            sync_index,
            count: changes.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::reconcile::{SceneGraphState, TextureRequest};
    use strata_core::error::TextureError;
    use strata_core::trace::Tracer;
    use strata_core::view::ViewNode;

    fn tree() -> ViewNode {
        ViewNode::group(vec![
            ViewNode::view("a", 0.0, 0.0, 0.0, 10.0, 10.0).with_image("img://a", 1),
            ViewNode::view("a", 1.0, 1.0, 1.0, 10.0, 10.0),
        ])
    }

    #[test]
    fn records_a_full_sync() {
        let mut log = EventLog::new();
        let mut state = SceneGraphState::default();
        let mut loader = |_: &TextureRequest<'_>| -> Result<(), TextureError> { Ok(()) };
        state
            .sync(&tree(), &mut loader, &mut Tracer::new(&mut log))
            .unwrap();

        let kinds: Vec<&str> = log
            .events()
            .iter()
            .map(|e| match e {
                RecordedEvent::SyncBegin(_) => "begin",
                RecordedEvent::SyncEnd(_) => "end",
                RecordedEvent::Issue(_) => "issue",
                RecordedEvent::Texture(_) => "texture",
                RecordedEvent::DepthScale(_) => "depth",
                RecordedEvent::NodeChangesCount { .. } => "nodes",
            })
            .collect();
        assert_eq!(kinds, ["begin", "texture", "issue", "nodes", "end"]);
        assert_eq!(log.issues().count(), 1);
    }

    #[test]
    fn json_export_is_an_array_of_tagged_objects() {
        let mut log = EventLog::new();
        let mut state = SceneGraphState::default();
        state
            .set_depth_scale(2.5, &mut Tracer::new(&mut log))
            .unwrap();

        let json = log.to_json();
        let events = json.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "DepthScale");
        assert_eq!(events[0]["factor"], 2.5);
        assert_eq!(events[0]["nodes"], 0);
    }
}
