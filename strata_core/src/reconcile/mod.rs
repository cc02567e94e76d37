// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental reconciliation of view trees into the retained scene.
//!
//! [`SceneGraphState`] is the only stateful component. It owns the
//! [`SceneStore`], a map from view id to the scene nodes built for that view,
//! and the bookkeeping for in-flight texture loads.
//!
//! Each id moves through `Absent -> Live -> Absent`:
//!
//! - first sight creates a group (mesh, outline, optional overlay) under the
//!   group of the nearest retained ancestor, or the scene root;
//! - later revisions compare against the stored snapshot and touch only what
//!   differs, so a repeated sync of the same tree makes no store calls;
//! - ids missing from a tree are destroyed together with everything they own.
//!
//! Selected constraint nodes are collected during the walk and turned into
//! indicator groups once every view's geometry is known.

mod depth;
mod indicator;
mod report;
mod retained;
mod texture;


use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::config::SceneConfig;
use crate::constraint::ConstraintIndicator;
use crate::error::SyncError;
use crate::scene::{NodeFlags, Primitive, SceneChanges, SceneId, SceneStore};
#[cfg(feature = "trace-rich")]
use crate::trace::{NodeChange, NodeChangeKind};
use crate::trace::{SyncBeginEvent, SyncEndEvent, Tracer};
use crate::view::{NodeGeometry, ViewNode};

use indicator::{IndicatorGroup, SelectedConstraint};
use retained::{BuildContext, RetainedNode};

pub use report::{SyncIssue, SyncReport, SyncStats};
pub use retained::ViewParts;
pub use texture::{LoadOutcome, TextureLoader, TextureRequest, TextureToken};

/// The nearest retained ancestor of a node being visited.
#[derive(Clone, Copy, Debug)]
struct ParentRef<'t> {
    id: &'t str,
    geometry: NodeGeometry,
    group: SceneId,
}

/// One pending node of the walk.
#[derive(Debug)]
struct Frame<'t> {
    node: &'t ViewNode,
    parent: Option<ParentRef<'t>>,
}

/// The persistent scene built from successive view trees.
#[derive(Debug)]
pub struct SceneGraphState {
    store: SceneStore,
    /// Parent of all top-level view groups and of root-owned indicators.
    root: SceneId,
    config: SceneConfig,
    depth_scale: f64,
    textures_visible: bool,
    retained: HashMap<String, RetainedNode>,
    /// Scene handle to owning view id, for hit-testing.
    owners: HashMap<SceneId, String>,
    /// Indicators of selected constraints with no retained ancestor.
    root_indicator: Option<IndicatorGroup>,
    /// Texture requests in flight, by token.
    loads: HashMap<TextureToken, String>,
    next_token: u64,
    sync_count: u64,
    #[cfg(feature = "trace-rich")]
    node_changes: Vec<NodeChange>,
}

impl Default for SceneGraphState {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SceneGraphState {
    /// Creates an empty scene.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        let mut store = SceneStore::new();
        let root = store.create_node(Primitive::Group);
        Self {
            store,
            root,
            config,
            depth_scale: config.depth_scale,
            textures_visible: true,
            retained: HashMap::new(),
            owners: HashMap::new(),
            root_indicator: None,
            loads: HashMap::new(),
            next_token: 0,
            sync_count: 0,
            #[cfg(feature = "trace-rich")]
            node_changes: Vec::new(),
        }
    }

    /// Reconciles the scene against a freshly fetched tree.
    ///
    /// The walk is depth-first with an explicit stack, so tree depth is not
    /// bounded by the call stack. Problems with single nodes or constraints
    /// are collected in the returned report and sent to `tracer`; they never
    /// stop the walk.
    ///
    /// # Errors
    ///
    /// [`SyncError::ContextLost`] if the texture loader reports a lost
    /// graphics context. Every view handled before that point is complete
    /// and retained; views not yet reached keep their previous state, and
    /// nothing is removed.
    pub fn sync(
        &mut self,
        tree: &ViewNode,
        loader: &mut dyn TextureLoader,
        tracer: &mut Tracer<'_>,
    ) -> Result<SyncReport, SyncError> {
        let sync_index = self.sync_count;
        self.sync_count += 1;
        tracer.sync_begin(&SyncBeginEvent {
            sync_index,
            revision: tree.revision,
            retained: self.retained.len(),
        });

        let mut report = SyncReport::default();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut geometry: HashMap<&str, NodeGeometry> = HashMap::new();
        let mut selected: Vec<SelectedConstraint<'_>> = Vec::new();

        let mut stack = vec![Frame {
            node: tree,
            parent: None,
        }];
        while let Some(Frame { node, parent }) = stack.pop() {
            let inherited = match node.key() {
                Some(key) if node.is_retained() => {
                    if !seen.insert(key) {
                        let issue = SyncIssue::DuplicateId {
                            id: key.to_string(),
                        };
                        tracer.issue(&issue);
                        report.issues.push(issue);
                        continue;
                    }
                    geometry.insert(key, node.geometry());
                    let group = self.visit(key, node, parent, loader, tracer, &mut report)?;
                    Some(ParentRef {
                        id: key,
                        geometry: node.geometry(),
                        group,
                    })
                }
                _ => {
                    if node.selected
                        && let Some(spec) = node.constraint_spec()
                    {
                        selected.push(SelectedConstraint {
                            id: node.id.as_deref().unwrap_or_default(),
                            spec,
                            owner: parent.map(|p| p.id),
                        });
                    }
                    parent
                }
            };
            stack.extend(node.children.iter().rev().map(|child| Frame {
                node: child,
                parent: inherited,
            }));
        }

        self.remove_unseen(&seen, &mut report);
        self.reconcile_indicators(&selected, &geometry, &mut report, tracer);

        #[cfg(feature = "trace-rich")]
        {
            tracer.node_changes(sync_index, &self.node_changes);
            self.node_changes.clear();
        }
        tracer.sync_end(&SyncEndEvent {
            sync_index,
            stats: report.stats,
        });
        Ok(report)
    }

    /// Creates or updates the retained node for `key`, returning its group.
    fn visit(
        &mut self,
        key: &str,
        node: &ViewNode,
        parent: Option<ParentRef<'_>>,
        loader: &mut dyn TextureLoader,
        tracer: &mut Tracer<'_>,
        report: &mut SyncReport,
    ) -> Result<SceneId, SyncError> {
        let anchor = parent.map(|p| p.geometry);
        let parent_group = parent.map_or(self.root, |p| p.group);
        let ctx = BuildContext {
            config: &self.config,
            depth_scale: self.depth_scale,
            textures_visible: self.textures_visible,
        };

        let (group, wants_texture) = match self.retained.get_mut(key) {
            None => {
                let retained = RetainedNode::create(&mut self.store, node, parent_group, anchor, ctx);
                for handle in retained.owned_handles() {
                    self.owners.insert(handle, key.to_string());
                }
                let group = retained.group;
                self.retained.insert(key.to_string(), retained);
                report.stats.created += 1;
                #[cfg(feature = "trace-rich")]
                self.node_changes.push(NodeChange {
                    group,
                    kind: NodeChangeKind::Created,
                });
                (group, !node.img_url.is_empty())
            }
            Some(retained) => {
                let group = retained.group;
                let retry = retained.content_pending;
                if self.store.parent(group) != Some(parent_group) {
                    self.store.reparent(group, parent_group);
                    report.stats.reparented += 1;
                    #[cfg(feature = "trace-rich")]
                    self.node_changes.push(NodeChange {
                        group,
                        kind: NodeChangeKind::Reparented,
                    });
                }
                if retained.snapshot.differs_from(node) {
                    let outcome = retained.update(&mut self.store, node, anchor, ctx);
                    if let Some(overlay) = outcome.overlay_added {
                        self.owners.insert(overlay, key.to_string());
                    }
                    if let Some(overlay) = outcome.overlay_removed {
                        self.owners.remove(&overlay);
                    }
                    report.stats.updated += 1;
                    #[cfg(feature = "trace-rich")]
                    self.node_changes.push(NodeChange {
                        group,
                        kind: NodeChangeKind::Updated,
                    });
                    (group, outcome.content_changed || retry)
                } else if retained.anchor != anchor {
                    retained.anchor = anchor;
                    if retained.retranslate(&mut self.store, &node.geometry(), self.depth_scale) {
                        report.stats.retranslated += 1;
                        #[cfg(feature = "trace-rich")]
                        self.node_changes.push(NodeChange {
                            group,
                            kind: NodeChangeKind::Retranslated,
                        });
                    } else {
                        report.stats.unchanged += 1;
                    }
                    (group, retry)
                } else {
                    report.stats.unchanged += 1;
                    (group, retry)
                }
            }
        };

        if wants_texture
            && let Some(issue) =
                self.request_texture(key, &node.img_url, node.revision, loader, tracer)?
        {
            tracer.issue(&issue);
            report.issues.push(issue);
        }
        Ok(group)
    }

    /// Destroys every retained view whose id was not seen by the walk.
    fn remove_unseen(&mut self, seen: &HashSet<&str>, report: &mut SyncReport) {
        let stale: Vec<String> = self
            .retained
            .keys()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            let Some(node) = self.retained.remove(&id) else {
                continue;
            };
            if let Some(token) = node.texture_token {
                self.loads.remove(&token);
            }
            // A stale child may already be gone with its stale parent.
            if self.store.is_alive(node.group) {
                #[cfg(feature = "trace-rich")]
                self.node_changes.push(NodeChange {
                    group: node.group,
                    kind: NodeChangeKind::Removed,
                });
                for handle in self.store.destroy_subtree(node.group) {
                    self.owners.remove(&handle);
                }
            }
            report.stats.removed += 1;
        }
    }

    /// Shows or hides every textured mesh. Outlines and overlays stay.
    ///
    /// Meshes created later follow the current setting.
    pub fn set_textures_visible(&mut self, visible: bool) {
        if self.textures_visible == visible {
            return;
        }
        self.textures_visible = visible;
        for node in self.retained.values() {
            self.store
                .set_flags(node.mesh, NodeFlags { hidden: !visible });
        }
    }

    /// Recomputes derived scene state and returns what changed since the
    /// last call.
    pub fn evaluate(&mut self) -> SceneChanges {
        self.store.evaluate()
    }

    /// The id of the view owning a scene node, for hit-testing.
    ///
    /// Covers view groups, meshes, outlines and overlays. Returns `None` for
    /// indicator lines, the scene root and stale handles.
    #[must_use]
    pub fn node_id(&self, id: SceneId) -> Option<&str> {
        self.owners.get(&id).map(String::as_str)
    }

    /// The scene handles of a retained view.
    #[must_use]
    pub fn parts(&self, id: &str) -> Option<ViewParts> {
        self.retained.get(id).map(RetainedNode::parts)
    }

    /// Ids of all retained views, in no particular order.
    pub fn retained_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.retained.keys().map(String::as_str)
    }

    /// Number of retained views.
    #[must_use]
    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    /// Group of the indicators whose constraints have no retained ancestor.
    #[must_use]
    pub fn root_indicator(&self) -> Option<SceneId> {
        self.root_indicator.as_ref().map(|i| i.group)
    }

    /// Constraint indicators currently drawn for `owner`, `None` meaning the
    /// scene root.
    ///
    /// Empty when the owner hosts no indicator group.
    #[must_use]
    pub fn indicators(&self, owner: Option<&str>) -> &[ConstraintIndicator] {
        let group = match owner {
            Some(id) => self.retained.get(id).and_then(|n| n.indicator.as_ref()),
            None => self.root_indicator.as_ref(),
        };
        group.map_or(&[], |g| g.indicators.as_slice())
    }

    /// The underlying scene store.
    #[must_use]
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Parent of every top-level view group.
    #[must_use]
    pub fn root(&self) -> SceneId {
        self.root
    }

    /// The configuration this scene was created with.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current depth scale.
    #[must_use]
    pub fn depth_scale(&self) -> f64 {
        self.depth_scale
    }

    /// Whether textured meshes are shown.
    #[must_use]
    pub fn textures_visible(&self) -> bool {
        self.textures_visible
    }
}
