// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint indicator groups.
//!
//! Every view hosts at most one indicator group holding the lines of all
//! selected constraints it owns. Groups are never edited line by line: when
//! the desired lines differ in any way, the old group is destroyed and a new
//! one built.

use alloc::string::ToString;
use alloc::vec::Vec;

use hashbrown::HashMap;

use super::{SceneGraphState, SyncIssue, SyncReport};
use crate::constraint::{ConstraintIndicator, LineSegment, indicator_lines};
use crate::geometry::Color;
use crate::scene::{Primitive, SceneId, SceneStore};
use crate::trace::Tracer;
use crate::translate::to_scene_point;
use crate::view::{ConstraintSpec, NodeGeometry};

/// A selected constraint found during the walk.
#[derive(Clone, Copy, Debug)]
pub(super) struct SelectedConstraint<'t> {
    pub id: &'t str,
    pub spec: &'t ConstraintSpec,
    /// Nearest retained ancestor, `None` for the scene root.
    pub owner: Option<&'t str>,
}

/// The scene nodes of one owner's indicator lines.
#[derive(Debug)]
pub(super) struct IndicatorGroup {
    pub group: SceneId,
    pub lines: Vec<SceneId>,
    /// Constraints drawn, in tree order, with their layout-space segments.
    pub indicators: Vec<ConstraintIndicator>,
    /// Segments in the owner group's local space, as stored in `lines`.
    pub local: Vec<LineSegment>,
}

impl IndicatorGroup {
    fn build(
        store: &mut SceneStore,
        parent: SceneId,
        indicators: Vec<ConstraintIndicator>,
        local: Vec<LineSegment>,
        color: Color,
    ) -> Self {
        let group = store.create_node(Primitive::Group);
        store.add_child(parent, group);
        let lines = local
            .iter()
            .map(|segment| {
                let line = store.create_node(Primitive::Line {
                    from: segment.p1,
                    to: segment.p2,
                });
                store.add_child(group, line);
                store.set_color(line, color);
                line
            })
            .collect();
        Self {
            group,
            lines,
            indicators,
            local,
        }
    }

    /// Recomputes line vertices for a new depth scale.
    ///
    /// Returns the number of lines whose vertices moved.
    pub fn relayer(
        &mut self,
        store: &mut SceneStore,
        owner: Option<&NodeGeometry>,
        depth_scale: f64,
        lift: f64,
    ) -> usize {
        let local = to_local(&self.indicators, owner, depth_scale, lift);
        let mut moved = 0;
        for ((&line, new), old) in self.lines.iter().zip(&local).zip(&self.local) {
            if new != old {
                store.set_primitive(
                    line,
                    Primitive::Line {
                        from: new.p1,
                        to: new.p2,
                    },
                );
                moved += 1;
            }
        }
        self.local = local;
        moved
    }

    /// Destroys the group and all its lines.
    pub fn destroy(self, store: &mut SceneStore) {
        if store.is_alive(self.group) {
            store.destroy_subtree(self.group);
        }
    }
}

/// Maps the layout-space segments of `indicators` into the owner group's
/// local space.
fn to_local(
    indicators: &[ConstraintIndicator],
    owner: Option<&NodeGeometry>,
    depth_scale: f64,
    lift: f64,
) -> Vec<LineSegment> {
    indicators
        .iter()
        .flat_map(|i| i.lines.iter())
        .map(|s| {
            LineSegment::new(
                to_scene_point(s.p1, owner, depth_scale, lift),
                to_scene_point(s.p2, owner, depth_scale, lift),
            )
        })
        .collect()
}

impl SceneGraphState {
    /// Replaces indicator groups to match the selected constraints of the
    /// current tree.
    ///
    /// `geometry` holds every retained view of the tree, so constraints may
    /// reference any view, not just siblings.
    pub(super) fn reconcile_indicators(
        &mut self,
        selected: &[SelectedConstraint<'_>],
        geometry: &HashMap<&str, NodeGeometry>,
        report: &mut SyncReport,
        tracer: &mut Tracer<'_>,
    ) {
        let mut desired: Vec<(Option<&str>, Vec<ConstraintIndicator>)> = Vec::new();
        let mut by_owner: HashMap<Option<&str>, usize> = HashMap::new();
        for constraint in selected {
            match indicator_lines(constraint.spec, geometry, &self.config.bracket) {
                Ok(lines) => {
                    let slot = *by_owner.entry(constraint.owner).or_insert_with(|| {
                        desired.push((constraint.owner, Vec::new()));
                        desired.len() - 1
                    });
                    desired[slot].1.push(ConstraintIndicator {
                        constraint_id: constraint.id.to_string(),
                        owner_id: constraint.owner.map(ToString::to_string),
                        lines,
                    });
                }
                Err(error) => {
                    let issue = SyncIssue::Indicator {
                        constraint_id: constraint.id.to_string(),
                        error,
                    };
                    tracer.issue(&issue);
                    report.issues.push(issue);
                }
            }
        }

        // Owners that no longer host anything.
        for (id, node) in &mut self.retained {
            if !by_owner.contains_key(&Some(id.as_str()))
                && let Some(old) = node.indicator.take()
            {
                old.destroy(&mut self.store);
            }
        }
        if !by_owner.contains_key(&None)
            && let Some(old) = self.root_indicator.take()
        {
            old.destroy(&mut self.store);
        }

        let config = self.config;
        for (owner, indicators) in desired {
            let (slot, parent, owner_geometry) = match owner {
                Some(id) => match self.retained.get_mut(id) {
                    Some(node) => (&mut node.indicator, node.group, Some(node.snapshot.geometry)),
                    None => continue,
                },
                None => (&mut self.root_indicator, self.root, None),
            };
            let local = to_local(
                &indicators,
                owner_geometry.as_ref(),
                self.depth_scale,
                config.line_lift,
            );
            if let Some(group) = slot.as_mut()
                && group.local == local
            {
                // Same lines, possibly from different constraints.
                group.indicators = indicators;
                continue;
            }
            if let Some(old) = slot.take() {
                old.destroy(&mut self.store);
            }
            *slot = Some(IndicatorGroup::build(
                &mut self.store,
                parent,
                indicators,
                local,
                config.indicator_color,
            ));
            report.stats.indicators += 1;
        }
    }
}
