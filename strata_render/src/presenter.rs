// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Presenter`] that keeps a [`RenderPlan`] in step with the store.

use alloc::vec::Vec;

use strata_core::backend::Presenter;
use strata_core::scene::{SceneChanges, SceneStore, TextureId};

use crate::plan::RenderPlan;

/// Rebuilds its [`RenderPlan`] whenever an evaluation reports changes and
/// collects textures the host may free.
#[derive(Clone, Debug, Default)]
pub struct PlanPresenter {
    plan: RenderPlan,
    released: Vec<TextureId>,
    rebuilds: u64,
}

impl PlanPresenter {
    /// Creates a presenter with an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The plan as of the last non-empty change set.
    #[must_use]
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    /// Number of times the plan was rebuilt.
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Takes the textures released since the last call.
    pub fn take_released(&mut self) -> Vec<TextureId> {
        core::mem::take(&mut self.released)
    }
}

impl Presenter for PlanPresenter {
    fn apply(&mut self, store: &SceneStore, changes: &SceneChanges) {
        self.released.extend_from_slice(&changes.released_textures);
        if changes.is_empty() {
            return;
        }
        self.plan.rebuild(store);
        self.rebuilds += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use strata_core::geometry::Color;
    use strata_core::scene::Primitive;

    #[test]
    fn empty_changes_keep_the_plan() {
        let mut store = SceneStore::new();
        let quad = store.create_node(Primitive::TexturedQuad {
            size: Size::new(4.0, 4.0),
        });
        let mut presenter = PlanPresenter::new();

        let changes = store.evaluate();
        presenter.apply(&store, &changes);
        assert_eq!(presenter.rebuilds(), 1);
        assert_eq!(presenter.plan().len(), 1);

        let changes = store.evaluate();
        assert!(changes.is_empty());
        presenter.apply(&store, &changes);
        assert_eq!(presenter.rebuilds(), 1);

        store.set_color(quad, Color(0x00ff_0000));
        let changes = store.evaluate();
        presenter.apply(&store, &changes);
        assert_eq!(presenter.rebuilds(), 2);
        assert_eq!(presenter.plan().items[0].color, Color(0x00ff_0000));
    }

    #[test]
    fn released_textures_accumulate_until_taken() {
        let mut store = SceneStore::new();
        let quad = store.create_node(Primitive::TexturedQuad {
            size: Size::new(4.0, 4.0),
        });
        store.set_texture(quad, Some(TextureId(1)));
        let mut presenter = PlanPresenter::new();
        let changes = store.evaluate();
        presenter.apply(&store, &changes);
        assert_eq!(presenter.plan().items[0].texture, Some(TextureId(1)));

        store.set_texture(quad, Some(TextureId(2)));
        let changes = store.evaluate();
        presenter.apply(&store, &changes);
        store.destroy_node(quad);
        let changes = store.evaluate();
        presenter.apply(&store, &changes);

        assert_eq!(presenter.take_released(), [TextureId(1), TextureId(2)]);
        assert!(presenter.take_released().is_empty());
        assert!(presenter.plan().is_empty());
    }
}
