// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the scene store and whatever draws it.
//!
//! `strata_core` owns the view model, the reconciler and the retained scene
//! store. Drawing is someone else's job: a presenter receives the
//! [`SceneChanges`] of each evaluation and mirrors them into its own
//! representation (a GPU scene, a render plan, a test double).
//!
//! A host's update path wires the pieces together like this:
//!
//! ```rust,ignore
//! fn on_revision(tree: ViewNode) {
//!     // Reconcile: minimal create/update/destroy calls on the store
//!     let report = state.sync(&tree, &mut loader, &mut tracer)?;
//!
//!     // Evaluate: drain dirty channels, recompute world transforms
//!     let changes = state.evaluate();
//!
//!     // Present: apply incremental changes, free released textures
//!     presenter.apply(state.store(), &changes);
//! }
//! ```
//!
//! [`SceneChanges`]: crate::scene::SceneChanges

use crate::scene::{SceneChanges, SceneStore};

/// Applies evaluated scene changes to a presentation target.
pub trait Presenter {
    /// Applies the given [`SceneChanges`], reading current property values
    /// from `store` as needed.
    fn apply(&mut self, store: &SceneStore, changes: &SceneChanges);
}
