// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene graph.
//!
//! A *scene node* is one drawable (or grouping) element of the 3D scene.
//! Each node has:
//!
//! - An identity ([`SceneId`]): a generational handle that becomes stale when
//!   the node is destroyed, so no caller can reach a released resource.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//! - **Local properties** set by the reconciler:
//!   [`position`](SceneStore::set_position), [`scale`](SceneStore::set_scale),
//!   [`primitive`](SceneStore::set_primitive), [`color`](SceneStore::set_color),
//!   [`texture`](SceneStore::set_texture) and [`flags`](SceneStore::set_flags).
//! - **Computed properties** produced by [`evaluate`](SceneStore::evaluate):
//!   `world_transform` and `effective_hidden`.
//!
//! # Dirty tracking
//!
//! Mutations mark the matching [`dirty`](crate::dirty) channel. TRANSFORM
//! propagates to descendants; APPEARANCE, CONTENT and GEOMETRY are
//! local-only; TOPOLOGY rebuilds the traversal order.

mod evaluate;
mod id;
mod primitive;
mod store;
mod traverse;

pub use evaluate::SceneChanges;
pub use id::{INVALID, SceneId, TextureId};
pub use primitive::Primitive;
pub use store::{NodeFlags, SceneStore};
pub use traverse::Children;
