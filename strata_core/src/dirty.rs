// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The scene store uses multi-channel dirty tracking (via [`understory_dirty`])
//! so that [`SceneStore::evaluate`](crate::scene::SceneStore::evaluate) only
//! revisits what the reconciler actually touched.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`TRANSFORM`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) with dependency edges from
//!   child to parent. Moving a view's group marks every descendant, because
//!   world transforms and effective visibility are inherited. Position, scale
//!   and hidden-flag changes all go through this channel.
//!
//! - **Local-only**: [`APPEARANCE`] (colour), [`CONTENT`] (texture binding)
//!   and [`GEOMETRY`] (primitive rebuilds and line vertices) only ever mark
//!   the node that changed.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on create, destroy, attach and
//!   detach. It triggers a traversal-order rebuild during evaluation.
//!
//! An idle reconciler leaves every channel clean, which is what makes a
//! repeated `sync` of the same tree observable as an empty
//! [`SceneChanges`](crate::scene::SceneChanges).

use understory_dirty::Channel;

/// Position, scale or hidden flag changed; descendants need new world
/// transforms and effective visibility.
pub const TRANSFORM: Channel = Channel::new(0);

/// Colour changed.
pub const APPEARANCE: Channel = Channel::new(1);

/// Texture binding changed.
pub const CONTENT: Channel = Channel::new(2);

/// Primitive geometry was rebuilt.
pub const GEOMETRY: Channel = Channel::new(3);

/// Tree topology changed; triggers a traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(4);
