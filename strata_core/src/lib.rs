// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene reconciliation for 3D view-hierarchy inspection.
//!
//! `strata_core` mirrors a remote device's view hierarchy into a persistent
//! 3D scene. Each fetched revision arrives as an immutable [`ViewNode`] tree;
//! the reconciler diffs it against what it built last time and issues the
//! smallest set of create, update and destroy operations on a retained
//! scene store. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   ViewNode tree (one revision)
//!       │
//!       ▼
//!   SceneGraphState::sync() ──► SyncReport
//!       │        │
//!       │        └──► TextureLoader::request() ··· texture_loaded()
//!       ▼
//!   SceneStore::evaluate() ──► SceneChanges ──► Presenter::apply()
//! ```
//!
//! **[`view`]**: the input tree, its per-node snapshot and layout geometry.
//!
//! **[`attribute`]**: the closed set of layout attribute codes.
//!
//! **[`translate`]**: pure layout-to-scene conversions and anchor resolution.
//!
//! **[`constraint`]**: bracketed indicator line geometry for constraints.
//!
//! **[`reconcile`]**: [`SceneGraphState`](reconcile::SceneGraphState), the
//! only stateful component: sync, texture completion and depth layering.
//!
//! **[`scene`]**: struct-of-arrays scene store with generational handles.
//! Node properties are set by the reconciler; world transforms and effective
//! visibility are computed by evaluation.
//!
//! **[`dirty`]**: multi-channel dirty tracking via `understory_dirty`.
//!
//! **[`backend`]**: the [`Presenter`](backend::Presenter) trait drawing code
//! implements.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) and the event types the
//! reconciler reports through a zero-overhead [`Tracer`](trace::Tracer).
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node
//!   change records.
//!
//! [`ViewNode`]: view::ViewNode

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod attribute;
pub mod backend;
pub mod config;
pub mod constraint;
pub mod dirty;
pub mod error;
pub mod geometry;
pub mod reconcile;
pub mod scene;
pub mod trace;
pub mod transform;
pub mod translate;
pub mod view;
