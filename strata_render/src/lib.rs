// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-plan definitions for strata scenes.
//!
//! This crate sits between [`strata_core`]'s evaluated scene store and
//! whatever actually draws. It defines:
//!
//! - [`RenderItem`]: a single draw command
//! - [`RenderPlan`]: the back-to-front draw commands of one frame
//! - [`PlanPresenter`]: a [`Presenter`](strata_core::backend::Presenter)
//!   that rebuilds the plan from each non-empty change set

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod plan;
mod presenter;

pub use plan::{RenderItem, RenderPlan};
pub use presenter::PlanPresenter;
