// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, event recording, and JSON scene dumps for strata
//! diagnostics.
//!
//! This crate provides [`TraceSink`](strata_core::trace::TraceSink)
//! implementations and inspection helpers for development and bug reports:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::EventLog`]: owned in-memory recording with JSON export.
//! - [`dump::scene_json`]: the reconciled scene as a nested JSON tree.

pub mod dump;
pub mod pretty;
pub mod recorder;
