// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth layering.
//!
//! The depth scale spreads views apart along z into an exploded view. It
//! only ever changes z: x/y offsets, selection, colours and textures are
//! left alone, and no sync is needed.

use super::SceneGraphState;
use crate::error::DepthScaleError;
use crate::trace::{DepthScaleEvent, Tracer};

impl SceneGraphState {
    /// Reapplies `factor` to the z offset of every retained view and to
    /// every indicator line.
    ///
    /// Runs in time proportional to the number of retained views and lines.
    ///
    /// # Errors
    ///
    /// Returns [`DepthScaleError`] if `factor` is not finite; the scene is
    /// left unchanged.
    pub fn set_depth_scale(
        &mut self,
        factor: f64,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), DepthScaleError> {
        if !factor.is_finite() {
            return Err(DepthScaleError(factor));
        }
        self.depth_scale = factor;

        let lift = self.config.line_lift;
        let mut nodes = 0;
        let mut lines = 0;
        for node in self.retained.values_mut() {
            let geometry = node.snapshot.geometry;
            if node.retranslate(&mut self.store, &geometry, factor) {
                nodes += 1;
            }
            if let Some(indicator) = &mut node.indicator {
                lines += indicator.relayer(&mut self.store, Some(&geometry), factor, lift);
            }
        }
        if let Some(indicator) = &mut self.root_indicator {
            lines += indicator.relayer(&mut self.store, None, factor, lift);
        }

        tracer.depth_scale(&DepthScaleEvent {
            factor,
            nodes,
            lines,
        });
        Ok(())
    }
}
