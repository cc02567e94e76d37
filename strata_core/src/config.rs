// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene appearance and geometry configuration.

use crate::constraint::BracketStyle;
use crate::geometry::Color;

/// Wireframe outline colours, picked with priority selected > focused > default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutlinePalette {
    /// Colour of an idle view.
    pub default: Color,
    /// Colour of a selected view.
    pub selected: Color,
    /// Colour of a focused, unselected view.
    pub focused: Color,
}

impl OutlinePalette {
    /// Returns the outline colour for the given state.
    #[must_use]
    pub const fn pick(&self, selected: bool, on_focus: bool) -> Color {
        if selected {
            self.selected
        } else if on_focus {
            self.focused
        } else {
            self.default
        }
    }
}

/// Configuration for a [`SceneGraphState`](crate::reconcile::SceneGraphState).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Outline colours.
    pub outline: OutlinePalette,
    /// Selection overlay colour.
    pub overlay_color: Color,
    /// Selection overlay opacity (0.0–1.0).
    pub overlay_opacity: f32,
    /// Constraint indicator line colour.
    pub indicator_color: Color,
    /// Indicator bracket dimensions.
    pub bracket: BracketStyle,
    /// Distance indicator lines are raised above their view plane, in scene
    /// units.
    pub line_lift: f64,
    /// Depth scale applied to layout `z` until
    /// [`set_depth_scale`](crate::reconcile::SceneGraphState::set_depth_scale)
    /// changes it.
    pub depth_scale: f64,
}

impl SceneConfig {
    /// The editor's standard look.
    #[must_use]
    pub const fn editor() -> Self {
        Self {
            outline: OutlinePalette {
                default: Color(0x66_66_66),
                selected: Color(0x25_66_c6),
                focused: Color(0xcc_cc_cc),
            },
            overlay_color: Color(0x00_bf_ff),
            overlay_opacity: 0.35,
            indicator_color: Color(0xc8_96_37),
            bracket: BracketStyle::STANDARD,
            line_lift: 1.0,
            depth_scale: 1.0,
        }
    }

    /// Returns a copy with a different initial depth scale.
    #[must_use]
    pub const fn with_depth_scale(mut self, depth_scale: f64) -> Self {
        self.depth_scale = depth_scale;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::editor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_priority() {
        let palette = SceneConfig::editor().outline;
        assert_eq!(palette.pick(true, true), palette.selected);
        assert_eq!(palette.pick(false, true), palette.focused);
        assert_eq!(palette.pick(false, false), palette.default);
    }

    #[test]
    fn depth_scale_override_keeps_the_rest() {
        let config = SceneConfig::editor().with_depth_scale(40.0);
        assert_eq!(config.depth_scale, 40.0);
        assert_eq!(config.bracket, BracketStyle::STANDARD);
        assert_eq!(config.outline, SceneConfig::default().outline);
    }
}
