//! Draw command definitions for the display list.

use super::types::{BlendMode, LayerType, Shadow};
use crate::widgets::{Color, Rect};

/// A single draw operation in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Select the compositing backing for the rest of the pass.
    SetLayerType(LayerType),

    /// Draw a rounded rectangle with an optional shadow beneath it.
    RoundedRect {
        /// Rectangle bounds
        rect: Rect,
        /// Fill color
        color: Color,
        /// Corner radius in logical pixels
        radius: f32,
        /// Optional shadow
        shadow: Option<Shadow>,
        /// How the fill combines with the target layer
        blend: BlendMode,
    },

    /// Draw a filled circle.
    Circle {
        /// Center point
        center: (f32, f32),
        /// Radius in logical pixels
        radius: f32,
        /// Fill color
        color: Color,
        /// How the fill combines with the target layer
        blend: BlendMode,
    },

    /// Open an offscreen layer covering `bounds`. Commands up to the matching
    /// [`DrawCommand::Restore`] render into it.
    SaveLayer {
        /// Region the layer covers
        bounds: Rect,
    },

    /// Close the innermost offscreen layer, compositing it onto its parent.
    Restore,
}
