//! Shared types for the renderer.

use crate::widgets::Color;

/// Shadow configuration for shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow offset in logical pixels (x, y)
    pub offset: (f32, f32),
    /// Blur radius in logical pixels
    pub blur: f32,
    /// Shadow color
    pub color: Color,
}

impl Shadow {
    /// Create a shadow with the given parameters
    pub fn new(offset: (f32, f32), blur: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            color,
        }
    }

    /// Whether drawing this shadow would produce any pixels
    pub fn is_visible(&self) -> bool {
        self.blur > 0.0 && self.color.a > 0.0
    }
}

/// How a shape's pixels combine with what is already in the target layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha compositing
    #[default]
    SourceOver,
    /// Draw only where the destination is already opaque, keeping the
    /// destination's alpha
    SourceAtop,
}

/// Compositing backing requested by a widget for its paint pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerType {
    /// Draw straight into the parent target
    #[default]
    None,
    /// Composite through an offscreen, GPU-backed layer
    Hardware,
}
