use super::types::{BlendMode, Shadow};
use crate::widgets::Color;

/// Fill configuration for a shape: base color, an 8-bit alpha override,
/// blend mode and an optional shadow layer.
///
/// The alpha scales both the fill and the shadow, so a paint whose base
/// color is transparent can still drive a visible shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    color: Color,
    alpha: u8,
    blend: BlendMode,
    shadow: Option<Shadow>,
}

impl Paint {
    /// A source-over fill of `color` at full alpha.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            alpha: 255,
            blend: BlendMode::SourceOver,
            shadow: None,
        }
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Copy of this paint using `blend` instead of the stored mode.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn set_shadow_layer(&mut self, blur: f32, dx: f32, dy: f32, color: Color) {
        self.shadow = Some(Shadow::new((dx, dy), blur, color));
    }

    pub fn base_color(&self) -> Color {
        self.color
    }

    /// Fill color with the alpha override applied.
    pub fn color(&self) -> Color {
        scale_alpha(self.color, self.alpha)
    }

    /// Shadow with the alpha override applied.
    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow.map(|shadow| Shadow {
            color: scale_alpha(shadow.color, self.alpha),
            ..shadow
        })
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::fill(Color::TRANSPARENT)
    }
}

fn scale_alpha(color: Color, alpha: u8) -> Color {
    Color {
        a: color.a * (alpha as f32 / 255.0),
        ..color
    }
}
