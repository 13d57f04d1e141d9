//! Paint context: the display list widgets record into.

use super::commands::DrawCommand;
use super::paint::Paint;
use super::types::LayerType;
use crate::widgets::Rect;

/// Recording canvas handed to [`Widget::paint`](crate::widgets::Widget::paint).
///
/// Widgets draw in window coordinates. Offscreen layers are opened with
/// [`save_layer`](Self::save_layer), which returns the save count to hand
/// back to [`restore_to_count`](Self::restore_to_count).
///
/// # Example
///
/// ```
/// use ripple_toggle::renderer::{BlendMode, Paint, PaintContext};
/// use ripple_toggle::widgets::{Color, Rect};
///
/// let mut ctx = PaintContext::new();
/// let bounds = Rect::new(0.0, 0.0, 100.0, 40.0);
/// let layer = ctx.save_layer(bounds);
/// ctx.draw_rounded_rect(bounds, 8.0, &Paint::fill(Color::WHITE));
/// let ripple = Paint::fill(Color::BLACK).with_blend(BlendMode::SourceAtop);
/// ctx.draw_circle((20.0, 20.0), 30.0, &ripple);
/// ctx.restore_to_count(layer);
/// assert_eq!(ctx.save_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
    save_count: usize,
    layer_type: LayerType,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Create a new PaintContext with pre-allocated capacity to avoid per-frame allocations
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
            save_count: 1,
            layer_type: LayerType::None,
        }
    }

    /// Clear the recording for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
        self.save_count = 1;
        self.layer_type = LayerType::None;
    }

    pub fn set_layer_type(&mut self, layer_type: LayerType) {
        if self.layer_type != layer_type {
            self.layer_type = layer_type;
            self.commands.push(DrawCommand::SetLayerType(layer_type));
        }
    }

    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            color: paint.color(),
            radius,
            shadow: paint.shadow(),
            blend: paint.blend(),
        });
    }

    pub fn draw_circle(&mut self, center: (f32, f32), radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: paint.color(),
            blend: paint.blend(),
        });
    }

    /// Open an offscreen layer. Returns the save count to restore to.
    pub fn save_layer(&mut self, bounds: Rect) -> usize {
        let count = self.save_count;
        self.save_count += 1;
        self.commands.push(DrawCommand::SaveLayer { bounds });
        count
    }

    /// Close the innermost layer, if any.
    pub fn restore(&mut self) {
        if self.save_count > 1 {
            self.save_count -= 1;
            self.commands.push(DrawCommand::Restore);
        }
    }

    /// Close layers until the save count drops to `count`.
    pub fn restore_to_count(&mut self, count: usize) {
        while self.save_count > count.max(1) {
            self.restore();
        }
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}
