//! CPU rasterizer for recorded display lists, built on tiny-skia.
//!
//! Offscreen layers are full-size pixmaps; on restore they are composited
//! onto their parent through a mask limited to the layer bounds.

use resvg::tiny_skia::{
    self, FillRule, Mask, Path, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use super::commands::DrawCommand;
use super::context::PaintContext;
use super::types::{BlendMode, Shadow};
use crate::error::{Error, Result};
use crate::widgets::{Color, Rect};

/// Circle-approximation constant for cubic bezier corners
const KAPPA: f32 = 0.552_284_8;

/// Number of stacked passes used to approximate a blurred shadow
const SHADOW_STEPS: usize = 8;

/// Rasterize `ctx` into a new `width` x `height` pixmap cleared to `background`.
pub fn rasterize(ctx: &PaintContext, width: u32, height: u32, background: Color) -> Result<Pixmap> {
    let mut base = Pixmap::new(width, height).ok_or(Error::EmptySurface { width, height })?;
    base.fill(to_skia_color(background));

    let mut layers: Vec<(Pixmap, Rect)> = Vec::new();

    for command in ctx.commands() {
        match command {
            DrawCommand::SetLayerType(_) => {}
            DrawCommand::SaveLayer { bounds } => {
                let layer =
                    Pixmap::new(width, height).ok_or(Error::EmptySurface { width, height })?;
                layers.push((layer, *bounds));
            }
            DrawCommand::Restore => {
                if let Some((layer, bounds)) = layers.pop() {
                    let target = layers.last_mut().map(|(p, _)| p).unwrap_or(&mut base);
                    composite_layer(target, &layer, bounds);
                }
            }
            DrawCommand::RoundedRect {
                rect,
                color,
                radius,
                shadow,
                blend,
            } => {
                let target = layers.last_mut().map(|(p, _)| p).unwrap_or(&mut base);
                if let Some(shadow) = shadow {
                    fill_shadow(target, *rect, *radius, shadow);
                }
                if let Some(path) = rounded_rect_path(*rect, *radius) {
                    fill(target, &path, *color, *blend);
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                blend,
            } => {
                let target = layers.last_mut().map(|(p, _)| p).unwrap_or(&mut base);
                if let Some(path) = PathBuilder::from_circle(center.0, center.1, *radius) {
                    fill(target, &path, *color, *blend);
                }
            }
        }
    }

    // Unbalanced layers are flushed in order so nothing recorded is lost.
    while let Some((layer, bounds)) = layers.pop() {
        let target = layers.last_mut().map(|(p, _)| p).unwrap_or(&mut base);
        composite_layer(target, &layer, bounds);
    }

    Ok(base)
}

/// Read one pixel as straight (non-premultiplied) RGBA.
pub fn pixel_at(pixmap: &Pixmap, x: u32, y: u32) -> Option<[u8; 4]> {
    pixmap.pixel(x, y).map(|p| {
        let c = p.demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    })
}

/// Convert a pixmap into an `image` buffer for encoding or comparison.
pub fn to_rgba_image(pixmap: &Pixmap) -> image::RgbaImage {
    let mut out = image::RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        color.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn to_skia_blend(blend: BlendMode) -> tiny_skia::BlendMode {
    match blend {
        BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
        BlendMode::SourceAtop => tiny_skia::BlendMode::SourceAtop,
    }
}

fn fill(target: &mut Pixmap, path: &Path, color: Color, blend: BlendMode) {
    if color.a <= 0.0 && blend == BlendMode::SourceOver {
        return;
    }
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(to_skia_color(color));
    paint.blend_mode = to_skia_blend(blend);
    paint.anti_alias = true;
    target.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
}

fn fill_shadow(target: &mut Pixmap, rect: Rect, radius: f32, shadow: &Shadow) {
    if !shadow.is_visible() {
        return;
    }
    let step_color = Color {
        a: shadow.color.a / SHADOW_STEPS as f32,
        ..shadow.color
    };
    let base = rect.offset(shadow.offset.0, shadow.offset.1);
    for i in 0..SHADOW_STEPS {
        let spread = shadow.blur * (1.0 - i as f32 / SHADOW_STEPS as f32);
        let grown = Rect::new(
            base.x - spread,
            base.y - spread,
            base.width + spread * 2.0,
            base.height + spread * 2.0,
        );
        if let Some(path) = rounded_rect_path(grown, radius + spread) {
            fill(target, &path, step_color, BlendMode::SourceOver);
        }
    }
}

fn composite_layer(target: &mut Pixmap, layer: &Pixmap, bounds: Rect) {
    let mask = Mask::new(target.width(), target.height()).and_then(|mut mask| {
        let rect = tiny_skia::Rect::from_xywh(bounds.x, bounds.y, bounds.width, bounds.height)?;
        let path = PathBuilder::from_rect(rect);
        mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
        Some(mask)
    });
    // An empty bounds rect clips everything away.
    if let Some(mask) = mask {
        target.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            Some(&mask),
        );
    }
}

/// Rounded rectangle path; the radius is clamped to half the shorter side.
fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let r = radius.max(0.0).min(rect.width.min(rect.height) / 2.0);
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);

    if r <= 0.0 {
        let rect = tiny_skia::Rect::from_ltrb(left, top, right, bottom)?;
        return Some(PathBuilder::from_rect(rect));
    }

    let k = r * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
    pb.finish()
}
