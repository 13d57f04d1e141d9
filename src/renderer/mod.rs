//! Display-list rendering: paints, draw commands, the recording context and
//! a tiny-skia rasterizer.

pub mod commands;
pub mod context;
pub mod paint;
pub mod raster;
pub mod types;

pub use commands::DrawCommand;
pub use context::PaintContext;
pub use paint::Paint;
pub use raster::{pixel_at, rasterize, to_rgba_image};
pub use types::{BlendMode, LayerType, Shadow};

/// Re-export of the pixmap type produced by [`rasterize`].
pub use resvg::tiny_skia::Pixmap;
