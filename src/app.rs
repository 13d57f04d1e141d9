use std::time::Duration;

use crate::error::Result;
use crate::layout::{Constraints, Size};
use crate::reactive::{
    clear_animation_flag, has_animations, with_app_state, with_app_state_mut, ChangeFlags,
};
use crate::renderer::{rasterize, PaintContext, Pixmap};
use crate::widgets::{Color, Event, EventResponse, Widget};

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Time advanced per frame by [`App::frame`]
    pub frame_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 360,
            height: 120,
            background_color: Color::rgb(0.95, 0.95, 0.95),
            frame_interval: Duration::from_millis(16),
        }
    }
}

/// Headless frame driver: feeds events and frame ticks to a root widget,
/// records its paint pass and rasterizes snapshots.
pub struct App<W: Widget> {
    config: AppConfig,
    root: W,
    paint_ctx: PaintContext,
    laid_out: bool,
    frames: u64,
}

impl<W: Widget> App<W> {
    pub fn new(root: W) -> Self {
        Self::with_config(AppConfig::default(), root)
    }

    pub fn with_config(config: AppConfig, root: W) -> Self {
        Self {
            config,
            root,
            paint_ctx: PaintContext::with_capacity(32),
            laid_out: false,
            frames: 0,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self.laid_out = false;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self.laid_out = false;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.config.frame_interval = interval;
        self
    }

    /// Install `env_logger` as the log backend. Safe to call repeatedly.
    pub fn init_logging() {
        let _ = env_logger::try_init();
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn root(&self) -> &W {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut W {
        &mut self.root
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    fn ensure_layout(&mut self) {
        let needs_layout = with_app_state(|state| state.needs_layout());
        if self.laid_out && !needs_layout {
            return;
        }
        let surface = Size::new(self.config.width as f32, self.config.height as f32);
        let size = self.root.layout(Constraints::loose(surface));
        self.root.set_origin(0.0, 0.0);
        self.laid_out = true;
        with_app_state_mut(|state| {
            state.clear_layout_flag();
            state.change_flags |= ChangeFlags::NEEDS_PAINT;
        });
        log::debug!("root laid out at {:?} on {:?} surface", size, surface);
    }

    /// Dispatch an input event to the root widget.
    pub fn dispatch(&mut self, event: &Event) -> EventResponse {
        self.ensure_layout();
        self.root.event(event)
    }

    /// Advance animations by `dt`. Returns true while another frame is wanted.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.ensure_layout();
        clear_animation_flag();
        let animating = self.root.advance_animations(dt);
        animating || has_animations()
    }

    /// Record the root's paint pass if anything changed since the last one.
    pub fn paint(&mut self) -> &PaintContext {
        self.ensure_layout();
        let needs_paint = with_app_state(|state| state.needs_paint());
        if needs_paint || self.paint_ctx.is_empty() {
            self.paint_ctx.clear();
            self.root.paint(&mut self.paint_ctx);
            with_app_state_mut(|state| state.clear_paint_flag());
        }
        &self.paint_ctx
    }

    /// Advance one frame interval and repaint. Returns true while animating.
    pub fn frame(&mut self) -> bool {
        let animating = self.advance(self.config.frame_interval);
        self.paint();
        self.frames += 1;
        animating
    }

    /// Step frames until animations settle or `max_frames` is reached.
    /// Returns the number of frames run.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        for count in 1..=max_frames {
            if !self.frame() {
                return count;
            }
        }
        log::warn!("animations still running after {} frames", max_frames);
        max_frames
    }

    /// Rasterize the current paint pass.
    pub fn snapshot(&mut self) -> Result<Pixmap> {
        let (width, height, background) = (
            self.config.width,
            self.config.height,
            self.config.background_color,
        );
        let ctx = self.paint();
        rasterize(ctx, width, height, background)
    }
}
