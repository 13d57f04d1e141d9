use crate::{Result, VisualTestError};
use ripple_toggle::prelude::*;
use ripple_toggle::renderer::to_rgba_image;
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound on frames stepped while waiting for a scene to settle
const MAX_SETTLE_FRAMES: usize = 1000;
const FRAME: Duration = Duration::from_millis(16);

/// A fixed widget setup rendered headlessly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Default toggle, never touched
    Unselected,
    /// Default toggle after a press near the right edge has settled
    Selected,
    /// A press in the top left, captured partway through the expansion
    MidExpand,
    /// A settled selection, captured partway through the shrink
    MidShrink,
    /// A three member group with the middle member selected
    Group,
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Scene::Unselected => "unselected",
            Scene::Selected => "selected",
            Scene::MidExpand => "mid_expand",
            Scene::MidShrink => "mid_shrink",
            Scene::Group => "group",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            Scene::Unselected,
            Scene::Selected,
            Scene::MidExpand,
            Scene::MidShrink,
            Scene::Group,
        ]
        .into_iter()
        .find(|scene| scene.name() == name)
    }
}

/// Configuration for capturing a screenshot
pub struct CaptureConfig {
    /// Scene to render
    pub scene: Scene,
    /// Path where the screenshot will be saved
    pub output_path: PathBuf,
}

fn press(x: f32, y: f32) -> Event {
    Event::MouseDown {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn toggle_app() -> App<RippleToggle> {
    App::new(ripple_toggle().size(300.0, 120.0))
        .width(300)
        .height(120)
        .background_color(Color::rgb(0.95, 0.95, 0.95))
        .frame_interval(FRAME)
}

fn render<W: Widget>(app: &mut App<W>) -> Result<image::RgbaImage> {
    let pixmap = app
        .snapshot()
        .map_err(|e| VisualTestError::Capture(e.to_string()))?;
    Ok(to_rgba_image(&pixmap))
}

/// Render a scene to an image
pub fn render_scene(scene: Scene) -> Result<image::RgbaImage> {
    match scene {
        Scene::Unselected => render(&mut toggle_app()),
        Scene::Selected => {
            let mut app = toggle_app();
            app.dispatch(&press(250.0, 60.0));
            app.run_until_idle(MAX_SETTLE_FRAMES);
            render(&mut app)
        }
        Scene::MidExpand => {
            let mut app = toggle_app();
            app.dispatch(&press(60.0, 40.0));
            for _ in 0..8 {
                app.frame();
            }
            render(&mut app)
        }
        Scene::MidShrink => {
            let mut app = toggle_app();
            app.root_mut().select();
            app.run_until_idle(MAX_SETTLE_FRAMES);
            app.dispatch(&press(150.0, 60.0));
            for _ in 0..10 {
                app.frame();
            }
            render(&mut app)
        }
        Scene::Group => {
            let group = ripple_group()
                .spacing(8.0)
                .member(ripple_toggle().size(120.0, 80.0))
                .member(ripple_toggle().size(120.0, 80.0))
                .member(ripple_toggle().size(120.0, 80.0));
            let mut app = App::new(group).width(376).height(80).frame_interval(FRAME);
            app.dispatch(&press(20.0, 40.0));
            app.run_until_idle(MAX_SETTLE_FRAMES);
            app.dispatch(&press(188.0, 40.0));
            app.run_until_idle(MAX_SETTLE_FRAMES);
            render(&mut app)
        }
    }
}

/// Render a scene and save it as a PNG
pub fn capture_scene(config: &CaptureConfig) -> Result<()> {
    let image = render_scene(config.scene)?;
    if let Some(parent) = config.output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image.save(&config.output_path)?;

    if !config.output_path.exists() {
        return Err(VisualTestError::Capture(format!(
            "Screenshot was not created at {}",
            config.output_path.display()
        )));
    }
    Ok(())
}
