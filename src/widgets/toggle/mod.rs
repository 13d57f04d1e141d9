//! Ripple toggle container.
//!
//! A rounded, shadowed container that flips between selected and unselected
//! on a primary press. The transition is a filled circle growing out of the
//! press point until it covers the container, or collapsing back to nothing,
//! clipped to the rounded shape by compositing it source-atop inside an
//! offscreen layer.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use ripple_toggle::prelude::*;
//!
//! let mut toggle = ripple_toggle()
//!     .size(300.0, 200.0)
//!     .state_listener(|event: RippleStateEvent| {
//!         if let RippleStateEvent::Changed { selected } = event {
//!             println!("settled, selected = {}", selected);
//!         }
//!     });
//! toggle.layout(Constraints::loose(Size::new(400.0, 400.0)));
//! toggle.select();
//! while toggle.advance_animations(Duration::from_millis(16)) {}
//! assert!(toggle.is_selected());
//! ```

mod listener;
mod ripple;
mod style;

pub use listener::{RippleStateEvent, RippleStateListener};
pub use ripple::{
    longest_radius, ripple_alpha, ripple_progress, RippleFrame, RippleState, SelectionState,
    DECELERATE_FACTOR, DESELECT_ALPHA_BIAS, EXPAND_DURATION, SHRINK_DURATION,
};
pub use style::{
    parse_color, parse_dimension, RippleStyle, DEFAULT_CORNER_RADIUS, DEFAULT_RIPPLE_COLOR,
    DEFAULT_SHADOW_SPACE,
};

use std::time::Duration;

use crate::layout::{Constraints, Size};
use crate::reactive::{request_animation_frame, WidgetId};
use crate::renderer::{BlendMode, LayerType, Paint, PaintContext};
use crate::widgets::{Color, Event, EventResponse, Rect, Widget};

/// Shadow blur as a fraction of the reserved shadow space
const SHADOW_BLUR_RATIO: f32 = 0.8;

pub struct RippleToggle {
    id: WidgetId,
    style: RippleStyle,
    ripple: RippleState,
    background_paint: Paint,
    ripple_paint: Paint,
    shadow_paint: Paint,
    listener: Option<Box<dyn RippleStateListener>>,
    child: Option<Box<dyn Widget>>,
    preferred_size: Option<Size>,
    bounds: Rect,
}

/// Create a ripple toggle with the default style.
pub fn ripple_toggle() -> RippleToggle {
    RippleToggle::new(RippleStyle::default())
}

impl RippleToggle {
    pub fn new(style: RippleStyle) -> Self {
        let mut toggle = Self {
            id: WidgetId::next(),
            style,
            ripple: RippleState::new(),
            background_paint: Paint::default(),
            ripple_paint: Paint::default(),
            shadow_paint: Paint::default(),
            listener: None,
            child: None,
            preferred_size: None,
            bounds: Rect::default(),
        };
        toggle.configure_paints();
        toggle
    }

    /// Build from `(name, value)` style attributes; see [`RippleStyle::from_attrs`].
    pub fn from_attrs<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::new(RippleStyle::from_attrs(attrs))
    }

    fn configure_paints(&mut self) {
        self.ripple_paint = Paint::fill(self.style.ripple_color);
        self.background_paint = Paint::fill(self.style.background);

        let mut shadow = Paint::fill(Color::TRANSPARENT);
        shadow.set_shadow_layer(
            self.style.shadow_space * SHADOW_BLUR_RATIO,
            0.0,
            0.0,
            self.style.shadow_color,
        );
        self.shadow_paint = shadow;

        // Nothing is drawn until the first animation frame sets an alpha.
        self.ripple_paint.set_alpha(0);
        self.shadow_paint.set_alpha(0);
    }

    fn update_style(mut self, f: impl FnOnce(&mut RippleStyle)) -> Self {
        f(&mut self.style);
        self.configure_paints();
        self
    }

    pub fn ripple_color(self, color: Color) -> Self {
        self.update_style(|s| s.ripple_color = color)
    }

    pub fn shadow_space(self, space: f32) -> Self {
        self.update_style(|s| s.shadow_space = space.max(0.0))
    }

    pub fn shadow_color(self, color: Color) -> Self {
        self.update_style(|s| s.shadow_color = color)
    }

    pub fn background(self, color: Color) -> Self {
        self.update_style(|s| s.background = color)
    }

    pub fn corner_radius(self, radius: f32) -> Self {
        self.update_style(|s| s.corner_radius = radius.max(0.0))
    }

    /// Fixed size, including the shadow space.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.preferred_size = Some(Size::new(width, height));
        self
    }

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.child = Some(Box::new(child));
        self
    }

    pub fn state_listener(mut self, listener: impl RippleStateListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Replace the listener. Only one is held at a time.
    pub fn set_state_listener(&mut self, listener: impl RippleStateListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_state_listener(&mut self) {
        self.listener = None;
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn style(&self) -> &RippleStyle {
        &self.style
    }

    pub fn is_selected(&self) -> bool {
        self.ripple.selection().is_selected()
    }

    pub fn selection(&self) -> SelectionState {
        self.ripple.selection()
    }

    pub fn is_animating(&self) -> bool {
        self.ripple.is_animating()
    }

    /// Ripple center in widget-local coordinates
    pub fn center(&self) -> (f32, f32) {
        self.ripple.center()
    }

    pub fn radius(&self) -> f32 {
        self.ripple.radius()
    }

    pub fn target_radius(&self) -> f32 {
        self.ripple.target_radius()
    }

    pub fn ripple_paint(&self) -> &Paint {
        &self.ripple_paint
    }

    pub fn shadow_paint(&self) -> &Paint {
        &self.shadow_paint
    }

    /// Flip the state, animating from the widget center when selecting.
    pub fn toggle(&mut self) {
        if self.is_selected() {
            self.un_check();
        } else {
            self.select();
        }
    }

    /// Select, expanding from the widget center. No-op if already selected.
    pub fn select(&mut self) {
        if self.ripple.select() {
            self.start_change();
        }
    }

    /// Deselect, shrinking from the current radius. No-op if already unselected.
    pub fn un_check(&mut self) {
        if self.ripple.deselect() {
            self.start_change();
        }
    }

    /// Alias of [`un_check`](Self::un_check).
    pub fn deselect(&mut self) {
        self.un_check();
    }

    /// Handle a primary press at widget-local `point`.
    fn press(&mut self, point: (f32, f32)) {
        self.ripple.press(point);
        self.start_change();
    }

    fn start_change(&mut self) {
        let selected = self.is_selected();
        log::debug!("ripple toggle {:?} change start, selected = {}", self.id, selected);
        self.id.request_paint();
        request_animation_frame();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_change_start(selected);
        }
    }

    fn apply_frame(&mut self, frame: RippleFrame) {
        self.ripple_paint.set_alpha(frame.alpha);
        self.shadow_paint.set_alpha(frame.alpha);
        self.id.request_paint();

        let selected = self.is_selected();
        log::trace!(
            "ripple toggle {:?} radius {:.1} alpha {} progress {:.3}",
            self.id,
            frame.radius,
            frame.alpha,
            frame.progress
        );
        if let Some(listener) = self.listener.as_mut() {
            listener.on_changing(selected, frame.progress);
        }
        if frame.finished {
            if let Some(listener) = self.listener.as_mut() {
                listener.on_changed(selected);
            }
        }
    }

    fn shape(&self) -> Rect {
        self.bounds.inset(self.style.shadow_space)
    }
}

impl Widget for RippleToggle {
    fn advance_animations(&mut self, dt: Duration) -> bool {
        let child_animating = self
            .child
            .as_mut()
            .is_some_and(|child| child.advance_animations(dt));

        let Some(frame) = self.ripple.advance(dt) else {
            return child_animating;
        };
        self.apply_frame(frame);

        if frame.finished {
            return child_animating;
        }
        request_animation_frame();
        true
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let margin = self.style.shadow_space;
        let child_size = self
            .child
            .as_mut()
            .map(|child| child.layout(constraints.deflate(margin)));

        let size = match (self.preferred_size, child_size) {
            (Some(size), _) => constraints.constrain(size),
            (None, Some(child)) => constraints.constrain(Size::new(
                child.width + margin * 2.0,
                child.height + margin * 2.0,
            )),
            (None, None) => {
                let width = if constraints.max_width.is_finite() {
                    constraints.max_width
                } else {
                    constraints.min_width
                };
                let height = if constraints.max_height.is_finite() {
                    constraints.max_height
                } else {
                    constraints.min_height
                };
                Size::new(width, height)
            }
        };

        if size != self.ripple.size() {
            log::debug!("ripple toggle {:?} resized to {:?}", self.id, size);
            if let Some(frame) = self.ripple.set_size(size) {
                self.ripple_paint.set_alpha(frame.alpha);
                self.shadow_paint.set_alpha(frame.alpha);
                self.id.request_paint();
            }
        }
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let shape = self.shape();
        let radius = self.style.corner_radius;

        ctx.set_layer_type(LayerType::Hardware);
        ctx.draw_rounded_rect(shape, radius, &self.shadow_paint);

        let layer = ctx.save_layer(shape);
        ctx.draw_rounded_rect(shape, radius, &self.background_paint);
        let (cx, cy) = self.ripple.center();
        ctx.draw_circle(
            (self.bounds.x + cx, self.bounds.y + cy),
            self.ripple.radius(),
            &self.ripple_paint.with_blend(BlendMode::SourceAtop),
        );
        ctx.restore_to_count(layer);

        if let Some(child) = &self.child {
            child.paint(ctx);
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        if let Some(child) = self.child.as_mut() {
            if child.event(event) == EventResponse::Handled {
                return EventResponse::Handled;
            }
        }

        if !event.is_primary_down() {
            return EventResponse::Ignored;
        }
        match event.coords() {
            Some((x, y)) if self.bounds.contains(x, y) => {
                self.press((x - self.bounds.x, y - self.bounds.y));
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        let margin = self.style.shadow_space;
        if let Some(child) = self.child.as_mut() {
            child.set_origin(x + margin, y + margin);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;
    use crate::widgets::MouseButton;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    fn recorded() -> (Rc<RefCell<Vec<RippleStateEvent>>>, impl FnMut(RippleStateEvent)) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        (events, move |event| sink.borrow_mut().push(event))
    }

    fn laid_out() -> RippleToggle {
        let mut toggle = ripple_toggle().size(300.0, 200.0);
        toggle.layout(Constraints::loose(Size::new(1000.0, 1000.0)));
        toggle.set_origin(0.0, 0.0);
        toggle
    }

    fn press(toggle: &mut RippleToggle, x: f32, y: f32) -> EventResponse {
        toggle.event(&Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        })
    }

    fn settle(toggle: &mut RippleToggle) {
        let mut frames = 0;
        while toggle.advance_animations(FRAME) {
            frames += 1;
            assert!(frames < 1000, "animation never finished");
        }
    }

    #[test]
    fn test_press_fires_start_then_progress_then_changed() {
        let (events, listener) = recorded();
        let mut toggle = laid_out();
        toggle.set_state_listener(listener);

        assert_eq!(press(&mut toggle, 250.0, 50.0), EventResponse::Handled);
        settle(&mut toggle);

        let events = events.borrow();
        assert_eq!(events[0], RippleStateEvent::ChangeStart { selected: true });
        assert_eq!(
            *events.last().unwrap(),
            RippleStateEvent::Changed { selected: true }
        );
        let middle = &events[1..events.len() - 1];
        assert!(!middle.is_empty());
        assert!(middle
            .iter()
            .all(|e| matches!(e, RippleStateEvent::Changing { selected: true, .. })));
    }

    #[test]
    fn test_expand_progress_is_monotonic_and_bounded() {
        let (events, listener) = recorded();
        let mut toggle = laid_out().state_listener(listener);
        press(&mut toggle, 20.0, 180.0);
        settle(&mut toggle);

        let mut previous = 0.0;
        for event in events.borrow().iter() {
            if let RippleStateEvent::Changing { progress, .. } = *event {
                assert!((0.0..=1.0).contains(&progress));
                assert!(progress >= previous);
                previous = progress;
            }
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_interrupted_expand_emits_no_completion() {
        let (events, listener) = recorded();
        let mut toggle = laid_out().state_listener(listener);

        press(&mut toggle, 150.0, 100.0);
        for _ in 0..10 {
            toggle.advance_animations(FRAME);
        }
        let radius = toggle.radius();
        press(&mut toggle, 10.0, 10.0);
        assert!(!toggle.is_selected());
        assert_eq!(toggle.target_radius(), radius);
        settle(&mut toggle);

        let events = events.borrow();
        let completions: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, RippleStateEvent::Changed { .. }))
            .collect();
        assert_eq!(completions, vec![&RippleStateEvent::Changed { selected: false }]);
        let starts = events
            .iter()
            .filter(|e| matches!(e, RippleStateEvent::ChangeStart { .. }))
            .count();
        assert_eq!(starts, 2);
    }

    #[test]
    fn test_double_select_fires_once() {
        let (events, listener) = recorded();
        let mut toggle = laid_out().state_listener(listener);
        toggle.select();
        toggle.select();
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(toggle.center(), (150.0, 100.0));
    }

    #[test]
    fn test_un_check_when_unselected_is_noop() {
        let (events, listener) = recorded();
        let mut toggle = laid_out().state_listener(listener);
        toggle.un_check();
        assert!(events.borrow().is_empty());
        assert!(!toggle.is_animating());
    }

    #[test]
    fn test_toggle_dispatches_on_state() {
        let mut toggle = laid_out();
        toggle.toggle();
        assert!(toggle.is_selected());
        toggle.toggle();
        assert!(!toggle.is_selected());
    }

    #[test]
    fn test_non_primary_events_are_ignored() {
        let mut toggle = laid_out();
        let right = Event::MouseDown {
            x: 10.0,
            y: 10.0,
            button: MouseButton::Right,
        };
        assert_eq!(toggle.event(&right), EventResponse::Ignored);
        assert_eq!(
            toggle.event(&Event::MouseMove { x: 10.0, y: 10.0 }),
            EventResponse::Ignored
        );
        assert_eq!(press(&mut toggle, 500.0, 10.0), EventResponse::Ignored);
        assert!(!toggle.is_selected());
    }

    #[test]
    fn test_press_uses_local_coordinates() {
        let mut toggle = laid_out();
        toggle.set_origin(100.0, 50.0);
        press(&mut toggle, 130.0, 70.0);
        assert_eq!(toggle.center(), (30.0, 20.0));
    }

    #[test]
    fn test_replacing_listener_drops_previous() {
        let (first, l1) = recorded();
        let (second, l2) = recorded();
        let mut toggle = laid_out().state_listener(l1);
        toggle.set_state_listener(l2);
        toggle.select();
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);

        toggle.clear_state_listener();
        toggle.un_check();
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_alpha_applied_to_ripple_and_shadow() {
        let mut toggle = laid_out();
        assert_eq!(toggle.ripple_paint().alpha(), 0);
        toggle.select();
        settle(&mut toggle);
        assert_eq!(toggle.ripple_paint().alpha(), 255);
        assert_eq!(toggle.shadow_paint().alpha(), 255);

        toggle.un_check();
        settle(&mut toggle);
        assert_eq!(toggle.ripple_paint().alpha(), 0);
        assert_eq!(toggle.shadow_paint().alpha(), 0);
    }

    #[test]
    fn test_select_before_first_layout_still_covers() {
        let (events, listener) = recorded();
        let mut toggle = ripple_toggle().size(300.0, 200.0).state_listener(listener);
        toggle.select();
        toggle.layout(Constraints::loose(Size::new(1000.0, 1000.0)));
        toggle.set_origin(0.0, 0.0);
        settle(&mut toggle);

        assert!(toggle.is_selected());
        assert!(toggle.radius() >= toggle.target_radius());
        assert!(toggle.target_radius() > 0.0);
        assert_eq!(toggle.ripple_paint().alpha(), 255);
        assert_eq!(
            *events.borrow().last().unwrap(),
            RippleStateEvent::Changed { selected: true }
        );
    }

    #[test]
    fn test_settled_selection_follows_later_layout() {
        let mut toggle = ripple_toggle().size(120.0, 80.0);
        toggle.select();
        settle(&mut toggle);
        assert_eq!(toggle.ripple_paint().alpha(), 0);

        toggle.layout(Constraints::loose(Size::new(500.0, 500.0)));
        assert_eq!(toggle.ripple_paint().alpha(), 255);
        assert_eq!(toggle.shadow_paint().alpha(), 255);
        assert_eq!(toggle.center(), (60.0, 40.0));
    }

    #[test]
    fn test_zero_size_widget_settles_to_zero_alpha() {
        let mut toggle = ripple_toggle().size(0.0, 0.0);
        toggle.layout(Constraints::loose(Size::new(100.0, 100.0)));
        toggle.select();
        settle(&mut toggle);
        assert!(toggle.is_selected());
        assert_eq!(toggle.ripple_paint().alpha(), 0);
        assert_eq!(toggle.radius(), 0.0);
    }

    #[test]
    fn test_paint_sequence() {
        let mut toggle = laid_out();
        toggle.select();
        toggle.advance_animations(FRAME);

        let mut ctx = PaintContext::new();
        toggle.paint(&mut ctx);
        let commands = ctx.commands();

        assert_eq!(commands[0], DrawCommand::SetLayerType(LayerType::Hardware));
        let shape = Rect::new(20.0, 20.0, 260.0, 160.0);
        assert!(matches!(
            commands[1],
            DrawCommand::RoundedRect { rect, shadow: Some(_), .. } if rect == shape
        ));
        assert_eq!(commands[2], DrawCommand::SaveLayer { bounds: shape });
        assert!(matches!(
            commands[3],
            DrawCommand::RoundedRect { color, blend: BlendMode::SourceOver, .. }
                if color == Color::WHITE
        ));
        assert!(matches!(
            commands[4],
            DrawCommand::Circle { center, blend: BlendMode::SourceAtop, .. }
                if center == (150.0, 100.0)
        ));
        assert_eq!(commands[5], DrawCommand::Restore);
        assert_eq!(commands.len(), 6);
        // The stored ripple paint is left in normal mode.
        assert_eq!(toggle.ripple_paint().blend(), BlendMode::SourceOver);
    }

    #[test]
    fn test_layout_without_size_fills_constraints() {
        let mut toggle = ripple_toggle();
        let size = toggle.layout(Constraints::loose(Size::new(120.0, 80.0)));
        assert_eq!(size, Size::new(120.0, 80.0));
    }

    #[test]
    fn test_builder_overrides_style() {
        let toggle = ripple_toggle()
            .ripple_color(Color::BLACK)
            .corner_radius(4.0)
            .shadow_space(-3.0);
        assert_eq!(toggle.style().ripple_color, Color::BLACK);
        assert_eq!(toggle.style().corner_radius, 4.0);
        assert_eq!(toggle.style().shadow_space, 0.0);
        assert_eq!(toggle.ripple_paint().base_color(), Color::BLACK);
    }
}
