//! A row of ripple toggles where at most one is selected.
//!
//! Selecting a member un-checks every other member as soon as its ripple
//! starts. Each member also carries a label color that swaps once its ripple
//! is more than halfway through, so text drawn over the toggle stays legible
//! against whichever fill dominates.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use ripple_toggle::prelude::*;
//!
//! let mut group = ripple_group()
//!     .member(ripple_toggle().size(120.0, 80.0))
//!     .member(ripple_toggle().size(120.0, 80.0));
//! group.layout(Constraints::loose(Size::new(400.0, 100.0)));
//! group.set_origin(0.0, 0.0);
//!
//! group.select(0);
//! group.select(1);
//! while group.advance_animations(Duration::from_millis(16)) {}
//! assert_eq!(group.selected_index(), Some(1));
//! assert_eq!(group.label_color(1), Some(Color::WHITE));
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::layout::{Constraints, Size};
use crate::reactive::WidgetId;
use crate::renderer::PaintContext;
use crate::widgets::{Color, Event, EventResponse, Rect, RippleStateEvent, RippleToggle, Widget};

/// Progress past which a member's label color follows its target state
pub const LABEL_SWAP_PROGRESS: f32 = 0.5;

type MemberObserver = Box<dyn FnMut(usize, RippleStateEvent)>;
type Inbox = Rc<RefCell<Vec<(usize, RippleStateEvent)>>>;

pub struct RippleGroup {
    id: WidgetId,
    members: Vec<RippleToggle>,
    labels: Vec<Color>,
    sizes: Vec<Size>,
    inbox: Inbox,
    observer: Option<MemberObserver>,
    spacing: f32,
    selected_label: Color,
    unselected_label: Color,
    bounds: Rect,
}

/// Create an empty group.
pub fn ripple_group() -> RippleGroup {
    RippleGroup::new()
}

impl RippleGroup {
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            members: Vec::new(),
            labels: Vec::new(),
            sizes: Vec::new(),
            inbox: Rc::new(RefCell::new(Vec::new())),
            observer: None,
            spacing: 0.0,
            selected_label: Color::WHITE,
            unselected_label: Color::BLACK,
            bounds: Rect::default(),
        }
    }

    /// Add a member. The group takes over the member's state listener; use
    /// [`on_member_event`](Self::on_member_event) to observe members.
    pub fn member(mut self, mut toggle: RippleToggle) -> Self {
        let index = self.members.len();
        let inbox = self.inbox.clone();
        toggle.set_state_listener(move |event: RippleStateEvent| {
            inbox.borrow_mut().push((index, event));
        });
        self.labels.push(self.label_for(toggle.is_selected()));
        self.sizes.push(Size::zero());
        self.members.push(toggle);
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Label colors used over a selected and an unselected member.
    pub fn label_colors(mut self, selected: Color, unselected: Color) -> Self {
        self.selected_label = selected;
        self.unselected_label = unselected;
        self.labels = self
            .members
            .iter()
            .map(|m| if m.is_selected() { selected } else { unselected })
            .collect();
        self
    }

    /// Observe every member notification, tagged with the member index.
    pub fn on_member_event(
        mut self,
        observer: impl FnMut(usize, RippleStateEvent) + 'static,
    ) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RippleToggle> {
        self.members.get(index)
    }

    pub fn label_color(&self, index: usize) -> Option<Color> {
        self.labels.get(index).copied()
    }

    /// Index of the member currently selected (or animating toward it).
    pub fn selected_index(&self) -> Option<usize> {
        self.members.iter().position(|m| m.is_selected())
    }

    pub fn select(&mut self, index: usize) {
        if let Some(member) = self.members.get_mut(index) {
            member.select();
        }
        self.process_inbox();
    }

    pub fn un_check(&mut self, index: usize) {
        if let Some(member) = self.members.get_mut(index) {
            member.un_check();
        }
        self.process_inbox();
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(member) = self.members.get_mut(index) {
            member.toggle();
        }
        self.process_inbox();
    }

    fn label_for(&self, selected: bool) -> Color {
        if selected {
            self.selected_label
        } else {
            self.unselected_label
        }
    }

    /// Drain member notifications until no reaction produces new ones.
    fn process_inbox(&mut self) {
        loop {
            let batch = std::mem::take(&mut *self.inbox.borrow_mut());
            if batch.is_empty() {
                break;
            }
            for (index, event) in batch {
                self.handle(index, event);
            }
        }
    }

    fn handle(&mut self, index: usize, event: RippleStateEvent) {
        match event {
            RippleStateEvent::ChangeStart { selected: true } => {
                log::debug!("ripple group {:?}: member {} selected", self.id, index);
                for (i, member) in self.members.iter_mut().enumerate() {
                    if i != index {
                        member.un_check();
                    }
                }
            }
            RippleStateEvent::Changing { selected, progress } if progress > LABEL_SWAP_PROGRESS => {
                let color = self.label_for(selected);
                if let Some(label) = self.labels.get_mut(index) {
                    *label = color;
                }
            }
            _ => {}
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(index, event);
        }
    }
}

impl Default for RippleGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for RippleGroup {
    fn advance_animations(&mut self, dt: Duration) -> bool {
        let mut animating = false;
        for member in &mut self.members {
            animating |= member.advance_animations(dt);
        }
        self.process_inbox();
        animating
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let count = self.members.len();
        if count == 0 {
            let size = constraints.constrain(Size::zero());
            self.bounds.width = size.width;
            self.bounds.height = size.height;
            return size;
        }

        let gaps = self.spacing * (count - 1) as f32;
        let slot = ((constraints.max_width - gaps) / count as f32).max(0.0);
        let member_constraints = Constraints::new(0.0, 0.0, slot, constraints.max_height);

        let mut width = gaps;
        let mut height: f32 = 0.0;
        for (member, size) in self.members.iter_mut().zip(self.sizes.iter_mut()) {
            *size = member.layout(member_constraints);
            width += size.width;
            height = height.max(size.height);
        }

        let size = constraints.constrain(Size::new(width, height));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        for member in &self.members {
            member.paint(ctx);
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        let mut response = EventResponse::Ignored;
        for member in &mut self.members {
            if member.event(event) == EventResponse::Handled {
                response = EventResponse::Handled;
                break;
            }
        }
        self.process_inbox();
        response
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        let mut cursor = x;
        for (member, size) in self.members.iter_mut().zip(&self.sizes) {
            member.set_origin(cursor, y);
            cursor += size.width + self.spacing;
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{ripple_toggle, MouseButton};

    const FRAME: Duration = Duration::from_millis(16);

    fn three() -> RippleGroup {
        let mut group = ripple_group()
            .spacing(10.0)
            .member(ripple_toggle().size(100.0, 60.0))
            .member(ripple_toggle().size(100.0, 60.0))
            .member(ripple_toggle().size(100.0, 60.0));
        group.layout(Constraints::loose(Size::new(400.0, 100.0)));
        group.set_origin(0.0, 0.0);
        group
    }

    fn settle(group: &mut RippleGroup) {
        let mut frames = 0;
        while group.advance_animations(FRAME) {
            frames += 1;
            assert!(frames < 1000, "animation never finished");
        }
    }

    fn click(group: &mut RippleGroup, x: f32, y: f32) -> EventResponse {
        group.event(&Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        })
    }

    #[test]
    fn test_layout_places_members_in_a_row() {
        let group = three();
        assert_eq!(group.get(0).unwrap().bounds(), Rect::new(0.0, 0.0, 100.0, 60.0));
        assert_eq!(group.get(1).unwrap().bounds(), Rect::new(110.0, 0.0, 100.0, 60.0));
        assert_eq!(group.get(2).unwrap().bounds(), Rect::new(220.0, 0.0, 100.0, 60.0));
        assert_eq!(group.bounds(), Rect::new(0.0, 0.0, 320.0, 60.0));
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let mut group = three();
        assert_eq!(click(&mut group, 50.0, 30.0), EventResponse::Handled);
        assert_eq!(group.selected_index(), Some(0));

        click(&mut group, 160.0, 30.0);
        assert_eq!(group.selected_index(), Some(1));
        assert!(!group.get(0).unwrap().is_selected());

        group.select(2);
        settle(&mut group);
        let selected: Vec<bool> = (0..3).map(|i| group.get(i).unwrap().is_selected()).collect();
        assert_eq!(selected, vec![false, false, true]);
    }

    #[test]
    fn test_click_in_gap_is_ignored() {
        let mut group = three();
        assert_eq!(click(&mut group, 105.0, 30.0), EventResponse::Ignored);
        assert_eq!(group.selected_index(), None);
    }

    #[test]
    fn test_label_color_swaps_past_halfway() {
        let mut group = three();
        assert_eq!(group.label_color(0), Some(Color::BLACK));

        group.select(0);
        settle(&mut group);
        assert_eq!(group.label_color(0), Some(Color::WHITE));

        group.un_check(0);
        settle(&mut group);
        assert_eq!(group.label_color(0), Some(Color::BLACK));
    }

    #[test]
    fn test_observer_sees_every_member_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut group = ripple_group()
            .member(ripple_toggle().size(50.0, 50.0))
            .member(ripple_toggle().size(50.0, 50.0))
            .on_member_event(move |index, event| sink.borrow_mut().push((index, event)));
        group.layout(Constraints::loose(Size::new(200.0, 50.0)));

        group.select(0);
        group.select(1);

        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![
                (0, RippleStateEvent::ChangeStart { selected: true }),
                (1, RippleStateEvent::ChangeStart { selected: true }),
                (0, RippleStateEvent::ChangeStart { selected: false }),
            ]
        );
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut group = three();
        group.select(7);
        group.toggle(9);
        assert_eq!(group.selected_index(), None);
        assert_eq!(group.label_color(9), None);
    }
}
