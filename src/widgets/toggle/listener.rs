/// Notification emitted by a [`RippleToggle`](super::RippleToggle).
///
/// Per toggle the order is one `ChangeStart`, zero or more `Changing`, then
/// one `Changed` (unless the run is interrupted by another toggle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RippleStateEvent {
    /// A toggle began; `selected` is the state being animated toward
    ChangeStart { selected: bool },
    /// Animation frame; `progress` is the ripple radius as a fraction of its target
    Changing { selected: bool, progress: f32 },
    /// The animation settled in `selected`
    Changed { selected: bool },
}

impl RippleStateEvent {
    pub fn selected(&self) -> bool {
        match *self {
            RippleStateEvent::ChangeStart { selected }
            | RippleStateEvent::Changing { selected, .. }
            | RippleStateEvent::Changed { selected } => selected,
        }
    }
}

/// Observer of a ripple toggle's animation lifecycle.
///
/// Any `FnMut(RippleStateEvent)` closure is a listener.
pub trait RippleStateListener {
    fn on_change_start(&mut self, selected: bool);

    fn on_changing(&mut self, selected: bool, progress: f32) {
        let _ = (selected, progress);
    }

    fn on_changed(&mut self, selected: bool) {
        let _ = selected;
    }
}

impl<F> RippleStateListener for F
where
    F: FnMut(RippleStateEvent),
{
    fn on_change_start(&mut self, selected: bool) {
        self(RippleStateEvent::ChangeStart { selected })
    }

    fn on_changing(&mut self, selected: bool, progress: f32) {
        self(RippleStateEvent::Changing { selected, progress })
    }

    fn on_changed(&mut self, selected: bool) {
        self(RippleStateEvent::Changed { selected })
    }
}
