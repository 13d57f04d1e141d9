use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Widget needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b01;
        /// Widget needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

/// Unique identifier for a widget
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    /// Generate a new unique widget ID
    pub fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Request that this widget be repainted (without layout)
    pub fn request_paint(&self) {
        APP_STATE.with(|state| {
            state.borrow_mut().change_flags |= ChangeFlags::NEEDS_PAINT;
        });
    }
}

/// Frame-level invalidation state shared by every widget on the UI thread
pub struct AppState {
    /// Global change flags
    pub change_flags: ChangeFlags,
    /// Whether an animation asked for another frame
    pub has_animations: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            change_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            has_animations: false,
        }
    }

    pub fn needs_layout(&self) -> bool {
        self.change_flags.contains(ChangeFlags::NEEDS_LAYOUT)
    }

    pub fn needs_paint(&self) -> bool {
        self.change_flags.contains(ChangeFlags::NEEDS_PAINT)
    }

    pub fn clear_layout_flag(&mut self) {
        self.change_flags.remove(ChangeFlags::NEEDS_LAYOUT);
    }

    pub fn clear_paint_flag(&mut self) {
        self.change_flags.remove(ChangeFlags::NEEDS_PAINT);
    }
}

thread_local! {
    static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

pub fn with_app_state<R>(f: impl FnOnce(&AppState) -> R) -> R {
    APP_STATE.with(|state| f(&state.borrow()))
}

pub fn with_app_state_mut<R>(f: impl FnOnce(&mut AppState) -> R) -> R {
    APP_STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Ask the frame driver for another animation frame
pub fn request_animation_frame() {
    with_app_state_mut(|state| state.has_animations = true);
}

/// Reset the animation flag at the start of a frame
pub fn clear_animation_flag() {
    with_app_state_mut(|state| state.has_animations = false);
}

pub fn has_animations() -> bool {
    with_app_state(|state| state.has_animations)
}

/// Wipe all invalidation state for this thread
pub fn reset_invalidation() {
    with_app_state_mut(|state| *state = AppState::new());
}
