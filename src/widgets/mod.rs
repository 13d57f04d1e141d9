pub mod group;
pub mod toggle;
pub mod widget;

pub use group::{ripple_group, RippleGroup};
pub use toggle::{
    ripple_toggle, RippleStateEvent, RippleStateListener, RippleStyle, RippleToggle,
    SelectionState,
};
pub use widget::{Color, Event, EventResponse, MouseButton, Rect, Widget};
