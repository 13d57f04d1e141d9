pub mod animation;
pub mod app;
pub mod error;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod widgets;

pub use app::{App, AppConfig};
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::Interpolator;
    pub use crate::layout::{Constraints, Size};
    pub use crate::renderer::{BlendMode, Paint, PaintContext};
    pub use crate::widgets::{
        ripple_group, ripple_toggle, Color, Event, EventResponse, MouseButton, Rect, RippleGroup,
        RippleStateEvent, RippleStateListener, RippleStyle, RippleToggle, SelectionState, Widget,
    };
    pub use crate::{App, AppConfig};
}
