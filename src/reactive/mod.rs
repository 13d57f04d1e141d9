pub mod invalidation;

pub use invalidation::{
    clear_animation_flag, has_animations, request_animation_frame, reset_invalidation,
    with_app_state, with_app_state_mut, AppState, ChangeFlags, WidgetId,
};
