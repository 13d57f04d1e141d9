mod interpolator;
mod scroller;

pub use interpolator::Interpolator;
pub use scroller::{ScrollTick, Scroller};
