//! Interpolators (easing curves) for the scroller.
//!
//! An interpolator maps normalized elapsed time `t` in `[0, 1]` to a
//! normalized position, controlling how quickly an animated value moves
//! toward its end.
//!
//! - [`Interpolator::Linear`] - Constant speed
//! - [`Interpolator::Decelerate`] - Starts fast, ends slow
//!
//! ## Example
//!
//! ```
//! use ripple_toggle::animation::Interpolator;
//!
//! let curve = Interpolator::Decelerate(3.0);
//! assert!(curve.evaluate(0.25) > 0.25);
//! ```

/// Easing curve applied to normalized animation time
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interpolator {
    /// Linear interpolation (constant speed)
    Linear,
    /// Decelerating curve `1 - (1 - t)^(2 * factor)`.
    /// A factor of 1.0 is a plain quadratic ease-out.
    Decelerate(f32),
}

impl Interpolator {
    /// Evaluate the curve at time t (clamped to 0.0..=1.0)
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Interpolator::Linear => t,
            Interpolator::Decelerate(factor) => decelerate(t, factor),
        }
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Interpolator::Decelerate(1.0)
    }
}

fn decelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        1.0 - (1.0 - t) * (1.0 - t)
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}
