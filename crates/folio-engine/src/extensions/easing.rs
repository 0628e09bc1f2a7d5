// extensions/easing.rs
//
// Easing curves for the story guide and entrance motion.
// Pure math, evaluated against elapsed time on the shared clock.

use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow end.
    QuadOut,
    /// Sine-shaped slow start and end.
    SineInOut,
}

impl Easing {
    /// Map normalized time `t` (clamped to [0, 1]) through the curve.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate `from -> to` with `easing` at normalized time `t`.
#[inline]
pub fn ease(from: f32, to: f32, t: f32, easing: Easing) -> f32 {
    lerp(from, to, easing.apply(t))
}

/// Three-keyframe loop `from -> peak -> from` over one cycle.
/// `t` is the phase within the cycle; values outside [0, 1) wrap.
pub fn there_and_back(from: f32, peak: f32, t: f32, easing: Easing) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 0.5 {
        ease(from, peak, t * 2.0, easing)
    } else {
        ease(peak, from, (t - 0.5) * 2.0, easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for e in [Easing::Linear, Easing::QuadOut, Easing::SineInOut] {
            assert!(e.apply(0.0).abs() < 1e-6, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn quad_out_leads_linear() {
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
    }

    #[test]
    fn there_and_back_peaks_midway() {
        assert!((there_and_back(0.0, -5.0, 0.0, Easing::SineInOut)).abs() < 1e-6);
        assert!((there_and_back(0.0, -5.0, 0.5, Easing::SineInOut) + 5.0).abs() < 1e-5);
        assert!((there_and_back(0.0, -5.0, 0.999_999, Easing::SineInOut)).abs() < 1e-3);
        // Wraps into the next cycle.
        assert!((there_and_back(0.0, -5.0, 1.5, Easing::SineInOut) + 5.0).abs() < 1e-5);
    }
}
