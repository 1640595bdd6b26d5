use std::time::Duration;

/// Timing curve for an animated transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    Linear,
    #[default]
    EaseInOut,
}

impl Curve {
    /// Maps linear progress `t` to eased progress. Both are in `[0, 1]`.
    pub fn sample(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// How a computed layout reaches the placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Immediate,
    Animated { duration: Duration, curve: Curve },
}

impl Transition {
    /// An eased slide, or `Immediate` when there is nothing to animate over.
    pub fn slide(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::Immediate
        } else {
            Self::Animated {
                duration,
                curve: Curve::EaseInOut,
            }
        }
    }
}

/// The host's animation engine.
///
/// `changes` applies the final geometry to the placeholders. An implementation
/// runs it inside whatever scope makes those writes animate, and must call it
/// exactly once before returning. Interpolation happens later, on the host's
/// own clock.
pub trait Animator {
    fn animate(&mut self, duration: Duration, curve: Curve, changes: &mut dyn FnMut());
}

/// Applies every change on the spot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Animator for Immediate {
    fn animate(&mut self, _duration: Duration, _curve: Curve, changes: &mut dyn FnMut()) {
        changes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = Curve::EaseInOut;
        assert_eq!(curve.sample(0.0), 0.0);
        assert_eq!(curve.sample(0.5), 0.5);
        assert_eq!(curve.sample(1.0), 1.0);
        assert!(curve.sample(0.25) < 0.25);
        assert!((curve.sample(0.25) + curve.sample(0.75) - 1.0).abs() < 1e-12);
        assert_eq!(curve.sample(2.0), 1.0);
    }

    #[test]
    fn test_zero_duration_slide_is_immediate() {
        assert_eq!(Transition::slide(Duration::ZERO), Transition::Immediate);
        assert_eq!(
            Transition::slide(Duration::from_millis(100)),
            Transition::Animated {
                duration: Duration::from_millis(100),
                curve: Curve::EaseInOut,
            }
        );
    }
}
