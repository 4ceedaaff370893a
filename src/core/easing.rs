use serde::{Deserialize, Serialize};

/// Timing curve applied to the elapsed fraction of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t <= 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn cubic_in_out_is_symmetric_and_anchored() {
        let ease = Easing::CubicInOut;
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert!((ease.apply(0.5) - 0.5).abs() <= 1e-12);
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() <= 1e-12);
    }
}
