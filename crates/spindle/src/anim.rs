use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::FRAC_PI_2;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Decelerating curves. Every variant maps 0 to 0 and 1 to 1 exactly, with a slope that
/// strictly decreases over `[0, 1)`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Easing {
    #[strum(to_string = "quad-out", serialize = "QuadOut")]
    QuadOut,
    #[default]
    #[strum(to_string = "cubic-out", serialize = "CubicOut")]
    CubicOut,
    #[strum(to_string = "quart-out", serialize = "QuartOut")]
    QuartOut,
    #[strum(to_string = "sine-out", serialize = "SineOut")]
    SineOut,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let inv = 1.0 - t;
        match self {
            Self::QuadOut => 1.0 - inv * inv,
            Self::CubicOut => 1.0 - inv * inv * inv,
            Self::QuartOut => 1.0 - inv * inv * inv * inv,
            Self::SineOut => (t * FRAC_PI_2).sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub value: f64,
    pub finished: bool,
}

/// Interpolates `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, elapsed: Duration) -> TweenSample {
        if elapsed >= self.duration {
            return TweenSample {
                value: self.to,
                finished: true,
            };
        }

        let eased = self.easing.apply(self.progress(elapsed));
        TweenSample {
            value: self.from + (self.to - self.from) * eased,
            finished: false,
        }
    }
}
