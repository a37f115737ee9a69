use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Seconds taken by one quarter turn at base speed.
    pub twist_duration: f32,
    /// Whether to turn faster while many moves are queued, such as during a
    /// scramble.
    pub dynamic_twist_speed: bool,
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.3,
            dynamic_twist_speed: true,
            twist_interpolation: InterpolateFn::Cosine,
        }
    }
}
impl AnimationPreferences {
    /// Returns the base angular speed of a turn, in radians per second.
    pub fn angular_speed(&self) -> f32 {
        if self.twist_duration <= 0.0 {
            f32::INFINITY
        } else {
            PI / 2.0 / self.twist_duration
        }
    }
}

/// Easing function applied to animation progress.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterpolateFn {
    Lerp,
    #[default]
    Cosine,
    Cubic,
}
impl InterpolateFn {
    /// Maps `t` in the range `0.0..=1.0` to eased progress in the same range.
    pub fn interpolate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            InterpolateFn::Lerp => t,
            InterpolateFn::Cosine => (1.0 - (t * PI).cos()) / 2.0,
            InterpolateFn::Cubic => t * t * (3.0 - 2.0 * t),
        }
    }
}
