//! Animation state for moves in flight.

mod twist;

pub use twist::{ActiveTwist, TwistAnimationState, TwistPhase};
