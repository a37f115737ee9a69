use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;

use cube_core::{CubieSet, CubieStore, Move};
use cube_prefs::AnimationPreferences;
use web_time::Duration;

/// Higher number means faster exponential increase in twist speed when many
/// moves are queued.
const EXP_TWIST_FACTOR: f32 = 0.5;
/// Maximum angle that a twist may advance in a single frame: one quarter turn.
const MAX_TWIST_DELTA: f32 = FRAC_PI_2;

/// Move that is currently animating.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ActiveTwist {
    /// Move being animated. This is always the head of the queue.
    pub mv: Move,
    /// Cubies affected by the move, computed when the move started.
    pub grip: CubieSet,
    /// Angle turned so far, in radians, in the range `0.0..=FRAC_PI_2`.
    pub progress: f32,
}
impl ActiveTwist {
    /// Returns progress as a fraction of a quarter turn.
    pub fn t(&self) -> f32 {
        (self.progress / FRAC_PI_2).clamp(0.0, 1.0)
    }
}

/// Phase of the twist animation state machine.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum TwistPhase {
    /// Nothing is animating.
    #[default]
    Idle,
    /// The head of the queue is animating.
    Animating(ActiveTwist),
}

/// Queue of moves and the animation of the one at its head.
///
/// Only [`Self::proceed()`] finishes a move, and it hands the finished move
/// back to the caller instead of touching the puzzle state itself.
#[derive(Debug, Default, Clone)]
pub struct TwistAnimationState {
    /// Moves waiting to be animated, including the one currently animating.
    queue: VecDeque<Move>,
    /// Maximum length of `queue` since it was last empty.
    queue_max: usize,
    phase: TwistPhase,
}
impl TwistAnimationState {
    /// Appends a move to the back of the queue.
    pub fn push(&mut self, mv: Move) {
        self.queue.push_back(mv);
        self.queue_max = std::cmp::max(self.queue_max, self.queue.len());
    }
    /// Appends several moves to the back of the queue.
    pub fn extend(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.queue.extend(moves);
        self.queue_max = std::cmp::max(self.queue_max, self.queue.len());
    }

    /// Returns the number of queued moves, including the one animating.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
    /// Returns an iterator over the queued moves, head first.
    pub fn queued(&self) -> impl Iterator<Item = Move> + '_ {
        self.queue.iter().copied()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TwistPhase {
        self.phase
    }
    /// Returns the move currently animating, if any.
    pub fn current(&self) -> Option<&ActiveTwist> {
        match &self.phase {
            TwistPhase::Idle => None,
            TwistPhase::Animating(active) => Some(active),
        }
    }

    /// Starts animating the head of the queue if nothing is animating yet.
    /// The grip is taken from `state` and stays fixed for the whole move.
    pub fn start_next(&mut self, state: &CubieStore) {
        if self.phase != TwistPhase::Idle {
            return;
        }
        match self.queue.front() {
            Some(&mv) => {
                self.phase = TwistPhase::Animating(ActiveTwist {
                    mv,
                    grip: state.grip(mv),
                    progress: 0.0,
                });
            }
            None => self.queue_max = 0,
        }
    }

    /// Returns the angular speed for the current frame, in radians per second.
    fn angular_speed(&self, prefs: &AnimationPreferences) -> f32 {
        // Twist exponentially faster if there are/were more twists in the
        // queue.
        let speed_mod = match prefs.dynamic_twist_speed {
            true => ((self.queue_max.max(1) - 1) as f32 * EXP_TWIST_FACTOR).exp(),
            false => 1.0,
        };
        prefs.angular_speed() * speed_mod
    }

    /// Steps the animation forward by `delta`, starting the head of the queue
    /// if necessary.
    ///
    /// Returns the move that finished this frame, if any. The caller must
    /// commit it to the puzzle state and then call [`Self::start_next()`] with
    /// the new state.
    pub fn proceed(
        &mut self,
        delta: Duration,
        prefs: &AnimationPreferences,
        state: &CubieStore,
    ) -> Option<ActiveTwist> {
        self.start_next(state);

        let speed = self.angular_speed(prefs);
        let TwistPhase::Animating(active) = &mut self.phase else {
            return None;
        };

        let mut twist_delta = delta.as_secs_f32() * speed;
        // Cap the twist delta at one quarter turn, and also handle the case
        // where something went wrong with the calculation (e.g., division by
        // zero).
        if !(0.0..MAX_TWIST_DELTA).contains(&twist_delta) {
            twist_delta = MAX_TWIST_DELTA;
        }
        active.progress += twist_delta;
        log::trace!("twist {} at {:.3} rad", active.mv, active.progress);

        if active.progress < FRAC_PI_2 {
            return None;
        }
        let mut finished = *active;
        finished.progress = FRAC_PI_2;
        self.phase = TwistPhase::Idle;
        self.queue.pop_front();
        Some(finished)
    }

    /// Removes every queued move, including the one animating, and returns
    /// them in order.
    pub fn drain(&mut self) -> Vec<Move> {
        self.phase = TwistPhase::Idle;
        self.queue_max = 0;
        self.queue.drain(..).collect()
    }
}
