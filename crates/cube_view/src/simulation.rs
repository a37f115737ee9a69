use std::fmt;
use std::sync::Arc;

use cube_core::notation::parse_move;
use cube_core::{CubieId, CubieStore, Move, Quat, ScrambleParams, Vector3};
use cube_prefs::AnimationPreferences;
use serde::Serialize;
use web_time::{Duration, Instant};

use crate::animations::TwistAnimationState;

const ASSUMED_FPS: f32 = 120.0;

/// Callback invoked once for every move committed to the puzzle state.
pub type MoveCompleteCallback = Box<dyn FnMut(&Move) + Send>;

/// Visual transform of one cubie for the current frame.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct CubieTransform {
    /// Cubie ID.
    pub id: CubieId,
    /// Center of the cubie in world space. During a turn this lies between
    /// lattice points.
    pub position: Vector3,
    /// Orientation of the cubie relative to its home orientation.
    pub rotation: Quat,
}

/// Result of advancing the simulation by one frame.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct TickResult {
    /// Whether anything visible changed.
    pub needs_redraw: bool,
    /// Move that was committed this frame, if any.
    pub completed: Option<Move>,
}

/// Puzzle simulation, which owns the logical puzzle state and animates queued
/// moves on top of it.
///
/// The logical state changes only when a move finishes animating, and then
/// by exactly one quarter turn.
pub struct PuzzleSimulation {
    /// Latest puzzle state, not including any in-progress turn.
    latest_state: Arc<CubieStore>,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
    /// Twist animation state.
    twist_anim: TwistAnimationState,

    /// Latest visual cubie transforms.
    cached_transforms: Vec<CubieTransform>,

    on_move_complete: Option<MoveCompleteCallback>,
}

impl fmt::Debug for PuzzleSimulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleSimulation")
            .field("latest_state", &self.latest_state)
            .field("last_frame_time", &self.last_frame_time)
            .field("twist_anim", &self.twist_anim)
            .field("on_move_complete", &self.on_move_complete.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for PuzzleSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleSimulation {
    /// Constructs a new simulation with a solved puzzle.
    pub fn new() -> Self {
        Self::with_state(CubieStore::new())
    }
    /// Constructs a new simulation starting from `state`.
    pub fn with_state(state: CubieStore) -> Self {
        let latest_state = Arc::new(state);
        let cached_transforms = resting_transforms(&latest_state);
        Self {
            latest_state,
            last_frame_time: None,
            twist_anim: TwistAnimationState::default(),
            cached_transforms,
            on_move_complete: None,
        }
    }

    /// Returns the latest committed puzzle state.
    pub fn puzzle(&self) -> &CubieStore {
        &self.latest_state
    }
    /// Returns a shared handle to the latest committed puzzle state. The
    /// handle never changes, even after later moves are committed.
    pub fn snapshot(&self) -> Arc<CubieStore> {
        Arc::clone(&self.latest_state)
    }
    /// Returns whether the committed state is solved.
    pub fn is_solved(&self) -> bool {
        self.latest_state.is_solved()
    }

    /// Sets the callback invoked after each move is committed, replacing any
    /// previous one.
    pub fn set_on_move_complete(&mut self, callback: MoveCompleteCallback) {
        self.on_move_complete = Some(callback);
    }

    /// Returns the visual transform of every cubie, in order of ID.
    pub fn render_data(&self) -> &[CubieTransform] {
        &self.cached_transforms
    }
    /// Updates the cubie transforms. This is called every frame that the
    /// puzzle is in motion.
    fn update_transforms(&mut self, prefs: &AnimationPreferences) {
        let Some(active) = self.twist_anim.current() else {
            self.cached_transforms = resting_transforms(&self.latest_state);
            return;
        };
        let t = prefs.twist_interpolation.interpolate(active.t());
        let turn = Quat::partial_quarter_turn(active.mv.axis, active.mv.direction, t as _);
        self.cached_transforms = self
            .latest_state
            .iter()
            .map(|cubie| {
                let mut transform = resting_transform(cubie);
                if active.grip.contains(cubie.id) {
                    transform.position = turn.rotate(transform.position);
                    transform.rotation = turn * transform.rotation;
                }
                transform
            })
            .collect();
    }

    /// Returns the number of moves waiting, including the one animating.
    pub fn queue_depth(&self) -> usize {
        self.twist_anim.len()
    }
    /// Returns the queued moves in order, including the one animating.
    pub fn queued_moves(&self) -> Vec<Move> {
        self.twist_anim.queued().collect()
    }
    /// Returns whether a move is currently animating.
    pub fn is_animating(&self) -> bool {
        self.twist_anim.current().is_some()
    }
    /// Returns the move currently animating and its raw progress in the range
    /// `0.0..=1.0`.
    pub fn current_move(&self) -> Option<(Move, f32)> {
        self.twist_anim.current().map(|active| (active.mv, active.t()))
    }

    /// Queues a move by its key, such as `U1`. Returns `false` and does
    /// nothing if the key is not recognized.
    pub fn enqueue_move(&mut self, key: &str) -> bool {
        match parse_move(key) {
            Some(mv) => {
                self.enqueue(mv);
                true
            }
            None => {
                log::debug!("ignoring unknown move key {key:?}");
                false
            }
        }
    }
    /// Queues a move.
    pub fn enqueue(&mut self, mv: Move) {
        self.twist_anim.push(mv);
    }
    /// Queues several moves in order.
    pub fn enqueue_all(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.twist_anim.extend(moves);
    }

    /// Queues a random scramble of `count` moves and returns it.
    pub fn scramble(&mut self, count: u32) -> Vec<Move> {
        self.scramble_with(&ScrambleParams::new(count))
    }
    /// Queues the scramble described by `params` and returns it.
    pub fn scramble_with(&mut self, params: &ScrambleParams) -> Vec<Move> {
        let moves = params.generate();
        self.enqueue_all(moves.iter().copied());
        moves
    }

    /// Commits a move to the puzzle state and notifies the callback.
    fn commit(&mut self, mv: Move, grip: cube_core::CubieSet) {
        let new_state = self.latest_state.commit_rotation(grip, mv.axis, mv.direction);
        let _old_state = std::mem::replace(&mut self.latest_state, Arc::new(new_state));
        log::debug!("committed {mv}");
        if let Some(callback) = &mut self.on_move_complete {
            callback(&mv);
        }
    }

    /// Advances the simulation by `delta`.
    ///
    /// When the current move finishes it is committed, its callback runs, and
    /// the next queued move starts animating, all within this call.
    pub fn tick(&mut self, delta: Duration, prefs: &AnimationPreferences) -> TickResult {
        let mut result = TickResult {
            needs_redraw: self.is_animating() || !self.twist_anim.is_empty(),
            completed: None,
        };

        if let Some(finished) = self.twist_anim.proceed(delta, prefs, &self.latest_state) {
            self.commit(finished.mv, finished.grip);
            self.twist_anim.start_next(&self.latest_state);
            result.completed = Some(finished.mv);
            result.needs_redraw = true;
        }

        if result.needs_redraw {
            self.update_transforms(prefs);
        }
        result
    }

    /// Advances the simulation by the real time elapsed since the previous
    /// call. Returns whether the puzzle needs to be redrawn.
    pub fn step(&mut self, prefs: &AnimationPreferences) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.tick(delta, prefs).needs_redraw;

        if self.twist_anim.is_empty() {
            self.last_frame_time = None;
        } else {
            self.last_frame_time = Some(now);
        }

        needs_redraw
    }

    /// Commits every queued move immediately, in order, without animating.
    pub fn skip_animations(&mut self) {
        for mv in self.twist_anim.drain() {
            let grip = self.latest_state.grip(mv);
            self.commit(mv, grip);
        }
        self.last_frame_time = None;
        self.cached_transforms = resting_transforms(&self.latest_state);
    }

    /// Drops all queued moves and returns the puzzle to the solved state.
    pub fn reset(&mut self) {
        let dropped = self.twist_anim.drain();
        if !dropped.is_empty() {
            log::debug!("reset dropped {} queued moves", dropped.len());
        }
        self.latest_state = Arc::new(CubieStore::new());
        self.last_frame_time = None;
        self.cached_transforms = resting_transforms(&self.latest_state);
    }
}

fn resting_transform(cubie: &cube_core::Cubie) -> CubieTransform {
    CubieTransform {
        id: cubie.id,
        position: cubie.position.to_vector(),
        rotation: cubie.rotation,
    }
}

fn resting_transforms(state: &CubieStore) -> Vec<CubieTransform> {
    state.iter().map(resting_transform).collect()
}
