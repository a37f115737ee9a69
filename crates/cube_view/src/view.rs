use std::sync::Arc;

use cgmath::{InnerSpace, Point2};
use cube_core::{CubieId, CubieStore, Face, Move, ScrambleParams};
use cube_prefs::Preferences;
use parking_lot::Mutex;
use web_time::Duration;

use crate::drag::{DragGesture, resolve_screen_drag};
use crate::{Camera, PuzzleSimulation, TickResult};

/// Pointer-driven view of a puzzle simulation.
///
/// The simulation is shared so that other parts of an application (such as a
/// keyboard handler) can queue moves while the view is alive.
#[derive(Debug)]
pub struct PuzzleView {
    /// Puzzle simulation.
    pub sim: Arc<Mutex<PuzzleSimulation>>,
    /// Camera used to project the puzzle and interpret drags.
    pub camera: Camera,

    /// Last known pointer position, in pixels.
    cursor_pos: Option<Point2<f32>>,
    /// Pointer drag state.
    drag_state: Option<DragState>,
}

/// State of a pointer drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    /// Rotating the camera.
    ViewRot,
    /// Pressed on a cubie. Once the pointer has moved far enough to determine
    /// a direction, the drag state will change to [`DragState::Twisted`] or
    /// [`DragState::Canceled`].
    PreTwist {
        /// Cubie under the pointer when it was pressed.
        cubie: CubieId,
        /// Face of the puzzle under the pointer, if known.
        face: Option<Face>,
        /// Pointer position when it was pressed.
        start: Point2<f32>,
        /// Puzzle state when the pointer was pressed. The drag is resolved
        /// against this even if moves are committed before it resolves.
        state: Arc<CubieStore>,
    },
    /// Drag resolved to a move, which has been queued.
    Twisted(Move),
    /// Drag canceled; ignore drag inputs until the pointer is released.
    Canceled,
}

impl Default for PuzzleView {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(PuzzleSimulation::new())))
    }
}

impl PuzzleView {
    /// Constructs a new puzzle view around an existing simulation.
    pub fn new(sim: Arc<Mutex<PuzzleSimulation>>) -> Self {
        Self {
            sim,
            camera: Camera::default(),
            cursor_pos: None,
            drag_state: None,
        }
    }

    /// Returns the current drag state.
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag_state.as_ref()
    }

    /// Returns whether dragging on empty space may orbit the camera. This is
    /// `false` from the moment a cubie is pressed until the pointer is
    /// released, whether or not the drag has resolved.
    pub fn orbit_enabled(&self) -> bool {
        matches!(self.drag_state, None | Some(DragState::ViewRot))
    }
    /// Returns whether pointer drags may queue moves. This is `false` while
    /// the move queue is longer than the configured limit.
    pub fn manual_input_enabled(&self, prefs: &Preferences) -> bool {
        self.sim.lock().queue_depth() <= prefs.interaction.manual_input_queue_limit
    }

    /// Handles the pointer being pressed at `pos`. `hovered` is the cubie and
    /// face under the pointer, if any; pressing on empty space orbits the
    /// camera.
    pub fn pointer_down(
        &mut self,
        pos: Point2<f32>,
        hovered: Option<(CubieId, Option<Face>)>,
        prefs: &Preferences,
    ) {
        self.cursor_pos = Some(pos);
        self.drag_state = Some(match hovered {
            Some((cubie, face)) if self.manual_input_enabled(prefs) => DragState::PreTwist {
                cubie,
                face,
                start: pos,
                state: self.sim.lock().snapshot(),
            },
            Some(_) => {
                log::trace!("manual input disabled; ignoring drag");
                DragState::Canceled
            }
            None => DragState::ViewRot,
        });
    }

    /// Handles the pointer moving to `pos`.
    pub fn pointer_move(&mut self, pos: Point2<f32>, prefs: &Preferences) {
        let cursor_delta = self.cursor_pos.map(|old| pos - old);
        self.cursor_pos = Some(pos);

        let Some(drag_state) = self.drag_state.clone() else {
            return;
        };
        match drag_state {
            // Update camera.
            DragState::ViewRot => {
                if let Some(delta) = cursor_delta {
                    self.camera
                        .orbit_by([delta.x, delta.y], prefs.interaction.orbit_sensitivity);
                }
            }

            DragState::PreTwist {
                cubie,
                face,
                start,
                state,
            } => {
                if (pos - start).magnitude() < prefs.interaction.drag_threshold {
                    return;
                }
                let gesture = DragGesture {
                    cubie,
                    face,
                    start,
                    end: pos,
                };
                self.drag_state = Some(self.resolve_and_enqueue(&gesture, &state, prefs));
            }

            DragState::Twisted(_) | DragState::Canceled => (),
        }
    }

    /// Handles the pointer being released at `pos`. Returns the move queued by
    /// the drag, if any.
    pub fn pointer_up(&mut self, pos: Point2<f32>, prefs: &Preferences) -> Option<Move> {
        self.pointer_move(pos, prefs);
        self.cursor_pos = None;
        match self.drag_state.take()? {
            DragState::Twisted(mv) => Some(mv),
            _ => None,
        }
    }

    fn resolve_and_enqueue(
        &self,
        gesture: &DragGesture,
        state: &CubieStore,
        prefs: &Preferences,
    ) -> DragState {
        if !self.manual_input_enabled(prefs) {
            return DragState::Canceled;
        }
        match resolve_screen_drag(state, &self.camera, gesture, &prefs.interaction) {
            Some(mv) => {
                log::debug!("drag on {} resolved to {mv}", gesture.cubie);
                self.sim.lock().enqueue(mv);
                DragState::Twisted(mv)
            }
            None => {
                log::debug!("no move for drag on {}", gesture.cubie);
                DragState::Canceled
            }
        }
    }

    /// Resets the camera rotation and zoom.
    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    /// Queues a move by its key. See [`PuzzleSimulation::enqueue_move()`].
    pub fn enqueue_move(&self, key: &str) -> bool {
        self.sim.lock().enqueue_move(key)
    }
    /// Queues a random scramble of `count` moves and returns it.
    pub fn scramble(&self, count: u32) -> Vec<Move> {
        self.sim.lock().scramble(count)
    }
    /// Queues the scramble described by `params` and returns it.
    pub fn scramble_with(&self, params: &ScrambleParams) -> Vec<Move> {
        self.sim.lock().scramble_with(params)
    }
    /// Returns the number of moves waiting, including the one animating.
    pub fn queue_depth(&self) -> usize {
        self.sim.lock().queue_depth()
    }
    /// Advances the simulation by `delta`.
    pub fn tick(&self, delta: Duration, prefs: &Preferences) -> TickResult {
        self.sim.lock().tick(delta, &prefs.animation)
    }
}
