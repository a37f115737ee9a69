//! Resolution of pointer drags on a cubie into face moves.
//!
//! Two strategies are provided:
//!
//! - [`resolve_screen_drag()`] nudges every candidate move by a small angle,
//!   projects the resulting motion of the touched sticker onto the screen, and
//!   picks the move whose motion best matches the drag. This works from any
//!   camera angle.
//! - [`resolve_world_drag()`] works directly from a world-space surface normal
//!   and drag vector, snapping both onto principal axes.

use cgmath::{InnerSpace, Point2};
use cube_core::cubemath::Float;
use cube_core::{CubieId, CubieStore, Face, MOVES, Move, Quat, Sign, Vector3};
use cube_prefs::InteractionPreferences;
use float_ord::FloatOrd;
use smallvec::SmallVec;

use crate::Camera;

/// Distance from a cubie center to the center of one of its stickers.
const STICKER_OFFSET: Float = 0.5;

/// Completed pointer drag on the puzzle, in pixel coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragGesture {
    /// Cubie under the pointer when the drag started.
    pub cubie: CubieId,
    /// Face of the puzzle that was touched, if the caller knows it. When this
    /// is `None`, the visible face of the cubie nearest to `start` is used.
    pub face: Option<Face>,
    /// Pointer position when the drag started.
    pub start: Point2<f32>,
    /// Pointer position when the drag ended.
    pub end: Point2<f32>,
}
impl DragGesture {
    /// Returns the drag vector in pixels.
    pub fn delta(&self) -> cgmath::Vector2<f32> {
        self.end - self.start
    }
}

/// Move considered by the screen-space resolver, with its score.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragCandidate {
    /// Candidate move.
    pub mv: Move,
    /// Cosine of the angle between the drag and the on-screen motion of the
    /// touched sticker under this move.
    pub score: f32,
}

/// Returns whether a cubie at `position` can be moved by dragging. Face
/// centers only spin in place and the core is never visible.
fn is_draggable(position: cube_core::LatticePoint) -> bool {
    position.nonzero_count() >= 2
}

/// Returns whether `face` of the puzzle is one of the cubie's outer faces.
fn is_on_face(position: cube_core::LatticePoint, face: Face) -> bool {
    position.get(face.axis()) == face.slice()
}

/// Returns the outer face of the cubie at `position` that the user most likely
/// touched at `pointer`: the visible face whose sticker center is nearest on
/// screen.
pub fn touched_face(
    camera: &Camera,
    position: cube_core::LatticePoint,
    pointer: Point2<f32>,
) -> Option<Face> {
    let center = position.to_vector();
    Face::ALL
        .into_iter()
        .filter(|&face| is_on_face(position, face))
        .filter_map(|face| {
            let sticker = center + face.normal() * STICKER_OFFSET;
            if !camera.is_facing_camera(sticker, face.normal()) {
                return None;
            }
            let on_screen = camera.project_point_to_screen(sticker)?;
            Some((face, FloatOrd((on_screen - pointer).magnitude2())))
        })
        .min_by_key(|(_, dist)| *dist)
        .map(|(face, _)| face)
}

/// Scores every move that could carry the touched sticker, without applying
/// any threshold.
///
/// Moves around the touched face's own axis are excluded, since they spin the
/// sticker in place.
pub fn drag_candidates(
    state: &CubieStore,
    camera: &Camera,
    gesture: &DragGesture,
    face: Face,
    prefs: &InteractionPreferences,
) -> SmallVec<[DragCandidate; 4]> {
    let Some(cubie) = state.try_get(gesture.cubie) else {
        return SmallVec::new();
    };
    let Some(drag_dir) = gesture.delta().normalize_or_none() else {
        return SmallVec::new();
    };

    let sticker = cubie.position.to_vector() + face.normal() * STICKER_OFFSET;
    let Some(sticker_on_screen) = camera.project_point_to_screen(sticker) else {
        return SmallVec::new();
    };

    MOVES
        .into_iter()
        .filter(|mv| mv.axis != face.axis() && cubie.position.get(mv.axis) == mv.slice)
        .filter_map(|mv| {
            let angle = mv.direction.to_float() * prefs.drag_probe_angle as Float;
            let nudged = Quat::from_axis_angle(mv.axis, angle).rotate(sticker);
            let motion = camera.project_point_to_screen(nudged)? - sticker_on_screen;
            let score = drag_dir.dot(motion.normalize_or_none()?);
            Some(DragCandidate { mv, score })
        })
        .collect()
}

/// Resolves a drag in screen space to a move, or returns `None` if the drag
/// is too short, starts on a face center or the core, or no candidate scores
/// strictly above the confidence threshold.
///
/// The result depends only on the puzzle state, camera, and gesture.
pub fn resolve_screen_drag(
    state: &CubieStore,
    camera: &Camera,
    gesture: &DragGesture,
    prefs: &InteractionPreferences,
) -> Option<Move> {
    if gesture.delta().magnitude() < prefs.drag_threshold {
        return None;
    }
    let position = state.try_get(gesture.cubie)?.position;
    if !is_draggable(position) {
        log::trace!("drag on {} cannot move anything", gesture.cubie);
        return None;
    }
    let face = match gesture.face {
        Some(face) => is_on_face(position, face).then_some(face)?,
        None => touched_face(camera, position, gesture.start)?,
    };

    let candidates = drag_candidates(state, camera, gesture, face, prefs);
    log::trace!("drag candidates on {face}: {candidates:?}");
    candidates
        .into_iter()
        .max_by_key(|c| FloatOrd(c.score))
        .filter(|c| c.score > prefs.drag_confidence_threshold)
        .map(|c| c.mv)
}

/// Resolves a drag given in world space to a move.
///
/// `normal` is the outward normal of the touched surface and `drag` is the
/// pointer motion projected into world space. Both are snapped to principal
/// axes. The rotation axis is `normal × drag` and the slice is the cubie's
/// coordinate along it; a drag that would turn the middle layer resolves to
/// `None`.
///
/// If `normal` lies exactly between two principal axes, the earlier axis wins,
/// so callers should pass a normal taken from an actual sticker.
pub fn resolve_world_drag(
    state: &CubieStore,
    cubie: CubieId,
    normal: Vector3,
    drag: Vector3,
    prefs: &InteractionPreferences,
) -> Option<Move> {
    let position = state.try_get(cubie)?.position;
    if !is_draggable(position) {
        return None;
    }
    let face = Face::nearest_to(normal)?;
    if !is_on_face(position, face) {
        return None;
    }

    let drag = drag.rejected_from_axis(face.axis());
    if drag.mag() < prefs.world_drag_threshold as Float {
        return None;
    }
    let drag_axis = drag.dominant_axis()?;
    let drag = drag_axis.unit() * Sign::from_float(drag[drag_axis])?.to_float();

    let rot = face.normal().cross(drag);
    let axis = rot.dominant_axis()?;
    let direction = Sign::from_float(rot[axis])?;
    let slice = position.get(axis);
    if slice == 0 {
        return None;
    }
    Move::lookup(axis, slice, direction)
}

trait NormalizeOrNone: Sized {
    fn normalize_or_none(self) -> Option<Self>;
}
impl NormalizeOrNone for cgmath::Vector2<f32> {
    fn normalize_or_none(self) -> Option<Self> {
        let mag = self.magnitude();
        (mag.is_normal() && mag > 0.0).then(|| self / mag)
    }
}
