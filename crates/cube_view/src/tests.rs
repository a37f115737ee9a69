use std::sync::Arc;

use cgmath::{InnerSpace, Point2, point2};
use cube_core::{CubieId, CubieStore, Face, LatticePoint, MOVES, Move, Quat, ScrambleParams, Vector3};
use cube_prefs::{AnimationPreferences, InteractionPreferences, InterpolateFn, Preferences};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use web_time::Duration;

use super::*;

const FRAME: Duration = Duration::from_micros(16_667);
const MAX_TICKS: usize = 100_000;

fn mv(name: &str) -> Move {
    Move::from_name(name).expect("bad move name")
}

fn cubie_at(state: &CubieStore, x: i8, y: i8, z: i8) -> CubieId {
    state
        .cubie_at(LatticePoint::new(x, y, z))
        .expect("no cubie there")
        .id
}

/// Ticks until the queue is empty and returns the number of ticks taken.
fn run_until_idle(sim: &mut PuzzleSimulation, prefs: &AnimationPreferences) -> usize {
    for i in 1..=MAX_TICKS {
        sim.tick(FRAME, prefs);
        if sim.queue_depth() == 0 {
            return i;
        }
    }
    panic!("simulation never became idle");
}

/// Ticks until the next move is committed and returns the number of ticks
/// taken.
fn ticks_until_commit(sim: &mut PuzzleSimulation, prefs: &AnimationPreferences) -> usize {
    for i in 1..=MAX_TICKS {
        if sim.tick(FRAME, prefs).completed.is_some() {
            return i;
        }
    }
    panic!("no move was committed");
}

fn record_moves(sim: &mut PuzzleSimulation) -> Arc<Mutex<Vec<Move>>> {
    let log = Arc::new(Mutex::new(vec![]));
    let log2 = Arc::clone(&log);
    sim.set_on_move_complete(Box::new(move |mv| log2.lock().push(*mv)));
    log
}

#[test]
fn test_quarter_turn_four_times_through_ticks() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    for _ in 0..4 {
        assert!(sim.enqueue_move("U1"));
    }
    run_until_idle(&mut sim, &prefs);
    assert!(sim.is_solved());
    assert!(sim.puzzle().iter().all(|c| c.is_home()));
    assert!(!sim.is_animating());
}

#[test]
fn test_move_then_inverse_through_ticks() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    sim.enqueue_move("R1");
    sim.enqueue_move("R2");
    run_until_idle(&mut sim, &prefs);
    assert!(sim.puzzle().iter().all(|c| c.is_home()));
}

#[test]
fn test_moves_commit_in_fifo_order() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    let log = record_moves(&mut sim);

    let keys = ["U1", "R1", "F2", "D1", "B2"];
    for key in keys {
        sim.enqueue_move(key);
    }
    assert_eq!(sim.queue_depth(), keys.len());
    run_until_idle(&mut sim, &prefs);

    let expected: Vec<Move> = keys.iter().map(|k| mv(k)).collect();
    assert_eq!(*log.lock(), expected);
    assert_eq!(*sim.puzzle(), CubieStore::new().do_moves(expected));
}

#[test]
fn test_state_changes_only_on_commit() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    let initial = sim.snapshot();
    sim.enqueue_move("F1");

    let mut commits = 0;
    for _ in 0..MAX_TICKS {
        let before = sim.snapshot();
        let result = sim.tick(FRAME, &prefs);
        match result.completed {
            Some(done) => {
                commits += 1;
                assert_eq!(done, mv("F1"));
                assert_eq!(*sim.puzzle(), before.do_move(done));
            }
            None => assert_eq!(*sim.puzzle(), *before),
        }
        if sim.queue_depth() == 0 {
            break;
        }
    }
    assert_eq!(commits, 1);
    // Earlier snapshots are never modified.
    assert_eq!(*initial, CubieStore::new());
}

#[test]
fn test_append_during_animation() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    let log = record_moves(&mut sim);

    sim.enqueue_move("U1");
    for _ in 0..3 {
        sim.tick(FRAME, &prefs);
    }
    assert!(sim.is_animating());
    let (current, t) = sim.current_move().expect("nothing animating");
    assert_eq!(current, mv("U1"));
    assert!(t > 0.0 && t < 1.0);

    sim.enqueue_move("L1");
    assert_eq!(sim.queued_moves(), vec![mv("U1"), mv("L1")]);
    run_until_idle(&mut sim, &prefs);
    assert_eq!(*log.lock(), vec![mv("U1"), mv("L1")]);
}

#[test]
fn test_grip_fixed_at_start_of_turn() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    sim.enqueue_move("R1");
    sim.tick(FRAME, &prefs);

    // The animating move's grip is the R slice of the state it started on.
    let grip = sim.puzzle().grip(mv("R1"));
    let moving: Vec<CubieId> = sim
        .render_data()
        .iter()
        .zip(sim.puzzle().iter())
        .filter(|(t, c)| t.position != c.position.to_vector())
        .map(|(t, _)| t.id)
        .collect();
    assert!(moving.iter().all(|&id| grip.contains(id)));
    // The center of the R face only spins in place.
    assert_eq!(moving.len(), 8);
}

#[test]
fn test_render_data_mid_turn() {
    let prefs = AnimationPreferences {
        twist_duration: 1.0,
        dynamic_twist_speed: false,
        twist_interpolation: InterpolateFn::Lerp,
    };
    let mut sim = PuzzleSimulation::new();
    let corner = cubie_at(sim.puzzle(), 1, 1, 1);
    let bottom = cubie_at(sim.puzzle(), 1, -1, 1);
    sim.enqueue_move("U1");
    sim.tick(Duration::from_millis(500), &prefs);

    let data = sim.render_data();
    assert_eq!(data.len(), cube_core::CUBIE_COUNT);
    let corner_tf = data[corner.index()];
    // Halfway through a quarter turn the corner sits between lattice points.
    assert!((corner_tf.position.y - 1.0).abs() < 1e-6);
    assert!((corner_tf.position.mag() - 3.0_f64.sqrt()).abs() < 1e-6);
    let off_lattice = |c: f64| (c - c.round()).abs() > 0.1;
    assert!(off_lattice(corner_tf.position.x) || off_lattice(corner_tf.position.z));
    assert!(!corner_tf.rotation.is_same_rotation(Quat::IDENT));

    let bottom_tf = data[bottom.index()];
    assert_eq!(bottom_tf.position, Vector3::new(1.0, -1.0, 1.0));
    assert_eq!(bottom_tf.rotation, Quat::IDENT);
}

#[test]
fn test_deep_queue_turns_faster() {
    let prefs = AnimationPreferences::default();

    let mut shallow = PuzzleSimulation::new();
    shallow.enqueue_move("U1");
    let shallow_ticks = ticks_until_commit(&mut shallow, &prefs);

    let mut deep = PuzzleSimulation::new();
    for _ in 0..10 {
        deep.enqueue_move("U1");
    }
    let deep_ticks = ticks_until_commit(&mut deep, &prefs);
    assert!(deep_ticks < shallow_ticks, "{deep_ticks} >= {shallow_ticks}");

    // Without dynamic speed, queue depth makes no difference.
    let fixed = AnimationPreferences {
        dynamic_twist_speed: false,
        ..prefs
    };
    let mut deep = PuzzleSimulation::new();
    for _ in 0..10 {
        deep.enqueue_move("U1");
    }
    assert_eq!(ticks_until_commit(&mut deep, &fixed), shallow_ticks);
}

#[test]
fn test_huge_frame_commits_one_move() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    sim.enqueue_move("U1");
    sim.enqueue_move("D1");
    let result = sim.tick(Duration::from_secs(60), &prefs);
    assert_eq!(result.completed, Some(mv("U1")));
    assert_eq!(sim.queue_depth(), 1);
    // The next move started in the same tick.
    assert_eq!(sim.current_move(), Some((mv("D1"), 0.0)));
}

#[test]
fn test_unknown_key_is_ignored() {
    let mut sim = PuzzleSimulation::new();
    assert!(!sim.enqueue_move("Q7"));
    assert!(!sim.enqueue_move(""));
    assert_eq!(sim.queue_depth(), 0);
    let result = sim.tick(FRAME, &AnimationPreferences::default());
    assert_eq!(result, TickResult::default());
}

#[test]
fn test_scramble_and_skip() {
    let mut sim = PuzzleSimulation::new();
    let log = record_moves(&mut sim);
    let moves = sim.scramble_with(&ScrambleParams::with_seed(25, "skip test"));
    assert_eq!(moves.len(), 25);
    assert_eq!(sim.queue_depth(), 25);

    sim.skip_animations();
    assert_eq!(sim.queue_depth(), 0);
    assert_eq!(*log.lock(), moves);
    assert_eq!(*sim.puzzle(), CubieStore::new().do_moves(moves));
    assert!(sim.puzzle().is_lattice_bijection());
}

#[test]
fn test_reset() {
    let prefs = AnimationPreferences::default();
    let mut sim = PuzzleSimulation::new();
    sim.scramble(10);
    for _ in 0..30 {
        sim.tick(FRAME, &prefs);
    }
    sim.reset();
    assert_eq!(sim.queue_depth(), 0);
    assert_eq!(*sim.puzzle(), CubieStore::new());
    assert!(sim.render_data().iter().all(|t| t.rotation == Quat::IDENT));
}

/// Builds a drag that moves the sticker on `face` of `cubie` exactly the way
/// `mv` would.
fn drag_for(camera: &Camera, state: &CubieStore, cubie: CubieId, face: Face, mv: Move) -> DragGesture {
    let sticker = state.get(cubie).position.to_vector() + face.normal() * 0.5;
    let nudged = Quat::from_axis_angle(mv.axis, mv.direction.to_float() * 0.1).rotate(sticker);
    let start = camera
        .project_point_to_screen(sticker)
        .expect("sticker not on screen");
    let dir = (camera.project_point_to_screen(nudged).expect("sticker not on screen") - start)
        .normalize();
    DragGesture {
        cubie,
        face: Some(face),
        start,
        end: start + dir * 50.0,
    }
}

#[test]
fn test_drag_resolves_to_intended_move() {
    let prefs = InteractionPreferences::default();
    let state = CubieStore::new();
    let camera = Camera::new([800, 600]);

    let mut checked = 0;
    for cubie in state.iter().filter(|c| c.position.nonzero_count() >= 2) {
        for face in Face::ALL {
            if cubie.position.get(face.axis()) != face.slice() {
                continue;
            }
            let sticker = cubie.position.to_vector() + face.normal() * 0.5;
            if !camera.is_facing_camera(sticker, face.normal()) {
                continue;
            }
            for m in MOVES {
                if m.axis == face.axis() || cubie.position.get(m.axis) != m.slice {
                    continue;
                }
                let gesture = drag_for(&camera, &state, cubie.id, face, m);
                assert_eq!(
                    resolve_screen_drag(&state, &camera, &gesture, &prefs),
                    Some(m),
                    "cubie {} face {face}",
                    cubie.id,
                );
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_drag_infers_touched_face() {
    let prefs = InteractionPreferences::default();
    let state = CubieStore::new();
    let camera = Camera::new([800, 600]);
    let corner = cubie_at(&state, 1, 1, 1);

    let mut gesture = drag_for(&camera, &state, corner, Face::U, mv("F1"));
    gesture.face = None;
    assert_eq!(
        drag::touched_face(&camera, state.get(corner).position, gesture.start),
        Some(Face::U),
    );
    assert_eq!(resolve_screen_drag(&state, &camera, &gesture, &prefs), Some(mv("F1")));
}

#[test]
fn test_drag_resolution_is_deterministic() {
    let prefs = InteractionPreferences::default();
    let state = CubieStore::new().do_moves([mv("R1"), mv("U2")]);
    let camera = Camera::new([640, 640]);
    let gesture = DragGesture {
        cubie: cubie_at(&state, 1, 1, 1),
        face: None,
        start: point2(400.0, 200.0),
        end: point2(460.0, 230.0),
    };
    let first = resolve_screen_drag(&state, &camera, &gesture, &prefs);
    for _ in 0..10 {
        assert_eq!(resolve_screen_drag(&state, &camera, &gesture, &prefs), first);
    }
}

#[test]
fn test_drag_on_center_or_core_does_nothing() {
    let prefs = InteractionPreferences::default();
    let state = CubieStore::new();
    let camera = Camera::new([800, 600]);

    for (id, face) in [
        (cubie_at(&state, 0, 1, 0), Some(Face::U)),
        (cubie_at(&state, 0, 0, 1), None),
        (cubie_at(&state, 0, 0, 0), None),
    ] {
        let gesture = DragGesture {
            cubie: id,
            face,
            start: point2(400.0, 300.0),
            end: point2(500.0, 300.0),
        };
        assert_eq!(resolve_screen_drag(&state, &camera, &gesture, &prefs), None);
    }
}

#[test]
fn test_short_or_mismatched_drag_does_nothing() {
    let prefs = InteractionPreferences::default();
    let state = CubieStore::new();
    let camera = Camera::new([800, 600]);
    let corner = cubie_at(&state, 1, 1, 1);

    let mut gesture = drag_for(&camera, &state, corner, Face::U, mv("R1"));
    gesture.end = gesture.start + (gesture.end - gesture.start).normalize() * 5.0;
    assert_eq!(resolve_screen_drag(&state, &camera, &gesture, &prefs), None);

    // The corner is not on the D face.
    let mut gesture = drag_for(&camera, &state, corner, Face::U, mv("R1"));
    gesture.face = Some(Face::D);
    assert_eq!(resolve_screen_drag(&state, &camera, &gesture, &prefs), None);
}

#[test]
fn test_world_drag() {
    let prefs = InteractionPreferences::default();
    let state = CubieStore::new();
    let up = Vector3::new(0.0, 1.0, 0.0);
    let front = Vector3::new(0.0, 0.0, 1.0);

    // Dragging the top of the front layer to the right turns it clockwise.
    let edge = cubie_at(&state, 0, 1, 1);
    let right = Vector3::new(1.0, 0.0, 0.0);
    assert_eq!(resolve_world_drag(&state, edge, up, right, &prefs), Some(mv("F1")));
    assert_eq!(resolve_world_drag(&state, edge, up, -right, &prefs), Some(mv("F2")));

    // Dragging the front of the top layer to the left turns it clockwise.
    let wobbly_left = Vector3::new(-1.0, 0.2, 0.3);
    assert_eq!(resolve_world_drag(&state, edge, front, wobbly_left, &prefs), Some(mv("U1")));

    // Dragging toward the back would turn the middle slice.
    let back = Vector3::new(0.0, 0.0, -1.0);
    assert_eq!(resolve_world_drag(&state, edge, up, back, &prefs), None);

    // Too short.
    assert_eq!(resolve_world_drag(&state, edge, up, right * 0.01, &prefs), None);

    // Wrong face, and a face center.
    assert_eq!(resolve_world_drag(&state, edge, -up, right, &prefs), None);
    let center = cubie_at(&state, 0, 1, 0);
    assert_eq!(resolve_world_drag(&state, center, up, right, &prefs), None);
}

fn corner_drag_points(view: &PuzzleView, m: Move) -> (CubieId, Point2<f32>, Point2<f32>) {
    let sim = view.sim.lock();
    let corner = cubie_at(sim.puzzle(), 1, 1, 1);
    let gesture = drag_for(&view.camera, sim.puzzle(), corner, Face::U, m);
    (corner, gesture.start, gesture.end)
}

#[test]
fn test_view_drag_queues_move() {
    let prefs = Preferences::default();
    let mut view = PuzzleView::default();
    view.camera.target_size = [800, 600];
    let (corner, start, end) = corner_drag_points(&view, mv("F1"));

    view.pointer_down(start, Some((corner, Some(Face::U))), &prefs);
    assert!(!view.orbit_enabled());
    let camera_before = view.camera;
    view.pointer_move(start + (end - start) * 0.5, &prefs);
    assert_eq!(view.drag_state(), Some(&DragState::Twisted(mv("F1"))));
    // The pointer is still held, so orbiting stays off.
    assert!(!view.orbit_enabled());
    view.pointer_move(end + cgmath::vec2(40.0, 40.0), &prefs);
    assert_eq!(view.camera, camera_before);
    assert_eq!(view.pointer_up(end, &prefs), Some(mv("F1")));
    assert!(view.orbit_enabled());
    assert_eq!(view.queue_depth(), 1);

    view.tick(Duration::from_secs(1), &prefs);
    assert_eq!(view.queue_depth(), 0);
    assert_eq!(
        *view.sim.lock().puzzle(),
        CubieStore::new().do_move(mv("F1"))
    );
}

#[test]
fn test_view_small_drag_does_nothing() {
    let prefs = Preferences::default();
    let mut view = PuzzleView::default();
    view.camera.target_size = [800, 600];
    let (corner, start, _) = corner_drag_points(&view, mv("F1"));

    view.pointer_down(start, Some((corner, None)), &prefs);
    assert_eq!(view.pointer_up(start + cgmath::vec2(5.0, 0.0), &prefs), None);
    assert_eq!(view.queue_depth(), 0);
}

#[test]
fn test_view_orbit() {
    let prefs = Preferences::default();
    let mut view = PuzzleView::default();
    view.camera.target_size = [800, 600];
    let rot_before = view.camera.rot();

    view.pointer_down(point2(10.0, 10.0), None, &prefs);
    assert_eq!(view.drag_state(), Some(&DragState::ViewRot));
    assert!(view.orbit_enabled());
    view.pointer_move(point2(60.0, 10.0), &prefs);
    assert_eq!(view.pointer_up(point2(60.0, 10.0), &prefs), None);
    assert!(view.camera.rot() != rot_before);
    assert_eq!(view.queue_depth(), 0);

    view.reset_camera();
    assert_eq!(view.camera.rot(), rot_before);
}

#[test]
fn test_view_manual_input_limit() {
    let prefs = Preferences::default();
    let mut view = PuzzleView::default();
    view.camera.target_size = [800, 600];
    let limit = prefs.interaction.manual_input_queue_limit;
    for _ in 0..=limit {
        view.enqueue_move("D1");
    }
    assert!(!view.manual_input_enabled(&prefs));

    let (corner, start, end) = corner_drag_points(&view, mv("F1"));
    view.pointer_down(start, Some((corner, Some(Face::U))), &prefs);
    assert_eq!(view.drag_state(), Some(&DragState::Canceled));
    assert!(!view.orbit_enabled());
    assert_eq!(view.pointer_up(end, &prefs), None);
    assert_eq!(view.queue_depth(), limit + 1);
}

#[test]
fn test_view_drag_uses_state_at_press() {
    let prefs = Preferences::default();
    let mut view = PuzzleView::default();
    view.camera.target_size = [800, 600];
    let (corner, start, end) = corner_drag_points(&view, mv("R1"));

    view.enqueue_move("U1");
    view.pointer_down(start, Some((corner, Some(Face::U))), &prefs);
    // U1 commits while the pointer is held, carrying the corner elsewhere.
    assert_eq!(view.tick(Duration::from_secs(1), &prefs).completed, Some(mv("U1")));
    assert_ne!(
        view.sim.lock().puzzle().get(corner).position,
        LatticePoint::new(1, 1, 1),
    );

    view.pointer_move(end, &prefs);
    assert_eq!(view.drag_state(), Some(&DragState::Twisted(mv("R1"))));
    assert_eq!(view.pointer_up(end, &prefs), Some(mv("R1")));
    assert_eq!(view.sim.lock().queued_moves(), vec![mv("R1")]);
}

#[test]
fn test_drag_score_must_exceed_confidence_threshold() {
    let state = CubieStore::new();
    let camera = Camera::new([800, 600]);
    let corner = cubie_at(&state, 1, 1, 1);
    let gesture = drag_for(&camera, &state, corner, Face::U, mv("F1"));

    let mut prefs = InteractionPreferences::default();
    let best = drag::drag_candidates(&state, &camera, &gesture, Face::U, &prefs)
        .into_iter()
        .map(|c| c.score)
        .fold(f32::NEG_INFINITY, f32::max);

    prefs.drag_confidence_threshold = best;
    assert_eq!(resolve_screen_drag(&state, &camera, &gesture, &prefs), None);
    prefs.drag_confidence_threshold = best - 0.01;
    assert_eq!(resolve_screen_drag(&state, &camera, &gesture, &prefs), Some(mv("F1")));
}
