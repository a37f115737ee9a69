use std::path::PathBuf;
use std::sync::Arc;

use cgmath::point2;
use cube_core::notation::{format_moves, parse_moves};
use cube_core::{CubieStore, DEFAULT_SCRAMBLE_LENGTH, Face, LatticePoint, MOVES, Move, ScrambleParams};
use cube_prefs::Preferences;
use cube_view::{Camera, DragGesture, PuzzleSimulation, resolve_screen_drag};
use eyre::{Context, OptionExt, Result, eyre};
use parking_lot::Mutex;
use serde::Serialize;
use web_time::Duration;

/// Cube turn engine command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the move table as JSON.
    Moves,
    /// Generate a scramble and print it as JSON.
    Scramble {
        /// Number of moves.
        #[arg(short, long, default_value_t = DEFAULT_SCRAMBLE_LENGTH)]
        count: u32,
        /// Random seed. A fresh seed is chosen if this is omitted.
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Animate a move sequence at a fixed frame rate and print the final
    /// state as JSON.
    Play {
        /// Moves to play, such as "R1 U1 R2 U2".
        moves: String,
        /// Seed of a scramble to queue before the moves.
        #[arg(long)]
        scramble: Option<String>,
        /// Frames per second of the simulated clock.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Preferences file to load on top of the defaults.
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Resolve a screen-space drag on a cubie to a move.
    Resolve {
        /// Lattice coordinates of the cubie.
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        cubie: Vec<i8>,
        /// Touched face, such as `U`. Inferred from the drag start if omitted.
        #[arg(long)]
        face: Option<Face>,
        /// Drag start, in pixels.
        #[arg(long, num_args = 2, value_names = ["X", "Y"])]
        from: Vec<f32>,
        /// Drag end, in pixels.
        #[arg(long, num_args = 2, value_names = ["X", "Y"])]
        to: Vec<f32>,
        /// Width and height of the view, in pixels.
        #[arg(long, num_args = 2, value_names = ["W", "H"], default_values_t = [800, 600])]
        size: Vec<u32>,
        /// Camera yaw in radians. The default camera is used if omitted.
        #[arg(long, requires = "pitch", allow_negative_numbers = true)]
        yaw: Option<f32>,
        /// Camera pitch in radians.
        #[arg(long, requires = "yaw", allow_negative_numbers = true)]
        pitch: Option<f32>,
        /// Preferences file to load on top of the defaults.
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
}

#[derive(Serialize, Debug)]
struct ScrambleOutput {
    seed: String,
    moves: String,
}

#[derive(Serialize, Debug)]
struct PlayOutput {
    moves: String,
    ticks: usize,
    solved: bool,
    state: CubieStore,
}

#[derive(Serialize, Debug)]
struct ResolveOutput {
    cubie: String,
    resolved: Option<Move>,
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Moves => write_json_output(&MOVES),

        Subcommand::Scramble { count, seed } => {
            let params = match seed {
                Some(seed) => ScrambleParams::with_seed(count, seed),
                None => ScrambleParams::new(count),
            };
            let moves = params.generate();
            write_json_output(&ScrambleOutput {
                seed: params.seed,
                moves: format_moves(moves),
            })
        }

        Subcommand::Play {
            moves,
            scramble,
            fps,
            prefs,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(eyre!("frame rate must be positive, not {fps}"));
            }
            let prefs = Preferences::load(prefs.as_deref());
            let moves = parse_moves(&moves).wrap_err("error parsing moves")?;

            let mut sim = PuzzleSimulation::new();
            let played = Arc::new(Mutex::new(vec![]));
            let played2 = Arc::clone(&played);
            sim.set_on_move_complete(Box::new(move |mv| {
                log::info!("completed {mv}");
                played2.lock().push(*mv);
            }));

            if let Some(seed) = scramble {
                let params = ScrambleParams::with_seed(DEFAULT_SCRAMBLE_LENGTH, seed);
                sim.scramble_with(&params);
            }
            sim.enqueue_all(moves);

            let frame = Duration::from_secs_f32(1.0 / fps);
            let mut ticks = 0;
            while sim.queue_depth() > 0 {
                sim.tick(frame, &prefs.animation);
                ticks += 1;
            }

            let played = played.lock().clone();
            write_json_output(&PlayOutput {
                moves: format_moves(played),
                ticks,
                solved: sim.is_solved(),
                state: sim.puzzle().clone(),
            })
        }

        Subcommand::Resolve {
            cubie,
            face,
            from,
            to,
            size,
            yaw,
            pitch,
            prefs,
        } => {
            let prefs = Preferences::load(prefs.as_deref());
            let state = CubieStore::new();
            let [x, y, z] = <[i8; 3]>::try_from(cubie)
                .map_err(|_| eyre!("cubie needs three coordinates"))?;
            let position = LatticePoint::new(x, y, z);
            let cubie = state
                .cubie_at(position)
                .ok_or_eyre("cubie coordinates must each be -1, 0, or 1")?
                .id;

            let [w, h] = pair(size, "size")?;
            let camera = match Option::zip(yaw, pitch) {
                Some((yaw, pitch)) => Camera::with_yaw_pitch([w, h], yaw, pitch),
                None => Camera::new([w, h]),
            };

            let [x0, y0] = pair(from, "from")?;
            let [x1, y1] = pair(to, "to")?;
            let gesture = DragGesture {
                cubie,
                face,
                start: point2(x0, y0),
                end: point2(x1, y1),
            };
            let resolved = resolve_screen_drag(&state, &camera, &gesture, &prefs.interaction);
            write_json_output(&ResolveOutput {
                cubie: position.to_string(),
                resolved,
            })
        }
    }
}

fn pair<T: std::fmt::Debug>(values: Vec<T>, name: &str) -> Result<[T; 2]> {
    <[T; 2]>::try_from(values).map_err(|v| eyre!("{name} needs two values, got {v:?}"))
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
