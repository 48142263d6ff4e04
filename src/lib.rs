pub mod bijection;
pub mod color;
pub mod config;
pub mod cube_state;
pub mod error;
pub mod face;
pub mod goals;
pub mod moves;
pub mod scramble;
pub mod session;
pub mod solver;
mod timing;
pub mod twisty_puzzle;
pub mod vector3d;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use color::Color;
pub use config::{Config, ScrambleOpts, SolverOpts};
pub use cube_state::{CubeState, Snapshot};
pub use error::CubeError;
pub use face::Face;
pub use moves::{Amount, Move, MoveSequence};
pub use scramble::generate_scramble;
pub use session::{CubeSession, SavedSession};
pub use solver::{Algorithm, CubeSolver, Playback, SearchHook, Solution, StageReport, YieldNow};
pub use twisty_puzzle::TwistyPuzzle;
#[cfg(target_arch = "wasm32")]
pub use wasm::WasmCube;
