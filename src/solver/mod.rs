use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::SolverOpts;
use crate::cube_state::CubeState;
use crate::error::CubeError;
use crate::moves::MoveSequence;
use crate::timing::Stopwatch;
use crate::twisty_puzzle::TwistyPuzzle;

mod engine;
pub mod metamoves;
mod playback;
mod search;
pub mod stages;

use engine::{StageError, StageRunner};
pub use playback::Playback;
pub use search::{SearchHook, YieldNow};
use stages::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Layers first, then the last layer in two looks
    #[serde(alias = "kociemba")]
    Advanced,
    Beginner,
    /// Big cubes: group centers and edges, then solve as a 3x3
    Reduction,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Advanced, Algorithm::Beginner, Algorithm::Reduction];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Advanced => "advanced",
            Algorithm::Beginner => "beginner",
            Algorithm::Reduction => "reduction",
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Advanced
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CubeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = name.trim().to_ascii_lowercase();
        if wanted == "kociemba" {
            return Ok(Algorithm::Advanced);
        }
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or_else(|| CubeError::UnknownAlgorithm(name.to_string()))
    }
}

/// What one stage contributed to a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub name: String,
    pub description: String,
    pub moves: MoveSequence,
}

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// The algorithm that actually ran, which differs from the requested one
    /// when big cubes switch to reduction. A 2x2 has one pipeline and always
    /// reports advanced.
    pub algorithm: Algorithm,
    pub moves: MoveSequence,
    pub stages: Vec<StageReport>,
    /// Length before neighbouring turns of one face were merged
    pub unoptimized_length: usize,
    /// Sum of the stages' search ceilings
    pub move_ceiling: usize,
    pub elapsed: Duration,
}

impl Solution {
    /// Steps through the solution from `start`, one move at a time.
    pub fn playback(&self, start: &CubeState) -> Playback {
        Playback::new(start.clone(), self.moves.clone())
    }
}

/// Which stage lists a request runs, and on what.
struct Plan {
    algorithm: Algorithm,
    reduction: bool,
    stages: Vec<Stage>,
}

impl Plan {
    fn new(size: usize, requested: Algorithm) -> Result<Self, CubeError> {
        if size == 2 {
            if requested != Algorithm::Advanced {
                debug!("2x2 cube, {} runs the advanced pipeline", requested);
            }
            return Ok(Plan {
                algorithm: Algorithm::Advanced,
                reduction: false,
                stages: stages::pocket(TwistyPuzzle::for_size(2)?)?,
            });
        }
        let three = TwistyPuzzle::for_size(3)?;
        let algorithm = match requested {
            Algorithm::Advanced if size > 3 => {
                info!("{}x{} cube, switching to reduction", size, size);
                Algorithm::Reduction
            }
            other => other,
        };
        let stages = match algorithm {
            Algorithm::Beginner => stages::beginner(three)?,
            Algorithm::Advanced | Algorithm::Reduction => stages::advanced(three)?,
        };
        Ok(Plan {
            algorithm,
            reduction: size > 3 || algorithm == Algorithm::Reduction,
            stages,
        })
    }
}

/// Solves cubes by running their state through a list of stages.
#[derive(Debug, Clone, Default)]
pub struct CubeSolver {
    pub opts: SolverOpts,
}

impl CubeSolver {
    pub fn new(opts: SolverOpts) -> Self {
        CubeSolver { opts }
    }

    pub fn solve(&self, state: &CubeState, algorithm: Algorithm) -> Result<Solution, CubeError> {
        self.solve_with_hook(state, algorithm, &mut YieldNow)
    }

    /// Like [`CubeSolver::solve`], handing control to `hook` during long
    /// searches. A hook that breaks ends the solve with
    /// [`CubeError::Cancelled`].
    pub fn solve_with_hook<H: SearchHook>(
        &self,
        state: &CubeState,
        algorithm: Algorithm,
        hook: &mut H,
    ) -> Result<Solution, CubeError> {
        state.validate()?;
        let stopwatch = Stopwatch::start();
        let size = state.size();
        let plan = Plan::new(size, algorithm)?;

        if state.is_solved() {
            info!("{}x{} cube is already solved", size, size);
            return Ok(Solution {
                algorithm: plan.algorithm,
                moves: MoveSequence::new(),
                stages: vec![StageReport {
                    name: "already solved".to_string(),
                    description: "Nothing to do".to_string(),
                    moves: MoveSequence::new(),
                }],
                unoptimized_length: 0,
                move_ceiling: 0,
                elapsed: stopwatch.elapsed(),
            });
        }

        let mut progress = Progress {
            runner: StageRunner::new(&self.opts, hook),
            working: state.clone(),
            moves: MoveSequence::new(),
            reports: vec![],
            move_ceiling: 0,
        };

        if plan.reduction {
            for stage in stages::reduction(state.puzzle()) {
                let mut search_state = progress.working.clone();
                progress.run(&stage, &mut search_state)?;
            }
        }

        // the 3x3 stages see the corners, middle edges and centers of a
        // bigger cube, and their moves turn the same outer layers
        let mut search_state = match size {
            2 | 3 => progress.working.clone(),
            _ => state.puzzle().project_to_3x3(&progress.working),
        };
        for stage in &plan.stages {
            progress.run(stage, &mut search_state)?;
        }

        if !progress.working.is_solved() {
            return Err(CubeError::SolveFailed {
                stage: "verification".to_string(),
                partial: progress.moves,
            });
        }

        let optimized = progress.moves.optimized();
        info!(
            "solved {}x{} with {} in {} moves ({} before merging, {} nodes)",
            size,
            size,
            plan.algorithm,
            optimized.len(),
            progress.moves.len(),
            progress.runner.nodes
        );
        Ok(Solution {
            algorithm: plan.algorithm,
            unoptimized_length: progress.moves.len(),
            moves: optimized,
            stages: progress.reports,
            move_ceiling: progress.move_ceiling,
            elapsed: stopwatch.elapsed(),
        })
    }
}

struct Progress<'a> {
    runner: StageRunner<'a>,
    // the cube being solved, at its own size
    working: CubeState,
    moves: MoveSequence,
    reports: Vec<StageReport>,
    move_ceiling: usize,
}

impl Progress<'_> {
    /// Runs a stage on `search_state` and replays what it found on the cube.
    fn run(&mut self, stage: &Stage, search_state: &mut CubeState) -> Result<(), CubeError> {
        let found = match self.runner.run(stage, search_state) {
            Ok(found) => found,
            Err(StageError::Exhausted) => {
                return Err(CubeError::SolveFailed {
                    stage: stage.name.to_string(),
                    partial: self.moves.clone(),
                })
            }
            Err(StageError::Cancelled) => return Err(CubeError::Cancelled(stage.name.to_string())),
        };
        debug!("{}: {} moves ({})", stage.name, found.len(), found);
        self.working = self.working.apply_sequence(&found);
        self.moves.extend_from(&found);
        self.move_ceiling += stage.move_ceiling();
        self.reports.push(StageReport {
            name: stage.name.to_string(),
            description: stage.description.to_string(),
            moves: found,
        });
        Ok(())
    }
}
