use log::{debug, trace, warn};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::metamoves::MetaMove;
use super::search::{Search, SearchError, SearchHook};
use super::stages::Stage;
use crate::config::SolverOpts;
use crate::cube_state::CubeState;
use crate::goals::Oracle;
use crate::moves::MoveSequence;
use crate::twisty_puzzle::TwistyPuzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StageError {
    /// Every tier ran out of attempts
    Exhausted,
    Cancelled,
}

/// Drives a cube through the milestones of one stage at a time.
pub(crate) struct StageRunner<'a> {
    opts: &'a SolverOpts,
    hook: &'a mut dyn SearchHook,
    rng: ChaCha8Rng,
    pub(crate) nodes: usize,
}

impl<'a> StageRunner<'a> {
    pub(crate) fn new(opts: &'a SolverOpts, hook: &'a mut dyn SearchHook) -> Self {
        StageRunner {
            opts,
            hook,
            rng: ChaCha8Rng::seed_from_u64(opts.seed),
            nodes: 0,
        }
    }

    /// The moves that take `state` through every milestone of the stage,
    /// with `state` left at the end of them.
    pub(crate) fn run(
        &mut self,
        stage: &Stage,
        state: &mut CubeState,
    ) -> Result<MoveSequence, StageError> {
        let puzzle = state.puzzle();
        let mut moves = MoveSequence::new();
        for goal in &stage.milestones {
            let oracle = goal.compile(puzzle);
            let found = self.reach(puzzle, stage, &oracle, state)?;
            trace!("{}: {} after {}", stage.name, goal, found);
            *state = state.apply_sequence(&found);
            moves.extend_from(&found);
        }
        Ok(moves)
    }

    fn reach(
        &mut self,
        puzzle: &TwistyPuzzle,
        stage: &Stage,
        oracle: &Oracle<'_>,
        state: &CubeState,
    ) -> Result<MoveSequence, StageError> {
        match self.search(puzzle, stage, oracle, state, stage.max_depth) {
            Ok(found) => return Ok(found),
            Err(SearchError::Cancelled) => return Err(StageError::Cancelled),
            Err(SearchError::DepthExceeded) => {}
        }

        if stage.patterns.is_empty() {
            debug!("{}: no patterns to retry with", stage.name);
        } else {
            warn!("{}: depth {} exhausted, retrying with patterns", stage.name, stage.max_depth);
            let patterns = stage.patterns.iter().cycle().take(self.opts.macro_attempts);
            if let Some(found) = self.walk(puzzle, stage, oracle, state, patterns)? {
                return Ok(found);
            }
        }

        warn!("{}: patterns exhausted, trying a random walk", stage.name);
        let steps: Vec<&MetaMove> = (0..self.opts.random_walk_attempts)
            .map(|_| &stage.moves[self.rng.gen_range(0..stage.moves.len())])
            .collect();
        if let Some(found) = self.walk(puzzle, stage, oracle, state, steps.into_iter())? {
            return Ok(found);
        }
        Err(StageError::Exhausted)
    }

    /// Applies the steps one after another, trying a shallow search after
    /// each of them.
    fn walk<'m>(
        &mut self,
        puzzle: &TwistyPuzzle,
        stage: &Stage,
        oracle: &Oracle<'_>,
        state: &CubeState,
        steps: impl Iterator<Item = &'m MetaMove>,
    ) -> Result<Option<MoveSequence>, StageError> {
        let mut current = state.clone();
        let mut applied = MoveSequence::new();
        for step in steps {
            current = puzzle.get_derived_state(&current, &step.face_map);
            applied.extend_from(&step.moves);
            match self.search(puzzle, stage, oracle, &current, self.opts.retry_depth) {
                Ok(found) => return Ok(Some(applied.concat(&found))),
                Err(SearchError::Cancelled) => return Err(StageError::Cancelled),
                Err(SearchError::DepthExceeded) => {}
            }
        }
        Ok(None)
    }

    fn search(
        &mut self,
        puzzle: &TwistyPuzzle,
        stage: &Stage,
        oracle: &Oracle<'_>,
        state: &CubeState,
        max_depth: usize,
    ) -> Result<MoveSequence, SearchError> {
        let mut search = Search::new(
            puzzle,
            stage.name,
            &stage.moves,
            &mut *self.hook,
            self.opts.yield_interval,
        );
        let result = search.shortest(state, oracle, max_depth);
        self.nodes += search.nodes;
        let path = result?;
        let mut found = MoveSequence::new();
        for index in path {
            found.extend_from(&stage.moves[index].moves);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::face::Face;
    use crate::goals::Goal;
    use crate::solver::metamoves::{face_turns, SUNE};
    use crate::solver::search::YieldNow;

    fn stage(moves: Vec<MetaMove>, patterns: Vec<MetaMove>, max_depth: usize) -> Stage {
        Stage {
            name: "test",
            description: "",
            milestones: vec![Goal::FaceOriented(Face::U), Goal::Solved],
            moves,
            patterns,
            max_depth,
        }
    }

    fn scrambled(moves: &str) -> CubeState {
        CubeState::solved(3)
            .unwrap()
            .apply_sequence(&moves.parse::<MoveSequence>().unwrap())
    }

    #[test]
    fn test_milestones_in_order() {
        let puzzle = TwistyPuzzle::for_size(3).unwrap();
        let stage = stage(face_turns(puzzle, &Face::ALL), vec![], 4);
        let opts = SolverOpts::default();
        let mut hook = YieldNow;
        let mut runner = StageRunner::new(&opts, &mut hook);
        let mut state = scrambled("R U");
        let moves = runner.run(&stage, &mut state).unwrap();
        assert_eq!(moves.to_string(), "U' R'");
        assert!(state.is_solved());
    }

    #[test]
    fn test_patterns_rescue_a_shallow_search() {
        let puzzle = TwistyPuzzle::for_size(3).unwrap();
        let sune = MetaMove::parse(puzzle, SUNE).unwrap();
        // only U turns can be searched, so the Sune has to come from the patterns
        let stage = stage(face_turns(puzzle, &[Face::U]), vec![sune.clone(), sune], 2);
        let opts = SolverOpts::default();
        let mut hook = YieldNow;
        let mut runner = StageRunner::new(&opts, &mut hook);
        let mut state = scrambled("R U2 R' U' R U' R'");
        let moves = runner.run(&stage, &mut state).unwrap();
        assert!(state.is_solved());
        assert_eq!(moves.to_string(), SUNE);
    }

    #[test]
    fn test_random_walk_reaches_the_goal() {
        let puzzle = TwistyPuzzle::for_size(3).unwrap();
        // no search depth and no patterns, so only the walk can turn U back
        let stage = stage(face_turns(puzzle, &[Face::U]), vec![], 0);
        let opts = SolverOpts {
            retry_depth: 0,
            ..SolverOpts::default()
        };
        let walk = || {
            let mut hook = YieldNow;
            let mut runner = StageRunner::new(&opts, &mut hook);
            let mut state = scrambled("U");
            let moves = runner.run(&stage, &mut state).unwrap();
            assert!(state.is_solved());
            moves
        };

        let first = walk();
        assert!(!first.is_empty());
        assert!(first.iter().all(|mv| mv.face == Face::U));
        assert_eq!(first, walk());
    }

    #[test]
    fn test_exhausted() {
        let puzzle = TwistyPuzzle::for_size(3).unwrap();
        let stage = stage(face_turns(puzzle, &[Face::U]), vec![], 3);
        let opts = SolverOpts {
            random_walk_attempts: 20,
            ..SolverOpts::default()
        };
        let mut hook = YieldNow;
        let mut runner = StageRunner::new(&opts, &mut hook);
        let mut state = scrambled("R");
        assert_eq!(runner.run(&stage, &mut state), Err(StageError::Exhausted));
    }

    #[test]
    fn test_cancelled() {
        let puzzle = TwistyPuzzle::for_size(3).unwrap();
        let stage = stage(face_turns(puzzle, &Face::ALL), vec![], 6);
        let opts = SolverOpts::default();
        let mut hook = |_stage: &str, _explored: usize| -> ControlFlow<()> { ControlFlow::Break(()) };
        let mut runner = StageRunner::new(&opts, &mut hook);
        let mut state = scrambled("R U F");
        assert_eq!(runner.run(&stage, &mut state), Err(StageError::Cancelled));
    }
}
