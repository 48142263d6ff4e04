use std::ops::ControlFlow;

use log::trace;

use super::metamoves::MetaMove;
use crate::cube_state::CubeState;
use crate::face::Face;
use crate::goals::Oracle;
use crate::twisty_puzzle::TwistyPuzzle;

/// Called by the search between root-level branches, so that a host
/// (a browser tab, a UI thread) gets a chance to run or to cancel the solve.
pub trait SearchHook {
    /// `explored` counts the root branches tried so far in this stage.
    fn checkpoint(&mut self, stage: &str, explored: usize) -> ControlFlow<()>;
}

/// Yields the thread and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct YieldNow;

impl SearchHook for YieldNow {
    fn checkpoint(&mut self, _stage: &str, _explored: usize) -> ControlFlow<()> {
        std::thread::yield_now();
        ControlFlow::Continue(())
    }
}

impl<F> SearchHook for F
where
    F: FnMut(&str, usize) -> ControlFlow<()>,
{
    fn checkpoint(&mut self, stage: &str, explored: usize) -> ControlFlow<()> {
        self(stage, explored)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchError {
    DepthExceeded,
    Cancelled,
}

struct StateToExpand {
    state: CubeState,
    next_index: usize,
    // the move that led here, None at the root
    via: Option<usize>,
}

/// Iterative deepening over a fixed list of moves and macros.
pub(crate) struct Search<'a> {
    puzzle: &'a TwistyPuzzle,
    stage: &'a str,
    moves: &'a [MetaMove],
    faces: Vec<Option<Face>>,
    hook: &'a mut dyn SearchHook,
    yield_interval: usize,
    root_branches: usize,
    pub(crate) nodes: usize,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        puzzle: &'a TwistyPuzzle,
        stage: &'a str,
        moves: &'a [MetaMove],
        hook: &'a mut dyn SearchHook,
        yield_interval: usize,
    ) -> Self {
        Search {
            puzzle,
            stage,
            moves,
            faces: moves.iter().map(MetaMove::face).collect(),
            hook,
            yield_interval: yield_interval.max(1),
            root_branches: 0,
            nodes: 0,
        }
    }

    /// The shortest list of move indices (up to the redundancy pruning) that
    /// takes `start` to a state the oracle accepts.
    pub(crate) fn shortest(
        &mut self,
        start: &CubeState,
        oracle: &Oracle<'_>,
        max_depth: usize,
    ) -> Result<Vec<usize>, SearchError> {
        if oracle.check(start) {
            return Ok(vec![]);
        }
        for depth in 1..=max_depth {
            trace!("{}: searching depth {} ({} nodes so far)", self.stage, depth, self.nodes);
            if let Some(path) = self.depth_limited(start, oracle, depth)? {
                return Ok(path);
            }
        }
        Err(SearchError::DepthExceeded)
    }

    fn depth_limited(
        &mut self,
        start: &CubeState,
        oracle: &Oracle<'_>,
        depth: usize,
    ) -> Result<Option<Vec<usize>>, SearchError> {
        let mut fringe_stack = vec![StateToExpand {
            state: start.clone(),
            next_index: 0,
            via: None,
        }];

        while let Some(state_to_expand) = fringe_stack.last_mut() {
            let index = state_to_expand.next_index;
            if index >= self.moves.len() {
                fringe_stack.pop();
                continue;
            }
            state_to_expand.next_index += 1;

            if fringe_stack.len() == 1 {
                self.root_branch()?;
            }
            if self.is_redundant(&fringe_stack, index) {
                continue;
            }

            let parent = &fringe_stack[fringe_stack.len() - 1].state;
            let state = self
                .puzzle
                .get_derived_state(parent, &self.moves[index].face_map);
            self.nodes += 1;

            if oracle.check(&state) {
                let mut path: Vec<usize> = fringe_stack.iter().filter_map(|s| s.via).collect();
                path.push(index);
                return Ok(Some(path));
            }
            if fringe_stack.len() < depth {
                fringe_stack.push(StateToExpand {
                    state,
                    next_index: 0,
                    via: Some(index),
                });
            }
        }
        Ok(None)
    }

    fn root_branch(&mut self) -> Result<(), SearchError> {
        self.root_branches += 1;
        if self.root_branches % self.yield_interval == 0 {
            if let ControlFlow::Break(()) = self.hook.checkpoint(self.stage, self.root_branches) {
                return Err(SearchError::Cancelled);
            }
        }
        Ok(())
    }

    // Turning a face right after turning it again, or after turning only its
    // opposite face since, repeats a sequence already covered.
    fn is_redundant(&self, fringe_stack: &[StateToExpand], index: usize) -> bool {
        let Some(face) = self.faces[index] else {
            return false;
        };
        let face_of = |frame: &StateToExpand| frame.via.and_then(|via| self.faces[via]);
        let Some(previous) = fringe_stack.last().and_then(face_of) else {
            return false;
        };
        if previous == face {
            return true;
        }
        if fringe_stack.len() >= 2 && previous == face.opposite() {
            return face_of(&fringe_stack[fringe_stack.len() - 2]) == Some(face);
        }
        false
    }
}
