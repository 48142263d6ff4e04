use crate::cube_state::CubeState;
use crate::moves::{Move, MoveSequence};

/// Replays a move sequence, yielding each move with the state it leaves
/// the cube in, for a renderer to animate one step at a time.
pub struct Playback {
    state: CubeState,
    moves: std::vec::IntoIter<Move>,
}

impl Playback {
    pub fn new(state: CubeState, moves: MoveSequence) -> Self {
        Playback {
            state,
            moves: moves.into_iter(),
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }
}

impl Iterator for Playback {
    type Item = (Move, CubeState);

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.moves.next()?;
        self.state = self.state.apply(mv);
        Some((mv, self.state.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.moves.size_hint()
    }
}

impl ExactSizeIterator for Playback {}
