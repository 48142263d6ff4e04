use crate::bijection::Bijection;
use crate::error::CubeError;
use crate::face::Face;
use crate::moves::{Amount, Move, MoveSequence};
use crate::twisty_puzzle::TwistyPuzzle;

// Corner into the down-front-right slot from the up-front-right corner,
// by where the down sticker faces: right, front, up.
pub const CORNER_FROM_RIGHT: &str = "R U R'";
pub const CORNER_FROM_FRONT: &str = "F' U' F";
pub const CORNER_FROM_UP: &str = "R U2 R' U' R U R'";

// Up-front edge into the front-right or front-left middle slot.
pub const EDGE_TO_RIGHT: &str = "U R U' R' U' F' U F";
pub const EDGE_TO_LEFT: &str = "U' L' U L U F U' F'";

pub const EDGE_FLIP_LINE: &str = "F R U R' U' F'";
pub const EDGE_FLIP_ANGLE: &str = "F U R U' R' F'";
pub const SUNE: &str = "R U R' U R U2 R'";
pub const ANTISUNE: &str = "R U2 R' U' R U' R'";
pub const OLL_PI: &str = "R U2 R2 U' R2 U' R2 U2 R";
pub const OLL_H: &str = "R U R' U R U' R' U R U2 R'";

pub const A_PERM: &str = "R' F R' B2 R F' R' B2 R2";
pub const U_PERM: &str = "R U' R U R U R U' R' U' R2";
pub const H_PERM: &str = "R2 U2 R U2 R2 U2 R2 U2 R U2 R2";
pub const T_PERM: &str = "R U R' U' R' F R2 U' R' U' R U R' F'";
pub const J_PERM: &str = "R U R' F' R U R' U' R' F R2 U' R'";
pub const Y_PERM: &str = "F R U' R' U' R U R' F' R U R' U' R' F R F'";

/// A metamove is a set of moves that combines to one large "move",
/// applied by the search in a single step.
#[derive(Debug, Clone)]
pub struct MetaMove {
    pub moves: MoveSequence,
    // The indices of this vector are the new facelet indexes.
    // The values are the old facelet indexes to pull colors from.
    pub face_map: Bijection,
}

impl MetaMove {
    pub fn new(puzzle: &TwistyPuzzle, moves: MoveSequence) -> Self {
        let face_map = puzzle.sequence_face_map(&moves);
        MetaMove { moves, face_map }
    }

    pub fn single(puzzle: &TwistyPuzzle, mv: Move) -> Self {
        MetaMove::new(puzzle, MoveSequence::from(vec![mv]))
    }

    pub fn parse(puzzle: &TwistyPuzzle, text: &str) -> Result<Self, CubeError> {
        Ok(MetaMove::new(puzzle, text.parse()?))
    }

    pub fn inverse(&self) -> Self {
        MetaMove {
            moves: self.moves.inverse(),
            face_map: self.face_map.invert(),
        }
    }

    /// The face of a plain face turn; macros have none.
    pub fn face(&self) -> Option<Face> {
        match self.moves.as_slice() {
            [mv] => Some(mv.face),
            _ => None,
        }
    }
}

/// Every quarter, half and inverse turn of the given faces.
pub fn face_turns(puzzle: &TwistyPuzzle, faces: &[Face]) -> Vec<MetaMove> {
    faces
        .iter()
        .flat_map(|face| Amount::ALL.into_iter().map(move |amount| Move::new(*face, amount)))
        .map(|mv| MetaMove::single(puzzle, mv))
        .collect()
}

/// An algorithm and its three copies seen from the other sides of the cube,
/// as if the whole cube were rotated about the vertical axis first.
pub fn around_y(puzzle: &TwistyPuzzle, text: &str) -> Result<Vec<MetaMove>, CubeError> {
    let mut moves: MoveSequence = text.parse()?;
    let mut rotations = Vec::with_capacity(4);
    for _ in 0..4 {
        rotations.push(MetaMove::new(puzzle, moves.clone()));
        moves = moves.relabeled(Face::rotated_about_y);
    }
    Ok(rotations)
}

/// An algorithm performed after each of the four `U` adjustments and then
/// undone from them, so it acts on the other positions of the top layer.
pub fn conjugated_by_up(puzzle: &TwistyPuzzle, text: &str) -> Result<Vec<MetaMove>, CubeError> {
    let moves: MoveSequence = text.parse()?;
    let mut conjugates = vec![MetaMove::new(puzzle, moves.clone())];
    for amount in Amount::ALL {
        let setup = MoveSequence::from(vec![Move::new(Face::U, amount)]);
        let conjugate = setup.concat(&moves).concat(&setup.inverse());
        conjugates.push(MetaMove::new(puzzle, conjugate));
    }
    Ok(conjugates)
}

/// An algorithm together with its inverse.
pub fn with_inverse(puzzle: &TwistyPuzzle, text: &str) -> Result<Vec<MetaMove>, CubeError> {
    let metamove = MetaMove::parse(puzzle, text)?;
    let inverse = metamove.inverse();
    Ok(vec![metamove, inverse])
}
