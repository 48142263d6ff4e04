use std::collections::HashMap;
use std::sync::OnceLock;

use crate::bijection::Bijection;
use crate::color::Color;
use crate::cube_state::CubeState;
use crate::error::CubeError;
use crate::face::Face;
use crate::moves::{Move, MoveSequence};
use crate::vector3d::Vector3D;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 7;

static PUZZLES: [OnceLock<TwistyPuzzle>; MAX_SIZE - MIN_SIZE + 1] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Corner,
    Edge,
    Center,
}

/// Stickers that travel together because they sit on the same cubie.
#[derive(Debug, Clone)]
pub struct Piece {
    pub kind: PieceKind,
    /// Facelet indices, ascending
    pub facelets: Vec<usize>,
    faces: Vec<Face>,
    position: Vector3D,
}

impl Piece {
    pub fn touches(&self, face: Face) -> bool {
        self.faces.contains(&face)
    }
}

#[derive(Debug)]
pub(crate) struct Turn {
    // The indices of this vector are the new facelet indexes.
    // The values are the old facelet indexes to pull colors from.
    pub(crate) face_map: Bijection,
}

/// Where the solved color of each face is read from.
#[derive(Debug)]
enum Frame {
    /// One facelet per face that outer turns never move off that face.
    Centers([usize; 6]),
    /// 2x2: the down-left-back corner, which `<U, R, F>` never moves.
    Corner { down: usize, left: usize, back: usize },
}

/// The static structure of an NxN cube: facelet geometry, the face maps of
/// all 18 turns and the grouping of facelets into pieces.
#[derive(Debug)]
pub struct TwistyPuzzle {
    size: usize,
    positions: Vec<Vector3D>,
    pub(crate) turns: Vec<Turn>,
    pieces: Vec<Piece>,
    frame: Frame,
}

impl TwistyPuzzle {
    pub fn new(size: usize) -> Result<Self, CubeError> {
        check_size(size)?;
        Ok(Self::build(size))
    }

    /// Shared, lazily built puzzle for a size.
    pub fn for_size(size: usize) -> Result<&'static TwistyPuzzle, CubeError> {
        check_size(size)?;
        Ok(Self::cached(size))
    }

    /// Callers guarantee `size` was validated when their state was created.
    pub(crate) fn cached(size: usize) -> &'static TwistyPuzzle {
        PUZZLES[size - MIN_SIZE].get_or_init(|| Self::build(size))
    }

    fn build(size: usize) -> Self {
        let per_face = size * size;
        let mut positions = Vec::with_capacity(6 * per_face);
        for face in Face::ALL {
            for row in 0..size {
                for col in 0..size {
                    positions.push(face.facelet_position(size, row, col));
                }
            }
        }
        let index_at: HashMap<Vector3D, usize> = positions
            .iter()
            .enumerate()
            .map(|(i, position)| (*position, i))
            .collect();

        // Rotate every facelet of the outer layer and find which slot it lands in.
        // Turns are stored face by face as clockwise, half, counterclockwise.
        let layer_depth = size as i32 - 1;
        let mut turns = Vec::with_capacity(18);
        for face in Face::ALL {
            let normal = face.normal();
            let mut quarter = Bijection::identity(positions.len());
            for (source, position) in positions.iter().enumerate() {
                if position.dot(&normal) >= layer_depth {
                    let destination = index_at
                        .get(&position.rotate_quarter_turn(&normal))
                        .copied()
                        .unwrap_or(source);
                    quarter.0[destination] = source;
                }
            }
            let half = quarter.repeat(2);
            let counterclockwise = quarter.repeat(3);
            turns.push(Turn { face_map: quarter });
            turns.push(Turn { face_map: half });
            turns.push(Turn {
                face_map: counterclockwise,
            });
        }

        // Pieces decides which facelets are attached together
        let mut pieces_map: HashMap<Vector3D, Vec<usize>> = HashMap::new();
        for (i, position) in positions.iter().enumerate() {
            let cubie = position - &Face::from_index(i / per_face).normal();
            pieces_map.entry(cubie).or_default().push(i);
        }
        let mut pieces: Vec<Piece> = pieces_map
            .into_iter()
            .map(|(position, facelets)| Piece {
                kind: match facelets.len() {
                    3 => PieceKind::Corner,
                    2 => PieceKind::Edge,
                    _ => PieceKind::Center,
                },
                faces: facelets
                    .iter()
                    .map(|i| Face::from_index(i / per_face))
                    .collect(),
                facelets,
                position,
            })
            .collect();
        pieces.sort_unstable_by_key(|piece| piece.facelets[0]);

        let index = |face: Face, row: usize, col: usize| face.index() * per_face + row * size + col;
        let frame = if size == 2 {
            Frame::Corner {
                down: index(Face::D, 1, 0),
                left: index(Face::L, 1, 0),
                back: index(Face::B, 1, 1),
            }
        } else {
            Frame::Centers(Face::ALL.map(|face| index(face, size / 2, size / 2)))
        };

        Self {
            size,
            positions,
            turns,
            pieces,
            frame,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get_num_facelets(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn facelet_index(&self, face: Face, row: usize, col: usize) -> usize {
        face.index() * self.size * self.size + row * self.size + col
    }

    #[inline]
    pub fn face_of(&self, facelet: usize) -> Face {
        Face::from_index(facelet / (self.size * self.size))
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get_initial_state(&self) -> CubeState {
        let per_face = self.size * self.size;
        let facelets = (0..self.get_num_facelets())
            .map(|i| Face::from_index(i / per_face).home_color())
            .collect();
        CubeState::from_parts(self.size, facelets)
    }

    pub(crate) fn turn_face_map(&self, mv: Move) -> &Bijection {
        &self.turns[mv.index()].face_map
    }

    /// The combined face map of a whole move sequence.
    pub fn sequence_face_map(&self, moves: &MoveSequence) -> Bijection {
        moves
            .iter()
            .fold(Bijection::identity(self.get_num_facelets()), |combined, mv| {
                combined.apply(self.turn_face_map(*mv))
            })
    }

    pub fn get_derived_state(&self, previous_state: &CubeState, face_map: &Bijection) -> CubeState {
        CubeState::from_parts(self.size, face_map.permute(previous_state.facelets()))
    }

    pub fn get_derived_state_move(&self, previous_state: &CubeState, mv: Move) -> CubeState {
        self.get_derived_state(previous_state, self.turn_face_map(mv))
    }

    /// The color each face is solved towards in the given state.
    ///
    /// For 3x3 and larger these are the (inner) center colors. A 2x2 has no
    /// centers, so the down-left-back corner fixes three colors and the
    /// other three are their opposites.
    pub fn reference_colors(&self, facelets: &[Color]) -> [Color; 6] {
        match self.frame {
            Frame::Centers(centers) => centers.map(|i| facelets[i]),
            Frame::Corner { down, left, back } => {
                let (down, left, back) = (facelets[down], facelets[left], facelets[back]);
                [
                    down.opposite(),
                    left.opposite(),
                    back.opposite(),
                    down,
                    left,
                    back,
                ]
            }
        }
    }

    /// Facelets of each face that belong to center pieces, grouped by face.
    pub fn center_groups(&self) -> Vec<Vec<usize>> {
        Face::ALL
            .into_iter()
            .map(|face| {
                self.pieces
                    .iter()
                    .filter(|piece| piece.kind == PieceKind::Center && piece.touches(face))
                    .flat_map(|piece| piece.facelets.iter().copied())
                    .collect::<Vec<_>>()
            })
            .filter(|group| group.len() > 1)
            .collect()
    }

    /// For every physical edge of the cube and each of its two faces, the
    /// facelets of all edge pieces (wings) along it on that face.
    pub fn edge_groups(&self) -> Vec<Vec<usize>> {
        let outer = self.size as i32 - 1;
        let mut groups: HashMap<(Vector3D, Face), Vec<usize>> = HashMap::new();
        for piece in self.pieces.iter().filter(|p| p.kind == PieceKind::Edge) {
            let axis_of_travel = |v: i32| if v.abs() == outer { v } else { 0 };
            let key = Vector3D::new(
                axis_of_travel(piece.position.x),
                axis_of_travel(piece.position.y),
                axis_of_travel(piece.position.z),
            );
            for facelet in &piece.facelets {
                groups
                    .entry((key, self.face_of(*facelet)))
                    .or_default()
                    .push(*facelet);
            }
        }
        let mut groups: Vec<Vec<usize>> = groups
            .into_values()
            .filter(|group| group.len() > 1)
            .collect();
        groups.sort_unstable();
        groups
    }

    /// Samples rows and columns `0`, `N/2` and `N-1` of every face into a
    /// 3x3 state. On a cube whose centers and edges are consolidated this is
    /// the equivalent 3x3 cube, and outer turns act on both the same way.
    pub fn project_to_3x3(&self, state: &CubeState) -> CubeState {
        let samples = [0, self.size / 2, self.size - 1];
        let mut facelets = Vec::with_capacity(54);
        for face in Face::ALL {
            for row in samples {
                for col in samples {
                    facelets.push(state.facelets()[self.facelet_index(face, row, col)]);
                }
            }
        }
        CubeState::from_parts(3, facelets)
    }
}

fn check_size(size: usize) -> Result<(), CubeError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(CubeError::InvalidSizeRequest(size))
    }
}
