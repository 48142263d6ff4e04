use std::fmt;

use crate::cube_state::CubeState;
use crate::face::Face;
use crate::twisty_puzzle::{Piece, PieceKind, TwistyPuzzle};

/// A set of pieces, picked by where they live on the solved cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceGroup {
    /// Edges touching the face
    LayerEdges(Face),
    /// Corners touching the face
    LayerCorners(Face),
    /// Every piece the face turn moves
    Layer(Face),
    /// Edges between the face and its opposite
    EquatorEdges(Face),
}

impl PieceGroup {
    fn contains(self, piece: &Piece) -> bool {
        match self {
            PieceGroup::LayerEdges(face) => piece.kind == PieceKind::Edge && piece.touches(face),
            PieceGroup::LayerCorners(face) => {
                piece.kind == PieceKind::Corner && piece.touches(face)
            }
            PieceGroup::Layer(face) => piece.touches(face),
            PieceGroup::EquatorEdges(face) => {
                piece.kind == PieceKind::Edge
                    && !piece.touches(face)
                    && !piece.touches(face.opposite())
            }
        }
    }
}

impl fmt::Display for PieceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceGroup::LayerEdges(face) => write!(f, "{} edges", face),
            PieceGroup::LayerCorners(face) => write!(f, "{} corners", face),
            PieceGroup::Layer(face) => write!(f, "{} layer pieces", face),
            PieceGroup::EquatorEdges(face) => write!(f, "edges between {} and {}", face, face.opposite()),
        }
    }
}

/// Subgroups of the cube group that stages aim for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subgroup {
    /// `<U, D, R2, L2, F2, B2>`: corners and edges oriented relative to the
    /// U/D axis and the four middle-layer edges in the middle layer.
    Domino,
    /// Everything outside the face's layer is solved, so only the turns that
    /// rearrange that layer remain.
    LastLayer(Face),
}

/// A predicate on cube states, described declaratively so that stages can
/// list and report them. [`Goal::compile`] turns it into an [`Oracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Goal {
    /// Every face a single color
    Solved,
    /// All edges around the face solved
    CrossFormed(Face),
    /// Every piece of the face's layer solved
    LayerComplete(Face),
    PiecesSolved { group: PieceGroup, at_least: usize },
    /// The face's edge stickers show the face color
    EdgesOriented(Face),
    /// Every sticker of the face shows the face color
    FaceOriented(Face),
    Subgroup(Subgroup),
    /// Inner centers of each face share one color
    CentersConsolidated,
    /// Edge pieces along each physical edge match
    EdgesPaired,
    All(Vec<Goal>),
}

impl Goal {
    pub fn compile<'a>(&self, puzzle: &'a TwistyPuzzle) -> Oracle<'a> {
        let mut checks = vec![];
        self.add_checks(puzzle, &mut checks);
        Oracle { puzzle, checks }
    }

    fn add_checks(&self, puzzle: &TwistyPuzzle, checks: &mut Vec<Check>) {
        let with_faces = |facelets: &mut dyn Iterator<Item = usize>| -> Vec<(usize, usize)> {
            facelets
                .map(|facelet| (facelet, puzzle.face_of(facelet).index()))
                .collect()
        };
        let pieces = |include: &dyn Fn(&Piece) -> bool| -> Vec<(usize, usize)> {
            with_faces(
                &mut puzzle
                    .pieces()
                    .iter()
                    .filter(|piece| include(piece))
                    .flat_map(|piece| piece.facelets.iter().copied()),
            )
        };
        let on_face = |face: Face, include: &dyn Fn(&Piece) -> bool| -> Vec<(usize, usize)> {
            with_faces(
                &mut puzzle
                    .pieces()
                    .iter()
                    .filter(|piece| include(piece))
                    .flat_map(|piece| piece.facelets.iter().copied())
                    .filter(|facelet| puzzle.face_of(*facelet) == face),
            )
        };
        let face_facelets = |face: Face| -> Vec<usize> {
            let per_face = puzzle.size() * puzzle.size();
            (face.index() * per_face..(face.index() + 1) * per_face).collect()
        };

        match self {
            Goal::Solved => {
                checks.push(Check::Uniform(Face::ALL.map(face_facelets).to_vec()));
            }
            Goal::CrossFormed(face) => {
                let face = *face;
                checks.push(Check::MatchesFrame(pieces(&|piece: &Piece| {
                    piece.kind == PieceKind::Edge && piece.touches(face)
                })));
            }
            Goal::LayerComplete(face) => {
                let face = *face;
                checks.push(Check::MatchesFrame(pieces(&|piece: &Piece| piece.touches(face))));
            }
            Goal::PiecesSolved { group, at_least } => {
                let group = *group;
                let members: Vec<Vec<(usize, usize)>> = puzzle
                    .pieces()
                    .iter()
                    .filter(|piece| group.contains(piece))
                    .map(|piece| with_faces(&mut piece.facelets.iter().copied()))
                    .collect();
                checks.push(Check::PiecesSolved {
                    at_least: (*at_least).min(members.len()),
                    pieces: members,
                });
            }
            Goal::EdgesOriented(face) => {
                checks.push(Check::MatchesFrame(on_face(*face, &|piece: &Piece| {
                    piece.kind == PieceKind::Edge
                })));
            }
            Goal::FaceOriented(face) => {
                checks.push(Check::MatchesFrame(with_faces(
                    &mut face_facelets(*face).into_iter(),
                )));
            }
            Goal::Subgroup(Subgroup::Domino) => {
                let mut up_down = face_facelets(Face::U);
                up_down.extend(face_facelets(Face::D));
                checks.push(Check::ColorsIn {
                    facelets: up_down,
                    faces: [Face::U.index(), Face::D.index()],
                });
                let middle_edges = |piece: &Piece| {
                    PieceGroup::EquatorEdges(Face::U).contains(piece)
                };
                let mut front_back: Vec<usize> = on_face(Face::F, &middle_edges)
                    .into_iter()
                    .map(|(facelet, _)| facelet)
                    .collect();
                front_back.extend(
                    on_face(Face::B, &middle_edges)
                        .into_iter()
                        .map(|(facelet, _)| facelet),
                );
                checks.push(Check::ColorsIn {
                    facelets: front_back,
                    faces: [Face::F.index(), Face::B.index()],
                });
            }
            Goal::Subgroup(Subgroup::LastLayer(face)) => {
                let face = *face;
                checks.push(Check::MatchesFrame(pieces(&|piece: &Piece| !piece.touches(face))));
            }
            Goal::CentersConsolidated => checks.push(Check::Uniform(puzzle.center_groups())),
            Goal::EdgesPaired => checks.push(Check::Uniform(puzzle.edge_groups())),
            Goal::All(goals) => {
                for goal in goals {
                    goal.add_checks(puzzle, checks);
                }
            }
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Solved => write!(f, "solved"),
            Goal::CrossFormed(face) => write!(f, "{} cross", face),
            Goal::LayerComplete(face) => write!(f, "{} layer", face),
            Goal::PiecesSolved { group, at_least } => write!(f, "{} of the {}", at_least, group),
            Goal::EdgesOriented(face) => write!(f, "{} edges oriented", face),
            Goal::FaceOriented(face) => write!(f, "{} face oriented", face),
            Goal::Subgroup(Subgroup::Domino) => write!(f, "<U, D, R2, L2, F2, B2>"),
            Goal::Subgroup(Subgroup::LastLayer(face)) => write!(f, "all but {} layer", face),
            Goal::CentersConsolidated => write!(f, "centers consolidated"),
            Goal::EdgesPaired => write!(f, "edges paired"),
            Goal::All(goals) => {
                for (i, goal) in goals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", goal)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug)]
enum Check {
    /// Each group shows one color
    Uniform(Vec<Vec<usize>>),
    /// `(facelet, face index)` pairs that must show their face's color
    MatchesFrame(Vec<(usize, usize)>),
    PiecesSolved {
        pieces: Vec<Vec<(usize, usize)>>,
        at_least: usize,
    },
    /// Facelets showing the color of one of two faces
    ColorsIn {
        facelets: Vec<usize>,
        faces: [usize; 2],
    },
}

/// A compiled [`Goal`]: plain index lists, checked without allocating.
#[derive(Debug)]
pub struct Oracle<'a> {
    puzzle: &'a TwistyPuzzle,
    checks: Vec<Check>,
}

impl Oracle<'_> {
    pub fn check(&self, state: &CubeState) -> bool {
        let facelets = state.facelets();
        let frame = self.puzzle.reference_colors(facelets);
        let matches = |&(facelet, face): &(usize, usize)| facelets[facelet] == frame[face];
        self.checks.iter().all(|check| match check {
            Check::Uniform(groups) => groups
                .iter()
                .all(|group| group.iter().all(|i| facelets[*i] == facelets[group[0]])),
            Check::MatchesFrame(indices) => indices.iter().all(matches),
            Check::PiecesSolved { pieces, at_least } => {
                pieces
                    .iter()
                    .filter(|piece| piece.iter().all(matches))
                    .take(*at_least)
                    .count()
                    == *at_least
            }
            Check::ColorsIn { facelets: indices, faces } => indices.iter().all(|i| {
                facelets[*i] == frame[faces[0]] || facelets[*i] == frame[faces[1]]
            }),
        })
    }
}
