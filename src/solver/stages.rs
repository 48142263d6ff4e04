use super::metamoves::*;
use crate::error::CubeError;
use crate::face::Face;
use crate::goals::{Goal, PieceGroup, Subgroup};
use crate::moves::MoveSequence;
use crate::twisty_puzzle::TwistyPuzzle;

/// One step of a solving method.
///
/// The search reaches the milestones in order, each one from where the
/// previous left off; the last milestone is the goal of the stage. Splitting
/// a stage into milestones keeps every individual search shallow.
#[derive(Debug, Clone)]
pub struct Stage {
    pub name: &'static str,
    pub description: &'static str,
    pub milestones: Vec<Goal>,
    /// What the search may apply, turns and macros alike
    pub moves: Vec<MetaMove>,
    /// Macros to fall back to once the search runs out of depth
    pub patterns: Vec<MetaMove>,
    pub max_depth: usize,
}

impl Stage {
    fn new(
        name: &'static str,
        description: &'static str,
        milestones: Vec<Goal>,
        moves: Vec<MetaMove>,
        max_depth: usize,
    ) -> Self {
        let patterns = moves.iter().filter(|m| m.face().is_none()).cloned().collect();
        Stage {
            name,
            description,
            milestones,
            moves,
            patterns,
            max_depth,
        }
    }

    /// The most moves the exhaustive search can produce for this stage.
    pub fn move_ceiling(&self) -> usize {
        let longest = self.moves.iter().map(|m| m.moves.len()).max().unwrap_or(0);
        self.milestones.len() * self.max_depth * longest
    }
}

fn at_least(group: PieceGroup, at_least: usize) -> Goal {
    Goal::PiecesSolved { group, at_least }
}

/// `count` milestones, each needing one more piece of the group than the last.
fn one_at_a_time(keep: &[Goal], group: PieceGroup, count: usize) -> Vec<Goal> {
    (1..=count)
        .map(|n| {
            let mut goals = keep.to_vec();
            goals.push(at_least(group, n));
            Goal::All(goals)
        })
        .collect()
}

fn concat(parts: Vec<Vec<MetaMove>>) -> Vec<MetaMove> {
    parts.into_iter().flatten().collect()
}

fn cross(puzzle: &TwistyPuzzle) -> Stage {
    let mut milestones = one_at_a_time(&[], PieceGroup::LayerEdges(Face::D), 3);
    milestones.push(Goal::CrossFormed(Face::D));
    Stage::new(
        "cross",
        "Solve the four bottom edges",
        milestones,
        face_turns(puzzle, &Face::ALL),
        7,
    )
}

fn first_layer_corners(puzzle: &TwistyPuzzle, name: &'static str) -> Result<Stage, CubeError> {
    let cross = Goal::CrossFormed(Face::D);
    let mut milestones = one_at_a_time(&[cross], PieceGroup::LayerCorners(Face::D), 3);
    milestones.push(Goal::LayerComplete(Face::D));
    Ok(Stage::new(
        name,
        "Insert the four bottom corners",
        milestones,
        concat(vec![
            face_turns(puzzle, &[Face::U]),
            around_y(puzzle, CORNER_FROM_RIGHT)?,
            around_y(puzzle, CORNER_FROM_FRONT)?,
            around_y(puzzle, CORNER_FROM_UP)?,
        ]),
        5,
    ))
}

fn middle_layer(puzzle: &TwistyPuzzle, name: &'static str) -> Result<Stage, CubeError> {
    let first_layer = Goal::LayerComplete(Face::D);
    let mut milestones = one_at_a_time(&[first_layer], PieceGroup::EquatorEdges(Face::U), 3);
    milestones.push(Goal::Subgroup(Subgroup::LastLayer(Face::U)));
    Ok(Stage::new(
        name,
        "Insert the four middle edges",
        milestones,
        concat(vec![
            face_turns(puzzle, &[Face::U]),
            around_y(puzzle, EDGE_TO_RIGHT)?,
            around_y(puzzle, EDGE_TO_LEFT)?,
        ]),
        4,
    ))
}

fn last_layer(extra: Vec<Goal>) -> Goal {
    let mut goals = vec![Goal::Subgroup(Subgroup::LastLayer(Face::U))];
    goals.extend(extra);
    Goal::All(goals)
}

/// Cross, first layer, second layer, then the last layer in two looks.
pub fn advanced(puzzle: &TwistyPuzzle) -> Result<Vec<Stage>, CubeError> {
    Ok(vec![
        cross(puzzle),
        first_layer_corners(puzzle, "first layer")?,
        middle_layer(puzzle, "second layer")?,
        Stage::new(
            "orient last layer",
            "Turn every top sticker up",
            vec![last_layer(vec![Goal::Subgroup(Subgroup::Domino)])],
            concat(vec![
                face_turns(puzzle, &[Face::U]),
                vec![
                    MetaMove::parse(puzzle, EDGE_FLIP_LINE)?,
                    MetaMove::parse(puzzle, EDGE_FLIP_ANGLE)?,
                    MetaMove::parse(puzzle, SUNE)?,
                    MetaMove::parse(puzzle, ANTISUNE)?,
                    MetaMove::parse(puzzle, OLL_PI)?,
                    MetaMove::parse(puzzle, OLL_H)?,
                ],
            ]),
            7,
        ),
        Stage::new(
            "permute last layer",
            "Move the top pieces into place",
            vec![Goal::Solved],
            concat(vec![
                face_turns(puzzle, &[Face::U]),
                with_inverse(puzzle, A_PERM)?,
                with_inverse(puzzle, U_PERM)?,
                vec![
                    MetaMove::parse(puzzle, H_PERM)?,
                    MetaMove::parse(puzzle, T_PERM)?,
                    MetaMove::parse(puzzle, J_PERM)?,
                    MetaMove::parse(puzzle, Y_PERM)?,
                ],
            ]),
            6,
        ),
    ])
}

/// The layer-by-layer method with a seven step last layer.
pub fn beginner(puzzle: &TwistyPuzzle) -> Result<Vec<Stage>, CubeError> {
    let corners_in_place = at_least(PieceGroup::LayerCorners(Face::U), 4);
    let u_perm_inverse = U_PERM.parse::<MoveSequence>()?.inverse().to_string();
    Ok(vec![
        cross(puzzle),
        first_layer_corners(puzzle, "first layer corners")?,
        middle_layer(puzzle, "middle layer")?,
        Stage::new(
            "top cross",
            "Flip the top edges up",
            vec![last_layer(vec![Goal::EdgesOriented(Face::U)])],
            concat(vec![
                face_turns(puzzle, &[Face::U]),
                vec![
                    MetaMove::parse(puzzle, EDGE_FLIP_LINE)?,
                    MetaMove::parse(puzzle, EDGE_FLIP_ANGLE)?,
                ],
            ]),
            5,
        ),
        Stage::new(
            "orient corners",
            "Twist the top corners up",
            vec![last_layer(vec![Goal::FaceOriented(Face::U)])],
            concat(vec![
                face_turns(puzzle, &[Face::U]),
                vec![
                    MetaMove::parse(puzzle, SUNE)?,
                    MetaMove::parse(puzzle, ANTISUNE)?,
                ],
            ]),
            7,
        ),
        Stage::new(
            "permute corners",
            "Cycle the top corners into place",
            vec![last_layer(vec![
                Goal::FaceOriented(Face::U),
                corners_in_place,
            ])],
            concat(vec![
                face_turns(puzzle, &[Face::U]),
                with_inverse(puzzle, A_PERM)?,
            ]),
            6,
        ),
        Stage::new(
            "permute edges",
            "Cycle the top edges into place",
            vec![Goal::Solved],
            concat(vec![
                conjugated_by_up(puzzle, U_PERM)?,
                conjugated_by_up(puzzle, &u_perm_inverse)?,
                vec![MetaMove::parse(puzzle, H_PERM)?],
            ]),
            3,
        ),
    ])
}

/// The 2x2 has no centers, so the down-left-back corner stays put and only
/// `U`, `R` and `F` are turned.
pub fn pocket(puzzle: &TwistyPuzzle) -> Result<Vec<Stage>, CubeError> {
    let corners = PieceGroup::LayerCorners(Face::D);
    Ok(vec![
        Stage::new(
            "first layer",
            "Solve the bottom corners around the fixed one",
            vec![
                at_least(corners, 2),
                at_least(corners, 3),
                Goal::LayerComplete(Face::D),
            ],
            face_turns(puzzle, &[Face::U, Face::R, Face::F]),
            9,
        ),
        Stage::new(
            "orient last layer",
            "Turn every top sticker up",
            vec![Goal::All(vec![
                Goal::LayerComplete(Face::D),
                Goal::FaceOriented(Face::U),
            ])],
            concat(vec![
                face_turns(puzzle, &[Face::U]),
                vec![
                    MetaMove::parse(puzzle, SUNE)?,
                    MetaMove::parse(puzzle, ANTISUNE)?,
                    MetaMove::parse(puzzle, OLL_PI)?,
                    MetaMove::parse(puzzle, OLL_H)?,
                ],
            ]),
            6,
        ),
        Stage::new(
            "permute last layer",
            "Move the top corners into place",
            vec![Goal::Solved],
            concat(vec![
                face_turns(puzzle, &[Face::U]),
                vec![
                    MetaMove::parse(puzzle, T_PERM)?,
                    MetaMove::parse(puzzle, J_PERM)?,
                    MetaMove::parse(puzzle, Y_PERM)?,
                ],
            ]),
            5,
        ),
    ])
}

/// Group the inner pieces of a big cube so it can be solved as a 3x3.
/// Outer turns never break the grouping, so from a scramble these hold
/// without any moves.
pub fn reduction(puzzle: &TwistyPuzzle) -> Vec<Stage> {
    vec![
        Stage::new(
            "centers",
            "Bring each face's inner centers together",
            vec![Goal::CentersConsolidated],
            face_turns(puzzle, &Face::ALL),
            2,
        ),
        Stage::new(
            "edges",
            "Pair up the edge pieces",
            vec![Goal::EdgesPaired],
            face_turns(puzzle, &Face::ALL),
            2,
        ),
    ]
}
