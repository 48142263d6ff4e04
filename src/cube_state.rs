use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CubeError;
use crate::face::Face;
use crate::moves::{Move, MoveSequence};
use crate::twisty_puzzle::TwistyPuzzle;

/// The colors of every facelet of an NxN cube.
///
/// Facelets are stored face by face in `U R F D L B` order, each face row by
/// row as seen from outside. The only way to change a state is to derive a
/// new one through a move.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    size: usize,
    facelets: Vec<Color>,
}

/// Face by face picture of a state, as handed to renderers and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: usize,
    /// One string of color symbols per row
    pub faces: BTreeMap<Face, Vec<String>>,
}

impl CubeState {
    pub fn solved(size: usize) -> Result<Self, CubeError> {
        Ok(TwistyPuzzle::for_size(size)?.get_initial_state())
    }

    pub(crate) fn from_parts(size: usize, facelets: Vec<Color>) -> Self {
        debug_assert_eq!(facelets.len(), 6 * size * size);
        CubeState { size, facelets }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn facelets(&self) -> &[Color] {
        &self.facelets
    }

    pub fn color_at(&self, face: Face, row: usize, col: usize) -> Color {
        self.facelets[face.index() * self.size * self.size + row * self.size + col]
    }

    pub fn puzzle(&self) -> &'static TwistyPuzzle {
        TwistyPuzzle::cached(self.size)
    }

    pub fn apply(&self, mv: Move) -> CubeState {
        self.puzzle().get_derived_state_move(self, mv)
    }

    pub fn apply_sequence(&self, moves: &MoveSequence) -> CubeState {
        let puzzle = self.puzzle();
        moves.iter().fold(self.clone(), |state, mv| {
            puzzle.get_derived_state_move(&state, *mv)
        })
    }

    /// Every face shows a single color: the one of its center cell.
    pub fn is_solved(&self) -> bool {
        let per_face = self.size * self.size;
        let center = (self.size / 2) * self.size + self.size / 2;
        self.facelets
            .chunks(per_face)
            .all(|face| face.iter().all(|color| *color == face[center]))
    }

    /// Text key that is equal for two states exactly when the states are.
    pub fn state_key(&self) -> String {
        self.facelets.iter().map(|color| color.symbol()).collect()
    }

    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for color in &self.facelets {
            counts[color.index()] += 1;
        }
        counts
    }

    /// Checks that every color still appears exactly N^2 times.
    pub fn validate(&self) -> Result<(), CubeError> {
        let expected = self.size * self.size;
        for (color, count) in Color::ALL.into_iter().zip(self.color_counts()) {
            if count != expected {
                return Err(CubeError::StateCorruption {
                    color,
                    count,
                    expected,
                });
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let per_face = self.size * self.size;
        let faces = Face::ALL
            .into_iter()
            .zip(self.facelets.chunks(per_face))
            .map(|(face, cells)| {
                let rows = cells
                    .chunks(self.size)
                    .map(|row| row.iter().map(|color| color.symbol()).collect())
                    .collect();
                (face, rows)
            })
            .collect();
        Snapshot {
            size: self.size,
            faces,
        }
    }

    /// Rebuilds a state from a snapshot, rejecting malformed grids and
    /// color counts that no sequence of moves could produce.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, CubeError> {
        let size = snapshot.size;
        TwistyPuzzle::for_size(size)?;
        let mut facelets = Vec::with_capacity(6 * size * size);
        for face in Face::ALL {
            let rows = snapshot
                .faces
                .get(&face)
                .ok_or_else(|| CubeError::InvalidSnapshot(format!("face {} is missing", face)))?;
            if rows.len() != size {
                return Err(CubeError::InvalidSnapshot(format!(
                    "face {} has {} rows, expected {}",
                    face,
                    rows.len(),
                    size
                )));
            }
            for row in rows {
                if row.chars().count() != size {
                    return Err(CubeError::InvalidSnapshot(format!(
                        "row {:?} of face {} does not have {} cells",
                        row, face, size
                    )));
                }
                for symbol in row.chars() {
                    let color = Color::from_symbol(symbol).ok_or_else(|| {
                        CubeError::InvalidSnapshot(format!("unknown color {:?}", symbol))
                    })?;
                    facelets.push(color);
                }
            }
        }
        let state = CubeState::from_parts(size, facelets);
        state.validate()?;
        Ok(state)
    }
}

impl fmt::Display for CubeState {
    /// Unfolded net: `U` on top, then `L F R B`, then `D`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_text = |face: Face, row: usize| -> String {
            (0..self.size)
                .map(|col| self.color_at(face, row, col).symbol())
                .collect()
        };
        let indent = " ".repeat(self.size + 1);
        let mut lines = vec![];
        for row in 0..self.size {
            lines.push(format!("{}{}", indent, row_text(Face::U, row)));
        }
        for row in 0..self.size {
            let band: Vec<String> = [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| row_text(face, row))
                .collect();
            lines.push(band.join(" "));
        }
        for row in 0..self.size {
            lines.push(format!("{}{}", indent, row_text(Face::D, row)));
        }
        f.write_str(&lines.join("\n"))
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CubeState({}x{}, {})", self.size, self.size, self.state_key())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;

    use super::*;

    fn moves(text: &str) -> MoveSequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_solved_state() {
        for size in 2..=7 {
            let state = CubeState::solved(size).unwrap();
            assert!(state.is_solved());
            assert_eq!(state.color_counts(), [size * size; 6]);
            assert_eq!(state.state_key().len(), 6 * size * size);
        }
        assert!(matches!(
            CubeState::solved(9),
            Err(CubeError::InvalidSizeRequest(9))
        ));
    }

    #[test]
    fn test_any_single_move_unsolves() {
        for size in 2..=7 {
            let solved = CubeState::solved(size).unwrap();
            for mv in Move::all() {
                assert!(!solved.apply(mv).is_solved(), "{} on {}x{}", mv, size, size);
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let solved = CubeState::solved(3).unwrap();
        let state = solved.apply_sequence(&moves("R U2 F'"));
        for mv in Move::all() {
            let turned = (0..4).fold(state.clone(), |s, _| s.apply(mv));
            assert_eq!(turned, state);
        }
    }

    #[test]
    fn test_right_turn_net() {
        let state = CubeState::solved(3).unwrap().apply(moves("R").as_slice()[0]);
        let expected = [
            "    WWG",
            "    WWG",
            "    WWG",
            "OOO GGY RRR WBB",
            "OOO GGY RRR WBB",
            "OOO GGY RRR WBB",
            "    YYB",
            "    YYB",
            "    YYB",
        ]
        .join("\n");
        assert_eq!(state.to_string(), expected);
    }

    #[test]
    fn test_up_turn_moves_front_to_left() {
        let state = CubeState::solved(3).unwrap().apply(Move::new(
            Face::U,
            crate::moves::Amount::Clockwise,
        ));
        assert_eq!(state.color_at(Face::L, 0, 1), Color::Green);
        assert_eq!(state.color_at(Face::F, 0, 1), Color::Red);
        assert_eq!(state.color_at(Face::B, 0, 1), Color::Orange);
        assert_eq!(state.color_at(Face::L, 1, 1), Color::Orange);
    }

    #[test]
    fn test_snapshot() {
        let state = CubeState::solved(2).unwrap().apply_sequence(&moves("R"));
        assert_debug_snapshot!(state.snapshot(), @r###"
        Snapshot {
            size: 2,
            faces: {
                U: [
                    "WG",
                    "WG",
                ],
                R: [
                    "RR",
                    "RR",
                ],
                F: [
                    "GY",
                    "GY",
                ],
                D: [
                    "YB",
                    "YB",
                ],
                L: [
                    "OO",
                    "OO",
                ],
                B: [
                    "WB",
                    "WB",
                ],
            },
        }
        "###);
    }

    #[test]
    fn test_snapshot_round_trip_through_json() {
        let state = CubeState::solved(4)
            .unwrap()
            .apply_sequence(&moves("R U F2 L' D B"));
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(CubeState::from_snapshot(&snapshot).unwrap(), state);
    }

    #[test]
    fn test_from_snapshot_rejects_bad_input() {
        let mut snapshot = CubeState::solved(3).unwrap().snapshot();
        snapshot.faces.insert(Face::U, vec!["WWW".into(), "WWW".into(), "WWY".into()]);
        assert!(matches!(
            CubeState::from_snapshot(&snapshot),
            Err(CubeError::StateCorruption { .. })
        ));

        snapshot.faces.insert(Face::U, vec!["WWW".into(), "WWW".into()]);
        assert!(matches!(
            CubeState::from_snapshot(&snapshot),
            Err(CubeError::InvalidSnapshot(_))
        ));

        snapshot.faces.insert(Face::U, vec!["WWW".into(), "WWW".into(), "WWX".into()]);
        assert!(matches!(
            CubeState::from_snapshot(&snapshot),
            Err(CubeError::InvalidSnapshot(_))
        ));

        snapshot.faces.remove(&Face::U);
        assert!(matches!(
            CubeState::from_snapshot(&snapshot),
            Err(CubeError::InvalidSnapshot(_))
        ));
    }
}
