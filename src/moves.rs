use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CubeError;
use crate::face::Face;

/// How far a face turns, in the clockwise direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Amount {
    Clockwise,
    Double,
    CounterClockwise,
}

impl Amount {
    pub const ALL: [Amount; 3] = [Amount::Clockwise, Amount::Double, Amount::CounterClockwise];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn quarter_turns(self) -> u8 {
        match self {
            Amount::Clockwise => 1,
            Amount::Double => 2,
            Amount::CounterClockwise => 3,
        }
    }

    /// `None` when the turns cancel out.
    pub fn from_quarter_turns(quarter_turns: u8) -> Option<Amount> {
        match quarter_turns % 4 {
            1 => Some(Amount::Clockwise),
            2 => Some(Amount::Double),
            3 => Some(Amount::CounterClockwise),
            _ => None,
        }
    }

    pub fn inverse(self) -> Amount {
        match self {
            Amount::Clockwise => Amount::CounterClockwise,
            Amount::Double => Amount::Double,
            Amount::CounterClockwise => Amount::Clockwise,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Amount::Clockwise => "",
            Amount::Double => "2",
            Amount::CounterClockwise => "'",
        }
    }
}

/// One outer face turn, written `R`, `R2` or `R'`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    pub face: Face,
    pub amount: Amount,
}

impl Move {
    pub const fn new(face: Face, amount: Amount) -> Self {
        Move { face, amount }
    }

    /// All 18 moves in turn-table order.
    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL.into_iter().flat_map(|face| {
            Amount::ALL
                .into_iter()
                .map(move |amount| Move::new(face, amount))
        })
    }

    /// Position of this move in the turn tables.
    #[inline]
    pub fn index(self) -> usize {
        self.face.index() * 3 + self.amount.index()
    }

    pub fn inverse(self) -> Move {
        Move::new(self.face, self.amount.inverse())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.amount.suffix())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || CubeError::InvalidMoveToken(token.to_string());
        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;
        let amount = match chars.as_str() {
            "" => Amount::Clockwise,
            "2" => Amount::Double,
            "'" => Amount::CounterClockwise,
            _ => return Err(invalid()),
        };
        Ok(Move::new(face, amount))
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = CubeError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

/// An ordered list of moves, written as space separated tokens.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MoveSequence(Vec<Move>);

impl MoveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    pub fn extend_from(&mut self, other: &MoveSequence) {
        self.0.extend_from_slice(&other.0);
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &MoveSequence) -> MoveSequence {
        let mut combined = self.clone();
        combined.extend_from(other);
        combined
    }

    /// The sequence that undoes this one.
    pub fn inverse(&self) -> MoveSequence {
        MoveSequence(self.0.iter().rev().map(|mv| mv.inverse()).collect())
    }

    /// Rewrites every face letter with `relabel`. Used to replay an algorithm
    /// from a rotated point of view.
    pub fn relabeled(&self, relabel: impl Fn(Face) -> Face) -> MoveSequence {
        MoveSequence(
            self.0
                .iter()
                .map(|mv| Move::new(relabel(mv.face), mv.amount))
                .collect(),
        )
    }

    /// Merges adjacent turns of the same face until no two neighbours share
    /// a face. Turns that add up to a full rotation disappear, which can
    /// bring further same-face turns together.
    pub fn optimized(&self) -> MoveSequence {
        let mut reduced: Vec<Move> = Vec::with_capacity(self.0.len());
        for mv in &self.0 {
            match reduced.last() {
                Some(last) if last.face == mv.face => {
                    let quarter_turns = last.amount.quarter_turns() + mv.amount.quarter_turns();
                    match Amount::from_quarter_turns(quarter_turns) {
                        Some(amount) => {
                            let len = reduced.len();
                            reduced[len - 1] = Move::new(mv.face, amount);
                        }
                        None => {
                            reduced.pop();
                        }
                    }
                }
                _ => reduced.push(*mv),
            }
        }
        MoveSequence(reduced)
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        MoveSequence(moves)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveSequence(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromStr for MoveSequence {
    type Err = CubeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.split_whitespace().map(str::parse::<Move>).collect()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

impl fmt::Debug for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveSequence({:?})", self.to_string())
    }
}

impl From<MoveSequence> for String {
    fn from(moves: MoveSequence) -> Self {
        moves.to_string()
    }
}

impl TryFrom<String> for MoveSequence {
    type Error = CubeError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

#[cfg(test)]
mod tests {
    use insta::{assert_debug_snapshot, assert_snapshot};

    use super::*;

    fn optimize(text: &str) -> String {
        text.parse::<MoveSequence>().unwrap().optimized().to_string()
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            "R".parse::<Move>().unwrap(),
            Move::new(Face::R, Amount::Clockwise)
        );
        assert_eq!(
            "U2".parse::<Move>().unwrap(),
            Move::new(Face::U, Amount::Double)
        );
        assert_eq!(
            "F'".parse::<Move>().unwrap(),
            Move::new(Face::F, Amount::CounterClockwise)
        );
        for bad in ["", "X", "R3", "r", "R'2", "RU", "2R"] {
            assert!(
                matches!(bad.parse::<Move>(), Err(CubeError::InvalidMoveToken(token)) if token == bad),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_all_moves_match_indices() {
        let all: Vec<Move> = Move::all().collect();
        assert_eq!(all.len(), 18);
        for (i, mv) in all.iter().enumerate() {
            assert_eq!(mv.index(), i);
            assert_eq!(mv.to_string().parse::<Move>().unwrap(), *mv);
        }
        assert_debug_snapshot!(&all[..6], @r###"
        [
            U,
            U2,
            U',
            R,
            R2,
            R',
        ]
        "###);
    }

    #[test]
    fn test_inverse() {
        let moves: MoveSequence = "R U2 F' D".parse().unwrap();
        assert_snapshot!(moves.inverse(), @"D' F U2 R'");
        assert!(moves.concat(&moves.inverse()).optimized().is_empty());
    }

    #[test]
    fn test_optimize() {
        assert_eq!(optimize("R R R R"), "");
        assert_eq!(optimize("U U'"), "");
        assert_eq!(optimize("U U"), "U2");
        assert_snapshot!(optimize("R U U' R' F F F"), @"F'");
        assert_snapshot!(optimize("L2 L D D2 R R2 R"), @"L' D'");
        assert_snapshot!(optimize("U D U"), @"U D U");
    }

    #[test]
    fn test_rejects_whole_sequence_on_bad_token() {
        assert!(matches!(
            "R U Q".parse::<MoveSequence>(),
            Err(CubeError::InvalidMoveToken(token)) if token == "Q"
        ));
    }

    #[test]
    fn test_relabel() {
        let moves: MoveSequence = "R U R'".parse().unwrap();
        assert_snapshot!(moves.relabeled(Face::rotated_about_y), @"F U F'");
    }

    #[test]
    fn test_serde_as_text() {
        let moves: MoveSequence = "R U2 F'".parse().unwrap();
        let json = serde_json::to_string(&moves).unwrap();
        assert_eq!(json, "\"R U2 F'\"");
        let parsed: MoveSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, moves);
        assert!(serde_json::from_str::<MoveSequence>("\"R X\"").is_err());
    }
}
