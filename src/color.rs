use std::fmt;

use serde::{Deserialize, Serialize};

/// Sticker colors, in the order of the faces they start on (`U R F D L B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "O")]
    Orange,
    #[serde(rename = "B")]
    Blue,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Blue => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Color> {
        Color::ALL.into_iter().find(|color| color.symbol() == symbol)
    }

    /// The color on the opposite side of a solved cube.
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Yellow,
            Color::Yellow => Color::White,
            Color::Red => Color::Orange,
            Color::Orange => Color::Red,
            Color::Green => Color::Blue,
            Color::Blue => Color::Green,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip() {
        for color in Color::ALL {
            assert_eq!(Color::from_symbol(color.symbol()), Some(color));
            assert_eq!(color.opposite().opposite(), color);
            assert_ne!(color.opposite(), color);
        }
        assert_eq!(Color::from_symbol('X'), None);
    }

    #[test]
    fn test_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Color::Green).unwrap(), "\"G\"");
        let parsed: Color = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(parsed, Color::Orange);
    }
}
