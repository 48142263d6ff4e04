use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::vector3d::Vector3D;

/// The six faces, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Face {
        Face::ALL[index]
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::R => Face::L,
            Face::L => Face::R,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    /// The color this face carries on a solved cube.
    pub fn home_color(self) -> Color {
        Color::ALL[self.index()]
    }

    /// Outward unit normal. `x` points right, `y` up, `z` towards the viewer.
    pub fn normal(self) -> Vector3D {
        match self {
            Face::U => Vector3D::new(0, 1, 0),
            Face::D => Vector3D::new(0, -1, 0),
            Face::R => Vector3D::new(1, 0, 0),
            Face::L => Vector3D::new(-1, 0, 0),
            Face::F => Vector3D::new(0, 0, 1),
            Face::B => Vector3D::new(0, 0, -1),
        }
    }

    /// Where a whole-cube rotation about the vertical axis (the way `U`
    /// turns) carries a side face: `F -> L -> B -> R -> F`. `U` and `D` stay.
    pub fn rotated_about_y(self) -> Face {
        match self {
            Face::F => Face::L,
            Face::L => Face::B,
            Face::B => Face::R,
            Face::R => Face::F,
            other => other,
        }
    }

    /// Lattice position of the sticker at `(row, col)` of this face, looking
    /// at the face from outside with the grid laid out the usual net way.
    pub(crate) fn facelet_position(self, size: usize, row: usize, col: usize) -> Vector3D {
        let n = size as i32;
        let row = 2 * row as i32 - (n - 1);
        let col = 2 * col as i32 - (n - 1);
        match self {
            Face::U => Vector3D::new(col, n, row),
            Face::R => Vector3D::new(n, -row, -col),
            Face::F => Vector3D::new(col, -row, n),
            Face::D => Vector3D::new(col, -n, -row),
            Face::L => Vector3D::new(-n, -row, col),
            Face::B => Vector3D::new(-col, -row, -n),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
