/// A point on the integer lattice the cube is laid out on.
///
/// Coordinates are doubled so that facelet centers of every cube size land on
/// whole numbers: facelet `i` along an axis sits at `2i - (N - 1)` and the
/// face planes sit at `±N`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Vector3D {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3D {
    pub const fn new(x: i32, y: i32, z: i32) -> Vector3D {
        Vector3D { x, y, z }
    }
    pub fn dot(&self, other: &Vector3D) -> i32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    pub fn cross(&self, other: &Vector3D) -> Vector3D {
        Vector3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Rotates the point a quarter turn clockwise, as seen looking at the
    /// origin from the tip of `axis`. `axis` must be a unit axis vector.
    pub fn rotate_quarter_turn(&self, axis: &Vector3D) -> Vector3D {
        &(axis * self.dot(axis)) - &axis.cross(self)
    }
}

impl std::fmt::Debug for Vector3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vector3D ({}, {}, {})", self.x, self.y, self.z)
    }
}

impl std::ops::Sub<&Vector3D> for &Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: &Vector3D) -> Vector3D {
        Vector3D {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl std::ops::Mul<i32> for &Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: i32) -> Vector3D {
        Vector3D {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn_about_up_axis() {
        let up = Vector3D::new(0, 1, 0);
        // front moves to the left when the top is turned clockwise
        let front = Vector3D::new(0, 0, 3);
        assert_eq!(front.rotate_quarter_turn(&up), Vector3D::new(-3, 0, 0));
        let point = Vector3D::new(2, 3, -2);
        let mut rotated = point;
        for _ in 0..4 {
            rotated = rotated.rotate_quarter_turn(&up);
        }
        assert_eq!(rotated, point);
    }

    #[test]
    fn test_quarter_turn_about_right_axis() {
        let right = Vector3D::new(1, 0, 0);
        // the top right of the front face goes up to the back right of the top face
        let front_top_right = Vector3D::new(2, 2, 3);
        assert_eq!(
            front_top_right.rotate_quarter_turn(&right),
            Vector3D::new(2, 3, -2)
        );
    }
}
