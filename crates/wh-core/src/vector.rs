//! Integer grid coordinate.

use std::fmt;
use std::ops::Add;

/// An integer `(x, y)` pair: a cell on the warehouse grid or a one-cell
/// displacement.  Copied by value everywhere.
///
/// `x` grows to the right, `y` grows downwards; `(0, 0)` is the top-left
/// cell.  Signed so that neighbour generation can step off the grid and be
/// rejected by a bounds check instead of wrapping.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const UP:    Vector = Vector { x: 0,  y: -1 };
    pub const DOWN:  Vector = Vector { x: 0,  y: 1 };
    pub const LEFT:  Vector = Vector { x: -1, y: 0 };
    pub const RIGHT: Vector = Vector { x: 1,  y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Exact in integers, monotonic in the true
    /// distance, so it is what every nearest-entity comparison uses.
    #[inline]
    pub fn squared_distance(self, other: Vector) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Vector) -> f32 {
        (self.squared_distance(other) as f64).sqrt() as f32
    }

    /// `true` if `other` is one of the four axis-aligned neighbours.
    #[inline]
    pub fn is_adjacent(self, other: Vector) -> bool {
        self.squared_distance(other) == 1
    }
}

impl Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}
