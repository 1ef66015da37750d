use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An integer cell address on a [Grid](crate::grid::Grid). Any coordinate with a negative
/// component is treated as "unset", which is how an absent start or goal is represented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// The canonical unset coordinate.
    pub const UNSET: Coordinate = Coordinate { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Checks whether this coordinate lies on (x, y).
    pub fn equals(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// True if either component is negative.
    pub fn is_unset(&self) -> bool {
        self.x < 0 || self.y < 0
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The 4-neighbourhood in the order left, right, down, up. Bounds are not checked.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coordinate; 4]> {
        SmallVec::from_buf([
            Coordinate::new(self.x - 1, self.y),
            Coordinate::new(self.x + 1, self.y),
            Coordinate::new(self.x, self.y - 1),
            Coordinate::new(self.x, self.y + 1),
        ])
    }
}

impl Default for Coordinate {
    fn default() -> Coordinate {
        Coordinate::UNSET
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Coordinate {
        Coordinate::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
