//! Grid coordinates.

use serde::{Deserialize, Serialize};

/// An integer grid position, used both as a cell coordinate and as a
/// graph-node anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another position.
    pub fn distance_sq(&self, other: Pos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// The four orthogonal neighbours.
    pub fn orthogonal(&self) -> [Pos; 4] {
        [
            Pos::new(self.x + 1, self.y),
            Pos::new(self.x - 1, self.y),
            Pos::new(self.x, self.y + 1),
            Pos::new(self.x, self.y - 1),
        ]
    }

    /// The full 3x3 neighbourhood, centre included.
    pub fn neighbourhood(&self) -> impl Iterator<Item = Pos> + '_ {
        let centre = *self;
        (-1..=1).flat_map(move |i| (-1..=1).map(move |j| Pos::new(centre.x + i, centre.y + j)))
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        assert_eq!(Pos::new(0, 0).distance_sq(Pos::new(3, 4)), 25);
        assert_eq!(Pos::new(2, 2).distance_sq(Pos::new(2, 2)), 0);
    }

    #[test]
    fn test_neighbourhood_size() {
        let p = Pos::new(5, 5);
        assert_eq!(p.neighbourhood().count(), 9);
        assert!(p.neighbourhood().any(|n| n == p));
    }
}
