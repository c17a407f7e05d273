//! Field of view.
//!
//! Radius-bounded ray-marching sweep from a single origin. The engine
//! holds no map reference: the caller supplies a `reveal` callback
//! that marks a cell visible and reports whether light passes through
//! it. The sweep only ever sets visibility; clearing stale flags
//! before a refresh is the caller's job.

use crate::pos::Pos;

/// Visibility sweep engine.
#[derive(Debug, Clone, Copy)]
pub struct Fov {
    radius: i32,
}

impl Fov {
    pub fn new(radius: i32) -> Self {
        Self {
            radius: radius.max(0),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Sweep visibility from `origin`. For every cell within the
    /// (circular) radius, a Bresenham ray is marched from the origin;
    /// each cell the ray crosses is revealed, and the ray stops at the
    /// first opaque cell, which is itself still revealed.
    ///
    /// `reveal` marks a cell visible and returns whether it is
    /// see-through. The origin is always revealed.
    pub fn look<F>(&self, origin: Pos, mut reveal: F)
    where
        F: FnMut(Pos) -> bool,
    {
        reveal(origin);
        let r = self.radius;
        for dx in -r..=r {
            for dy in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let target = Pos::new(origin.x + dx, origin.y + dy);
                self.march(origin, target, &mut reveal);
            }
        }
    }

    /// March a ray from `origin` to `target`, revealing as it goes.
    fn march<F>(&self, origin: Pos, target: Pos, reveal: &mut F)
    where
        F: FnMut(Pos) -> bool,
    {
        let mut x = origin.x;
        let mut y = origin.y;
        let dx = (target.x - x).abs();
        let dy = -(target.y - y).abs();
        let sx = if x < target.x { 1 } else { -1 };
        let sy = if y < target.y { 1 } else { -1 };
        let mut err = dx + dy;

        while x != target.x || y != target.y {
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            if !reveal(Pos::new(x, y)) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// A tiny opaque-wall world for exercising the sweep.
    struct World {
        walls: HashSet<Pos>,
        seen: HashSet<Pos>,
    }

    impl World {
        fn new(walls: &[(i32, i32)]) -> Self {
            Self {
                walls: walls.iter().map(|&(x, y)| Pos::new(x, y)).collect(),
                seen: HashSet::new(),
            }
        }

        fn sweep(&mut self, fov: Fov, origin: Pos) {
            let walls = self.walls.clone();
            let seen = &mut self.seen;
            fov.look(origin, |pos| {
                seen.insert(pos);
                !walls.contains(&pos)
            });
        }
    }

    #[test]
    fn test_origin_always_visible() {
        let mut world = World::new(&[]);
        world.sweep(Fov::new(0), Pos::new(5, 5));
        assert!(world.seen.contains(&Pos::new(5, 5)));
        assert_eq!(world.seen.len(), 1);
    }

    #[test]
    fn test_open_field_radius() {
        let mut world = World::new(&[]);
        world.sweep(Fov::new(3), Pos::new(10, 10));
        assert!(world.seen.contains(&Pos::new(13, 10)));
        assert!(world.seen.contains(&Pos::new(10, 7)));
        // Outside the circular radius.
        assert!(!world.seen.contains(&Pos::new(13, 13)));
        assert!(!world.seen.contains(&Pos::new(14, 10)));
    }

    #[test]
    fn test_wall_blocks_but_is_seen() {
        // Wall column at x = 12 between observer and the far side.
        let walls: Vec<(i32, i32)> = (5..15).map(|y| (12, y)).collect();
        let mut world = World::new(&walls);
        world.sweep(Fov::new(6), Pos::new(10, 10));
        assert!(world.seen.contains(&Pos::new(11, 10)));
        assert!(world.seen.contains(&Pos::new(12, 10)), "the wall itself is revealed");
        assert!(!world.seen.contains(&Pos::new(13, 10)), "nothing beyond the wall");
    }

    #[test]
    fn test_sweep_only_sets() {
        // The engine never clears: pre-marked cells stay marked.
        let mut world = World::new(&[]);
        world.seen.insert(Pos::new(0, 0));
        world.sweep(Fov::new(2), Pos::new(10, 10));
        assert!(world.seen.contains(&Pos::new(0, 0)));
    }

    #[test]
    fn test_negative_radius_clamped() {
        let fov = Fov::new(-3);
        assert_eq!(fov.radius(), 0);
    }
}
