//! Fixed-size cell grid.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellPatch};
use crate::pos::Pos;

/// A fixed-size 2D array of cells, row-major. Allocated once per
/// level; never resized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a grid filled with the uncarved default.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::uncarved(); len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> usize {
        (self.width * self.height) as usize
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((x + y * self.width) as usize)
        } else {
            None
        }
    }

    /// Bounds-checked cell access.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Bounds-checked mutable cell access.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn at(&self, pos: Pos) -> Option<&Cell> {
        self.get(pos.x, pos.y)
    }

    pub fn at_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.get_mut(pos.x, pos.y)
    }

    /// Merge a partial attribute set into a cell. Out-of-bounds
    /// writes are dropped.
    pub fn patch(&mut self, pos: Pos, patch: CellPatch) {
        if let Some(cell) = self.at_mut(pos) {
            cell.apply(patch);
        }
    }

    /// Clear every cell's visibility flag. Called before each
    /// field-of-view sweep; the sweep itself only sets flags.
    pub fn clear_visibility(&mut self) {
        for cell in &mut self.cells {
            cell.visible = false;
        }
    }

    /// Iterate all positions with their cells.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, cell)| {
            let x = i as i32 % self.width;
            let y = i as i32 / self.width;
            (Pos::new(x, y), cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::cell::{TileArt, TileColor};

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(10, 8);
        assert!(grid.get(0, 0).is_some());
        assert!(grid.get(9, 7).is_some());
        assert!(grid.get(10, 0).is_none());
        assert!(grid.get(0, 8).is_none());
        assert!(grid.get(-1, 0).is_none());
    }

    #[test]
    fn test_allocation_is_uncarved() {
        let grid = Grid::new(4, 4);
        assert!(grid.iter().all(|(_, c)| c.empty && !c.passable));
    }

    #[test]
    fn test_patch_out_of_bounds_is_noop() {
        let mut grid = Grid::new(4, 4);
        grid.patch(
            Pos::new(-1, 2),
            CellPatch::default().art(TileArt::new('#', TileColor::White, TileColor::Gray)),
        );
        // Nothing carved anywhere.
        assert!(grid.iter().all(|(_, c)| c.empty));
    }

    #[test]
    fn test_clear_visibility() {
        let mut grid = Grid::new(4, 4);
        grid.get_mut(2, 2).unwrap().visible = true;
        grid.clear_visibility();
        assert!(grid.iter().all(|(_, c)| !c.visible));
    }
}
