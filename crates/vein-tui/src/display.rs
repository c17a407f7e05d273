//! Tile buffer bridging the core's display hook to ratatui.

use vein_core::hooks::TileDisplay;
use vein_core::{Pos, TileArt};

/// In-memory tile surface. The core pushes tiles into it on every
/// redraw; the map widget reads them back out when rendering a frame.
#[derive(Debug, Default)]
pub struct BufferDisplay {
    width: i32,
    height: i32,
    center: Pos,
    tiles: Vec<(TileArt, bool)>,
}

impl BufferDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The viewpoint the last redraw centered on.
    pub fn center(&self) -> Pos {
        self.center
    }

    /// Tile art and visibility at a map coordinate.
    pub fn get(&self, x: i32, y: i32) -> Option<(TileArt, bool)> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize).copied()
    }
}

impl TileDisplay for BufferDisplay {
    fn resize(&mut self, width: i32, height: i32) {
        if width != self.width || height != self.height {
            self.width = width.max(0);
            self.height = height.max(0);
            self.tiles.clear();
        }
        self.tiles
            .resize((self.width * self.height) as usize, Default::default());
    }

    fn center(&mut self, x: i32, y: i32) {
        self.center = Pos::new(x, y);
    }

    fn set_tile(&mut self, x: i32, y: i32, art: TileArt, visible: bool) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.tiles[(y * self.width + x) as usize] = (art, visible);
    }
}
