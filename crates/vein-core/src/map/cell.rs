//! Map cell types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::node::NodeId;
use crate::hooks::ActorId;

/// Named tile colors. Front-ends map these to whatever their display
/// supports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TileColor {
    #[default]
    Black,
    White,
    Gray,
    DarkGray,
    Orange,
    Brown,
    Green,
    Yellow,
    Crimson,
}

/// Glyph/color triple describing how a cell is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileArt {
    pub glyph: char,
    pub fg: TileColor,
    pub bg: TileColor,
}

impl TileArt {
    pub const fn new(glyph: char, fg: TileColor, bg: TileColor) -> Self {
        Self { glyph, fg, bg }
    }
}

/// A single map cell.
///
/// Invariants: a cell with `node` set has been carved (`empty` is
/// false); a passable cell always has a `node`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Terrain rendering.
    pub art: TileArt,

    /// Can actors walk through.
    pub passable: bool,

    /// Does light pass through.
    pub see_through: bool,

    /// In the observer's field of view. Transient: reset on every
    /// visibility refresh, never saved.
    #[serde(skip)]
    pub visible: bool,

    /// Never yet carved by any structure.
    pub empty: bool,

    /// Back-reference to the room or hallway occupying this cell.
    /// Weak: an arena index, never an owning handle.
    pub node: Option<NodeId>,

    /// Alternate rendering for an open door, when this cell is one.
    pub door: Option<TileArt>,

    /// Door state; meaningless unless `door` is set.
    pub is_open: bool,

    /// Living actor standing here, if any.
    #[serde(skip)]
    pub actor: Option<ActorId>,
}

impl Cell {
    /// The uncarved default: impassable, opaque, empty.
    pub fn uncarved() -> Self {
        Self {
            empty: true,
            ..Self::default()
        }
    }

    /// Rendering for the cell's current state. Open doors swap to
    /// their alternate art.
    pub fn current_art(&self) -> TileArt {
        match self.door {
            Some(open) if self.is_open => open,
            _ => self.art,
        }
    }
}

/// Partial cell attribute set. Applying a patch changes only the
/// provided fields; carving operations only touch terrain and
/// passability, never visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellPatch {
    pub art: Option<TileArt>,
    pub passable: Option<bool>,
    pub see_through: Option<bool>,
    pub node: Option<NodeId>,
    pub door: Option<TileArt>,
    pub is_open: Option<bool>,
}

impl CellPatch {
    pub fn art(mut self, art: TileArt) -> Self {
        self.art = Some(art);
        self
    }

    pub fn passable(mut self, passable: bool) -> Self {
        self.passable = Some(passable);
        self
    }

    pub fn see_through(mut self, see_through: bool) -> Self {
        self.see_through = Some(see_through);
        self
    }

    pub fn node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn door(mut self, door: TileArt) -> Self {
        self.door = Some(door);
        self
    }

    pub fn is_open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }
}

impl Cell {
    /// Merge a patch into this cell. Any write counts as carving, so
    /// `empty` clears. When the patch sets passability without an
    /// explicit opacity, opacity follows it: carved floor is clear,
    /// carved wall blocks sight.
    pub fn apply(&mut self, patch: CellPatch) {
        if let Some(art) = patch.art {
            self.art = art;
        }
        if let Some(passable) = patch.passable {
            self.passable = passable;
            self.see_through = patch.see_through.unwrap_or(passable);
        } else if let Some(see_through) = patch.see_through {
            self.see_through = see_through;
        }
        if let Some(node) = patch.node {
            self.node = Some(node);
        }
        if let Some(door) = patch.door {
            self.door = Some(door);
        }
        if let Some(is_open) = patch.is_open {
            self.is_open = is_open;
        }
        self.empty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncarved_default() {
        let cell = Cell::uncarved();
        assert!(cell.empty);
        assert!(!cell.passable);
        assert!(!cell.see_through);
        assert!(cell.node.is_none());
    }

    #[test]
    fn test_patch_merges_partially() {
        let mut cell = Cell::uncarved();
        cell.apply(
            CellPatch::default()
                .art(TileArt::new('.', TileColor::Gray, TileColor::Black))
                .passable(true),
        );
        assert!(!cell.empty);
        assert!(cell.passable);
        assert!(cell.see_through, "opacity follows passability");

        // A later patch touching only art retains passability.
        cell.apply(CellPatch::default().art(TileArt::new('<', TileColor::White, TileColor::Black)));
        assert!(cell.passable);
        assert_eq!(cell.art.glyph, '<');
    }

    #[test]
    fn test_door_art_swap() {
        let mut cell = Cell::uncarved();
        let closed = TileArt::new('+', TileColor::Brown, TileColor::Black);
        let open = TileArt::new('/', TileColor::Brown, TileColor::Black);
        cell.apply(
            CellPatch::default()
                .art(closed)
                .passable(true)
                .see_through(false)
                .door(open)
                .is_open(false),
        );
        assert_eq!(cell.current_art(), closed);
        assert!(!cell.see_through, "explicit opacity wins over passability");
        cell.is_open = true;
        assert_eq!(cell.current_art(), open);
    }
}
