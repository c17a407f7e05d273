//! Dungeon map: grid, navigation graph, generation, travel.

mod cell;
mod dungeon;
mod generator;
mod grid;
mod node;
mod travel;

pub use cell::{Cell, CellPatch, TileArt, TileColor};
pub use dungeon::{Dungeon, MapError, MapParams};
pub use grid::Grid;
pub use node::{Bounds, Node, NodeArena, NodeId, NodeKind};
pub use travel::{Compass, TravelDirection, TravelOption};
