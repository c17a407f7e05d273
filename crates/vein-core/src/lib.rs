//! vein-core: dungeon generation, navigation and visibility for Vein
//!
//! This crate contains all map logic with no I/O dependencies.
//! It is designed to be pure and testable: every generation entry
//! point takes an explicit seeded [`GameRng`], and everything a
//! front-end needs (display surface, message log, entity spawning)
//! is consumed through the narrow traits in [`hooks`].

pub mod fov;
pub mod hooks;
pub mod map;
pub mod pathfind;

mod consts;
mod pos;
mod rng;

pub use consts::*;
pub use fov::Fov;
pub use map::{Cell, CellPatch, Dungeon, MapError, MapParams, TileArt, TileColor};
pub use pathfind::PathFinder;
pub use pos::Pos;
pub use rng::GameRng;
