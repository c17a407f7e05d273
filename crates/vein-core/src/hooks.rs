//! Narrow interfaces to external collaborators.
//!
//! The map core renders to, narrates through, and populates via these
//! traits; it never owns a terminal, a message log, or actor state.

use serde::{Deserialize, Serialize};

use crate::map::TileArt;
use crate::pos::Pos;
use crate::rng::GameRng;

/// Opaque handle for an actor standing on a cell. Issued by the game
/// layer; the map only uses it for pathfinding weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// A display surface accepting per-cell tile writes and viewport
/// centering. No contract beyond accepting the writes.
pub trait TileDisplay {
    fn resize(&mut self, width: i32, height: i32);
    fn center(&mut self, x: i32, y: i32);
    fn set_tile(&mut self, x: i32, y: i32, art: TileArt, visible: bool);
}

/// Sink for narrative events.
pub trait MessageSink {
    fn post(&mut self, message: &str, importance: u8);
}

/// Entity placement hooks invoked once per generation pass.
///
/// `total_level` is the map difficulty plus the room's graph distance
/// from the entrance, so deeper rooms spawn tougher content.
pub trait Populator {
    /// Reset name reservations; called once before any placement.
    fn clear_names(&mut self);

    /// Reserve a name for a freshly created graph node.
    fn node_name(&mut self, rng: &mut GameRng, is_room: bool) -> String;

    fn place_monster(&mut self, pos: Pos, total_level: u32);

    fn place_doodad(&mut self, pos: Pos, total_level: u32);
}

/// Populator that names nodes plainly and places nothing. Used by
/// tests and headless generation.
#[derive(Debug, Default)]
pub struct NullPopulator {
    rooms: u32,
    hallways: u32,
}

impl Populator for NullPopulator {
    fn clear_names(&mut self) {}

    fn node_name(&mut self, _rng: &mut GameRng, is_room: bool) -> String {
        if is_room {
            self.rooms += 1;
            format!("chamber {}", self.rooms)
        } else {
            self.hallways += 1;
            format!("passage {}", self.hallways)
        }
    }

    fn place_monster(&mut self, _pos: Pos, _total_level: u32) {}

    fn place_doodad(&mut self, _pos: Pos, _total_level: u32) {}
}
