//! The dungeon level: grid, graph, and the queries collaborators use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::Grid;
use super::node::{Node, NodeArena, NodeId};
use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, OCCUPIED_WEIGHT, SIGHT_RADIUS};
use crate::fov::Fov;
use crate::hooks::{ActorId, TileDisplay};
use crate::pathfind::PathFinder;
use crate::pos::Pos;
use crate::rng::GameRng;

/// Smallest grid extent a level can be generated on; anything less
/// cannot hold a single largest room plus its margin.
pub const MIN_EXTENT: i32 = 12;

/// Errors from dungeon construction. Generation itself never fails:
/// placement rejections are silent and a degenerate level is legal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("map of {width}x{height} is smaller than the minimum {MIN_EXTENT}x{MIN_EXTENT}")]
    TooSmall { width: i32, height: i32 },
}

/// Parameters for one generation pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapParams {
    pub width: i32,
    pub height: i32,
    /// Difficulty scalar; deeper levels spawn tougher content.
    pub level: u32,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            level: 1,
        }
    }
}

/// A generated dungeon level.
///
/// Owns the grid and every graph node. Constructed once per level
/// transition and fully rebuilt on regeneration, never re-laid-out
/// incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    pub(crate) grid: Grid,
    pub(crate) nodes: NodeArena,
    pub(crate) rooms: Vec<NodeId>,
    pub(crate) hallways: Vec<NodeId>,
    pub entrance: Pos,
    pub exit: Pos,
    pub level: u32,
}

impl Dungeon {
    /// An allocated but uncarved level. Generation fills it in.
    pub(crate) fn blank(params: MapParams) -> Result<Self, MapError> {
        if params.width < MIN_EXTENT || params.height < MIN_EXTENT {
            return Err(MapError::TooSmall {
                width: params.width,
                height: params.height,
            });
        }
        Ok(Self {
            grid: Grid::new(params.width, params.height),
            nodes: NodeArena::new(),
            rooms: Vec::new(),
            hallways: Vec::new(),
            entrance: Pos::default(),
            exit: Pos::default(),
            level: params.level,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Bounds-checked cell access.
    pub fn square(&self, x: i32, y: i32) -> Option<&super::cell::Cell> {
        self.grid.get(x, y)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn rooms(&self) -> &[NodeId] {
        &self.rooms
    }

    pub fn hallways(&self) -> &[NodeId] {
        &self.hallways
    }

    /// Anchor position of a uniformly sampled room.
    pub fn random_room(&self, rng: &mut GameRng) -> Option<Pos> {
        let id = rng.choose(&self.rooms)?;
        Some(self.nodes.get(*id)?.position)
    }

    /// Record an actor standing on a cell; occupied cells cost more to
    /// path through.
    pub fn set_actor(&mut self, pos: Pos, actor: ActorId) {
        if let Some(cell) = self.grid.at_mut(pos) {
            cell.actor = Some(actor);
        }
    }

    pub fn clear_actor(&mut self, pos: Pos) {
        if let Some(cell) = self.grid.at_mut(pos) {
            cell.actor = None;
        }
    }

    /// Open a closed door. Returns whether anything changed; opening
    /// also lets light through.
    pub fn open_door(&mut self, pos: Pos) -> bool {
        match self.grid.at_mut(pos) {
            Some(cell) if cell.door.is_some() && !cell.is_open => {
                cell.is_open = true;
                cell.see_through = true;
                true
            }
            _ => false,
        }
    }

    /// Weighted shortest path over the grid. Routes prefer to avoid
    /// occupied cells but are not forbidden from crossing them.
    pub fn find_path(&self, start: Pos, goal: Pos, exclude_goal: bool) -> Vec<Pos> {
        let grid = &self.grid;
        let finder = PathFinder::new(
            |p: Pos| grid.at(p).is_some_and(|c| c.passable),
            |p: Pos| {
                grid.at(p)
                    .map_or(1, |c| if c.actor.is_some() { OCCUPIED_WEIGHT } else { 1 })
            },
            grid.area(),
        );
        finder.find_path(start, goal, exclude_goal)
    }

    /// Unweighted BFS hop count between two graph nodes, bounded by
    /// the node count (a safe upper bound on graph diameter). `None`
    /// means unreachable within the bound.
    pub fn node_distance(&self, start: NodeId, end: NodeId) -> Option<u32> {
        if start == end {
            return Some(0);
        }
        let limit = self.rooms.len() + self.hallways.len();
        let mut steps = 0u32;
        let mut frontier = vec![start];
        while (steps as usize) <= limit {
            steps += 1;
            let mut grown = Vec::new();
            for &id in &frontier {
                let Some(node) = self.nodes.get(id) else {
                    continue;
                };
                for &other in &node.connections {
                    if !frontier.contains(&other) && !grown.contains(&other) {
                        grown.push(other);
                    }
                }
            }
            if grown.is_empty() {
                return None;
            }
            for id in grown {
                if id == end {
                    return Some(steps);
                }
                frontier.push(id);
            }
        }
        None
    }

    /// The room with maximum graph distance from `start`. Unreachable
    /// rooms rank as infinitely distant; ties go to the room seen
    /// last.
    pub fn most_distant_room(&self, start: NodeId) -> Option<NodeId> {
        let mut best = None;
        let mut max_distance = 0u64;
        for &room in &self.rooms {
            let distance = self
                .node_distance(start, room)
                .map_or(u64::MAX, u64::from);
            if distance >= max_distance {
                max_distance = distance;
                best = Some(room);
            }
        }
        best
    }

    /// Full redraw: size the display, recompute visibility from the
    /// viewpoint, and push every tile.
    pub fn draw(&mut self, display: &mut dyn TileDisplay, viewpoint: Pos) {
        display.resize(self.grid.width(), self.grid.height());
        display.center(viewpoint.x, viewpoint.y);

        self.grid.clear_visibility();
        let fov = Fov::new(SIGHT_RADIUS);
        let grid = &mut self.grid;
        fov.look(viewpoint, |pos| match grid.at_mut(pos) {
            Some(cell) => {
                cell.visible = true;
                cell.see_through
            }
            None => false,
        });

        for (pos, cell) in self.grid.iter() {
            display.set_tile(pos.x, pos.y, cell.current_art(), cell.visible);
        }
    }
}
