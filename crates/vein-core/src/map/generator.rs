//! Dungeon generation: room placement, hallway carving and merging,
//! door/intersection detection, and population.
//!
//! Generation failures are silent and self-correcting. A rejected
//! room placement is simply retried until the iteration budget runs
//! out, and a level with zero or one room is a legal (if degenerate)
//! outcome, never an error.

use std::collections::HashSet;

use super::cell::{CellPatch, TileArt, TileColor};
use super::dungeon::{Dungeon, MapError, MapParams};
use super::node::{Bounds, Node, NodeId, NodeKind};
use crate::consts::{FILL_FRACTION, PLACEMENT_BUDGET, ROOM_MAX_EXTENT, ROOM_MIN_EXTENT};
use crate::hooks::Populator;
use crate::pos::Pos;
use crate::rng::GameRng;

const ROOM_WALL: TileArt = TileArt::new('#', TileColor::Orange, TileColor::Brown);
const ROOM_FLOOR: TileArt = TileArt::new('.', TileColor::Green, TileColor::Black);
const HALL_WALL: TileArt = TileArt::new('#', TileColor::Gray, TileColor::DarkGray);
const HALL_FLOOR: TileArt = TileArt::new('.', TileColor::Orange, TileColor::Black);
const DOOR_CLOSED: TileArt = TileArt::new('+', TileColor::Brown, TileColor::Black);
const DOOR_OPEN: TileArt = TileArt::new('/', TileColor::Brown, TileColor::Black);

fn update_axis(axis: &mut Pos, dx: i32, dy: i32) {
    if dy.abs() > dx.abs() {
        *axis = Pos::new(0, dy.signum());
    } else {
        *axis = Pos::new(dx.signum(), 0);
    }
}

impl Dungeon {
    /// Run one full generation pass and return the finished level.
    pub fn generate(
        params: MapParams,
        rng: &mut GameRng,
        populator: &mut dyn Populator,
    ) -> Result<Self, MapError> {
        let mut dungeon = Self::blank(params)?;
        dungeon.generate_map(rng, populator);
        Ok(dungeon)
    }

    fn generate_map(&mut self, rng: &mut GameRng, populator: &mut dyn Populator) {
        let target = (FILL_FRACTION * self.grid.area() as f64) as i64;
        let mut carved = 0i64;
        let mut budget = PLACEMENT_BUDGET as i32;

        while carved < target && budget >= 0 {
            budget -= 1;
            let width = rng.range(ROOM_MIN_EXTENT, ROOM_MAX_EXTENT);
            let height = rng.range(ROOM_MIN_EXTENT, ROOM_MAX_EXTENT);
            let center = Pos::new(
                rng.range(1, self.grid.width() - 1),
                rng.range(1, self.grid.height() - 1),
            );
            if !self.add_room(populator, rng, center, width, height) {
                continue;
            }
            carved += (width * height) as i64;

            // Tie the newcomer into the existing layout right away.
            if self.rooms.len() > 1 {
                let this_idx = self.rooms.len() - 1;
                let room = self.rooms[this_idx];
                let wanted = rng.range(1, this_idx.min(2) as i32);
                for _ in 0..wanted {
                    if let Some(other) = self.nearest_unconnected(room) {
                        carved += self.draw_hallway(populator, rng, room, other) as i64;
                    }
                }
            }
        }

        self.rebuild_graph();

        if self.rooms.is_empty() {
            return;
        }

        // Entrance favors sparsely-connected rooms; exit is the room
        // farthest from it by graph distance.
        let weighted: Vec<(NodeId, u32)> = self
            .rooms
            .iter()
            .map(|&r| {
                let connections = self.nodes.get(r).map_or(0, |n| n.connections.len() as u32);
                (r, 10u32.saturating_sub(connections))
            })
            .collect();
        let start_room = rng
            .choose_weighted(&weighted)
            .copied()
            .unwrap_or(self.rooms[0]);
        let end_room = self.most_distant_room(start_room).unwrap_or(start_room);

        self.entrance = self
            .nodes
            .get(start_room)
            .map(|n| n.position)
            .unwrap_or_default();
        self.exit = self
            .nodes
            .get(end_room)
            .map(|n| n.position)
            .unwrap_or_default();
        // Stair glyphs replace the floor symbol but keep its palette.
        for (pos, glyph) in [(self.entrance, '<'), (self.exit, '>')] {
            let art = self
                .grid
                .at(pos)
                .map(|cell| TileArt { glyph, ..cell.art })
                .unwrap_or(TileArt::new(glyph, TileColor::White, TileColor::Black));
            self.grid
                .patch(pos, CellPatch::default().art(art).passable(true));
        }

        self.post_processing();
        self.populate(rng, populator, start_room);
    }

    /// Nearest room by squared Euclidean distance that is not already
    /// a direct connection of `room`.
    fn nearest_unconnected(&self, room: NodeId) -> Option<NodeId> {
        let anchor = self.nodes.get(room)?.position;
        let mut nearest = None;
        let mut nearest_distance = i64::MAX;
        for &other in &self.rooms {
            if other == room {
                continue;
            }
            if self
                .nodes
                .get(room)
                .is_some_and(|n| n.connections.contains(&other))
            {
                continue;
            }
            let Some(other_node) = self.nodes.get(other) else {
                continue;
            };
            let distance = anchor.distance_sq(other_node.position);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest = Some(other);
            }
        }
        nearest
    }

    /// Try to place one room centred on `center`. Rejects (without
    /// mutating anything) unless the bounding box plus a one-cell
    /// margin is entirely uncarved.
    pub(crate) fn add_room(
        &mut self,
        populator: &mut dyn Populator,
        rng: &mut GameRng,
        center: Pos,
        width: i32,
        height: i32,
    ) -> bool {
        let bounds = Bounds {
            left: center.x - width / 2,
            top: center.y - height / 2,
            right: center.x + (width + 1) / 2,
            bottom: center.y + (height + 1) / 2,
        };

        for i in bounds.left - 1..=bounds.right + 1 {
            for j in bounds.top - 1..=bounds.bottom + 1 {
                match self.grid.get(i, j) {
                    Some(cell) if cell.empty => {}
                    _ => return false,
                }
            }
        }

        let name = populator.node_name(rng, true);
        let id = self.nodes.insert(Node::room(name, center, bounds));

        for i in bounds.left..=bounds.right {
            for j in bounds.top..=bounds.bottom {
                let on_edge =
                    i == bounds.left || j == bounds.top || i == bounds.right || j == bounds.bottom;
                let patch = if on_edge {
                    CellPatch::default().art(ROOM_WALL).passable(false).node(id)
                } else {
                    CellPatch::default().art(ROOM_FLOOR).passable(true).node(id)
                };
                self.grid.patch(Pos::new(i, j), patch);
            }
        }

        self.rooms.push(id);
        true
    }

    /// Carve a hallway from `start_room` toward `end_room` with a
    /// greedy axis walk. May adopt and merge pre-existing hallways it
    /// runs into, or terminate early inside an unrelated room.
    /// Returns the number of newly added wall cells.
    pub(crate) fn draw_hallway(
        &mut self,
        populator: &mut dyn Populator,
        rng: &mut GameRng,
        start_room: NodeId,
        mut end_room: NodeId,
    ) -> u32 {
        let Some(start) = self.nodes.get(start_room).map(|n| n.position) else {
            return 0;
        };
        let Some(mut end_pos) = self.nodes.get(end_room).map(|n| n.position) else {
            return 0;
        };

        let mut current = start;
        let mut dx = end_pos.x - current.x;
        let mut dy = end_pos.y - current.y;
        let mut axis = Pos::default();
        update_axis(&mut axis, dx, dy);

        let mut floors: Vec<Pos> = Vec::new();
        let mut wall_order: Vec<Pos> = Vec::new();
        let mut wall_seen: HashSet<Pos> = HashSet::new();
        let mut hallway: Option<NodeId> = None;

        // The walk has no global re-route; a hostile layout could pin
        // it in place, so bound the step count like any other search.
        let step_budget = self.grid.area() * 4;
        let mut steps = 0usize;

        while current != end_pos {
            steps += 1;
            if steps > step_budget {
                break;
            }

            dx = end_pos.x - current.x;
            dy = end_pos.y - current.y;
            if dx == 0 || dy == 0 {
                update_axis(&mut axis, dx, dy);
            }

            // Corner trap: two claimed, impassable cells dead ahead.
            let blocked = |p: Pos| {
                self.grid
                    .at(p)
                    .is_some_and(|c| !c.passable && c.node.is_some())
            };
            if blocked(Pos::new(current.x + axis.x, current.y + axis.y))
                && blocked(Pos::new(current.x + 2 * axis.x, current.y + 2 * axis.y))
            {
                update_axis(&mut axis, dx, dy);
            }

            let leaving_room = self
                .grid
                .at(current)
                .and_then(|c| c.node)
                .and_then(|id| self.nodes.get(id))
                .is_some_and(|n| n.is_room());

            current = Pos::new(current.x + axis.x, current.y + axis.y);

            for i in -1..=1 {
                for j in -1..=1 {
                    let pos = Pos::new(current.x + i, current.y + j);
                    if wall_seen.insert(pos) {
                        wall_order.push(pos);
                    }
                    let (passable, location) = match self.grid.at(pos) {
                        Some(cell) => (cell.passable, cell.node),
                        None => (false, None),
                    };

                    // Brushing against an existing hallway: adopt it as
                    // the carving target, merging any hallway already
                    // adopted earlier in this walk.
                    if (i == 0 || j == 0)
                        && passable
                        && !leaving_room
                        && let Some(location) = location
                        && self.nodes.get(location).is_some_and(|n| n.is_hallway())
                    {
                        if let Some(in_progress) = hallway
                            && in_progress != location
                        {
                            self.merge_hallways(location, in_progress);
                        }
                        hallway = Some(location);
                        // Already reaches the target room: stop here.
                        if self
                            .nodes
                            .get(location)
                            .is_some_and(|n| n.connections.contains(&end_room))
                        {
                            end_pos = current;
                        }
                    }

                    if i == 0 && j == 0 {
                        floors.push(pos);
                        // Tunnelled into an unrelated room: it becomes
                        // the new destination.
                        if let Some(location) = location
                            && location != start_room
                            && let Some(node) = self.nodes.get(location)
                            && node.is_room()
                        {
                            end_pos = node.position;
                            end_room = location;
                        }
                    }
                }
            }
        }

        // No pre-existing hallway adopted: declare a new one.
        let hallway = match hallway {
            Some(id) => id,
            None => {
                let name = populator.node_name(rng, false);
                let anchor = floors.get(floors.len() / 2).copied().unwrap_or(start);
                let id = self.nodes.insert(Node::hallway(name, anchor));
                self.hallways.push(id);
                id
            }
        };

        self.nodes.connect(start_room, end_room);
        for room in [start_room, end_room] {
            if let Some(node) = self.nodes.get_mut(hallway)
                && !node.connections.contains(&room)
            {
                node.connections.push(room);
            }
        }

        // Commit. Walls only claim still-uncarved cells; floors only
        // carve where nothing passable exists yet, so overlapping a
        // prior structure is a no-op.
        let mut walls_added = 0u32;
        for pos in wall_order {
            if self
                .grid
                .at(pos)
                .is_some_and(|c| !c.passable && c.empty)
            {
                walls_added += 1;
                self.grid.patch(
                    pos,
                    CellPatch::default()
                        .art(HALL_WALL)
                        .passable(false)
                        .node(hallway),
                );
            }
        }

        let mut floors_added = Vec::new();
        for pos in floors {
            if self.grid.at(pos).is_some_and(|c| !c.passable) {
                floors_added.push(pos);
                self.grid.patch(
                    pos,
                    CellPatch::default()
                        .art(HALL_FLOOR)
                        .passable(true)
                        .node(hallway),
                );
            }
        }
        if let Some(node) = self.nodes.get_mut(hallway)
            && let NodeKind::Hallway { squares, .. } = &mut node.kind
        {
            squares.extend(floors_added);
        }

        walls_added
    }

    /// Absorb `other` into `main`. Every cell and connection that
    /// referenced the absorbed hallway is retargeted before it is
    /// removed; nothing may dangle afterwards.
    pub(crate) fn merge_hallways(&mut self, main: NodeId, other: NodeId) {
        if main == other {
            return;
        }
        let Some((other_squares, other_intersections, other_connections)) =
            self.nodes.get(other).and_then(|n| match &n.kind {
                NodeKind::Hallway {
                    squares,
                    intersections,
                } => Some((squares.clone(), intersections.clone(), n.connections.clone())),
                NodeKind::Room { .. } => None,
            })
        else {
            return;
        };

        for pos in &other_squares {
            for neighbour in pos.neighbourhood() {
                if let Some(cell) = self.grid.at_mut(neighbour)
                    && cell.node == Some(other)
                {
                    cell.node = Some(main);
                }
            }
        }

        if let Some(node) = self.nodes.get_mut(main) {
            if let NodeKind::Hallway {
                squares,
                intersections,
            } = &mut node.kind
            {
                squares.extend(other_squares);
                for point in other_intersections {
                    if !intersections.contains(&point) {
                        intersections.push(point);
                    }
                }
            }
            for connection in other_connections {
                if connection != main && !node.connections.contains(&connection) {
                    node.connections.push(connection);
                }
            }
        }

        self.hallways.retain(|&h| h != other);
        self.nodes.remove(other);
    }

    /// Untangle the carved mass. Carving records room-to-room edges
    /// that are only provisional; afterwards the hallway connection
    /// lists are the single source of truth, so every room edge is
    /// re-derived from them.
    pub(crate) fn rebuild_graph(&mut self) {
        for &room in &self.rooms.clone() {
            if let Some(node) = self.nodes.get_mut(room) {
                node.connections.clear();
            }
        }
        for &hallway in &self.hallways.clone() {
            if let Some(node) = self.nodes.get_mut(hallway) {
                node.connections.retain(|&c| c != hallway);
            }
        }
        for &hallway in &self.hallways.clone() {
            let connections = self
                .nodes
                .get(hallway)
                .map(|n| n.connections.clone())
                .unwrap_or_default();
            for room in connections {
                if let Some(node) = self.nodes.get_mut(room)
                    && !node.connections.contains(&hallway)
                {
                    node.connections.push(hallway);
                }
            }
        }
    }

    /// Single pass over the interior: convert doorway-shaped hallway
    /// cells into doors, record hallway junctions as intersections,
    /// and collect room alcoves as valid item spots.
    pub(crate) fn post_processing(&mut self) {
        for x in 1..self.grid.width() - 1 {
            for y in 1..self.grid.height() - 1 {
                let mut room_passable = 0;
                let mut room_blocked = 0;
                let mut hall_passable = 0;

                // Orthogonal cross, centre included.
                for i in -1..=1 {
                    for j in -1..=1 {
                        if i != 0 && j != 0 {
                            continue;
                        }
                        let Some(cell) = self.grid.get(x + i, y + j) else {
                            continue;
                        };
                        let Some(node) = cell.node.and_then(|id| self.nodes.get(id)) else {
                            continue;
                        };
                        if node.is_hallway() {
                            if cell.passable {
                                hall_passable += 1;
                            }
                        } else if cell.passable {
                            room_passable += 1;
                        } else {
                            room_blocked += 1;
                        }
                    }
                }

                let Some(main) = self.grid.get(x, y) else {
                    continue;
                };
                let Some(main_id) = main.node else {
                    continue;
                };
                let main_passable = main.passable;
                let main_is_hallway = self.nodes.get(main_id).is_some_and(|n| n.is_hallway());

                if main_is_hallway && main_passable {
                    if room_passable == 1 && room_blocked == 2 && hall_passable == 2 {
                        self.grid.patch(
                            Pos::new(x, y),
                            CellPatch::default()
                                .art(DOOR_CLOSED)
                                .passable(true)
                                .see_through(false)
                                .door(DOOR_OPEN)
                                .is_open(false),
                        );
                    } else if hall_passable > 3 && room_passable == 0 && room_blocked == 0
                        && let Some(node) = self.nodes.get_mut(main_id)
                        && let NodeKind::Hallway { intersections, .. } = &mut node.kind
                    {
                        intersections.push(Pos::new(x, y));
                    }
                } else if !main_is_hallway
                    && main_passable
                    && room_passable < 4
                    && hall_passable == 0
                    && let Some(node) = self.nodes.get_mut(main_id)
                    && let NodeKind::Room { item_spots, .. } = &mut node.kind
                {
                    item_spots.push(Pos::new(x, y));
                }
            }
        }
    }

    /// Place content through the collaborator hooks. Difficulty
    /// scales with graph distance from the entrance.
    fn populate(&mut self, rng: &mut GameRng, populator: &mut dyn Populator, start_room: NodeId) {
        populator.clear_names();
        for &room in &self.rooms {
            let Some(node) = self.nodes.get(room) else {
                continue;
            };
            let distance = self.node_distance(start_room, room).unwrap_or(0);
            let total_level = self.level + distance;

            if let NodeKind::Room { item_spots, .. } = &node.kind
                && let Some(spot) = rng.choose(item_spots)
            {
                populator.place_doodad(*spot, total_level);
            }
            if room == start_room {
                continue;
            }
            if rng.fraction() > 0.5 {
                populator.place_monster(node.position, total_level);
            }
        }
    }
}
