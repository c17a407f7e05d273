//! Navigation graph nodes.
//!
//! Rooms and hallways form an undirected, intentionally cyclic graph
//! (Room <-> Hallway <-> Room). Nodes live in an arena and refer to
//! each other by stable index, never by nested ownership.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::pos::Pos;

/// Stable handle into the node arena. Cells carry one of these as a
/// weak back-reference to their owning room or hallway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

/// Room boundary rectangle, walls included.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Node-kind-specific payload, dispatched by pattern match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    Room {
        bounds: Bounds,
        /// Interior alcove tiles suitable for item placement.
        item_spots: Vec<Pos>,
    },
    Hallway {
        /// Every floor cell belonging to this hallway.
        squares: HashSet<Pos>,
        /// Junction cells inside the hallway, graph-visible decision
        /// points for travel.
        intersections: Vec<Pos>,
    },
}

/// A vertex of the navigation graph: a room or a hallway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Anchor: room centre, or the first carved hallway floor cell.
    pub position: Pos,
    /// Undirected adjacency, arena indices. No self-loops.
    pub connections: Vec<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    pub fn room(name: String, position: Pos, bounds: Bounds) -> Self {
        Self {
            name,
            position,
            connections: Vec::new(),
            kind: NodeKind::Room {
                bounds,
                item_spots: Vec::new(),
            },
        }
    }

    pub fn hallway(name: String, position: Pos) -> Self {
        Self {
            name,
            position,
            connections: Vec::new(),
            kind: NodeKind::Hallway {
                squares: HashSet::new(),
                intersections: Vec::new(),
            },
        }
    }

    pub fn is_room(&self) -> bool {
        matches!(self.kind, NodeKind::Room { .. })
    }

    pub fn is_hallway(&self) -> bool {
        matches!(self.kind, NodeKind::Hallway { .. })
    }
}

/// Arena of graph nodes. Slots are tombstoned on removal so that
/// surviving ids stay stable through hallway merges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Some(node));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    /// Remove a node. The caller must already have retargeted every
    /// cell and connection that referenced it.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.slots.get_mut(id.0 as usize)?.take()
    }

    /// Record an undirected edge. Deduplicated; self-loops ignored.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        if let Some(node) = self.get_mut(a)
            && !node.connections.contains(&b)
        {
            node.connections.push(b);
        }
        if let Some(node) = self.get_mut(b)
            && !node.connections.contains(&a)
        {
            node.connections.push(a);
        }
    }

    /// Live node count.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_at(arena: &mut NodeArena, x: i32, y: i32) -> NodeId {
        arena.insert(Node::room("chamber".into(), Pos::new(x, y), Bounds::default()))
    }

    #[test]
    fn test_connect_deduplicates() {
        let mut arena = NodeArena::new();
        let a = room_at(&mut arena, 0, 0);
        let b = room_at(&mut arena, 5, 0);
        arena.connect(a, b);
        arena.connect(a, b);
        arena.connect(b, a);
        assert_eq!(arena.get(a).unwrap().connections, vec![b]);
        assert_eq!(arena.get(b).unwrap().connections, vec![a]);
    }

    #[test]
    fn test_connect_rejects_self_loop() {
        let mut arena = NodeArena::new();
        let a = room_at(&mut arena, 0, 0);
        arena.connect(a, a);
        assert!(arena.get(a).unwrap().connections.is_empty());
    }

    #[test]
    fn test_remove_tombstones_slot() {
        let mut arena = NodeArena::new();
        let a = room_at(&mut arena, 0, 0);
        let b = room_at(&mut arena, 5, 0);
        assert_eq!(arena.len(), 2);
        arena.remove(a);
        assert_eq!(arena.len(), 1);
        assert!(arena.get(a).is_none());
        // Surviving ids stay stable.
        assert!(arena.get(b).is_some());
    }
}
