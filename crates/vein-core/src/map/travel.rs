//! Travel options: compass-labelled routes from a position to the
//! interesting places adjacent in the navigation graph.

use strum::Display;

use super::dungeon::Dungeon;
use super::node::{NodeId, NodeKind};
use crate::consts::HEADING_STEPS;
use crate::pos::Pos;

/// Eight-way compass direction, derived from a route's initial
/// heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Compass {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl Compass {
    /// Map a heading in degrees (0 = east, 90 = north, normalized to
    /// [0, 360)) to a compass direction. Bands are inclusive on their
    /// upper edge and east wraps the seam.
    pub fn from_angle(angle: f64) -> Self {
        if angle <= 20.0 || angle >= 340.0 {
            Compass::East
        } else if angle <= 70.0 {
            Compass::Northeast
        } else if angle <= 110.0 {
            Compass::North
        } else if angle <= 160.0 {
            Compass::Northwest
        } else if angle <= 200.0 {
            Compass::West
        } else if angle <= 250.0 {
            Compass::Southwest
        } else if angle <= 290.0 {
            Compass::South
        } else {
            Compass::Southeast
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Compass::East => "east",
            Compass::Northeast => "north-east",
            Compass::North => "north",
            Compass::Northwest => "north-west",
            Compass::West => "west",
            Compass::Southwest => "south-west",
            Compass::South => "south",
            Compass::Southeast => "south-east",
        }
    }
}

/// How a travel option is announced to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelDirection {
    Compass(Compass),
    /// No walkable route was found; the destination is only known by
    /// name.
    Nebulous(String),
}

impl TravelDirection {
    pub fn describe(&self) -> String {
        match self {
            TravelDirection::Compass(compass) => format!("Move {}.", compass.label()),
            TravelDirection::Nebulous(name) => format!("Move nebulously to the {name}..."),
        }
    }
}

/// One reachable destination from the queried position. Recomputed on
/// every query, never stored.
#[derive(Debug, Clone)]
pub struct TravelOption {
    /// Node the option points at. A skipped-through corridor keeps
    /// the corridor here even though `position` crosses to its far
    /// side.
    pub node: NodeId,
    /// Where travel ends.
    pub position: Pos,
    /// Set when the route passes straight through a corridor with no
    /// junction: the corridor point worth pausing at.
    pub mid_position: Option<Pos>,
    pub direction: TravelDirection,
    /// Initial heading in degrees; `None` for nebulous options.
    pub angle: Option<f64>,
    pub route: Vec<Pos>,
}

struct Candidate {
    node: NodeId,
    position: Pos,
}

impl Dungeon {
    /// Resolve the travel options available from `position`.
    ///
    /// Candidates are the connected nodes of the node the position
    /// stands in (hallways contribute their nearest intersection when
    /// they have any) plus, when standing in a hallway, its own other
    /// intersections. A candidate whose target lies on the route to
    /// another candidate is dropped as redundant. Options come back
    /// sorted by descending heading angle, nebulous ones last.
    pub fn travel_options(&self, position: Pos) -> Vec<TravelOption> {
        let Some(here_id) = self.grid.at(position).and_then(|c| c.node) else {
            return Vec::new();
        };
        let Some(here) = self.nodes.get(here_id) else {
            return Vec::new();
        };

        let mut candidates: Vec<Candidate> = Vec::new();
        for &other_id in &here.connections {
            let Some(other) = self.nodes.get(other_id) else {
                continue;
            };
            let mut target = None;
            if let NodeKind::Hallway { intersections, .. } = &other.kind
                && !intersections.is_empty()
            {
                target = self.nearest_intersection(position, intersections);
            }
            candidates.push(Candidate {
                node: other_id,
                position: target.unwrap_or(other.position),
            });
        }
        if let NodeKind::Hallway { intersections, .. } = &here.kind {
            for &point in intersections {
                if point != position {
                    candidates.push(Candidate {
                        node: here_id,
                        position: point,
                    });
                }
            }
        }

        let targets: Vec<Pos> = candidates.iter().map(|c| c.position).collect();
        let mut options: Vec<TravelOption> = Vec::new();

        'candidates: for (index, candidate) in candidates.iter().enumerate() {
            let route = self.find_path(position, candidate.position, true);
            if route.len() > 1 {
                // Redundant if some other candidate's target sits on
                // this route; travelling there passes it anyway.
                for step in &route {
                    if targets
                        .iter()
                        .enumerate()
                        .any(|(i, target)| i != index && target == step)
                    {
                        continue 'candidates;
                    }
                }

                // Heading: sum of the offsets of the first few steps,
                // with y flipped so north reads as 90 degrees.
                let mut dx = 0i64;
                let mut dy = 0i64;
                for step in route.iter().take(HEADING_STEPS) {
                    dx += i64::from(step.x - position.x);
                    dy += i64::from(step.y - position.y);
                }
                let mut angle = (-(dy as f64)).atan2(dx as f64).to_degrees();
                if angle < 0.0 {
                    angle += 360.0;
                }
                options.push(TravelOption {
                    node: candidate.node,
                    position: candidate.position,
                    mid_position: None,
                    direction: TravelDirection::Compass(Compass::from_angle(angle)),
                    angle: Some(angle),
                    route,
                });
            } else if route.is_empty() {
                let name = self
                    .nodes
                    .get(candidate.node)
                    .map(|n| n.name.clone())
                    .unwrap_or_default();
                options.push(TravelOption {
                    node: candidate.node,
                    position: candidate.position,
                    mid_position: None,
                    direction: TravelDirection::Nebulous(name),
                    angle: None,
                    route,
                });
            }
            // A one-step route is trivially short: dropped outright.
        }

        // A two-connection hallway offers no decision point; skip
        // through to its far side and keep the corridor as a waypoint.
        for option in &mut options {
            if let Some(node) = self.nodes.get(option.node)
                && node.is_hallway()
                && node.connections.len() == 2
            {
                let far = node
                    .connections
                    .iter()
                    .copied()
                    .find(|&c| c != here_id)
                    .or_else(|| node.connections.first().copied());
                if let Some(far) = far
                    && let Some(far_node) = self.nodes.get(far)
                {
                    option.mid_position = Some(option.position);
                    option.position = far_node.position;
                }
            }
        }

        options.sort_by(|a, b| {
            b.angle
                .partial_cmp(&a.angle)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        options
    }

    /// The intersection with the shortest walkable route from
    /// `position`; earlier entries win ties.
    fn nearest_intersection(&self, position: Pos, intersections: &[Pos]) -> Option<Pos> {
        let mut best = None;
        let mut best_len = usize::MAX;
        for &point in intersections {
            let route = self.find_path(position, point, false);
            if !route.is_empty() && route.len() < best_len {
                best_len = route.len();
                best = Some(point);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::NullPopulator;
    use crate::map::dungeon::MapParams;
    use crate::rng::GameRng;

    #[test]
    fn test_compass_from_angle_bands() {
        assert_eq!(Compass::from_angle(0.0), Compass::East);
        assert_eq!(Compass::from_angle(20.0), Compass::East);
        assert_eq!(Compass::from_angle(340.0), Compass::East);
        assert_eq!(Compass::from_angle(359.9), Compass::East);
        assert_eq!(Compass::from_angle(45.0), Compass::Northeast);
        assert_eq!(Compass::from_angle(90.0), Compass::North);
        assert_eq!(Compass::from_angle(135.0), Compass::Northwest);
        assert_eq!(Compass::from_angle(180.0), Compass::West);
        assert_eq!(Compass::from_angle(225.0), Compass::Southwest);
        assert_eq!(Compass::from_angle(270.0), Compass::South);
        assert_eq!(Compass::from_angle(315.0), Compass::Southeast);
    }

    #[test]
    fn test_direction_descriptions() {
        assert_eq!(
            TravelDirection::Compass(Compass::North).describe(),
            "Move north."
        );
        assert_eq!(
            TravelDirection::Nebulous("old vault".into()).describe(),
            "Move nebulously to the old vault..."
        );
    }

    /// Two rooms joined by a straight west-to-east corridor.
    fn corridor_fixture() -> Dungeon {
        let mut d = super::super::dungeon::Dungeon::blank(MapParams {
            width: 30,
            height: 21,
            level: 1,
        })
        .unwrap();
        let mut rng = GameRng::new(1);
        let mut populator = NullPopulator::default();
        assert!(d.add_room(&mut populator, &mut rng, Pos::new(5, 10), 5, 5));
        assert!(d.add_room(&mut populator, &mut rng, Pos::new(22, 10), 5, 5));
        let (west, east) = (d.rooms()[0], d.rooms()[1]);
        d.draw_hallway(&mut populator, &mut rng, west, east);
        d.rebuild_graph();
        d.post_processing();
        d
    }

    #[test]
    fn test_travel_east_through_a_plain_corridor() {
        let d = corridor_fixture();
        let (west, east) = (d.rooms()[0], d.rooms()[1]);
        let hallway = d.hallways()[0];

        let options = d.travel_options(Pos::new(5, 10));
        assert_eq!(options.len(), 1);
        let option = &options[0];

        // The junction-free two-connection corridor is skipped
        // through: the landing position crosses to the far room while
        // the option still names the corridor, with its anchor kept as
        // a waypoint.
        assert_eq!(option.node, hallway);
        assert_eq!(option.position, d.node(east).unwrap().position);
        assert_eq!(option.mid_position, Some(d.node(hallway).unwrap().position));
        assert_eq!(option.direction, TravelDirection::Compass(Compass::East));
        assert!(option.angle.is_some());
        assert!(!option.route.is_empty());

        // And the mirror image looks west.
        let back = d.travel_options(Pos::new(22, 10));
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].node, hallway);
        assert_eq!(back[0].position, d.node(west).unwrap().position);
        assert_eq!(back[0].direction, TravelDirection::Compass(Compass::West));
    }

    #[test]
    fn test_goal_cell_excluded_from_route() {
        let d = corridor_fixture();
        let options = d.travel_options(Pos::new(5, 10));
        let option = &options[0];
        // Goal-exclusive pathfinding: the route stops short of the
        // target cell itself.
        assert_ne!(option.route.last(), Some(&option.position));
    }

    #[test]
    fn test_unknown_position_yields_nothing() {
        let d = corridor_fixture();
        assert!(d.travel_options(Pos::new(0, 0)).is_empty());
        assert!(d.travel_options(Pos::new(-3, -3)).is_empty());
    }

    #[test]
    fn test_options_sorted_by_descending_angle() {
        let d = corridor_fixture();
        for position in [Pos::new(5, 10), Pos::new(22, 10)] {
            let options = d.travel_options(position);
            let angles: Vec<f64> = options.iter().filter_map(|o| o.angle).collect();
            for pair in angles.windows(2) {
                assert!(pair[0] >= pair[1]);
            }
            // Nebulous options, if any, trail the angled ones.
            let first_nebulous = options.iter().position(|o| o.angle.is_none());
            if let Some(idx) = first_nebulous {
                assert!(options[idx..].iter().all(|o| o.angle.is_none()));
            }
        }
    }
}
