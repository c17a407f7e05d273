//! Tuning constants shared across the crate.

/// Default map width in cells.
pub const DEFAULT_WIDTH: i32 = 30;

/// Default map height in cells.
pub const DEFAULT_HEIGHT: i32 = 30;

/// Player sight radius for the field-of-view sweep.
pub const SIGHT_RADIUS: i32 = 8;

/// Smallest room extent (walls included).
pub const ROOM_MIN_EXTENT: i32 = 5;

/// Largest room extent (walls included).
pub const ROOM_MAX_EXTENT: i32 = 9;

/// Fraction of the grid area the generator tries to cover with rooms.
pub const FILL_FRACTION: f64 = 0.5;

/// Room placement attempts before the generator gives up.
pub const PLACEMENT_BUDGET: u32 = 100;

/// Path cost of stepping onto a cell occupied by a living actor.
/// Discourages, but does not forbid, routing through them.
pub const OCCUPIED_WEIGHT: u32 = 4;

/// Route steps summed when resolving a travel option's heading.
pub const HEADING_STEPS: usize = 10;
