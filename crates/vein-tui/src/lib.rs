//! vein-tui: terminal front-end for the vein dungeon core.
//!
//! Renders the map, routes key presses into game actions, and hosts
//! the travel overlay and message log.

pub mod app;
pub mod display;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use display::BufferDisplay;
pub use theme::Theme;
