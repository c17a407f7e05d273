//! UI widgets.

mod map;
mod messages;
mod status;

pub use map::MapWidget;
pub use messages::MessagesWidget;
pub use status::StatusWidget;
