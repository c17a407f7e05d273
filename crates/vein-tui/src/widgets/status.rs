//! Status line widget.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use vein_core::Pos;

use crate::theme::Theme;

/// One-line status bar: depth, position, and where the player stands.
pub struct StatusWidget<'a> {
    depth: u32,
    player: Pos,
    location: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(depth: u32, player: Pos, location: &'a str, theme: &'a Theme) -> Self {
        Self {
            depth,
            player,
            location,
            theme,
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = format!(
            "Depth:{}  Pos:{},{}  {}",
            self.depth, self.player.x, self.player.y, self.location,
        );
        buf.set_string(area.x, area.y, line, Style::default().fg(self.theme.text));
    }
}
