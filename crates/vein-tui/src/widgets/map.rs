//! Map display widget.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use vein_core::Pos;

use crate::app::{Spawn, SpawnKind};
use crate::display::BufferDisplay;
use crate::theme::Theme;

/// Renders the tile buffer, scrolled so the viewpoint stays centered,
/// with the player and any visible spawns drawn on top.
pub struct MapWidget<'a> {
    display: &'a BufferDisplay,
    theme: &'a Theme,
    player: Pos,
    spawns: &'a [Spawn],
}

impl<'a> MapWidget<'a> {
    pub fn new(
        display: &'a BufferDisplay,
        theme: &'a Theme,
        player: Pos,
        spawns: &'a [Spawn],
    ) -> Self {
        Self {
            display,
            theme,
            player,
            spawns,
        }
    }

    fn cell_display(&self, x: i32, y: i32) -> Option<(char, Style)> {
        let (art, visible) = self.display.get(x, y)?;
        let pos = Pos::new(x, y);

        if pos == self.player {
            return Some((
                '@',
                Style::default().fg(self.theme.player).bold(),
            ));
        }

        if visible
            && let Some(spawn) = self.spawns.iter().find(|s| s.pos == pos)
        {
            let (glyph, color) = match spawn.kind {
                SpawnKind::Monster => ('g', self.theme.monster),
                SpawnKind::Doodad => ('%', self.theme.doodad),
            };
            return Some((glyph, Style::default().fg(color)));
        }

        if art.glyph == char::default() {
            return None;
        }

        // Out-of-sight terrain stays on screen, dimmed.
        let style = if visible {
            Style::default()
                .fg(self.theme.tile(art.fg))
                .bg(self.theme.tile(art.bg))
        } else {
            Style::default().fg(self.theme.text_dim)
        };
        Some((art.glyph, style))
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let center = self.display.center();
        let offset_x = center.x - i32::from(area.width) / 2;
        let offset_y = center.y - i32::from(area.height) / 2;

        for row in 0..area.height {
            for col in 0..area.width {
                let map_x = offset_x + i32::from(col);
                let map_y = offset_y + i32::from(row);
                if let Some((glyph, style)) = self.cell_display(map_x, map_y) {
                    buf[(area.x + col, area.y + row)]
                        .set_char(glyph)
                        .set_style(style);
                }
            }
        }
    }
}
