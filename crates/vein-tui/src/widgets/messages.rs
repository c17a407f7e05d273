//! Message log widget.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Renders the most recent messages, one per line, oldest first.
/// Important messages render in the primary text color, chatter dim.
pub struct MessagesWidget<'a> {
    lines: &'a [(String, u8)],
    theme: &'a Theme,
}

impl<'a> MessagesWidget<'a> {
    pub fn new(lines: &'a [(String, u8)], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }
}

impl Widget for MessagesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, (message, importance)) in self.lines.iter().enumerate() {
            if row as u16 >= area.height {
                break;
            }
            let color = if *importance > 0 {
                self.theme.text
            } else {
                self.theme.text_dim
            };
            buf.set_string(
                area.x,
                area.y + row as u16,
                message,
                Style::default().fg(color),
            );
        }
    }
}
