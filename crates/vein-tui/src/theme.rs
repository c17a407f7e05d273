//! Terminal color theme.
//!
//! Maps the core's named tile colors onto terminal colors, with a
//! light-background variant. Auto-detects via COLORFGBG, or manual
//! override with VEIN_LIGHT_BG=1.

use ratatui::style::Color;

use vein_core::TileColor;

/// Color theme for the terminal UI. UI code takes its colors from
/// here instead of hardcoding `Color::` values.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground text.
    pub text: Color,
    /// Secondary/hint text and out-of-sight terrain.
    pub text_dim: Color,
    /// Default border color.
    pub border: Color,
    /// Overlay border (travel menu).
    pub border_action: Color,
    /// The player glyph.
    pub player: Color,
    /// Monster glyphs.
    pub monster: Color,
    /// Doodad glyphs.
    pub doodad: Color,
    light: bool,
}

impl Theme {
    /// Dark terminal background theme (default).
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_action: Color::Yellow,
            player: Color::White,
            monster: Color::Red,
            doodad: Color::Yellow,
            light: false,
        }
    }

    /// Light terminal background theme.
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::Gray,
            border: Color::DarkGray,
            border_action: Color::Yellow,
            player: Color::Black,
            monster: Color::Red,
            doodad: Color::Yellow,
            light: true,
        }
    }

    /// Auto-detect the terminal background and pick a theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Terminal color for a core tile color. Black and white flip on
    /// light backgrounds so terrain stays readable.
    pub fn tile(&self, color: TileColor) -> Color {
        match color {
            TileColor::Black => {
                if self.light {
                    Color::White
                } else {
                    Color::Black
                }
            }
            TileColor::White => {
                if self.light {
                    Color::Black
                } else {
                    Color::White
                }
            }
            TileColor::Gray => Color::Gray,
            TileColor::DarkGray => Color::DarkGray,
            TileColor::Orange => Color::Rgb(255, 140, 0),
            TileColor::Brown => Color::Rgb(139, 90, 43),
            TileColor::Green => Color::Green,
            TileColor::Yellow => Color::Yellow,
            TileColor::Crimson => Color::Rgb(220, 20, 60),
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("VEIN_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with 0-15 indices; light backgrounds
        // typically report bg >= 7, excluding bright black.
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_keeps_black_black() {
        let theme = Theme::dark();
        assert_eq!(theme.tile(TileColor::Black), Color::Black);
        assert_eq!(theme.tile(TileColor::White), Color::White);
    }

    #[test]
    fn test_light_theme_flips_black_and_white() {
        let theme = Theme::light();
        assert_eq!(theme.tile(TileColor::Black), Color::White);
        assert_eq!(theme.tile(TileColor::White), Color::Black);
    }

    #[test]
    fn test_saturated_colors_same_both_themes() {
        let dark = Theme::dark();
        let light = Theme::light();
        assert_eq!(dark.tile(TileColor::Green), light.tile(TileColor::Green));
        assert_eq!(dark.tile(TileColor::Orange), light.tile(TileColor::Orange));
        assert_eq!(dark.tile(TileColor::Crimson), light.tile(TileColor::Crimson));
    }
}
