//! Full-frame rendering against ratatui's test backend.

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use vein_core::{GameRng, MapParams};
use vein_tui::{App, Theme};

fn frame_chars(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol().chars().next().unwrap_or(' ')).collect()
}

#[test]
fn test_frame_shows_player_and_status() {
    let params = MapParams {
        width: 40,
        height: 40,
        level: 1,
    };
    let mut app = App::new(params, GameRng::new(21), Theme::dark()).unwrap();

    let backend = TestBackend::new(60, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let chars = frame_chars(&terminal);
    assert!(chars.contains('@'), "player glyph missing from the frame");
    assert!(chars.contains("Depth:1"), "status line missing");
}

#[test]
fn test_frame_survives_tiny_terminal() {
    let params = MapParams {
        width: 40,
        height: 40,
        level: 1,
    };
    let mut app = App::new(params, GameRng::new(21), Theme::dark()).unwrap();

    let backend = TestBackend::new(10, 4);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
}
