//! Terminal dungeon explorer.
//!
//! Main entry point: argument parsing, terminal setup, event loop.

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use vein_core::{GameRng, MapParams};
use vein_tui::{App, Theme};

/// Explore a procedurally generated dungeon.
#[derive(Parser, Debug)]
#[command(name = "vein")]
#[command(author, version, about = "vein - dig through the dungeon!", long_about = None)]
struct Args {
    /// Generation seed; random when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Map width in cells
    #[arg(short = 'W', long = "width", default_value_t = 40)]
    width: i32,

    /// Map height in cells
    #[arg(short = 'H', long = "height", default_value_t = 40)]
    height: i32,

    /// Starting depth
    #[arg(short = 'l', long = "level", default_value_t = 1)]
    level: u32,

    /// Force the light-background theme
    #[arg(long = "light")]
    light: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let theme = if args.light {
        Theme::light()
    } else {
        Theme::detect()
    };
    let params = MapParams {
        width: args.width,
        height: args.height,
        level: args.level,
    };

    let mut app = match App::new(params, rng, theme) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("cannot generate map: {err}");
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }

        if app.should_quit() {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
