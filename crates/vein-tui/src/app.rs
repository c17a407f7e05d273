//! Application state and main UI controller.

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem};

use vein_core::hooks::{ActorId, MessageSink, Populator};
use vein_core::map::TravelOption;
use vein_core::{Dungeon, GameRng, MapError, MapParams, Pos};

use crate::display::BufferDisplay;
use crate::input::{Command, key_to_command};
use crate::theme::Theme;
use crate::widgets::{MapWidget, MessagesWidget, StatusWidget};

/// What the app is currently displaying/waiting for.
#[derive(Debug)]
enum UiMode {
    Normal,
    /// Travel overlay; pick a destination by number.
    Travel(Vec<TravelOption>),
}

/// Kind of placed map dressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Monster,
    Doodad,
}

/// Something the populator placed on the map. Inert dressing: it
/// occupies a cell for pathfinding weight and gets a glyph, nothing
/// more.
#[derive(Debug, Clone, Copy)]
pub struct Spawn {
    pub pos: Pos,
    pub kind: SpawnKind,
    pub level: u32,
}

const ROOM_EPITHETS: &[&str] = &[
    "collapsed", "flooded", "dusty", "echoing", "sunken", "gilded", "broken", "silent",
    "forgotten", "cold",
];
const ROOM_NOUNS: &[&str] = &[
    "gallery", "vault", "chamber", "cistern", "shrine", "workshop", "barracks", "larder",
    "crypt", "hall",
];
const HALL_NOUNS: &[&str] = &[
    "passage", "crawl", "tunnel", "gash", "cut", "bore", "seam", "gullet",
];

/// Populator that names nodes from small word lists and records every
/// placement for the renderer.
#[derive(Debug, Default)]
struct DenPopulator {
    used: Vec<String>,
    spawns: Vec<Spawn>,
}

impl DenPopulator {
    fn into_spawns(self) -> Vec<Spawn> {
        self.spawns
    }
}

impl Populator for DenPopulator {
    fn clear_names(&mut self) {
        self.used.clear();
    }

    fn node_name(&mut self, rng: &mut GameRng, is_room: bool) -> String {
        let nouns = if is_room { ROOM_NOUNS } else { HALL_NOUNS };
        for _ in 0..8 {
            let epithet = rng.choose(ROOM_EPITHETS).copied().unwrap_or("bare");
            let noun = rng.choose(nouns).copied().unwrap_or("space");
            let name = format!("{epithet} {noun}");
            if !self.used.contains(&name) {
                self.used.push(name.clone());
                return name;
            }
        }
        // Word lists exhausted; fall back to a numbered name.
        let name = format!("unnamed place {}", self.used.len() + 1);
        self.used.push(name.clone());
        name
    }

    fn place_monster(&mut self, pos: Pos, total_level: u32) {
        self.spawns.push(Spawn {
            pos,
            kind: SpawnKind::Monster,
            level: total_level,
        });
    }

    fn place_doodad(&mut self, pos: Pos, total_level: u32) {
        self.spawns.push(Spawn {
            pos,
            kind: SpawnKind::Doodad,
            level: total_level,
        });
    }
}

/// Rolling message log; also the sink the game narrates into.
#[derive(Debug, Default)]
pub struct MessageLog {
    lines: Vec<(String, u8)>,
}

impl MessageLog {
    const CAP: usize = 100;

    /// The `count` most recent messages, oldest first.
    pub fn recent(&self, count: usize) -> &[(String, u8)] {
        let start = self.lines.len().saturating_sub(count);
        &self.lines[start..]
    }
}

impl MessageSink for MessageLog {
    fn post(&mut self, message: &str, importance: u8) {
        self.lines.push((message.to_string(), importance));
        if self.lines.len() > Self::CAP {
            self.lines.remove(0);
        }
    }
}

/// Application state.
pub struct App {
    dungeon: Dungeon,
    spawns: Vec<Spawn>,
    display: BufferDisplay,
    theme: Theme,
    rng: GameRng,
    params: MapParams,
    player: Pos,
    log: MessageLog,
    mode: UiMode,
    should_quit: bool,
}

impl App {
    /// Generate the first level and stand the player on its entrance.
    pub fn new(params: MapParams, mut rng: GameRng, theme: Theme) -> Result<Self, MapError> {
        let (dungeon, spawns) = generate_level(&mut rng, params)?;
        let player = dungeon.entrance;
        let mut app = Self {
            dungeon,
            spawns,
            display: BufferDisplay::new(),
            theme,
            rng,
            params,
            player,
            log: MessageLog::default(),
            mode: UiMode::Normal,
            should_quit: false,
        };
        app.log.post("You enter the vein.", 1);
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Route one terminal event.
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let UiMode::Travel(_) = self.mode {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.mode = UiMode::Normal,
                KeyCode::Char(c @ '1'..='9') => {
                    self.travel_to(c as usize - '1' as usize);
                }
                _ => {}
            }
            return;
        }

        if let Some(command) = key_to_command(key) {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Move(dir) => self.step(dir.delta()),
            Command::Descend => {
                if self.player == self.dungeon.exit {
                    self.descend();
                } else {
                    self.log.post("There is nothing here to descend.", 0);
                }
            }
            Command::Travel => {
                let options = self.dungeon.travel_options(self.player);
                if options.is_empty() {
                    self.log.post("Nowhere to travel from here.", 0);
                } else {
                    self.mode = UiMode::Travel(options);
                }
            }
            Command::Look => {
                let name = self
                    .dungeon
                    .square(self.player.x, self.player.y)
                    .and_then(|c| c.node)
                    .and_then(|id| self.dungeon.node(id))
                    .map(|n| n.name.clone());
                match name {
                    Some(name) => self.log.post(&format!("You are in the {name}."), 0),
                    None => self.log.post("You are nowhere in particular.", 0),
                }
            }
            Command::Redraw => {}
            Command::Quit => self.should_quit = true,
        }
    }

    fn step(&mut self, (dx, dy): (i32, i32)) {
        let target = Pos::new(self.player.x + dx, self.player.y + dy);
        let Some(cell) = self.dungeon.square(target.x, target.y) else {
            return;
        };

        // Bumping a closed door opens it; moving through takes
        // another step.
        if cell.door.is_some() && !cell.is_open {
            self.dungeon.open_door(target);
            self.log.post("You push the door open.", 1);
            return;
        }
        if !cell.passable {
            return;
        }

        self.player = target;
        if self.player == self.dungeon.exit {
            self.log.post("A staircase leads deeper. Press > to take it.", 1);
        }
    }

    fn descend(&mut self) {
        let params = MapParams {
            level: self.dungeon.level + 1,
            ..self.params
        };
        match generate_level(&mut self.rng, params) {
            Ok((dungeon, spawns)) => {
                self.player = dungeon.entrance;
                self.dungeon = dungeon;
                self.spawns = spawns;
                self.log
                    .post(&format!("You descend to depth {}.", params.level), 1);
            }
            Err(err) => self.log.post(&format!("The way down is sealed: {err}"), 1),
        }
    }

    fn travel_to(&mut self, index: usize) {
        let UiMode::Travel(options) = &self.mode else {
            return;
        };
        let Some(option) = options.get(index).cloned() else {
            return;
        };
        self.player = option.position;
        self.log.post(&option.direction.describe(), 1);
        // Name where the player lands; a skipped-through corridor
        // keeps the corridor in `node`, not the destination.
        let arrival = self
            .dungeon
            .square(self.player.x, self.player.y)
            .and_then(|cell| cell.node)
            .and_then(|id| self.dungeon.node(id))
            .map(|n| n.name.clone());
        if let Some(name) = arrival {
            self.log.post(&format!("You arrive at the {name}."), 0);
        }
        self.mode = UiMode::Normal;
    }

    /// Draw one frame: refresh visibility, then lay out messages on
    /// top, the map in the middle, and the status line at the bottom.
    pub fn render(&mut self, frame: &mut Frame) {
        self.dungeon.draw(&mut self.display, self.player);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(
            MessagesWidget::new(self.log.recent(2), &self.theme),
            chunks[0],
        );
        frame.render_widget(
            MapWidget::new(&self.display, &self.theme, self.player, &self.spawns),
            chunks[1],
        );

        let location = self
            .dungeon
            .square(self.player.x, self.player.y)
            .and_then(|c| c.node)
            .and_then(|id| self.dungeon.node(id))
            .map(|n| n.name.as_str())
            .unwrap_or("the dark");
        frame.render_widget(
            StatusWidget::new(self.dungeon.level, self.player, location, &self.theme),
            chunks[2],
        );

        if let UiMode::Travel(options) = &self.mode {
            self.render_travel_overlay(frame, options);
        }
    }

    fn render_travel_overlay(&self, frame: &mut Frame, options: &[TravelOption]) {
        let items: Vec<ListItem> = options
            .iter()
            .take(9)
            .enumerate()
            .map(|(i, option)| {
                ListItem::new(Line::from(format!(
                    "{}. {}",
                    i + 1,
                    option.direction.describe()
                )))
            })
            .collect();

        let height = (items.len() as u16 + 2).min(12);
        let area = centered_rect(36, height, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .title(" Travel where? ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border_action)),
            ),
            area,
        );
    }
}

fn generate_level(rng: &mut GameRng, params: MapParams) -> Result<(Dungeon, Vec<Spawn>), MapError> {
    let mut populator = DenPopulator::default();
    let mut dungeon = Dungeon::generate(params, rng, &mut populator)?;
    let spawns = populator.into_spawns();
    for (index, spawn) in spawns.iter().enumerate() {
        if spawn.kind == SpawnKind::Monster {
            dungeon.set_actor(spawn.pos, ActorId(index as u32));
        }
    }
    Ok((dungeon, spawns))
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn test_app() -> App {
        let params = MapParams {
            width: 40,
            height: 40,
            level: 1,
        };
        App::new(params, GameRng::new(11), Theme::dark()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_player_starts_on_the_entrance() {
        let app = test_app();
        assert_eq!(app.player(), app.dungeon().entrance);
        let cell = app.dungeon().square(app.player().x, app.player().y).unwrap();
        assert!(cell.passable);
    }

    #[test]
    fn test_walls_block_movement() {
        let mut app = test_app();
        // Walk west until something stops us; we must never stand on
        // an impassable cell.
        for _ in 0..40 {
            press(&mut app, KeyCode::Char('h'));
            let cell = app.dungeon().square(app.player().x, app.player().y).unwrap();
            assert!(cell.passable || cell.door.is_some());
        }
    }

    #[test]
    fn test_descend_regenerates_one_level_deeper() {
        let mut app = test_app();
        assert_eq!(app.dungeon().level, 1);
        // Not on the staircase: nothing happens.
        if app.player() != app.dungeon().exit {
            press(&mut app, KeyCode::Char('>'));
            assert_eq!(app.dungeon().level, 1);
        }
        // Teleport onto it and take it.
        app.player = app.dungeon.exit;
        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.dungeon().level, 2);
        assert_eq!(app.player(), app.dungeon().entrance);
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_travel_overlay_moves_the_player() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('_'));
        let UiMode::Travel(ref options) = app.mode else {
            panic!("travel overlay did not open");
        };
        let destination = options[0].position;
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.player(), destination);
        assert!(matches!(app.mode, UiMode::Normal));
    }

    #[test]
    fn test_message_log_caps() {
        let mut log = MessageLog::default();
        for i in 0..150 {
            log.post(&format!("line {i}"), 0);
        }
        assert_eq!(log.recent(200).len(), MessageLog::CAP);
        assert_eq!(log.recent(1)[0].0, "line 149");
    }

    #[test]
    fn test_populator_names_are_unique_per_level() {
        let mut populator = DenPopulator::default();
        let mut rng = GameRng::new(3);
        let mut names = Vec::new();
        for _ in 0..20 {
            names.push(populator.node_name(&mut rng, true));
        }
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }
}
