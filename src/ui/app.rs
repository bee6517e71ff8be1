use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::game::{DropOutcome, GameSession, MoveError, Seat};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Colors offered by the 1/2 keys, applied on the next restart.
const PALETTE: [&str; 8] = [
    "#ff0000", "#ffff00", "green", "blue", "magenta", "cyan", "white", "lightred",
];

pub struct App {
    config: AppConfig,
    session: GameSession,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let dimensions = config.dimensions()?;
        let (first, second) = config.players();
        let session = GameSession::new(first, second, dimensions);
        Ok(App {
            selected_column: dimensions.width() / 2, // Start in middle
            config,
            session,
            should_quit: false,
            message: None,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.session.dimensions().width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            KeyCode::Char('1') => {
                self.cycle_color(Seat::First);
            }
            KeyCode::Char('2') => {
                self.cycle_color(Seat::Second);
            }
            _ => {}
        }
    }

    /// New session with fresh players from the configuration
    fn restart(&mut self) {
        let (first, second) = self.config.players();
        let dimensions = self.session.dimensions();
        self.session.restart(first, second, dimensions);
        self.selected_column = dimensions.width() / 2;
        self.message = Some("New game started!".to_string());
    }

    /// Pick the next palette color for a seat. Takes effect on restart, like
    /// choosing colors before starting a new game.
    fn cycle_color(&mut self, seat: Seat) {
        let current = self.config_color(seat);
        let next = PALETTE
            .iter()
            .position(|&c| c.eq_ignore_ascii_case(&current))
            .map_or(0, |i| (i + 1) % PALETTE.len());
        let player = match seat {
            Seat::First => &mut self.config.players.first,
            Seat::Second => &mut self.config.players.second,
        };
        player.color = Some(PALETTE[next].to_string());
        self.message = Some(format!(
            "Player {} color: {} (press 'r' to restart)",
            seat.number(),
            PALETTE[next]
        ));
    }

    fn config_color(&self, seat: Seat) -> String {
        let (first, second) = self.config.players();
        match seat {
            Seat::First => first.color().to_string(),
            Seat::Second => second.color().to_string(),
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.session.drop_piece(self.selected_column) {
            Ok(DropOutcome::Won { winner, .. }) => {
                let player = self.session.player(winner);
                self.message = Some(format!("Player {} ({}) won!", winner.number(), player.name()));
            }
            Ok(DropOutcome::Tied { .. }) => {
                self.message = Some("Tie!".to_string());
            }
            Ok(DropOutcome::Continuing { .. }) => {}
            Err(MoveError::ColumnFull { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over! Press 'r' to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, self.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        App::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_starts_in_middle_column() {
        let app = app();
        assert_eq!(app.selected_column(), 3);
        assert_eq!(app.session().current_seat(), Seat::First);
    }

    #[test]
    fn test_selection_stays_on_board() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), 6);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column(), 0);
    }

    #[test]
    fn test_enter_drops_piece() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().board().occupied_count(), 1);
        assert_eq!(app.session().current_seat(), Seat::Second);
    }

    #[test]
    fn test_full_column_message() {
        let mut app = app();
        for _ in 0..7 {
            press(&mut app, KeyCode::Char(' '));
        }
        assert_eq!(app.message(), Some("Column is full!"));
        assert_eq!(app.session().board().occupied_count(), 6);
    }

    #[test]
    fn test_win_then_game_over_then_restart() {
        let mut app = app();
        // First seat stacks column 3, second seat column 4
        for _ in 0..3 {
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Left);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Player 1 (Player 1) won!"));
        assert!(matches!(app.session().state(), GameState::Won { winner: Seat::First, .. }));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Game is over! Press 'r' to restart."));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().state(), GameState::InProgress);
        assert_eq!(app.session().board().occupied_count(), 0);
    }

    #[test]
    fn test_color_change_applies_on_restart() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(
            app.message(),
            Some("Player 1 color: #ffff00 (press 'r' to restart)")
        );
        // Running game keeps its players
        assert_eq!(app.session().player(Seat::First).color(), "#ff0000");

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().player(Seat::First).color(), "#ffff00");
        assert_eq!(app.session().player(Seat::Second).color(), "blue");
    }

    #[test]
    fn test_color_cycle_wraps_around() {
        let mut app = app();
        for _ in 0..PALETTE.len() {
            press(&mut app, KeyCode::Char('1'));
        }
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().player(Seat::First).color(), "#ff0000");
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
