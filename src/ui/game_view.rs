use std::str::FromStr;

use crate::game::{Cell, GameSession, GameState, Player, Seat};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, session: &GameSession, selected_column: usize, message: Option<&str>) {
    let board_rows = u16::try_from(session.dimensions().height())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Min(board_rows),    // Board
            Constraint::Length(3),          // Message
            Constraint::Length(3),          // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, session, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

/// Terminal color for a player, falling back to red/yellow when the configured
/// color is not something the terminal understands.
pub fn player_color(player: &Player, seat: Seat) -> Color {
    Color::from_str(player.color()).unwrap_or(match seat {
        Seat::First => Color::Red,
        Seat::Second => Color::Yellow,
    })
}

fn render_header(frame: &mut Frame, session: &GameSession, area: Rect) {
    let (status, seat) = match session.state() {
        GameState::InProgress => {
            let seat = session.current_seat();
            let name = session.player(seat).name();
            (format!("Current Player: {} ({})", seat.number(), name), seat)
        }
        GameState::Won { winner, .. } => (format!("Game Over  |  Player {} won", winner.number()), winner),
        GameState::Tied => ("Game Over  |  Tie".to_string(), session.current_seat()),
    };
    let color = player_color(session.player(seat), seat);

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, session: &GameSession, selected_column: usize, area: Rect) {
    let board = session.board();
    let width = board.width();
    let win_line = match session.state() {
        GameState::Won { line, .. } => Some(line),
        _ => None,
    };
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..width {
        let label = format!("{:^3}", (col + 1) % 100);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(width * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for (row, cells) in board.rows().enumerate() {
        let mut row_spans = vec![Span::raw("  ║")];

        for (col, cell) in cells.iter().enumerate() {
            let span = match *cell {
                Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Cell::Occupied(seat) => {
                    let mut style = Style::default().fg(player_color(session.player(seat), seat));
                    if win_line.is_some_and(|line| line.contains(row, col)) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(" ● ", style)
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..width {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter: Drop  |  1/2: Color  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Dimensions, MAX_SIDE};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(session: &GameSession, message: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal
            .draw(|f| render(f, session, 3, message))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn session() -> GameSession {
        GameSession::new(
            Player::new("Ann", "#ff0000"),
            Player::new("Bo", "not-a-color"),
            Dimensions::default(),
        )
    }

    #[test]
    fn test_player_color_parses_or_falls_back() {
        let game = session();
        assert_eq!(
            player_color(game.player(Seat::First), Seat::First),
            Color::Rgb(255, 0, 0)
        );
        assert_eq!(player_color(game.player(Seat::Second), Seat::Second), Color::Yellow);
    }

    #[test]
    fn test_renders_header_and_message() {
        let mut game = session();
        game.drop_piece(3).unwrap();
        let text = screen(&game, Some("hello there"));
        assert!(text.contains("Current Player: 2 (Bo)"));
        assert!(text.contains("hello there"));
        assert!(text.contains("●"));
    }

    #[test]
    fn test_renders_game_over() {
        let mut game = session();
        for _ in 0..3 {
            game.drop_piece(0).unwrap();
            game.drop_piece(1).unwrap();
        }
        game.drop_piece(0).unwrap();
        let text = screen(&game, None);
        assert!(text.contains("Game Over  |  Player 1 won"));
    }

    #[test]
    fn test_tallest_board_renders_in_small_terminal() {
        let game = GameSession::new(
            Player::new("Ann", "red"),
            Player::new("Bo", "yellow"),
            Dimensions::new(MAX_SIDE, 7).unwrap(),
        );
        let text = screen(&game, None);
        assert_eq!(text.chars().count(), 70 * 20);
    }
}
