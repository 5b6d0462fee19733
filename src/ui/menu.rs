use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::DeathReason;

/// Draws the idle screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Space]/[Enter] Start"),
        Line::from("Arrows/WASD Move"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space]/[P] Resume"),
        Line::from("[R] Reset  [Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    is_new_record: bool,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Final score: {score}")),
        Line::from(format!("High score: {high_score}")),
        Line::from(death_reason.map_or("", death_cause)),
        Line::from(if is_new_record { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Space]/[Enter] Play again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn death_cause(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::WallCollision => "Cause: hit wall",
        DeathReason::SelfCollision => "Cause: hit yourself",
        DeathReason::BoardFull => "Cause: board filled",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::{render_game_over_menu, render_start_menu};
    use crate::game::DeathReason;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn game_over_menu_names_cause_and_record() {
        let mut terminal = Terminal::new(TestBackend::new(50, 20)).expect("test terminal");

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_game_over_menu(
                    frame,
                    area,
                    40,
                    40,
                    true,
                    Some(DeathReason::SelfCollision),
                );
            })
            .expect("draw");

        let text = screen_text(&terminal);
        assert!(text.contains("Final score: 40"));
        assert!(text.contains("hit yourself"));
        assert!(text.contains("New high score!"));
    }

    #[test]
    fn start_menu_shows_high_score() {
        let mut terminal = Terminal::new(TestBackend::new(50, 20)).expect("test terminal");

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_start_menu(frame, area, 70);
            })
            .expect("draw");

        assert!(screen_text(&terminal).contains("High score: 70"));
    }
}
