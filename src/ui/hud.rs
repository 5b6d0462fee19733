use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::{GameSession, GameStatus};

/// Renders the score row and the key hint row, returning the area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &GameSession) -> Rect {
    let [play_area, score_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(session)).alignment(Alignment::Center),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(hint_text(session.status)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        hint_area,
    );

    play_area
}

fn score_line(session: &GameSession) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(session.score.to_string(), value),
        Span::styled("  Hi ", label),
        Span::styled(session.high_score.to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(session.snake.len().to_string(), value),
        Span::styled("  Tick ", label),
        Span::styled(format!("{}ms", session.interval_ms), value),
    ])
}

fn hint_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle | GameStatus::Over => "[Space] start  [Q] quit",
        GameStatus::Running => "[Space] pause  [R] reset  [Q] quit",
        GameStatus::Paused => "[Space] resume  [R] reset  [Q] quit",
    }
}

#[cfg(test)]
mod tests {
    use super::{hint_text, score_line};
    use crate::config::GameConfig;
    use crate::game::{GameSession, GameStatus};

    #[test]
    fn score_line_lists_live_values() {
        let session = GameSession::new_with_seed(GameConfig::default(), 90, 1);

        let text: String = score_line(&session)
            .spans
            .iter()
            .map(|span| span.content.to_string())
            .collect();

        assert_eq!(text, "Score 0  Hi 90  Length 3  Tick 150ms");
    }

    #[test]
    fn hints_follow_status() {
        assert!(hint_text(GameStatus::Running).contains("pause"));
        assert!(hint_text(GameStatus::Paused).contains("resume"));
    }
}
