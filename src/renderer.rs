use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    COLOR_BODY, COLOR_BORDER, COLOR_BORDER_OVER, COLOR_BORDER_PAUSED, COLOR_FOOD, COLOR_HEAD,
    GLYPH_CELL, GLYPH_FOOD, GLYPH_HEAD_DOWN, GLYPH_HEAD_LEFT, GLYPH_HEAD_RIGHT, GLYPH_HEAD_UP,
    TERMINAL_CELL_SIZE,
};
use crate::direction::Direction;
use crate::game::{GameSession, GameStatus};
use crate::geometry::{Cell, GridSize, board_extent, cell_rect};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, session: &GameSession) {
    let area = frame.area();
    let play_area = render_hud(frame, area, session);

    let board_area = centered_board(play_area, session.bounds());
    let block = Block::bordered().border_style(Style::new().fg(border_color(session.status)));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, session);
    render_snake(frame, inner, session);

    match session.status {
        GameStatus::Idle => render_start_menu(frame, board_area, session.high_score),
        GameStatus::Paused => render_pause_menu(frame, board_area),
        GameStatus::Over => render_game_over_menu(
            frame,
            board_area,
            session.score,
            session.high_score,
            session.is_new_record(),
            session.death_reason,
        ),
        GameStatus::Running => {}
    }
}

fn border_color(status: GameStatus) -> Color {
    match status {
        GameStatus::Paused => COLOR_BORDER_PAUSED,
        GameStatus::Over => COLOR_BORDER_OVER,
        GameStatus::Idle | GameStatus::Running => COLOR_BORDER,
    }
}

/// Bordered board rectangle centered in `area`, clipped to fit.
fn centered_board(area: Rect, bounds: GridSize) -> Rect {
    let (width, height) = board_extent(bounds, TERMINAL_CELL_SIZE);
    let width = width.saturating_add(2).min(area.width);
    let height = height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let Some((x, y)) = logical_to_terminal(inner, session.bounds(), session.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(COLOR_FOOD));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let buffer = frame.buffer_mut();

    for (index, segment) in session.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, session.bounds(), *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(session.direction()),
                Style::new()
                    .fg(COLOR_HEAD)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        let shade = COLOR_BODY[index % COLOR_BODY.len()];
        buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(shade));
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_HEAD_UP,
        Direction::Down => GLYPH_HEAD_DOWN,
        Direction::Left => GLYPH_HEAD_LEFT,
        Direction::Right => GLYPH_HEAD_RIGHT,
    }
}

/// Top-left terminal position of `cell`, or `None` if it falls outside `inner`.
fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    let rect = cell_rect(cell, bounds, TERMINAL_CELL_SIZE)?;

    let x = inner.x.saturating_add(rect.x);
    let y = inner.y.saturating_add(rect.y);
    if x.saturating_add(rect.width) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
