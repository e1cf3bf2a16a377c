//! Terminal UI rendering with ratatui

use crate::settings::Settings;
use crate::snapshot::Snapshot;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Render the whole game screen
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();

    // Two characters per column plus borders
    let width = (snapshot.width() * 2 + 2) as u16;
    let height = (snapshot.height() + 2) as u16;
    let board_area = center_rect(area, width, height);

    render_board(frame, board_area, snapshot, settings.visual.block_char());

    if snapshot.over {
        render_overlay(frame, area, "GAME OVER", "Press any key");
    }
}

/// Map a color token from the figure catalog to a terminal color
fn terminal_color(token: &str) -> Color {
    match token {
        "purple" => Color::Magenta,
        "yellow" => Color::Yellow,
        "orange" => Color::Rgb(255, 165, 0),
        "blue" => Color::Blue,
        "cyan" => Color::Cyan,
        "green" => Color::Green,
        "red" => Color::Red,
        _ => Color::White,
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, block_char: &'static str) {
    // Highlight the border while a fast drop is running
    let border = if snapshot.accelerated { Color::Yellow } else { Color::White };
    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = (0..snapshot.height())
        .map(|y| {
            let spans: Vec<Span> = (0..snapshot.width())
                .map(|x| match snapshot.color(x, y) {
                    Some(token) => Span::styled(block_char, Style::default().fg(terminal_color(token))),
                    None => Span::raw(EMPTY),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
