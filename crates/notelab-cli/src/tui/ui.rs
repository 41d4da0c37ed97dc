//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use notelab_core::{Phase, SyncStatus, ViewState};

use super::app::App;
use crate::output::format_last_sync;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_status_panel(frame, app, chunks[0]);
    if app.view.state() == ViewState::LoggedOutFormOpen {
        draw_login_form(frame, app, chunks[1]);
    }
    draw_message(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Indicator icon and color for a status
fn indicator(status: &SyncStatus) -> (&'static str, Style) {
    if status.is_syncing {
        ("↻", Style::default().fg(Color::Yellow))
    } else if status.is_online {
        ("✓", Style::default().fg(Color::Green))
    } else if status.phase == Phase::Error {
        ("✗", Style::default().fg(Color::Red))
    } else {
        ("⚡", Style::default().fg(Color::DarkGray))
    }
}

fn draw_status_panel(frame: &mut Frame, app: &App, area: Rect) {
    let identity = app.view.identity();
    let status = app.view.status();
    let (icon, icon_style) = indicator(status);

    let account = if identity.is_logged_in {
        identity
            .email
            .clone()
            .or_else(|| identity.id.clone())
            .unwrap_or_else(|| "(unknown)".to_string())
    } else {
        "Not signed in".to_string()
    };

    let label = Style::default().add_modifier(Modifier::DIM);
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon), icon_style),
            Span::styled(
                status.label(),
                icon_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Account:   ", label), Span::raw(account)]),
        Line::from(vec![
            Span::styled("Phase:     ", label),
            Span::raw(status.phase.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Last sync: ", label),
            Span::raw(format_last_sync(status.last_sync)),
        ]),
        Line::from(vec![
            Span::styled("Service:   ", label),
            Span::raw(app.sync_url.as_str()),
        ]),
    ];

    let block = Block::default()
        .title(" NoteLab Sync ")
        .borders(Borders::ALL);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_login_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Email ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let email = app.view.email();
    frame.render_widget(Paragraph::new(email).block(block), area);

    // Cursor after the typed text, inside the border
    let typed = u16::try_from(email.chars().count()).unwrap_or(u16::MAX);
    frame.set_cursor_position((cursor_column(area, typed), area.y + 1));
}

fn draw_message(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(command) = app.working {
        Line::from(Span::styled(
            format!("{}: working...", command.action()),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(message) = app.view.message() {
        let style = if message.contains(" failed: ") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Line::from(Span::styled(message, style))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph =
        Paragraph::new(app.hints()).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(50, 50, frame.area());

    let help = vec![
        Line::from("Signed out"),
        Line::from("  l       open / close the sign-in form"),
        Line::from("  enter   send the login link"),
        Line::from("  esc     close the form"),
        Line::from(""),
        Line::from("Signed in"),
        Line::from("  s       sync now"),
        Line::from("  o       sign out"),
        Line::from(""),
        Line::from("  r       refresh status"),
        Line::from("  q       quit"),
    ];

    let block = Block::default().title(" Help ").borders(Borders::ALL);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(help).block(block), area);
}

/// Centered rect taking the given percentage of the area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Column just after `typed` characters inside a bordered box, kept within the border
fn cursor_column(area: Rect, typed: u16) -> u16 {
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_follows_typed_text() {
        let area = Rect::new(10, 5, 40, 3);
        assert_eq!(cursor_column(area, 0), 11);
        assert_eq!(cursor_column(area, 4), 15);
    }

    #[test]
    fn test_cursor_stays_inside_border() {
        let area = Rect::new(10, 5, 40, 3);
        assert_eq!(cursor_column(area, 200), 48);

        // Huge input near the edge of the coordinate space
        let area = Rect::new(u16::MAX - 50, 0, 40, 3);
        assert_eq!(cursor_column(area, u16::MAX), area.right() - 2);
    }
}
