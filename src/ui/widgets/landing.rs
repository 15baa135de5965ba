use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Signed-out landing screen.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "YouPiFy",
            Style::default()
                .fg(theme.brand())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your music discovery dashboard",
            Style::default().fg(theme.overlay),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Sign in with  youpify --user <uid>",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "(accounts are created by the sign-up flow, not here)",
            Style::default().fg(theme.overlay),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[v] Privacy Policy", Style::default().fg(theme.overlay)),
            Span::raw("    "),
            Span::styled("[x] Data Deletion", Style::default().fg(theme.overlay)),
        ]),
    ];
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default());
    f.render_widget(body, area);
}
