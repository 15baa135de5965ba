use crate::app::{App, Route};
use crate::ui::layout::Breakpoint;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Sticky top bar: wordmark, nav tabs (approved sessions only), profile
/// chip. Signed-out sessions get the policy links instead of a nav.
pub fn render(f: &mut Frame, area: Rect, app: &App, breakpoint: Breakpoint) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Wordmark
            Constraint::Min(0),     // Nav
            Constraint::Length(30), // Profile chip
        ])
        .split(inner);

    let brand = Paragraph::new(Span::styled(
        " YouPiFy",
        Style::default()
            .fg(theme.brand())
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(brand, chunks[0]);

    if app.session.is_signed_in() {
        // Nav is gated on the approval flag, not just the session
        if app.session.is_approved() && breakpoint != Breakpoint::Compact {
            let mut spans = Vec::new();
            for route in Route::tabs() {
                let active = route.as_key() == app.route.as_key();
                let style = if active {
                    Style::default()
                        .fg(theme.blue)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.overlay)
                };
                spans.push(Span::styled(format!("  {}  ", route.label()), style));
            }
            let nav = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
            f.render_widget(nav, chunks[1]);
        }

        if let Some(user) = &app.session.user {
            // displayName, else the email local-part
            let name = user
                .display_name
                .clone()
                .unwrap_or_else(|| user.email.split('@').next().unwrap_or("").to_string());
            let chip = Line::from(vec![
                Span::styled(
                    format!("({}) ", user.initial()),
                    Style::default().fg(theme.magenta),
                ),
                Span::styled(name, Style::default().fg(theme.text)),
                Span::styled("  [o] sign out ", Style::default().fg(theme.red)),
            ]);
            let profile = Paragraph::new(chip).alignment(Alignment::Right);
            f.render_widget(profile, chunks[2]);
        }
    } else {
        let links = Line::from(vec![
            Span::styled("Privacy Policy [v]", Style::default().fg(theme.overlay)),
            Span::raw("   "),
            Span::styled("Data Deletion [x]", Style::default().fg(theme.overlay)),
        ]);
        let nav = Paragraph::new(links).alignment(Alignment::Center);
        f.render_widget(nav, chunks[1]);
    }
}
