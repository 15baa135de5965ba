use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

fn render_page(f: &mut Frame, area: Rect, app: &App, title: &str, body: &[&str]) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ));

    let mut lines = vec![Line::from("")];
    for paragraph in body {
        lines.push(Line::from(Span::styled(
            *paragraph,
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "[Esc] back",
        Style::default().fg(theme.overlay),
    )));

    let page = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(page, area);
}

pub fn render_privacy(f: &mut Frame, area: Rect, app: &App) {
    render_page(
        f,
        area,
        app,
        "Privacy Policy",
        &[
            "YouPiFy stores your account record (email, display name, photo URL,",
            "approval status) in its user directory and nothing else.",
            "Search queries are sent to the YouTube Data API to fetch results.",
            "Playback happens locally through your own mpv instance.",
        ],
    );
}

pub fn render_data_deletion(f: &mut Frame, area: Rect, app: &App) {
    render_page(
        f,
        area,
        app,
        "Data Deletion",
        &[
            "To remove your account, delete your user document from the store",
            "directory. Queued tracks and playback state are session-only and",
            "disappear when the app exits.",
        ],
    );
}
