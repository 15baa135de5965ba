use crate::app::App;
use crate::store::UserRecord;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

/// Full-page profile. With a uid it shows that user from the directory,
/// otherwise the signed-in viewer.
pub fn render(f: &mut Frame, area: Rect, app: &App, uid: Option<&str>) {
    let subject: Option<UserRecord> = match uid {
        Some(uid) => app.user_list().iter().find(|u| u.uid == uid).cloned(),
        None => app.session.user.clone(),
    };
    render_subject(f, area, app, subject.as_ref());
}

/// The dashboard's right-column profile card (the signed-in viewer).
pub fn render_card(f: &mut Frame, area: Rect, app: &App) {
    render_subject(f, area, app, app.session.user.as_ref());
}

fn render_subject(f: &mut Frame, area: Rect, app: &App, user: Option<&UserRecord>) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(
            " Profile ",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(user) = user else {
        let msg = Paragraph::new("No profile to show")
            .style(Style::default().fg(theme.overlay))
            .alignment(Alignment::Center);
        f.render_widget(msg, inner);
        return;
    };

    let name = user.display_name.as_deref().unwrap_or("User");
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("({})", user.initial()),
            Style::default()
                .fg(theme.magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            user.email.clone(),
            Style::default().fg(theme.overlay),
        )),
        Line::from(""),
    ];
    if let Some(url) = &user.photo_url {
        lines.push(Line::from(Span::styled(
            url.clone(),
            Style::default().fg(theme.overlay),
        )));
    }
    let body = Paragraph::new(lines).alignment(Alignment::Center);

    // Leave two rows for the completion gauge
    let gauge_height = 2u16;
    let text_area = Rect {
        height: inner.height.saturating_sub(gauge_height),
        ..inner
    };
    f.render_widget(body, text_area);

    if inner.height > gauge_height {
        let gauge_area = Rect {
            y: inner.y + inner.height - gauge_height,
            height: 1,
            ..inner
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.magenta).bg(theme.surface))
            .label("Profile Completion 85%")
            .ratio(0.85);
        f.render_widget(gauge, gauge_area);
    }
}
