use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Discover: the trending tracks as a horizontal card strip. The
/// selection cursor is shared with the dashboard track list.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(
            " Discover · trending now ",
            Style::default()
                .fg(theme.brand())
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let tracks = app.track_list();
    if tracks.is_empty() {
        let msg = Paragraph::new("Nothing trending right now")
            .style(Style::default().fg(theme.overlay))
            .alignment(Alignment::Center);
        f.render_widget(msg, inner);
        return;
    }

    // Card strip: as many 24-wide cards as fit, scrolled so the
    // selection stays visible
    let card_width = 24u16;
    let visible = (inner.width / card_width).max(1) as usize;
    let first = app.track_selected.saturating_sub(visible.saturating_sub(1));

    let constraints: Vec<Constraint> = (0..visible).map(|_| Constraint::Length(card_width)).collect();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (slot, (i, track)) in slots.iter().zip(tracks.iter().enumerate().skip(first)) {
        let selected = i == app.track_selected;
        let border = if selected { theme.blue } else { theme.surface };
        let card = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let card_inner = card.inner(*slot);
        f.render_widget(card, *slot);

        let lines = vec![
            Line::from(Span::styled(
                truncate(&track.title, card_width as usize - 2),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate(&track.channel_title, card_width as usize - 2),
                Style::default().fg(theme.overlay),
            )),
            Line::from(Span::styled(
                track.duration.clone(),
                Style::default().fg(theme.overlay),
            )),
        ];
        f.render_widget(Paragraph::new(lines), card_inner);
    }
}
