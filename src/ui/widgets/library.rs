use crate::app::App;
use crate::player::PlayerState;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Library: the queue built up from search results.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(
            format!(" Library · {} queued ", app.queue.len()),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ));

    if app.queue.is_empty() {
        let msg = Paragraph::new("Queue tracks from Search with [+]")
            .style(Style::default().fg(theme.overlay))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(msg, area);
        return;
    }

    let playing_id = app.playback.current_track.as_ref().map(|t| t.id.as_str());
    let is_playing = app.playback.state() == PlayerState::Playing;
    let items: Vec<ListItem> = app
        .queue
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let icon = if playing_id == Some(track.id.as_str()) && is_playing {
                "⏸"
            } else {
                "▶"
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:>2}. ", i + 1), Style::default().fg(theme.overlay)),
                Span::raw(format!("{}  ", icon)),
                Span::raw(truncate(&track.title, 48)),
                Span::styled(
                    format!("  {}", track.channel_title),
                    Style::default().fg(theme.overlay),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(theme.text)
            .bg(theme.surface)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(app.queue_selected));
    f.render_stateful_widget(list, area, &mut state);
}
