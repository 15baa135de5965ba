use crate::app::{App, SearchState};
use crate::player::PlayerState;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Search screen: query input on top, results below with play and
/// add-to-queue affordances.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // Input line
    let input_border = if app.search_active {
        theme.blue
    } else {
        theme.surface
    };
    let cursor = if app.search_active { "▏" } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled(" 🔍 ", Style::default().fg(theme.overlay)),
        Span::styled(app.search_query.clone(), Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.blue)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(input_border))
            .title(Span::styled(
                " Search ",
                Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(input, chunks[0]);

    render_results(f, chunks[1], app);
}

fn render_results(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(
            " Search Results ",
            Style::default()
                .fg(theme.brand())
                .add_modifier(Modifier::BOLD),
        ));

    match &app.tracks {
        SearchState::Loading => {
            let msg = Paragraph::new("Searching…")
                .style(Style::default().fg(theme.overlay))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
        }
        // A failed search is rendered as the same empty state as zero
        // matches
        _ if app.track_list().is_empty() => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No tracks found",
                    Style::default()
                        .fg(theme.brand())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Try searching for your favorite artist, song, or video",
                    Style::default().fg(theme.overlay),
                )),
                Line::from(Span::styled(
                    "to start building your playlist",
                    Style::default().fg(theme.overlay),
                )),
            ];
            let msg = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
        }
        _ => {
            let playing_id = app.playback.current_track.as_ref().map(|t| t.id.as_str());
            let is_playing = app.playback.state() == PlayerState::Playing;
            let width = area.width as usize;

            let items: Vec<ListItem> = app
                .track_list()
                .iter()
                .map(|track| {
                    let icon = if playing_id == Some(track.id.as_str()) && is_playing {
                        "⏸"
                    } else {
                        "▶"
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(format!(" {}  ", icon)),
                        Span::raw(format!(
                            "{:<w$}",
                            truncate(&track.title, width.saturating_sub(40)),
                            w = width.saturating_sub(40)
                        )),
                        Span::styled(
                            format!("  {}  ", track.duration),
                            Style::default().fg(theme.overlay),
                        ),
                        Span::styled(
                            format!("{:<18}", truncate(&track.channel_title, 18)),
                            Style::default().fg(theme.overlay),
                        ),
                        Span::styled("  [+] queue", Style::default().fg(theme.overlay)),
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
            state.select(Some(app.track_selected));
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}
