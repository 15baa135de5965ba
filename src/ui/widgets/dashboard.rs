use crate::app::{App, DashboardPane, SearchState, UsersState};
use crate::player::PlayerState;
use crate::search::Track;
use crate::store::UserRecord;
use crate::ui::layout::{self, Breakpoint};
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App, breakpoint: Breakpoint) {
    let grid = layout::get_dashboard_layout(area, breakpoint);

    if let Some(stats_area) = grid.stats_area {
        render_stat_cards(f, stats_area, app, breakpoint);
    }
    render_tracks(f, grid.tracks_area, app);
    render_users(f, grid.users_area, app);
    if let Some(profile_area) = grid.profile_area {
        super::profile::render_card(f, profile_area, app);
    }
}

// --- Stat cards row ---

fn render_stat_cards(f: &mut Frame, area: Rect, app: &App, breakpoint: Breakpoint) {
    let track_count = app.track_list().len();
    let user_count = app.user_list().len();

    // The time/likes figures are static dashboard dressing, as on the web
    let cards: [(&str, String, &str); 4] = [
        ("Total Songs", track_count.to_string(), "+20 from last week"),
        ("Followers", user_count.to_string(), "+18 new followers"),
        ("Listening Time", "432h".to_string(), "+12h this week"),
        ("Liked Songs", "432".to_string(), "+8 new likes"),
    ];

    let constraints = match breakpoint {
        Breakpoint::Wide => vec![Constraint::Percentage(25); 4],
        _ => vec![Constraint::Percentage(50); 2],
    };
    let shown = constraints.len();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (title, value, delta)) in cards.into_iter().take(shown).enumerate() {
        render_card(f, chunks[i], app, title, &value, delta);
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &App, title: &str, value: &str, delta: &str) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.overlay),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            delta.to_string(),
            Style::default().fg(theme.overlay),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

// --- Recently Played ---

fn track_row<'a>(track: &'a Track, playing_id: Option<&str>, is_playing: bool, width: usize) -> ListItem<'a> {
    let icon = if playing_id == Some(track.id.as_str()) && is_playing {
        "⏸"
    } else {
        "▶"
    };
    let title = truncate(&track.title, width.saturating_sub(24));
    ListItem::new(Line::from(vec![
        Span::raw(format!(" {}  ", icon)),
        Span::raw(format!("{:<width$}", title, width = width.saturating_sub(24))),
        Span::raw("  "),
        Span::raw(track.duration.clone()),
        Span::raw("  "),
        Span::raw(truncate(&track.channel_title, 16)),
    ]))
}

fn render_tracks(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let focused = app.dashboard_pane == DashboardPane::Tracks;
    let border = if focused { theme.blue } else { theme.surface };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            " Recently Played ",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ));

    match &app.tracks {
        SearchState::Loading | SearchState::Idle => {
            let msg = Paragraph::new("Loading tracks…")
                .style(Style::default().fg(theme.overlay))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
        }
        // Failed looks exactly like an empty listing
        SearchState::Failed | SearchState::Loaded(_) if app.track_list().is_empty() => {
            let msg = Paragraph::new("Nothing here yet")
                .style(Style::default().fg(theme.overlay))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
        }
        SearchState::Failed | SearchState::Loaded(_) => {
            let width = area.width as usize;
            let playing_id = app.playback.current_track.as_ref().map(|t| t.id.as_str());
            let is_playing = app.playback.state() == PlayerState::Playing;
            let items: Vec<ListItem> = app
                .track_list()
                .iter()
                .map(|t| track_row(t, playing_id, is_playing, width))
                .collect();

            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .fg(theme.text)
                    .bg(theme.surface)
                    .add_modifier(Modifier::BOLD),
            );
            let mut state = ListState::default();
            if focused {
                state.select(Some(app.track_selected));
            }
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}

// --- Active Users ---

fn user_row<'a>(user: &'a UserRecord, theme: &crate::ui::Theme, show_moderation: bool) -> ListItem<'a> {
    let pill = if user.is_approved {
        Span::styled(" Approved ", Style::default().fg(theme.base).bg(theme.green))
    } else {
        Span::styled(" Pending ", Style::default().fg(theme.base).bg(theme.yellow))
    };
    let mut spans = vec![
        Span::styled(
            format!(" ({}) ", user.initial()),
            Style::default().fg(theme.magenta),
        ),
        Span::raw(format!("{:<18}", truncate(user.label(), 18))),
        Span::styled(
            format!("{:<28}", truncate(&user.email, 28)),
            Style::default().fg(theme.overlay),
        ),
        pill,
    ];
    if show_moderation {
        spans.push(Span::styled(
            "  [a] toggle",
            Style::default().fg(theme.overlay),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn render_users(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let focused = app.dashboard_pane == DashboardPane::Users;
    let border = if focused { theme.blue } else { theme.surface };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            " Active Users ",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ));

    match &app.users {
        UsersState::Loading | UsersState::Idle => {
            let msg = Paragraph::new("Loading users…")
                .style(Style::default().fg(theme.overlay))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
        }
        UsersState::Failed | UsersState::Loaded(_) if app.user_list().is_empty() => {
            let msg = Paragraph::new("No users yet")
                .style(Style::default().fg(theme.overlay))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
        }
        UsersState::Failed | UsersState::Loaded(_) => {
            let show_moderation = app.session.is_admin();
            let items: Vec<ListItem> = app
                .user_list()
                .iter()
                .map(|u| user_row(u, theme, show_moderation))
                .collect();

            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .fg(theme.text)
                    .bg(theme.surface)
                    .add_modifier(Modifier::BOLD),
            );
            let mut state = ListState::default();
            if focused {
                state.select(Some(app.user_selected));
            }
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}
