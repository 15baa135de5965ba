use crate::app::App;
use crate::player::PlayerState;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// The fixed now-playing bar: track info left, transport center,
/// volume right.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Track info
            Constraint::Percentage(30), // Transport
            Constraint::Percentage(35), // Volume
        ])
        .split(inner);

    // 1. Track info, with the web bar's placeholder copy
    let (title, subtitle) = match &app.playback.current_track {
        Some(track) => (
            truncate(&track.title, chunks[0].width.saturating_sub(3) as usize),
            track.channel_title.clone(),
        ),
        None => ("No track playing".to_string(), "Select a track".to_string()),
    };
    let info = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", title),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", subtitle),
            Style::default().fg(theme.overlay),
        )),
    ]);
    f.render_widget(info, chunks[0]);

    // 2. Transport
    let play_icon = if app.playback.state() == PlayerState::Playing {
        "⏸"
    } else {
        "▶"
    };
    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    let transport = Paragraph::new(Line::from(vec![
        Span::styled("  ⏮  ", btn_style),
        Span::raw("   "),
        Span::styled(format!("  {}  ", play_icon), btn_style),
        Span::raw("   "),
        Span::styled("  ⏭  ", btn_style),
    ]))
    .alignment(Alignment::Center);
    let transport_area = Rect {
        y: chunks[1].y + chunks[1].height.saturating_sub(2) / 2,
        height: 1.min(chunks[1].height),
        ..chunks[1]
    };
    f.render_widget(transport, transport_area);

    // 3. Volume bar
    let vol_ratio = app.playback.volume() as f64 / 100.0;
    let bar_width = 20usize;
    let filled_width = (bar_width as f64 * vol_ratio).round() as usize;

    let mut bar_spans = vec![Span::styled("🔊 - ", Style::default().fg(theme.overlay))];
    for i in 0..bar_width {
        if i < filled_width {
            bar_spans.push(Span::styled("━", Style::default().fg(theme.magenta)));
        } else {
            bar_spans.push(Span::styled("─", Style::default().fg(theme.surface)));
        }
    }
    bar_spans.push(Span::styled(
        format!(" + {:>3} ", app.playback.volume()),
        Style::default().fg(theme.overlay),
    ));
    if !app.playback.is_bound() {
        // Player not ready yet; controls are accepted but inert
        bar_spans.push(Span::styled("(no player)", Style::default().fg(theme.red)));
    }

    let vol_widget = Paragraph::new(Line::from(bar_spans)).alignment(Alignment::Right);
    let vol_area = Rect {
        y: chunks[2].y + chunks[2].height.saturating_sub(2) / 2,
        height: 1.min(chunks[2].height),
        ..chunks[2]
    };
    f.render_widget(vol_widget, vol_area);
}
