use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The terminal rendition of the web app's responsive breakpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breakpoint {
    Compact,
    Medium,
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        if width < 70 {
            Breakpoint::Compact
        } else if width < 110 {
            Breakpoint::Medium
        } else {
            Breakpoint::Wide
        }
    }
}

pub struct MainLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub playbar_area: Rect,
    pub footer_area: Rect,
}

/// Header on top, fixed playback bar pinned above the footer line —
/// the "fixed bottom-0" bar from the web layout.
pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(4), // Playback bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        playbar_area: chunks[2],
        footer_area: chunks[3],
    }
}

pub struct DashboardLayout {
    pub stats_area: Option<Rect>,
    pub tracks_area: Rect,
    pub users_area: Rect,
    pub profile_area: Option<Rect>,
}

/// Dashboard grid. Wide keeps the lg:col-span split (lists left, profile
/// right); Medium stacks the profile away; Compact also drops the stat
/// cards to leave room for the lists.
pub fn get_dashboard_layout(area: Rect, breakpoint: Breakpoint) -> DashboardLayout {
    match breakpoint {
        Breakpoint::Wide => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(5), Constraint::Min(0)])
                .split(area);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
                .split(rows[1]);
            let lists = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(cols[0]);
            DashboardLayout {
                stats_area: Some(rows[0]),
                tracks_area: lists[0],
                users_area: lists[1],
                profile_area: Some(cols[1]),
            }
        }
        Breakpoint::Medium => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Percentage(55),
                    Constraint::Percentage(45),
                ])
                .split(area);
            DashboardLayout {
                stats_area: Some(rows[0]),
                tracks_area: rows[1],
                users_area: rows[2],
                profile_area: None,
            }
        }
        Breakpoint::Compact => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            DashboardLayout {
                stats_area: None,
                tracks_area: rows[0],
                users_area: rows[1],
                profile_area: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(Breakpoint::from_width(50), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(80), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(140), Breakpoint::Wide);
    }

    #[test]
    fn test_compact_dashboard_drops_cards_and_profile() {
        let area = Rect::new(0, 0, 60, 30);
        let layout = get_dashboard_layout(area, Breakpoint::Compact);
        assert!(layout.stats_area.is_none());
        assert!(layout.profile_area.is_none());
    }

    #[test]
    fn test_wide_dashboard_keeps_profile_column() {
        let area = Rect::new(0, 0, 140, 40);
        let layout = get_dashboard_layout(area, Breakpoint::Wide);
        assert!(layout.stats_area.is_some());
        assert!(layout.profile_area.is_some());
        // Lists sit left of the profile column
        let profile = layout.profile_area.unwrap();
        assert!(layout.tracks_area.x < profile.x);
    }
}
