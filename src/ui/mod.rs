pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::{App, Route};
use ratatui::Frame;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let breakpoint = layout::Breakpoint::from_width(area.width);
    let main_layout = layout::get_main_layout(area);

    widgets::header::render(f, main_layout.header_area, app, breakpoint);

    match app.route.clone() {
        Route::Landing => widgets::landing::render(f, main_layout.body_area, app),
        Route::Dashboard => widgets::dashboard::render(f, main_layout.body_area, app, breakpoint),
        Route::Discover => widgets::discover::render(f, main_layout.body_area, app),
        Route::Library => widgets::library::render(f, main_layout.body_area, app),
        Route::Search => widgets::search::render(f, main_layout.body_area, app),
        Route::Profile(uid) => {
            widgets::profile::render(f, main_layout.body_area, app, uid.as_deref())
        }
        Route::Privacy => widgets::pages::render_privacy(f, main_layout.body_area, app),
        Route::DataDeletion => widgets::pages::render_data_deletion(f, main_layout.body_area, app),
    }

    // The playback bar is fixed, whatever the route
    widgets::playbar::render(f, main_layout.playbar_area, app);

    // Footer key hint
    {
        use ratatui::layout::Alignment;
        use ratatui::style::{Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        let theme = &app.theme;
        let hint = Line::from(vec![
            Span::styled(
                " ? ",
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.overlay)),
        ]);
        let footer = Paragraph::new(hint).alignment(Alignment::Right);
        f.render_widget(footer, main_layout.footer_area);
    }

    widgets::toast::render(f, app);
}
