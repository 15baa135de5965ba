use std::time::Instant;

use crate::config::PersistentState;
use crate::player::Playback;
use crate::search::Track;
use crate::store::{Role, UserRecord};
use crate::ui::theme::Theme;

/// Client-side routes. Landing is where signed-out sessions live.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Route {
    Landing,
    #[default]
    Dashboard,
    Discover,
    Library,
    Search,
    Profile(Option<String>),
    Privacy,
    DataDeletion,
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Landing => "Welcome",
            Route::Dashboard => "Home",
            Route::Discover => "Discover",
            Route::Library => "Library",
            Route::Search => "Search",
            Route::Profile(_) => "Profile",
            Route::Privacy => "Privacy Policy",
            Route::DataDeletion => "Data Deletion",
        }
    }

    /// Tabs shown in the header, in order.
    pub fn tabs() -> [Route; 5] {
        [
            Route::Dashboard,
            Route::Discover,
            Route::Library,
            Route::Search,
            Route::Profile(None),
        ]
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Route::Landing => "landing",
            Route::Dashboard => "dashboard",
            Route::Discover => "discover",
            Route::Library => "library",
            Route::Search => "search",
            Route::Profile(_) => "profile",
            Route::Privacy => "privacy",
            Route::DataDeletion => "data-deletion",
        }
    }

    pub fn from_key(key: &str) -> Option<Route> {
        match key {
            "dashboard" => Some(Route::Dashboard),
            "discover" => Some(Route::Discover),
            "library" => Some(Route::Library),
            "search" => Some(Route::Search),
            "profile" => Some(Route::Profile(None)),
            "privacy" => Some(Route::Privacy),
            "data-deletion" => Some(Route::DataDeletion),
            _ => None,
        }
    }
}

/// Directory fetch slice.
#[derive(Debug, Clone, PartialEq)]
pub enum UsersState {
    Idle,
    Loading,
    Loaded(Vec<UserRecord>),
    // Rendered the same as an empty listing; the variant keeps the
    // failure visible to the code
    Failed,
}

/// Search fetch slice. Failed renders exactly like zero matches.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading,
    Loaded(Vec<Track>),
    Failed,
}

/// The signed-in viewer. `None` means signed out (Landing).
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<UserRecord>,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_approved(&self) -> bool {
        self.user.as_ref().map(|u| u.is_approved).unwrap_or(false)
    }

    /// Approval controls are only offered to admin viewers.
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.role == Role::Admin)
            .unwrap_or(false)
    }

    pub fn uid(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.uid.as_str())
    }
}

/// Which dashboard pane has the selection cursor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DashboardPane {
    #[default]
    Tracks,
    Users,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

pub struct App {
    pub theme: Theme,
    pub is_running: bool,

    pub route: Route,
    pub session: Session,

    /// Directory slice ("Active Users").
    pub users: UsersState,
    /// Last-fetched track list; also the skip list for the playback bar.
    pub tracks: SearchState,
    /// Tracks queued from search results, shown in Library.
    pub queue: Vec<Track>,

    pub playback: Playback,

    /// Search screen input.
    pub search_query: String,
    pub search_active: bool,

    /// Selection cursors.
    pub dashboard_pane: DashboardPane,
    pub track_selected: usize,
    pub user_selected: usize,
    pub queue_selected: usize,

    pub toast: Option<Toast>,
}

impl App {
    pub fn new(session: Session, state: &PersistentState) -> Self {
        let route = if session.is_signed_in() {
            Route::from_key(&state.last_route).unwrap_or_default()
        } else {
            Route::Landing
        };
        Self {
            theme: crate::ui::theme::load_current_theme(),
            is_running: true,
            route,
            session,
            users: UsersState::Idle,
            tracks: SearchState::Idle,
            queue: Vec::new(),
            playback: Playback::new(state.volume),
            search_query: String::new(),
            search_active: false,
            dashboard_pane: DashboardPane::default(),
            track_selected: 0,
            user_selected: 0,
            queue_selected: 0,
            toast: None,
        }
    }

    /// The list skip operations walk over.
    pub fn track_list(&self) -> &[Track] {
        match &self.tracks {
            SearchState::Loaded(tracks) => tracks,
            _ => &[],
        }
    }

    pub fn user_list(&self) -> &[UserRecord] {
        match &self.users {
            UsersState::Loaded(users) => users,
            _ => &[],
        }
    }

    pub fn navigate(&mut self, route: Route) {
        // Everything past Landing needs a session
        if !self.session.is_signed_in()
            && !matches!(route, Route::Landing | Route::Privacy | Route::DataDeletion)
        {
            return;
        }
        self.route = route;
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.track_list().get(self.track_selected)
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.user_list().get(self.user_selected)
    }

    pub fn select_next(&mut self, len: usize, cursor: fn(&mut App) -> &mut usize) {
        if len == 0 {
            return;
        }
        let slot = cursor(self);
        *slot = (*slot + 1) % len;
    }

    pub fn select_prev(&mut self, len: usize, cursor: fn(&mut App) -> &mut usize) {
        if len == 0 {
            return;
        }
        let slot = cursor(self);
        *slot = (*slot + len - 1) % len;
    }

    pub fn queue_add(&mut self, track: Track) {
        // The queue tolerates duplicates, same as the web UI did
        self.queue.push(track);
    }

    /// Apply a resolved approval write to the local listing.
    pub fn apply_approval(&mut self, uid: &str, approved: bool) {
        if let UsersState::Loaded(users) = &mut self.users {
            if let Some(user) = users.iter_mut().find(|u| u.uid == uid) {
                user.is_approved = approved;
            }
        }
        if let Some(user) = self.session.user.as_mut() {
            if user.uid == uid {
                user.is_approved = approved;
            }
        }
    }

    /// The approval-flag write has resolved; drop the session and land
    /// on the welcome screen.
    pub fn complete_sign_out(&mut self) {
        self.session = Session::default();
        self.users = UsersState::Idle;
        self.route = Route::Landing;
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + std::time::Duration::from_millis(2000);

        if let Some(ref mut current) = self.toast {
            // Update in place so rapid toasts don't flash
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick.
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }

    /// Keep cursors inside their lists when a fetch replaces them.
    pub fn clamp_cursors(&mut self) {
        let tracks = self.track_list().len();
        let users = self.user_list().len();
        self.track_selected = self.track_selected.min(tracks.saturating_sub(1));
        self.user_selected = self.user_selected.min(users.saturating_sub(1));
        self.queue_selected = self.queue_selected.min(self.queue.len().saturating_sub(1));
    }
}
