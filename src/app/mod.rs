pub mod events;
pub mod state;

pub use events::AppEvent;
pub use state::{App, DashboardPane, Route, SearchState, Session, Toast, UsersState};
