use crossterm::event::Event;

use crate::app::state::{SearchState, UsersState};
use crate::player::PlayerWidget;

pub enum AppEvent {
    Input(Event),
    UsersUpdate(UsersState),
    SearchUpdate(SearchState),
    PlayerReady(Box<dyn PlayerWidget>),
    ApprovalUpdate { uid: String, approved: bool },
    SignedOut,
    Tick,
}
