use youpify::app::{App, DashboardPane, Route, SearchState, Session, UsersState};
use youpify::config::PersistentState;
use youpify::player::PlayerState;
use youpify::search::Track;
use youpify::store::{Role, UserRecord, UserStore};

fn sample_user(uid: &str, role: Role, approved: bool) -> UserRecord {
    UserRecord {
        uid: uid.to_string(),
        email: format!("{}@youpify.dev", uid),
        display_name: Some(uid.to_string()),
        photo_url: None,
        role,
        is_approved: approved,
    }
}

fn sample_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {}", id),
        thumbnail: format!("https://i.ytimg.com/vi/{}/default.jpg", id),
        channel_title: "Channel".to_string(),
        duration: "3:45".to_string(),
    }
}

/// Helper to create a signed-in test app
fn create_test_app(role: Role) -> App {
    let session = Session {
        user: Some(sample_user("u-test", role, true)),
    };
    App::new(session, &PersistentState::default())
}

#[test]
fn test_app_initialization() {
    let app = create_test_app(Role::Member);
    assert!(app.is_running);
    assert_eq!(app.route, Route::Dashboard);
    assert_eq!(app.dashboard_pane, DashboardPane::default());
    assert_eq!(app.users, UsersState::Idle);
    assert_eq!(app.tracks, SearchState::Idle);
    assert!(app.queue.is_empty());
    assert_eq!(app.playback.volume(), 75);
}

#[test]
fn test_signed_out_app_lands_on_welcome() {
    let app = App::new(Session::default(), &PersistentState::default());
    assert_eq!(app.route, Route::Landing);
}

#[test]
fn test_navigation_requires_session() {
    let mut app = App::new(Session::default(), &PersistentState::default());

    // Authenticated-only routes are rejected
    app.navigate(Route::Dashboard);
    assert_eq!(app.route, Route::Landing);

    // Policy pages are fine while signed out
    app.navigate(Route::Privacy);
    assert_eq!(app.route, Route::Privacy);
    app.navigate(Route::DataDeletion);
    assert_eq!(app.route, Route::DataDeletion);
}

#[test]
fn test_route_keys_roundtrip() {
    for route in [
        Route::Dashboard,
        Route::Discover,
        Route::Library,
        Route::Search,
        Route::Profile(None),
        Route::Privacy,
        Route::DataDeletion,
    ] {
        assert_eq!(
            Route::from_key(route.as_key()).unwrap().as_key(),
            route.as_key()
        );
    }
}

#[test]
fn test_play_pause_from_track_list() {
    let mut app = create_test_app(Role::Member);
    let tracks = vec![sample_track("a"), sample_track("b"), sample_track("c")];
    app.tracks = SearchState::Loaded(tracks);

    // Play the selection, toggle it, resume it
    let selected = app.selected_track().cloned().unwrap();
    app.playback.play_or_toggle(&selected);
    assert_eq!(app.playback.state(), PlayerState::Playing);
    app.playback.play_or_toggle(&selected);
    assert_eq!(app.playback.state(), PlayerState::Paused);
    app.playback.play_or_toggle(&selected);
    assert_eq!(app.playback.state(), PlayerState::Playing);
}

#[test]
fn test_skip_walks_the_fetched_list() {
    let mut app = create_test_app(Role::Member);
    app.tracks = SearchState::Loaded(vec![
        sample_track("a"),
        sample_track("b"),
        sample_track("c"),
    ]);

    let first = app.track_list()[0].clone();
    app.playback.play_or_toggle(&first);

    let list = app.track_list().to_vec();
    app.playback.skip_forward(&list);
    assert_eq!(app.playback.current_track.as_ref().unwrap().id, "b");
    app.playback.skip_back(&list);
    assert_eq!(app.playback.current_track.as_ref().unwrap().id, "a");

    // Invariant holds throughout
    assert!(app.playback.current_track.is_some() || !app.playback.is_playing);
}

#[test]
fn test_skip_with_empty_fetch_is_noop() {
    let mut app = create_test_app(Role::Member);
    assert!(app.track_list().is_empty());

    let list = app.track_list().to_vec();
    app.playback.skip_forward(&list);
    app.playback.skip_back(&list);
    assert_eq!(app.playback.state(), PlayerState::Stopped);
}

#[test]
fn test_queue_from_search_results() {
    let mut app = create_test_app(Role::Member);
    app.tracks = SearchState::Loaded(vec![sample_track("a")]);

    let track = app.selected_track().cloned().unwrap();
    app.queue_add(track.clone());
    app.queue_add(track); // duplicates allowed
    assert_eq!(app.queue.len(), 2);
    assert_eq!(app.queue[0].id, "a");
}

#[test]
fn test_selection_cursors_wrap_and_clamp() {
    let mut app = create_test_app(Role::Member);
    app.tracks = SearchState::Loaded(vec![sample_track("a"), sample_track("b")]);

    let len = app.track_list().len();
    app.select_next(len, |a| &mut a.track_selected);
    assert_eq!(app.track_selected, 1);
    app.select_next(len, |a| &mut a.track_selected);
    assert_eq!(app.track_selected, 0);
    app.select_prev(len, |a| &mut a.track_selected);
    assert_eq!(app.track_selected, 1);

    // A smaller refetch pulls the cursor back in range
    app.tracks = SearchState::Loaded(vec![sample_track("z")]);
    app.clamp_cursors();
    assert_eq!(app.track_selected, 0);
}

#[test]
fn test_apply_approval_updates_listing_and_session() {
    let mut app = create_test_app(Role::Admin);
    app.users = UsersState::Loaded(vec![
        sample_user("u-test", Role::Admin, true),
        sample_user("u-other", Role::Member, false),
    ]);

    app.apply_approval("u-other", true);
    assert!(app.user_list().iter().find(|u| u.uid == "u-other").unwrap().is_approved);

    // Toggling the viewer's own record updates the session copy too
    app.apply_approval("u-test", false);
    assert!(!app.session.is_approved());
}

#[test]
fn test_admin_gate() {
    let admin = create_test_app(Role::Admin);
    assert!(admin.session.is_admin());
    let member = create_test_app(Role::Member);
    assert!(!member.session.is_admin());
}

#[test]
fn test_sign_out_flow_against_store() {
    // Sign-out end to end: flag write first, then the session drops
    // and the route goes home
    let dir = tempfile::tempdir().unwrap();
    let store = UserStore::open(dir.path()).unwrap();
    store
        .put_user(&sample_user("u-test", Role::Member, true))
        .unwrap();

    let session = Session {
        user: Some(store.get_user("u-test").unwrap()),
    };
    let mut app = App::new(session, &PersistentState::default());
    assert_eq!(app.route, Route::Dashboard);

    // What the event loop does on 'o': write, then complete
    store.set_approval("u-test", false).unwrap();
    app.complete_sign_out();

    assert!(!app.session.is_signed_in());
    assert_eq!(app.route, Route::Landing);
    let stored = store.get_user("u-test").unwrap();
    assert!(!stored.is_approved);
}

#[test]
fn test_volume_persists_through_app_state() {
    let state = PersistentState {
        volume: 30,
        ..PersistentState::default()
    };
    let app = App::new(Session::default(), &state);
    assert_eq!(app.playback.volume(), 30);
}
