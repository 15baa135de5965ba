mod app;
mod config;
mod player;
mod search;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use app::{App, AppEvent, DashboardPane, Route, SearchState, Session, UsersState};
use config::AppConfig;
use player::MpvPlayer;
use search::SearchClient;
use store::UserStore;

/// The query the dashboard boots with.
const TRENDING_QUERY: &str = "music trending";

/// YouPiFy - a music discovery dashboard for your terminal 🎵
#[derive(Parser, Debug)]
#[command(name = "youpify", version, about)]
struct Args {
    /// Sign in as this uid (must exist in the user directory)
    #[arg(long, short = 'u')]
    user: Option<String>,

    /// Sign out before starting (lands on the welcome screen)
    #[arg(long)]
    signed_out: bool,

    /// Override the document store directory
    #[arg(long)]
    store_dir: Option<std::path::PathBuf>,

    /// Override the mpv IPC socket path
    #[arg(long)]
    mpv_socket: Option<String>,

    /// Don't spawn or connect to mpv (UI only)
    #[arg(long)]
    no_player: bool,

    /// Write a few demo users into an empty store and exit
    #[arg(long)]
    seed: bool,
}

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("youpify");
    std::fs::create_dir_all(&log_dir).ok()?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "youpify.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("YOUPIFY_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    // Logs go to a file; stdout belongs to the terminal UI
    let _log_guard = init_logging();

    let (user_config, mut persisted) = AppConfig::load();

    let store_dir = args
        .store_dir
        .clone()
        .unwrap_or_else(|| user_config.resolve_store_dir());
    let store = UserStore::open(&store_dir)?;

    if args.seed {
        let written = store.seed_demo_users()?;
        println!("Seeded {} demo users into {:?}", written, store_dir);
        return Ok(());
    }

    // Resolve the session: explicit --user wins, then the persisted uid
    if args.signed_out {
        persisted.session_uid = None;
    }
    let session_uid = args.user.clone().or_else(|| persisted.session_uid.clone());
    let session = match session_uid {
        Some(uid) => match store.get_user(&uid) {
            Ok(user) => Session { user: Some(user) },
            Err(e) => {
                tracing::warn!("session uid {} not resolvable: {}", uid, e);
                Session::default()
            }
        },
        None => Session::default(),
    };
    persisted.session_uid = session.uid().map(|s| s.to_string());

    // Window title for tiling WMs 🏷️
    print!("\x1b]2;YouPiFy\x07");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, &persisted);

    // Shared HTTP client, built once
    let client = reqwest::Client::builder()
        .user_agent("youpify-rs/0.3")
        .build()
        .unwrap_or_default();
    let api_key = user_config.resolve_api_key();
    let search_client = api_key.map(|key| {
        Arc::new(SearchClient::new(
            client.clone(),
            key,
            user_config.max_results,
        ))
    });
    if search_client.is_none() {
        app.show_toast("🔑 No API key (set YOUPIFY_API_KEY)");
    }

    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. User Directory Fetch (one-shot; races the trending fetch)
    if app.session.is_signed_in() {
        app.users = UsersState::Loading;
        let tx_users = tx.clone();
        let store_fetch = store.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || store_fetch.list_users()).await;
            let state = match result {
                Ok(Ok(users)) => UsersState::Loaded(users),
                Ok(Err(e)) => {
                    tracing::warn!("user directory fetch failed: {}", e);
                    UsersState::Failed
                }
                Err(e) => {
                    tracing::warn!("user directory task panicked: {}", e);
                    UsersState::Failed
                }
            };
            let _ = tx_users.send(AppEvent::UsersUpdate(state)).await;
        });
    }

    // 3. Trending Fetch (one-shot)
    if app.session.is_signed_in() {
        if let Some(search) = search_client.clone() {
            app.tracks = SearchState::Loading;
            spawn_search(tx.clone(), search, TRENDING_QUERY.to_string());
        }
    }

    // 4. Player Spawn + Ready Poll 🎛️
    let mpv_socket = args
        .mpv_socket
        .clone()
        .unwrap_or_else(|| user_config.mpv_socket.clone());
    let mut mpv_child: Option<tokio::process::Child> = None;
    if !args.no_player {
        match tokio::process::Command::new("mpv")
            .arg("--idle=yes")
            .arg("--no-video")
            .arg("--really-quiet")
            .arg(format!("--input-ipc-server={}", mpv_socket))
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
        {
            Ok(child) => {
                mpv_child = Some(child);
                let tx_player = tx.clone();
                tokio::spawn(async move {
                    // Poll the socket until mpv is up; give up after ~15s
                    for _ in 0..50 {
                        tokio::time::sleep(Duration::from_millis(300)).await;
                        let socket = mpv_socket.clone();
                        let connected =
                            tokio::task::spawn_blocking(move || MpvPlayer::connect(&socket)).await;
                        if let Ok(Ok(player)) = connected {
                            let _ = tx_player
                                .send(AppEvent::PlayerReady(Box::new(player)))
                                .await;
                            return;
                        }
                    }
                    tracing::warn!("mpv ipc socket never became ready");
                });
            }
            Err(e) => {
                tracing::warn!("could not spawn mpv: {}", e);
                app.show_toast("🔇 mpv not found (playback disabled)");
            }
        }
    }

    // 5. Tick Task
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    // --- Event Loop ---

    while app.is_running {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        let Some(event) = rx.recv().await else { break };
        match event {
            AppEvent::Input(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                // Search input captures all character keys first
                if app.search_active {
                    match key.code {
                        KeyCode::Esc => {
                            app.search_active = false;
                        }
                        KeyCode::Enter => {
                            app.search_active = false;
                            let query = app.search_query.trim().to_string();
                            if !query.is_empty() {
                                if let Some(search) = search_client.clone() {
                                    app.tracks = SearchState::Loading;
                                    app.track_selected = 0;
                                    spawn_search(tx.clone(), search, query);
                                } else {
                                    app.show_toast("🔑 No API key (set YOUPIFY_API_KEY)");
                                }
                            }
                        }
                        KeyCode::Backspace => {
                            app.search_query.pop();
                        }
                        KeyCode::Char(c) => {
                            app.search_query.push(c);
                        }
                        _ => {}
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => {
                        app.is_running = false;
                    }
                    // Navigation
                    KeyCode::Char('1') => app.navigate(Route::Dashboard),
                    KeyCode::Char('2') => app.navigate(Route::Discover),
                    KeyCode::Char('3') => app.navigate(Route::Library),
                    KeyCode::Char('4') => app.navigate(Route::Search),
                    KeyCode::Char('5') => app.navigate(Route::Profile(None)),
                    KeyCode::Char('v') => app.navigate(Route::Privacy),
                    KeyCode::Char('x') => app.navigate(Route::DataDeletion),
                    KeyCode::Esc => {
                        let home = if app.session.is_signed_in() {
                            Route::Dashboard
                        } else {
                            Route::Landing
                        };
                        app.navigate(home);
                    }
                    KeyCode::Char('/') => {
                        app.navigate(Route::Search);
                        if app.route == Route::Search {
                            app.search_active = true;
                        }
                    }
                    KeyCode::Tab if app.route == Route::Dashboard => {
                        app.dashboard_pane = match app.dashboard_pane {
                            DashboardPane::Tracks => DashboardPane::Users,
                            DashboardPane::Users => DashboardPane::Tracks,
                        };
                    }
                    // List movement
                    KeyCode::Char('j') | KeyCode::Down => select_move(&mut app, 1),
                    KeyCode::Char('k') | KeyCode::Up => select_move(&mut app, -1),
                    // Open the selected user's profile
                    KeyCode::Enter
                        if app.route == Route::Dashboard
                            && app.dashboard_pane == DashboardPane::Users =>
                    {
                        if let Some(user) = app.selected_user() {
                            let uid = user.uid.clone();
                            app.navigate(Route::Profile(Some(uid)));
                        }
                    }
                    // Play the selected track
                    KeyCode::Enter => {
                        let track = match app.route {
                            Route::Library => app.queue.get(app.queue_selected).cloned(),
                            _ => app.selected_track().cloned(),
                        };
                        if let Some(track) = track {
                            app.playback.play_or_toggle(&track);
                        }
                    }
                    // Queue from search results
                    KeyCode::Char('+') if app.route == Route::Search => {
                        if let Some(track) = app.selected_track().cloned() {
                            app.show_toast(&format!("➕ Queued: {}", track.title));
                            app.queue_add(track);
                        }
                    }
                    // Transport
                    KeyCode::Char(' ') => {
                        if let Some(track) = app.playback.current_track.clone() {
                            app.playback.play_or_toggle(&track);
                        }
                    }
                    KeyCode::Char(']') | KeyCode::Right => {
                        let tracks = app.track_list().to_vec();
                        app.playback.skip_forward(&tracks);
                    }
                    KeyCode::Char('[') | KeyCode::Left => {
                        let tracks = app.track_list().to_vec();
                        app.playback.skip_back(&tracks);
                    }
                    KeyCode::Char('=') => app.playback.volume_up(),
                    KeyCode::Char('-') => app.playback.volume_down(),
                    // Approval toggle (admin viewers only; the store
                    // itself does not check)
                    KeyCode::Char('a')
                        if app.route == Route::Dashboard
                            && app.dashboard_pane == DashboardPane::Users =>
                    {
                        if !app.session.is_admin() {
                            app.show_toast("🔒 Admins only");
                        } else if let Some(user) = app.selected_user() {
                            let uid = user.uid.clone();
                            let next = !user.is_approved;
                            spawn_set_approval(tx.clone(), store.clone(), uid, next, None);
                        }
                    }
                    // Sign out: flip the approval flag off, then leave
                    KeyCode::Char('o') => {
                        if let Some(uid) = app.session.uid().map(|s| s.to_string()) {
                            spawn_set_approval(
                                tx.clone(),
                                store.clone(),
                                uid,
                                false,
                                Some(AppEvent::SignedOut),
                            );
                        }
                    }
                    _ => {}
                }
            }
            AppEvent::Input(_) => {}
            AppEvent::UsersUpdate(state) => {
                app.users = state;
                app.clamp_cursors();
            }
            AppEvent::SearchUpdate(state) => {
                app.tracks = state;
                app.clamp_cursors();
            }
            AppEvent::PlayerReady(handle) => {
                app.playback.bind_player(handle);
                app.show_toast("🎧 Player ready");
            }
            AppEvent::ApprovalUpdate { uid, approved } => {
                app.apply_approval(&uid, approved);
                let label = if approved { "approved" } else { "pending" };
                app.show_toast(&format!("✅ {} is now {}", uid, label));
            }
            AppEvent::SignedOut => {
                app.complete_sign_out();
                persisted.session_uid = None;
            }
            AppEvent::Tick => {
                app.on_tick();
            }
        }
    }

    // Teardown + persist session state
    if let Some(mut child) = mpv_child {
        let _ = child.start_kill();
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    persisted.volume = app.playback.volume();
    persisted.last_route = app.route.as_key().to_string();
    persisted.session_uid = app.session.uid().map(|s| s.to_string());
    persisted.save();

    Ok(())
}

/// Move the active list's cursor, cyclically.
fn select_move(app: &mut App, step: isize) {
    let (len, cursor): (usize, fn(&mut App) -> &mut usize) = match app.route {
        Route::Library => (app.queue.len(), |a| &mut a.queue_selected),
        Route::Dashboard if app.dashboard_pane == DashboardPane::Users => {
            (app.user_list().len(), |a| &mut a.user_selected)
        }
        _ => (app.track_list().len(), |a| &mut a.track_selected),
    };
    if step > 0 {
        app.select_next(len, cursor);
    } else {
        app.select_prev(len, cursor);
    }
}

/// Fire a search; the completion lands on the event channel. Failures
/// are logged and collapse to the Failed slice state, which the views
/// render like an empty result set.
fn spawn_search(tx: mpsc::Sender<AppEvent>, search: Arc<SearchClient>, query: String) {
    tokio::spawn(async move {
        let state = match search.search(&query).await {
            Ok(tracks) => SearchState::Loaded(tracks),
            Err(e) => {
                tracing::warn!("search '{}' failed: {}", query, e);
                SearchState::Failed
            }
        };
        let _ = tx.send(AppEvent::SearchUpdate(state)).await;
    });
}

/// Fire an approval write. On success an ApprovalUpdate comes back (or
/// the follow-up event, for sign-out); on failure we only log, matching
/// the original's catch-and-log.
fn spawn_set_approval(
    tx: mpsc::Sender<AppEvent>,
    store: UserStore,
    uid: String,
    approved: bool,
    follow_up: Option<AppEvent>,
) {
    tokio::spawn(async move {
        let write_uid = uid.clone();
        let result =
            tokio::task::spawn_blocking(move || store.set_approval(&write_uid, approved)).await;
        match result {
            Ok(Ok(())) => {
                let event = follow_up.unwrap_or(AppEvent::ApprovalUpdate { uid, approved });
                let _ = tx.send(event).await;
            }
            Ok(Err(e)) => tracing::warn!("approval write for {} failed: {}", uid, e),
            Err(e) => tracing::warn!("approval task panicked: {}", e),
        }
    });
}
