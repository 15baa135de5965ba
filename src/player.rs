//! Playback control: the embedded-player seam and the controller that
//! owns current-track / play-pause / volume state.

use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::sync::Mutex;

use crate::search::Track;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// The slice of the external player we actually drive. Binding happens
/// once the player signals readiness; until then the controller holds
/// no handle and every call through it is a no-op.
pub trait PlayerWidget: Send {
    fn load_video(&self, id: &str) -> Result<()>;
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn set_volume(&self, volume: u8) -> Result<()>;
}

// --- mpv backend (JSON IPC over a unix socket) ---

pub struct MpvPlayer {
    stream: Mutex<UnixStream>,
}

impl MpvPlayer {
    /// Connect to a running mpv's `--input-ipc-server` socket.
    /// A successful connect is the readiness signal.
    pub fn connect(socket_path: &str) -> Result<Self> {
        let stream = UnixStream::connect(socket_path)
            .with_context(|| format!("mpv ipc socket not ready at {}", socket_path))?;
        Ok(Self {
            stream: Mutex::new(stream),
        })
    }

    fn command(&self, cmd: serde_json::Value) -> Result<()> {
        let mut stream = self
            .stream
            .lock()
            .map_err(|_| anyhow::anyhow!("mpv ipc stream poisoned"))?;
        let line = serde_json::to_string(&json!({ "command": cmd }))?;
        writeln!(stream, "{}", line).context("mpv ipc write failed")?;
        Ok(())
    }
}

impl PlayerWidget for MpvPlayer {
    fn load_video(&self, id: &str) -> Result<()> {
        let url = format!("https://www.youtube.com/watch?v={}", id);
        self.command(json!(["loadfile", url, "replace"]))?;
        // Autoplay on load, like the embedded widget
        self.command(json!(["set_property", "pause", false]))
    }

    fn play(&self) -> Result<()> {
        self.command(json!(["set_property", "pause", false]))
    }

    fn pause(&self) -> Result<()> {
        self.command(json!(["set_property", "pause", true]))
    }

    fn set_volume(&self, volume: u8) -> Result<()> {
        self.command(json!(["set_property", "volume", volume]))
    }
}

// --- Controller ---

/// Owns playback state and its binding to the player. Volume set before
/// the handle is bound is retained and pushed on the next track load.
pub struct Playback {
    pub current_track: Option<Track>,
    pub is_playing: bool,
    volume: u8,
    handle: Option<Box<dyn PlayerWidget>>,
}

impl Playback {
    pub fn new(volume: u8) -> Self {
        Self {
            current_track: None,
            is_playing: false,
            volume: volume.min(100),
            handle: None,
        }
    }

    pub fn state(&self) -> PlayerState {
        match (&self.current_track, self.is_playing) {
            (Some(_), true) => PlayerState::Playing,
            (Some(_), false) => PlayerState::Paused,
            (None, _) => PlayerState::Stopped,
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Called when the player's ready signal arrives.
    pub fn bind_player(&mut self, handle: Box<dyn PlayerWidget>) {
        self.handle = Some(handle);
    }

    /// Play `track`, or toggle play/pause if it is already the loaded one.
    /// Selecting the same track while paused resumes; selecting a different
    /// track always loads it from the beginning and goes straight to Playing.
    pub fn play_or_toggle(&mut self, track: &Track) {
        let same = self
            .current_track
            .as_ref()
            .map(|t| t.id == track.id)
            .unwrap_or(false);

        if same {
            if self.is_playing {
                self.forward(|h| h.pause());
            } else {
                self.forward(|h| h.play());
            }
            self.is_playing = !self.is_playing;
        } else {
            self.current_track = Some(track.clone());
            self.is_playing = true;
            self.load_current();
        }
    }

    /// Cyclic previous over `tracks`. Empty list is a no-op.
    pub fn skip_back(&mut self, tracks: &[Track]) {
        self.skip(tracks, -1);
    }

    /// Cyclic next over `tracks`. Empty list is a no-op.
    pub fn skip_forward(&mut self, tracks: &[Track]) {
        self.skip(tracks, 1);
    }

    fn skip(&mut self, tracks: &[Track], step: isize) {
        if tracks.is_empty() {
            return;
        }
        let len = tracks.len() as isize;
        // No current track scans to -1, same as the dashboard's findIndex
        let index = self
            .current_track
            .as_ref()
            .and_then(|current| tracks.iter().position(|t| t.id == current.id))
            .map(|i| i as isize)
            .unwrap_or(-1);
        let neighbor = &tracks[(index + step).rem_euclid(len) as usize];

        let same = self
            .current_track
            .as_ref()
            .map(|t| t.id == neighbor.id)
            .unwrap_or(false);
        if same {
            // Single-element list: keep the track, just republish Playing
            self.is_playing = true;
            self.forward(|h| h.play());
        } else {
            self.current_track = Some(neighbor.clone());
            self.is_playing = true;
            self.load_current();
        }
    }

    /// Clamp to 0..=100, remember, and forward if the handle is bound.
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        let v = self.volume;
        self.forward(|h| h.set_volume(v));
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.volume.saturating_add(5));
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.volume.saturating_sub(5));
    }

    /// Load the current track into the player and re-apply volume.
    fn load_current(&mut self) {
        if let (Some(handle), Some(track)) = (&self.handle, &self.current_track) {
            if let Err(e) = handle.load_video(&track.id) {
                tracing::warn!("player load failed: {}", e);
            }
            if let Err(e) = handle.set_volume(self.volume) {
                tracing::warn!("player volume failed: {}", e);
            }
        }
    }

    fn forward(&self, f: impl FnOnce(&dyn PlayerWidget) -> Result<()>) {
        if let Some(handle) = &self.handle {
            if let Err(e) = f(handle.as_ref()) {
                tracing::warn!("player command failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every call so tests can assert on the command stream.
    #[derive(Clone, Default)]
    pub struct RecordingPlayer {
        pub calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingPlayer {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        pub fn taken(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PlayerWidget for RecordingPlayer {
        fn load_video(&self, id: &str) -> Result<()> {
            self.log(format!("load:{}", id));
            Ok(())
        }
        fn play(&self) -> Result<()> {
            self.log("play".to_string());
            Ok(())
        }
        fn pause(&self) -> Result<()> {
            self.log("pause".to_string());
            Ok(())
        }
        fn set_volume(&self, volume: u8) -> Result<()> {
            self.log(format!("volume:{}", volume));
            Ok(())
        }
    }

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {}", id),
            thumbnail: String::new(),
            channel_title: "Channel".to_string(),
            duration: "3:45".to_string(),
        }
    }

    fn bound_playback() -> (Playback, RecordingPlayer) {
        let recorder = RecordingPlayer::default();
        let mut playback = Playback::new(75);
        playback.bind_player(Box::new(recorder.clone()));
        (playback, recorder)
    }

    #[test]
    fn test_play_toggle_sequence() {
        let (mut playback, recorder) = bound_playback();
        let a = track("a");

        // Stopped -> Playing(a)
        playback.play_or_toggle(&a);
        assert_eq!(playback.state(), PlayerState::Playing);
        // Playing(a) -> Paused(a)
        playback.play_or_toggle(&a);
        assert_eq!(playback.state(), PlayerState::Paused);
        // Paused(a) -> Playing(a), resumed not reloaded
        playback.play_or_toggle(&a);
        assert_eq!(playback.state(), PlayerState::Playing);

        let calls = recorder.taken();
        assert_eq!(calls, vec!["load:a", "volume:75", "pause", "play"]);
    }

    #[test]
    fn test_switching_tracks_goes_straight_to_playing() {
        let (mut playback, recorder) = bound_playback();
        playback.play_or_toggle(&track("a"));
        playback.play_or_toggle(&track("b"));

        assert_eq!(playback.state(), PlayerState::Playing);
        assert_eq!(playback.current_track.as_ref().unwrap().id, "b");
        // No pause in between, it's a fresh load
        let calls = recorder.taken();
        assert!(!calls.contains(&"pause".to_string()));
        assert!(calls.contains(&"load:b".to_string()));
    }

    #[test]
    fn test_skip_forward_then_back_is_identity() {
        let tracks = vec![track("a"), track("b"), track("c")];
        for start in &tracks {
            let (mut playback, _) = bound_playback();
            playback.play_or_toggle(start);
            playback.skip_forward(&tracks);
            playback.skip_back(&tracks);
            assert_eq!(playback.current_track.as_ref().unwrap().id, start.id);
            assert!(playback.is_playing);
        }
    }

    #[test]
    fn test_skip_wraps_around() {
        let tracks = vec![track("a"), track("b"), track("c")];
        let (mut playback, _) = bound_playback();

        playback.play_or_toggle(&track("c"));
        playback.skip_forward(&tracks);
        assert_eq!(playback.current_track.as_ref().unwrap().id, "a");

        playback.skip_back(&tracks);
        assert_eq!(playback.current_track.as_ref().unwrap().id, "c");
    }

    #[test]
    fn test_skip_on_empty_list_is_noop() {
        let (mut playback, recorder) = bound_playback();
        playback.skip_forward(&[]);
        playback.skip_back(&[]);
        assert_eq!(playback.state(), PlayerState::Stopped);
        assert!(recorder.taken().is_empty());
    }

    #[test]
    fn test_skip_single_element_republishes_playing() {
        let tracks = vec![track("a")];
        let (mut playback, recorder) = bound_playback();
        playback.play_or_toggle(&track("a"));
        playback.play_or_toggle(&track("a")); // pause it

        playback.skip_forward(&tracks);
        assert_eq!(playback.current_track.as_ref().unwrap().id, "a");
        assert_eq!(playback.state(), PlayerState::Playing);
        // Resumed, not reloaded
        let calls = recorder.taken();
        assert_eq!(calls.iter().filter(|c| c.starts_with("load:")).count(), 1);
    }

    #[test]
    fn test_unbound_calls_are_safe_noops() {
        let mut playback = Playback::new(75);
        let tracks = vec![track("a"), track("b")];

        playback.play_or_toggle(&track("a"));
        playback.skip_forward(&tracks);
        playback.set_volume(50);
        // State machine still advances even without a handle
        assert_eq!(playback.state(), PlayerState::Playing);
        assert_eq!(playback.volume(), 50);
    }

    #[test]
    fn test_volume_retained_until_bound_then_applied_on_load() {
        let mut playback = Playback::new(75);
        playback.set_volume(40);
        assert_eq!(playback.volume(), 40);

        let recorder = RecordingPlayer::default();
        playback.bind_player(Box::new(recorder.clone()));
        playback.play_or_toggle(&track("a"));

        assert_eq!(recorder.taken(), vec!["load:a", "volume:40"]);
    }

    #[test]
    fn test_volume_is_clamped() {
        let (mut playback, _) = bound_playback();
        playback.set_volume(200);
        assert_eq!(playback.volume(), 100);
        for _ in 0..30 {
            playback.volume_down();
        }
        assert_eq!(playback.volume(), 0);
    }

    #[test]
    fn test_playing_implies_current_track() {
        // Invariant check across an arbitrary operation mix
        let tracks = vec![track("a"), track("b"), track("c")];
        let (mut playback, _) = bound_playback();

        playback.skip_forward(&tracks);
        assert!(!playback.is_playing || playback.current_track.is_some());
        playback.play_or_toggle(&track("b"));
        assert!(!playback.is_playing || playback.current_track.is_some());
        playback.skip_back(&tracks);
        playback.set_volume(10);
        playback.play_or_toggle(&track("b"));
        assert!(!playback.is_playing || playback.current_track.is_some());
    }

    #[test]
    fn test_skip_with_no_current_track_matches_scan_miss() {
        // A scan miss behaves like index -1: forward lands on the head,
        // back lands on len - 2
        let tracks = vec![track("a"), track("b"), track("c")];

        let (mut playback, _) = bound_playback();
        playback.skip_forward(&tracks);
        assert_eq!(playback.current_track.as_ref().unwrap().id, "a");

        let (mut playback, _) = bound_playback();
        playback.skip_back(&tracks);
        assert_eq!(playback.current_track.as_ref().unwrap().id, "b");
    }
}
