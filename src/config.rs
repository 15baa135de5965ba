use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User-editable settings, stored in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// YouTube Data API key; `YOUPIFY_API_KEY` overrides this.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Root of the document store. Defaults to the platform data dir.
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
    /// mpv IPC socket path.
    #[serde(default = "default_mpv_socket")]
    pub mpv_socket: String,
    /// Result-count limit for search requests.
    #[serde(default = "default_max_results")]
    pub max_results: u8,
}

fn default_mpv_socket() -> String {
    "/tmp/youpify-mpv.sock".to_string()
}

fn default_max_results() -> u8 {
    5
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            store_dir: None,
            mpv_socket: default_mpv_socket(),
            max_results: default_max_results(),
        }
    }
}

impl UserConfig {
    /// Env wins over file so CI and one-off runs don't touch config.toml.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var("YOUPIFY_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn resolve_store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(|| {
            let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("youpify");
            path
        })
    }
}

/// Automatically saved session state, stored in `state.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// uid of the signed-in user; cleared on sign-out.
    #[serde(default)]
    pub session_uid: Option<String>,
    #[serde(default)]
    pub last_route: String,
}

fn default_volume() -> u8 {
    75
}

impl Default for PersistentState {
    fn default() -> Self {
        Self {
            volume: 75,
            session_uid: None,
            last_route: String::new(),
        }
    }
}

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("youpify");
        std::fs::create_dir_all(&path).ok();
        path
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    pub fn load() -> (UserConfig, PersistentState) {
        let config_path = Self::get_config_path();
        let user_config = if config_path.exists() {
            fs::read_to_string(&config_path)
                .ok()
                .and_then(|content| toml::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            // Write a default config.toml so the api_key slot is discoverable
            let c = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&c) {
                let _ = fs::write(&config_path, content);
            }
            c
        };

        let state_path = Self::get_state_path();
        let state = if state_path.exists() {
            fs::read_to_string(&state_path)
                .ok()
                .and_then(|content| toml::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            PersistentState::default()
        };

        (user_config, state)
    }
}

impl PersistentState {
    pub fn save(&self) {
        let path = AppConfig::get_state_path();
        if let Ok(content) = toml::to_string_pretty(self) {
            let _ = fs::write(path, content);
        }
    }
}
