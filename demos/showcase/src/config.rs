//! Configuration management for the showcase screen.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::{AppState, DEFAULT_BANNER_MESSAGE, TodoState, UiState};
use pocket_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Screen configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    /// Banner text shown at startup (`SHOWCASE_BANNER_MESSAGE`)
    pub banner_message: String,
    /// Start in dark mode (`SHOWCASE_DARK_MODE`, default: false)
    pub dark_mode: bool,
    /// Follow-up action budget per dispatch (`SHOWCASE_MAX_CHAINED_ACTIONS`, default: 64)
    pub max_chained_actions: usize,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            banner_message: DEFAULT_BANNER_MESSAGE.to_string(),
            dark_mode: false,
            max_chained_actions: StoreConfig::default().max_chained_actions,
        }
    }
}

impl ShowcaseConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            banner_message: lookup("SHOWCASE_BANNER_MESSAGE")
                .filter(|message| !message.trim().is_empty())
                .unwrap_or(defaults.banner_message),
            dark_mode: lookup("SHOWCASE_DARK_MODE")
                .and_then(|value| parse_flag(&value))
                .unwrap_or(defaults.dark_mode),
            max_chained_actions: lookup("SHOWCASE_MAX_CHAINED_ACTIONS")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(defaults.max_chained_actions),
        }
    }

    /// Initial state tree for a fresh store
    #[must_use]
    pub fn initial_state(&self) -> AppState {
        AppState {
            ui: UiState {
                dark_mode: self.dark_mode,
                ..UiState::new(self.banner_message.clone())
            },
            todos: TodoState::new(),
        }
    }

    /// Store runtime settings
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_chained_actions)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
