//! Session-scoped preference store
//!
//! Holds string key/value preferences for the lifetime of one client session.
//! Nothing here survives process exit; the play-mode choice is deliberately
//! forgotten between sessions.
//!
//! # Error Handling
//!
//! Load operations handle errors gracefully:
//! - A missing or unparsable entry falls back to the default preference
//! - Failures are logged, never propagated to gameplay

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::core::error::ClientResult;

/// Storage key for the play-mode toggle state
const MODE_PREFERENCE_KEY: &str = "mode_toggle_state";

/// String key/value store scoped to one client session
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store a value, replacing any previous entry under the same key
    pub fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The persisted play-mode choice: `true` plays against the computer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModePreference {
    pub vs_computer: bool,
}

impl Default for ModePreference {
    fn default() -> Self {
        // The mode toggle starts unchecked: two human players.
        Self { vs_computer: false }
    }
}

impl ModePreference {
    /// Text shown next to the mode toggle
    pub fn label(self) -> &'static str {
        if self.vs_computer {
            "Player vs Computer"
        } else {
            "Player vs Player"
        }
    }

    /// Flipped copy of this preference
    pub fn toggled(self) -> Self {
        Self {
            vs_computer: !self.vs_computer,
        }
    }

    /// Read the preference persisted in `store`
    ///
    /// Falls back to the default when nothing was stored or the stored entry
    /// fails to parse. Never issues a network call.
    pub fn load(store: &SessionStore) -> Self {
        match store.get(MODE_PREFERENCE_KEY) {
            Some(raw) => match serde_json::from_str::<ModePreference>(raw) {
                Ok(preference) => {
                    info!("[SETTINGS] Loaded mode preference: {}", preference.label());
                    preference
                }
                Err(e) => {
                    warn!(
                        "[SETTINGS] Failed to parse stored mode preference: {}. Using default.",
                        e
                    );
                    Self::default()
                }
            },
            None => {
                info!("[SETTINGS] No stored mode preference. Using default.");
                Self::default()
            }
        }
    }

    /// Persist the preference into `store`
    pub fn save(self, store: &mut SessionStore) -> ClientResult<()> {
        let json = serde_json::to_string(&self)?;
        store.set(MODE_PREFERENCE_KEY, json);
        Ok(())
    }
}
