//! Play-mode toggle
//!
//! Switches between two-player and player-vs-computer play. The choice is
//! persisted in the session store first, then the authority is asked to
//! change mode and reset its game; on confirmation the caller reinitializes
//! the client state, the moral equivalent of a fresh page load.
//!
//! On startup the persisted preference is read back and reflected in the
//! mode label without issuing any network call.

use tracing::{info, warn};

use crate::core::error::ClientResult;
use crate::core::session::{ModePreference, SessionStore};
use crate::networking::client::RuleAuthority;

/// Owns the mode preference and its persistence
pub struct ModeController<A> {
    authority: A,
    store: SessionStore,
    preference: ModePreference,
}

impl<A: RuleAuthority> ModeController<A> {
    /// Restore any persisted preference; never touches the network
    pub fn new(authority: A, store: SessionStore) -> Self {
        let preference = ModePreference::load(&store);
        Self {
            authority,
            store,
            preference,
        }
    }

    pub fn preference(&self) -> ModePreference {
        self.preference
    }

    /// Text for the displayed mode label
    pub fn label(&self) -> &'static str {
        self.preference.label()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Flip and persist the mode, then request the remote mode change and
    /// game reset
    ///
    /// Returns the authority's confirmation text; the caller rebuilds the
    /// client state on success. A persistence failure is logged and does not
    /// interrupt the toggle; a network failure leaves the remote game
    /// untouched (the flipped preference is still persisted, matching the
    /// toggle widget's displayed state).
    pub async fn toggle(&mut self) -> ClientResult<String> {
        self.preference = self.preference.toggled();
        if let Err(e) = self.preference.save(&mut self.store) {
            warn!("[SETTINGS] Failed to persist mode preference: {}", e);
        }
        info!("[SETTINGS] Mode set to {}", self.preference.label());

        self.authority.change_mode().await
    }
}
