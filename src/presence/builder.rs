use crate::error::{DiscordRpcError, Result};
use crate::presence::types::{
    PresenceAssets, PresenceParty, PresenceSecrets, PresenceTimestamps, RichPresence,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Builder for Rich Presence payloads
#[derive(Debug, Default)]
pub struct RichPresenceBuilder {
    presence: RichPresence,
}

impl RichPresenceBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state line (e.g. "In a group")
    pub fn state<S: Into<String>>(mut self, state: S) -> Self {
        self.presence.state = Some(state.into());
        self
    }

    /// Set the details line (e.g. "Competitive - Ranked")
    pub fn details<S: Into<String>>(mut self, details: S) -> Self {
        self.presence.details = Some(details.into());
        self
    }

    /// Set the start timestamp to now
    ///
    /// # Errors
    ///
    /// Returns an error if the system time is before the UNIX epoch (Jan 1, 1970).
    pub fn start_timestamp_now(mut self) -> Result<Self> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|e| {
            DiscordRpcError::SystemTime(format!("System time is before UNIX epoch: {}", e))
        })?;

        self.get_timestamps().start = Some(now.as_secs() as i64);
        Ok(self)
    }

    pub fn start_timestamp(mut self, timestamp: i64) -> Self {
        self.get_timestamps().start = Some(timestamp);
        self
    }

    pub fn end_timestamp(mut self, timestamp: i64) -> Self {
        self.get_timestamps().end = Some(timestamp);
        self
    }

    pub fn large_image<S: Into<String>>(mut self, key: S) -> Self {
        self.get_assets().large_image = Some(key.into());
        self
    }

    pub fn large_text<S: Into<String>>(mut self, text: S) -> Self {
        self.get_assets().large_text = Some(text.into());
        self
    }

    pub fn small_image<S: Into<String>>(mut self, key: S) -> Self {
        self.get_assets().small_image = Some(key.into());
        self
    }

    pub fn small_text<S: Into<String>>(mut self, text: S) -> Self {
        self.get_assets().small_text = Some(text.into());
        self
    }

    /// Set party information
    pub fn party<S: Into<String>>(mut self, id: S, size: i32, max: i32) -> Self {
        self.presence.party = Some(PresenceParty {
            id: Some(id.into()),
            size,
            max,
        });
        self
    }

    pub fn join_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.get_secrets().join = Some(secret.into());
        self
    }

    pub fn spectate_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.get_secrets().spectate = Some(secret.into());
        self
    }

    pub fn match_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.get_secrets().match_secret = Some(secret.into());
        self
    }

    /// Mark the presence as an instanced game session
    pub fn instance(mut self, instance: bool) -> Self {
        self.presence.instance = instance;
        self
    }

    pub fn build(self) -> RichPresence {
        self.presence
    }

    fn get_secrets(&mut self) -> &mut PresenceSecrets {
        self.presence
            .secrets
            .get_or_insert_with(PresenceSecrets::default)
    }

    fn get_timestamps(&mut self) -> &mut PresenceTimestamps {
        self.presence
            .timestamps
            .get_or_insert_with(PresenceTimestamps::default)
    }

    fn get_assets(&mut self) -> &mut PresenceAssets {
        self.presence
            .assets
            .get_or_insert_with(PresenceAssets::default)
    }
}
