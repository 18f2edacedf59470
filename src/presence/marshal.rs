use crate::error::Result;
use crate::ffi::abi::DiscordRichPresence;
use crate::ffi::strings::CStringArena;
use crate::presence::types::RichPresence;

/// A [`DiscordRichPresence`] together with the strings it points into
pub(crate) struct MarshaledPresence {
    raw: DiscordRichPresence,
    _strings: CStringArena,
}

impl MarshaledPresence {
    pub(crate) fn new(presence: &RichPresence) -> Result<Self> {
        let mut arena = CStringArena::new();

        let timestamps = presence.timestamps.as_ref();
        let assets = presence.assets.as_ref();
        let party = presence.party.as_ref();
        let secrets = presence.secrets.as_ref();

        let raw = DiscordRichPresence {
            state: arena.optional("state", presence.state.as_deref())?,
            details: arena.optional("details", presence.details.as_deref())?,
            start_timestamp: timestamps.and_then(|t| t.start).unwrap_or(0),
            end_timestamp: timestamps.and_then(|t| t.end).unwrap_or(0),
            large_image_key: arena
                .optional("large_image", assets.and_then(|a| a.large_image.as_deref()))?,
            large_image_text: arena
                .optional("large_text", assets.and_then(|a| a.large_text.as_deref()))?,
            small_image_key: arena
                .optional("small_image", assets.and_then(|a| a.small_image.as_deref()))?,
            small_image_text: arena
                .optional("small_text", assets.and_then(|a| a.small_text.as_deref()))?,
            party_id: arena.optional("party_id", party.and_then(|p| p.id.as_deref()))?,
            party_size: party.map_or(0, |p| p.size),
            party_max: party.map_or(0, |p| p.max),
            match_secret: arena.optional(
                "match_secret",
                secrets.and_then(|s| s.match_secret.as_deref()),
            )?,
            join_secret: arena.optional("join_secret", secrets.and_then(|s| s.join.as_deref()))?,
            spectate_secret: arena.optional(
                "spectate_secret",
                secrets.and_then(|s| s.spectate.as_deref()),
            )?,
            instance: i8::from(presence.instance),
        };

        Ok(Self {
            raw,
            _strings: arena,
        })
    }

    /// Pointer valid for as long as `self` is alive
    pub(crate) fn as_ptr(&self) -> *const DiscordRichPresence {
        &self.raw
    }
}
