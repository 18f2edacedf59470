use serde::{Deserialize, Serialize};

/// Rich Presence payload
///
/// Strings longer than the native buffers (128 bytes, 32 for image keys) are
/// truncated by discord-rpc itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichPresence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<PresenceTimestamps>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<PresenceAssets>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<PresenceParty>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<PresenceSecrets>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub instance: bool,
}

/// Unix timestamps in seconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceTimestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Image keys and hover texts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceParty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub size: i32,

    #[serde(default)]
    pub max: i32,
}

/// Secrets for join, spectate and match invites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSecrets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectate: Option<String>,

    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_secret: Option<String>,
}
