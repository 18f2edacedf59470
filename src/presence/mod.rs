//! Owned Rich Presence model and its conversion to the native struct

pub mod builder;
pub(crate) mod marshal;
pub mod types;

pub use builder::RichPresenceBuilder;
pub use types::{PresenceAssets, PresenceParty, PresenceSecrets, PresenceTimestamps, RichPresence};
