//! `#[repr(C)]` mirrors of the discord-rpc 3.1.0 header

use std::os::raw::{c_char, c_int};

/// Presence payload passed to `Discord_UpdatePresence`
///
/// The native library copies every string into its own buffers during the
/// call, so the pointers only have to stay valid until the call returns.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DiscordRichPresence {
    pub state: *const c_char,
    pub details: *const c_char,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub large_image_key: *const c_char,
    pub large_image_text: *const c_char,
    pub small_image_key: *const c_char,
    pub small_image_text: *const c_char,
    pub party_id: *const c_char,
    pub party_size: c_int,
    pub party_max: c_int,
    pub match_secret: *const c_char,
    pub join_secret: *const c_char,
    pub spectate_secret: *const c_char,
    pub instance: i8,
}

/// User record handed to the `ready` and `joinRequest` callbacks
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DiscordUser {
    pub user_id: *const c_char,
    pub username: *const c_char,
    pub discriminator: *const c_char,
    pub avatar: *const c_char,
}

pub type ReadyCallback = unsafe extern "C" fn(user: *const DiscordUser);
pub type DisconnectedCallback = unsafe extern "C" fn(error_code: c_int, message: *const c_char);
pub type ErroredCallback = unsafe extern "C" fn(error_code: c_int, message: *const c_char);
pub type JoinGameCallback = unsafe extern "C" fn(join_secret: *const c_char);
pub type SpectateGameCallback = unsafe extern "C" fn(spectate_secret: *const c_char);
pub type JoinRequestCallback = unsafe extern "C" fn(user: *const DiscordUser);

/// Callback table; a null slot tells the library not to subscribe to that event
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscordEventHandlers {
    pub ready: Option<ReadyCallback>,
    pub disconnected: Option<DisconnectedCallback>,
    pub errored: Option<ErroredCallback>,
    pub join_game: Option<JoinGameCallback>,
    pub spectate_game: Option<SpectateGameCallback>,
    pub join_request: Option<JoinRequestCallback>,
}

pub type InitializeFn = unsafe extern "C" fn(
    application_id: *const c_char,
    handlers: *mut DiscordEventHandlers,
    auto_register: c_int,
    optional_steam_id: *const c_char,
);
pub type RegisterFn = unsafe extern "C" fn(application_id: *const c_char, command: *const c_char);
pub type RegisterSteamGameFn =
    unsafe extern "C" fn(application_id: *const c_char, steam_id: *const c_char);
pub type UpdateHandlersFn = unsafe extern "C" fn(handlers: *mut DiscordEventHandlers);
pub type ShutdownFn = unsafe extern "C" fn();
pub type RunCallbacksFn = unsafe extern "C" fn();
pub type UpdatePresenceFn = unsafe extern "C" fn(presence: *const DiscordRichPresence);
pub type ClearPresenceFn = unsafe extern "C" fn();
pub type RespondFn = unsafe extern "C" fn(user_id: *const c_char, reply: c_int);

/// Constants describing the native library
pub mod constants {
    use std::os::raw::c_int;

    /// Version of the discord-rpc release whose header these layouts follow
    pub const NATIVE_VERSION: &str = "3.1.0";

    /// Base name the library is loaded under when nothing else is configured
    pub const DEFAULT_LIBRARY_NAME: &str = "discord-rpc";

    /// Environment variable consulted by [`LibrarySource::from_env`](crate::LibrarySource::from_env)
    pub const LIBRARY_ENV_VAR: &str = "DISCORD_RPC_LIBRARY";

    /// `DISCORD_REPLY_NO`
    pub const REPLY_NO: c_int = 0;
    /// `DISCORD_REPLY_YES`
    pub const REPLY_YES: c_int = 1;
    /// `DISCORD_REPLY_IGNORE`
    pub const REPLY_IGNORE: c_int = 2;
}

/// NUL-terminated export names, in header order
pub mod symbols {
    pub const INITIALIZE: &[u8] = b"Discord_Initialize\0";
    pub const REGISTER: &[u8] = b"Discord_Register\0";
    pub const REGISTER_STEAM_GAME: &[u8] = b"Discord_RegisterSteamGame\0";
    pub const UPDATE_HANDLERS: &[u8] = b"Discord_UpdateHandlers\0";
    pub const SHUTDOWN: &[u8] = b"Discord_Shutdown\0";
    pub const RUN_CALLBACKS: &[u8] = b"Discord_RunCallbacks\0";
    pub const UPDATE_PRESENCE: &[u8] = b"Discord_UpdatePresence\0";
    pub const CLEAR_PRESENCE: &[u8] = b"Discord_ClearPresence\0";
    pub const RESPOND: &[u8] = b"Discord_Respond\0";

    /// Printable name of a symbol constant (without the trailing NUL)
    pub fn display(symbol: &'static [u8]) -> &'static str {
        let bytes = symbol.strip_suffix(b"\0").unwrap_or(symbol);
        std::str::from_utf8(bytes).unwrap_or("<non-utf8 symbol>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn handler_table_is_six_nullable_pointers() {
        assert_eq!(
            size_of::<DiscordEventHandlers>(),
            6 * size_of::<*const ()>()
        );
        let empty = DiscordEventHandlers::default();
        assert!(empty.ready.is_none());
        assert!(empty.join_request.is_none());
    }

    #[test]
    fn presence_layout_matches_header() {
        // 10 pointers, 2 int64, 2 int, 1 int8, padded to the struct alignment
        let ptr = size_of::<*const c_char>();
        let unpadded = 10 * ptr + 2 * 8 + 2 * size_of::<c_int>() + 1;
        let align = align_of::<DiscordRichPresence>();
        let padded = unpadded.div_ceil(align) * align;
        assert_eq!(size_of::<DiscordRichPresence>(), padded);
    }

    #[test]
    fn symbol_display_strips_nul() {
        assert_eq!(symbols::display(symbols::INITIALIZE), "Discord_Initialize");
        assert_eq!(symbols::display(symbols::RESPOND), "Discord_Respond");
    }
}
