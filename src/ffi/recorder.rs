//! In-process stand-in for the native library used by unit tests
//!
//! Every entry point copies its arguments into a [`Call`] so tests can check
//! exactly what crossed the boundary.

use std::borrow::Cow;
use std::os::raw::{c_char, c_int};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ffi::abi;
use crate::ffi::strings::{from_c_str, owned_or_empty};

static CALLS: Mutex<Vec<Call>> = Mutex::new(Vec::new());
static LAST_HANDLERS: Mutex<Option<abi::DiscordEventHandlers>> = Mutex::new(None);
static SERIAL: Mutex<()> = Mutex::new(());

/// Copy of a `DiscordRichPresence` as the library received it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PresenceSnapshot {
    pub state: Option<String>,
    pub details: Option<String>,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub large_image_key: Option<String>,
    pub large_image_text: Option<String>,
    pub small_image_key: Option<String>,
    pub small_image_text: Option<String>,
    pub party_id: Option<String>,
    pub party_size: c_int,
    pub party_max: c_int,
    pub match_secret: Option<String>,
    pub join_secret: Option<String>,
    pub spectate_secret: Option<String>,
    pub instance: i8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Initialize {
        application_id: String,
        handlers: [bool; 6],
        auto_register: c_int,
        steam_id: Option<String>,
    },
    Register {
        application_id: String,
        command: String,
    },
    RegisterSteamGame {
        application_id: String,
        steam_id: String,
    },
    UpdateHandlers([bool; 6]),
    Shutdown,
    RunCallbacks,
    UpdatePresence(PresenceSnapshot),
    ClearPresence,
    Respond {
        user_id: String,
        reply: c_int,
    },
}

/// Tests touching process-wide state (the log, the handler registry) run one
/// at a time; the log starts empty for each of them.
pub(crate) fn serial() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    CALLS.lock().unwrap_or_else(PoisonError::into_inner).clear();
    *LAST_HANDLERS.lock().unwrap_or_else(PoisonError::into_inner) = None;
    guard
}

/// Drain the calls recorded so far
pub(crate) fn take() -> Vec<Call> {
    std::mem::take(&mut *CALLS.lock().unwrap_or_else(PoisonError::into_inner))
}

/// Handler table passed by the most recent initialize or update
pub(crate) fn last_handlers() -> Option<abi::DiscordEventHandlers> {
    *LAST_HANDLERS.lock().unwrap_or_else(PoisonError::into_inner)
}

fn record(call: Call) {
    CALLS.lock().unwrap_or_else(PoisonError::into_inner).push(call);
}

unsafe fn optional(raw: *const c_char) -> Option<String> {
    from_c_str(raw).map(Cow::into_owned)
}

unsafe fn slots(raw: *const abi::DiscordEventHandlers) -> [bool; 6] {
    let Some(table) = raw.as_ref() else {
        return [false; 6];
    };
    *LAST_HANDLERS.lock().unwrap_or_else(PoisonError::into_inner) = Some(*table);
    [
        table.ready.is_some(),
        table.disconnected.is_some(),
        table.errored.is_some(),
        table.join_game.is_some(),
        table.spectate_game.is_some(),
        table.join_request.is_some(),
    ]
}

pub(crate) unsafe extern "C" fn initialize(
    application_id: *const c_char,
    handlers: *mut abi::DiscordEventHandlers,
    auto_register: c_int,
    optional_steam_id: *const c_char,
) {
    record(Call::Initialize {
        application_id: owned_or_empty(application_id),
        handlers: slots(handlers),
        auto_register,
        steam_id: optional(optional_steam_id),
    });
}

pub(crate) unsafe extern "C" fn register(application_id: *const c_char, command: *const c_char) {
    record(Call::Register {
        application_id: owned_or_empty(application_id),
        command: owned_or_empty(command),
    });
}

pub(crate) unsafe extern "C" fn register_steam_game(
    application_id: *const c_char,
    steam_id: *const c_char,
) {
    record(Call::RegisterSteamGame {
        application_id: owned_or_empty(application_id),
        steam_id: owned_or_empty(steam_id),
    });
}

pub(crate) unsafe extern "C" fn update_handlers(handlers: *mut abi::DiscordEventHandlers) {
    record(Call::UpdateHandlers(slots(handlers)));
}

pub(crate) unsafe extern "C" fn shutdown() {
    record(Call::Shutdown);
}

pub(crate) unsafe extern "C" fn run_callbacks() {
    record(Call::RunCallbacks);
}

pub(crate) unsafe extern "C" fn update_presence(presence: *const abi::DiscordRichPresence) {
    let Some(raw) = presence.as_ref() else {
        record(Call::UpdatePresence(PresenceSnapshot::default()));
        return;
    };
    record(Call::UpdatePresence(PresenceSnapshot {
        state: optional(raw.state),
        details: optional(raw.details),
        start_timestamp: raw.start_timestamp,
        end_timestamp: raw.end_timestamp,
        large_image_key: optional(raw.large_image_key),
        large_image_text: optional(raw.large_image_text),
        small_image_key: optional(raw.small_image_key),
        small_image_text: optional(raw.small_image_text),
        party_id: optional(raw.party_id),
        party_size: raw.party_size,
        party_max: raw.party_max,
        match_secret: optional(raw.match_secret),
        join_secret: optional(raw.join_secret),
        spectate_secret: optional(raw.spectate_secret),
        instance: raw.instance,
    }));
}

pub(crate) unsafe extern "C" fn clear_presence() {
    record(Call::ClearPresence);
}

pub(crate) unsafe extern "C" fn respond(user_id: *const c_char, reply: c_int) {
    record(Call::Respond {
        user_id: owned_or_empty(user_id),
        reply,
    });
}
