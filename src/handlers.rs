//! Event callbacks delivered by `Discord_RunCallbacks`
//!
//! discord-rpc callbacks carry no user data pointer, so the closures live in a
//! process-wide registry and the native side only ever sees the fixed
//! `extern "C"` trampolines in this module.

use std::fmt;
use std::os::raw::{c_char, c_int};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use log::{error, trace};

use crate::ffi::abi::{self, constants};
use crate::ffi::strings::{from_c_str, owned_or_empty};

type UserHandler = Arc<dyn Fn(&DiscordUser) + Send + Sync>;
type StatusHandler = Arc<dyn Fn(i32, &str) + Send + Sync>;
type SecretHandler = Arc<dyn Fn(&str) + Send + Sync>;

static REGISTRY: RwLock<EventHandlers> = RwLock::new(EventHandlers::new());

/// A Discord user as reported by the `ready` and join request events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscordUser {
    pub user_id: String,
    pub username: String,
    pub discriminator: String,
    /// Avatar hash; `None` when the user has the default avatar
    pub avatar: Option<String>,
}

impl DiscordUser {
    /// # Safety
    ///
    /// `raw` must be null or point to a valid `DiscordUser` whose strings are
    /// null or NUL-terminated.
    pub(crate) unsafe fn from_raw(raw: *const abi::DiscordUser) -> Self {
        let Some(raw) = raw.as_ref() else {
            return Self::default();
        };

        Self {
            user_id: owned_or_empty(raw.user_id),
            username: owned_or_empty(raw.username),
            discriminator: owned_or_empty(raw.discriminator),
            avatar: from_c_str(raw.avatar)
                .filter(|avatar| !avatar.is_empty())
                .map(|avatar| avatar.into_owned()),
        }
    }
}

/// Answer to a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    No,
    Yes,
    Ignore,
}

impl From<Reply> for c_int {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::No => constants::REPLY_NO,
            Reply::Yes => constants::REPLY_YES,
            Reply::Ignore => constants::REPLY_IGNORE,
        }
    }
}

/// Closures invoked for discord-rpc events
///
/// Only events with a closure attached are subscribed to on the native side.
///
/// Handlers run inside [`DiscordRpc::run_callbacks`](crate::DiscordRpc::run_callbacks)
/// while discord-rpc holds its handler lock. Calling
/// [`respond`](crate::DiscordRpc::respond) or
/// [`update_presence`](crate::DiscordRpc::update_presence) from a handler is
/// fine; `update_handlers` and `shutdown` take that lock again and deadlock.
///
/// ```
/// use discord_rpc_loader::EventHandlers;
///
/// let handlers = EventHandlers::new()
///     .on_ready(|user| println!("Connected as {}", user.username))
///     .on_disconnected(|code, message| eprintln!("Disconnected ({code}): {message}"));
/// # let _ = handlers;
/// ```
#[derive(Clone, Default)]
pub struct EventHandlers {
    ready: Option<UserHandler>,
    disconnected: Option<StatusHandler>,
    errored: Option<StatusHandler>,
    join_game: Option<SecretHandler>,
    spectate_game: Option<SecretHandler>,
    join_request: Option<UserHandler>,
}

impl EventHandlers {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ready: None,
            disconnected: None,
            errored: None,
            join_game: None,
            spectate_game: None,
            join_request: None,
        }
    }

    /// Connected to the Discord client
    pub fn on_ready<F>(mut self, handler: F) -> Self
    where
        F: Fn(&DiscordUser) + Send + Sync + 'static,
    {
        self.ready = Some(Arc::new(handler));
        self
    }

    /// Connection to the Discord client was lost; receives the error code and message
    pub fn on_disconnected<F>(mut self, handler: F) -> Self
    where
        F: Fn(i32, &str) + Send + Sync + 'static,
    {
        self.disconnected = Some(Arc::new(handler));
        self
    }

    /// The Discord client reported an error
    pub fn on_errored<F>(mut self, handler: F) -> Self
    where
        F: Fn(i32, &str) + Send + Sync + 'static,
    {
        self.errored = Some(Arc::new(handler));
        self
    }

    /// The user accepted a join invite; receives the join secret
    pub fn on_join_game<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.join_game = Some(Arc::new(handler));
        self
    }

    /// The user chose to spectate; receives the spectate secret
    pub fn on_spectate_game<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.spectate_game = Some(Arc::new(handler));
        self
    }

    /// Another user asked to join; answer with [`DiscordRpc::respond`](crate::DiscordRpc::respond)
    pub fn on_join_request<F>(mut self, handler: F) -> Self
    where
        F: Fn(&DiscordUser) + Send + Sync + 'static,
    {
        self.join_request = Some(Arc::new(handler));
        self
    }

    /// Native table pointing at the trampolines for every populated slot
    fn to_raw(&self) -> abi::DiscordEventHandlers {
        abi::DiscordEventHandlers {
            ready: self.ready.as_ref().map(|_| ready_trampoline as abi::ReadyCallback),
            disconnected: self
                .disconnected
                .as_ref()
                .map(|_| disconnected_trampoline as abi::DisconnectedCallback),
            errored: self
                .errored
                .as_ref()
                .map(|_| errored_trampoline as abi::ErroredCallback),
            join_game: self
                .join_game
                .as_ref()
                .map(|_| join_game_trampoline as abi::JoinGameCallback),
            spectate_game: self
                .spectate_game
                .as_ref()
                .map(|_| spectate_game_trampoline as abi::SpectateGameCallback),
            join_request: self
                .join_request
                .as_ref()
                .map(|_| join_request_trampoline as abi::JoinRequestCallback),
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("ready", &self.ready.is_some())
            .field("disconnected", &self.disconnected.is_some())
            .field("errored", &self.errored.is_some())
            .field("join_game", &self.join_game.is_some())
            .field("spectate_game", &self.spectate_game.is_some())
            .field("join_request", &self.join_request.is_some())
            .finish()
    }
}

/// Store `handlers` in the registry and return the table for the native call
pub(crate) fn install(handlers: EventHandlers) -> abi::DiscordEventHandlers {
    let raw = handlers.to_raw();
    trace!("Installing {:?}", handlers);
    *REGISTRY.write().unwrap_or_else(PoisonError::into_inner) = handlers;
    raw
}

pub(crate) fn clear() {
    *REGISTRY.write().unwrap_or_else(PoisonError::into_inner) = EventHandlers::new();
}

/// Clone one slot out so the registry lock is released before user code runs
fn slot<T>(pick: impl FnOnce(&EventHandlers) -> Option<T>) -> Option<T> {
    let handlers = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    pick(&*handlers)
}

fn dispatch(event: &'static str, call: impl FnOnce()) {
    trace!("Dispatching {} event", event);
    if catch_unwind(AssertUnwindSafe(call)).is_err() {
        error!("The {} handler panicked; the panic was stopped at the FFI boundary", event);
    }
}

unsafe extern "C" fn ready_trampoline(user: *const abi::DiscordUser) {
    let Some(handler) = slot(|h| h.ready.clone()) else {
        return;
    };
    let user = DiscordUser::from_raw(user);
    dispatch("ready", || handler(&user));
}

unsafe extern "C" fn disconnected_trampoline(error_code: c_int, message: *const c_char) {
    let Some(handler) = slot(|h| h.disconnected.clone()) else {
        return;
    };
    let message = owned_or_empty(message);
    dispatch("disconnected", || handler(error_code, &message));
}

unsafe extern "C" fn errored_trampoline(error_code: c_int, message: *const c_char) {
    let Some(handler) = slot(|h| h.errored.clone()) else {
        return;
    };
    let message = owned_or_empty(message);
    dispatch("errored", || handler(error_code, &message));
}

unsafe extern "C" fn join_game_trampoline(join_secret: *const c_char) {
    let Some(handler) = slot(|h| h.join_game.clone()) else {
        return;
    };
    let secret = owned_or_empty(join_secret);
    dispatch("join game", || handler(&secret));
}

unsafe extern "C" fn spectate_game_trampoline(spectate_secret: *const c_char) {
    let Some(handler) = slot(|h| h.spectate_game.clone()) else {
        return;
    };
    let secret = owned_or_empty(spectate_secret);
    dispatch("spectate game", || handler(&secret));
}

unsafe extern "C" fn join_request_trampoline(user: *const abi::DiscordUser) {
    let Some(handler) = slot(|h| h.join_request.clone()) else {
        return;
    };
    let user = DiscordUser::from_raw(user);
    dispatch("join request", || handler(&user));
}
