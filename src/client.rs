use std::os::raw::c_int;
use std::ptr;

use log::{debug, trace};

use crate::error::Result;
use crate::ffi::strings::to_c_string;
use crate::ffi::{LibrarySource, NativeLibrary};
use crate::handlers::{self, EventHandlers, Reply};
use crate::presence::marshal::MarshaledPresence;
use crate::presence::RichPresence;

/// Handle to a loaded discord-rpc library
///
/// Every method forwards to the matching `Discord_*` export. The native
/// library keeps a single connection per process, so two `DiscordRpc` values
/// loaded from the same file share that state.
#[derive(Debug)]
pub struct DiscordRpc {
    native: NativeLibrary,
}

impl DiscordRpc {
    /// Load the library under its default name (`discord-rpc`)
    pub fn load() -> Result<Self> {
        Self::load_from(LibrarySource::Default)
    }

    /// Load the library from a specific name or path
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use discord_rpc_loader::{DiscordRpc, LibrarySource};
    ///
    /// let rpc = DiscordRpc::load_from(LibrarySource::named("discord-rpc64.dll"))?;
    /// # Ok::<(), discord_rpc_loader::DiscordRpcError>(())
    /// ```
    pub fn load_from(source: LibrarySource) -> Result<Self> {
        let native = NativeLibrary::open(&source)?;
        Ok(Self { native })
    }

    #[cfg(test)]
    pub(crate) fn recording() -> Self {
        Self {
            native: NativeLibrary::recording(),
        }
    }

    /// The file name or path the library was loaded from
    pub fn library_name(&self) -> &str {
        self.native.name()
    }

    /// Start the connection to the Discord client
    ///
    /// # Arguments
    ///
    /// * `application_id` - The Discord application (client) ID
    /// * `handlers` - Closures for the events this application cares about
    /// * `auto_register` - Let the library register the launch command itself
    ///
    /// # Errors
    ///
    /// Returns [`DiscordRpcError::InvalidString`](crate::DiscordRpcError::InvalidString)
    /// if `application_id` contains a NUL byte.
    pub fn initialize(
        &self,
        application_id: &str,
        handlers: EventHandlers,
        auto_register: bool,
    ) -> Result {
        self.initialize_with(application_id, handlers, auto_register, None)
    }

    /// Same as [`initialize`](Self::initialize) for a game distributed through Steam
    pub fn initialize_steam(
        &self,
        application_id: &str,
        handlers: EventHandlers,
        auto_register: bool,
        steam_id: &str,
    ) -> Result {
        self.initialize_with(application_id, handlers, auto_register, Some(steam_id))
    }

    fn initialize_with(
        &self,
        application_id: &str,
        handlers: EventHandlers,
        auto_register: bool,
        steam_id: Option<&str>,
    ) -> Result {
        let application_id = to_c_string("application_id", application_id)?;
        let steam_id = steam_id
            .map(|id| to_c_string("steam_id", id))
            .transpose()?;

        debug!(
            "Initializing discord-rpc (auto_register: {}, steam: {})",
            auto_register,
            steam_id.is_some()
        );
        let mut raw_handlers = handlers::install(handlers);

        trace!("-> Discord_Initialize");
        // SAFETY: all pointers outlive the call; the library copies the handler table.
        unsafe {
            (self.native.initialize)(
                application_id.as_ptr(),
                &mut raw_handlers,
                c_int::from(auto_register),
                steam_id.as_ref().map_or(ptr::null(), |id| id.as_ptr()),
            );
        }
        Ok(())
    }

    /// Register the launch command for `application_id`
    ///
    /// Only needed when `auto_register` was `false` at initialization.
    pub fn register(&self, application_id: &str, command: &str) -> Result {
        let application_id = to_c_string("application_id", application_id)?;
        let command = to_c_string("command", command)?;

        trace!("-> Discord_Register");
        // SAFETY: both strings outlive the call.
        unsafe { (self.native.register)(application_id.as_ptr(), command.as_ptr()) };
        Ok(())
    }

    /// Register a Steam game so Discord launches it through Steam
    pub fn register_steam(&self, application_id: &str, steam_id: &str) -> Result {
        let application_id = to_c_string("application_id", application_id)?;
        let steam_id = to_c_string("steam_id", steam_id)?;

        trace!("-> Discord_RegisterSteamGame");
        // SAFETY: both strings outlive the call.
        unsafe { (self.native.register_steam_game)(application_id.as_ptr(), steam_id.as_ptr()) };
        Ok(())
    }

    /// Replace the event handlers after initialization
    ///
    /// Do not call this from inside a handler: discord-rpc holds its handler
    /// lock while dispatching and `Discord_UpdateHandlers` takes the same
    /// non-recursive lock, so the call would deadlock.
    pub fn update_handlers(&self, handlers: EventHandlers) {
        let mut raw_handlers = handlers::install(handlers);

        trace!("-> Discord_UpdateHandlers");
        // SAFETY: the table outlives the call and is copied by the library.
        unsafe { (self.native.update_handlers)(&mut raw_handlers) };
    }

    /// Close the connection and drop the installed handlers
    ///
    /// Stop any [`CallbackPump`](crate::CallbackPump) first, and never call
    /// this from inside a handler.
    pub fn shutdown(&self) {
        debug!("Shutting down discord-rpc");
        trace!("-> Discord_Shutdown");
        // SAFETY: no arguments.
        unsafe { (self.native.shutdown)() };
        handlers::clear();
    }

    /// Dispatch pending events to the installed handlers
    ///
    /// Must be called periodically; see [`CallbackPump`](crate::CallbackPump).
    pub fn run_callbacks(&self) {
        trace!("-> Discord_RunCallbacks");
        // SAFETY: no arguments.
        unsafe { (self.native.run_callbacks)() };
    }

    /// Send a new Rich Presence
    ///
    /// # Errors
    ///
    /// Returns [`DiscordRpcError::InvalidString`](crate::DiscordRpcError::InvalidString)
    /// naming the first field that contains a NUL byte.
    pub fn update_presence(&self, presence: &RichPresence) -> Result {
        let marshaled = MarshaledPresence::new(presence)?;

        trace!("-> Discord_UpdatePresence");
        // SAFETY: `marshaled` owns every string the struct points to.
        unsafe { (self.native.update_presence)(marshaled.as_ptr()) };
        Ok(())
    }

    /// Hide the Rich Presence until the next [`update_presence`](Self::update_presence)
    pub fn clear_presence(&self) {
        trace!("-> Discord_ClearPresence");
        // SAFETY: no arguments.
        unsafe { (self.native.clear_presence)() };
    }

    /// Answer a join request received through `on_join_request`
    pub fn respond(&self, user_id: &str, reply: Reply) -> Result {
        let user_id = to_c_string("user_id", user_id)?;

        trace!("-> Discord_Respond ({:?})", reply);
        // SAFETY: the string outlives the call.
        unsafe { (self.native.respond)(user_id.as_ptr(), c_int::from(reply)) };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DiscordRpcError, ErrorCategory};
    use crate::ffi::recorder::{self, Call, PresenceSnapshot};
    use crate::presence::RichPresenceBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn load_from_missing_file_fails_cleanly() {
        let error = DiscordRpc::load_from(LibrarySource::path("/nonexistent/libdiscord-rpc.so"))
            .unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Library);
        assert!(error.to_string().contains("libdiscord-rpc.so"));
    }

    #[test]
    fn initialize_passes_null_steam_id() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        rpc.initialize("app", EventHandlers::new().on_ready(|_| {}), true)
            .unwrap();

        assert_eq!(
            recorder::take(),
            vec![Call::Initialize {
                application_id: "app".into(),
                handlers: [true, false, false, false, false, false],
                auto_register: 1,
                steam_id: None,
            }]
        );
    }

    #[test]
    fn initialize_steam_passes_steam_id() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        rpc.initialize_steam("app", EventHandlers::new(), false, "123")
            .unwrap();

        assert_eq!(
            recorder::take(),
            vec![Call::Initialize {
                application_id: "app".into(),
                handlers: [false; 6],
                auto_register: 0,
                steam_id: Some("123".into()),
            }]
        );
    }

    #[test]
    fn register_calls_forward_both_strings() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        rpc.register("app", "/usr/bin/game --discord").unwrap();
        rpc.register_steam("app", "480").unwrap();

        assert_eq!(
            recorder::take(),
            vec![
                Call::Register {
                    application_id: "app".into(),
                    command: "/usr/bin/game --discord".into(),
                },
                Call::RegisterSteamGame {
                    application_id: "app".into(),
                    steam_id: "480".into(),
                },
            ]
        );
    }

    #[test]
    fn invalid_string_never_reaches_the_library() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        let error = rpc.register("app", "bad\0command").unwrap_err();
        assert!(matches!(
            error,
            DiscordRpcError::InvalidString {
                field: "command",
                ..
            }
        ));
        assert!(rpc.respond("u\01", Reply::Yes).is_err());
        assert!(recorder::take().is_empty());
    }

    #[test]
    fn update_handlers_nulls_unset_slots() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        rpc.update_handlers(
            EventHandlers::new()
                .on_errored(|_, _| {})
                .on_join_request(|_| {}),
        );

        assert_eq!(
            recorder::take(),
            vec![Call::UpdateHandlers([
                false, false, true, false, false, true
            ])]
        );
    }

    #[test]
    fn presence_reaches_the_library_intact() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        let presence = RichPresenceBuilder::new()
            .state("s")
            .start_timestamp(5)
            .large_image("cover")
            .party("p", 1, 4)
            .spectate_secret("sp")
            .instance(true)
            .build();
        rpc.update_presence(&presence).unwrap();

        assert_eq!(
            recorder::take(),
            vec![Call::UpdatePresence(PresenceSnapshot {
                state: Some("s".into()),
                start_timestamp: 5,
                large_image_key: Some("cover".into()),
                party_id: Some("p".into()),
                party_size: 1,
                party_max: 4,
                spectate_secret: Some("sp".into()),
                instance: 1,
                ..PresenceSnapshot::default()
            })]
        );
    }

    #[test]
    fn argumentless_calls_forward_in_order() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        rpc.run_callbacks();
        rpc.clear_presence();
        rpc.shutdown();

        assert_eq!(
            recorder::take(),
            vec![Call::RunCallbacks, Call::ClearPresence, Call::Shutdown]
        );
    }

    #[test]
    fn respond_passes_reply_code() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();

        rpc.respond("u1", Reply::Ignore).unwrap();
        rpc.respond("u2", Reply::Yes).unwrap();
        rpc.respond("u3", Reply::No).unwrap();

        assert_eq!(
            recorder::take(),
            vec![
                Call::Respond {
                    user_id: "u1".into(),
                    reply: 2,
                },
                Call::Respond {
                    user_id: "u2".into(),
                    reply: 1,
                },
                Call::Respond {
                    user_id: "u3".into(),
                    reply: 0,
                },
            ]
        );
    }

    #[test]
    fn shutdown_clears_installed_handlers() {
        let _guard = recorder::serial();
        let rpc = DiscordRpc::recording();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        rpc.initialize(
            "app",
            EventHandlers::new().on_join_game(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            true,
        )
        .unwrap();

        // Drive the trampoline the way the library would
        let table = recorder::last_handlers().expect("handler table recorded");
        let join_game = table.join_game.expect("join_game slot populated");
        let secret = std::ffi::CString::new("join").unwrap();

        unsafe { join_game(secret.as_ptr()) };
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        rpc.shutdown();
        unsafe { join_game(secret.as_ptr()) };
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
