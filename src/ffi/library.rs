use libloading::Library;
use log::{debug, warn};

use crate::error::{DiscordRpcError, Result};
use crate::ffi::abi::{self, symbols};
use crate::ffi::source::LibrarySource;

/// A loaded discord-rpc library with all nine entry points resolved
///
/// The function pointers are copied out of their `libloading::Symbol`s; they
/// stay valid for as long as `_library` keeps the image mapped. `_library` is
/// only `None` for the in-process recorder used by unit tests.
pub struct NativeLibrary {
    pub(crate) initialize: abi::InitializeFn,
    pub(crate) register: abi::RegisterFn,
    pub(crate) register_steam_game: abi::RegisterSteamGameFn,
    pub(crate) update_handlers: abi::UpdateHandlersFn,
    pub(crate) shutdown: abi::ShutdownFn,
    pub(crate) run_callbacks: abi::RunCallbacksFn,
    pub(crate) update_presence: abi::UpdatePresenceFn,
    pub(crate) clear_presence: abi::ClearPresenceFn,
    pub(crate) respond: abi::RespondFn,
    name: String,
    _library: Option<Library>,
}

impl NativeLibrary {
    /// Load the library and resolve every entry point
    ///
    /// # Errors
    ///
    /// Returns [`DiscordRpcError::LibraryLoad`] if the file cannot be loaded and
    /// [`DiscordRpcError::MissingSymbol`] if any export is absent.
    pub fn open(source: &LibrarySource) -> Result<Self> {
        let name = source.describe();
        debug!("Loading native library {}", name);

        // SAFETY: loading runs the library's initializers; discord-rpc has no
        // constructor side effects beyond static initialization.
        let library = unsafe { Library::new(source.file_name()) }.map_err(|source| {
            warn!("Could not load {}: {}", name, source);
            DiscordRpcError::LibraryLoad {
                library: name.clone(),
                source,
            }
        })?;

        // SAFETY: each symbol is looked up with the signature from the 3.1.0 header.
        let native = unsafe {
            Self {
                initialize: resolve(&library, &name, symbols::INITIALIZE)?,
                register: resolve(&library, &name, symbols::REGISTER)?,
                register_steam_game: resolve(&library, &name, symbols::REGISTER_STEAM_GAME)?,
                update_handlers: resolve(&library, &name, symbols::UPDATE_HANDLERS)?,
                shutdown: resolve(&library, &name, symbols::SHUTDOWN)?,
                run_callbacks: resolve(&library, &name, symbols::RUN_CALLBACKS)?,
                update_presence: resolve(&library, &name, symbols::UPDATE_PRESENCE)?,
                clear_presence: resolve(&library, &name, symbols::CLEAR_PRESENCE)?,
                respond: resolve(&library, &name, symbols::RESPOND)?,
                name,
                _library: Some(library),
            }
        };

        debug!("Resolved discord-rpc entry points in {}", native.name);
        Ok(native)
    }

    /// The file name or path the library was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry points backed by [`recorder`](crate::ffi::recorder)
    #[cfg(test)]
    pub(crate) fn recording() -> Self {
        use crate::ffi::recorder;

        Self {
            initialize: recorder::initialize,
            register: recorder::register,
            register_steam_game: recorder::register_steam_game,
            update_handlers: recorder::update_handlers,
            shutdown: recorder::shutdown,
            run_callbacks: recorder::run_callbacks,
            update_presence: recorder::update_presence,
            clear_presence: recorder::clear_presence,
            respond: recorder::respond,
            name: "recorder".to_string(),
            _library: None,
        }
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Look up `symbol` and copy the function pointer out
///
/// # Safety
///
/// `T` must be the exact function pointer type of the export.
unsafe fn resolve<T: Copy>(library: &Library, name: &str, symbol: &'static [u8]) -> Result<T> {
    match library.get::<T>(symbol) {
        Ok(found) => Ok(*found),
        Err(source) => {
            let symbol = symbols::display(symbol);
            warn!("{} does not export {}", name, symbol);
            Err(DiscordRpcError::MissingSymbol {
                symbol,
                library: name.to_string(),
                source,
            })
        }
    }
}
