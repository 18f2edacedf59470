//! Lazily loaded process-wide instance
//!
//! Convenient when the library is only ever loaded once. The first call to
//! [`instance`] loads `discord-rpc`; [`native_initialize`] swaps in a library
//! with a different name, e.g. `discord-rpc64.dll`.

use std::sync::{Arc, Mutex, PoisonError};

use log::info;

use crate::client::DiscordRpc;
use crate::error::Result;
use crate::ffi::LibrarySource;

static INSTANCE: Mutex<Option<Arc<DiscordRpc>>> = Mutex::new(None);

/// Get the shared instance, loading the default library on first use
///
/// A failed load is not cached; the next call tries again.
pub fn instance() -> Result<Arc<DiscordRpc>> {
    let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(rpc) = slot.as_ref() {
        return Ok(Arc::clone(rpc));
    }

    let rpc = Arc::new(DiscordRpc::load()?);
    info!("Loaded {}", rpc.library_name());
    *slot = Some(Arc::clone(&rpc));
    Ok(rpc)
}

/// Load `source` and make it the shared instance
///
/// Handles returned earlier keep their library loaded until dropped.
pub fn native_initialize(source: LibrarySource) -> Result<Arc<DiscordRpc>> {
    let rpc = Arc::new(DiscordRpc::load_from(source)?);
    info!("Loaded {}", rpc.library_name());

    let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::clone(&rpc));
    Ok(rpc)
}
