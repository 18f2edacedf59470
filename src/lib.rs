//! # discord-rpc-loader
//!
//! Runtime-loaded Rust bindings to Discord's native `discord-rpc` library.
//!
//! The shared library (`libdiscord-rpc.so`, `libdiscord-rpc.dylib` or
//! `discord-rpc.dll`) is opened with `libloading` when first needed, so the
//! application builds and runs without it; only the calls fail to load.
//! All IPC, reconnection and event handling happen inside the native library.
//!
//! ## Example
//!
//! ```no_run
//! use discord_rpc_loader::{DiscordRpc, EventHandlers, RichPresenceBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rpc = DiscordRpc::load()?;
//!
//! let handlers = EventHandlers::new()
//!     .on_ready(|user| println!("Connected as {}", user.username));
//! rpc.initialize("your_client_id", handlers, true)?;
//!
//! let presence = RichPresenceBuilder::new()
//!     .state("Playing a game")
//!     .details("In the menu")
//!     .start_timestamp_now()?
//!     .large_image("game_logo")
//!     .large_text("My Awesome Game")
//!     .build();
//!
//! rpc.update_presence(&presence)?;
//!
//! for _ in 0..20 {
//!     rpc.run_callbacks();
//!     std::thread::sleep(std::time::Duration::from_millis(500));
//! }
//!
//! rpc.clear_presence();
//! rpc.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod ffi;
pub mod global;
pub mod handlers;
pub mod presence;
pub mod pump;

// Re-export the main public API
pub use client::DiscordRpc;
pub use error::{DiscordRpcError, ErrorCategory, Result};
pub use ffi::constants::NATIVE_VERSION;
pub use ffi::LibrarySource;
pub use handlers::{DiscordUser, EventHandlers, Reply};
pub use presence::{
    PresenceAssets, PresenceParty, PresenceSecrets, PresenceTimestamps, RichPresence,
    RichPresenceBuilder,
};
pub use pump::CallbackPump;
