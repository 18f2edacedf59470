//! Background dispatch of `Discord_RunCallbacks`
//!
//! discord-rpc only delivers events while the application keeps calling
//! [`DiscordRpc::run_callbacks`]. These helpers do that on a fixed period.
//!
//! Stop the pump before calling [`DiscordRpc::shutdown`]; a tick still in
//! flight would otherwise overlap `Discord_Shutdown`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error};

use crate::client::DiscordRpc;
use crate::error::{DiscordRpcError, Result};

fn check_period(period: Duration) -> Result {
    if period.is_zero() {
        return Err(DiscordRpcError::InvalidArgument {
            field: "period",
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// Thread that calls `run_callbacks` every `period` until stopped or dropped
///
/// Stop it (or drop it) before [`DiscordRpc::shutdown`].
#[derive(Debug)]
pub struct CallbackPump {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CallbackPump {
    /// Spawn the pump thread
    ///
    /// # Errors
    ///
    /// Returns [`DiscordRpcError::InvalidArgument`] if `period` is zero and
    /// [`DiscordRpcError::Io`] if the thread cannot be spawned.
    pub fn spawn(rpc: Arc<DiscordRpc>, period: Duration) -> Result<Self> {
        check_period(period)?;

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("discord-rpc-callbacks".into())
            .spawn(move || {
                debug!("Callback pump started ({:?} period)", period);
                while flag.load(Ordering::Acquire) {
                    rpc.run_callbacks();
                    thread::park_timeout(period);
                }
                debug!("Callback pump stopped");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Signal the thread and wait for it to finish
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                error!("Callback pump thread panicked");
            }
        }
    }
}

impl Drop for CallbackPump {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Tokio task that calls `run_callbacks` on every tick of `period`
///
/// Abort the returned handle and await it before [`DiscordRpc::shutdown`].
///
/// # Errors
///
/// Returns [`DiscordRpcError::InvalidArgument`] if `period` is zero.
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use discord_rpc_loader::{pump, DiscordRpc};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), discord_rpc_loader::DiscordRpcError> {
/// let rpc = Arc::new(DiscordRpc::load()?);
/// let task = pump::spawn_tokio(Arc::clone(&rpc), Duration::from_millis(500))?;
/// // ...
/// task.abort();
/// let _ = task.await;
/// rpc.shutdown();
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "tokio-runtime")]
pub fn spawn_tokio(
    rpc: Arc<DiscordRpc>,
    period: Duration,
) -> Result<tokio::task::JoinHandle<()>> {
    check_period(period)?;

    Ok(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            rpc.run_callbacks();
        }
    }))
}
