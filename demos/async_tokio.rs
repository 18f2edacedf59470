use discord_rpc_loader::{pump, DiscordRpc, EventHandlers, LibrarySource, Result, RichPresenceBuilder};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let client_id = std::env::var("DISCORD_CLIENT_ID").unwrap_or_else(|_| "1416069067697033216".into());
    let rpc = Arc::new(DiscordRpc::load_from(LibrarySource::from_env())?);

    rpc.initialize(
        &client_id,
        EventHandlers::new().on_ready(|user| println!("Connected as {}", user.username)),
        true,
    )?;
    let callbacks = pump::spawn_tokio(Arc::clone(&rpc), Duration::from_millis(500))?;

    let presence = RichPresenceBuilder::new()
        .state("Playing a game")
        .details("In the menu")
        .start_timestamp_now()?
        .large_image("car")
        .large_text("This is a large image")
        .build();

    println!(
        "Presence payload: {}",
        serde_json::to_string_pretty(&presence).unwrap()
    );
    rpc.update_presence(&presence)?;

    println!("Press Ctrl+C to exit");
    let _ = tokio::signal::ctrl_c().await;

    rpc.clear_presence();

    // Make sure no tick is still running before the library shuts down
    callbacks.abort();
    let _ = callbacks.await;
    rpc.shutdown();
    Ok(())
}
