use discord_rpc_loader::{global, CallbackPump, EventHandlers, Result, RichPresenceBuilder};
use std::thread;
use std::time::Duration;

/// Example showing a dynamic game status that changes over time
fn main() -> Result {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let client_id =
        std::env::var("DISCORD_CLIENT_ID").unwrap_or_else(|_| "YOUR-CLIENT-ID".to_string());

    // Shared instance, loaded from `discord-rpc` on first use
    let rpc = global::instance()?;
    rpc.initialize(
        &client_id,
        EventHandlers::new().on_ready(|user| println!(" Connected as {}", user.username)),
        true,
    )?;
    let pump = CallbackPump::spawn(rpc.clone(), Duration::from_millis(250))?;

    println!("Starting Discord Rich Presence for Game Demo...");

    // Game states to cycle through
    let game_states = vec![
        (" Main Menu", "Selecting character", "menu_bg", "Main Menu"),
        (
            " Forest Level",
            "Fighting goblins",
            "forest_map",
            "Enchanted Forest",
        ),
        (" Castle", "Boss battle", "castle_map", "Dark Castle"),
        (" Victory Screen", "Quest completed!", "victory", "Victory!"),
    ];

    for (i, (state, details, image_key, image_text)) in game_states.iter().enumerate() {
        println!("\n Game State {}: {}", i + 1, state);

        let presence = RichPresenceBuilder::new()
            .state(*state)
            .details(*details)
            .start_timestamp_now()?
            .large_image(*image_key) // You'd need to upload these to Discord
            .large_text(*image_text)
            .small_image("player_avatar")
            .small_text("Level 25 Warrior")
            .party("party-42", 1, 4)
            .build();

        rpc.update_presence(&presence)?;

        // Stay in this state for 8 seconds
        thread::sleep(Duration::from_secs(8));
    }

    println!("\n Game ended, clearing presence...");
    rpc.clear_presence();
    drop(pump);
    rpc.shutdown();
    println!(" Presence cleared!");

    Ok(())
}
