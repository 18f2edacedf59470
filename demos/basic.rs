use clap::Parser;
use discord_rpc_loader::{DiscordRpc, EventHandlers, LibrarySource, Result, RichPresenceBuilder};
use std::time::Duration;

/// Show a simple Rich Presence for 30 seconds
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Discord Application Client ID
    #[arg(short, long)]
    client_id: Option<String>,

    /// Library name or path (defaults to DISCORD_RPC_LIBRARY, then `discord-rpc`)
    #[arg(short, long)]
    library: Option<String>,
}

fn main() -> Result {
    // Load .env file if it exists (optional)
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args = Args::parse();

    let client_id = args
        .client_id
        .or_else(|| std::env::var("DISCORD_CLIENT_ID").ok())
        .unwrap_or_else(|| {
            eprintln!("Error: DISCORD_CLIENT_ID is required!");
            eprintln!("  - Command line: cargo run --example basic -- --client-id YOUR_ID");
            eprintln!("  - Environment: DISCORD_CLIENT_ID=YOUR_ID cargo run --example basic");
            std::process::exit(1);
        });

    let source = args
        .library
        .map(LibrarySource::named)
        .unwrap_or_else(LibrarySource::from_env);
    let rpc = DiscordRpc::load_from(source)?;
    println!("Loaded {}", rpc.library_name());

    let handlers = EventHandlers::new()
        .on_ready(|user| println!("Connected as {}#{}", user.username, user.discriminator))
        .on_disconnected(|code, message| println!("Disconnected ({code}): {message}"))
        .on_errored(|code, message| eprintln!("Error ({code}): {message}"));
    rpc.initialize(&client_id, handlers, true)?;

    let presence = RichPresenceBuilder::new()
        .state("Playing a game")
        .details("In the menu")
        .start_timestamp_now()?
        .large_image("car")
        .large_text("This is a large image")
        .build();

    rpc.update_presence(&presence)?;

    // Callbacks only fire while we keep pumping them
    for _ in 0..60 {
        rpc.run_callbacks();
        std::thread::sleep(Duration::from_millis(500));
    }

    rpc.clear_presence();
    rpc.shutdown();
    Ok(())
}
