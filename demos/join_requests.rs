// Accepts every join request and prints join/spectate secrets.
//
// Joining requires an application with a verified Rich Presence invite setup;
// the secrets below are placeholders your game server would normally issue.

use clap::Parser;
use discord_rpc_loader::{
    CallbackPump, DiscordRpc, EventHandlers, LibrarySource, Reply, Result, RichPresenceBuilder,
};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Discord Application Client ID
    #[arg(short, long, env = "DISCORD_CLIENT_ID")]
    client_id: String,

    /// Steam app id, if the game is launched through Steam
    #[arg(long)]
    steam_id: Option<String>,

    /// How long to wait for requests, in seconds
    #[arg(long, default_value_t = 120)]
    seconds: u64,
}

fn main() -> Result {
    let _ = dotenvy::dotenv();
    env_logger::init();
    let args = Args::parse();

    let rpc = Arc::new(DiscordRpc::load_from(LibrarySource::from_env())?);
    let (requests, incoming) = mpsc::channel();

    let handlers = EventHandlers::new()
        .on_ready(|user| println!("Ready as {}", user.username))
        .on_join_game(|secret| println!("Joining with secret {secret}"))
        .on_spectate_game(|secret| println!("Spectating with secret {secret}"))
        .on_join_request(move |user| {
            // Reply outside the callback so the pump thread is never blocked
            let _ = requests.send(user.clone());
        });

    match &args.steam_id {
        Some(steam_id) => {
            rpc.register_steam(&args.client_id, steam_id)?;
            rpc.initialize_steam(&args.client_id, handlers, false, steam_id)?;
        }
        None => {
            let command = std::env::current_exe()?.display().to_string();
            rpc.register(&args.client_id, &command)?;
            rpc.initialize(&args.client_id, handlers, false)?;
        }
    }

    let presence = RichPresenceBuilder::new()
        .state("Looking for group")
        .details("Lobby")
        .party("lobby-7", 1, 4)
        .join_secret("join-7")
        .spectate_secret("spectate-7")
        .match_secret("match-7")
        .instance(true)
        .build();
    rpc.update_presence(&presence)?;

    let mut pump = CallbackPump::spawn(Arc::clone(&rpc), Duration::from_millis(200))?;

    let deadline = std::time::Instant::now() + Duration::from_secs(args.seconds);
    while let Some(remaining) = deadline.checked_duration_since(std::time::Instant::now()) {
        match incoming.recv_timeout(remaining) {
            Ok(user) => {
                println!("{} asked to join, accepting", user.username);
                rpc.respond(&user.user_id, Reply::Yes)?;
            }
            Err(_) => break,
        }
    }

    pump.stop();
    rpc.clear_presence();
    rpc.shutdown();
    Ok(())
}
