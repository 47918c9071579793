//! Standalone entry point for playing locally in a terminal.
//!
//! Usage: `standalone [seed]`. Without a seed the run is random.

use log::warn;

use scavenger::game::game_loop::run_game_loop;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // stdout is the game screen: only warnings unless RUST_LOG asks for more.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let seed = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
            warn!("[Standalone] Invalid seed '{}', using a random one", raw);
            rand::random()
        }),
        None => rand::random(),
    };

    run_game_loop(seed).await
}
