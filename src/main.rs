//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with WebSocket endpoints for playing and watching runs.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;

use scavenger::config::server::server_address;
use scavenger::server::run_session::server::RunManager;
use scavenger::server::{router, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Start the RunManager actor (creates and tracks every run).
    let run_manager = RunManager::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(AppState::new(run_manager));

    let (host, port) = server_address();
    info!("[Server] Listening on {}:{}", host, port);

    // Start the HTTP server with WebSocket endpoints.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(router::config)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
