// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the run manager actor so HTTP/WebSocket handlers can create
//! and look up runs.

use actix::Addr;
use crate::server::run_session::server::RunManager;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the run manager actor (creates and tracks run sessions).
    pub run_manager: Addr<RunManager>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(run_manager: Addr<RunManager>) -> Self {
        AppState { run_manager }
    }
}
