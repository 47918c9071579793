//! HTTP and WebSocket routing configuration.
//!
//! Defines the endpoints for playing and watching runs.
//! Each endpoint is handled by a dedicated WebSocket actor.

use actix_web::web;
use crate::server::run_session::session::{ws_play, ws_watch};

/// Configure the application's HTTP/WebSocket routes.
///
/// `/ws/play` creates a new run owned by the connecting player.
/// `/ws/watch/{run_id}` attaches a read-only spectator to an existing run.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws/play")
            .to(ws_play)
    )
    .service(
        web::resource("/ws/watch/{run_id}")
            .to(ws_watch)
    );
}
