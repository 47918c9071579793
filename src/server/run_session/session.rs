/// WebSocket actors for runs.
///
/// A `PlayerSocket` owns its run: it forwards the player's commands to the `RunSession`
/// and ends the run when the connection closes. A `SpectatorSocket` only receives updates.
use actix::prelude::*;
use actix_web::{web, error, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use std::borrow::Cow;
use uuid::Uuid;

use crate::config::server::DEFAULT_USERNAME;
use crate::server::anti_spam::AntiSpamState;
use crate::server::run_session::messages::{ClientAction, ProcessClientAction, ServerWsMessage};
use crate::server::run_session::server::{
    AttachPlayer, AttachSpectator, CreateRun, DetachPlayer, DetachSpectator, GetRun, RunSession,
};
use crate::server::state::AppState;
use crate::server::ws_actor_utils::{Outbound, WsActorUtils};

/// Turn a server message into what the socket writes. Errors go through anti-spam.
fn outbound<A: WsActorUtils>(actor: &mut A, msg: ServerWsMessage) -> Outbound {
    match msg {
        ServerWsMessage::Error { code, message, context } => actor.screen_error(&code, &message, context),
        other => match serde_json::to_string(&other) {
            Ok(text) => Outbound::Text(text),
            Err(e) => {
                warn!("[RunSocket] Failed to serialize ServerWsMessage: {}", e);
                Outbound::Text(crate::server::ws_error::ws_error_message(
                    "INTERNAL_ERROR",
                    "Failed to serialize run state",
                    None,
                ))
            }
        },
    }
}

/// Why an incoming text frame was not forwarded to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRejection {
    Banned,
    Invalid,
}

pub struct PlayerSocket {
    pub run_id: Uuid,
    pub player_id: Uuid,
    pub session_addr: Addr<RunSession>,
    anti_spam: AntiSpamState,
}

impl PlayerSocket {
    pub fn new(run_id: Uuid, session_addr: Addr<RunSession>) -> Self {
        Self {
            run_id,
            player_id: Uuid::new_v4(),
            session_addr,
            anti_spam: AntiSpamState::new(),
        }
    }

    /// Count a text frame and decode the command in it.
    /// Parsing is not acceptance: only the run decides whether the command stands.
    pub fn read_command(&mut self, text: &str) -> Result<ClientAction, FrameRejection> {
        let session_id = self.session_id();
        if self.anti_spam.record_frame(&session_id) {
            return Err(FrameRejection::Banned);
        }
        serde_json::from_str(text).map_err(|_| FrameRejection::Invalid)
    }

    /// Decide what the socket writes for a message from the run.
    pub fn screen(&mut self, msg: ServerWsMessage) -> Outbound {
        if msg.is_accepted_action() {
            self.anti_spam.action_accepted();
        }
        outbound(self, msg)
    }
}

impl WsActorUtils for PlayerSocket {
    fn anti_spam(&mut self) -> &mut AntiSpamState {
        &mut self.anti_spam
    }

    fn session_id(&self) -> String {
        self.player_id.to_string()
    }
}

impl Actor for PlayerSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.session_addr.do_send(AttachPlayer {
            player_id: self.player_id,
            recipient: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.session_addr.do_send(DetachPlayer { player_id: self.player_id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => match self.read_command(&text) {
                Ok(action) => {
                    self.session_addr.do_send(ProcessClientAction {
                        action,
                        player_id: self.player_id,
                    });
                }
                Err(FrameRejection::Banned) => self.send_ban_and_close(ctx),
                Err(FrameRejection::Invalid) => {
                    self.send_error_and_maybe_ban(
                        ctx,
                        "INVALID_ACTION",
                        "Invalid command",
                        Some(serde_json::json!({ "run_id": self.run_id })),
                    );
                }
            },
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[PlayerSocket] Protocol error on run {}: {}", self.run_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for PlayerSocket {
    type Result = ();

    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        let outbound = self.screen(msg);
        self.deliver(ctx, outbound);
    }
}

pub struct SpectatorSocket {
    pub run_id: Uuid,
    pub spectator_id: Uuid,
    pub session_addr: Addr<RunSession>,
    anti_spam: AntiSpamState,
}

impl SpectatorSocket {
    pub fn new(run_id: Uuid, session_addr: Addr<RunSession>) -> Self {
        Self {
            run_id,
            spectator_id: Uuid::new_v4(),
            session_addr,
            anti_spam: AntiSpamState::new(),
        }
    }
}

impl WsActorUtils for SpectatorSocket {
    fn anti_spam(&mut self) -> &mut AntiSpamState {
        &mut self.anti_spam
    }

    fn session_id(&self) -> String {
        self.spectator_id.to_string()
    }
}

impl Actor for SpectatorSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.session_addr.do_send(AttachSpectator {
            spectator_id: self.spectator_id,
            recipient: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.session_addr.do_send(DetachSpectator { spectator_id: self.spectator_id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for SpectatorSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(_)) => {
                if self.accept_request(ctx) {
                    self.send_error_and_maybe_ban(
                        ctx,
                        "SPECTATOR_READ_ONLY",
                        "Spectators cannot send commands",
                        Some(serde_json::json!({ "run_id": self.run_id })),
                    );
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(_) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for SpectatorSocket {
    type Result = ();

    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        let ended = matches!(msg, ServerWsMessage::RunEnded { .. });
        let out = outbound(self, msg);
        self.deliver(ctx, out);
        if ended {
            ctx.close(Some(ws::CloseReason {
                code: ws::CloseCode::Normal,
                description: Some("Run ended".into()),
            }));
            ctx.stop();
        }
    }
}

/// Query parameters accepted by `/ws/play`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayQuery {
    pub username: String,
    pub seed: Option<u64>,
}

/// Parse `username` (percent-encoded) and `seed` from a query string. Unknown keys are ignored.
pub fn parse_play_query(query: &str) -> PlayQuery {
    let mut username = String::new();
    let mut seed = None;

    for kv in query.split('&') {
        let mut split = kv.splitn(2, '=');
        match (split.next(), split.next()) {
            (Some("username"), Some(name)) => {
                username = urlencoding::decode(name)
                    .unwrap_or(Cow::Borrowed(""))
                    .trim()
                    .to_string();
            }
            (Some("seed"), Some(raw)) => {
                seed = raw.parse::<u64>().ok();
                if seed.is_none() {
                    warn!("[RunSocket] Ignoring invalid seed '{}'", raw);
                }
            }
            _ => {}
        }
    }

    if username.is_empty() {
        username = DEFAULT_USERNAME.to_string();
    }
    PlayQuery { username, seed }
}

/// WebSocket endpoint that starts a new run for the connecting player.
///
/// Query parameters: `username` (optional), `seed` (optional, for reproducible runs).
pub async fn ws_play(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    // Validate the upgrade before creating a run so a bad handshake leaves nothing behind.
    let mut response = ws::handshake(&req)?;
    let query = parse_play_query(req.query_string());

    let (run_id, session_addr) = data.run_manager
        .send(CreateRun { username: query.username.clone(), seed: query.seed })
        .await
        .map_err(error::ErrorInternalServerError)?;

    info!("[RunSocket] {} connected to run {}", query.username, run_id);
    Ok(response.streaming(ws::WebsocketContext::create(
        PlayerSocket::new(run_id, session_addr),
        stream,
    )))
}

/// WebSocket endpoint for spectating an existing run.
pub async fn ws_watch(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let run_id = req.match_info().get("run_id").unwrap_or_default();
    let run_id = Uuid::parse_str(run_id).map_err(error::ErrorBadRequest)?;

    let session_addr = data.run_manager
        .send(GetRun { run_id })
        .await
        .map_err(error::ErrorInternalServerError)?
        .map_err(error::ErrorBadRequest)?;

    ws::start(SpectatorSocket::new(run_id, session_addr), &req, stream)
}
