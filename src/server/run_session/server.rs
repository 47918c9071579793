use actix::prelude::*;
use std::collections::HashMap;
use actix::MessageResult;
use uuid::Uuid;
use log::{debug, info, warn};

use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::server::run_session::messages::{
    ClientAction, ProcessClientAction, RunSnapshot, ServerWsMessage,
};
use crate::server::run_session::turn_resolution;

/// One player's run: owns the game state and paces its turns with actor timers.
pub struct RunSession {
    pub run_id: Uuid,
    pub username: String,
    pub game_state: GameState,

    pub(super) player: Option<(Uuid, Recipient<ServerWsMessage>)>,
    pub(super) spectators: HashMap<Uuid, Recipient<ServerWsMessage>>,
    pub(super) turn_timer: Option<SpawnHandle>,
    manager: Addr<RunManager>,
}

impl RunSession {
    pub fn new(run_id: Uuid, username: String, seed: u64, manager: Addr<RunManager>) -> Self {
        Self {
            run_id,
            username,
            game_state: GameState::new(seed),
            player: None,
            spectators: HashMap::new(),
            turn_timer: None,
            manager,
        }
    }

    pub fn snapshot(&self, events: Vec<GameEvent>) -> RunSnapshot {
        RunSnapshot {
            run_id: self.run_id,
            username: self.username.clone(),
            level_text: self.game_state.level_text(),
            state: self.game_state.clone(),
            events,
            accepted_action: false,
        }
    }

    /// Push the current state to the player and every spectator.
    pub fn send_state(&self, events: Vec<GameEvent>) {
        self.broadcast(self.snapshot(events));
    }

    /// Like `send_state`, but marks the update as the answer to the player's accepted command.
    pub fn send_accepted(&self, events: Vec<GameEvent>) {
        let mut snapshot = self.snapshot(events);
        snapshot.accepted_action = true;
        self.broadcast(snapshot);
    }

    fn broadcast(&self, snapshot: RunSnapshot) {
        debug!(
            "[RunSession] Broadcast run_id={} day={} phase={:?} events={} accepted={}",
            self.run_id,
            self.game_state.level,
            self.game_state.phase,
            snapshot.events.len(),
            snapshot.accepted_action
        );
        let msg = ServerWsMessage::RunUpdate(snapshot);
        for recipient in self.player.iter().map(|(_, r)| r).chain(self.spectators.values()) {
            recipient.do_send(msg.clone());
        }
    }

    pub(super) fn send_to_player(&self, msg: ServerWsMessage) {
        if let Some((_, recipient)) = &self.player {
            recipient.do_send(msg);
        }
    }
}

impl Actor for RunSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[RunSession] Run {} started for {}", self.run_id, self.username);
        turn_resolution::start_level_intro(self, ctx, Vec::new());
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        let ended = ServerWsMessage::RunEnded { run_id: self.run_id };
        for recipient in self.spectators.values() {
            recipient.do_send(ended.clone());
        }
        self.manager.do_send(RunEnded { run_id: self.run_id });
        info!(
            "[RunSession] Run {} stopped on day {} with {} food",
            self.run_id, self.game_state.level, self.game_state.player.food
        );
    }
}

/// Tracks every live run by id.
pub struct RunManager {
    runs: HashMap<Uuid, Addr<RunSession>>,
}

impl Default for RunManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RunManager {
    pub fn new() -> Self {
        Self {
            runs: HashMap::new(),
        }
    }
}

impl Actor for RunManager {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "(Uuid, Addr<RunSession>)")]
pub struct CreateRun {
    pub username: String,
    /// Fixed seed for a reproducible run; random when absent.
    pub seed: Option<u64>,
}

impl Handler<CreateRun> for RunManager {
    type Result = MessageResult<CreateRun>;

    fn handle(&mut self, msg: CreateRun, ctx: &mut Context<Self>) -> Self::Result {
        let run_id = Uuid::new_v4();
        let seed = msg.seed.unwrap_or_else(rand::random);
        let session = RunSession::new(run_id, msg.username, seed, ctx.address()).start();
        self.runs.insert(run_id, session.clone());
        info!("[RunManager] Created run {} (seed={}, live runs={})", run_id, seed, self.runs.len());
        MessageResult((run_id, session))
    }
}

#[derive(Message)]
#[rtype(result = "Result<Addr<RunSession>, String>")]
pub struct GetRun {
    pub run_id: Uuid,
}

impl Handler<GetRun> for RunManager {
    type Result = Result<Addr<RunSession>, String>;

    fn handle(&mut self, msg: GetRun, _: &mut Context<Self>) -> Self::Result {
        self.runs.get(&msg.run_id)
            .cloned()
            .ok_or_else(|| "Run not found".to_string())
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct RunEnded {
    pub run_id: Uuid,
}

impl Handler<RunEnded> for RunManager {
    type Result = ();

    fn handle(&mut self, msg: RunEnded, _: &mut Context<Self>) -> Self::Result {
        if self.runs.remove(&msg.run_id).is_some() {
            info!("[RunManager] Run {} removed, live runs={}", msg.run_id, self.runs.len());
        }
    }
}

#[derive(Message)]
#[rtype(result = "usize")]
pub struct CountRuns;

impl Handler<CountRuns> for RunManager {
    type Result = usize;

    fn handle(&mut self, _: CountRuns, _: &mut Context<Self>) -> Self::Result {
        self.runs.len()
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct AttachPlayer {
    pub player_id: Uuid,
    pub recipient: Recipient<ServerWsMessage>,
}

impl Handler<AttachPlayer> for RunSession {
    type Result = ();

    fn handle(&mut self, msg: AttachPlayer, _: &mut Context<Self>) -> Self::Result {
        if self.player.is_some() {
            warn!("[RunSession] Run {} already has a player, replacing it", self.run_id);
        }
        msg.recipient.do_send(ServerWsMessage::RunUpdate(self.snapshot(Vec::new())));
        self.player = Some((msg.player_id, msg.recipient));
    }
}

/// The player's socket closed; the run ends with it.
#[derive(Message)]
#[rtype(result = "()")]
pub struct DetachPlayer {
    pub player_id: Uuid,
}

impl Handler<DetachPlayer> for RunSession {
    type Result = ();

    fn handle(&mut self, msg: DetachPlayer, ctx: &mut Context<Self>) -> Self::Result {
        if self.player.as_ref().is_some_and(|(id, _)| *id == msg.player_id) {
            self.player = None;
            ctx.stop();
        }
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct AttachSpectator {
    pub spectator_id: Uuid,
    pub recipient: Recipient<ServerWsMessage>,
}

impl Handler<AttachSpectator> for RunSession {
    type Result = ();

    fn handle(&mut self, msg: AttachSpectator, _: &mut Context<Self>) -> Self::Result {
        msg.recipient.do_send(ServerWsMessage::RunUpdate(self.snapshot(Vec::new())));
        self.spectators.insert(msg.spectator_id, msg.recipient);
        debug!("[RunSession] Run {} spectators={}", self.run_id, self.spectators.len());
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct DetachSpectator {
    pub spectator_id: Uuid,
}

impl Handler<DetachSpectator> for RunSession {
    type Result = ();

    fn handle(&mut self, msg: DetachSpectator, _: &mut Context<Self>) -> Self::Result {
        self.spectators.remove(&msg.spectator_id);
    }
}

#[derive(Message)]
#[rtype(result = "RunSnapshot")]
pub struct GetSnapshot;

impl Handler<GetSnapshot> for RunSession {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.snapshot(Vec::new()))
    }
}

impl Handler<ProcessClientAction> for RunSession {
    type Result = ();

    fn handle(&mut self, msg: ProcessClientAction, ctx: &mut Context<Self>) -> Self::Result {
        if !self.player.as_ref().is_some_and(|(id, _)| *id == msg.player_id) {
            warn!("[RunSession] Action from unknown player {} on run {}", msg.player_id, self.run_id);
            return;
        }

        match msg.action {
            ClientAction::Move(direction) => turn_resolution::resolve_player_move(self, ctx, direction),
            ClientAction::Restart => turn_resolution::restart_run(self, ctx),
        }
    }
}
