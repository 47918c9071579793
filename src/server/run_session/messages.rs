use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use uuid::Uuid;

use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::game::types::Direction;

/// Commands a player sends over the socket, e.g. `{"action":"Move","data":"Up"}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "action", content = "data")]
pub enum ClientAction {
    Move(Direction),
    Restart,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessClientAction {
    pub action: ClientAction,
    pub player_id: Uuid,
}

/// Full view of a run after a state change.
#[derive(Serialize, Clone, Debug)]
pub struct RunSnapshot {
    pub run_id: Uuid,
    pub username: String,
    pub level_text: String,
    pub state: GameState,
    /// What happened since the previous snapshot.
    pub events: Vec<GameEvent>,
    /// Set when this update is the run's answer to a command it accepted from the player.
    pub accepted_action: bool,
}

// Server -> client
#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    RunUpdate(RunSnapshot),
    Error {
        code: String,
        message: String,
        context: Option<Value>,
    },
    RunEnded {
        run_id: Uuid,
    },
}

impl ServerWsMessage {
    pub fn error(code: &str, message: &str, context: Option<Value>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
            context,
        }
    }

    pub fn is_accepted_action(&self) -> bool {
        matches!(self, Self::RunUpdate(snapshot) if snapshot.accepted_action)
    }
}
