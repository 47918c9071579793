/// Turn pacing for a RunSession.
/// Each phase change is a discrete update; the waits between them are actor timers.

use std::time::Duration;
use actix::prelude::*;
use log::{debug, info, warn};
use serde_json::json;

use crate::config::game::{ENEMY_MOVE_TIME_MS, LEVEL_START_DELAY_MS, RESTART_LEVEL_DELAY_MS};
use crate::game::error::ActionError;
use crate::game::events::GameEvent;
use crate::game::state::Phase;
use crate::game::types::Direction;
use crate::server::run_session::messages::ServerWsMessage;
use crate::server::run_session::server::RunSession;

/// Replace the pending timer, if any, with `handle`.
fn arm_timer(this: &mut RunSession, ctx: &mut Context<RunSession>, handle: SpawnHandle) {
    if let Some(previous) = this.turn_timer.replace(handle) {
        ctx.cancel_future(previous);
    }
}

fn reject(this: &RunSession, error: ActionError) {
    warn!("[RunSession] Run {} rejected action: {}", this.run_id, error.code());
    this.send_to_player(ServerWsMessage::error(
        error.code(),
        &error.to_string(),
        Some(json!({ "run_id": this.run_id, "phase": this.game_state.phase })),
    ));
}

/// Show the day banner, then open the player's turn once the delay has elapsed.
pub fn start_level_intro(this: &mut RunSession, ctx: &mut Context<RunSession>, events: Vec<GameEvent>) {
    this.send_state(events);
    schedule_intro_end(this, ctx);
}

fn schedule_intro_end(this: &mut RunSession, ctx: &mut Context<RunSession>) {
    let handle = ctx.run_later(Duration::from_millis(LEVEL_START_DELAY_MS), |act, _ctx| {
        act.turn_timer = None;
        if act.game_state.finish_intro() {
            act.send_state(Vec::new());
        }
    });
    arm_timer(this, ctx, handle);
}

/// Apply the player's move and schedule whatever follows it.
pub fn resolve_player_move(this: &mut RunSession, ctx: &mut Context<RunSession>, direction: Direction) {
    let events = match this.game_state.apply_player_action(direction) {
        Ok(events) => events,
        Err(error) => return reject(this, error),
    };
    this.send_accepted(events);

    match this.game_state.phase {
        Phase::EnemyTurn { .. } => {
            let lead_in = this.game_state.enemy_turn_lead_in();
            let handle = ctx.run_later(lead_in, |act, ctx| step_enemies(act, ctx));
            arm_timer(this, ctx, handle);
        }
        Phase::LevelComplete => {
            let handle = ctx.run_later(Duration::from_millis(RESTART_LEVEL_DELAY_MS), |act, ctx| {
                act.turn_timer = None;
                match act.game_state.next_level() {
                    Ok(event) => start_level_intro(act, ctx, vec![event]),
                    Err(error) => warn!("[RunSession] Run {} could not advance: {}", act.run_id, error),
                }
            });
            arm_timer(this, ctx, handle);
        }
        Phase::GameOver => {
            info!("[RunSession] Run {} over: {}", this.run_id, this.game_state.level_text());
        }
        Phase::LevelIntro | Phase::PlayerTurn => {}
    }
}

/// Move one enemy, broadcast, and come back after the enemy move time until the turn is over.
pub fn step_enemies(this: &mut RunSession, ctx: &mut Context<RunSession>) {
    this.turn_timer = None;
    let Some(events) = this.game_state.move_next_enemy() else {
        return;
    };

    let acted = !events.is_empty();
    if acted || this.game_state.phase == Phase::PlayerTurn {
        this.send_state(events);
    }

    match this.game_state.phase {
        Phase::EnemyTurn { next } => {
            debug!("[RunSession] Run {} enemy turn, next={}", this.run_id, next);
            let delay = if acted { Duration::from_millis(ENEMY_MOVE_TIME_MS) } else { Duration::ZERO };
            let handle = ctx.run_later(delay, |act, ctx| step_enemies(act, ctx));
            arm_timer(this, ctx, handle);
        }
        Phase::GameOver => {
            info!("[RunSession] Run {} over: {}", this.run_id, this.game_state.level_text());
        }
        _ => {}
    }
}

pub fn restart_run(this: &mut RunSession, ctx: &mut Context<RunSession>) {
    match this.game_state.restart() {
        Ok(event) => {
            this.send_accepted(vec![event]);
            schedule_intro_end(this, ctx);
        }
        Err(error) => reject(this, error),
    }
}
