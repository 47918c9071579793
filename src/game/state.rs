use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::game::{PLAYER_START_FOOD, TURN_DELAY_MS};
use crate::game::board::{setup_scene, Board, BoardConfig, PLAYER_START};
use crate::game::entities::{is_starving, move_enemy, player_move};
use crate::game::error::ActionError;
use crate::game::events::GameEvent;
use crate::game::systems::reached_exit;
use crate::game::types::{Direction, Player};

/// Where the run is in its turn cycle. The phase alone decides whose input is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "data")]
pub enum Phase {
    /// "Day N" banner; nobody moves.
    LevelIntro,
    PlayerTurn,
    /// Enemies move one at a time; `next` is the id of the next one to act.
    EnemyTurn { next: usize },
    LevelComplete,
    GameOver,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub seed: u64,
    pub level: u32,
    pub phase: Phase,
    pub board: Board,
    pub player: Player,
    #[serde(skip)]
    config: BoardConfig,
    #[serde(skip)]
    rng: StdRng,
}

impl GameState {
    /// New run on day 1, waiting for the intro banner to finish.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, BoardConfig::default())
    }

    pub fn with_config(seed: u64, config: BoardConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = setup_scene(&config, 1, &mut rng);
        info!("[GameState] New run seed={} board={}x{}", seed, config.columns, config.rows);
        Self {
            seed,
            level: 1,
            phase: Phase::LevelIntro,
            board,
            player: Player::new(PLAYER_START, PLAYER_START_FOOD),
            config,
            rng,
        }
    }

    /// Lay out `level` and put the player back at the start. Food carries over.
    pub fn start_level(&mut self, level: u32) -> GameEvent {
        self.level = level;
        self.board = setup_scene(&self.config, level, &mut self.rng);
        self.player.pos = PLAYER_START;
        self.phase = Phase::LevelIntro;
        info!("[GameState] Day {} started with {} enemies, food={}", level, self.board.enemies.len(), self.player.food);
        GameEvent::LevelStarted { level }
    }

    /// End the day banner. Returns false if the run was not in its intro.
    pub fn finish_intro(&mut self) -> bool {
        if self.phase != Phase::LevelIntro {
            return false;
        }
        self.phase = Phase::PlayerTurn;
        true
    }

    pub fn apply_player_action(&mut self, direction: Direction) -> Result<Vec<GameEvent>, ActionError> {
        match self.phase {
            Phase::PlayerTurn => {}
            Phase::GameOver => return Err(ActionError::GameOver),
            _ => return Err(ActionError::NotPlayersTurn),
        }

        let mut events = player_move(&mut self.board, &mut self.player, direction);
        debug!("[GameState] Day {} player {:?} -> {:?}", self.level, direction, self.player.pos);

        if is_starving(&self.player) {
            events.push(self.game_over());
        } else if reached_exit(&events) {
            self.phase = Phase::LevelComplete;
            events.push(GameEvent::LevelCompleted { level: self.level });
        } else {
            self.phase = Phase::EnemyTurn { next: 0 };
        }
        Ok(events)
    }

    /// Move the next enemy in list order. Returns `None` outside the enemy turn.
    ///
    /// Once every enemy has acted, the call hands the turn back to the player and returns
    /// no events.
    pub fn move_next_enemy(&mut self) -> Option<Vec<GameEvent>> {
        let Phase::EnemyTurn { next } = self.phase else {
            return None;
        };

        if next >= self.board.enemies.len() {
            self.phase = Phase::PlayerTurn;
            return Some(Vec::new());
        }

        let mut events: Vec<GameEvent> = move_enemy(&mut self.board, &mut self.player, next)
            .into_iter()
            .collect();

        if is_starving(&self.player) {
            events.push(self.game_over());
        } else {
            self.phase = Phase::EnemyTurn { next: next + 1 };
        }
        Some(events)
    }

    /// Run the whole enemy turn at once.
    pub fn move_enemies(&mut self) -> Vec<GameEvent> {
        if !matches!(self.phase, Phase::EnemyTurn { .. }) {
            warn!("[GameState] move_enemies called during {:?}", self.phase);
            return Vec::new();
        }
        let mut events = Vec::new();
        while let Some(step) = self.move_next_enemy() {
            events.extend(step);
        }
        events
    }

    /// Pause before the enemies act. An empty board waits twice as long so the turn
    /// still reads as a turn.
    pub fn enemy_turn_lead_in(&self) -> Duration {
        let delay = Duration::from_millis(TURN_DELAY_MS);
        if self.board.enemies.is_empty() { delay * 2 } else { delay }
    }

    pub fn next_level(&mut self) -> Result<GameEvent, ActionError> {
        if self.phase != Phase::LevelComplete {
            return Err(ActionError::LevelInProgress);
        }
        Ok(self.start_level(self.level + 1))
    }

    /// Start a fresh run on a new seed drawn from the current one.
    pub fn restart(&mut self) -> Result<GameEvent, ActionError> {
        if self.phase != Phase::GameOver {
            return Err(ActionError::LevelInProgress);
        }
        self.seed = self.rng.random();
        self.rng = StdRng::seed_from_u64(self.seed);
        self.player = Player::new(PLAYER_START, PLAYER_START_FOOD);
        info!("[GameState] Restart with seed={}", self.seed);
        Ok(self.start_level(1))
    }

    /// Text for the status label.
    pub fn level_text(&self) -> String {
        match self.phase {
            Phase::LevelIntro => format!("Day {}", self.level),
            Phase::GameOver => format!("After {} days, you starved.", self.level),
            _ => format!("Food: {}", self.player.food),
        }
    }

    fn game_over(&mut self) -> GameEvent {
        self.phase = Phase::GameOver;
        info!("[GameState] Starved on day {}", self.level);
        GameEvent::Starved { days: self.level }
    }
}
