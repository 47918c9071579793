//! Events emitted by the game for clients (animation, sound and the status line).

use serde::Serialize;

use crate::game::systems::movement::Blocker;
use crate::game::types::{PickupKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    LevelStarted { level: u32 },
    PlayerMoved { from: Position, to: Position },
    PlayerBlocked { at: Position, by: Blocker },
    WallChopped { at: Position, hp_left: i32 },
    WallDestroyed { at: Position },
    /// `food` is the total after the pickup.
    PickedUp { kind: PickupKind, points: i32, food: i32 },
    ExitReached { at: Position },
    EnemyMoved { id: usize, from: Position, to: Position },
    EnemyBlocked { id: usize, at: Position, by: Blocker },
    /// `food` is the player's total after the hit.
    EnemyAttacked { id: usize, damage: i32, food: i32 },
    EnemySkipped { id: usize },
    LevelCompleted { level: u32 },
    Starved { days: u32 },
}
