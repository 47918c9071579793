/// Game configuration constants.
///
/// This module defines the gameplay parameters such as food economy, damage values
/// and the delays that pace a turn.
pub const PLAYER_START_FOOD: i32 = 100;

/// Food spent on every player move, blocked or not.
pub const FOOD_PER_MOVE: i32 = 1;

/// Food restored by a food pickup.
pub const POINTS_PER_FOOD: i32 = 10;

/// Food restored by a soda pickup.
pub const POINTS_PER_SODA: i32 = 20;

/// Damage dealt to an inner wall each time the player chops it.
pub const WALL_DAMAGE: i32 = 1;

/// Hit points of a freshly placed inner wall.
pub const WALL_HP: i32 = 3;

/// Food taken by a weak enemy attack.
pub const ENEMY_WEAK_DAMAGE: i32 = 10;

/// Food taken by a strong enemy attack.
pub const ENEMY_STRONG_DAMAGE: i32 = 20;

/// Duration (in milliseconds) the "Day N" banner is shown before input is accepted.
pub const LEVEL_START_DELAY_MS: u64 = 2000;

/// Delay (in milliseconds) between the player's move and the enemy turn.
pub const TURN_DELAY_MS: u64 = 100;

/// Time (in milliseconds) given to each enemy move.
pub const ENEMY_MOVE_TIME_MS: u64 = 100;

/// Delay (in milliseconds) between reaching the exit and loading the next day.
pub const RESTART_LEVEL_DELAY_MS: u64 = 1000;
