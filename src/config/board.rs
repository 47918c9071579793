/// Board generation constants.
///
/// This module defines the size of a level and how many objects are scattered on it.
use crate::game::types::Count;

/// Number of playable columns (x axis).
pub const COLUMNS: i32 = 8;

/// Number of playable rows (y axis).
pub const ROWS: i32 = 8;

/// Inclusive range of inner walls placed on every level.
pub const WALL_COUNT: Count = Count::new(5, 9);

/// Inclusive range of food and soda pickups placed on every level.
pub const FOOD_COUNT: Count = Count::new(1, 5);

/// Number of sprite alternatives for floor tiles.
pub const FLOOR_VARIANTS: u8 = 8;

/// Number of sprite alternatives for outer wall tiles.
pub const OUTER_WALL_VARIANTS: u8 = 3;

/// Number of sprite alternatives for inner walls.
pub const WALL_VARIANTS: u8 = 8;
