use serde::{Serialize, Deserialize};
use rand::Rng;

use crate::config::game::{ENEMY_STRONG_DAMAGE, ENEMY_WEAK_DAMAGE, POINTS_PER_FOOD, POINTS_PER_SODA};

/// Board coordinates. `(0, 0)` is the bottom-left playable tile and `y` grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Inverse of [`Direction::delta`]. Diagonal or zero deltas have no direction.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Static board tile. The payload picks one of the sprite alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor(u8),
    OuterWall(u8),
}

/// Inner wall the player can chop down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Position,
    pub hp: i32,
    pub variant: u8,
    pub damaged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Food,
    Soda,
}

impl PickupKind {
    pub fn points(self) -> i32 {
        match self {
            PickupKind::Food => POINTS_PER_FOOD,
            PickupKind::Soda => POINTS_PER_SODA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Position,
    pub kind: PickupKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Weak,
    Strong,
}

impl EnemyKind {
    pub fn damage(self) -> i32 {
        match self {
            EnemyKind::Weak => ENEMY_WEAK_DAMAGE,
            EnemyKind::Strong => ENEMY_STRONG_DAMAGE,
        }
    }
}

/// Enemies are never removed during a level, so `id` is also the index in the board's enemy list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: usize,
    pub pos: Position,
    pub kind: EnemyKind,
    pub skip_move: bool,
}

impl Enemy {
    pub fn new(id: usize, pos: Position, kind: EnemyKind) -> Self {
        Self {
            id,
            pos,
            kind,
            skip_move: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub food: i32,
}

impl Player {
    pub fn new(pos: Position, food: i32) -> Self {
        Self { pos, food }
    }
}

/// Inclusive `minimum..=maximum` range used to size random layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub minimum: u32,
    pub maximum: u32,
}

impl Count {
    pub const fn new(minimum: u32, maximum: u32) -> Self {
        Self { minimum, maximum }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.maximum <= self.minimum {
            return self.minimum;
        }
        rng.random_range(self.minimum..=self.maximum)
    }
}
