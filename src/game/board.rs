//! Level generation.
//!
//! A level is a fixed grid ringed by outer walls. Inner walls, pickups and enemies are
//! scattered on cells drawn from a shrinking list, so no two objects ever share a cell.

use log::{debug, warn};
use rand::Rng;
use serde::Serialize;

use crate::config::board::{
    COLUMNS, FLOOR_VARIANTS, FOOD_COUNT, OUTER_WALL_VARIANTS, ROWS, WALL_COUNT, WALL_VARIANTS,
};
use crate::config::game::WALL_HP;
use crate::game::types::{Count, Enemy, EnemyKind, Pickup, PickupKind, Position, Tile, Wall};

/// Where the player enters every level.
pub const PLAYER_START: Position = Position::new(0, 0);

/// Dimensions and object counts of a generated level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardConfig {
    pub columns: i32,
    pub rows: i32,
    pub wall_count: Count,
    pub food_count: Count,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: COLUMNS,
            rows: ROWS,
            wall_count: WALL_COUNT,
            food_count: FOOD_COUNT,
        }
    }
}

/// One generated level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub columns: i32,
    pub rows: i32,
    /// Row-major, bottom row first, including the outer wall ring.
    pub tiles: Vec<Vec<Tile>>,
    pub walls: Vec<Wall>,
    pub pickups: Vec<Pickup>,
    pub enemies: Vec<Enemy>,
    pub exit: Position,
}

impl Board {
    /// True for cells of the playable area (outer ring excluded).
    pub fn is_inside(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.columns && pos.y >= 0 && pos.y < self.rows
    }

    /// Static tile at `pos`, outer ring included.
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        let row = usize::try_from(pos.y + 1).ok()?;
        let col = usize::try_from(pos.x + 1).ok()?;
        self.tiles.get(row)?.get(col).copied()
    }

    pub fn wall_at(&self, pos: Position) -> Option<usize> {
        self.walls.iter().position(|w| w.pos == pos)
    }

    pub fn enemy_at(&self, pos: Position) -> Option<usize> {
        self.enemies.iter().position(|e| e.pos == pos)
    }

    pub fn pickup_at(&self, pos: Position) -> Option<usize> {
        self.pickups.iter().position(|p| p.pos == pos)
    }
}

/// The list of grid cells still free for random placement.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    grid_positions: Vec<Position>,
}

impl BoardLayout {
    /// Every cell one step in from the playable edge. The edge itself stays clear so the
    /// start and exit corners are always reachable.
    pub fn new(columns: i32, rows: i32) -> Self {
        let mut grid_positions = Vec::new();
        for x in 1..columns - 1 {
            for y in 1..rows - 1 {
                grid_positions.push(Position::new(x, y));
            }
        }
        Self { grid_positions }
    }

    pub fn remaining(&self) -> usize {
        self.grid_positions.len()
    }

    /// Remove and return a random free cell.
    pub fn random_position<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        if self.grid_positions.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.grid_positions.len());
        Some(self.grid_positions.swap_remove(index))
    }

    /// Draw `count.sample()` cells and build an object on each. Stops early when the list runs out.
    pub fn layout_at_random<R, T>(
        &mut self,
        rng: &mut R,
        count: Count,
        mut make: impl FnMut(Position, &mut R) -> T,
    ) -> Vec<T>
    where
        R: Rng + ?Sized,
    {
        let wanted = count.sample(rng) as usize;
        self.layout_exactly(rng, wanted, &mut make)
    }

    fn layout_exactly<R, T>(
        &mut self,
        rng: &mut R,
        wanted: usize,
        make: &mut impl FnMut(Position, &mut R) -> T,
    ) -> Vec<T>
    where
        R: Rng + ?Sized,
    {
        let mut placed = Vec::with_capacity(wanted);
        for _ in 0..wanted {
            match self.random_position(rng) {
                Some(pos) => placed.push(make(pos, rng)),
                None => {
                    warn!("[Board] No free cell left, placed {} of {}", placed.len(), wanted);
                    break;
                }
            }
        }
        placed
    }
}

/// Floor for the playable area and outer walls on the surrounding ring.
pub fn board_setup<R: Rng + ?Sized>(columns: i32, rows: i32, rng: &mut R) -> Vec<Vec<Tile>> {
    (-1..=rows)
        .map(|y| {
            (-1..=columns)
                .map(|x| {
                    if x == -1 || x == columns || y == -1 || y == rows {
                        Tile::OuterWall(rng.random_range(0..OUTER_WALL_VARIANTS))
                    } else {
                        Tile::Floor(rng.random_range(0..FLOOR_VARIANTS))
                    }
                })
                .collect()
        })
        .collect()
}

/// Enemies grow logarithmically with the day number: none on day 1, one from day 2, two from day 4.
pub fn enemy_count(level: u32) -> usize {
    if level == 0 {
        0
    } else {
        level.ilog2() as usize
    }
}

/// Generate the full layout for `level`.
pub fn setup_scene<R: Rng + ?Sized>(config: &BoardConfig, level: u32, rng: &mut R) -> Board {
    let tiles = board_setup(config.columns, config.rows, rng);
    let mut layout = BoardLayout::new(config.columns, config.rows);

    let walls = layout.layout_at_random(rng, config.wall_count, |pos, rng| Wall {
        pos,
        hp: WALL_HP,
        variant: rng.random_range(0..WALL_VARIANTS),
        damaged: false,
    });

    let pickups = layout.layout_at_random(rng, config.food_count, |pos, rng| Pickup {
        pos,
        kind: if rng.random_bool(0.5) { PickupKind::Food } else { PickupKind::Soda },
    });

    let mut next_id = 0;
    let enemies = layout.layout_exactly(rng, enemy_count(level), &mut |pos, rng: &mut R| {
        let kind = if rng.random_bool(0.5) { EnemyKind::Weak } else { EnemyKind::Strong };
        let enemy = Enemy::new(next_id, pos, kind);
        next_id += 1;
        enemy
    });

    debug!(
        "[Board] Level {} laid out: walls={} pickups={} enemies={}",
        level,
        walls.len(),
        pickups.len(),
        enemies.len()
    );

    Board {
        columns: config.columns,
        rows: config.rows,
        tiles,
        walls,
        pickups,
        enemies,
        exit: Position::new(config.columns - 1, config.rows - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_layout_covers_inner_cells_only() {
        let layout = BoardLayout::new(8, 8);
        assert_eq!(layout.remaining(), 36);
        assert!(layout.grid_positions.iter().all(|p| (1..7).contains(&p.x) && (1..7).contains(&p.y)));
    }

    #[test]
    fn test_random_position_never_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut layout = BoardLayout::new(6, 6);
        let mut seen = HashSet::new();
        while let Some(pos) = layout.random_position(&mut rng) {
            assert!(seen.insert(pos), "cell {:?} handed out twice", pos);
        }
        assert_eq!(seen.len(), 16);
        assert_eq!(layout.random_position(&mut rng), None);
    }

    #[test]
    fn test_board_setup_rings_floor_with_outer_walls() {
        let mut rng = StdRng::seed_from_u64(1);
        let tiles = board_setup(8, 8, &mut rng);
        assert_eq!(tiles.len(), 10);
        assert!(tiles.iter().all(|row| row.len() == 10));

        for (row_index, row) in tiles.iter().enumerate() {
            for (col_index, tile) in row.iter().enumerate() {
                let on_ring = row_index == 0 || row_index == 9 || col_index == 0 || col_index == 9;
                match tile {
                    Tile::OuterWall(v) => {
                        assert!(on_ring);
                        assert!(*v < OUTER_WALL_VARIANTS);
                    }
                    Tile::Floor(v) => {
                        assert!(!on_ring);
                        assert!(*v < FLOOR_VARIANTS);
                    }
                }
            }
        }
    }

    #[test]
    fn test_enemy_count_is_log2_of_level() {
        assert_eq!(enemy_count(0), 0);
        assert_eq!(enemy_count(1), 0);
        assert_eq!(enemy_count(2), 1);
        assert_eq!(enemy_count(3), 1);
        assert_eq!(enemy_count(4), 2);
        assert_eq!(enemy_count(8), 3);
        assert_eq!(enemy_count(15), 3);
    }

    #[test]
    fn test_setup_scene_places_objects_on_distinct_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = setup_scene(&BoardConfig::default(), 8, &mut rng);

        assert!((5..=9).contains(&board.walls.len()));
        assert!((1..=5).contains(&board.pickups.len()));
        assert_eq!(board.enemies.len(), 3);
        assert_eq!(board.exit, Position::new(7, 7));

        let mut cells = HashSet::new();
        let occupied = board.walls.iter().map(|w| w.pos)
            .chain(board.pickups.iter().map(|p| p.pos))
            .chain(board.enemies.iter().map(|e| e.pos));
        for pos in occupied {
            assert!(cells.insert(pos));
            assert_ne!(pos, PLAYER_START);
            assert_ne!(pos, board.exit);
        }
        assert!(board.walls.iter().all(|w| w.hp == WALL_HP && !w.damaged));
        assert!(board.enemies.iter().enumerate().all(|(i, e)| e.id == i));
    }

    #[test]
    fn test_setup_scene_on_tiny_board_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = BoardConfig {
            columns: 3,
            rows: 3,
            wall_count: Count::new(5, 5),
            food_count: Count::new(2, 2),
        };
        let board = setup_scene(&config, 16, &mut rng);
        // Only (1, 1) is free for random placement.
        assert_eq!(board.walls.len(), 1);
        assert!(board.pickups.is_empty());
        assert!(board.enemies.is_empty());
    }

    #[test]
    fn test_tile_lookup_includes_outer_ring() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = setup_scene(&BoardConfig::default(), 1, &mut rng);
        assert!(matches!(board.tile_at(Position::new(-1, -1)), Some(Tile::OuterWall(_))));
        assert!(matches!(board.tile_at(Position::new(8, 3)), Some(Tile::OuterWall(_))));
        assert!(matches!(board.tile_at(Position::new(3, 8)), Some(Tile::OuterWall(_))));
        assert!(matches!(board.tile_at(Position::new(0, 0)), Some(Tile::Floor(_))));
        assert_eq!(board.tile_at(Position::new(-2, 0)), None);
        assert!(board.is_inside(Position::new(7, 7)));
        assert!(!board.is_inside(Position::new(8, 7)));
    }
}
