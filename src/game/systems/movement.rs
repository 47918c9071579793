//! Move/collide primitive shared by the player and the enemies.
//!
//! A move is one tile long. Before moving, the target cell is cast against the blocking
//! layer (outer walls, inner walls, enemies and the player). Pickups and the exit never block.

use serde::Serialize;

use crate::game::board::Board;
use crate::game::types::{Direction, Player, Position};

/// Who is trying to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mover {
    Player,
    Enemy(usize),
}

/// What stopped a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blocker {
    OuterWall,
    /// Index into the board's wall list.
    Wall(usize),
    /// Enemy id.
    Enemy(usize),
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    Moved { from: Position, to: Position },
    Blocked { at: Position, by: Blocker },
}

/// Check the blocking layer between `from` and `to`, ignoring the mover's own body.
pub fn linecast(board: &Board, player: &Player, mover: Mover, to: Position) -> Option<Blocker> {
    if !board.is_inside(to) {
        return Some(Blocker::OuterWall);
    }
    if let Some(index) = board.wall_at(to) {
        return Some(Blocker::Wall(index));
    }
    if let Some(enemy) = board.enemies.iter().find(|e| e.pos == to) {
        if mover != Mover::Enemy(enemy.id) {
            return Some(Blocker::Enemy(enemy.id));
        }
    }
    if player.pos == to && mover != Mover::Player {
        return Some(Blocker::Player);
    }
    None
}

/// Resolve a one-tile move from `from`. Does not mutate anything: the caller commits the
/// new position on `Moved` and reacts to the blocker on `Blocked`.
pub fn attempt_move(
    board: &Board,
    player: &Player,
    mover: Mover,
    from: Position,
    direction: Direction,
) -> MoveOutcome {
    let to = from.offset(direction);
    match linecast(board, player, mover, to) {
        None => MoveOutcome::Moved { from, to },
        Some(by) => MoveOutcome::Blocked { at: to, by },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Enemy, EnemyKind, Wall};

    fn open_board() -> Board {
        Board {
            columns: 5,
            rows: 5,
            tiles: Vec::new(),
            walls: Vec::new(),
            pickups: Vec::new(),
            enemies: Vec::new(),
            exit: Position::new(4, 4),
        }
    }

    #[test]
    fn test_free_move() {
        let board = open_board();
        let player = Player::new(Position::new(2, 2), 10);
        let outcome = attempt_move(&board, &player, Mover::Player, player.pos, Direction::Up);
        assert_eq!(outcome, MoveOutcome::Moved { from: Position::new(2, 2), to: Position::new(2, 3) });
    }

    #[test]
    fn test_edge_blocks_as_outer_wall() {
        let board = open_board();
        let player = Player::new(Position::new(0, 0), 10);
        for direction in [Direction::Left, Direction::Down] {
            let outcome = attempt_move(&board, &player, Mover::Player, player.pos, direction);
            assert!(matches!(outcome, MoveOutcome::Blocked { by: Blocker::OuterWall, .. }));
        }
    }

    #[test]
    fn test_walls_enemies_and_player_block() {
        let mut board = open_board();
        board.walls.push(Wall { pos: Position::new(3, 2), hp: 3, variant: 0, damaged: false });
        board.enemies.push(Enemy::new(0, Position::new(2, 3), EnemyKind::Weak));
        let player = Player::new(Position::new(2, 2), 10);

        assert_eq!(
            linecast(&board, &player, Mover::Player, Position::new(3, 2)),
            Some(Blocker::Wall(0))
        );
        assert_eq!(
            linecast(&board, &player, Mover::Player, Position::new(2, 3)),
            Some(Blocker::Enemy(0))
        );
        let outcome = attempt_move(&board, &player, Mover::Enemy(0), Position::new(2, 3), Direction::Down);
        assert_eq!(outcome, MoveOutcome::Blocked { at: Position::new(2, 2), by: Blocker::Player });
    }

    #[test]
    fn test_mover_ignores_own_body() {
        let mut board = open_board();
        board.enemies.push(Enemy::new(0, Position::new(1, 1), EnemyKind::Strong));
        let player = Player::new(Position::new(4, 0), 10);
        assert_eq!(linecast(&board, &player, Mover::Enemy(0), Position::new(1, 1)), None);
        assert_eq!(linecast(&board, &player, Mover::Player, Position::new(4, 0)), None);
    }
}
