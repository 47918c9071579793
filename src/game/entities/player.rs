//! Player turn logic.

use crate::config::game::{FOOD_PER_MOVE, WALL_DAMAGE};
use crate::game::board::Board;
use crate::game::events::GameEvent;
use crate::game::systems::movement::{attempt_move, Blocker, MoveOutcome, Mover};
use crate::game::systems::rules::apply_player_rules;
use crate::game::types::{Direction, Player};

/// Spend food, try the move, then resolve what the move led to.
/// A blocked move still costs food.
pub fn player_move(board: &mut Board, player: &mut Player, direction: Direction) -> Vec<GameEvent> {
    lose_food(player, FOOD_PER_MOVE);

    let mut events = Vec::new();
    match attempt_move(board, player, Mover::Player, player.pos, direction) {
        MoveOutcome::Moved { from, to } => {
            player.pos = to;
            events.push(GameEvent::PlayerMoved { from, to });
        }
        MoveOutcome::Blocked { by: Blocker::Wall(index), .. } => {
            events.extend(chop_wall(board, index));
        }
        MoveOutcome::Blocked { at, by } => {
            events.push(GameEvent::PlayerBlocked { at, by });
        }
    }

    events.extend(apply_player_rules(board, player));
    events
}

/// Damage the wall at `index`, removing it once its hit points run out.
pub fn chop_wall(board: &mut Board, index: usize) -> Option<GameEvent> {
    let wall = board.walls.get_mut(index)?;
    wall.hp -= WALL_DAMAGE;
    wall.damaged = true;

    if wall.hp <= 0 {
        let wall = board.walls.remove(index);
        Some(GameEvent::WallDestroyed { at: wall.pos })
    } else {
        Some(GameEvent::WallChopped { at: wall.pos, hp_left: wall.hp })
    }
}

/// Food never drops below zero.
pub fn lose_food(player: &mut Player, amount: i32) {
    player.food = (player.food - amount).max(0);
}

pub fn is_starving(player: &Player) -> bool {
    player.food <= 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::WALL_HP;
    use crate::game::types::{Pickup, PickupKind, Position, Wall};

    fn board_with_wall() -> Board {
        Board {
            columns: 5,
            rows: 5,
            tiles: Vec::new(),
            walls: vec![Wall { pos: Position::new(1, 0), hp: WALL_HP, variant: 2, damaged: false }],
            pickups: Vec::new(),
            enemies: Vec::new(),
            exit: Position::new(4, 4),
        }
    }

    #[test]
    fn test_move_costs_food() {
        let mut board = board_with_wall();
        let mut player = Player::new(Position::new(0, 0), 50);
        let events = player_move(&mut board, &mut player, Direction::Up);
        assert_eq!(player.pos, Position::new(0, 1));
        assert_eq!(player.food, 49);
        assert_eq!(events, vec![GameEvent::PlayerMoved { from: Position::new(0, 0), to: Position::new(0, 1) }]);
    }

    #[test]
    fn test_blocked_move_still_costs_food() {
        let mut board = board_with_wall();
        let mut player = Player::new(Position::new(0, 0), 50);
        let events = player_move(&mut board, &mut player, Direction::Left);
        assert_eq!(player.pos, Position::new(0, 0));
        assert_eq!(player.food, 49);
        assert!(matches!(events[0], GameEvent::PlayerBlocked { by: Blocker::OuterWall, .. }));
    }

    #[test]
    fn test_chopping_destroys_wall_after_three_hits() {
        let mut board = board_with_wall();
        let mut player = Player::new(Position::new(0, 0), 50);

        let first = player_move(&mut board, &mut player, Direction::Right);
        assert_eq!(first, vec![GameEvent::WallChopped { at: Position::new(1, 0), hp_left: 2 }]);
        assert!(board.walls[0].damaged);

        player_move(&mut board, &mut player, Direction::Right);
        let last = player_move(&mut board, &mut player, Direction::Right);
        assert_eq!(last, vec![GameEvent::WallDestroyed { at: Position::new(1, 0) }]);
        assert!(board.walls.is_empty());
        assert_eq!(player.pos, Position::new(0, 0));
        assert_eq!(player.food, 47);

        player_move(&mut board, &mut player, Direction::Right);
        assert_eq!(player.pos, Position::new(1, 0));
    }

    #[test]
    fn test_pickup_restores_food() {
        let mut board = board_with_wall();
        board.pickups.push(Pickup { pos: Position::new(0, 1), kind: PickupKind::Soda });
        let mut player = Player::new(Position::new(0, 0), 50);

        let events = player_move(&mut board, &mut player, Direction::Up);
        assert_eq!(player.food, 69);
        assert!(board.pickups.is_empty());
        assert!(events.contains(&GameEvent::PickedUp { kind: PickupKind::Soda, points: 20, food: 69 }));
    }

    #[test]
    fn test_lose_food_saturates() {
        let mut player = Player::new(Position::new(0, 0), 5);
        lose_food(&mut player, 20);
        assert_eq!(player.food, 0);
        assert!(is_starving(&player));
    }
}
