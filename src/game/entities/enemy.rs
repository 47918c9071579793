//! Enemy AI: step toward the player, attack when the player blocks the way,
//! and rest every other turn.

use log::debug;

use crate::game::board::Board;
use crate::game::entities::player::lose_food;
use crate::game::events::GameEvent;
use crate::game::systems::movement::{attempt_move, Blocker, MoveOutcome, Mover};
use crate::game::types::{Direction, Player, Position};

/// Close the horizontal gap first; move vertically only once in the target's column.
pub fn choose_direction(from: Position, target: Position) -> Direction {
    if from.x == target.x {
        if target.y > from.y { Direction::Up } else { Direction::Down }
    } else if target.x > from.x {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Run one enemy's move. Returns `None` for an unknown id.
pub fn move_enemy(board: &mut Board, player: &mut Player, id: usize) -> Option<GameEvent> {
    let enemy = board.enemies.get_mut(id)?;
    if enemy.skip_move {
        enemy.skip_move = false;
        return Some(GameEvent::EnemySkipped { id });
    }

    let (from, kind) = (enemy.pos, enemy.kind);
    let direction = choose_direction(from, player.pos);

    let event = match attempt_move(board, player, Mover::Enemy(id), from, direction) {
        MoveOutcome::Moved { from, to } => {
            board.enemies[id].pos = to;
            GameEvent::EnemyMoved { id, from, to }
        }
        MoveOutcome::Blocked { by: Blocker::Player, .. } => {
            let damage = kind.damage();
            lose_food(player, damage);
            debug!("[Enemy] {} hits the player for {}, food left {}", id, damage, player.food);
            GameEvent::EnemyAttacked { id, damage, food: player.food }
        }
        MoveOutcome::Blocked { at, by } => GameEvent::EnemyBlocked { id, at, by },
    };

    board.enemies[id].skip_move = true;
    Some(event)
}
