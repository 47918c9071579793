use crate::game::board::Board;
use crate::game::events::GameEvent;
use crate::game::types::Player;

/// Resolve whatever the player is standing on after a move: pickups are consumed,
/// the exit ends the level.
pub fn apply_player_rules(board: &mut Board, player: &mut Player) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(index) = board.pickup_at(player.pos) {
        let pickup = board.pickups.remove(index);
        let points = pickup.kind.points();
        player.food += points;
        events.push(GameEvent::PickedUp { kind: pickup.kind, points, food: player.food });
    }

    if player.pos == board.exit {
        events.push(GameEvent::ExitReached { at: board.exit });
    }

    events
}

/// True when the events contain the exit being reached.
pub fn reached_exit(events: &[GameEvent]) -> bool {
    events.iter().any(|e| matches!(e, GameEvent::ExitReached { .. }))
}
