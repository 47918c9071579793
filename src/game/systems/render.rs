use crate::game::state::GameState;
use crate::game::types::{EnemyKind, PickupKind, Position, Tile};

/// ASCII view of the board, top row first, outer ring included.
pub fn render_board(state: &GameState) -> String {
    let board = &state.board;
    let mut out = String::new();

    for y in (-1..=board.rows).rev() {
        for x in -1..=board.columns {
            out.push(symbol_at(state, Position::new(x, y)));
        }
        out.push('\n');
    }
    out
}

// Priority: player, enemies, walls, pickups, exit, then the static tile.
fn symbol_at(state: &GameState, pos: Position) -> char {
    let board = &state.board;
    if state.player.pos == pos {
        return '@';
    }
    if let Some(enemy) = board.enemies.iter().find(|e| e.pos == pos) {
        return match enemy.kind {
            EnemyKind::Weak => 'e',
            EnemyKind::Strong => 'Z',
        };
    }
    if let Some(wall) = board.walls.iter().find(|w| w.pos == pos) {
        return if wall.damaged { 'W' } else { 'w' };
    }
    if let Some(pickup) = board.pickups.iter().find(|p| p.pos == pos) {
        return match pickup.kind {
            PickupKind::Food => 'f',
            PickupKind::Soda => 's',
        };
    }
    if board.exit == pos {
        return 'E';
    }
    match board.tile_at(pos) {
        Some(Tile::OuterWall(_)) => '#',
        Some(Tile::Floor(_)) => '.',
        None => ' ',
    }
}

pub fn render_status(state: &GameState) -> String {
    format!(
        "--- {} ---\nDay: {}  Food: {}  Enemies: {}\n",
        state.level_text(),
        state.level,
        state.player.food,
        state.board.enemies.len()
    )
}
