//! Scavenger: a turn-based tile roguelike.
//!
//! The `game` module holds the rules (board generation, movement, enemy AI and the turn
//! cycle) with no I/O. The `server` module runs one authoritative game per WebSocket
//! player, and `game::game_loop` drives the same rules from a terminal.

pub mod config;
pub mod game;
pub mod server;
