//! Terminal game loop for local play.
//!
//! Reads one command per line from stdin and paces the day banner and the enemy turn
//! with the same delays the server uses.

use std::io::{self, Write};
use std::time::Duration;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::sleep;

use crate::config::game::{ENEMY_MOVE_TIME_MS, LEVEL_START_DELAY_MS, RESTART_LEVEL_DELAY_MS};
use crate::game::state::{GameState, Phase};
use crate::game::systems::{render_board, render_status};
use crate::game::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

/// `w`/`a`/`s`/`d` (or arrow escape sequences) move, `r` restarts, `q` quits.
pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "w" | "\x1b[a" => Some(Command::Move(Direction::Up)),
        "s" | "\x1b[b" => Some(Command::Move(Direction::Down)),
        "d" | "\x1b[c" => Some(Command::Move(Direction::Right)),
        "a" | "\x1b[d" => Some(Command::Move(Direction::Left)),
        "r" => Some(Command::Restart),
        "q" => Some(Command::Quit),
        _ => None,
    }
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{}", text);
    io::stdout().flush()
}

pub async fn run_game_loop(seed: u64) -> io::Result<()> {
    let mut game_state = GameState::new(seed);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Game start! (seed {})", seed);

    loop {
        match game_state.phase {
            Phase::LevelIntro => {
                println!("\n{}\n", game_state.level_text());
                sleep(Duration::from_millis(LEVEL_START_DELAY_MS)).await;
                game_state.finish_intro();
            }
            Phase::PlayerTurn => {
                print!("{}", render_status(&game_state));
                print!("{}", render_board(&game_state));
                prompt("Move with w/a/s/d, q to quit: ")?;

                let Some(line) = lines.next_line().await? else { break };
                match parse_command(&line) {
                    Some(Command::Move(direction)) => {
                        if let Err(e) = game_state.apply_player_action(direction) {
                            warn!("[GameLoop] {}", e);
                        }
                    }
                    Some(Command::Quit) => break,
                    Some(Command::Restart) | None => println!("Unknown command: {}", line.trim()),
                }
            }
            Phase::EnemyTurn { .. } => {
                sleep(game_state.enemy_turn_lead_in()).await;
                while let Some(events) = game_state.move_next_enemy() {
                    if !events.is_empty() {
                        sleep(Duration::from_millis(ENEMY_MOVE_TIME_MS)).await;
                    }
                }
            }
            Phase::LevelComplete => {
                println!("Day {} survived.", game_state.level);
                sleep(Duration::from_millis(RESTART_LEVEL_DELAY_MS)).await;
                if let Err(e) = game_state.next_level() {
                    warn!("[GameLoop] {}", e);
                }
            }
            Phase::GameOver => {
                print!("{}", render_board(&game_state));
                println!("{}", game_state.level_text());
                prompt("r to restart, q to quit: ")?;

                let Some(line) = lines.next_line().await? else { break };
                match parse_command(&line) {
                    Some(Command::Restart) => {
                        if let Err(e) = game_state.restart() {
                            warn!("[GameLoop] {}", e);
                        }
                    }
                    Some(Command::Quit) => break,
                    _ => {}
                }
            }
        }
    }

    info!("[GameLoop] Left on day {} with {} food", game_state.level, game_state.player.food);
    Ok(())
}
