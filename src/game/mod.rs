pub mod types;
pub mod error;
pub mod events;
pub mod board;
pub mod state;
pub mod game_loop;

pub mod entities;
pub mod systems;

#[cfg(test)]
mod tests;

pub use error::ActionError;
pub use events::GameEvent;
pub use state::{GameState, Phase};
