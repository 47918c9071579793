use std::fmt;

/// Why the game refused an action. The state is left untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// Input arrived during the day banner or the enemy turn.
    NotPlayersTurn,
    /// The player has starved; only a restart is accepted.
    GameOver,
    /// A level transition or restart was requested while the day is still being played.
    LevelInProgress,
}

impl ActionError {
    /// Stable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::NotPlayersTurn => "NOT_PLAYERS_TURN",
            ActionError::GameOver => "GAME_OVER",
            ActionError::LevelInProgress => "LEVEL_IN_PROGRESS",
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ActionError::NotPlayersTurn => "It is not your turn yet.",
            ActionError::GameOver => "The game is over. Send Restart to play again.",
            ActionError::LevelInProgress => "The current day is still in progress.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for ActionError {}
