/// Main configuration module.
///
/// Re-exports submodules for board generation, gameplay, anti-spam and server settings.
pub mod anti_spam;
pub mod board;
pub mod game;
pub mod server;
