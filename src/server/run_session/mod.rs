pub mod server;
pub mod session;
pub mod messages;
pub mod turn_resolution;


pub use server::{RunManager, RunSession};
