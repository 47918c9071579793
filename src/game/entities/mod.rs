//! Game entities module.
//!
//! This module organizes player and enemy turn logic.

pub mod player;
pub mod enemy;

pub use player::*;
pub use enemy::*;
